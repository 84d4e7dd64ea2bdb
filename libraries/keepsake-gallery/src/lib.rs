//! Keepsake - Photo Gallery Helpers
//!
//! Browser-independent pieces of the photo gallery:
//! - A fixed, ordered roster of image filenames with in-memory add/remove
//! - Deterministic relative paths under one base directory
//! - Frame math for the photo-count animation
//! - Bookkeeping for asynchronous existence checks
//! - Lazy-load planning (placeholder, deferred source, reveal classes)
//!
//! Nothing here is persisted; the roster is rebuilt from configuration on
//! every page load.
//!
//! # Example
//!
//! ```rust
//! use keepsake_gallery::{CountAnimation, PhotoRoster};
//! use std::time::Duration;
//!
//! let mut roster = PhotoRoster::default();
//! assert_eq!(roster.count(), 16);
//! roster.add("x.jpg").unwrap();
//! assert!(roster.add("x.jpg").is_err());
//!
//! let mut counter = CountAnimation::new(roster.count() as u32, Duration::from_millis(1500));
//! counter.frame(0.0);
//! assert_eq!(counter.frame(1500.0).value, 17);
//! ```

mod counter;
mod error;
pub mod lazy;
mod roster;
pub mod types;
mod validation;

// Public exports
pub use counter::{CountAnimation, CountFrame};
pub use error::{Result, RosterError};
pub use lazy::ImagePlan;
pub use roster::PhotoRoster;
pub use types::{GalleryConfig, SITE_PHOTOS};
pub use validation::ValidationRun;
