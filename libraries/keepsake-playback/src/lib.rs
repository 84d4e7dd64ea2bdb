//! Keepsake - Background Music Session
//!
//! Keeps one looped audio track "playing" across the independent page loads
//! of a multi-page static site.
//!
//! This crate provides:
//! - Playback state persisted to durable storage (`globalMusicState`)
//! - Lenient restoration with per-field defaults
//! - Bounded readiness polling before resuming a restored session
//! - One-shot retry on the next user gesture after a rejected play
//! - Periodic and pre-navigation position snapshots
//! - A control surface renderer (floating + navigation bar buttons)
//!
//! # Architecture
//!
//! `keepsake-playback` does not touch browser APIs directly. Storage, the
//! audio element and the DOM are reached through traits ([`StateStore`],
//! [`MediaElement`], [`Page`]) that the web application implements over
//! `web-sys`. Asynchronous play requests are handed to the host as a
//! [`PlayRequest`]; the host reports the outcome with
//! [`SessionManager::finish_play`].
//!
//! # Example
//!
//! ```rust
//! use keepsake_playback::{MediaElement, MemoryStore, SessionConfig, SessionManager};
//!
//! #[derive(Default)]
//! struct Speaker {
//!     time: f64,
//! }
//!
//! impl MediaElement for Speaker {
//!     type Pending = ();
//!
//!     fn set_looping(&mut self, _looping: bool) {}
//!     fn set_volume(&mut self, _volume: f64) {}
//!     fn current_time(&self) -> f64 {
//!         self.time
//!     }
//!     fn seek(&mut self, position_secs: f64) {
//!         self.time = position_secs;
//!     }
//!     fn is_ready(&self) -> bool {
//!         true
//!     }
//!     fn start(&mut self) {}
//!     fn pause(&mut self) {}
//! }
//!
//! let mut session = SessionManager::initialize(
//!     SessionConfig::default(),
//!     MemoryStore::new(),
//!     MemoryStore::new(),
//!     |_url| Ok(Speaker::default()),
//! )
//! .unwrap();
//!
//! // Toggle from paused requests playback; the platform settles it later
//! let request = session.toggle().unwrap();
//! session.finish_play(request.ticket, Ok(()));
//! assert!(session.is_playing());
//!
//! session.toggle();
//! assert!(!session.is_playing());
//! ```

mod controls;
mod error;
mod media;
pub mod record;
mod resume;
mod session;
mod store;
pub mod types;

// Public exports
pub use controls::{
    ControlLabel, ControlSurface, Page, FLOATING_BUTTON_ID, FLOATING_CONTAINER_CLASS,
    NAV_BUTTON_ID, NAV_ITEM_CLASS, NAV_MOUNT_SELECTOR,
};
pub use error::{PlayRejection, Result, SessionError};
pub use media::MediaElement;
pub use resume::ResumeStep;
pub use session::SessionManager;
pub use store::{MemoryStore, StateStore};
pub use types::{PlayOrigin, PlayRequest, PlayTicket, PlaybackState, SessionConfig, DEFAULT_VOLUME};
