//! Lazy image loading plan
//!
//! With an intersection observer available the real source is parked in
//! `data-src` and a placeholder is shown until the image scrolls into view.
//! Without one the source is set immediately.

/// Inline SVG shown until a deferred image is revealed
pub const PLACEHOLDER_SRC: &str = "data:image/svg+xml,%3Csvg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"0 0 300 200\"%3E%3Crect fill=\"%23f0f0f0\" width=\"300\" height=\"200\"/%3E%3Ctext x=\"50%\" y=\"50%\" text-anchor=\"middle\" dy=\".3em\" fill=\"%23999\"%3ELoading...%3C/text%3E%3C/svg%3E";

pub const LAZY_CLASS: &str = "lazy";
pub const LOADED_CLASS: &str = "loaded";

/// Opacity applied to the container of an image that failed to load
pub const FAILED_CONTAINER_OPACITY: &str = "0.5";

/// Attributes an image element starts with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePlan {
    /// Initial `src`
    pub src: String,

    /// Real source parked until reveal, when deferred
    pub data_src: Option<String>,

    pub class_name: String,
    pub alt: String,
}

impl ImagePlan {
    pub fn new(src: &str, alt: &str, class_name: &str, deferred: bool) -> Self {
        if deferred {
            Self {
                src: PLACEHOLDER_SRC.to_string(),
                data_src: Some(src.to_string()),
                class_name: join_class(class_name, LAZY_CLASS),
                alt: alt.to_string(),
            }
        } else {
            Self {
                src: src.to_string(),
                data_src: None,
                class_name: class_name.to_string(),
                alt: alt.to_string(),
            }
        }
    }

    pub fn is_deferred(&self) -> bool {
        self.data_src.is_some()
    }
}

/// Class list after a deferred image is revealed
pub fn revealed_class(class_name: &str) -> String {
    let kept: Vec<&str> = class_name
        .split_whitespace()
        .filter(|c| *c != LAZY_CLASS && *c != LOADED_CLASS)
        .collect();
    join_class(&kept.join(" "), LOADED_CLASS)
}

fn join_class(base: &str, extra: &str) -> String {
    let base = base.trim();
    if base.is_empty() {
        extra.to_string()
    } else {
        format!("{base} {extra}")
    }
}
