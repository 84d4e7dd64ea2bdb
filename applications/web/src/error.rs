//! Error types for the browser entry point

use keepsake_gallery::RosterError;
use keepsake_playback::SessionError;
use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};

pub type Result<T> = std::result::Result<T, WebError>;

#[derive(Debug, Error)]
pub enum WebError {
    #[error("JavaScript error: {0}")]
    Js(String),

    #[error("Missing browser global: {0}")]
    MissingGlobal(&'static str),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Roster(#[from] RosterError),
}

impl From<JsValue> for WebError {
    fn from(value: JsValue) -> Self {
        WebError::Js(describe(&value))
    }
}

impl From<WebError> for JsValue {
    fn from(error: WebError) -> Self {
        JsValue::from_str(&error.to_string())
    }
}

/// Human-readable text for a thrown JS value
pub fn describe(value: &JsValue) -> String {
    if let Some(text) = value.as_string() {
        return text;
    }
    if let Some(error) = value.dyn_ref::<js_sys::Error>() {
        return String::from(error.message());
    }
    format!("{value:?}")
}
