//! Durable storage record
//!
//! Wire format (JSON): `{"isPlaying": bool, "currentTime": number, "volume": number}`.
//! Decoding is lenient per field: a missing or mistyped field falls back to
//! its default without discarding the others.

use crate::error::Result;
use crate::types::PlaybackState;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::warn;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StoredRecord {
    is_playing: bool,
    current_time: f64,
    volume: f64,
}

/// Serialize state into the stored record
pub fn encode(state: &PlaybackState) -> Result<String> {
    let record = StoredRecord {
        is_playing: state.is_playing,
        current_time: PlaybackState::clamp_position(state.position_secs),
        volume: PlaybackState::clamp_volume(state.volume),
    };
    Ok(serde_json::to_string(&record)?)
}

/// Parse a stored record, substituting `fallback` field by field
///
/// Fails only when `raw` is not JSON at all.
pub fn decode(raw: &str, fallback: PlaybackState) -> Result<PlaybackState> {
    let value: Value = serde_json::from_str(raw)?;
    let Some(fields) = value.as_object() else {
        warn!(kind = json_kind(&value), "Playback record is not an object, using defaults");
        return Ok(fallback);
    };
    Ok(from_fields(fields, fallback))
}

/// Restore state from whatever storage returned; never fails
pub fn restore(raw: Option<&str>, fallback: PlaybackState) -> PlaybackState {
    let Some(raw) = raw else {
        return fallback;
    };
    match decode(raw, fallback) {
        Ok(state) => state,
        Err(e) => {
            warn!(error = %e, "Error loading music state, using defaults");
            fallback
        }
    }
}

fn from_fields(fields: &Map<String, Value>, fallback: PlaybackState) -> PlaybackState {
    let is_playing = fields
        .get("isPlaying")
        .and_then(Value::as_bool)
        .unwrap_or(fallback.is_playing);

    let position_secs = fields
        .get("currentTime")
        .and_then(Value::as_f64)
        .map(PlaybackState::clamp_position)
        .unwrap_or(fallback.position_secs);

    let volume = fields
        .get("volume")
        .and_then(Value::as_f64)
        .filter(|v| v.is_finite())
        .map(PlaybackState::clamp_volume)
        .unwrap_or(fallback.volume);

    PlaybackState {
        is_playing,
        position_secs,
        volume,
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
