//! Core types for the playback session

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Volume used when nothing has been stored yet
pub const DEFAULT_VOLUME: f64 = 0.7;

/// Playback state mirrored into durable storage
///
/// There is no track identifier: the site plays exactly one looped asset,
/// so the position is only meaningful for that asset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackState {
    /// Whether playback should be active
    pub is_playing: bool,

    /// Last known offset into the track, in seconds (>= 0)
    pub position_secs: f64,

    /// Output volume in [0, 1]
    pub volume: f64,
}

impl PlaybackState {
    /// Clamp a volume into [0, 1], mapping NaN to the default
    pub fn clamp_volume(volume: f64) -> f64 {
        if volume.is_nan() {
            DEFAULT_VOLUME
        } else {
            volume.clamp(0.0, 1.0)
        }
    }

    /// Clamp a position to a finite, non-negative offset
    pub fn clamp_position(position_secs: f64) -> f64 {
        if position_secs.is_finite() && position_secs > 0.0 {
            position_secs
        } else {
            0.0
        }
    }
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self {
            is_playing: false,
            position_secs: 0.0,
            volume: DEFAULT_VOLUME,
        }
    }
}

/// What caused a play request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayOrigin {
    /// Control activation (`play()` / `toggle()`)
    User,

    /// Resuming a session restored from storage
    Restore,

    /// One-shot retry after a user gesture
    GestureRetry,
}

/// Handle identifying one outstanding play request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayTicket {
    /// Monotonic request id within one session
    pub id: u64,

    /// What triggered the request
    pub origin: PlayOrigin,
}

/// A play request handed to the host
///
/// `pending` is whatever the media element returned for the request (a
/// promise in the browser). The host settles it and reports back with
/// [`crate::SessionManager::finish_play`].
#[derive(Debug)]
pub struct PlayRequest<P> {
    pub ticket: PlayTicket,
    pub pending: P,
}

/// Playback session configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// URL of the single looped audio asset
    #[serde(default = "default_asset_url")]
    pub asset_url: String,

    /// Durable storage key for the playback record
    #[serde(default = "default_storage_key")]
    pub storage_key: String,

    /// Session storage key written on every save
    #[serde(default = "default_active_flag_key")]
    pub active_flag_key: String,

    /// Volume used when the record has none (default: 0.7)
    #[serde(default = "default_volume")]
    pub default_volume: f64,

    /// Position snapshot period while playing (default: 1000ms)
    #[serde(default = "default_snapshot_interval_ms")]
    pub snapshot_interval_ms: u32,

    /// Delay before a restored session starts polling (default: 200ms)
    #[serde(default = "default_resume_delay_ms")]
    pub resume_delay_ms: u32,

    /// Backoff between readiness polls (default: 50ms)
    #[serde(default = "default_ready_poll_interval_ms")]
    pub ready_poll_interval_ms: u32,

    /// Readiness polls before a restore gives up (default: 200)
    #[serde(default = "default_max_ready_polls")]
    pub max_ready_polls: u32,
}

impl SessionConfig {
    pub fn snapshot_interval(&self) -> Duration {
        Duration::from_millis(u64::from(self.snapshot_interval_ms))
    }

    pub fn resume_delay(&self) -> Duration {
        Duration::from_millis(u64::from(self.resume_delay_ms))
    }

    pub fn ready_poll_interval(&self) -> Duration {
        Duration::from_millis(u64::from(self.ready_poll_interval_ms))
    }

    /// State used when no usable record exists
    pub fn initial_state(&self) -> PlaybackState {
        PlaybackState {
            volume: PlaybackState::clamp_volume(self.default_volume),
            ..PlaybackState::default()
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            asset_url: default_asset_url(),
            storage_key: default_storage_key(),
            active_flag_key: default_active_flag_key(),
            default_volume: default_volume(),
            snapshot_interval_ms: default_snapshot_interval_ms(),
            resume_delay_ms: default_resume_delay_ms(),
            ready_poll_interval_ms: default_ready_poll_interval_ms(),
            max_ready_polls: default_max_ready_polls(),
        }
    }
}

fn default_asset_url() -> String {
    "./assets/music/imtiaz252_all-of-me-john-legend-lindsey-stirling (1).mp3".to_string()
}

fn default_storage_key() -> String {
    "globalMusicState".to_string()
}

fn default_active_flag_key() -> String {
    "musicActive".to_string()
}

fn default_volume() -> f64 {
    DEFAULT_VOLUME
}

fn default_snapshot_interval_ms() -> u32 {
    1000
}

fn default_resume_delay_ms() -> u32 {
    200
}

fn default_ready_poll_interval_ms() -> u32 {
    50
}

fn default_max_ready_polls() -> u32 {
    200
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_state() {
        let state = PlaybackState::default();
        assert!(!state.is_playing);
        assert_eq!(state.position_secs, 0.0);
        assert_eq!(state.volume, 0.7);
    }

    #[test]
    fn default_config() {
        let config = SessionConfig::default();
        assert_eq!(config.storage_key, "globalMusicState");
        assert_eq!(config.active_flag_key, "musicActive");
        assert_eq!(config.snapshot_interval(), Duration::from_secs(1));
        assert_eq!(config.resume_delay(), Duration::from_millis(200));
        assert_eq!(config.ready_poll_interval(), Duration::from_millis(50));
        assert_eq!(config.max_ready_polls, 200);
    }

    #[test]
    fn partial_config_fills_defaults() {
        let config: SessionConfig =
            serde_json::from_str(r#"{"asset_url": "/a.mp3", "default_volume": 0.4}"#).unwrap();
        assert_eq!(config.asset_url, "/a.mp3");
        assert_eq!(config.default_volume, 0.4);
        assert_eq!(config.storage_key, "globalMusicState");
        assert_eq!(config.initial_state().volume, 0.4);
    }

    #[test]
    fn clamps() {
        assert_eq!(PlaybackState::clamp_volume(1.5), 1.0);
        assert_eq!(PlaybackState::clamp_volume(-0.2), 0.0);
        assert_eq!(PlaybackState::clamp_volume(f64::NAN), DEFAULT_VOLUME);
        assert_eq!(PlaybackState::clamp_position(-3.0), 0.0);
        assert_eq!(PlaybackState::clamp_position(f64::INFINITY), 0.0);
        assert_eq!(PlaybackState::clamp_position(12.5), 12.5);
    }
}
