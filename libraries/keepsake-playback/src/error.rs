//! Error types for the playback session

use thiserror::Error;

/// Why the browser refused to start playback
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayRejection {
    /// Autoplay policy: playback needs a user gesture first
    NotAllowed,

    /// Play request was interrupted by a pause or a new load
    Aborted,

    /// The media resource cannot be played at all
    NotSupported,

    /// Anything else the platform reports
    Other(String),
}

impl PlayRejection {
    /// Classify a platform error name (e.g. a `DOMException` name)
    pub fn from_name(name: &str, message: &str) -> Self {
        match name {
            "NotAllowedError" => Self::NotAllowed,
            "AbortError" => Self::Aborted,
            "NotSupportedError" => Self::NotSupported,
            _ => Self::Other(if message.is_empty() {
                name.to_string()
            } else {
                format!("{name}: {message}")
            }),
        }
    }

    /// Whether a later user gesture could make playback succeed
    pub fn is_retryable(&self) -> bool {
        !matches!(self, Self::Aborted)
    }
}

impl std::fmt::Display for PlayRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotAllowed => write!(f, "blocked by autoplay policy"),
            Self::Aborted => write!(f, "aborted"),
            Self::NotSupported => write!(f, "media not supported"),
            Self::Other(reason) => write!(f, "{reason}"),
        }
    }
}

/// Playback session errors
#[derive(Debug, Error)]
pub enum SessionError {
    /// Durable or session storage is unavailable or refused a write
    #[error("Storage error: {0}")]
    Storage(String),

    /// Stored record is present but is not valid JSON
    #[error("Corrupt playback record: {0}")]
    CorruptRecord(#[from] serde_json::Error),

    /// Media element could not be created or configured
    #[error("Media error: {0}")]
    Media(String),

    /// Platform rejected a play request
    #[error("Playback rejected: {0}")]
    PlayRejected(PlayRejection),

    /// Control surface could not be mounted
    #[error("Render error: {0}")]
    Render(String),
}

/// Result type for session operations
pub type Result<T> = std::result::Result<T, SessionError>;
