//! Error types for roster management

use thiserror::Error;

/// Roster errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RosterError {
    /// Filename is already in the roster
    #[error("Photo already listed: {0}")]
    AlreadyPresent(String),

    /// Filename is not in the roster
    #[error("Photo not listed: {0}")]
    NotPresent(String),

    /// Blank filenames are never listed
    #[error("Photo filename is empty")]
    EmptyFilename,
}

/// Result type for roster operations
pub type Result<T> = std::result::Result<T, RosterError>;
