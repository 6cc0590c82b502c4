//! Simulator error types.

use std::path::PathBuf;
use thiserror::Error;

/// Simulator errors.
///
/// Only startup can fail; once ticking, the simulation has no recoverable
/// error conditions.
#[derive(Error, Debug)]
pub enum SimError {
    /// Sprite file missing or unreadable
    #[error("sprite asset {path:?} could not be loaded: {source}")]
    AssetUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Sprite file present but not a usable image
    #[error("sprite asset {path:?} is invalid: {reason}")]
    AssetInvalid { path: PathBuf, reason: String },

    /// Rejected configuration value
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Domain validation error
    #[error(transparent)]
    Domain(#[from] planes_domain::DomainError),
}

/// Result type for simulator operations.
pub type Result<T> = std::result::Result<T, SimError>;
