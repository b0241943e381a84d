//! Error types for boardsync configuration

use thiserror::Error;

/// Result type alias for configuration and credential operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for configuration and credential operations
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Access token variable unset or empty
    #[error("{0} is required to update project status")]
    MissingToken(String),
}
