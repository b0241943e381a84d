//! Error types for GitHub operations

use thiserror::Error;

/// Result type for GitHub operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during GitHub operations
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration or credential error
    #[error(transparent)]
    Core(#[from] boardsync_core::Error),

    /// Transport-level failure (connection, TLS, timeout)
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success HTTP status
    #[error("GitHub request failed with status {status}: {body}")]
    Status { status: u16, body: String },

    /// GraphQL response carried an errors array
    #[error("GraphQL errors: {}", .0.join(", "))]
    GraphQl(Vec<String>),

    /// Malformed or unexpected response payload
    #[error("Parse error: {0}")]
    Parse(String),

    /// Project board could not be found for the owner
    #[error("Project {number} for {owner} was not found")]
    ProjectNotFound { owner: String, number: u64 },

    /// No single-select field with the expected name
    #[error("Field '{0}' not found on project")]
    FieldNotFound(String),

    /// Field exists but lacks the expected option
    #[error("Option '{option}' not found on field '{field}'")]
    OptionNotFound { field: String, option: String },

    /// Failed writing the progress report
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Parse(err.to_string())
    }
}
