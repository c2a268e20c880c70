use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RequiresError {
    #[error("invalid name '{value}': {reason}")]
    InvalidName { value: String, reason: String },
    #[error("API token required (use -t/--token or REQUIRES_TOKEN)")]
    MissingToken,
    #[error("invalid pattern '{pattern}': {message}")]
    Pattern { pattern: String, message: String },
    #[error("failed to find requirement files matching the pattern for {argument}")]
    NoManifests { argument: String },
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("network error: {0}")]
    Network(String),
    #[error("request failed with status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("command failed: {0}")]
    Command(String),
    #[error("invalid header value: {0}")]
    InvalidHeader(String),
}

impl RequiresError {
    /// HTTP status carried by a remote failure, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            RequiresError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
