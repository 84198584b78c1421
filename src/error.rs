//! Error types for swarm-info

use thiserror::Error;

/// Result type for swarm-info operations
pub type Result<T> = std::result::Result<T, SwarmInfoError>;

/// swarm-info error types
#[derive(Error, Debug)]
pub enum SwarmInfoError {
    #[error("Gateway error: {0}")]
    Gateway(String),

    #[error("Gateway returned {status}: {message}")]
    GatewayStatus { status: u16, message: String },

    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Malformed image reference: {0}")]
    MalformedImage(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SwarmInfoError {
    /// Whether the error means the requested object does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, SwarmInfoError::NotFound(_))
    }
}

impl From<reqwest::Error> for SwarmInfoError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            SwarmInfoError::Timeout(err.to_string())
        } else {
            SwarmInfoError::Gateway(err.to_string())
        }
    }
}
