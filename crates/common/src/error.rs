//! Common error types and handling for HRDesk

use crate::state::StateError;

/// Common result type
pub type Result<T> = std::result::Result<T, Error>;

/// Error surfaced by HRDesk entry points (the `inspect` tool, value parsing)
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Environment configuration or subscriber setup failed
    #[error("Configuration error: {0}")]
    Config(#[from] anyhow::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Credential missing, malformed or expired
    #[error("Authentication error: {0}")]
    Authentication(String),

    /// Authenticated, but not allowed
    #[error("Authorization error: {0}")]
    Authorization(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    State(#[from] StateError),
}

impl Error {
    /// Stable code for machine-readable output
    pub fn error_code(&self) -> &'static str {
        match self {
            Error::Config(_) => "CONFIG_ERROR",
            Error::Serialization(_) => "SERIALIZATION_ERROR",
            Error::Authentication(_) => "AUTHENTICATION_ERROR",
            Error::Authorization(_) => "AUTHORIZATION_ERROR",
            Error::Validation(_) => "VALIDATION_ERROR",
            Error::State(_) => "STATE_ERROR",
        }
    }
}
