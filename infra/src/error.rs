//! Infrastructure error types and their mapping into the domain.

use otp_core::errors::OtpError;

/// Errors raised by infrastructure implementations.
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection or query error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Redis cache error
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// HTTP request error for external services
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Cached payload could not be encoded or decoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Mail delivery error
    #[error("Email service error: {0}")]
    Email(String),
}

/// The engine sees every infrastructure failure as an opaque storage error.
impl From<InfrastructureError> for OtpError {
    fn from(error: InfrastructureError) -> Self {
        OtpError::Storage {
            message: error.to_string(),
        }
    }
}
