use thiserror::Error;

use crate::id::PictureId;

/// Errors raised by a [`PersistenceGateway`](crate::persistence::PersistenceGateway).
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("Picture not found: {0}")]
    NotFound(PictureId),

    #[error("Failed to serialize picture: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Failed to access picture storage: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Persistence backend rejected the request: {0}")]
    Rejected(String),
}

/// Result type for persistence operations
pub type PersistenceResult<T> = Result<T, PersistenceError>;

/// A string that is not a valid picture identifier
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid picture id {0:?}: expected 32 lowercase hex characters")]
pub struct ParseIdError(pub String);

/// Errors that can occur while loading a [`SurfaceConfig`](crate::config::SurfaceConfig)
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Invalid config: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Invalid config value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}
