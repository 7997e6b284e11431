use thiserror::Error;

/// Application-wide error types for Fleet.
#[derive(Error, Debug)]
pub enum AppError {
    /// Credentials or bearer token rejected. Surfaced to callers without
    /// detail about which check failed.
    #[error("Unauthorized")]
    Unauthorized,

    /// Operation targets a record id that does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Request payload failed validation before reaching the store.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(String),

    /// Missing or malformed process configuration.
    #[error("Config error: {0}")]
    Config(String),

    /// Token signing or password hashing failed.
    #[error("Token error: {0}")]
    Token(String),
}

impl AppError {
    /// Returns true if this error maps to a client-caused condition
    /// (4xx) rather than a server fault.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            AppError::Unauthorized | AppError::NotFound(_) | AppError::Validation(_)
        )
    }
}
