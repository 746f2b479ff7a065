use thiserror::Error;

/// Core error type shared across tabsmith crates.
#[derive(Debug, Error)]
pub enum Error {
    /// A service response does not have the shape expected for its mode.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
    /// A schema document could not be decoded.
    #[error("invalid schema document: {0}")]
    InvalidSchema(String),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias for results returned by tabsmith crates.
pub type Result<T> = std::result::Result<T, Error>;
