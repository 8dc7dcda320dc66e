//! Error types for the Zeal core library
//!
//! Data-validation failures travel as [`ValidationError`] values; this enum
//! exists for embedders that funnel validation and JSON decoding through a
//! single error type, e.g. via [`crate::Adapter::parse_str`].

use crate::issue::ValidationError;
use thiserror::Error;

/// Main error type for Zeal operations
#[derive(Debug, Error)]
pub enum Error {
    /// A value failed schema validation
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// JSON parsing and serialization errors
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Convenience type alias for Results using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json {
            message: err.to_string(),
            source: err,
        }
    }
}
