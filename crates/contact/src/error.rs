//! Error types for contact submissions (thiserror-based).

use thiserror::Error;

/// Errors that can occur while handling a contact submission.
#[derive(Error, Debug)]
pub enum ContactError {
    /// Body is not valid JSON or has the wrong shape.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A required field is absent or null.
    #[error("Missing field: {field}")]
    MissingField { field: &'static str },

    /// The sink could not deliver the message.
    #[error("Delivery failed: {0}")]
    Delivery(String),
}

/// Convenience Result type for contact operations.
pub type ContactResult<T> = Result<T, ContactError>;
