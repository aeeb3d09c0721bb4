//! Error types for shift-engine operations.
//!
//! Only request validation can fail. An unavailable candidate is a normal
//! outcome and is reported as data, never as an error.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShiftError {
    /// A request field was missing or malformed. No partial result is produced.
    #[error("Invalid request: {field}: {message}")]
    InvalidRequest { field: String, message: String },

    /// A staff identifier is not present in the booking snapshot.
    #[error("Staff member not found: {0}")]
    NotFound(String),
}

impl ShiftError {
    pub(crate) fn invalid(field: &str, message: impl Into<String>) -> Self {
        ShiftError::InvalidRequest {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ShiftError>;
