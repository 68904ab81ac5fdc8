//! Protocol error types.

use calrecur_core::RecurrenceError;
use thiserror::Error;

use crate::types::ErrorCode;

/// Result type for protocol operations.
pub type ProtocolResult<T> = Result<T, ProtocolError>;

/// Errors raised while validating requests or building responses.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// A timestamp lies outside the allowed calendar range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange {
        field: &'static str,
        min: String,
        max: String,
    },

    /// A timestamp string is not valid RFC 3339.
    #[error("{field} is not a valid RFC 3339 timestamp: {value}")]
    InvalidTimestamp { field: &'static str, value: String },

    /// A request body field failed validation.
    #[error("{0}")]
    InvalidPayload(String),

    /// Failed to parse or serialize JSON.
    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The expander rejected the request.
    #[error(transparent)]
    Recurrence(#[from] RecurrenceError),
}

impl ProtocolError {
    /// Creates an `InvalidPayload` error from any message.
    pub fn invalid_payload(msg: impl Into<String>) -> Self {
        Self::InvalidPayload(msg.into())
    }

    /// Returns the response error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::OutOfRange { .. }
            | Self::InvalidTimestamp { .. }
            | Self::InvalidPayload(_)
            | Self::Recurrence(RecurrenceError::InvalidWindow { .. })
            | Self::Recurrence(RecurrenceError::InvalidRule(_)) => ErrorCode::ValidationError,
            Self::Recurrence(RecurrenceError::RecurrenceOverflow { .. }) => {
                ErrorCode::RecurrenceOverflow
            }
            Self::Serialization(_) => ErrorCode::InternalServerError,
        }
    }

    /// Returns the HTTP status the request layer should answer with.
    pub fn status(&self) -> u16 {
        self.code().status()
    }
}
