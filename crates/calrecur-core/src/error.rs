//! Recurrence error types.

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Result type for recurrence operations.
pub type RecurrenceResult<T> = Result<T, RecurrenceError>;

/// Errors that can occur while expanding a recurring event.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecurrenceError {
    /// The query window starts after it ends.
    #[error("invalid window: from {from} is after to {to}")]
    InvalidWindow {
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    },

    /// The recurrence rule cannot be expanded.
    #[error("invalid recurrence rule: {0}")]
    InvalidRule(String),

    /// Expansion generated more instants than the safety ceiling allows.
    #[error("recurrence overflow: more than {limit} occurrences generated")]
    RecurrenceOverflow { limit: usize },
}

impl RecurrenceError {
    /// Creates an `InvalidRule` error from any message.
    pub fn invalid_rule(msg: impl Into<String>) -> Self {
        Self::InvalidRule(msg.into())
    }
}
