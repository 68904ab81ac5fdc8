//! Query windows.
//!
//! [`QueryWindow`] is the caller-supplied range occurrences are filtered
//! against. Unlike a half-open interval, both ends are inclusive.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{RecurrenceError, RecurrenceResult};

/// An inclusive time range `[from, to]` in UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryWindow {
    /// Start of the window (inclusive).
    pub from: DateTime<Utc>,
    /// End of the window (inclusive).
    pub to: DateTime<Utc>,
}

impl QueryWindow {
    /// Creates a new window.
    ///
    /// # Errors
    ///
    /// Returns [`RecurrenceError::InvalidWindow`] if `from` is after `to`.
    pub fn new(from: DateTime<Utc>, to: DateTime<Utc>) -> RecurrenceResult<Self> {
        if from > to {
            return Err(RecurrenceError::InvalidWindow { from, to });
        }
        Ok(Self { from, to })
    }

    /// Checks if a datetime falls within this window, ends included.
    pub fn contains(&self, dt: DateTime<Utc>) -> bool {
        self.from <= dt && dt <= self.to
    }

    /// Returns the effective upper bound once an optional series end is applied.
    pub fn upper_bound(&self, until: Option<DateTime<Utc>>) -> DateTime<Utc> {
        until.map_or(self.to, |until| until.min(self.to))
    }
}
