//! Recurrence rule types.
//!
//! A [`RecurrenceRule`] describes how an event repeats: a [`Frequency`], an
//! interval multiplier, optional weekday and month-day constraints, and
//! optional `count` / `until` terminators.

use chrono::{DateTime, Utc, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::{RecurrenceError, RecurrenceResult};

/// Highest valid weekday ordinal (Saturday, with Sunday as 0).
pub const MAX_WEEKDAY: u8 = 6;

/// Highest valid day-of-month value.
pub const MAX_MONTHDAY: u8 = 31;

/// How often a recurring event repeats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl Frequency {
    /// Returns the uppercase name used in stored rules.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Daily => "DAILY",
            Self::Weekly => "WEEKLY",
            Self::Monthly => "MONTHLY",
            Self::Yearly => "YEARLY",
        }
    }
}

impl std::fmt::Display for Frequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Converts a chrono weekday to its ordinal (0=Sunday..6=Saturday).
pub fn weekday_ordinal(weekday: Weekday) -> u8 {
    // num_days_from_sunday is always in 0..=6
    weekday.num_days_from_sunday() as u8
}

fn default_interval() -> u32 {
    1
}

/// A recurrence rule attached to an event.
///
/// `by_weekday` and `by_monthday` distinguish "not set" (`None`) from an
/// explicitly empty list, which is rejected by [`RecurrenceRule::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurrenceRule {
    /// Step unit.
    pub freq: Frequency,
    /// Step multiplier, e.g. 2 for "every other week".
    #[serde(default = "default_interval")]
    pub interval: u32,
    /// Weekday ordinals, 0=Sunday..6=Saturday.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub by_weekday: Option<Vec<u8>>,
    /// Days of month, 1..=31.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub by_monthday: Option<Vec<u8>>,
    /// Maximum number of occurrences, counted from the anchor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
    /// Inclusive end of the series.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub until: Option<DateTime<Utc>>,
}

impl RecurrenceRule {
    /// Creates a rule with the given frequency and interval 1.
    pub fn new(freq: Frequency) -> Self {
        Self {
            freq,
            interval: 1,
            by_weekday: None,
            by_monthday: None,
            count: None,
            until: None,
        }
    }

    pub fn daily() -> Self {
        Self::new(Frequency::Daily)
    }

    pub fn weekly() -> Self {
        Self::new(Frequency::Weekly)
    }

    pub fn monthly() -> Self {
        Self::new(Frequency::Monthly)
    }

    pub fn yearly() -> Self {
        Self::new(Frequency::Yearly)
    }

    /// Sets the step multiplier.
    #[must_use]
    pub fn with_interval(mut self, interval: u32) -> Self {
        self.interval = interval;
        self
    }

    /// Restricts occurrences to the given weekday ordinals.
    #[must_use]
    pub fn with_weekdays(mut self, weekdays: impl IntoIterator<Item = u8>) -> Self {
        self.by_weekday = Some(weekdays.into_iter().collect());
        self
    }

    /// Restricts occurrences to the given days of month.
    #[must_use]
    pub fn with_monthdays(mut self, monthdays: impl IntoIterator<Item = u8>) -> Self {
        self.by_monthday = Some(monthdays.into_iter().collect());
        self
    }

    /// Caps the series at `count` occurrences.
    #[must_use]
    pub fn with_count(mut self, count: u32) -> Self {
        self.count = Some(count);
        self
    }

    /// Ends the series at `until` (inclusive).
    #[must_use]
    pub fn with_until(mut self, until: DateTime<Utc>) -> Self {
        self.until = Some(until);
        self
    }

    /// Returns `true` if either weekday or month-day constraints are set.
    pub fn has_constraints(&self) -> bool {
        self.by_weekday.is_some() || self.by_monthday.is_some()
    }

    /// Checks that this rule can be expanded from `anchor`.
    ///
    /// # Errors
    ///
    /// Returns [`RecurrenceError::InvalidRule`] if the interval or count is
    /// zero, a constraint list is empty or out of range, or `until` falls
    /// before the anchor.
    pub fn validate(&self, anchor: DateTime<Utc>) -> RecurrenceResult<()> {
        if self.interval == 0 {
            return Err(RecurrenceError::invalid_rule("interval must be at least 1"));
        }
        if self.count == Some(0) {
            return Err(RecurrenceError::invalid_rule("count must be at least 1"));
        }
        if let Some(ref weekdays) = self.by_weekday {
            if weekdays.is_empty() {
                return Err(RecurrenceError::invalid_rule("byWeekday must not be empty"));
            }
            if let Some(bad) = weekdays.iter().find(|&&d| d > MAX_WEEKDAY) {
                return Err(RecurrenceError::invalid_rule(format!(
                    "byWeekday value {} is outside 0..={}",
                    bad, MAX_WEEKDAY
                )));
            }
        }
        if let Some(ref monthdays) = self.by_monthday {
            if monthdays.is_empty() {
                return Err(RecurrenceError::invalid_rule("byMonthday must not be empty"));
            }
            if let Some(bad) = monthdays.iter().find(|&&d| d == 0 || d > MAX_MONTHDAY) {
                return Err(RecurrenceError::invalid_rule(format!(
                    "byMonthday value {} is outside 1..={}",
                    bad, MAX_MONTHDAY
                )));
            }
        }
        if let Some(until) = self.until
            && until < anchor
        {
            return Err(RecurrenceError::invalid_rule(format!(
                "until {} is before event start {}",
                until.to_rfc3339(),
                anchor.to_rfc3339()
            )));
        }
        Ok(())
    }
}
