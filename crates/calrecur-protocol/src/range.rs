//! The calendar range every request timestamp must fall in.

use chrono::{DateTime, NaiveDate, Utc};

use crate::error::{ProtocolError, ProtocolResult};

/// First year accepted by default.
pub const DEFAULT_MIN_YEAR: i32 = 2000;

/// Last year accepted by default.
pub const DEFAULT_MAX_YEAR: i32 = 2099;

/// Inclusive range of accepted instants, whole years from January 1st
/// 00:00:00 to December 31st 23:59:59 UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllowedRange {
    pub min: DateTime<Utc>,
    pub max: DateTime<Utc>,
}

/// [`DEFAULT_MIN_YEAR`] through [`DEFAULT_MAX_YEAR`].
impl Default for AllowedRange {
    fn default() -> Self {
        Self::from_years(DEFAULT_MIN_YEAR, DEFAULT_MAX_YEAR)
            .expect("default years should be representable")
    }
}

impl AllowedRange {
    /// Builds the range covering `min_year..=max_year`.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::InvalidPayload`] if the years are reversed or
    /// outside what the calendar can represent.
    pub fn from_years(min_year: i32, max_year: i32) -> ProtocolResult<Self> {
        if min_year > max_year {
            return Err(ProtocolError::invalid_payload(format!(
                "min_year {} is after max_year {}",
                min_year, max_year
            )));
        }
        let min = NaiveDate::from_ymd_opt(min_year, 1, 1).and_then(|d| d.and_hms_opt(0, 0, 0));
        let max = NaiveDate::from_ymd_opt(max_year, 12, 31).and_then(|d| d.and_hms_opt(23, 59, 59));
        let (Some(min), Some(max)) = (min, max) else {
            return Err(ProtocolError::invalid_payload(format!(
                "years {}..={} are outside the supported calendar",
                min_year, max_year
            )));
        };
        Ok(Self {
            min: min.and_utc(),
            max: max.and_utc(),
        })
    }

    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.min <= instant && instant <= self.max
    }

    /// Checks `instant`, naming `field` in the error.
    pub fn check(&self, field: &'static str, instant: DateTime<Utc>) -> ProtocolResult<()> {
        if self.contains(instant) {
            Ok(())
        } else {
            Err(ProtocolError::OutOfRange {
                field,
                min: self.min.to_rfc3339(),
                max: self.max.to_rfc3339(),
            })
        }
    }
}
