//! Request and response bodies around the occurrences endpoint.

use calrecur_core::{Event, Frequency, QueryWindow, RecurrenceRule};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{ProtocolError, ProtocolResult};
use crate::range::AllowedRange;

/// Error codes carried in [`ErrorBody`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCode {
    /// The request failed validation.
    ValidationError,
    /// The rule generated too many occurrences.
    RecurrenceOverflow,
    /// Unexpected failure.
    InternalServerError,
}

impl ErrorCode {
    /// Returns the HTTP status for this code.
    pub fn status(&self) -> u16 {
        match self {
            Self::ValidationError => 400,
            Self::RecurrenceOverflow => 422,
            Self::InternalServerError => 500,
        }
    }
}

/// Error response body: `{ "error": <code>, "message": <text> }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: ErrorCode,
    pub message: String,
}

impl ErrorBody {
    pub fn new(error: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            error,
            message: message.into(),
        }
    }
}

impl From<&ProtocolError> for ErrorBody {
    fn from(err: &ProtocolError) -> Self {
        Self::new(err.code(), err.to_string())
    }
}

/// Success body: `{ "occurrences": [<rfc3339>, ...] }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OccurrencesResponse {
    pub occurrences: Vec<DateTime<Utc>>,
}

impl OccurrencesResponse {
    pub fn new(occurrences: Vec<DateTime<Utc>>) -> Self {
        Self { occurrences }
    }

    pub fn len(&self) -> usize {
        self.occurrences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.occurrences.is_empty()
    }
}

/// The `from` / `to` query parameters of an occurrences request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OccurrencesQuery {
    window: QueryWindow,
}

impl OccurrencesQuery {
    /// Validates already parsed bounds against `range`.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::OutOfRange`] if either bound is outside
    /// `range`, or an `InvalidWindow` recurrence error if `from > to`.
    pub fn new(
        from: DateTime<Utc>,
        to: DateTime<Utc>,
        range: &AllowedRange,
    ) -> ProtocolResult<Self> {
        range.check("from", from)?;
        range.check("to", to)?;
        Ok(Self {
            window: QueryWindow::new(from, to)?,
        })
    }

    /// Parses RFC 3339 query parameters.
    pub fn parse(from: &str, to: &str, range: &AllowedRange) -> ProtocolResult<Self> {
        Self::new(parse_timestamp("from", from)?, parse_timestamp("to", to)?, range)
    }

    pub fn window(&self) -> &QueryWindow {
        &self.window
    }

    pub fn from(&self) -> DateTime<Utc> {
        self.window.from
    }

    pub fn to(&self) -> DateTime<Utc> {
        self.window.to
    }
}

/// Parses an RFC 3339 timestamp, normalizing it to UTC.
pub fn parse_timestamp(field: &'static str, value: &str) -> ProtocolResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value.trim())
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| ProtocolError::InvalidTimestamp {
            field,
            value: value.to_string(),
        })
}

fn default_interval() -> i64 {
    1
}

/// Body of a create/update recurrence request, before validation.
///
/// Numbers are kept signed so that negative values are reported as
/// validation errors rather than as JSON type errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurrencePayload {
    pub freq: Frequency,
    #[serde(default = "default_interval")]
    pub interval: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub by_weekday: Option<Vec<i64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub by_monthday: Option<Vec<i64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub until: Option<DateTime<Utc>>,
}

impl RecurrencePayload {
    /// Validates the payload into a rule.
    ///
    /// An empty `byWeekday` / `byMonthday` list means "not set", matching how
    /// stored rules represent an absent constraint.
    pub fn into_rule(self, range: &AllowedRange) -> ProtocolResult<RecurrenceRule> {
        if self.interval < 1 {
            return Err(ProtocolError::invalid_payload("interval must be at least 1"));
        }
        let interval = u32::try_from(self.interval)
            .map_err(|_| ProtocolError::invalid_payload("interval is too large"))?;

        let count = match self.count {
            None => None,
            Some(count) if count < 1 => {
                return Err(ProtocolError::invalid_payload("count must be positive"));
            }
            Some(count) => Some(
                u32::try_from(count)
                    .map_err(|_| ProtocolError::invalid_payload("count is too large"))?,
            ),
        };

        if let Some(until) = self.until {
            range.check("until", until)?;
        }

        Ok(RecurrenceRule {
            freq: self.freq,
            interval,
            by_weekday: day_list("byWeekday", self.by_weekday, 0, 6)?,
            by_monthday: day_list("byMonthday", self.by_monthday, 1, 31)?,
            count,
            until: self.until,
        })
    }
}

fn day_list(
    field: &str,
    values: Option<Vec<i64>>,
    min: u8,
    max: u8,
) -> ProtocolResult<Option<Vec<u8>>> {
    let Some(values) = values.filter(|v| !v.is_empty()) else {
        return Ok(None);
    };
    values
        .into_iter()
        .map(|value| {
            u8::try_from(value)
                .ok()
                .filter(|v| (min..=max).contains(v))
                .ok_or_else(|| {
                    ProtocolError::invalid_payload(format!(
                        "{} values must be between {} and {}, got {}",
                        field, min, max, value
                    ))
                })
        })
        .collect::<ProtocolResult<Vec<u8>>>()
        .map(Some)
}

/// A stored or submitted event, before validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventPayload {
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurrence: Option<RecurrencePayload>,
}

impl EventPayload {
    /// Parses a JSON event document.
    pub fn from_json(json: &str) -> ProtocolResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| ProtocolError::invalid_payload(format!("malformed event: {}", e)))
    }

    /// Validates the payload into an event.
    pub fn into_event(self, range: &AllowedRange) -> ProtocolResult<Event> {
        range.check("startAt", self.start_at)?;
        range.check("endAt", self.end_at)?;
        if self.end_at <= self.start_at {
            return Err(ProtocolError::invalid_payload("End date must be after start date"));
        }
        let event = Event::new(self.start_at, self.end_at);
        Ok(match self.recurrence {
            Some(rule) => event.with_recurrence(rule.into_rule(range)?),
            None => event,
        })
    }
}
