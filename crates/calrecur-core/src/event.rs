//! Event records as read by the expander.
//!
//! Only the scheduling fields of a stored event are modelled here: its start
//! and end instants and the optional [`RecurrenceRule`]. Titles, attendees
//! and the rest of the stored record belong to the storage layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::rule::RecurrenceRule;

/// A stored calendar event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Start instant; the anchor of the recurrence series.
    pub start_at: DateTime<Utc>,
    /// End instant. Always after `start_at` for records loaded from storage.
    pub end_at: DateTime<Utc>,
    /// Recurrence rule, if the event repeats.
    #[serde(default)]
    pub recurrence: Option<RecurrenceRule>,
}

impl Event {
    /// Creates a one-off event.
    pub fn new(start_at: DateTime<Utc>, end_at: DateTime<Utc>) -> Self {
        Self {
            start_at,
            end_at,
            recurrence: None,
        }
    }

    /// Attaches a recurrence rule.
    #[must_use]
    pub fn with_recurrence(mut self, rule: RecurrenceRule) -> Self {
        self.recurrence = Some(rule);
        self
    }

    /// Returns `true` if the event has a recurrence rule.
    pub fn is_recurring(&self) -> bool {
        self.recurrence.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, s).unwrap()
    }

    #[test]
    fn one_off_event() {
        let event = Event::new(utc(2026, 1, 1, 10, 0, 0), utc(2026, 1, 1, 11, 0, 0));
        assert!(!event.is_recurring());
        assert!(event.end_at > event.start_at);
    }

    #[test]
    fn recurring_event() {
        let event = Event::new(utc(2026, 1, 1, 10, 0, 0), utc(2026, 1, 1, 10, 30, 0))
            .with_recurrence(RecurrenceRule::weekly());
        assert!(event.is_recurring());
        assert_eq!(event.recurrence, Some(RecurrenceRule::weekly()));
    }

    #[test]
    fn deserialize_stored_record() {
        let json = r#"{
            "startAt": "2026-01-01T10:00:00Z",
            "endAt": "2026-01-01T11:00:00Z",
            "recurrence": { "freq": "DAILY", "interval": 2 }
        }"#;
        let event: Event = serde_json::from_str(json).unwrap();
        assert_eq!(event.start_at, utc(2026, 1, 1, 10, 0, 0));
        assert_eq!(
            event.recurrence,
            Some(RecurrenceRule::daily().with_interval(2))
        );
    }

    #[test]
    fn missing_recurrence_is_none() {
        let json = r#"{"startAt":"2026-01-01T10:00:00Z","endAt":"2026-01-01T11:00:00Z"}"#;
        let event: Event = serde_json::from_str(json).unwrap();
        assert!(event.recurrence.is_none());

        let json = r#"{"startAt":"2026-01-01T10:00:00Z","endAt":"2026-01-01T11:00:00Z","recurrence":null}"#;
        let event: Event = serde_json::from_str(json).unwrap();
        assert!(event.recurrence.is_none());
    }
}
