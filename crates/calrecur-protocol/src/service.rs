//! Glue between request bodies and the expander.

use calrecur_core::{Event, ExpandOptions, expand_window};

use crate::error::{ProtocolError, ProtocolResult};
use crate::range::AllowedRange;
use crate::types::{ErrorBody, EventPayload, OccurrencesQuery, OccurrencesResponse};

/// Expands `event` over `query`.
///
/// # Errors
///
/// Returns [`ProtocolError::Recurrence`] if the expander rejects the rule or
/// hits its safety ceiling.
pub fn occurrences_for(
    event: &Event,
    query: &OccurrencesQuery,
    options: ExpandOptions,
) -> ProtocolResult<OccurrencesResponse> {
    let occurrences = expand_window(event, query.window(), options)?;
    tracing::debug!(
        from = %query.from(),
        to = %query.to(),
        recurring = event.is_recurring(),
        count = occurrences.len(),
        "occurrences computed"
    );
    Ok(OccurrencesResponse::new(occurrences))
}

/// Handles a full occurrences request from raw inputs.
///
/// Returns the HTTP status and JSON body to answer with, either the
/// occurrences response or an [`ErrorBody`].
pub fn respond(
    event_json: &str,
    from: &str,
    to: &str,
    range: &AllowedRange,
    options: ExpandOptions,
) -> (u16, String) {
    let result = EventPayload::from_json(event_json)
        .and_then(|payload| payload.into_event(range))
        .and_then(|event| {
            let query = OccurrencesQuery::parse(from, to, range)?;
            occurrences_for(&event, &query, options)
        })
        .and_then(|response| serde_json::to_string(&response).map_err(ProtocolError::from));

    match result {
        Ok(body) => (200, body),
        Err(err) => {
            tracing::warn!(error = %err, "occurrences request rejected");
            (err.status(), error_json(&err))
        }
    }
}

fn error_json(err: &ProtocolError) -> String {
    let body = ErrorBody::from(err);
    serde_json::to_string(&body).unwrap_or_else(|_| {
        r#"{"error":"InternalServerError","message":"failed to encode error"}"#.to_string()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ErrorCode;
    use calrecur_core::RecurrenceRule;
    use chrono::{DateTime, TimeZone, Utc};

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, s).unwrap()
    }

    const DAILY_EVENT: &str = r#"{
        "startAt": "2026-01-01T10:00:00Z",
        "endAt": "2026-01-01T11:00:00Z",
        "recurrence": { "freq": "DAILY", "interval": 1, "byWeekday": [], "byMonthday": [] }
    }"#;

    #[test]
    fn occurrences_for_window() {
        let event = Event::new(utc(2026, 1, 1, 10, 0, 0), utc(2026, 1, 1, 11, 0, 0))
            .with_recurrence(RecurrenceRule::daily());
        let query = OccurrencesQuery::new(
            utc(2026, 1, 1, 0, 0, 0),
            utc(2026, 1, 3, 23, 59, 59),
            &AllowedRange::default(),
        )
        .unwrap();
        let response = occurrences_for(&event, &query, ExpandOptions::default()).unwrap();
        assert_eq!(response.len(), 3);
    }

    #[test]
    fn respond_ok() {
        let (status, body) = respond(
            DAILY_EVENT,
            "2026-01-01T00:00:00Z",
            "2026-01-03T23:59:59Z",
            &AllowedRange::default(),
            ExpandOptions::default(),
        );
        assert_eq!(status, 200);
        assert_eq!(
            body,
            r#"{"occurrences":["2026-01-01T10:00:00Z","2026-01-02T10:00:00Z","2026-01-03T10:00:00Z"]}"#
        );
    }

    #[test]
    fn respond_validation_error() {
        let (status, body) = respond(
            DAILY_EVENT,
            "1999-01-01T00:00:00Z",
            "2026-01-03T23:59:59Z",
            &AllowedRange::default(),
            ExpandOptions::default(),
        );
        assert_eq!(status, 400);
        let body: ErrorBody = serde_json::from_str(&body).unwrap();
        assert_eq!(body.error, ErrorCode::ValidationError);
        assert!(body.message.starts_with("from must be between"));
    }

    #[test]
    fn respond_overflow() {
        let (status, body) = respond(
            DAILY_EVENT,
            "2026-01-01T00:00:00Z",
            "2026-12-31T00:00:00Z",
            &AllowedRange::default(),
            ExpandOptions::default().with_max_occurrences(30),
        );
        assert_eq!(status, 422);
        let body: ErrorBody = serde_json::from_str(&body).unwrap();
        assert_eq!(body.error, ErrorCode::RecurrenceOverflow);
    }
}
