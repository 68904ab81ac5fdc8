//! Request/response types for the occurrences endpoint.
//!
//! The wider application answers `GET /events/{id}/occurrences?from=..&to=..`
//! by loading the event, validating both bounds against the [`AllowedRange`]
//! and expanding the event with `calrecur-core`. This crate holds that
//! boundary: payload validation, the response and error bodies, and the
//! mapping from errors to HTTP statuses.
//!
//! # Example
//!
//! ```rust
//! use calrecur_core::ExpandOptions;
//! use calrecur_protocol::{respond, AllowedRange};
//!
//! let event = r#"{"startAt":"2026-01-01T10:00:00Z","endAt":"2026-01-01T11:00:00Z"}"#;
//! let (status, body) = respond(
//!     event,
//!     "2026-01-01T00:00:00Z",
//!     "2026-01-02T00:00:00Z",
//!     &AllowedRange::default(),
//!     ExpandOptions::default(),
//! );
//! assert_eq!(status, 200);
//! assert_eq!(body, r#"{"occurrences":["2026-01-01T10:00:00Z"]}"#);
//! ```

mod error;
mod range;
mod service;
mod types;

pub use error::{ProtocolError, ProtocolResult};
pub use range::{AllowedRange, DEFAULT_MAX_YEAR, DEFAULT_MIN_YEAR};
pub use service::{occurrences_for, respond};
pub use types::{
    ErrorBody, ErrorCode, EventPayload, OccurrencesQuery, OccurrencesResponse, RecurrencePayload,
    parse_timestamp,
};
