//! Core types: events, recurrence rules, query windows, occurrence expansion

pub mod error;
pub mod event;
pub mod expand;
pub mod rule;
pub mod time;
pub mod tracing;

pub use error::{RecurrenceError, RecurrenceResult};
pub use event::Event;
pub use expand::{DEFAULT_MAX_OCCURRENCES, ExpandOptions, expand, expand_window, expand_with};
pub use rule::{Frequency, RecurrenceRule, weekday_ordinal};
pub use time::QueryWindow;
pub use tracing::{TracingConfig, TracingError, TracingOutputFormat, init_tracing};
