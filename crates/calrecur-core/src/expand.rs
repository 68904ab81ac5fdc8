//! Occurrence expansion for recurring events.
//!
//! [`expand`] turns an [`Event`] and an inclusive query window into the
//! ordered list of occurrence start instants inside that window.
//!
//! The series is walked period by period from the anchor (the event's own
//! start). A period is a day, a Monday-started week, a calendar month or a
//! calendar year depending on the rule's frequency; every `interval`-th
//! period is visited. Inside a visited period each day that passes the day
//! filter becomes a candidate at the anchor's time of day.
//!
//! The day filter comes from `byWeekday` / `byMonthday` when either is set.
//! Otherwise it is derived from the anchor: weekly rules keep the anchor's
//! weekday, monthly rules its day of month, yearly rules its month and day.

use std::collections::BTreeSet;

use chrono::{DateTime, Datelike, Days, Months, NaiveDate, NaiveTime, Utc};

use crate::error::{RecurrenceError, RecurrenceResult};
use crate::event::Event;
use crate::rule::{Frequency, RecurrenceRule, weekday_ordinal};
use crate::time::QueryWindow;

/// Default ceiling on instants generated by a single expansion.
pub const DEFAULT_MAX_OCCURRENCES: usize = 10_000;

/// Tuning knobs for an expansion call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpandOptions {
    /// Maximum instants generated from the anchor onwards, including those
    /// that fall before the window. Visited periods are held to the same
    /// limit.
    pub max_occurrences: usize,
}

impl Default for ExpandOptions {
    fn default() -> Self {
        Self {
            max_occurrences: DEFAULT_MAX_OCCURRENCES,
        }
    }
}

impl ExpandOptions {
    /// Sets the safety ceiling.
    #[must_use]
    pub fn with_max_occurrences(mut self, max_occurrences: usize) -> Self {
        self.max_occurrences = max_occurrences;
        self
    }
}

/// Expands `event` over the inclusive window `[from, to]`.
///
/// # Errors
///
/// Returns [`RecurrenceError::InvalidWindow`] if `from > to`,
/// [`RecurrenceError::InvalidRule`] if the rule fails validation and
/// [`RecurrenceError::RecurrenceOverflow`] if more than
/// [`DEFAULT_MAX_OCCURRENCES`] instants would be generated or periods
/// visited before the series ends.
pub fn expand(
    event: &Event,
    from: DateTime<Utc>,
    to: DateTime<Utc>,
) -> RecurrenceResult<Vec<DateTime<Utc>>> {
    expand_with(event, from, to, ExpandOptions::default())
}

/// Like [`expand`], with an explicit safety ceiling.
pub fn expand_with(
    event: &Event,
    from: DateTime<Utc>,
    to: DateTime<Utc>,
    options: ExpandOptions,
) -> RecurrenceResult<Vec<DateTime<Utc>>> {
    let window = QueryWindow::new(from, to)?;
    expand_window(event, &window, options)
}

/// Expands `event` over an already validated window.
pub fn expand_window(
    event: &Event,
    window: &QueryWindow,
    options: ExpandOptions,
) -> RecurrenceResult<Vec<DateTime<Utc>>> {
    let Some(rule) = event.recurrence.as_ref() else {
        return Ok(if window.contains(event.start_at) {
            vec![event.start_at]
        } else {
            Vec::new()
        });
    };

    rule.validate(event.start_at)?;

    let bound = window.upper_bound(rule.until);
    if bound < event.start_at {
        return Ok(Vec::new());
    }

    let series = Series::new(rule, event.start_at)?;
    let count_cap = rule.count.map(|c| usize::try_from(c).unwrap_or(usize::MAX));

    let mut occurrences = Vec::new();
    let mut generated = 0usize;
    let mut visited = 0usize;
    let mut index = 0u64;

    'periods: while let Some((start, end)) = series.period(index) {
        if series.at(start) > bound || count_cap.is_some_and(|cap| generated >= cap) {
            break;
        }
        // Empty periods count toward the ceiling too.
        if visited >= options.max_occurrences {
            return Err(RecurrenceError::RecurrenceOverflow {
                limit: options.max_occurrences,
            });
        }
        visited += 1;
        tracing::trace!(period = index, start = %start, "visiting period");

        for date in start.iter_days().take_while(|d| *d < end) {
            if !series.filter.matches(date) {
                continue;
            }
            let instant = series.at(date);
            if instant < series.anchor {
                continue;
            }
            if instant > bound {
                break 'periods;
            }
            if count_cap.is_some_and(|cap| generated >= cap) {
                break 'periods;
            }
            if generated >= options.max_occurrences {
                return Err(RecurrenceError::RecurrenceOverflow {
                    limit: options.max_occurrences,
                });
            }
            generated += 1;
            if instant >= window.from {
                occurrences.push(instant);
            }
        }

        index += 1;
    }

    tracing::debug!(
        freq = %rule.freq,
        interval = rule.interval,
        bound = %bound,
        visited,
        generated,
        returned = occurrences.len(),
        "expanded recurrence"
    );

    Ok(occurrences)
}

/// Which calendar days of a period qualify.
#[derive(Debug, Default)]
struct DayFilter {
    weekdays: Option<BTreeSet<u8>>,
    monthdays: Option<BTreeSet<u32>>,
    month: Option<u32>,
}

impl DayFilter {
    fn for_rule(rule: &RecurrenceRule, anchor: NaiveDate) -> Self {
        if rule.has_constraints() {
            return Self {
                weekdays: rule
                    .by_weekday
                    .as_ref()
                    .map(|days| days.iter().copied().collect()),
                monthdays: rule
                    .by_monthday
                    .as_ref()
                    .map(|days| days.iter().copied().map(u32::from).collect()),
                month: None,
            };
        }

        match rule.freq {
            Frequency::Daily => Self::default(),
            Frequency::Weekly => Self {
                weekdays: Some(BTreeSet::from([weekday_ordinal(anchor.weekday())])),
                ..Self::default()
            },
            Frequency::Monthly => Self {
                monthdays: Some(BTreeSet::from([anchor.day()])),
                ..Self::default()
            },
            Frequency::Yearly => Self {
                monthdays: Some(BTreeSet::from([anchor.day()])),
                month: Some(anchor.month()),
                ..Self::default()
            },
        }
    }

    fn matches(&self, date: NaiveDate) -> bool {
        self.weekdays
            .as_ref()
            .is_none_or(|set| set.contains(&weekday_ordinal(date.weekday())))
            && self
                .monthdays
                .as_ref()
                .is_none_or(|set| set.contains(&date.day()))
            && self.month.is_none_or(|month| month == date.month())
    }
}

/// The walk state shared by every period of one expansion.
struct Series {
    freq: Frequency,
    interval: u32,
    anchor: DateTime<Utc>,
    time: NaiveTime,
    /// First day of the period containing the anchor.
    origin: NaiveDate,
    filter: DayFilter,
}

impl Series {
    fn new(rule: &RecurrenceRule, anchor: DateTime<Utc>) -> RecurrenceResult<Self> {
        let date = anchor.date_naive();
        let origin = match rule.freq {
            Frequency::Daily => Some(date),
            Frequency::Weekly => {
                date.checked_sub_days(Days::new(u64::from(date.weekday().num_days_from_monday())))
            }
            Frequency::Monthly => date.with_day(1),
            Frequency::Yearly => NaiveDate::from_ymd_opt(date.year(), 1, 1),
        }
        .ok_or_else(|| {
            RecurrenceError::invalid_rule("event start is outside the supported calendar")
        })?;

        Ok(Self {
            freq: rule.freq,
            interval: rule.interval,
            anchor,
            time: anchor.time(),
            origin,
            filter: DayFilter::for_rule(rule, date),
        })
    }

    /// Returns the `[start, end)` dates of the `index`-th visited period, or
    /// `None` once the calendar runs out.
    fn period(&self, index: u64) -> Option<(NaiveDate, NaiveDate)> {
        let steps = index.checked_mul(u64::from(self.interval))?;
        match self.freq {
            Frequency::Daily => {
                let start = self.origin.checked_add_days(Days::new(steps))?;
                Some((start, start.succ_opt()?))
            }
            Frequency::Weekly => {
                let start = self.origin.checked_add_days(Days::new(steps.checked_mul(7)?))?;
                Some((start, start.checked_add_days(Days::new(7))?))
            }
            Frequency::Monthly => {
                let months = u32::try_from(steps).ok()?;
                let start = self.origin.checked_add_months(Months::new(months))?;
                Some((start, start.checked_add_months(Months::new(1))?))
            }
            Frequency::Yearly => {
                let months = u32::try_from(steps.checked_mul(12)?).ok()?;
                let start = self.origin.checked_add_months(Months::new(months))?;
                Some((start, start.checked_add_months(Months::new(12))?))
            }
        }
    }

    fn at(&self, date: NaiveDate) -> DateTime<Utc> {
        date.and_time(self.time).and_utc()
    }
}
