//! Scale-aware date snapping and the per-scale minimum duration.

use chrono::{Datelike, Duration, NaiveDate};

use crate::model::TimelineScale;

/// Round `date` back to the nearest grid boundary for `scale`.
///
/// Days are already day-granular. Weeks snap to the Monday of the ISO week,
/// months to the 1st.
pub fn snap(date: NaiveDate, scale: TimelineScale) -> NaiveDate {
    match scale {
        TimelineScale::Days => date,
        TimelineScale::Weeks => {
            let weekday = date.weekday().num_days_from_monday();
            date - Duration::days(weekday as i64)
        }
        TimelineScale::Months => {
            NaiveDate::from_ymd_opt(date.year(), date.month(), 1).unwrap_or(date)
        }
    }
}

/// Shortest span an item may be given by a resize at this scale.
pub fn minimum_duration(scale: TimelineScale) -> Duration {
    match scale {
        TimelineScale::Days => Duration::days(1),
        TimelineScale::Weeks => Duration::days(7),
        TimelineScale::Months => Duration::days(30),
    }
}

/// Push `end` out to `start + minimum_duration(scale)` if it falls short.
pub fn enforce_minimum(start: NaiveDate, end: NaiveDate, scale: TimelineScale) -> NaiveDate {
    end.max(start + minimum_duration(scale))
}
