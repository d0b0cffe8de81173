use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Controls the granularity of the timeline axis and of date snapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimelineScale {
    Days,
    Weeks,
    Months,
}

impl TimelineScale {
    pub const ALL: [TimelineScale; 3] = [Self::Days, Self::Weeks, Self::Months];

    pub fn label(self) -> &'static str {
        match self {
            Self::Days => "Days",
            Self::Weeks => "Weeks",
            Self::Months => "Months",
        }
    }
}

impl Default for TimelineScale {
    fn default() -> Self {
        Self::Weeks
    }
}

/// The visible date range of the timeline axis. `end` is always after `start`
/// when produced by [`timeline_window`](crate::scheduler::range::timeline_window).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimelineWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl TimelineWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Length of the window in days; zero or negative for degenerate windows.
    pub fn span_days(&self) -> i64 {
        (self.end - self.start).num_days()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

/// A parsed, inclusive start/due pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateSpan {
    pub start: NaiveDate,
    pub due: NaiveDate,
}

impl DateSpan {
    pub fn duration_days(&self) -> i64 {
        (self.due - self.start).num_days()
    }
}
