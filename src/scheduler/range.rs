//! Derives the visible date window from the current item set.

use chrono::{Duration, NaiveDate};

use crate::model::{ActionItem, TimelineWindow};

/// Days shown before the earliest start.
pub const LEAD_PADDING_DAYS: i64 = 7;
/// Days shown after the latest due date.
pub const TRAIL_PADDING_DAYS: i64 = 14;
/// Window used when no item has usable dates, relative to today.
pub const EMPTY_WINDOW_BEFORE_DAYS: i64 = 30;
pub const EMPTY_WINDOW_AFTER_DAYS: i64 = 60;

/// Compute the timeline window for `items`.
///
/// Items with a missing or unparsable date, or a due date before the start,
/// are ignored. With nothing left the
/// window is `[today - 30, today + 60]`.
pub fn timeline_window(items: &[ActionItem], today: NaiveDate) -> TimelineWindow {
    let spans = items.iter().filter_map(ActionItem::span);

    let mut bounds: Option<(NaiveDate, NaiveDate)> = None;
    for span in spans {
        bounds = Some(match bounds {
            None => (span.start, span.due),
            Some((min, max)) => (min.min(span.start), max.max(span.due)),
        });
    }

    match bounds {
        Some((min, max)) => {
            let start = min - Duration::days(LEAD_PADDING_DAYS);
            let end = max + Duration::days(TRAIL_PADDING_DAYS);
            TimelineWindow::new(start, end)
        }
        None => TimelineWindow::new(
            today - Duration::days(EMPTY_WINDOW_BEFORE_DAYS),
            today + Duration::days(EMPTY_WINDOW_AFTER_DAYS),
        ),
    }
}

/// [`timeline_window`] relative to the local calendar date.
pub fn timeline_window_today(items: &[ActionItem]) -> TimelineWindow {
    timeline_window(items, chrono::Local::now().date_naive())
}
