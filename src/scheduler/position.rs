//! Conversion between calendar dates and horizontal position.
//!
//! Positions are percentages of the window (0–100) so the same geometry can be
//! laid out at any pixel width. Pixel deltas from the pointer come back in as
//! whole-day offsets.

use chrono::{Duration, NaiveDate};

use crate::model::{DateSpan, TimelineWindow};

/// Smallest width a bar is drawn with, in percent, so zero-length items stay clickable.
pub const MIN_BAR_WIDTH_PCT: f64 = 0.5;

/// Horizontal placement of a bar, in percent of the timeline width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarGeometry {
    pub left: f64,
    pub width: f64,
}

impl BarGeometry {
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    /// Scale to pixels for a timeline drawn `pixel_width` wide.
    pub fn to_pixels(&self, pixel_width: f32) -> (f32, f32) {
        let scale = pixel_width as f64 / 100.0;
        ((self.left * scale) as f32, (self.width * scale) as f32)
    }
}

/// Position of `date` within `window` as a percentage, clamped to `0..=100`.
///
/// A window with no duration maps everything to 0.
pub fn to_position(date: NaiveDate, window: &TimelineWindow) -> f64 {
    let span = window.span_days();
    if span <= 0 {
        return 0.0;
    }
    let offset = (date - window.start).num_days() as f64;
    (offset * 100.0 / span as f64).clamp(0.0, 100.0)
}

/// Geometry of a bar from `span.start` to `span.due`.
///
/// The width never drops below `min_width` percent and the bar never extends
/// past the right edge. A degenerate window yields a full-width bar.
pub fn bar_geometry(span: &DateSpan, window: &TimelineWindow, min_width: f64) -> BarGeometry {
    if window.span_days() <= 0 {
        return BarGeometry {
            left: 0.0,
            width: 100.0,
        };
    }
    let min_width = min_width.clamp(0.0, 100.0);
    let mut left = to_position(span.start, window);
    let right = to_position(span.due, window);
    let width = (right - left).max(min_width);
    if left + width > 100.0 {
        left = 100.0 - width;
    }
    BarGeometry { left, width }
}

/// Convert a pointer displacement into a calendar offset, rounded to whole days.
///
/// `time = pixel_delta / pixel_width * (window.end - window.start)`. Zero pixel
/// width or a degenerate window gives no movement.
pub fn to_delta(pixel_delta: f32, pixel_width: f32, window: &TimelineWindow) -> Duration {
    let span = window.span_days();
    if span <= 0 || !pixel_width.is_finite() || pixel_width <= 0.0 || !pixel_delta.is_finite() {
        return Duration::zero();
    }
    let days = pixel_delta as f64 / pixel_width as f64 * span as f64;
    Duration::days(days.round() as i64)
}
