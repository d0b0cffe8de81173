//! Time-axis columns for the active scale.

use chrono::{Datelike, Duration, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use super::snap::snap;
use crate::model::{TimelineScale, TimelineWindow};

/// Pixel width of one column for each scale. The grid is uniform: every month
/// column is as wide as every other, regardless of its day count.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnWidths {
    pub day: f32,
    pub week: f32,
    pub month: f32,
}

impl Default for ColumnWidths {
    fn default() -> Self {
        Self {
            day: 50.0,
            week: 80.0,
            month: 150.0,
        }
    }
}

impl ColumnWidths {
    pub fn for_scale(&self, scale: TimelineScale) -> f32 {
        match scale {
            TimelineScale::Days => self.day,
            TimelineScale::Weeks => self.week,
            TimelineScale::Months => self.month,
        }
    }
}

/// One tick column on the timeline header.
#[derive(Debug, Clone, PartialEq)]
pub struct GridColumn {
    /// First day covered by the column.
    pub date: NaiveDate,
    pub label: String,
    pub width: f32,
}

/// Ordered header columns covering a window at one scale.
#[derive(Debug, Clone)]
pub struct ScaleGrid {
    pub scale: TimelineScale,
    pub columns: Vec<GridColumn>,
}

impl ScaleGrid {
    pub fn build(window: &TimelineWindow, scale: TimelineScale, widths: &ColumnWidths) -> Self {
        let width = widths.for_scale(scale);
        let mut columns = Vec::new();
        let mut date = snap(window.start, scale);

        while date <= window.end {
            columns.push(GridColumn {
                date,
                label: column_label(date, scale),
                width,
            });
            date = match next_column(date, scale) {
                Some(next) => next,
                None => break,
            };
        }

        Self { scale, columns }
    }

    /// Sum of all column widths.
    pub fn total_width(&self) -> f32 {
        self.columns.iter().map(|c| c.width).sum()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

fn column_label(date: NaiveDate, scale: TimelineScale) -> String {
    match scale {
        TimelineScale::Days => date.format("%d/%m").to_string(),
        TimelineScale::Weeks => format!("S{}", date.iso_week().week()),
        TimelineScale::Months => date.format("%B %Y").to_string(),
    }
}

fn next_column(date: NaiveDate, scale: TimelineScale) -> Option<NaiveDate> {
    match scale {
        TimelineScale::Days => date.checked_add_signed(Duration::days(1)),
        TimelineScale::Weeks => date.checked_add_signed(Duration::days(7)),
        TimelineScale::Months => date.with_day(1)?.checked_add_months(Months::new(1)),
    }
}
