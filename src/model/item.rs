use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::timeline::DateSpan;

/// Wire format for calendar dates on action items.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a `YYYY-MM-DD` string, ignoring surrounding whitespace.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT).ok()
}

/// Format a date the way items store it.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// A single corrective action on a Kaizen plan.
///
/// Dates are kept as the strings the plan was authored with so that a revert
/// can restore them exactly. Everything except the dates is display-only for
/// the scheduler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionItem {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub assignees: Vec<String>,
    /// Free-form category (e.g. "containment", "corrective", "standardize").
    #[serde(rename = "type", default)]
    pub kind: String,
}

impl ActionItem {
    /// Create a new open action with the given dates.
    pub fn new(title: impl Into<String>, start: NaiveDate, due: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            start_date: Some(format_date(start)),
            due_date: Some(format_date(due)),
            status: "open".to_string(),
            assignees: Vec::new(),
            kind: "corrective".to_string(),
        }
    }

    /// Create an action that has not been scheduled yet.
    pub fn unscheduled(title: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            start_date: None,
            due_date: None,
            status: "open".to_string(),
            assignees: Vec::new(),
            kind: "corrective".to_string(),
        }
    }

    /// The parsed date span, or `None` if either date is missing or unparsable,
    /// or the due date falls before the start.
    pub fn span(&self) -> Option<DateSpan> {
        let start = parse_date(self.start_date.as_deref()?)?;
        let due = parse_date(self.due_date.as_deref()?)?;
        (due >= start).then_some(DateSpan { start, due })
    }

    /// Whether the item takes part in range calculation, rendering, and dragging.
    pub fn is_schedulable(&self) -> bool {
        self.span().is_some()
    }

    pub fn assignee_list(&self) -> String {
        if self.assignees.is_empty() {
            "Unassigned".to_string()
        } else {
            self.assignees.join(", ")
        }
    }
}
