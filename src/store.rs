//! The boundary between the scheduler and whatever owns the action records.
//!
//! The scheduler never owns item data. It reads the current list, proposes
//! partial updates, and relies on the store to validate and keep them.

use crate::error::StoreResult;
use crate::model::ActionItem;

/// A partial update to an [`ActionItem`]. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemUpdate {
    pub start_date: Option<String>,
    pub due_date: Option<String>,
    pub title: Option<String>,
    pub status: Option<String>,
}

impl ItemUpdate {
    /// An update touching only the two schedule dates.
    pub fn dates(start_date: impl Into<String>, due_date: impl Into<String>) -> Self {
        Self {
            start_date: Some(start_date.into()),
            due_date: Some(due_date.into()),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.start_date.is_none()
            && self.due_date.is_none()
            && self.title.is_none()
            && self.status.is_none()
    }
}

/// Owner of the canonical action records.
///
/// Used both for the optimistic writes issued while a bar is being dragged and
/// for the compensating write issued when a change is reverted.
pub trait ActionStore {
    /// Snapshot of every item, including ones without valid dates.
    fn list_items(&self) -> Vec<ActionItem>;

    /// Apply a partial update to the item with the given id.
    fn update_item(&mut self, id: &str, update: ItemUpdate) -> StoreResult<()>;
}
