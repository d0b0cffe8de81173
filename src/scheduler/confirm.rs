//! Keep-or-revert decision after a drag has changed an item's dates.
//!
//! By the time a change reaches this module the new dates are already in the
//! store. Accepting leaves them there; reverting writes the exact pre-drag
//! strings back.

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use crate::error::{SchedulerError, SchedulerResult};
use crate::model::item::format_date;
use crate::store::{ActionStore, ItemUpdate};

/// A drag result waiting for the user's decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingChange {
    pub item_id: String,
    pub title: String,
    /// Stored values at drag start, restored verbatim on revert.
    pub original_start: String,
    pub original_due: String,
    pub new_start: NaiveDate,
    pub new_due: NaiveDate,
}

impl PendingChange {
    /// Human-readable "old → new" summary for the dialog.
    pub fn describe(&self) -> String {
        format!(
            "{} → {}  becomes  {} → {}",
            self.original_start,
            self.original_due,
            format_date(self.new_start),
            format_date(self.new_due)
        )
    }
}

/// What the user chose.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Accept,
    Revert,
}

/// Holds at most one unresolved change.
#[derive(Debug, Default)]
pub struct ChangeConfirmation {
    pending: Option<PendingChange>,
    last_error: Option<String>,
}

impl ChangeConfirmation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> Option<&PendingChange> {
        self.pending.as_ref()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Message from the last failed revert, if the change is still unresolved.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Queue a change for decision. A change that was never resolved is
    /// replaced, which keeps its new dates.
    pub fn propose(&mut self, change: PendingChange) {
        if let Some(previous) = self.pending.take() {
            warn!(
                "Replacing unresolved change on {}; its new dates are kept",
                previous.item_id
            );
        }
        debug!("Awaiting decision on {}: {}", change.item_id, change.describe());
        self.last_error = None;
        self.pending = Some(change);
    }

    /// Keep the optimistic dates. Nothing is written.
    pub fn accept(&mut self) -> Option<PendingChange> {
        let change = self.pending.take()?;
        info!("Kept new dates for {}", change.item_id);
        self.last_error = None;
        Some(change)
    }

    /// Restore the pre-drag dates.
    ///
    /// On failure the change stays pending so the user can retry, and the
    /// error is both recorded and returned.
    pub fn revert<S: ActionStore + ?Sized>(
        &mut self,
        store: &mut S,
    ) -> SchedulerResult<Option<PendingChange>> {
        let Some(change) = self.pending.as_ref() else {
            return Ok(None);
        };

        let update = ItemUpdate::dates(change.original_start.clone(), change.original_due.clone());
        match store.update_item(&change.item_id, update) {
            Ok(()) => {
                info!(
                    "Reverted {} to {} .. {}",
                    change.item_id, change.original_start, change.original_due
                );
                self.last_error = None;
                Ok(self.pending.take())
            }
            Err(source) => {
                warn!("Revert of {} failed: {}", change.item_id, source);
                let err = SchedulerError::RevertFailed {
                    item_id: change.item_id.clone(),
                    source,
                };
                self.last_error = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Apply `decision` to the pending change.
    pub fn resolve<S: ActionStore + ?Sized>(
        &mut self,
        decision: Decision,
        store: &mut S,
    ) -> SchedulerResult<Option<PendingChange>> {
        match decision {
            Decision::Accept => Ok(self.accept()),
            Decision::Revert => self.revert(store),
        }
    }
}
