use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::item::{parse_date, ActionItem};
use crate::error::{StoreError, StoreResult};
use crate::store::{ActionStore, ItemUpdate};

/// A corrective-action plan: the list of actions and some metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionPlan {
    pub name: String,
    pub items: Vec<ActionItem>,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}

impl Default for ActionPlan {
    fn default() -> Self {
        Self {
            name: "Untitled Plan".to_string(),
            items: Vec::new(),
            created: Utc::now(),
            modified: Utc::now(),
        }
    }
}

impl ActionPlan {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Touch the modified timestamp.
    pub fn touch(&mut self) {
        self.modified = Utc::now();
    }

    pub fn item(&self, id: &str) -> Option<&ActionItem> {
        self.items.iter().find(|i| i.id == id)
    }

    /// Number of items that have a usable date span.
    pub fn scheduled_count(&self) -> usize {
        self.items.iter().filter(|i| i.is_schedulable()).count()
    }
}

impl ActionStore for ActionPlan {
    fn list_items(&self) -> Vec<ActionItem> {
        self.items.clone()
    }

    fn update_item(&mut self, id: &str, update: ItemUpdate) -> StoreResult<()> {
        let item = self
            .items
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or_else(|| StoreError::NotFound {
                item_id: id.to_string(),
            })?;

        if update.is_empty() {
            debug!("No updates specified for item: {}", id);
            return Ok(());
        }

        let start = update.start_date.as_ref().or(item.start_date.as_ref());
        let due = update.due_date.as_ref().or(item.due_date.as_ref());
        if let Some(value) = &update.start_date {
            parse_date(value).ok_or_else(|| StoreError::InvalidDate {
                field: "start_date",
                value: value.clone(),
            })?;
        }
        if let Some(value) = &update.due_date {
            parse_date(value).ok_or_else(|| StoreError::InvalidDate {
                field: "due_date",
                value: value.clone(),
            })?;
        }
        if let (Some(start), Some(due)) = (start, due) {
            if let (Some(s), Some(d)) = (parse_date(start), parse_date(due)) {
                if d < s {
                    return Err(StoreError::InvalidRange {
                        start_date: start.clone(),
                        due_date: due.clone(),
                    });
                }
            }
        }

        debug!("Updating item: {}", id);
        if let Some(value) = update.start_date {
            item.start_date = Some(value);
        }
        if let Some(value) = update.due_date {
            item.due_date = Some(value);
        }
        if let Some(value) = update.title {
            item.title = value;
        }
        if let Some(value) = update.status {
            item.status = value;
        }
        self.touch();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn plan_with_item() -> (ActionPlan, String) {
        let mut plan = ActionPlan::new("Line 3 stoppages");
        let item = ActionItem::new(
            "Standard work update",
            NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 4, 5).unwrap(),
        );
        let id = item.id.clone();
        plan.items.push(item);
        (plan, id)
    }

    #[test]
    fn test_update_dates() {
        let (mut plan, id) = plan_with_item();
        plan.update_item(&id, ItemUpdate::dates("2024-04-08", "2024-04-12"))
            .unwrap();
        let item = plan.item(&id).unwrap();
        assert_eq!(item.start_date.as_deref(), Some("2024-04-08"));
        assert_eq!(item.due_date.as_deref(), Some("2024-04-12"));
    }

    #[test]
    fn test_update_unknown_item() {
        let (mut plan, _) = plan_with_item();
        let err = plan
            .update_item("missing", ItemUpdate::dates("2024-04-08", "2024-04-12"))
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[test]
    fn test_update_rejects_inverted_range() {
        let (mut plan, id) = plan_with_item();
        let err = plan
            .update_item(
                &id,
                ItemUpdate {
                    due_date: Some("2024-03-01".to_string()),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert!(matches!(err, StoreError::InvalidRange { .. }));
        assert_eq!(plan.item(&id).unwrap().due_date.as_deref(), Some("2024-04-05"));
    }

    #[test]
    fn test_update_rejects_bad_date() {
        let (mut plan, id) = plan_with_item();
        let err = plan
            .update_item(&id, ItemUpdate::dates("2024/04/08", "2024-04-12"))
            .unwrap_err();
        assert!(matches!(
            err,
            StoreError::InvalidDate {
                field: "start_date",
                ..
            }
        ));
    }

    #[test]
    fn test_update_display_fields() {
        let (mut plan, id) = plan_with_item();
        plan.update_item(
            &id,
            ItemUpdate {
                status: Some("done".to_string()),
                ..Default::default()
            },
        )
        .unwrap();
        let item = plan.item(&id).unwrap();
        assert_eq!(item.status, "done");
        assert_eq!(item.start_date.as_deref(), Some("2024-04-01"));
    }

    #[test]
    fn test_scheduled_count_skips_undated_items() {
        let (mut plan, _) = plan_with_item();
        plan.items.push(ActionItem::unscheduled("Lessons learned sheet"));
        assert_eq!(plan.items.len(), 2);
        assert_eq!(plan.scheduled_count(), 1);
    }
}
