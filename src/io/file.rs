use std::path::Path;

use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::model::ActionPlan;

/// Save a plan to a JSON file.
pub fn save_plan(plan: &ActionPlan, path: &Path) -> StoreResult<()> {
    let json = serde_json::to_string_pretty(plan)?;
    std::fs::write(path, json).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("Saved plan '{}' to {}", plan.name, path.display());
    Ok(())
}

/// Load a plan from a JSON file.
pub fn load_plan(path: &Path) -> StoreResult<ActionPlan> {
    let json = std::fs::read_to_string(path).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let plan: ActionPlan = serde_json::from_str(&json)?;
    debug!(
        "Loaded plan '{}' ({} items) from {}",
        plan.name,
        plan.items.len(),
        path.display()
    );
    Ok(plan)
}
