//! Interactive timeline scheduler for Kaizen corrective-action plans.
//!
//! The [`scheduler`] module holds the rendering-independent core. Item records
//! live behind the [`store::ActionStore`] trait; [`model::ActionPlan`] is the
//! in-memory implementation the desktop app persists with [`io::file`].

pub mod config;
pub mod error;
pub mod io;
pub mod model;
pub mod scheduler;
pub mod store;

pub use error::{ConfigError, SchedulerError, SchedulerResult, StoreError, StoreResult};
pub use model::{ActionItem, ActionPlan, TimelineScale, TimelineWindow};
pub use store::{ActionStore, ItemUpdate};
