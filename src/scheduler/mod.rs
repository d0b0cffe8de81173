//! The timeline scheduler: window derivation, axis grid, coordinate mapping,
//! snapping, drag handling, and change confirmation.

pub mod confirm;
pub mod drag;
pub mod grid;
pub mod position;
pub mod range;
pub mod snap;

pub use confirm::{ChangeConfirmation, Decision, PendingChange};
pub use drag::{DragController, DragMode, DragOutcome, DragSession, DragState};
pub use grid::{ColumnWidths, GridColumn, ScaleGrid};
pub use position::{bar_geometry, to_delta, to_position, BarGeometry, MIN_BAR_WIDTH_PCT};
pub use range::{timeline_window, timeline_window_today};
pub use snap::{minimum_duration, snap};
