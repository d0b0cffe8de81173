pub mod item;
pub mod plan;
pub mod timeline;

pub use item::ActionItem;
pub use plan::ActionPlan;
pub use timeline::{DateSpan, TimelineScale, TimelineWindow};
