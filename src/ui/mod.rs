pub mod dialogs;
pub mod item_panel;
pub mod theme;
pub mod timeline_chart;
pub mod toolbar;
