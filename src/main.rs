#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;
mod ui;

use tracing_subscriber::EnvFilter;

/// Initialize logging from `RUST_LOG`, e.g. `RUST_LOG=kaizen_timeline=trace`
/// to follow every drag update.
fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_level(true)
        .init();
}

fn main() -> eframe::Result<()> {
    init_logging();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 720.0])
            .with_min_inner_size([800.0, 400.0])
            .with_title("Kaizen Timeline"),
        ..Default::default()
    };

    eframe::run_native(
        "Kaizen Timeline",
        options,
        Box::new(|_cc| Ok(Box::new(app::KaizenApp::new()))),
    )
}
