use egui::{Color32, FontId, Rounding, Stroke, Visuals};

// Light "visual management board" palette.

pub const BG_CANVAS: Color32 = Color32::from_rgb(246, 247, 249);
pub const BG_PANEL: Color32 = Color32::from_rgb(236, 239, 243);
pub const BG_HEADER: Color32 = Color32::from_rgb(222, 227, 234);

pub const BORDER_SUBTLE: Color32 = Color32::from_rgb(200, 206, 215);
pub const BORDER_ACCENT: Color32 = Color32::from_rgb(23, 92, 170);

pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(28, 33, 41);
pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(84, 92, 107);
pub const TEXT_DIM: Color32 = Color32::from_rgb(132, 139, 152);
pub const TEXT_ON_BAR: Color32 = Color32::WHITE;
pub const TEXT_ERROR: Color32 = Color32::from_rgb(196, 40, 40);

pub const ACCENT: Color32 = Color32::from_rgb(35, 110, 196);
pub const TODAY_LINE: Color32 = Color32::from_rgb(214, 58, 58);
pub const GRID_LINE: Color32 = Color32::from_rgb(214, 219, 227);
pub const HANDLE_COLOR: Color32 = Color32::from_rgb(250, 250, 252);

pub const ROW_HEIGHT: f32 = 28.0;
pub const ROW_GAP: f32 = 3.0;
pub const HEADER_HEIGHT: f32 = 40.0;
pub const HANDLE_WIDTH: f32 = 8.0;
pub const BAR_ROUNDING: f32 = 4.0;
pub const BAR_INSET: f32 = 3.0;

pub fn font_header() -> FontId {
    FontId::proportional(11.5)
}

pub fn font_bar() -> FontId {
    FontId::proportional(11.0)
}

pub fn font_small() -> FontId {
    FontId::proportional(9.5)
}

/// Bar color for an action's status. Unknown statuses fall back to the accent.
pub fn status_color(status: &str) -> Color32 {
    match status.trim().to_lowercase().as_str() {
        "done" | "closed" | "complete" | "completed" => Color32::from_rgb(46, 139, 87),
        "in_progress" | "in progress" | "doing" | "started" => Color32::from_rgb(224, 130, 20),
        "blocked" | "late" | "overdue" => Color32::from_rgb(200, 52, 52),
        "cancelled" | "canceled" => Color32::from_rgb(150, 154, 164),
        _ => ACCENT,
    }
}

pub fn apply_theme(ctx: &egui::Context) {
    let mut visuals = Visuals::light();
    let radius = Rounding::same(3.0);

    visuals.override_text_color = Some(TEXT_PRIMARY);
    visuals.panel_fill = BG_PANEL;
    visuals.window_fill = BG_CANVAS;
    visuals.window_rounding = Rounding::same(6.0);
    visuals.window_stroke = Stroke::new(1.0, BORDER_SUBTLE);

    for widget in [
        &mut visuals.widgets.noninteractive,
        &mut visuals.widgets.inactive,
        &mut visuals.widgets.hovered,
        &mut visuals.widgets.active,
    ] {
        widget.rounding = radius;
    }
    visuals.widgets.noninteractive.bg_stroke = Stroke::new(1.0, BORDER_SUBTLE);
    visuals.widgets.hovered.bg_stroke = Stroke::new(1.0, ACCENT);
    visuals.widgets.active.bg_stroke = Stroke::new(1.5, BORDER_ACCENT);

    visuals.selection.bg_fill = ACCENT.linear_multiply(0.25);
    visuals.selection.stroke = Stroke::new(1.0, BORDER_ACCENT);

    ctx.set_visuals(visuals);
}
