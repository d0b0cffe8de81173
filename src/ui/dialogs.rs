use egui::{Color32, Context, RichText, Window};
use kaizen_timeline::scheduler::Decision;

use crate::app::KaizenApp;
use crate::ui::theme;

/// Render the keep/revert dialog for the pending drag change, if any.
pub fn show_confirm_change_dialog(app: &mut KaizenApp, ctx: &Context) {
    let Some(change) = app.confirmation.pending().cloned() else {
        return;
    };
    let last_error = app.confirmation.last_error().map(str::to_string);
    let mut decision = None;

    Window::new(RichText::new("Confirm new dates").strong().size(14.0))
        .resizable(false)
        .collapsible(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .fixed_size([360.0, 0.0])
        .show(ctx, |ui| {
            ui.add_space(4.0);
            ui.label(RichText::new(&change.title).strong().color(theme::TEXT_PRIMARY));
            ui.add_space(4.0);
            ui.label(RichText::new(change.describe()).color(theme::TEXT_SECONDARY));

            if let Some(err) = &last_error {
                ui.add_space(6.0);
                ui.label(RichText::new(format!("Save error: {err}")).color(theme::TEXT_ERROR));
            }

            ui.add_space(6.0);
            ui.separator();
            ui.add_space(4.0);

            ui.horizontal(|ui| {
                let keep_btn = egui::Button::new(RichText::new("Keep").color(Color32::WHITE))
                    .fill(theme::ACCENT)
                    .rounding(egui::Rounding::same(4.0));
                if ui.add_sized([80.0, 28.0], keep_btn).clicked() {
                    decision = Some(Decision::Accept);
                }
                let revert_label = if last_error.is_some() {
                    "Retry revert"
                } else {
                    "Revert"
                };
                if ui
                    .add_sized([100.0, 28.0], egui::Button::new(revert_label))
                    .clicked()
                {
                    decision = Some(Decision::Revert);
                }
            });
            ui.add_space(2.0);
        });

    // Escape reverts, matching a cancelled drag
    if decision.is_none() && ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        decision = Some(Decision::Revert);
    }

    if let Some(decision) = decision {
        app.resolve_change(decision);
    }
}

/// Render the "About" dialog.
pub fn show_about_dialog(app: &mut KaizenApp, ctx: &Context) {
    let mut should_close = false;
    Window::new("About")
        .resizable(false)
        .collapsible(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .fixed_size([300.0, 180.0])
        .show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(12.0);
                ui.heading(RichText::new("Kaizen Timeline").strong());
                ui.add_space(2.0);
                ui.label(
                    RichText::new(format!("Version {}", env!("CARGO_PKG_VERSION")))
                        .color(theme::TEXT_SECONDARY),
                );
                ui.add_space(10.0);
                ui.label("Drag bars to move, drag the right edge to resize.");
                ui.label("Every change asks to be kept or reverted.");
                ui.add_space(14.0);
                if ui.add_sized([100.0, 28.0], egui::Button::new("Close")).clicked() {
                    should_close = true;
                }
            });
        });
    if should_close || ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        app.show_about = false;
    }
}
