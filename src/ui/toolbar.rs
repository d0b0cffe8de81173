use egui::{menu, RichText, Ui};
use kaizen_timeline::TimelineScale;

use crate::app::KaizenApp;

/// Render the top toolbar / menu bar.
pub fn show_toolbar(app: &mut KaizenApp, ui: &mut Ui) {
    let busy = app.is_busy();
    menu::bar(ui, |ui| {
        ui.menu_button(RichText::new("  File  "), |ui| {
            ui.add_enabled_ui(!busy, |ui| {
                if ui.button("  New Plan").clicked() {
                    app.new_plan();
                    ui.close_menu();
                }
                if ui.button("  Open...").clicked() {
                    app.open_plan();
                    ui.close_menu();
                }
                ui.separator();
                if ui.button("  Save          Ctrl+S").clicked() {
                    app.save_plan();
                    ui.close_menu();
                }
                if ui.button("  Save As...").clicked() {
                    app.save_plan_as();
                    ui.close_menu();
                }
            });
        });

        ui.menu_button(RichText::new("  View  "), |ui| {
            ui.label(RichText::new("Timeline Scale").small().weak());
            for scale in TimelineScale::ALL {
                if ui.radio(app.scale == scale, scale.label()).clicked() {
                    app.set_scale(scale);
                    ui.close_menu();
                }
            }
        });

        ui.menu_button(RichText::new("  Help  "), |ui| {
            if ui.button("About").clicked() {
                app.show_about = true;
                ui.close_menu();
            }
        });

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let modified = if app.file_path.is_some() { "" } else { " (unsaved)" };
            ui.label(
                RichText::new(format!("{}{}", app.plan.name, modified))
                    .size(11.0)
                    .weak(),
            );
        });
    });
}
