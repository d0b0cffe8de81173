use egui::{RichText, Ui};
use kaizen_timeline::ActionItem;

use crate::ui::theme;

/// Actions the detail panel can request.
pub enum ItemPanelAction {
    None,
    Close,
}

/// Read-only details for the item the user clicked on the timeline.
pub fn show_item_panel(item: &ActionItem, ui: &mut Ui) -> ItemPanelAction {
    let mut action = ItemPanelAction::None;

    ui.add_space(2.0);
    ui.horizontal(|ui| {
        ui.label(
            RichText::new("Action")
                .strong()
                .size(15.0)
                .color(theme::TEXT_PRIMARY),
        );
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let close = ui.add(
                egui::Button::new(RichText::new("✕").size(10.0).color(theme::TEXT_DIM))
                    .frame(false),
            );
            if close.on_hover_text("Close").clicked() {
                action = ItemPanelAction::Close;
            }
        });
    });
    ui.add_space(4.0);
    ui.separator();
    ui.add_space(4.0);

    egui::Grid::new("item_details_grid")
        .num_columns(2)
        .spacing([12.0, 6.0])
        .show(ui, |ui| {
            let row = |ui: &mut Ui, label: &str, value: &str| {
                ui.label(RichText::new(label).color(theme::TEXT_SECONDARY));
                ui.label(RichText::new(value).color(theme::TEXT_PRIMARY));
                ui.end_row();
            };
            row(ui, "Title", &item.title);
            row(ui, "Type", &item.kind);
            row(ui, "Status", &item.status);
            row(ui, "Owners", &item.assignee_list());
            row(ui, "Start", item.start_date.as_deref().unwrap_or("—"));
            row(ui, "Due", item.due_date.as_deref().unwrap_or("—"));
        });

    if let Some(span) = item.span() {
        ui.add_space(6.0);
        ui.label(
            RichText::new(format!("{} days", span.duration_days()))
                .size(11.0)
                .color(theme::TEXT_DIM),
        );
    } else {
        ui.add_space(6.0);
        ui.label(
            RichText::new("Not on the timeline: dates missing or invalid")
                .size(11.0)
                .color(theme::TEXT_ERROR),
        );
    }

    action
}
