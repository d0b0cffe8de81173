use chrono::NaiveDate;
use egui::{Color32, Pos2, Rect, Rounding, Sense, Stroke, Ui, Vec2};

use kaizen_timeline::config::Settings;
use kaizen_timeline::model::item::format_date;
use kaizen_timeline::model::{ActionItem, DateSpan, TimelineScale, TimelineWindow};
use kaizen_timeline::scheduler::{
    bar_geometry, timeline_window_today, to_position, DragController, DragMode, DragOutcome,
    ScaleGrid,
};
use kaizen_timeline::{ActionPlan, ActionStore, ItemUpdate};

use crate::ui::theme;

const ROW_HEIGHT: f32 = theme::ROW_HEIGHT;
const ROW_PADDING: f32 = theme::ROW_GAP;
const HEADER_HEIGHT: f32 = theme::HEADER_HEIGHT;
const HANDLE_WIDTH: f32 = theme::HANDLE_WIDTH;

/// What happened in the chart this frame.
#[derive(Debug, Default)]
pub struct ChartInteraction {
    /// A drag is live and the held item's dates track the pointer.
    pub changed: bool,
    /// A gesture was released this frame.
    pub outcome: Option<DragOutcome>,
    /// A bar was clicked without dragging.
    pub activated: Option<String>,
    /// A live write was rejected by the store.
    pub error: Option<String>,
}

/// Render the timeline (central panel) and feed pointer input to `drag`.
///
/// When `interactive` is false no new gesture can start; this keeps the chart
/// still while a change is waiting for confirmation.
pub fn show_timeline_chart(
    plan: &mut ActionPlan,
    drag: &mut DragController,
    scale: TimelineScale,
    settings: &Settings,
    interactive: bool,
    ui: &mut Ui,
) -> ChartInteraction {
    let mut interaction = ChartInteraction::default();

    let items = plan.list_items();
    let window = timeline_window_today(&items);
    let grid = ScaleGrid::build(&window, scale, &settings.column_widths);
    let rows: Vec<(ActionItem, DateSpan)> = items
        .into_iter()
        .filter_map(|item| item.span().map(|span| (item, span)))
        .collect();

    let available = ui.available_size();
    let chart_width = grid.total_width().max(available.x);
    let chart_height = HEADER_HEIGHT + (rows.len() as f32 * (ROW_HEIGHT + ROW_PADDING)) + 40.0;

    egui::ScrollArea::both()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            let (response, painter) = ui.allocate_painter(
                Vec2::new(chart_width, chart_height.max(available.y)),
                Sense::hover(),
            );
            let origin = response.rect.min;
            let full_height = response.rect.height();

            painter.rect_filled(response.rect, 0.0, theme::BG_CANVAS);

            for i in 0..rows.len() {
                let y = origin.y + HEADER_HEIGHT + i as f32 * (ROW_HEIGHT + ROW_PADDING);
                let row_bg = if i % 2 == 0 {
                    theme::BG_PANEL
                } else {
                    theme::BG_CANVAS
                };
                painter.rect_filled(
                    Rect::from_min_size(
                        Pos2::new(origin.x, y),
                        Vec2::new(chart_width, ROW_HEIGHT + ROW_PADDING),
                    ),
                    0.0,
                    row_bg,
                );
            }

            draw_scale_header(&painter, origin, &grid, chart_width, full_height);
            draw_today_line(&painter, origin, &window, chart_width, full_height);

            for (i, (item, span)) in rows.iter().enumerate() {
                let y =
                    origin.y + HEADER_HEIGHT + i as f32 * (ROW_HEIGHT + ROW_PADDING) + ROW_PADDING;
                let is_dragged = drag.is_dragging_item(&item.id);
                let bar_rect = draw_action_bar(
                    &painter,
                    origin,
                    &window,
                    chart_width,
                    settings.min_bar_width_pct,
                    item,
                    span,
                    y,
                    is_dragged,
                );

                let bar_response = ui.interact(
                    bar_rect,
                    ui.make_persistent_id(("action-bar", &item.id)),
                    Sense::click_and_drag(),
                );
                let handle_rect = Rect::from_min_max(
                    Pos2::new(bar_rect.right() - HANDLE_WIDTH * 0.5, bar_rect.top()),
                    Pos2::new(bar_rect.right() + HANDLE_WIDTH * 0.5, bar_rect.bottom()),
                );
                let handle_response = ui.interact(
                    handle_rect.expand(3.0),
                    ui.make_persistent_id(("action-resize-end", &item.id)),
                    Sense::drag(),
                );

                if bar_response.clicked() {
                    interaction.activated = Some(item.id.clone());
                }

                if interactive {
                    if handle_response.drag_started() {
                        let x = press_x(ui, &handle_response);
                        drag.pointer_down(item, DragMode::ResizeEnd, x, scale);
                    } else if bar_response.drag_started() {
                        let x = press_x(ui, &bar_response);
                        drag.pointer_down(item, DragMode::Move, x, scale);
                    }
                }

                let resizing = is_dragged && matches_mode(drag, DragMode::ResizeEnd);
                if handle_response.hovered() || resizing {
                    ui.ctx().set_cursor_icon(egui::CursorIcon::ResizeHorizontal);
                } else if is_dragged {
                    ui.ctx().set_cursor_icon(egui::CursorIcon::Grabbing);
                } else if bar_response.hovered() && interactive {
                    ui.ctx().set_cursor_icon(egui::CursorIcon::Grab);
                }

                if bar_response.hovered() || handle_response.hovered() || is_dragged {
                    draw_resize_handle(&painter, bar_rect);
                }

                if (bar_response.hovered() || handle_response.hovered()) && !drag.is_dragging() {
                    egui::show_tooltip_at_pointer(
                        ui.ctx(),
                        ui.layer_id(),
                        egui::Id::new(("action-tip", &item.id)),
                        |ui| {
                            ui.strong(&item.title);
                            ui.label(format!(
                                "{} → {}",
                                span.start.format("%d/%m/%Y"),
                                span.due.format("%d/%m/%Y"),
                            ));
                            ui.label(format!("Status: {}", item.status));
                            ui.label(format!("Owner: {}", item.assignee_list()));
                        },
                    );
                }
            }

            // Escape drops the gesture and puts the held item back
            if drag.is_dragging() && ui.input(|i| i.key_pressed(egui::Key::Escape)) {
                if let Some(session) = drag.cancel() {
                    let restore = ItemUpdate::dates(
                        session.original_start_raw.clone(),
                        session.original_end_raw.clone(),
                    );
                    if let Err(e) = plan.update_item(&session.item_id, restore) {
                        interaction.error = Some(e.to_string());
                    }
                }
            }

            if drag.is_dragging() {
                if let Some(pos) = ui.input(|i| i.pointer.latest_pos()) {
                    match drag.pointer_move(pos.x, chart_width, &window, plan) {
                        Ok(Some(_)) => interaction.changed = true,
                        Ok(None) => {}
                        Err(e) => interaction.error = Some(e.to_string()),
                    }
                }
                if ui.input(|i| i.pointer.primary_released()) {
                    interaction.outcome = Some(drag.pointer_up());
                }
            }

            if let Some(session) = drag.session() {
                let (start, end) = session.current();
                draw_drag_readout(&painter, origin, start, end);
            }
        });

    interaction
}

/// Pointer x where the press began, so the first move applies the full offset.
fn press_x(ui: &Ui, response: &egui::Response) -> f32 {
    ui.input(|i| i.pointer.press_origin())
        .or_else(|| response.interact_pointer_pos())
        .map(|p| p.x)
        .unwrap_or(0.0)
}

fn matches_mode(drag: &DragController, mode: DragMode) -> bool {
    drag.session().is_some_and(|s| s.mode == mode)
}

fn draw_scale_header(
    painter: &egui::Painter,
    origin: Pos2,
    grid: &ScaleGrid,
    width: f32,
    height: f32,
) {
    painter.rect_filled(
        Rect::from_min_size(origin, Vec2::new(width, HEADER_HEIGHT)),
        0.0,
        theme::BG_HEADER,
    );
    painter.line_segment(
        [
            Pos2::new(origin.x, origin.y + HEADER_HEIGHT),
            Pos2::new(origin.x + width, origin.y + HEADER_HEIGHT),
        ],
        Stroke::new(1.0, theme::BORDER_SUBTLE),
    );

    let mut x = origin.x;
    for column in &grid.columns {
        painter.line_segment(
            [Pos2::new(x, origin.y), Pos2::new(x, origin.y + height)],
            Stroke::new(0.5, theme::GRID_LINE),
        );
        painter.text(
            Pos2::new(x + 4.0, origin.y + HEADER_HEIGHT / 2.0),
            egui::Align2::LEFT_CENTER,
            &column.label,
            theme::font_header(),
            theme::TEXT_SECONDARY,
        );
        x += column.width;
    }
}

fn draw_today_line(
    painter: &egui::Painter,
    origin: Pos2,
    window: &TimelineWindow,
    width: f32,
    height: f32,
) {
    let today = chrono::Local::now().date_naive();
    if !window.contains(today) {
        return;
    }
    let x = origin.x + (to_position(today, window) as f32 / 100.0) * width;

    painter.line_segment(
        [
            Pos2::new(x, origin.y + HEADER_HEIGHT),
            Pos2::new(x, origin.y + height),
        ],
        Stroke::new(1.5, theme::TODAY_LINE),
    );

    let badge_w = 42.0;
    let badge_rect = Rect::from_min_size(
        Pos2::new(x - badge_w / 2.0, origin.y + HEADER_HEIGHT - 1.0),
        Vec2::new(badge_w, 14.0),
    );
    painter.rect_filled(badge_rect, Rounding::same(3.0), theme::TODAY_LINE);
    painter.text(
        badge_rect.center(),
        egui::Align2::CENTER_CENTER,
        "Today",
        theme::font_small(),
        Color32::WHITE,
    );
}

#[allow(clippy::too_many_arguments)]
fn draw_action_bar(
    painter: &egui::Painter,
    origin: Pos2,
    window: &TimelineWindow,
    chart_width: f32,
    min_width_pct: f64,
    item: &ActionItem,
    span: &DateSpan,
    y: f32,
    is_dragged: bool,
) -> Rect {
    let geometry = bar_geometry(span, window, min_width_pct);
    let (left, width) = geometry.to_pixels(chart_width);
    let inset = theme::BAR_INSET;

    let bar_rect = Rect::from_min_size(
        Pos2::new(origin.x + left, y + inset),
        Vec2::new(width, ROW_HEIGHT - inset * 2.0),
    );
    let rounding = Rounding::same(theme::BAR_ROUNDING);

    let shadow_rect = bar_rect.translate(Vec2::new(1.0, 2.0));
    painter.rect_filled(shadow_rect, rounding, Color32::from_black_alpha(35));
    painter.rect_filled(bar_rect, rounding, theme::status_color(&item.status));

    if is_dragged {
        painter.rect_stroke(
            bar_rect.expand(1.5),
            Rounding::same(theme::BAR_ROUNDING + 1.5),
            Stroke::new(2.0, theme::BORDER_ACCENT),
        );
    }

    if width > 30.0 {
        let galley =
            painter.layout_no_wrap(item.title.clone(), theme::font_bar(), theme::TEXT_ON_BAR);
        let clipped = painter.with_clip_rect(bar_rect);
        let text_y = y + inset + (bar_rect.height() - galley.size().y) / 2.0;
        clipped.galley(
            Pos2::new(bar_rect.left() + 6.0, text_y),
            galley,
            Color32::TRANSPARENT,
        );
    }

    bar_rect
}

fn draw_resize_handle(painter: &egui::Painter, bar_rect: Rect) {
    let handle_h = bar_rect.height() * 0.55;
    let handle_y = bar_rect.center().y - handle_h / 2.0;
    let rh = Rect::from_min_size(
        Pos2::new(bar_rect.right() - 2.5, handle_y),
        Vec2::new(4.0, handle_h),
    );
    painter.rect_filled(rh, Rounding::same(2.0), theme::HANDLE_COLOR);
}

/// Live date read-out in the header corner while a bar is held.
fn draw_drag_readout(painter: &egui::Painter, origin: Pos2, start: NaiveDate, end: NaiveDate) {
    let text = format!("{} → {}", format_date(start), format_date(end));
    let galley = painter.layout_no_wrap(text, theme::font_small(), theme::TEXT_ON_BAR);
    let badge_rect = Rect::from_min_size(
        Pos2::new(origin.x + 8.0, origin.y + 4.0),
        Vec2::new(galley.size().x + 16.0, 16.0),
    );
    painter.rect_filled(
        badge_rect,
        Rounding::same(8.0),
        Color32::from_rgba_premultiplied(20, 20, 28, 220),
    );
    painter.galley(
        Pos2::new(badge_rect.left() + 8.0, badge_rect.top() + 2.0),
        galley,
        Color32::TRANSPARENT,
    );
}
