use chrono::Duration;
use std::path::PathBuf;
use tracing::warn;

use kaizen_timeline::config::Settings;
use kaizen_timeline::io;
use kaizen_timeline::scheduler::{ChangeConfirmation, Decision, DragController, DragOutcome};
use kaizen_timeline::{ActionItem, ActionPlan, TimelineScale};

use crate::ui;

/// Main application state.
pub struct KaizenApp {
    pub plan: ActionPlan,
    pub file_path: Option<PathBuf>,
    pub scale: TimelineScale,

    pub settings: Settings,
    settings_path: PathBuf,

    // Scheduler state
    pub drag: DragController,
    pub confirmation: ChangeConfirmation,
    pub activated_item: Option<String>,

    // Dialog state
    pub show_about: bool,

    // Status message
    pub status_message: String,
}

impl KaizenApp {
    pub fn new() -> Self {
        Self::with_settings_path(Settings::default_path())
    }

    fn with_settings_path(settings_path: PathBuf) -> Self {
        let settings = Settings::load(&settings_path);

        let mut file_path = None;
        let mut status_message = "Ready".to_string();
        let plan = match settings.last_plan.as_deref() {
            Some(path) => match io::load_plan(path) {
                Ok(plan) => {
                    file_path = Some(path.to_path_buf());
                    status_message = format!("Opened '{}'", plan.name);
                    plan
                }
                Err(e) => {
                    warn!("Could not reopen last plan: {}", e);
                    status_message = format!("Could not reopen last plan: {}", e);
                    Self::sample_plan()
                }
            },
            None => Self::sample_plan(),
        };

        Self {
            plan,
            file_path,
            scale: settings.scale,
            settings,
            settings_path,
            drag: DragController::new(),
            confirmation: ChangeConfirmation::new(),
            activated_item: None,
            show_about: false,
            status_message,
        }
    }

    /// A small corrective-action plan for first launch.
    fn sample_plan() -> ActionPlan {
        let today = chrono::Local::now().date_naive();
        let mut plan = ActionPlan::new("Line 3 micro-stoppages");

        let mut containment = ActionItem::new(
            "Containment: 100% inspection",
            today - Duration::days(10),
            today - Duration::days(3),
        );
        containment.status = "done".to_string();
        containment.kind = "containment".to_string();
        containment.assignees = vec!["Quality".to_string()];

        let mut why = ActionItem::new(
            "5-Why on sensor faults",
            today - Duration::days(4),
            today + Duration::days(3),
        );
        why.status = "in_progress".to_string();
        why.kind = "root-cause".to_string();
        why.assignees = vec!["Maintenance".to_string(), "Shift lead".to_string()];

        let mut poka_yoke = ActionItem::new(
            "Poka-yoke on fixture",
            today + Duration::days(4),
            today + Duration::days(18),
        );
        poka_yoke.assignees = vec!["Tooling".to_string()];

        let mut standard = ActionItem::new(
            "Update standard work",
            today + Duration::days(14),
            today + Duration::days(21),
        );
        standard.kind = "standardize".to_string();

        let mut verify = ActionItem::new(
            "Verify effectiveness",
            today + Duration::days(21),
            today + Duration::days(51),
        );
        verify.kind = "check".to_string();

        let lessons = ActionItem::unscheduled("Lessons learned sheet");

        plan.items = vec![containment, why, poka_yoke, standard, verify, lessons];
        plan
    }

    /// A drag is in progress or awaiting confirmation.
    pub fn is_busy(&self) -> bool {
        self.drag.is_dragging() || self.confirmation.is_pending()
    }

    // --- File operations ---

    pub fn new_plan(&mut self) {
        self.plan = ActionPlan::default();
        self.file_path = None;
        self.activated_item = None;
        self.status_message = "New plan created".to_string();
    }

    pub fn open_plan(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Kaizen Plan", &["kaizen.json", "json"])
            .pick_file()
        {
            match io::load_plan(&path) {
                Ok(plan) => {
                    self.plan = plan;
                    self.activated_item = None;
                    self.remember_plan(path.clone());
                    self.file_path = Some(path);
                    self.status_message = "Plan loaded".to_string();
                }
                Err(e) => {
                    self.status_message = format!("Error loading: {}", e);
                }
            }
        }
    }

    pub fn save_plan(&mut self) {
        if self.refuse_while_busy() {
            return;
        }
        if let Some(path) = self.file_path.clone() {
            self.plan.touch();
            match io::save_plan(&self.plan, &path) {
                Ok(()) => self.status_message = "Plan saved".to_string(),
                Err(e) => self.status_message = format!("Error saving: {}", e),
            }
        } else {
            self.save_plan_as();
        }
    }

    pub fn save_plan_as(&mut self) {
        if self.refuse_while_busy() {
            return;
        }
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Kaizen Plan", &["kaizen.json", "json"])
            .set_file_name(format!("{}.kaizen.json", self.plan.name))
            .save_file()
        {
            self.plan.touch();
            match io::save_plan(&self.plan, &path) {
                Ok(()) => {
                    self.remember_plan(path.clone());
                    self.file_path = Some(path);
                    self.status_message = "Plan saved".to_string();
                }
                Err(e) => self.status_message = format!("Error saving: {}", e),
            }
        }
    }

    /// Unconfirmed drag dates must not reach disk.
    fn refuse_while_busy(&mut self) -> bool {
        if self.is_busy() {
            self.status_message = "Keep or revert the pending change before saving".to_string();
        }
        self.is_busy()
    }

    // --- Settings ---

    pub fn set_scale(&mut self, scale: TimelineScale) {
        if self.drag.is_dragging() {
            return;
        }
        self.scale = scale;
        self.settings.scale = scale;
        self.persist_settings();
    }

    fn remember_plan(&mut self, path: PathBuf) {
        self.settings.last_plan = Some(path);
        self.persist_settings();
    }

    fn persist_settings(&mut self) {
        if let Err(e) = self.settings.save(&self.settings_path) {
            warn!("{}", e);
            self.status_message = format!("Settings not saved: {}", e);
        }
    }

    // --- Scheduler ---

    /// Apply the user's keep/revert choice to the pending change.
    pub fn resolve_change(&mut self, decision: Decision) {
        match self.confirmation.resolve(decision, &mut self.plan) {
            Ok(Some(change)) => {
                self.status_message = match decision {
                    Decision::Accept => format!("Rescheduled '{}'", change.title),
                    Decision::Revert => format!("Restored dates of '{}'", change.title),
                };
            }
            Ok(None) => {}
            Err(e) => {
                self.status_message = format!("Save error: {}", e);
            }
        }
    }

    fn handle_drag_outcome(&mut self, outcome: DragOutcome) {
        match outcome {
            DragOutcome::Changed(change) => {
                self.status_message = format!("'{}': keep or revert?", change.title);
                self.confirmation.propose(change);
            }
            DragOutcome::Click(id) => self.activate_item(id),
            DragOutcome::Unchanged | DragOutcome::Idle => {}
        }
    }

    fn activate_item(&mut self, id: String) {
        if let Some(item) = self.plan.item(&id) {
            self.status_message = format!("Selected '{}'", item.title);
            self.activated_item = Some(id);
        }
    }
}

impl eframe::App for KaizenApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ui::theme::apply_theme(ctx);

        let should_save = ctx.input(|i| i.modifiers.ctrl && i.key_pressed(egui::Key::S));
        if should_save && !self.is_busy() {
            self.save_plan();
        }

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui::toolbar::show_toolbar(self, ui);
        });

        egui::TopBottomPanel::bottom("status_bar")
            .exact_height(24.0)
            .frame(
                egui::Frame::default()
                    .fill(ui::theme::BG_HEADER)
                    .inner_margin(egui::Margin::symmetric(10.0, 0.0)),
            )
            .show(ctx, |ui| {
                ui.horizontal_centered(|ui| {
                    ui.label(
                        egui::RichText::new(&self.status_message)
                            .size(11.5)
                            .color(ui::theme::TEXT_SECONDARY),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let unscheduled = self.plan.items.len() - self.plan.scheduled_count();
                        ui.label(
                            egui::RichText::new(format!(
                                "Scale: {} · Scheduled: {} · Unscheduled: {}",
                                self.scale.label(),
                                self.plan.scheduled_count(),
                                unscheduled
                            ))
                            .size(10.5)
                            .color(ui::theme::TEXT_DIM),
                        );
                    });
                });
            });

        let mut close_panel = false;
        if let Some(item) = self
            .activated_item
            .as_deref()
            .and_then(|id| self.plan.item(id))
        {
            egui::SidePanel::right("item_panel")
                .default_width(280.0)
                .resizable(true)
                .frame(
                    egui::Frame::default()
                        .fill(ui::theme::BG_PANEL)
                        .inner_margin(egui::Margin::same(10.0))
                        .stroke(egui::Stroke::new(1.0, ui::theme::BORDER_SUBTLE)),
                )
                .show(ctx, |ui| {
                    if let ui::item_panel::ItemPanelAction::Close =
                        ui::item_panel::show_item_panel(item, ui)
                    {
                        close_panel = true;
                    }
                });
        }
        if close_panel {
            self.activated_item = None;
        }

        let interactive = !self.confirmation.is_pending();
        let chart_frame = egui::Frame::default()
            .fill(ui::theme::BG_CANVAS)
            .inner_margin(egui::Margin::ZERO);
        let interaction = egui::CentralPanel::default()
            .frame(chart_frame)
            .show(ctx, |ui| {
                ui::timeline_chart::show_timeline_chart(
                    &mut self.plan,
                    &mut self.drag,
                    self.scale,
                    &self.settings,
                    interactive,
                    ui,
                )
            })
            .inner;

        if let Some(err) = interaction.error {
            self.status_message = format!("Save error: {}", err);
        } else if interaction.changed {
            if let Some(session) = self.drag.session() {
                let (start, end) = session.current();
                self.status_message = format!("Moving '{}' ({} → {})", session.title, start, end);
            }
        }
        if let Some(outcome) = interaction.outcome {
            self.handle_drag_outcome(outcome);
        }
        if let Some(id) = interaction.activated {
            self.activate_item(id);
        }

        if self.confirmation.is_pending() {
            ui::dialogs::show_confirm_change_dialog(self, ctx);
        }
        if self.show_about {
            ui::dialogs::show_about_dialog(self, ctx);
        }
    }
}
