//! Drag gesture state machine for timeline bars.
//!
//! The controller is independent of any rendering layer: pointer events are its
//! only inputs and [`ActionStore::update_item`] calls its only outputs. Each
//! move recomputes the new dates from the values captured at pointer-down, so
//! skipped or coalesced move events cannot accumulate drift.

use chrono::NaiveDate;
use tracing::{debug, trace, warn};

use super::confirm::PendingChange;
use super::position::to_delta;
use super::snap::{enforce_minimum, snap};
use crate::error::SchedulerResult;
use crate::model::item::format_date;
use crate::model::{ActionItem, TimelineScale, TimelineWindow};
use crate::store::{ActionStore, ItemUpdate};

/// Pointer travel, in pixels, below which a press and release counts as a click.
pub const CLICK_TOLERANCE_PX: f32 = 3.0;

/// Which part of the bar was grabbed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragMode {
    /// The bar body: both dates shift together.
    Move,
    /// The trailing handle: only the due date changes.
    ResizeEnd,
}

/// Everything captured when a gesture begins, plus the latest applied dates.
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    pub item_id: String,
    pub title: String,
    pub mode: DragMode,
    pub scale: TimelineScale,
    pub pointer_origin_x: f32,
    pub original_start: NaiveDate,
    pub original_end: NaiveDate,
    /// The stored strings at pointer-down, written back verbatim on revert.
    pub original_start_raw: String,
    pub original_end_raw: String,
    current_start: NaiveDate,
    current_end: NaiveDate,
    moved: bool,
}

impl DragSession {
    /// Dates most recently written to the store (the originals until the first move).
    pub fn current(&self) -> (NaiveDate, NaiveDate) {
        (self.current_start, self.current_end)
    }

    /// Whether the pointer ever left the click tolerance.
    pub fn has_moved(&self) -> bool {
        self.moved
    }

    /// Dates the gesture resolves to for a pointer displacement of `pixel_delta`.
    pub fn project(
        &self,
        pixel_delta: f32,
        pixel_width: f32,
        window: &TimelineWindow,
    ) -> (NaiveDate, NaiveDate) {
        let delta = to_delta(pixel_delta, pixel_width, window);
        match self.mode {
            DragMode::Move => {
                // Snap the start once and shift both ends by the same amount
                let duration = self.original_end - self.original_start;
                let start = snap(self.original_start + delta, self.scale);
                (start, start + duration)
            }
            DragMode::ResizeEnd => {
                let start = self.original_start;
                let end = snap(self.original_end + delta, self.scale);
                (start, enforce_minimum(start, end, self.scale))
            }
        }
    }
}

/// Controller state: either nothing is happening or exactly one bar is held.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(DragSession),
}

/// What a released gesture amounted to.
#[derive(Debug, Clone, PartialEq)]
pub enum DragOutcome {
    /// Release without an active session.
    Idle,
    /// Press and release without real movement; the item should be opened.
    Click(String),
    /// The bar came back to where it started.
    Unchanged,
    /// The item now carries new dates that still need the user's decision.
    Changed(PendingChange),
}

/// Drives one drag gesture at a time.
#[derive(Debug, Default)]
pub struct DragController {
    state: DragState,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn session(&self) -> Option<&DragSession> {
        match &self.state {
            DragState::Dragging(session) => Some(session),
            DragState::Idle => None,
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging(_))
    }

    /// Whether `item_id` is the item being dragged right now.
    pub fn is_dragging_item(&self, item_id: &str) -> bool {
        self.session().is_some_and(|s| s.item_id == item_id)
    }

    /// Begin a gesture on `item`.
    ///
    /// Returns `false` without changing state if a gesture is already active or
    /// the item has no usable dates.
    pub fn pointer_down(
        &mut self,
        item: &ActionItem,
        mode: DragMode,
        pointer_x: f32,
        scale: TimelineScale,
    ) -> bool {
        if let DragState::Dragging(active) = &self.state {
            warn!(
                "Ignoring pointer-down on '{}' while '{}' is being dragged",
                item.id, active.item_id
            );
            return false;
        }
        let Some(span) = item.span() else {
            debug!("Item {} has no usable dates, not draggable", item.id);
            return false;
        };
        // span() succeeded, so both raw strings are present
        let (Some(start_raw), Some(end_raw)) = (&item.start_date, &item.due_date) else {
            return false;
        };

        debug!("Drag started on {} ({:?}, {:?})", item.id, mode, scale);
        self.state = DragState::Dragging(DragSession {
            item_id: item.id.clone(),
            title: item.title.clone(),
            mode,
            scale,
            pointer_origin_x: pointer_x,
            original_start: span.start,
            original_end: span.due,
            original_start_raw: start_raw.clone(),
            original_end_raw: end_raw.clone(),
            current_start: span.start,
            current_end: span.due,
            moved: false,
        });
        true
    }

    /// Track the pointer and optimistically write the resulting dates.
    ///
    /// Returns the dates now on the item, or `None` when idle. Identical
    /// consecutive results are not written again.
    pub fn pointer_move<S: ActionStore + ?Sized>(
        &mut self,
        pointer_x: f32,
        pixel_width: f32,
        window: &TimelineWindow,
        store: &mut S,
    ) -> SchedulerResult<Option<(NaiveDate, NaiveDate)>> {
        let DragState::Dragging(session) = &mut self.state else {
            return Ok(None);
        };

        let pixel_delta = pointer_x - session.pointer_origin_x;
        if pixel_delta.abs() > CLICK_TOLERANCE_PX {
            session.moved = true;
        }

        let (start, end) = session.project(pixel_delta, pixel_width, window);
        if (start, end) == session.current() {
            trace!("Drag on {} unchanged at dx={}", session.item_id, pixel_delta);
            return Ok(Some((start, end)));
        }

        trace!(
            "Drag on {} -> {} .. {} (dx={})",
            session.item_id,
            start,
            end,
            pixel_delta
        );
        store.update_item(
            &session.item_id,
            ItemUpdate::dates(format_date(start), format_date(end)),
        )?;
        session.current_start = start;
        session.current_end = end;
        Ok(Some((start, end)))
    }

    /// Finish the gesture. The session is discarded whatever the outcome.
    pub fn pointer_up(&mut self) -> DragOutcome {
        let DragState::Dragging(session) = std::mem::take(&mut self.state) else {
            return DragOutcome::Idle;
        };

        let (new_start, new_end) = session.current();
        if !session.moved && (new_start, new_end) == (session.original_start, session.original_end)
        {
            debug!("Item {} clicked", session.item_id);
            return DragOutcome::Click(session.item_id);
        }
        if (new_start, new_end) == (session.original_start, session.original_end) {
            debug!("Drag on {} resolved to no change", session.item_id);
            return DragOutcome::Unchanged;
        }

        debug!(
            "Drag on {} finished: {} .. {} -> {} .. {}",
            session.item_id, session.original_start, session.original_end, new_start, new_end
        );
        DragOutcome::Changed(PendingChange {
            item_id: session.item_id,
            title: session.title,
            original_start: session.original_start_raw,
            original_due: session.original_end_raw,
            new_start,
            new_due: new_end,
        })
    }

    /// Drop the active session without touching the store.
    pub fn cancel(&mut self) -> Option<DragSession> {
        match std::mem::take(&mut self.state) {
            DragState::Dragging(session) => {
                debug!("Drag on {} cancelled", session.item_id);
                Some(session)
            }
            DragState::Idle => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ActionPlan;
    use crate::scheduler::snap::minimum_duration;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// 70-day window so 800px wide means ~11.4px per day.
    fn window() -> TimelineWindow {
        TimelineWindow::new(date(2023, 12, 26), date(2024, 3, 5))
    }

    fn plan_with(start: NaiveDate, due: NaiveDate) -> (ActionPlan, ActionItem) {
        let mut plan = ActionPlan::new("Drag tests");
        let item = ActionItem::new("Poka-yoke on fixture", start, due);
        plan.items.push(item.clone());
        (plan, item)
    }

    fn stored_dates(plan: &ActionPlan, id: &str) -> (String, String) {
        let item = plan.item(id).unwrap();
        (
            item.start_date.clone().unwrap(),
            item.due_date.clone().unwrap(),
        )
    }

    #[test]
    fn test_week_move_snaps_to_following_monday() {
        let d = date(2024, 1, 2);
        let (mut plan, item) = plan_with(d, d);
        let mut ctl = DragController::new();
        assert_eq!(window().span_days(), 70);

        assert!(ctl.pointer_down(&item, DragMode::Move, 100.0, TimelineScale::Weeks));
        let applied = ctl
            .pointer_move(180.0, 800.0, &window(), &mut plan)
            .unwrap();
        assert_eq!(applied, Some((date(2024, 1, 8), date(2024, 1, 8))));
        assert_eq!(
            stored_dates(&plan, &item.id),
            ("2024-01-08".to_string(), "2024-01-08".to_string())
        );
    }

    #[test]
    fn test_move_preserves_duration_at_day_scale() {
        let (mut plan, item) = plan_with(date(2024, 1, 10), date(2024, 1, 20));
        let mut ctl = DragController::new();
        ctl.pointer_down(&item, DragMode::Move, 0.0, TimelineScale::Days);

        for x in [-300.0, -57.0, 12.0, 91.5, 400.0] {
            let (start, end) = ctl
                .pointer_move(x, 800.0, &window(), &mut plan)
                .unwrap()
                .unwrap();
            assert_eq!((end - start).num_days(), 10, "dx={x}");
            assert_eq!(start - date(2024, 1, 10), end - date(2024, 1, 20));
        }
    }

    #[test]
    fn test_week_move_shifts_both_ends_by_same_snapped_delta() {
        let (mut plan, item) = plan_with(date(2024, 1, 3), date(2024, 1, 8));
        let mut ctl = DragController::new();
        ctl.pointer_down(&item, DragMode::Move, 0.0, TimelineScale::Weeks);

        // +7 days lands on Wednesday 2024-01-10, snaps to Monday 2024-01-08
        let (start, end) = ctl
            .pointer_move(80.0, 800.0, &window(), &mut plan)
            .unwrap()
            .unwrap();
        assert_eq!(start, date(2024, 1, 8));
        assert_eq!(end, date(2024, 1, 13));
        assert_eq!(start - date(2024, 1, 3), end - date(2024, 1, 8));
    }

    #[test]
    fn test_month_move_keeps_short_item_length() {
        let (mut plan, item) = plan_with(date(2024, 1, 15), date(2024, 1, 20));
        let mut ctl = DragController::new();
        ctl.pointer_down(&item, DragMode::Move, 0.0, TimelineScale::Months);

        // +20 days lands on 2024-02-04, snaps to 2024-02-01
        let px = 20.0 / 70.0 * 800.0;
        let (start, end) = ctl
            .pointer_move(px, 800.0, &window(), &mut plan)
            .unwrap()
            .unwrap();
        assert_eq!(start, date(2024, 2, 1));
        assert_eq!((end - start).num_days(), 5);
        assert_eq!(
            stored_dates(&plan, &item.id),
            ("2024-02-01".to_string(), "2024-02-06".to_string())
        );
    }

    #[test]
    fn test_move_preserves_duration_at_every_scale() {
        for scale in TimelineScale::ALL {
            let (mut plan, item) = plan_with(date(2024, 1, 10), date(2024, 1, 23));
            let mut ctl = DragController::new();
            ctl.pointer_down(&item, DragMode::Move, 0.0, scale);

            for x in [-300.0, -57.0, 12.0, 91.5, 400.0] {
                let (start, end) = ctl
                    .pointer_move(x, 800.0, &window(), &mut plan)
                    .unwrap()
                    .unwrap();
                assert_eq!((end - start).num_days(), 13, "{scale:?} dx={x}");
                assert_eq!(start, snap(start, scale), "{scale:?} dx={x}");
            }
        }
    }

    #[test]
    fn test_inverted_item_cannot_be_dragged() {
        let item = ActionItem::new("Audit", date(2024, 2, 10), date(2024, 2, 1));
        let mut ctl = DragController::new();
        assert!(!ctl.pointer_down(&item, DragMode::ResizeEnd, 0.0, TimelineScale::Days));
        assert_eq!(ctl.state(), &DragState::Idle);
    }

    #[test]
    fn test_moves_recompute_from_origin_without_drift() {
        let (mut plan, item) = plan_with(date(2024, 1, 10), date(2024, 1, 12));
        let mut ctl = DragController::new();
        ctl.pointer_down(&item, DragMode::Move, 0.0, TimelineScale::Days);

        // Many tiny steps, each under half a day
        let mut x = 0.0;
        for _ in 0..40 {
            x += 5.0;
            ctl.pointer_move(x, 800.0, &window(), &mut plan).unwrap();
        }
        let (start, _) = ctl.session().unwrap().current();
        // 200px on 800px over 70 days = 17.5 days, rounds to 18
        assert_eq!(start, date(2024, 1, 28));

        // Jumping straight back lands exactly on the original
        ctl.pointer_move(0.0, 800.0, &window(), &mut plan).unwrap();
        assert_eq!(
            stored_dates(&plan, &item.id),
            ("2024-01-10".to_string(), "2024-01-12".to_string())
        );
    }

    #[test]
    fn test_resize_clamps_to_minimum_duration() {
        for scale in TimelineScale::ALL {
            let start = date(2024, 2, 1);
            let (mut plan, item) = plan_with(start, date(2024, 3, 4));
            let mut ctl = DragController::new();
            ctl.pointer_down(&item, DragMode::ResizeEnd, 500.0, scale);

            let (new_start, new_end) = ctl
                .pointer_move(0.0, 800.0, &window(), &mut plan)
                .unwrap()
                .unwrap();
            assert_eq!(new_start, start, "{scale:?}");
            assert_eq!(new_end, start + minimum_duration(scale), "{scale:?}");
        }
    }

    #[test]
    fn test_resize_never_violates_floor() {
        let start = date(2024, 1, 3);
        let (mut plan, item) = plan_with(start, date(2024, 1, 25));
        let mut ctl = DragController::new();
        ctl.pointer_down(&item, DragMode::ResizeEnd, 400.0, TimelineScale::Weeks);

        let mut x = 400.0;
        while x >= 0.0 {
            let (s, e) = ctl
                .pointer_move(x, 800.0, &window(), &mut plan)
                .unwrap()
                .unwrap();
            assert_eq!(s, start);
            assert!(e - s >= minimum_duration(TimelineScale::Weeks), "x={x}");
            x -= 7.0;
        }
    }

    #[test]
    fn test_resize_end_snaps_due_date() {
        let (mut plan, item) = plan_with(date(2024, 1, 2), date(2024, 1, 10));
        let mut ctl = DragController::new();
        ctl.pointer_down(&item, DragMode::ResizeEnd, 0.0, TimelineScale::Months);

        // +40 days lands on 2024-02-19, snaps back to 2024-02-01
        let px = 40.0 / 70.0 * 800.0;
        let applied = ctl.pointer_move(px, 800.0, &window(), &mut plan).unwrap();
        assert_eq!(applied, Some((date(2024, 1, 2), date(2024, 2, 1))));
    }

    #[test]
    fn test_second_pointer_down_is_ignored() {
        let (mut plan, first) = plan_with(date(2024, 1, 10), date(2024, 1, 12));
        let second = ActionItem::new("Other", date(2024, 2, 1), date(2024, 2, 3));
        plan.items.push(second.clone());

        let mut ctl = DragController::new();
        assert!(ctl.pointer_down(&first, DragMode::Move, 0.0, TimelineScale::Days));
        assert!(!ctl.pointer_down(&second, DragMode::ResizeEnd, 50.0, TimelineScale::Days));
        assert!(ctl.is_dragging_item(&first.id));
        assert!(!ctl.is_dragging_item(&second.id));
    }

    #[test]
    fn test_undated_item_cannot_be_dragged() {
        let item = ActionItem::unscheduled("Lessons learned");
        let mut ctl = DragController::new();
        assert!(!ctl.pointer_down(&item, DragMode::Move, 0.0, TimelineScale::Days));
        assert_eq!(ctl.state(), &DragState::Idle);
    }

    #[test]
    fn test_release_without_motion_is_a_click() {
        let (mut plan, item) = plan_with(date(2024, 1, 10), date(2024, 1, 12));
        let mut ctl = DragController::new();
        ctl.pointer_down(&item, DragMode::Move, 200.0, TimelineScale::Days);
        ctl.pointer_move(201.0, 800.0, &window(), &mut plan).unwrap();
        assert_eq!(ctl.pointer_up(), DragOutcome::Click(item.id.clone()));
        assert!(!ctl.is_dragging());
    }

    #[test]
    fn test_release_back_at_origin_is_unchanged() {
        let (mut plan, item) = plan_with(date(2024, 1, 10), date(2024, 1, 12));
        let mut ctl = DragController::new();
        ctl.pointer_down(&item, DragMode::Move, 200.0, TimelineScale::Days);
        ctl.pointer_move(300.0, 800.0, &window(), &mut plan).unwrap();
        ctl.pointer_move(200.0, 800.0, &window(), &mut plan).unwrap();
        assert_eq!(ctl.pointer_up(), DragOutcome::Unchanged);
    }

    #[test]
    fn test_snap_to_same_week_is_unchanged() {
        // Monday item, nudged two days right, snaps back to the same Monday
        let monday = date(2024, 1, 8);
        let (mut plan, item) = plan_with(monday, date(2024, 1, 15));
        let mut ctl = DragController::new();
        ctl.pointer_down(&item, DragMode::Move, 0.0, TimelineScale::Weeks);
        ctl.pointer_move(23.0, 800.0, &window(), &mut plan).unwrap();
        assert_eq!(ctl.pointer_up(), DragOutcome::Unchanged);
    }

    #[test]
    fn test_release_after_change_yields_pending_change() {
        let (mut plan, item) = plan_with(date(2024, 1, 10), date(2024, 1, 12));
        let mut ctl = DragController::new();
        ctl.pointer_down(&item, DragMode::Move, 0.0, TimelineScale::Days);
        ctl.pointer_move(80.0, 800.0, &window(), &mut plan).unwrap();

        match ctl.pointer_up() {
            DragOutcome::Changed(change) => {
                assert_eq!(change.item_id, item.id);
                assert_eq!(change.original_start, "2024-01-10");
                assert_eq!(change.original_due, "2024-01-12");
                assert_eq!(change.new_start, date(2024, 1, 17));
                assert_eq!(change.new_due, date(2024, 1, 19));
            }
            other => panic!("expected a change, got {other:?}"),
        }
        assert_eq!(ctl.pointer_up(), DragOutcome::Idle);
    }

    #[test]
    fn test_move_while_idle_does_nothing() {
        let (mut plan, item) = plan_with(date(2024, 1, 10), date(2024, 1, 12));
        let mut ctl = DragController::new();
        assert_eq!(ctl.pointer_move(80.0, 800.0, &window(), &mut plan).unwrap(), None);
        assert_eq!(
            stored_dates(&plan, &item.id),
            ("2024-01-10".to_string(), "2024-01-12".to_string())
        );
    }

    #[test]
    fn test_cancel_discards_session() {
        let (_plan, item) = plan_with(date(2024, 1, 10), date(2024, 1, 12));
        let mut ctl = DragController::new();
        ctl.pointer_down(&item, DragMode::Move, 0.0, TimelineScale::Days);
        let session = ctl.cancel().unwrap();
        assert_eq!(session.item_id, item.id);
        assert!(!ctl.is_dragging());
        assert!(ctl.cancel().is_none());
    }
}
