//! Tracker actions triggered from the dashboard.

use crate::tracker::{GameResult, Gamemode, TrackerError, goal_input_default, parse_goal_input};

use super::super::{
    app::App,
    types::{InputMode, ToastKind},
};

/// Helper struct running tracker operations and turning their events into
/// toasts and log lines.
pub struct TrackerHandler<'a> {
    app: &'a mut App,
}

impl<'a> TrackerHandler<'a> {
    pub fn new(app: &'a mut App) -> Self {
        Self { app }
    }

    pub fn record(&mut self, result: GameResult) {
        let mode = self.app.mode();
        self.app.tracker.record_result(mode, result);
        self.flush_events();
    }

    pub fn undo(&mut self) {
        let mode = self.app.mode();
        if let Err(e) = self.app.tracker.undo_last(mode) {
            self.app.toast(e.to_string(), ToastKind::Error);
        }
        self.flush_events();
    }

    pub fn select(&mut self, mode: Gamemode) {
        self.app.tracker.select_gamemode(mode);
        self.flush_events();
    }

    pub fn cycle_mode(&mut self) {
        let next = self.app.mode().next();
        self.select(next);
    }

    /// Open the goal prompt prefilled with the current goal.
    pub fn open_goal_prompt(&mut self) {
        let mode = self.app.mode();
        if mode.fixed_goal().is_some() {
            let msg = TrackerError::FixedGoal(mode).to_string();
            self.app.toast(msg, ToastKind::Info);
            return;
        }
        let default = goal_input_default(self.app.tracker.state(), mode);
        self.app.input_mode = InputMode::GoalEntry(default.to_string());
    }

    pub fn cancel_goal_prompt(&mut self) {
        self.app.input_mode = InputMode::Normal;
    }

    /// Apply the typed goal. The prompt stays open on invalid input.
    pub fn confirm_goal(&mut self) {
        let text = match &self.app.input_mode {
            InputMode::GoalEntry(text) => text.clone(),
            InputMode::Normal => return,
        };
        let mode = self.app.mode();
        let result =
            parse_goal_input(&text).and_then(|goal| self.app.tracker.set_daily_goal(mode, goal));

        match result {
            Ok(()) => self.app.input_mode = InputMode::Normal,
            Err(e) => {
                self.app.log(format!("Rejected goal input: {}", e));
                self.app.toast(e.to_string(), ToastKind::Error);
            }
        }
        self.flush_events();
    }

    /// Move pending tracker events into the toast queue and activity log.
    pub fn flush_events(&mut self) {
        let events: Vec<_> = self.app.tracker.sink_mut().drain(..).collect();
        for event in events {
            let msg = event.message();
            self.app.log(msg.clone());
            self.app.toast(msg, ToastKind::for_event(&event));
        }
    }
}
