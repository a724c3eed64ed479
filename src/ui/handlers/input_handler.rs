//! Keyboard dispatch.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tracker::{GameResult, Gamemode};

use super::super::{app::App, types::InputMode};
use super::TrackerHandler;

/// Maximum digits accepted in the goal prompt.
const GOAL_INPUT_LEN: usize = 3;

/// Helper struct for routing key presses to tracker actions.
pub struct InputHandler<'a> {
    app: &'a mut App,
}

impl<'a> InputHandler<'a> {
    pub fn new(app: &'a mut App) -> Self {
        Self { app }
    }

    /// Returns true when the dashboard should exit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if let (KeyCode::Char('c' | 'C'), KeyModifiers::CONTROL) = (key.code, key.modifiers) {
            self.app.log("Exit requested");
            return true;
        }

        if matches!(self.app.input_mode, InputMode::GoalEntry(_)) {
            self.handle_goal_key(key);
            return false;
        }

        match key.code {
            KeyCode::Char('q' | 'Q') => {
                self.app.log("Exit requested");
                return true;
            }
            KeyCode::Char('w' | 'W') => TrackerHandler::new(self.app).record(GameResult::Win),
            KeyCode::Char('l' | 'L') => TrackerHandler::new(self.app).record(GameResult::Loss),
            KeyCode::Char('u' | 'U') => TrackerHandler::new(self.app).undo(),
            KeyCode::Char('g' | 'G') => TrackerHandler::new(self.app).open_goal_prompt(),
            KeyCode::Char('1') => TrackerHandler::new(self.app).select(Gamemode::Quickmode),
            KeyCode::Char('2') => TrackerHandler::new(self.app).select(Gamemode::Ranked),
            KeyCode::Char('3') => TrackerHandler::new(self.app).select(Gamemode::Checkmate),
            KeyCode::Tab => TrackerHandler::new(self.app).cycle_mode(),
            _ => {}
        }
        false
    }

    fn handle_goal_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => TrackerHandler::new(self.app).confirm_goal(),
            KeyCode::Esc => TrackerHandler::new(self.app).cancel_goal_prompt(),
            KeyCode::Backspace => {
                if let InputMode::GoalEntry(text) = &mut self.app.input_mode {
                    text.pop();
                }
            }
            KeyCode::Char(c) if c.is_ascii_digit() => {
                if let InputMode::GoalEntry(text) = &mut self.app.input_mode {
                    if text.len() < GOAL_INPUT_LEN {
                        text.push(c);
                    }
                }
            }
            _ => {}
        }
    }
}
