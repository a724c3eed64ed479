mod goal;
mod header;
mod logs;
mod overlays;
mod stats;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
};

use crate::ui::{app::App, types::InputMode};

use stats::{draw_counters, draw_recent_form};

impl App {
    pub(in crate::ui) fn draw(&self, f: &mut Frame) {
        let area = f.area();
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Gamemode tabs
                Constraint::Length(8), // Counters
                Constraint::Length(5), // Goal progress
                Constraint::Length(3), // Recent form
                Constraint::Min(4),    // Activity log
                Constraint::Length(3), // Key help
            ])
            .split(area);

        let derived = self.derived();

        self.draw_mode_tabs(f, layout[0]);
        draw_counters(f, layout[1], &derived);
        self.draw_goal(f, layout[2], &derived);
        draw_recent_form(f, layout[3], &derived);
        self.draw_logs(f, layout[4]);
        self.draw_help(f, layout[5], &derived);

        self.draw_toasts(f, area);
        if let InputMode::GoalEntry(ref text) = self.input_mode {
            self.draw_goal_prompt(f, text);
        }
    }
}

/// Rectangle of the given size centered in `area`, clamped to fit.
pub(in crate::ui) fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
