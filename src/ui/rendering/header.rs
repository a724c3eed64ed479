//! Gamemode selector and key help.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph, Tabs},
};

use crate::{
    tracker::{DerivedStats, Gamemode},
    ui::app::App,
};

impl App {
    pub(in crate::ui) fn draw_mode_tabs(&self, f: &mut Frame, area: Rect) {
        let titles: Vec<String> = Gamemode::ALL
            .iter()
            .map(|m| format!("{} {}", m.index() + 1, m.label()))
            .collect();

        let title = if self.tracker.is_persistent() {
            "Anichess Tracker"
        } else {
            "Anichess Tracker (not saved)"
        };

        let tabs = Tabs::new(titles)
            .select(self.mode().index())
            .block(Block::default().borders(Borders::ALL).title(title))
            .highlight_style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            );

        f.render_widget(tabs, area);
    }

    pub(in crate::ui) fn draw_help(&self, f: &mut Frame, area: Rect, derived: &DerivedStats) {
        let undo = if derived.can_undo { "u undo | " } else { "" };
        let goal = if self.mode().fixed_goal().is_some() {
            ""
        } else {
            "g set goal | "
        };
        let help = format!(
            "w win | l loss | {}{}1-3/Tab mode | q quit",
            undo, goal
        );

        f.render_widget(
            Paragraph::new(help)
                .style(Style::default().fg(Color::Gray))
                .block(Block::default().borders(Borders::ALL).title("Keys")),
            area,
        );
    }
}
