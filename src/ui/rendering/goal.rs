//! Daily goal progress bar.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders, Gauge, Paragraph},
};

use crate::{tracker::DerivedStats, ui::app::App};

impl App {
    pub(in crate::ui) fn draw_goal(&self, f: &mut Frame, area: Rect, derived: &DerivedStats) {
        let title = format!("Daily Goal: {}", derived.goal_label());
        let block = Block::default().borders(Borders::ALL).title(title);

        let (Some(progress), Some(text)) = (derived.progress_percentage, derived.progress_text())
        else {
            f.render_widget(
                Paragraph::new("  Press g to set a goal for this mode")
                    .style(Style::default().fg(Color::Gray))
                    .block(block),
                area,
            );
            return;
        };

        let color = if derived.goal_completed() {
            Color::Green
        } else {
            Color::Cyan
        };

        f.render_widget(
            Gauge::default()
                .block(block)
                .gauge_style(Style::default().fg(color))
                .ratio((progress / 100.0).clamp(0.0, 1.0))
                .label(text),
            area,
        );
    }
}
