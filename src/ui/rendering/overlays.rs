//! Toasts and the goal prompt drawn above the dashboard.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::{
    tracker::{MAX_GOAL, MIN_GOAL},
    ui::{app::App, types::ToastKind},
};

use super::centered_rect;

const TOAST_WIDTH: u16 = 48;

impl App {
    pub(in crate::ui) fn draw_toasts(&self, f: &mut Frame, area: Rect) {
        let width = TOAST_WIDTH.min(area.width);
        // Below the tabs, stacked newest first along the right edge.
        let mut y = area.y + 3;

        for toast in self.toasts.toasts() {
            if y + 3 > area.y + area.height {
                break;
            }
            let (color, prefix) = match toast.kind {
                ToastKind::Info => (Color::Cyan, ""),
                ToastKind::Error => (Color::Red, ""),
                ToastKind::WinStreak { celebrate: true } => (Color::Yellow, "🎉 "),
                ToastKind::WinStreak { celebrate: false } => (Color::Green, ""),
                ToastKind::LossStreak => (Color::Red, ""),
            };
            let rect = Rect {
                x: area.x + area.width - width,
                y,
                width,
                height: 3,
            };

            f.render_widget(Clear, rect);
            f.render_widget(
                Paragraph::new(format!("{}{}", prefix, toast.message))
                    .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
                    .block(
                        Block::default()
                            .borders(Borders::ALL)
                            .border_style(Style::default().fg(color)),
                    ),
                rect,
            );
            y += 3;
        }
    }

    pub(in crate::ui) fn draw_goal_prompt(&self, f: &mut Frame, text: &str) {
        let area = centered_rect(44, 7, f.area());
        let lines = vec![
            Line::from(""),
            Line::from(format!("  Games for {}: {}▌", self.mode().label(), text)),
            Line::from(""),
            Line::from(format!(
                "  {}-{} games | Enter confirm | Esc cancel",
                MIN_GOAL, MAX_GOAL
            )),
        ];

        f.render_widget(Clear, area);
        f.render_widget(
            Paragraph::new(lines).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Cyan))
                    .title("Reset Daily Goal"),
            ),
            area,
        );
    }
}
