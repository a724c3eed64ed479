//! Counter and recent form panels.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::tracker::{DerivedStats, ResultMarker, StreakType};

fn value(text: String, color: Color) -> Span<'static> {
    Span::styled(
        text,
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    )
}

pub(super) fn draw_counters(f: &mut Frame, area: Rect, derived: &DerivedStats) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let totals = vec![
        Line::from(vec![
            Span::raw("  Games:   "),
            value(derived.total_games.to_string(), Color::Cyan),
        ]),
        Line::from(vec![
            Span::raw("  Wins:    "),
            value(derived.total_wins.to_string(), Color::Green),
            Span::raw(format!("  ({:.1}%)", derived.win_percentage)),
        ]),
        Line::from(vec![
            Span::raw("  Losses:  "),
            value(derived.total_losses.to_string(), Color::Red),
            Span::raw(format!("  ({:.1}%)", derived.loss_percentage)),
        ]),
        Line::from(vec![
            Span::raw("  Session: "),
            value(derived.session_games.to_string(), Color::Cyan),
        ]),
    ];

    let streak_color = match derived.streak_type {
        StreakType::Win => Color::Green,
        StreakType::Loss => Color::Red,
        StreakType::None => Color::Gray,
    };
    let streaks = vec![
        Line::from(vec![
            Span::raw("  Current: "),
            value(derived.current_streak.to_string(), streak_color),
        ]),
        Line::from(vec![
            Span::raw("  Type:    "),
            value(derived.streak_label().to_string(), streak_color),
        ]),
        Line::from(vec![
            Span::raw("  Best:    "),
            value(derived.best_streak.to_string(), Color::Yellow),
        ]),
    ];

    f.render_widget(
        Paragraph::new(totals).block(Block::default().borders(Borders::ALL).title("Statistics")),
        columns[0],
    );
    f.render_widget(
        Paragraph::new(streaks).block(Block::default().borders(Borders::ALL).title("Streak")),
        columns[1],
    );
}

pub(super) fn draw_recent_form(f: &mut Frame, area: Rect, derived: &DerivedStats) {
    let line = if derived.recent_form.is_empty() {
        Line::from(format!("  {}", derived.recent_form_text()))
    } else {
        let mut spans = vec![Span::raw("  ")];
        for marker in &derived.recent_form {
            let color = match marker {
                ResultMarker::W => Color::Green,
                ResultMarker::L => Color::Red,
            };
            spans.push(value(marker.to_string(), color));
            spans.push(Span::raw(" "));
        }
        Line::from(spans)
    };

    f.render_widget(
        Paragraph::new(line).block(Block::default().borders(Borders::ALL).title("Recent Form")),
        area,
    );
}
