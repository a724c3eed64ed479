//! Display values computed from the tracker state.

use serde::Serialize;

use super::{Gamemode, RECENT_FORM_LEN, ResultMarker, StreakType, TrackerState};

/// Everything the dashboard shows for one mode, derived without mutation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedStats {
    pub mode: Gamemode,
    pub total_games: u32,
    pub total_wins: u32,
    pub total_losses: u32,
    pub current_streak: u32,
    pub streak_type: StreakType,
    pub best_streak: u32,
    pub session_games: u32,
    pub win_percentage: f64,
    pub loss_percentage: f64,
    pub goal: Option<u32>,
    /// `None` when the mode has no goal yet.
    pub progress_percentage: Option<f64>,
    pub recent_form: Vec<ResultMarker>,
    pub can_undo: bool,
}

impl DerivedStats {
    pub fn compute(state: &TrackerState, mode: Gamemode) -> Self {
        let stats = state.stats(mode);
        let goal = state.active_goal(mode);

        Self {
            mode,
            total_games: stats.total_games,
            total_wins: stats.total_wins,
            total_losses: stats.total_losses,
            current_streak: stats.current_streak,
            streak_type: stats.streak_type,
            best_streak: stats.best_streak,
            session_games: stats.session_games,
            win_percentage: percentage(stats.total_wins, stats.total_games),
            loss_percentage: percentage(stats.total_losses, stats.total_games),
            goal,
            progress_percentage: goal.map(|g| progress(stats.session_games, g)),
            recent_form: stats
                .recent_games
                .iter()
                .take(RECENT_FORM_LEN)
                .copied()
                .collect(),
            can_undo: stats.can_undo(),
        }
    }

    pub fn goal_completed(&self) -> bool {
        self.goal.is_some_and(|g| self.session_games >= g)
    }

    pub fn streak_label(&self) -> &'static str {
        match self.streak_type {
            StreakType::Win => "Win Streak",
            StreakType::Loss => "Loss Streak",
            StreakType::None => "None",
        }
    }

    pub fn recent_form_text(&self) -> String {
        if self.recent_form.is_empty() {
            return "-".to_string();
        }
        self.recent_form
            .iter()
            .map(|m| m.to_string())
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn goal_label(&self) -> String {
        match self.goal {
            Some(g) => format!("{} games", g),
            None => "Not Set".to_string(),
        }
    }

    pub fn progress_text(&self) -> Option<String> {
        self.goal
            .map(|g| format!("{} / {} games completed", self.session_games, g))
    }
}

/// Share of `part` in `total` as a percentage rounded to one decimal.
pub fn percentage(part: u32, total: u32) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (part as f64 / total as f64 * 1000.0).round() / 10.0
}

fn progress(session_games: u32, goal: u32) -> f64 {
    if goal == 0 {
        return 0.0;
    }
    (session_games as f64 * 100.0 / goal as f64).min(100.0)
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::tracker::GameResult;

    #[test]
    fn test_percentage_rounding() {
        assert_eq!(percentage(0, 0), 0.0);
        assert_eq!(percentage(1, 3), 33.3);
        assert_eq!(percentage(2, 3), 66.7);
        assert_eq!(percentage(3, 4), 75.0);
    }

    #[test]
    fn test_empty_mode() {
        let state = TrackerState::default();
        let derived = DerivedStats::compute(&state, Gamemode::Ranked);
        assert_eq!(derived.win_percentage, 0.0);
        assert_eq!(derived.goal, None);
        assert_eq!(derived.progress_percentage, None);
        assert_eq!(derived.goal_label(), "Not Set");
        assert_eq!(derived.recent_form_text(), "-");
        assert_eq!(derived.streak_label(), "None");
        assert!(!derived.can_undo);
    }

    #[test]
    fn test_quickmode_uses_fixed_goal() {
        let mut state = TrackerState::default();
        for _ in 0..7 {
            state
                .stats_mut(Gamemode::Quickmode)
                .record(GameResult::Win, Utc::now());
        }
        let derived = DerivedStats::compute(&state, Gamemode::Quickmode);
        assert_eq!(derived.goal, Some(70));
        assert_eq!(derived.progress_percentage, Some(10.0));
        assert_eq!(derived.progress_text().unwrap(), "7 / 70 games completed");
        assert_eq!(derived.recent_form.len(), 5);
        assert_eq!(derived.recent_form_text(), "W W W W W");
        assert_eq!(derived.streak_label(), "Win Streak");
    }

    #[test]
    fn test_progress_is_capped() {
        let mut state = TrackerState::default();
        state.daily_goals.set(Gamemode::Checkmate, 2);
        for _ in 0..5 {
            state
                .stats_mut(Gamemode::Checkmate)
                .record(GameResult::Loss, Utc::now());
        }
        let derived = DerivedStats::compute(&state, Gamemode::Checkmate);
        assert_eq!(derived.progress_percentage, Some(100.0));
        assert!(derived.goal_completed());
        assert_eq!(derived.loss_percentage, 100.0);
    }
}
