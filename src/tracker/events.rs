//! Notifications emitted by the tracker for the display layer.

use super::{GameResult, Gamemode, PriorStreak, StreakType};

/// Streak checkpoint worth announcing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreakMilestone {
    pub kind: GameResult,
    pub streak: u32,
    /// Big checkpoints get a celebration on top of the notification.
    pub celebrate: bool,
}

impl StreakMilestone {
    pub fn message(&self) -> String {
        match self.kind {
            GameResult::Win => format!("🔥 {} Win Streak!", self.streak),
            GameResult::Loss => format!("😴 Rest up! {} Loss Streak", self.streak),
        }
    }
}

/// Win checkpoints: 3 (only when climbing from below 3), 5, 10, then every
/// multiple of 5.
pub fn win_streak_milestone(streak: u32, prior: PriorStreak) -> Option<StreakMilestone> {
    let (hit, celebrate) = match streak {
        3 if prior.streak < 3 => (true, true),
        5 | 10 => (true, true),
        s if s > 0 && s % 5 == 0 => (true, false),
        _ => (false, false),
    };
    hit.then_some(StreakMilestone {
        kind: GameResult::Win,
        streak,
        celebrate,
    })
}

/// Loss checkpoints: 3 or 5 right after a win streak, otherwise every
/// multiple of 3.
pub fn loss_streak_milestone(streak: u32, prior: PriorStreak) -> Option<StreakMilestone> {
    let after_wins = prior.streak_type == StreakType::Win;
    let hit = (matches!(streak, 3 | 5) && after_wins) || (streak >= 3 && streak % 3 == 0);
    hit.then_some(StreakMilestone {
        kind: GameResult::Loss,
        streak,
        celebrate: false,
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackerEvent {
    Recorded { mode: Gamemode, result: GameResult },
    Streak(StreakMilestone),
    GoalCompleted { mode: Gamemode, goal: u32 },
    Undone { mode: Gamemode, action: GameResult },
    GoalSet { mode: Gamemode, goal: u32 },
    GamemodeSelected(Gamemode),
    /// Persisting failed; the session continues in memory only.
    StorageDegraded,
}

impl TrackerEvent {
    /// Short user-facing text for a toast.
    pub fn message(&self) -> String {
        match self {
            TrackerEvent::Recorded {
                result: GameResult::Win,
                ..
            } => "Win recorded! 🏆".to_string(),
            TrackerEvent::Recorded {
                result: GameResult::Loss,
                ..
            } => "Loss recorded. Keep going! 💪".to_string(),
            TrackerEvent::Streak(milestone) => milestone.message(),
            TrackerEvent::GoalCompleted {
                mode: Gamemode::Quickmode,
                ..
            } => "Quickmode daily goal completed! 🎉".to_string(),
            TrackerEvent::GoalCompleted { .. } => "Daily goal completed! 🎉".to_string(),
            TrackerEvent::Undone { action, .. } => format!("Undid {}! ↩️", action),
            TrackerEvent::GoalSet { mode, goal } => {
                format!("Daily goal reset to {} games for {}! 🎯", goal, mode)
            }
            TrackerEvent::GamemodeSelected(mode) => format!("Switched to {}", mode.label()),
            TrackerEvent::StorageDegraded => {
                "Storage unavailable, progress is kept for this session only".to_string()
            }
        }
    }
}

/// Receiver for tracker notifications.
pub trait EventSink {
    fn emit(&mut self, event: TrackerEvent);
}

impl EventSink for Vec<TrackerEvent> {
    fn emit(&mut self, event: TrackerEvent) {
        self.push(event);
    }
}
