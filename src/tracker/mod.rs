//! Win/loss statistics per gamemode with streaks, goals and undo.

mod derived;
mod error;
mod events;
mod service;
mod types;

pub use derived::{DerivedStats, percentage};
pub use error::TrackerError;
pub use events::{
    EventSink, StreakMilestone, TrackerEvent, loss_streak_milestone, win_streak_milestone,
};
pub use service::Tracker;
pub use types::{
    DailyGoals, GameResult, Gamemode, GamemodeData, ModeStats, PriorStreak, ResultMarker,
    StatsSnapshot, StreakType, TrackerState, UndoEntry,
};

/// Storage key of the serialized [`TrackerState`].
pub const STATE_KEY: &str = "anichessTracker";
/// Storage key of the last daily rollover date.
pub const RESET_KEY: &str = "anichessTrackerReset";
/// Storage key an unreadable state blob is copied to before it is replaced.
pub const BACKUP_KEY: &str = "anichessTracker.bak";
/// Date format of the rollover key, e.g. `Mon Jan 01 2024`.
pub const RESET_DATE_FORMAT: &str = "%a %b %d %Y";

pub const MAX_RECENT_GAMES: usize = 10;
pub const MAX_HISTORY: usize = 10;
/// Entries shown as recent form.
pub const RECENT_FORM_LEN: usize = 5;

pub const QUICKMODE_GOAL: u32 = 70;
pub const MIN_GOAL: u32 = 1;
pub const MAX_GOAL: u32 = 50;
/// Prefilled goal prompt value when the mode has no goal yet.
pub const DEFAULT_GOAL_INPUT: u32 = 10;

/// Parse a goal typed by the user. Range checks happen in
/// [`Tracker::set_daily_goal`].
pub fn parse_goal_input(input: &str) -> Result<u32, TrackerError> {
    input
        .trim()
        .parse::<u32>()
        .map_err(|_| TrackerError::InvalidGoal)
}

/// Value to prefill the goal prompt with.
pub fn goal_input_default(state: &TrackerState, mode: Gamemode) -> u32 {
    state.daily_goals.get(mode).unwrap_or(DEFAULT_GOAL_INPUT)
}
