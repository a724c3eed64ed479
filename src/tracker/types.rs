//! Persisted tracker data structures.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{MAX_HISTORY, MAX_RECENT_GAMES, QUICKMODE_GOAL, TrackerError};

/// One of the independent statistic buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gamemode {
    #[default]
    Quickmode,
    Ranked,
    Checkmate,
}

impl Gamemode {
    pub const ALL: [Gamemode; 3] = [Gamemode::Quickmode, Gamemode::Ranked, Gamemode::Checkmate];

    pub fn as_str(&self) -> &'static str {
        match self {
            Gamemode::Quickmode => "quickmode",
            Gamemode::Ranked => "ranked",
            Gamemode::Checkmate => "checkmate",
        }
    }

    /// Capitalized name for display.
    pub fn label(&self) -> &'static str {
        match self {
            Gamemode::Quickmode => "Quickmode",
            Gamemode::Ranked => "Ranked",
            Gamemode::Checkmate => "Checkmate",
        }
    }

    /// Position in [`Gamemode::ALL`].
    pub fn index(&self) -> usize {
        match self {
            Gamemode::Quickmode => 0,
            Gamemode::Ranked => 1,
            Gamemode::Checkmate => 2,
        }
    }

    /// Next mode in selector order, wrapping around.
    pub fn next(&self) -> Self {
        Gamemode::ALL[(self.index() + 1) % Gamemode::ALL.len()]
    }

    /// Goal that cannot be changed by the user, if the mode has one.
    pub fn fixed_goal(&self) -> Option<u32> {
        match self {
            Gamemode::Quickmode => Some(QUICKMODE_GOAL),
            Gamemode::Ranked | Gamemode::Checkmate => None,
        }
    }
}

impl std::fmt::Display for Gamemode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Gamemode {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "quickmode" => Ok(Gamemode::Quickmode),
            "ranked" => Ok(Gamemode::Ranked),
            "checkmate" => Ok(Gamemode::Checkmate),
            _ => Err(TrackerError::UnknownGamemode(s.to_string())),
        }
    }
}

/// Outcome of a single game, also used as the undo action tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameResult {
    Win,
    Loss,
}

impl GameResult {
    pub fn marker(&self) -> ResultMarker {
        match self {
            GameResult::Win => ResultMarker::W,
            GameResult::Loss => ResultMarker::L,
        }
    }
}

impl std::fmt::Display for GameResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            GameResult::Win => "win",
            GameResult::Loss => "loss",
        };
        write!(f, "{}", s)
    }
}

/// Compact marker stored in the recent games list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResultMarker {
    W,
    L,
}

impl std::fmt::Display for ResultMarker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ResultMarker::W => "W",
            ResultMarker::L => "L",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StreakType {
    #[default]
    None,
    Win,
    Loss,
}

impl From<GameResult> for StreakType {
    fn from(result: GameResult) -> Self {
        match result {
            GameResult::Win => StreakType::Win,
            GameResult::Loss => StreakType::Loss,
        }
    }
}

/// Copy of the mutable counters taken before each recorded game.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StatsSnapshot {
    pub total_games: u32,
    pub total_wins: u32,
    pub total_losses: u32,
    pub current_streak: u32,
    pub streak_type: StreakType,
    pub best_streak: u32,
    pub session_games: u32,
    pub recent_games: Vec<ResultMarker>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UndoEntry {
    pub action: GameResult,
    pub previous_state: StatsSnapshot,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
}

/// Streak state right before a result was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriorStreak {
    pub streak: u32,
    pub streak_type: StreakType,
}

/// Statistics for one gamemode.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ModeStats {
    pub total_games: u32,
    pub total_wins: u32,
    pub total_losses: u32,
    pub current_streak: u32,
    pub streak_type: StreakType,
    pub best_streak: u32,
    pub session_games: u32,
    /// Most recent first.
    pub recent_games: Vec<ResultMarker>,
    /// Most recent first.
    pub history: Vec<UndoEntry>,
}

impl ModeStats {
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            total_games: self.total_games,
            total_wins: self.total_wins,
            total_losses: self.total_losses,
            current_streak: self.current_streak,
            streak_type: self.streak_type,
            best_streak: self.best_streak,
            session_games: self.session_games,
            recent_games: self.recent_games.clone(),
        }
    }

    /// Overwrite every field except `history` with the snapshot.
    pub fn restore(&mut self, snapshot: StatsSnapshot) {
        self.total_games = snapshot.total_games;
        self.total_wins = snapshot.total_wins;
        self.total_losses = snapshot.total_losses;
        self.current_streak = snapshot.current_streak;
        self.streak_type = snapshot.streak_type;
        self.best_streak = snapshot.best_streak;
        self.session_games = snapshot.session_games;
        self.recent_games = snapshot.recent_games;
    }

    /// Apply a game result and push an undo entry for it.
    pub fn record(&mut self, result: GameResult, timestamp: DateTime<Utc>) -> PriorStreak {
        let previous_state = self.snapshot();
        let prior = PriorStreak {
            streak: self.current_streak,
            streak_type: self.streak_type,
        };

        self.total_games += 1;
        match result {
            GameResult::Win => self.total_wins += 1,
            GameResult::Loss => self.total_losses += 1,
        }
        self.session_games += 1;

        let streak_type = StreakType::from(result);
        if self.streak_type == streak_type {
            self.current_streak += 1;
        } else {
            self.current_streak = 1;
            self.streak_type = streak_type;
        }

        if result == GameResult::Win && self.current_streak > self.best_streak {
            self.best_streak = self.current_streak;
        }

        self.recent_games.insert(0, result.marker());
        self.recent_games.truncate(MAX_RECENT_GAMES);

        self.history.insert(
            0,
            UndoEntry {
                action: result,
                previous_state,
                timestamp,
            },
        );
        self.history.truncate(MAX_HISTORY);

        prior
    }

    /// Pop the newest undo entry and restore its snapshot.
    pub fn undo(&mut self) -> Option<UndoEntry> {
        if self.history.is_empty() {
            return None;
        }
        let entry = self.history.remove(0);
        self.restore(entry.previous_state.clone());
        Some(entry)
    }

    pub fn can_undo(&self) -> bool {
        !self.history.is_empty()
    }
}

/// Per-mode goal values. Quickmode's entry is never set by the user.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DailyGoals {
    pub quickmode: Option<u32>,
    pub ranked: Option<u32>,
    pub checkmate: Option<u32>,
}

impl DailyGoals {
    pub fn get(&self, mode: Gamemode) -> Option<u32> {
        match mode {
            Gamemode::Quickmode => self.quickmode,
            Gamemode::Ranked => self.ranked,
            Gamemode::Checkmate => self.checkmate,
        }
    }

    pub fn set(&mut self, mode: Gamemode, goal: u32) {
        let slot = match mode {
            Gamemode::Quickmode => &mut self.quickmode,
            Gamemode::Ranked => &mut self.ranked,
            Gamemode::Checkmate => &mut self.checkmate,
        };
        *slot = Some(goal);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GamemodeData {
    pub quickmode: ModeStats,
    pub ranked: ModeStats,
    pub checkmate: ModeStats,
}

impl GamemodeData {
    pub fn get(&self, mode: Gamemode) -> &ModeStats {
        match mode {
            Gamemode::Quickmode => &self.quickmode,
            Gamemode::Ranked => &self.ranked,
            Gamemode::Checkmate => &self.checkmate,
        }
    }

    pub fn get_mut(&mut self, mode: Gamemode) -> &mut ModeStats {
        match mode {
            Gamemode::Quickmode => &mut self.quickmode,
            Gamemode::Ranked => &mut self.ranked,
            Gamemode::Checkmate => &mut self.checkmate,
        }
    }
}

/// Root of the persisted blob.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TrackerState {
    pub current_gamemode: Gamemode,
    pub daily_goals: DailyGoals,
    pub gamemode_data: GamemodeData,
}

impl TrackerState {
    pub fn stats(&self, mode: Gamemode) -> &ModeStats {
        self.gamemode_data.get(mode)
    }

    pub fn stats_mut(&mut self, mode: Gamemode) -> &mut ModeStats {
        self.gamemode_data.get_mut(mode)
    }

    /// Goal the session counter is measured against: the fixed goal for
    /// quickmode, otherwise the user-set goal.
    pub fn active_goal(&self, mode: Gamemode) -> Option<u32> {
        mode.fixed_goal().or_else(|| self.daily_goals.get(mode))
    }
}
