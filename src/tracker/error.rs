use super::{Gamemode, MAX_GOAL, MIN_GOAL, QUICKMODE_GOAL};

/// Validation failures reported back to the user. None of them mutate state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackerError {
    /// The gamemode name did not match any known mode.
    UnknownGamemode(String),
    /// The mode's goal is fixed and cannot be changed.
    FixedGoal(Gamemode),
    /// Goal value outside the accepted range or not a number.
    InvalidGoal,
    /// The undo history for the mode is empty.
    NothingToUndo(Gamemode),
}

impl std::fmt::Display for TrackerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TrackerError::UnknownGamemode(name) => write!(
                f,
                "Unknown gamemode '{}' (expected quickmode, ranked or checkmate)",
                name
            ),
            TrackerError::FixedGoal(mode) => write!(
                f,
                "{} has a fixed goal of {} games! ⚡",
                mode.label(),
                QUICKMODE_GOAL
            ),
            TrackerError::InvalidGoal => write!(
                f,
                "Please enter a valid goal between {} and {} games",
                MIN_GOAL, MAX_GOAL
            ),
            TrackerError::NothingToUndo(_) => write!(f, "No actions to undo! 🔄"),
        }
    }
}

impl std::error::Error for TrackerError {}
