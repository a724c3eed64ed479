//! Tracker service: owns the state, persists it and reports what happened.

use chrono::{Local, NaiveDate, SubsecRound, Utc};
use tracing::{debug, info, warn};

use super::{
    BACKUP_KEY, DerivedStats, EventSink, GameResult, Gamemode, MAX_GOAL, MIN_GOAL,
    RESET_DATE_FORMAT, RESET_KEY, STATE_KEY, TrackerError, TrackerEvent, TrackerState, UndoEntry,
    events::{loss_streak_milestone, win_streak_milestone},
};
use crate::storage::Storage;

pub struct Tracker<S: Storage, E: EventSink> {
    state: TrackerState,
    storage: S,
    sink: E,
    persistent: bool,
}

impl<S: Storage, E: EventSink> Tracker<S, E> {
    /// Load using today's local calendar date for the daily rollover.
    pub fn open(storage: S, sink: E) -> Self {
        Self::load(storage, sink, Local::now().date_naive())
    }

    /// Load the persisted blob (falling back to defaults) and apply the
    /// daily rollover for `today`.
    ///
    /// An unreadable blob is copied to [`BACKUP_KEY`] before anything is
    /// written. If that copy or the read itself fails, the tracker starts in
    /// memory only and the stored data is left untouched.
    pub fn load(storage: S, sink: E, today: NaiveDate) -> Self {
        let mut tracker = Self {
            state: TrackerState::default(),
            storage,
            sink,
            persistent: true,
        };

        match tracker.storage.get(STATE_KEY) {
            Ok(Some(json)) => match serde_json::from_str(&json) {
                Ok(state) => tracker.state = state,
                Err(e) => {
                    warn!("Stored tracker data is unreadable, starting fresh: {}", e);
                    tracker.back_up(&json);
                }
            },
            Ok(None) => info!("No stored tracker data, starting fresh"),
            Err(e) => tracker.disable_persistence(e.context("Failed to read tracker data")),
        }

        tracker.daily_rollover(today);
        tracker
    }

    pub fn state(&self) -> &TrackerState {
        &self.state
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn sink(&self) -> &E {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut E {
        &mut self.sink
    }

    /// False once the store has failed; later mutations stay in memory.
    pub fn is_persistent(&self) -> bool {
        self.persistent
    }

    /// Stop writing to the store for the rest of the session and report it
    /// once through the sink.
    pub fn disable_persistence(&mut self, error: anyhow::Error) {
        if !self.persistent {
            return;
        }
        warn!(
            "Storage unavailable, continuing in memory only: {:#}",
            error
        );
        self.persistent = false;
        self.sink.emit(TrackerEvent::StorageDegraded);
    }

    pub fn current_gamemode(&self) -> Gamemode {
        self.state.current_gamemode
    }

    pub fn select_gamemode(&mut self, mode: Gamemode) {
        if self.state.current_gamemode == mode {
            return;
        }
        self.state.current_gamemode = mode;
        debug!("Selected gamemode {}", mode);
        self.persist();
        self.sink.emit(TrackerEvent::GamemodeSelected(mode));
    }

    pub fn derived(&self, mode: Gamemode) -> DerivedStats {
        DerivedStats::compute(&self.state, mode)
    }

    pub fn record_win(&mut self, mode: Gamemode) {
        self.record_result(mode, GameResult::Win);
    }

    pub fn record_loss(&mut self, mode: Gamemode) {
        self.record_result(mode, GameResult::Loss);
    }

    pub fn record_result(&mut self, mode: Gamemode, result: GameResult) {
        let goal = self.state.active_goal(mode);
        let stats = self.state.stats_mut(mode);
        // Millisecond precision, same as the stored blob.
        let prior = stats.record(result, Utc::now().trunc_subsecs(3));
        let streak = stats.current_streak;
        let session_games = stats.session_games;

        info!(
            "Recorded {} in {} (streak {}, session {})",
            result, mode, streak, session_games
        );
        self.persist();

        self.sink.emit(TrackerEvent::Recorded { mode, result });
        if let Some(goal) = goal.filter(|&g| session_games == g) {
            info!("Goal of {} games reached in {}", goal, mode);
            self.sink.emit(TrackerEvent::GoalCompleted { mode, goal });
        }
        let milestone = match result {
            GameResult::Win => win_streak_milestone(streak, prior),
            GameResult::Loss => loss_streak_milestone(streak, prior),
        };
        if let Some(milestone) = milestone {
            self.sink.emit(TrackerEvent::Streak(milestone));
        }
    }

    /// Restore the state from before the most recent result. Undo never adds
    /// its own history entry, so it cannot be redone.
    pub fn undo_last(&mut self, mode: Gamemode) -> Result<UndoEntry, TrackerError> {
        let entry = self
            .state
            .stats_mut(mode)
            .undo()
            .ok_or(TrackerError::NothingToUndo(mode))?;

        info!("Undid {} in {}", entry.action, mode);
        self.persist();
        self.sink.emit(TrackerEvent::Undone {
            mode,
            action: entry.action,
        });
        Ok(entry)
    }

    /// Set a user goal and restart the mode's session counter.
    pub fn set_daily_goal(&mut self, mode: Gamemode, value: u32) -> Result<(), TrackerError> {
        if mode.fixed_goal().is_some() {
            return Err(TrackerError::FixedGoal(mode));
        }
        if !(MIN_GOAL..=MAX_GOAL).contains(&value) {
            return Err(TrackerError::InvalidGoal);
        }

        self.state.daily_goals.set(mode, value);
        self.state.stats_mut(mode).session_games = 0;
        info!("Daily goal for {} set to {}", mode, value);
        self.persist();
        self.sink.emit(TrackerEvent::GoalSet { mode, goal: value });
        Ok(())
    }

    /// Reset quickmode's session counter when the calendar day changed since
    /// the last reset. Returns whether a reset happened.
    pub fn daily_rollover(&mut self, today: NaiveDate) -> bool {
        let today_str = today.format(RESET_DATE_FORMAT).to_string();
        let last_reset = self.storage.get(RESET_KEY).unwrap_or_else(|e| {
            warn!("Failed to read last reset date: {:#}", e);
            None
        });
        if last_reset.as_deref() == Some(today_str.as_str()) {
            return false;
        }

        info!("Daily rollover to {}", today_str);
        self.state.stats_mut(Gamemode::Quickmode).session_games = 0;
        if self.persistent {
            if let Err(e) = self.storage.set(RESET_KEY, &today_str) {
                self.disable_persistence(e);
            }
        }
        self.persist();
        true
    }

    fn persist(&mut self) {
        if !self.persistent {
            return;
        }
        let json = match serde_json::to_string(&self.state) {
            Ok(json) => json,
            Err(e) => {
                warn!("Failed to serialize tracker data: {}", e);
                return;
            }
        };
        if let Err(e) = self.storage.set(STATE_KEY, &json) {
            self.disable_persistence(e);
        }
    }

    fn back_up(&mut self, raw: &str) {
        match self.storage.set(BACKUP_KEY, raw) {
            Ok(()) => warn!("Copied unreadable tracker data to {}", BACKUP_KEY),
            Err(e) => self.disable_persistence(e.context("Failed to back up tracker data")),
        }
    }
}

#[cfg(test)]
mod tests {
    use anyhow::anyhow;

    use super::*;
    use crate::{
        storage::MemoryStore,
        tracker::{ResultMarker, StreakType},
    };

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    fn fresh() -> Tracker<MemoryStore, Vec<TrackerEvent>> {
        Tracker::load(MemoryStore::new(), Vec::new(), day(1))
    }

    fn streak_events(tracker: &Tracker<MemoryStore, Vec<TrackerEvent>>) -> Vec<u32> {
        tracker
            .sink()
            .iter()
            .filter_map(|e| match e {
                TrackerEvent::Streak(m) => Some(m.streak),
                _ => None,
            })
            .collect()
    }

    /// Store that rejects every write.
    struct ReadOnlyStore;

    impl Storage for ReadOnlyStore {
        fn get(&self, _key: &str) -> anyhow::Result<Option<String>> {
            Ok(None)
        }

        fn set(&mut self, _key: &str, _value: &str) -> anyhow::Result<()> {
            Err(anyhow!("storage disabled"))
        }
    }

    /// Store whose reads fail; counts attempted writes.
    #[derive(Default)]
    struct UnreadableStore {
        writes: usize,
    }

    impl Storage for UnreadableStore {
        fn get(&self, _key: &str) -> anyhow::Result<Option<String>> {
            Err(anyhow!("permission denied"))
        }

        fn set(&mut self, _key: &str, _value: &str) -> anyhow::Result<()> {
            self.writes += 1;
            Ok(())
        }
    }

    #[test]
    fn test_three_wins_then_loss() {
        let mut tracker = fresh();
        for _ in 0..3 {
            tracker.record_win(Gamemode::Quickmode);
        }
        tracker.record_loss(Gamemode::Quickmode);

        let stats = tracker.state().stats(Gamemode::Quickmode);
        assert_eq!(stats.total_games, 4);
        assert_eq!(stats.total_wins, 3);
        assert_eq!(stats.total_losses, 1);
        assert_eq!(stats.current_streak, 1);
        assert_eq!(stats.streak_type, StreakType::Loss);
        assert_eq!(stats.best_streak, 3);
        assert_eq!(
            stats.recent_games,
            vec![ResultMarker::L, ResultMarker::W, ResultMarker::W, ResultMarker::W]
        );
    }

    #[test]
    fn test_modes_are_independent() {
        let mut tracker = fresh();
        tracker.record_win(Gamemode::Ranked);
        assert_eq!(tracker.state().stats(Gamemode::Ranked).total_games, 1);
        assert_eq!(tracker.state().stats(Gamemode::Quickmode).total_games, 0);
        assert_eq!(tracker.state().stats(Gamemode::Checkmate).total_games, 0);
    }

    #[test]
    fn test_win_streak_notifies_once_at_three() {
        let mut tracker = fresh();
        tracker.record_loss(Gamemode::Ranked);
        for _ in 0..4 {
            tracker.record_win(Gamemode::Ranked);
        }
        assert_eq!(streak_events(&tracker), vec![3]);

        tracker.record_win(Gamemode::Ranked);
        assert_eq!(streak_events(&tracker), vec![3, 5]);
    }

    #[test]
    fn test_undo_restores_previous_state() {
        let mut tracker = fresh();
        tracker.record_win(Gamemode::Checkmate);
        tracker.record_loss(Gamemode::Checkmate);
        let before = tracker.state().stats(Gamemode::Checkmate).snapshot();

        tracker.record_win(Gamemode::Checkmate);
        let entry = tracker.undo_last(Gamemode::Checkmate).unwrap();

        assert_eq!(entry.action, GameResult::Win);
        assert_eq!(tracker.state().stats(Gamemode::Checkmate).snapshot(), before);
        assert_eq!(tracker.state().stats(Gamemode::Checkmate).history.len(), 2);
        assert!(tracker.sink().contains(&TrackerEvent::Undone {
            mode: Gamemode::Checkmate,
            action: GameResult::Win,
        }));
    }

    #[test]
    fn test_undo_empty_history() {
        let mut tracker = fresh();
        let before = tracker.state().clone();
        assert_eq!(
            tracker.undo_last(Gamemode::Ranked),
            Err(TrackerError::NothingToUndo(Gamemode::Ranked))
        );
        assert_eq!(tracker.state(), &before);
    }

    #[test]
    fn test_set_daily_goal_validation() {
        let mut tracker = fresh();
        assert_eq!(
            tracker.set_daily_goal(Gamemode::Ranked, 0),
            Err(TrackerError::InvalidGoal)
        );
        assert_eq!(
            tracker.set_daily_goal(Gamemode::Ranked, 51),
            Err(TrackerError::InvalidGoal)
        );
        assert_eq!(
            tracker.set_daily_goal(Gamemode::Quickmode, 10),
            Err(TrackerError::FixedGoal(Gamemode::Quickmode))
        );
        assert_eq!(tracker.state().daily_goals.get(Gamemode::Ranked), None);

        tracker.set_daily_goal(Gamemode::Ranked, 10).unwrap();
        assert_eq!(
            tracker.set_daily_goal(Gamemode::Ranked, 99),
            Err(TrackerError::InvalidGoal)
        );
        assert_eq!(tracker.state().daily_goals.get(Gamemode::Ranked), Some(10));
    }

    #[test]
    fn test_set_daily_goal_resets_session() {
        let mut tracker = fresh();
        tracker.record_win(Gamemode::Checkmate);
        tracker.record_win(Gamemode::Checkmate);
        tracker.set_daily_goal(Gamemode::Checkmate, 5).unwrap();

        let stats = tracker.state().stats(Gamemode::Checkmate);
        assert_eq!(stats.session_games, 0);
        assert_eq!(stats.total_games, 2);
    }

    #[test]
    fn test_goal_progress_caps_at_hundred() {
        let mut tracker = fresh();
        tracker.set_daily_goal(Gamemode::Ranked, 25).unwrap();
        for _ in 0..25 {
            tracker.record_win(Gamemode::Ranked);
        }
        assert_eq!(
            tracker.derived(Gamemode::Ranked).progress_percentage,
            Some(100.0)
        );

        tracker.record_win(Gamemode::Ranked);
        assert_eq!(
            tracker.derived(Gamemode::Ranked).progress_percentage,
            Some(100.0)
        );

        let completions = tracker
            .sink()
            .iter()
            .filter(|e| matches!(e, TrackerEvent::GoalCompleted { .. }))
            .count();
        assert_eq!(completions, 1);
    }

    #[test]
    fn test_state_is_persisted_after_each_mutation() {
        let mut tracker = fresh();
        tracker.record_win(Gamemode::Ranked);
        let json = tracker.storage().get(STATE_KEY).unwrap().unwrap();
        let stored: TrackerState = serde_json::from_str(&json).unwrap();
        assert_eq!(&stored, tracker.state());

        tracker.select_gamemode(Gamemode::Checkmate);
        let json = tracker.storage().get(STATE_KEY).unwrap().unwrap();
        let stored: TrackerState = serde_json::from_str(&json).unwrap();
        assert_eq!(stored.current_gamemode, Gamemode::Checkmate);
    }

    #[test]
    fn test_rollover_resets_only_quickmode() {
        let mut tracker = fresh();
        tracker.record_win(Gamemode::Quickmode);
        tracker.record_win(Gamemode::Ranked);

        assert!(!tracker.daily_rollover(day(1)));
        assert_eq!(tracker.state().stats(Gamemode::Quickmode).session_games, 1);

        assert!(tracker.daily_rollover(day(2)));
        assert_eq!(tracker.state().stats(Gamemode::Quickmode).session_games, 0);
        assert_eq!(tracker.state().stats(Gamemode::Quickmode).total_games, 1);
        assert_eq!(tracker.state().stats(Gamemode::Ranked).session_games, 1);
        assert_eq!(
            tracker.storage().get(RESET_KEY).unwrap().as_deref(),
            Some("Tue Jan 02 2024")
        );
    }

    #[test]
    fn test_corrupt_blob_falls_back_to_defaults() {
        let mut store = MemoryStore::new();
        store.set(STATE_KEY, "{not json").unwrap();
        let tracker = Tracker::load(store, Vec::new(), day(1));
        assert_eq!(tracker.state(), &TrackerState::default());
    }

    #[test]
    fn test_unreadable_blob_is_backed_up() {
        let blob = r#"{"currentGamemode":"ranked","gamemodeData":{"ranked":{"totalGames":-1,"totalWins":40}}}"#;
        let mut store = MemoryStore::new();
        store.set(STATE_KEY, blob).unwrap();

        let mut tracker = Tracker::load(store, Vec::new(), day(1));
        assert!(tracker.is_persistent());
        assert_eq!(
            tracker.storage().get(BACKUP_KEY).unwrap().as_deref(),
            Some(blob)
        );

        tracker.record_win(Gamemode::Ranked);
        assert_eq!(
            tracker.storage().get(BACKUP_KEY).unwrap().as_deref(),
            Some(blob)
        );
    }

    #[test]
    fn test_read_failure_leaves_store_untouched() {
        let mut tracker = Tracker::load(UnreadableStore::default(), Vec::new(), day(1));
        assert!(!tracker.is_persistent());

        tracker.record_win(Gamemode::Quickmode);
        assert_eq!(tracker.storage().writes, 0);
        assert_eq!(tracker.sink().first(), Some(&TrackerEvent::StorageDegraded));
    }

    #[test]
    fn test_disable_persistence_reports_once() {
        let mut tracker = fresh();
        tracker.record_win(Gamemode::Ranked);
        let saved = tracker.storage().get(STATE_KEY).unwrap();

        tracker.disable_persistence(anyhow!("data directory is read-only"));
        tracker.disable_persistence(anyhow!("again"));
        tracker.record_win(Gamemode::Ranked);

        assert!(!tracker.is_persistent());
        assert_eq!(tracker.storage().get(STATE_KEY).unwrap(), saved);
        let degraded = tracker
            .sink()
            .iter()
            .filter(|e| **e == TrackerEvent::StorageDegraded)
            .count();
        assert_eq!(degraded, 1);
    }

    #[test]
    fn test_write_failure_degrades_to_memory() {
        let mut tracker = Tracker::load(ReadOnlyStore, Vec::new(), day(1));
        assert!(!tracker.is_persistent());

        tracker.record_win(Gamemode::Ranked);
        tracker.record_win(Gamemode::Ranked);
        assert_eq!(tracker.state().stats(Gamemode::Ranked).total_wins, 2);

        let degraded = tracker
            .sink()
            .iter()
            .filter(|e| **e == TrackerEvent::StorageDegraded)
            .count();
        assert_eq!(degraded, 1);
    }
}
