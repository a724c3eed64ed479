use anyhow::{Context, Result};
use clap::Parser;
use std::path::Path;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use anichess_tracker::{
    args::{Args, Command, ModeArg},
    storage::{MemoryStore, Storage, open_file_store},
    tracker::{DerivedStats, Gamemode, Tracker, TrackerError, TrackerEvent, parse_goal_input},
    ui::{AppTracker, run_ui},
};

fn main() -> Result<()> {
    let args = Args::parse();
    let _guard = init_logging(&args.resolved_log_dir()?)?;

    let tracker = open_tracker(&args);

    match args.command {
        None => run_ui(tracker),
        Some(command) => run_command(tracker, command),
    }
}

/// Log to a daily rolling file; the dashboard owns the terminal.
fn init_logging(log_dir: &Path) -> Result<WorkerGuard> {
    std::fs::create_dir_all(log_dir)
        .with_context(|| format!("Failed to create log directory {}", log_dir.display()))?;

    let appender = tracing_appender::rolling::daily(log_dir, "anichess-tracker.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(writer)
        .with_ansi(false)
        .init();

    Ok(guard)
}

/// Tracker on the file store in the data directory, or in memory only when
/// that is unusable.
fn open_tracker(args: &Args) -> AppTracker {
    match open_file_store(args.data_dir.as_deref()) {
        Ok(store) => {
            info!("Using data directory {}", store.dir().display());
            Tracker::open(Box::new(store), Vec::new())
        }
        Err(e) => {
            warn!("Data directory unusable: {:#}", e);
            memory_tracker(e)
        }
    }
}

fn memory_tracker(error: anyhow::Error) -> AppTracker {
    let storage: Box<dyn Storage> = Box::new(MemoryStore::new());
    let mut tracker = Tracker::open(storage, Vec::new());
    tracker.disable_persistence(error);
    tracker
}

fn run_command(mut tracker: AppTracker, command: Command) -> Result<()> {
    // Anything reported while loading is a warning, keep it off stdout.
    for event in tracker.sink_mut().drain(..) {
        eprintln!("warning: {}", event.message());
    }

    let resolve = |arg: &ModeArg, tracker: &AppTracker| -> Gamemode {
        arg.mode.unwrap_or_else(|| tracker.current_gamemode())
    };

    let outcome: Result<(), TrackerError> = match command {
        Command::Win(arg) => {
            let mode = resolve(&arg, &tracker);
            tracker.record_win(mode);
            Ok(())
        }
        Command::Loss(arg) => {
            let mode = resolve(&arg, &tracker);
            tracker.record_loss(mode);
            Ok(())
        }
        Command::Undo(arg) => {
            let mode = resolve(&arg, &tracker);
            tracker.undo_last(mode).map(|_| ())
        }
        Command::Goal { value, mode: arg } => {
            let mode = resolve(&arg, &tracker);
            parse_goal_input(&value).and_then(|goal| tracker.set_daily_goal(mode, goal))
        }
        Command::Stats { mode: arg, json } => {
            let mode = resolve(&arg, &tracker);
            let derived = tracker.derived(mode);
            if json {
                let text = serde_json::to_string_pretty(&derived)
                    .context("Failed to serialize statistics")?;
                println!("{}", text);
            } else {
                print_stats(&derived);
            }
            Ok(())
        }
    };

    print_events(tracker.sink_mut().drain(..));
    outcome?;
    Ok(())
}

fn print_events(events: impl Iterator<Item = TrackerEvent>) {
    for event in events {
        println!("{}", event.message());
    }
}

fn print_stats(derived: &DerivedStats) {
    println!("{}", derived.mode.label());
    println!("  Games:        {}", derived.total_games);
    println!(
        "  Wins:         {} ({:.1}%)",
        derived.total_wins, derived.win_percentage
    );
    println!(
        "  Losses:       {} ({:.1}%)",
        derived.total_losses, derived.loss_percentage
    );
    println!(
        "  Streak:       {} ({})",
        derived.current_streak,
        derived.streak_label()
    );
    println!("  Best streak:  {}", derived.best_streak);
    println!("  Recent form:  {}", derived.recent_form_text());
    println!("  Daily goal:   {}", derived.goal_label());
    if let Some(progress) = derived.progress_text() {
        println!("  Progress:     {}", progress);
    }
}

#[cfg(test)]
mod tests {
    use anyhow::anyhow;

    use super::*;
    use anichess_tracker::tracker::{STATE_KEY, TrackerState};

    fn tracker() -> AppTracker {
        let storage: Box<dyn Storage> = Box::new(MemoryStore::new());
        Tracker::open(storage, Vec::new())
    }

    fn mode(mode: Gamemode) -> ModeArg {
        ModeArg { mode: Some(mode) }
    }

    #[test]
    fn test_undo_with_empty_history_fails() {
        let err = run_command(tracker(), Command::Undo(mode(Gamemode::Ranked))).unwrap_err();
        assert_eq!(err.to_string(), "No actions to undo! 🔄");
    }

    #[test]
    fn test_invalid_goal_fails() {
        let command = Command::Goal {
            value: "abc".to_string(),
            mode: mode(Gamemode::Checkmate),
        };
        assert!(run_command(tracker(), command).is_err());

        let command = Command::Goal {
            value: "20".to_string(),
            mode: mode(Gamemode::Quickmode),
        };
        assert!(run_command(tracker(), command).is_err());
    }

    #[test]
    fn test_valid_commands_succeed() {
        assert!(run_command(tracker(), Command::Win(mode(Gamemode::Ranked))).is_ok());
        let command = Command::Goal {
            value: "20".to_string(),
            mode: mode(Gamemode::Checkmate),
        };
        assert!(run_command(tracker(), command).is_ok());
    }

    #[test]
    fn test_memory_fallback_is_not_persistent() {
        let mut tracker = memory_tracker(anyhow!("data directory is read-only"));
        assert!(!tracker.is_persistent());
        assert_eq!(tracker.sink(), &vec![TrackerEvent::StorageDegraded]);

        tracker.record_win(Gamemode::Ranked);
        let json = tracker.storage().get(STATE_KEY).unwrap().unwrap();
        let stored: TrackerState = serde_json::from_str(&json).unwrap();
        assert_eq!(stored, TrackerState::default());
    }
}
