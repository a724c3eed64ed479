use std::{
    fmt::Display,
    io::Stdout,
    time::{Duration, Instant},
};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::info;

use crate::tracker::{DerivedStats, Gamemode};

use super::types::{ActivityLog, AppTracker, InputMode, ToastKind, ToastQueue};

const TICK: Duration = Duration::from_millis(250);

/// Dashboard state container.
pub struct App {
    pub(in crate::ui) tracker: AppTracker,
    pub(in crate::ui) input_mode: InputMode,
    pub(in crate::ui) toasts: ToastQueue,
    pub(in crate::ui) activity: ActivityLog,
}

impl App {
    pub fn new(tracker: AppTracker) -> Self {
        let mut app = Self {
            tracker,
            input_mode: InputMode::Normal,
            toasts: ToastQueue::new(),
            activity: ActivityLog::new(),
        };
        // Load may already have reported a storage problem.
        super::handlers::TrackerHandler::new(&mut app).flush_events();
        app
    }

    pub fn run(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        info!("Dashboard started");
        self.log(format!("Tracking {}", self.mode().label()));

        loop {
            self.toasts.prune(Instant::now());
            terminal.draw(|f| self.draw(f))?;

            if !event::poll(TICK)? {
                continue;
            }
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if super::handlers::InputHandler::new(self).handle_key(key) {
                    info!("Dashboard closed");
                    return Ok(());
                }
            }
        }
    }

    pub fn tracker(&self) -> &AppTracker {
        &self.tracker
    }

    pub(in crate::ui) fn mode(&self) -> Gamemode {
        self.tracker.current_gamemode()
    }

    pub(in crate::ui) fn derived(&self) -> DerivedStats {
        self.tracker.derived(self.mode())
    }

    pub(in crate::ui) fn log(&mut self, msg: impl Into<String> + Display) {
        tracing::debug!("{}", &msg);
        self.activity.push(msg);
    }

    pub(in crate::ui) fn toast(&mut self, msg: impl Into<String>, kind: ToastKind) {
        self.toasts.push(msg, kind, Instant::now());
    }
}
