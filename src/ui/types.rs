use std::time::{Duration, Instant};

use crate::{
    storage::Storage,
    tracker::{GameResult, Tracker, TrackerEvent},
};

pub const MAX_LOG_LINES: usize = 100;
pub const MAX_TOASTS: usize = 4;
pub const TOAST_TTL: Duration = Duration::from_secs(3);
/// Streak notifications stay up longer than plain toasts.
pub const STREAK_TOAST_TTL: Duration = Duration::from_secs(4);

/// Tracker as owned by the dashboard.
pub type AppTracker = Tracker<Box<dyn Storage>, Vec<TrackerEvent>>;

/// Bounded activity log shown in the bottom panel, oldest first.
#[derive(Debug, Clone, Default)]
pub struct ActivityLog {
    lines: Vec<String>,
}

impl ActivityLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, msg: impl Into<String>) {
        self.lines.push(msg.into());
        if self.lines.len() > MAX_LOG_LINES {
            let overflow = self.lines.len() - MAX_LOG_LINES;
            self.lines.drain(..overflow);
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Info,
    Error,
    WinStreak { celebrate: bool },
    LossStreak,
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
    pub expires_at: Instant,
}

/// Transient notifications, newest first.
#[derive(Debug, Clone, Default)]
pub struct ToastQueue {
    toasts: Vec<Toast>,
}

impl ToastQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: impl Into<String>, kind: ToastKind, now: Instant) {
        let ttl = match kind {
            ToastKind::WinStreak { .. } | ToastKind::LossStreak => STREAK_TOAST_TTL,
            ToastKind::Info | ToastKind::Error => TOAST_TTL,
        };
        self.toasts.insert(
            0,
            Toast {
                message: message.into(),
                kind,
                expires_at: now + ttl,
            },
        );
        self.toasts.truncate(MAX_TOASTS);
    }

    /// Drop expired toasts. Returns true when something was removed.
    pub fn prune(&mut self, now: Instant) -> bool {
        let before = self.toasts.len();
        self.toasts.retain(|t| t.expires_at > now);
        self.toasts.len() != before
    }

    pub fn toasts(&self) -> &[Toast] {
        &self.toasts
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }
}

impl ToastKind {
    pub fn for_event(event: &TrackerEvent) -> Self {
        match event {
            TrackerEvent::Streak(m) => match m.kind {
                GameResult::Win => ToastKind::WinStreak {
                    celebrate: m.celebrate,
                },
                GameResult::Loss => ToastKind::LossStreak,
            },
            TrackerEvent::StorageDegraded => ToastKind::Error,
            _ => ToastKind::Info,
        }
    }
}

/// Which key map is active.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    /// Goal prompt open, holding the typed text.
    GoalEntry(String),
}
