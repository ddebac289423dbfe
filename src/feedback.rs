//! Short-lived confirmation state for the export controls.

use std::time::{Duration, Instant};

/// Default time a control stays in its acknowledged state.
pub const DEFAULT_FEEDBACK_DURATION: Duration = Duration::from_millis(2000);

/// Controls that show transient feedback after an export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    Copy,
    Save,
}

impl Control {
    fn index(self) -> usize {
        match self {
            Control::Copy => 0,
            Control::Save => 1,
        }
    }
}

/// Visible state of one control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlStatus {
    /// Normal label with its shortcut hint
    Idle,
    /// The last export through this control succeeded
    Acknowledged,
    /// The last export through this control failed
    Failed,
}

#[derive(Debug, Clone, Copy)]
struct Pending {
    status: ControlStatus,
    reset_at: Instant,
}

/// Per-control acknowledged/failed flags with a scheduled reset.
///
/// Each control has at most one pending reset. Triggering again while a
/// reset is pending restarts the window, so the flag stays up for the full
/// duration after the latest trigger and drops exactly once.
#[derive(Debug, Clone)]
pub struct TransientFeedback {
    duration: Duration,
    pending: [Option<Pending>; 2],
}

impl Default for TransientFeedback {
    fn default() -> Self {
        Self::new(DEFAULT_FEEDBACK_DURATION)
    }
}

impl TransientFeedback {
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            pending: [None; 2],
        }
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Marks `control` acknowledged until `now + duration`.
    pub fn trigger(&mut self, control: Control, now: Instant) {
        self.set(control, ControlStatus::Acknowledged, now);
    }

    /// Marks `control` failed until `now + duration`.
    pub fn fail(&mut self, control: Control, now: Instant) {
        self.set(control, ControlStatus::Failed, now);
    }

    fn set(&mut self, control: Control, status: ControlStatus, now: Instant) {
        let slot = &mut self.pending[control.index()];
        if slot.is_some() {
            log::debug!("Restarting {:?} feedback window", control);
        }
        *slot = Some(Pending {
            status,
            reset_at: now + self.duration,
        });
    }

    /// Expires every window that ended at or before `now`.
    ///
    /// Returns `true` if any control changed back to idle.
    pub fn advance(&mut self, now: Instant) -> bool {
        let mut changed = false;
        for slot in &mut self.pending {
            if slot.is_some_and(|pending| pending.reset_at <= now) {
                *slot = None;
                changed = true;
            }
        }
        changed
    }

    /// Status as of the last [`advance`](Self::advance).
    pub fn status(&self, control: Control) -> ControlStatus {
        self.pending[control.index()].map_or(ControlStatus::Idle, |pending| pending.status)
    }

    pub fn is_acknowledged(&self, control: Control) -> bool {
        self.status(control) == ControlStatus::Acknowledged
    }

    /// Earliest pending reset, if any; hosts sleep until this instant.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending
            .iter()
            .flatten()
            .map(|pending| pending.reset_at)
            .min()
    }
}
