//! Debounced auto-save indicator state.
//!
//! # Responsibility
//! - Track the cosmetic `Saving.../Saved` flag the editor header shows.
//! - Keep indicator timing independent of the synchronous persistence path.
//!
//! # Invariants
//! - Re-triggering before the hold elapses restarts the window; transitions
//!   armed by an earlier trigger never fire afterwards.
//! - `cancel` immediately returns the indicator to `Idle`.

use std::time::{Duration, Instant};

const SAVING_HOLD: Duration = Duration::from_millis(1000);
const SAVED_HOLD: Duration = Duration::from_millis(1500);

/// Display phase for the editor's auto-save label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SavePhase {
    /// Nothing to show.
    Idle,
    /// An edit burst is in flight.
    Saving,
    /// The burst settled; confirmation shows briefly.
    Saved,
}

impl SavePhase {
    /// Label text rendered for the phase.
    pub fn label(self) -> &'static str {
        match self {
            Self::Idle => "",
            Self::Saving => "Saving...",
            Self::Saved => "Saved",
        }
    }
}

/// Timer-cancellable display flag driven by caller-supplied instants.
///
/// Purely cosmetic: persistence happens synchronously on every mutation,
/// never on this timer.
#[derive(Debug, Default)]
pub struct SaveIndicator {
    triggered_at: Option<Instant>,
}

impl SaveIndicator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an edit event, (re)starting the hold window.
    pub fn trigger(&mut self, now: Instant) {
        self.triggered_at = Some(now);
    }

    /// Clears any pending transition (component teardown path).
    pub fn cancel(&mut self) {
        self.triggered_at = None;
    }

    /// Display phase at `now`: `Saving` for 1000 ms after the last trigger,
    /// `Saved` for a further 1500 ms, then `Idle`.
    pub fn phase(&self, now: Instant) -> SavePhase {
        let Some(triggered_at) = self.triggered_at else {
            return SavePhase::Idle;
        };

        let elapsed = now.saturating_duration_since(triggered_at);
        if elapsed < SAVING_HOLD {
            SavePhase::Saving
        } else if elapsed < SAVING_HOLD + SAVED_HOLD {
            SavePhase::Saved
        } else {
            SavePhase::Idle
        }
    }
}
