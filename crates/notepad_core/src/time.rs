//! Timestamp primitive and relative-time labels.
//!
//! # Responsibility
//! - Define the epoch-millisecond timestamp carried by every note.
//! - Produce the short "5m ago" labels the note list renders.
//!
//! # Invariants
//! - `Timestamp` serializes as a bare integer (epoch milliseconds).
//! - Relative labels never go negative; future instants read as `just now`.

use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// Epoch-millisecond wall-clock timestamp.
///
/// Kept as a newtype so note fields and the storage blob share one integer
/// representation.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Timestamp(pub i64);

impl Timestamp {
    /// Returns the current wall-clock time.
    ///
    /// Clocks before the Unix epoch collapse to zero instead of panicking.
    pub fn now() -> Self {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_millis() as i64)
            .unwrap_or(0);
        Self(millis)
    }

    /// Raw epoch milliseconds.
    pub fn as_millis(self) -> i64 {
        self.0
    }
}

/// Formats the distance from `then` to `now` as a short relative label.
///
/// Buckets: under a minute collapses to `just now`, then minutes, hours,
/// days, weeks (under 4), 30-day months and 365-day years.
pub fn format_distance_to_now(then: Timestamp, now: Timestamp) -> String {
    let seconds = (now.0 - then.0).max(0) / 1000;
    if seconds < 60 {
        return "just now".to_string();
    }

    let minutes = seconds / 60;
    if minutes < 60 {
        return format!("{minutes}m ago");
    }

    let hours = minutes / 60;
    if hours < 24 {
        return format!("{hours}h ago");
    }

    let days = hours / 24;
    if days < 7 {
        return format!("{days}d ago");
    }

    let weeks = days / 7;
    if weeks < 4 {
        return format!("{weeks}w ago");
    }

    let months = days / 30;
    if months < 12 {
        return format!("{months}mo ago");
    }

    let years = days / 365;
    format!("{years}y ago")
}
