//! Millisecond wall-clock helpers.

use std::time::{SystemTime, UNIX_EPOCH};

/// Milliseconds since the Unix epoch.
#[must_use]
pub fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}

/// A strictly increasing millisecond counter.
///
/// Follows the wall clock while it moves forward; when two ticks land in the
/// same millisecond (or the clock steps backwards) the counter advances by
/// one instead, so successive values never repeat.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MonotonicMillis {
    last: u64,
}

impl MonotonicMillis {
    /// Creates a counter that has not ticked yet.
    #[must_use]
    pub const fn new() -> Self {
        Self { last: 0 }
    }

    /// Creates a counter whose next tick is strictly after `last`.
    #[must_use]
    pub const fn starting_after(last: u64) -> Self {
        Self { last }
    }

    /// Returns the last value handed out (0 before the first tick).
    #[must_use]
    pub const fn last(&self) -> u64 {
        self.last
    }

    /// Advances the counter and returns the new value.
    pub fn tick(&mut self) -> u64 {
        self.tick_at(now_millis())
    }

    /// Advances the counter against an explicit wall-clock reading.
    pub fn tick_at(&mut self, now: u64) -> u64 {
        self.last = if now > self.last {
            now
        } else {
            self.last.saturating_add(1)
        };
        self.last
    }
}
