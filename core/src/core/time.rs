//! Time management for the settlement engine
//!
//! The engine operates on wall-clock seconds. Time is read exclusively
//! through a [`Clock`] owned by the engine, so the host environment (or a
//! test) controls advancement deterministically. Pausing the engine does NOT
//! stop the clock: payment due times are compared against wall-clock time.

use serde::{Deserialize, Serialize};

/// Deterministic wall-clock, in whole seconds
///
/// # Example
/// ```
/// use payroll_core_rs::Clock;
///
/// let mut clock = Clock::new(1_700_000_000);
/// assert_eq!(clock.now(), 1_700_000_000);
///
/// clock.advance(86_400);
/// assert_eq!(clock.now(), 1_700_086_400);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Clock {
    /// Current time in seconds since the unix epoch
    now: u64,
}

impl Clock {
    /// Create a clock starting at the given timestamp (seconds)
    pub fn new(start: u64) -> Self {
        Self { now: start }
    }

    /// Current timestamp in seconds
    pub fn now(&self) -> u64 {
        self.now
    }

    /// Advance time by `secs` seconds
    pub fn advance(&mut self, secs: u64) {
        self.now += secs;
    }

    /// Set the clock to an absolute timestamp
    ///
    /// # Panics
    /// Panics if `at` is earlier than the current time. Time never moves
    /// backwards.
    pub fn set(&mut self, at: u64) {
        assert!(at >= self.now, "clock cannot move backwards");
        self.now = at;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_accumulates() {
        let mut clock = Clock::new(100);
        clock.advance(50);
        clock.advance(25);
        assert_eq!(clock.now(), 175);
    }

    #[test]
    fn test_set_forward() {
        let mut clock = Clock::new(100);
        clock.set(500);
        assert_eq!(clock.now(), 500);
    }

    #[test]
    #[should_panic(expected = "clock cannot move backwards")]
    fn test_set_backwards_panics() {
        let mut clock = Clock::new(100);
        clock.set(99);
    }
}
