//! Game clock for the Foundry simulation.
//!
//! The clock is the single source of truth for simulated time. It holds
//! the day counter, which starts at 1 and only ever moves forward. One
//! tick of the game loop advances the clock by exactly one day; there is
//! no pause, no rewind, and no catch-up for missed ticks.

/// Errors that can occur during clock operations.
#[derive(Debug, thiserror::Error)]
pub enum ClockError {
    /// Day counter would overflow.
    #[error("day counter overflow: cannot advance beyond u64::MAX")]
    DayOverflow,
}

/// The station's day counter.
///
/// Advances once per tick of the game loop. All log entries and process
/// transitions read the current day from here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameClock {
    /// Current simulated day (1-indexed).
    day: u64,
}

impl GameClock {
    /// Create a new clock starting at day 1.
    pub const fn new() -> Self {
        Self { day: 1 }
    }

    /// Restore a clock at an explicit day (useful for testing).
    pub const fn at_day(day: u64) -> Self {
        Self { day }
    }

    /// Advance the clock by one day. Returns the new day number.
    ///
    /// # Errors
    ///
    /// Returns [`ClockError::DayOverflow`] if the counter would exceed
    /// `u64::MAX`.
    pub fn advance(&mut self) -> Result<u64, ClockError> {
        self.day = self.day.checked_add(1).ok_or(ClockError::DayOverflow)?;
        Ok(self.day)
    }

    /// Return the current day number.
    pub const fn day(&self) -> u64 {
        self.day
    }
}

impl Default for GameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn clock_starts_at_day_one() {
        let clock = GameClock::new();
        assert_eq!(clock.day(), 1);
    }

    #[test]
    fn clock_advances_monotonically() {
        let mut clock = GameClock::new();
        assert_eq!(clock.advance().unwrap(), 2);
        assert_eq!(clock.advance().unwrap(), 3);
        assert_eq!(clock.day(), 3);
    }

    #[test]
    fn clock_overflow_is_an_error() {
        let mut clock = GameClock::at_day(u64::MAX);
        assert!(clock.advance().is_err());
        // The counter is left untouched on failure.
        assert_eq!(clock.day(), u64::MAX);
    }
}
