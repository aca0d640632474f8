use serde::{Deserialize, Serialize};

/// Regulation period length: 10 minutes.
pub const DEFAULT_PERIOD_SECONDS: u32 = 600;

/// Countdown game clock. The embedding event loop ticks it once per second;
/// the ledger reads [`GameClock::formatted`] when stamping entries. The
/// stamp is advisory metadata: no recording invariant depends on it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GameClock {
    remaining_seconds: u32,
    period_length_seconds: u32,
}

impl Default for GameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl GameClock {
    pub fn new() -> Self {
        Self::with_period_length(DEFAULT_PERIOD_SECONDS)
    }

    pub fn with_period_length(period_length_seconds: u32) -> Self {
        Self { remaining_seconds: period_length_seconds, period_length_seconds }
    }

    /// One-second tick. Saturates at 0:00.
    pub fn tick(&mut self) {
        self.remaining_seconds = self.remaining_seconds.saturating_sub(1);
    }

    pub fn remaining_seconds(&self) -> u32 {
        self.remaining_seconds
    }

    pub fn period_length_seconds(&self) -> u32 {
        self.period_length_seconds
    }

    pub fn is_expired(&self) -> bool {
        self.remaining_seconds == 0
    }

    /// Manual correction from the scorekeeper. Capped at the period length.
    pub fn set_remaining(&mut self, seconds: u32) {
        self.remaining_seconds = seconds.min(self.period_length_seconds);
    }

    /// Rewind to the full period length (start of a new period).
    pub fn reset(&mut self) {
        self.remaining_seconds = self.period_length_seconds;
    }

    /// "MM:SS" display string stamped onto ledger entries.
    pub fn formatted(&self) -> String {
        format!("{:02}:{:02}", self.remaining_seconds / 60, self.remaining_seconds % 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_clock_shows_full_period() {
        let clock = GameClock::new();
        assert_eq!(clock.formatted(), "10:00");
        assert!(!clock.is_expired());
    }

    #[test]
    fn test_tick_counts_down_and_formats() {
        let mut clock = GameClock::with_period_length(65);
        clock.tick();
        assert_eq!(clock.formatted(), "01:04");
        assert_eq!(clock.remaining_seconds(), 64);
    }

    #[test]
    fn test_tick_saturates_at_zero() {
        let mut clock = GameClock::with_period_length(1);
        clock.tick();
        clock.tick();
        assert_eq!(clock.remaining_seconds(), 0);
        assert!(clock.is_expired());
        assert_eq!(clock.formatted(), "00:00");
    }

    #[test]
    fn test_set_remaining_caps_at_period_length() {
        let mut clock = GameClock::with_period_length(600);
        clock.set_remaining(9_999);
        assert_eq!(clock.remaining_seconds(), 600);

        clock.set_remaining(83);
        assert_eq!(clock.formatted(), "01:23");
    }

    #[test]
    fn test_reset_restores_full_period() {
        let mut clock = GameClock::with_period_length(720);
        clock.tick();
        clock.tick();
        clock.reset();
        assert_eq!(clock.remaining_seconds(), 720);
    }
}
