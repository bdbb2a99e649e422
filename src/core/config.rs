//! Clock configuration types.
//!
//! - `IncrementMode`: what happens around a turn (nothing, a Fischer-style
//!   increment afterwards, or a grace delay before the clock runs)
//! - `TurnDirection`: which way the turn travels around the table
//! - `ClockConfig`: combines all configuration read by the turn engine
//!
//! The fixed bonuses for running out of time and for reviving a timed-out
//! seat live here as constants. They are independent of the configurable
//! knockout and reinstatement bonuses.

use serde::{Deserialize, Serialize};

/// Fewest seats a table can have.
pub const MIN_SEATS: usize = 2;

/// Most seats a table can have.
pub const MAX_SEATS: usize = 8;

/// Seat count used when a requested count is unusable.
pub const DEFAULT_SEATS: usize = 4;

/// Starting time per seat: 5:00.
pub const DEFAULT_INITIAL_MS: u64 = 300_000;

/// Granted to every seat whenever the active seat runs out of time.
pub const OUT_OF_TIME_BONUS_MS: u64 = 60_000;

/// Granted to a single timed-out seat when it is revived.
pub const REVIVE_BONUS_MS: u64 = 60_000;

/// Clamp a requested seat count into `MIN_SEATS..=MAX_SEATS`.
#[must_use]
pub fn clamp_seat_count(requested: i64) -> usize {
    let clamped = requested.clamp(MIN_SEATS as i64, MAX_SEATS as i64);
    usize::try_from(clamped).unwrap_or(DEFAULT_SEATS)
}

/// Per-turn time control.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IncrementMode {
    /// Plain countdown.
    #[default]
    None,
    /// Add `increment_ms` to a seat after it completes its turn.
    Increment,
    /// Count down `increment_ms` of grace before the seat's own clock runs.
    Delay,
}

impl IncrementMode {
    /// Stable name used for persisted settings and snapshots.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            IncrementMode::None => "none",
            IncrementMode::Increment => "increment",
            IncrementMode::Delay => "delay",
        }
    }

    /// Parse a stored mode name. Unknown names yield `None`.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim() {
            "none" => Some(IncrementMode::None),
            "increment" => Some(IncrementMode::Increment),
            "delay" => Some(IncrementMode::Delay),
            _ => None,
        }
    }
}

impl std::fmt::Display for IncrementMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Direction the turn travels through the seating order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnDirection {
    /// Clockwise.
    #[default]
    Forward,
    /// Counter-clockwise.
    Reverse,
}

impl TurnDirection {
    /// The opposite direction.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            TurnDirection::Forward => TurnDirection::Reverse,
            TurnDirection::Reverse => TurnDirection::Forward,
        }
    }
}

/// Complete clock configuration.
///
/// Built from persisted settings at startup, mutated by settings actions,
/// and read by the turn engine on every turn.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClockConfig {
    /// Per-turn time control.
    pub increment_mode: IncrementMode,

    /// Increment added after a turn, or delay length before the clock runs.
    pub increment_ms: u64,

    /// Granted to every seat when any seat is newly knocked out.
    pub ko_bonus_ms: u64,

    /// Granted to a seat when it is reinstated after a knockout.
    pub reinstate_bonus_ms: u64,

    /// Turn direction.
    pub direction: TurnDirection,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            increment_mode: IncrementMode::None,
            increment_ms: 2_000,
            ko_bonus_ms: 60_000,
            reinstate_bonus_ms: 0,
            direction: TurnDirection::Forward,
        }
    }
}

impl ClockConfig {
    /// Set the increment mode and length.
    #[must_use]
    pub fn with_increment(mut self, mode: IncrementMode, ms: u64) -> Self {
        self.increment_mode = mode;
        self.increment_ms = ms;
        self
    }

    /// Set the knockout bonus.
    #[must_use]
    pub fn with_ko_bonus(mut self, ms: u64) -> Self {
        self.ko_bonus_ms = ms;
        self
    }

    /// Set the reinstatement bonus.
    #[must_use]
    pub fn with_reinstate_bonus(mut self, ms: u64) -> Self {
        self.reinstate_bonus_ms = ms;
        self
    }

    /// Set the turn direction.
    #[must_use]
    pub fn with_direction(mut self, direction: TurnDirection) -> Self {
        self.direction = direction;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClockConfig::default();

        assert_eq!(config.increment_mode, IncrementMode::None);
        assert_eq!(config.increment_ms, 2_000);
        assert_eq!(config.ko_bonus_ms, 60_000);
        assert_eq!(config.reinstate_bonus_ms, 0);
        assert_eq!(config.direction, TurnDirection::Forward);
    }

    #[test]
    fn test_builder_pattern() {
        let config = ClockConfig::default()
            .with_increment(IncrementMode::Delay, 5_000)
            .with_ko_bonus(30_000)
            .with_reinstate_bonus(10_000)
            .with_direction(TurnDirection::Reverse);

        assert_eq!(config.increment_mode, IncrementMode::Delay);
        assert_eq!(config.increment_ms, 5_000);
        assert_eq!(config.ko_bonus_ms, 30_000);
        assert_eq!(config.reinstate_bonus_ms, 10_000);
        assert_eq!(config.direction, TurnDirection::Reverse);
    }

    #[test]
    fn test_mode_names() {
        for mode in [IncrementMode::None, IncrementMode::Increment, IncrementMode::Delay] {
            assert_eq!(IncrementMode::from_name(mode.as_str()), Some(mode));
        }
        assert_eq!(IncrementMode::from_name("bronstein"), None);
    }

    #[test]
    fn test_direction_toggle() {
        assert_eq!(TurnDirection::Forward.toggled(), TurnDirection::Reverse);
        assert_eq!(TurnDirection::Reverse.toggled(), TurnDirection::Forward);
    }

    #[test]
    fn test_clamp_seat_count() {
        assert_eq!(clamp_seat_count(-3), MIN_SEATS);
        assert_eq!(clamp_seat_count(5), 5);
        assert_eq!(clamp_seat_count(40), MAX_SEATS);
    }

    #[test]
    fn test_serialization() {
        let config = ClockConfig::default().with_increment(IncrementMode::Increment, 3_000);
        let json = serde_json::to_string(&config).unwrap();

        assert!(json.contains("\"increment\""));
        let deserialized: ClockConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }
}
