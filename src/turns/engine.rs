//! Turn engine: whose clock runs, how time is spent, and who goes next.
//!
//! The engine owns every seat's clock, the active seat, the pending delay
//! and the running flag. All operations are synchronous and total: bad
//! seat indices are ignored and time is clamped at zero rather than
//! reported as an error.
//!
//! ## Turn rules
//!
//! - Only the active seat's time is consumed, and only while running.
//! - Under `Delay`, each activation arms a grace countdown that must run
//!   out before the seat's own clock moves.
//! - Under `Increment`, passing the turn rewards the outgoing seat.
//! - Running out of time grants a fixed minute to the whole table and
//!   moves the turn on.
//! - A new knockout grants the configured bonus to the whole table.
//!
//! Eligibility is evaluated fresh on every call; no "next" pointer is
//! cached across mutations.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::core::seating::{self, SeatOrder};
use crate::core::{
    clamp_seat_count, ClockConfig, IncrementMode, PlayerState, SeatId, SeatMap, TurnDirection,
    MAX_SEATS, MIN_SEATS, OUT_OF_TIME_BONUS_MS, REVIVE_BONUS_MS,
};

/// Externally visible state of one seat.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SeatStatus {
    /// Clock is (or would be, once started) running for this seat.
    Active,
    /// Eligible, waiting for the turn.
    Waiting,
    /// Eliminated by an explicit knockout.
    KnockedOut,
    /// No time left and not knocked out. Can be revived.
    TimedOut,
}

/// What a single `advance` call did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// The clock is stopped; nothing happened.
    Idle,
    /// The delay countdown absorbed the tick.
    Delayed {
        /// Delay still pending.
        remaining_ms: u64,
    },
    /// Time was taken from the active seat.
    Consumed {
        /// The seat that was charged.
        seat: SeatId,
        /// Its remaining time.
        ms_left: u64,
    },
    /// The active seat ran out of time; the table got the out-of-time bonus.
    TimedOut {
        /// The seat that ran out.
        seat: SeatId,
        /// The seat that took over, if any.
        next: Option<SeatId>,
    },
    /// The active seat was ineligible and the turn was handed on.
    Reassigned {
        /// The newly active seat.
        seat: SeatId,
    },
    /// No eligible seat remains; the clock was stopped.
    Stopped,
}

/// Result of toggling a knockout.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KnockToggle {
    /// The seat was newly knocked out.
    KnockedOut,
    /// The seat was reinstated.
    Reinstated,
}

/// The turn/clock state machine.
///
/// ## Example
///
/// ```
/// use table_clock::core::{ClockConfig, SeatId};
/// use table_clock::turns::TurnEngine;
///
/// let mut engine = TurnEngine::new(4, 300_000, ClockConfig::default());
/// engine.start();
/// engine.advance(1_000);
/// assert_eq!(engine.seat(SeatId::new(0)).unwrap().ms_left, 299_000);
///
/// engine.pass(None);
/// assert_eq!(engine.active(), SeatId::new(2)); // serpentine: 0 2 3 1
/// ```
#[derive(Clone, Debug, Serialize)]
pub struct TurnEngine {
    config: ClockConfig,
    seats: SeatMap<PlayerState>,
    active: SeatId,
    current_delay_ms: u64,
    running: bool,
}

impl TurnEngine {
    /// Create an engine with `seat_count` fresh seats (clamped to 2..=8),
    /// each holding `initial_ms`. Seat 0 is active and the clock is stopped.
    #[must_use]
    pub fn new(seat_count: usize, initial_ms: u64, config: ClockConfig) -> Self {
        let seat_count = clamp_seat_count(i64::try_from(seat_count).unwrap_or(i64::MAX));
        let mut engine = Self {
            config,
            seats: SeatMap::new(seat_count, |seat| PlayerState::new(seat, initial_ms)),
            active: SeatId::new(0),
            current_delay_ms: 0,
            running: false,
        };
        engine.activate(SeatId::new(0));
        engine
    }

    /// Rebuild an engine from restored seats.
    ///
    /// Extra seats beyond the table maximum are dropped and a short table
    /// is padded with fresh seats holding no time. `active_index` is
    /// clamped into range. The active seat is set even if it is knocked
    /// out; the next tick will hand the turn on.
    #[must_use]
    pub fn from_parts(config: ClockConfig, mut players: Vec<PlayerState>, active_index: usize) -> Self {
        players.truncate(MAX_SEATS);
        while players.len() < MIN_SEATS {
            let seat = SeatId::from_index(players.len()).unwrap_or_default();
            players.push(PlayerState::new(seat, 0));
        }
        let last = players.len() - 1;
        let active = SeatId::from_index(active_index.min(last)).unwrap_or_default();
        let mut engine = Self {
            config,
            seats: SeatMap::from_vec(players),
            active,
            current_delay_ms: 0,
            running: false,
        };
        engine.make_active(active);
        engine
    }

    // === Reads ===

    /// Current configuration.
    #[must_use]
    pub fn config(&self) -> &ClockConfig {
        &self.config
    }

    /// Number of seats at the table.
    #[must_use]
    pub fn seat_count(&self) -> usize {
        self.seats.seat_count()
    }

    /// All seats.
    #[must_use]
    pub fn seats(&self) -> &SeatMap<PlayerState> {
        &self.seats
    }

    /// One seat, if it exists.
    #[must_use]
    pub fn seat(&self, seat: SeatId) -> Option<&PlayerState> {
        self.seats.get(seat)
    }

    /// The seat whose clock runs.
    #[must_use]
    pub fn active(&self) -> SeatId {
        self.active
    }

    /// Delay still pending before the active seat's own clock runs.
    #[must_use]
    pub fn current_delay_ms(&self) -> u64 {
        self.current_delay_ms
    }

    /// Whether ticks are consuming time.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Current turn order.
    #[must_use]
    pub fn order(&self) -> SeatOrder {
        seating::compute_order(self.seats.seat_count(), self.config.direction)
    }

    /// Whether a seat exists and can take the turn.
    #[must_use]
    pub fn is_eligible(&self, seat: SeatId) -> bool {
        self.seats.get(seat).is_some_and(PlayerState::is_eligible)
    }

    /// Status of a seat for rendering.
    #[must_use]
    pub fn status(&self, seat: SeatId) -> Option<SeatStatus> {
        let player = self.seats.get(seat)?;
        let status = if player.knocked {
            SeatStatus::KnockedOut
        } else if player.is_out() {
            SeatStatus::TimedOut
        } else if seat == self.active {
            SeatStatus::Active
        } else {
            SeatStatus::Waiting
        };
        Some(status)
    }

    /// The seat `pass(None)` would activate, without changing anything.
    #[must_use]
    pub fn peek_next(&self) -> Option<SeatId> {
        self.find_next(self.active)
    }

    // === Running ===

    /// Start consuming time. Idempotent.
    pub fn start(&mut self) {
        if !self.running {
            self.running = true;
            debug!(active = %self.active, "Clock started");
        }
    }

    /// Stop consuming time. Idempotent.
    pub fn stop(&mut self) {
        if self.running {
            self.running = false;
            debug!(active = %self.active, "Clock stopped");
        }
    }

    /// Start if stopped, stop if running.
    pub fn toggle_running(&mut self) {
        if self.running {
            self.stop();
        } else {
            self.start();
        }
    }

    /// Apply `delta_ms` of elapsed time.
    pub fn advance(&mut self, delta_ms: u64) -> TickOutcome {
        if !self.running {
            return TickOutcome::Idle;
        }

        let seat = self.active;
        if !self.is_eligible(seat) {
            return match self.find_next(seat) {
                Some(next) => {
                    self.activate(next);
                    debug!(from = %seat, to = %next, "Ineligible active seat reassigned");
                    TickOutcome::Reassigned { seat: next }
                }
                None => {
                    self.stop();
                    TickOutcome::Stopped
                }
            };
        }

        if self.config.increment_mode == IncrementMode::Delay && self.current_delay_ms > 0 {
            self.current_delay_ms = self.current_delay_ms.saturating_sub(delta_ms);
            return TickOutcome::Delayed {
                remaining_ms: self.current_delay_ms,
            };
        }

        let ms_left = match self.seats.get_mut(seat) {
            Some(player) => {
                player.ms_left = player.ms_left.saturating_sub(delta_ms);
                player.ms_left
            }
            None => return TickOutcome::Idle,
        };
        if ms_left > 0 {
            return TickOutcome::Consumed { seat, ms_left };
        }

        info!(%seat, bonus_ms = OUT_OF_TIME_BONUS_MS, "Seat ran out of time");
        self.grant_all(OUT_OF_TIME_BONUS_MS);
        let next = self.pass(None);
        TickOutcome::TimedOut { seat, next }
    }

    // === Turn changes ===

    /// End the active seat's turn.
    ///
    /// Under `Increment`, the outgoing seat is credited first if it is still
    /// eligible. Then `target` is activated if it is eligible, otherwise the
    /// next eligible seat in turn order. With nobody eligible the clock
    /// stops and `None` is returned.
    pub fn pass(&mut self, target: Option<SeatId>) -> Option<SeatId> {
        if self.config.increment_mode == IncrementMode::Increment {
            let increment = self.config.increment_ms;
            if let Some(player) = self.seats.get_mut(self.active) {
                if player.is_eligible() {
                    player.grant(increment);
                }
            }
        }

        let next = target
            .filter(|&seat| self.is_eligible(seat))
            .or_else(|| self.find_next(self.active));

        match next {
            Some(seat) => {
                debug!(from = %self.active, to = %seat, "Turn passed");
                self.activate(seat);
                Some(seat)
            }
            None => {
                debug!("No eligible seat left");
                self.stop();
                None
            }
        }
    }

    /// Make a seat active directly. Ignored for knocked-out or missing seats.
    pub fn make_active(&mut self, seat: SeatId) -> bool {
        match self.seats.get(seat) {
            Some(player) if !player.knocked => {
                self.activate(seat);
                true
            }
            _ => false,
        }
    }

    /// Toggle a knockout.
    ///
    /// A new knockout grants the configured bonus to every seat, the
    /// knocked one included, and hands the turn on if that seat was active.
    /// A reinstatement grants the reinstatement bonus to that seat only.
    pub fn knock_out(&mut self, seat: SeatId) -> Option<KnockToggle> {
        let reinstate_bonus = self.config.reinstate_bonus_ms;
        let player = self.seats.get_mut(seat)?;

        if player.knocked {
            player.knocked = false;
            player.grant(reinstate_bonus);
            info!(%seat, bonus_ms = reinstate_bonus, "Seat reinstated");
            return Some(KnockToggle::Reinstated);
        }

        player.knocked = true;
        let ko_bonus = self.config.ko_bonus_ms;
        self.grant_all(ko_bonus);
        info!(%seat, bonus_ms = ko_bonus, "Seat knocked out");

        if seat == self.active {
            self.pass(None);
        }
        Some(KnockToggle::KnockedOut)
    }

    /// Give a timed-out seat a fresh minute. Ignored for any other seat.
    pub fn revive(&mut self, seat: SeatId) -> bool {
        match self.seats.get_mut(seat) {
            Some(player) if player.is_out() => {
                player.grant(REVIVE_BONUS_MS);
                debug!(%seat, "Seat revived");
                true
            }
            _ => false,
        }
    }

    // === Time edits ===

    /// Shift a seat's time by a signed amount, clamping at zero.
    pub fn adjust_time(&mut self, seat: SeatId, delta_ms: i64) -> bool {
        match self.seats.get_mut(seat) {
            Some(player) => {
                player.adjust(delta_ms);
                true
            }
            None => false,
        }
    }

    /// Set a seat's remaining time.
    pub fn set_time(&mut self, seat: SeatId, ms: u64) -> bool {
        match self.seats.get_mut(seat) {
            Some(player) => {
                player.ms_left = ms;
                true
            }
            None => false,
        }
    }

    /// Set every seat's remaining time.
    pub fn set_all_times(&mut self, ms: u64) {
        for player in self.seats.values_mut() {
            player.ms_left = ms;
        }
    }

    /// Stop, put every seat back to `initial_ms`, clear knockouts and
    /// activate seat 0. Names are kept.
    pub fn reset(&mut self, initial_ms: u64) {
        self.stop();
        for player in self.seats.values_mut() {
            player.ms_left = initial_ms;
            player.knocked = false;
        }
        self.activate(SeatId::new(0));
    }

    /// Replace the table with `seat_count` fresh seats (clamped to 2..=8).
    /// Configuration survives; names and times do not.
    pub fn reseat(&mut self, seat_count: usize, initial_ms: u64) {
        let seat_count = clamp_seat_count(i64::try_from(seat_count).unwrap_or(i64::MAX));
        self.stop();
        self.seats = SeatMap::new(seat_count, |seat| PlayerState::new(seat, initial_ms));
        self.activate(SeatId::new(0));
        info!(seat_count, "Table reseated");
    }

    /// Rename a seat. Blank names fall back to the seat default.
    /// Returns the name actually stored.
    pub fn rename(&mut self, seat: SeatId, name: &str) -> Option<&str> {
        let player = self.seats.get_mut(seat)?;
        player.name = PlayerState::sanitize_name(seat, name);
        Some(player.name.as_str())
    }

    // === Settings ===

    /// Change the increment mode and length.
    ///
    /// Switching to `Delay` re-arms the delay for the active seat.
    pub fn set_increment(&mut self, mode: IncrementMode, ms: u64) {
        self.config.increment_mode = mode;
        self.config.increment_ms = ms;
        self.current_delay_ms = if mode == IncrementMode::Delay { ms } else { 0 };
    }

    /// Change the knockout bonus.
    pub fn set_ko_bonus(&mut self, ms: u64) {
        self.config.ko_bonus_ms = ms;
    }

    /// Change the reinstatement bonus.
    pub fn set_reinstate_bonus(&mut self, ms: u64) {
        self.config.reinstate_bonus_ms = ms;
    }

    /// Change the turn direction.
    pub fn set_direction(&mut self, direction: TurnDirection) {
        self.config.direction = direction;
    }

    /// Flip the turn direction, returning the new one.
    pub fn toggle_direction(&mut self) -> TurnDirection {
        self.config.direction = self.config.direction.toggled();
        self.config.direction
    }

    // === Internals ===

    fn activate(&mut self, seat: SeatId) {
        self.active = seat;
        self.current_delay_ms = match self.config.increment_mode {
            IncrementMode::Delay => self.config.increment_ms,
            _ => 0,
        };
    }

    fn grant_all(&mut self, ms: u64) {
        for player in self.seats.values_mut() {
            player.grant(ms);
        }
    }

    fn find_next(&self, from: SeatId) -> Option<SeatId> {
        seating::next_after(&self.order(), from, |seat| self.is_eligible(seat))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seat(i: u8) -> SeatId {
        SeatId::new(i)
    }

    fn ms(engine: &TurnEngine, i: u8) -> u64 {
        engine.seat(seat(i)).unwrap().ms_left
    }

    #[test]
    fn test_new_engine() {
        let engine = TurnEngine::new(4, 300_000, ClockConfig::default());

        assert_eq!(engine.seat_count(), 4);
        assert_eq!(engine.active(), seat(0));
        assert!(!engine.is_running());
        assert_eq!(engine.status(seat(0)), Some(SeatStatus::Active));
        assert_eq!(engine.status(seat(1)), Some(SeatStatus::Waiting));
    }

    #[test]
    fn test_seat_count_is_clamped() {
        assert_eq!(TurnEngine::new(1, 1_000, ClockConfig::default()).seat_count(), 2);
        assert_eq!(TurnEngine::new(20, 1_000, ClockConfig::default()).seat_count(), 8);
    }

    #[test]
    fn test_advance_idle_when_stopped() {
        let mut engine = TurnEngine::new(2, 10_000, ClockConfig::default());

        assert_eq!(engine.advance(5_000), TickOutcome::Idle);
        assert_eq!(ms(&engine, 0), 10_000);
    }

    #[test]
    fn test_advance_consumes_active_only() {
        let mut engine = TurnEngine::new(3, 10_000, ClockConfig::default());
        engine.start();

        let outcome = engine.advance(2_500);

        assert_eq!(outcome, TickOutcome::Consumed { seat: seat(0), ms_left: 7_500 });
        assert_eq!(ms(&engine, 1), 10_000);
        assert_eq!(ms(&engine, 2), 10_000);
    }

    #[test]
    fn test_delay_absorbs_ticks_first() {
        let config = ClockConfig::default().with_increment(IncrementMode::Delay, 3_000);
        let mut engine = TurnEngine::new(2, 10_000, config);
        engine.start();

        assert_eq!(engine.advance(2_000), TickOutcome::Delayed { remaining_ms: 1_000 });
        // Excess beyond the delay is discarded, not charged.
        assert_eq!(engine.advance(2_000), TickOutcome::Delayed { remaining_ms: 0 });
        assert_eq!(ms(&engine, 0), 10_000);

        engine.advance(1_000);
        assert_eq!(ms(&engine, 0), 9_000);
    }

    #[test]
    fn test_delay_rearms_on_activation() {
        let config = ClockConfig::default().with_increment(IncrementMode::Delay, 3_000);
        let mut engine = TurnEngine::new(2, 10_000, config);
        engine.start();
        engine.advance(3_000);
        assert_eq!(engine.current_delay_ms(), 0);

        engine.pass(None);
        assert_eq!(engine.current_delay_ms(), 3_000);
    }

    #[test]
    fn test_time_out_grants_table_and_passes() {
        let mut engine = TurnEngine::new(4, 300_000, ClockConfig::default());
        engine.start();

        let outcome = engine.advance(301_000);

        assert_eq!(outcome, TickOutcome::TimedOut { seat: seat(0), next: Some(seat(2)) });
        assert_eq!(ms(&engine, 0), 60_000);
        assert_eq!(ms(&engine, 1), 360_000);
        assert_eq!(ms(&engine, 2), 360_000);
        assert_eq!(ms(&engine, 3), 360_000);
        assert_eq!(engine.active(), seat(2));
        assert!(engine.is_running());
    }

    #[test]
    fn test_increment_on_pass() {
        let config = ClockConfig::default().with_increment(IncrementMode::Increment, 2_000);
        let mut engine = TurnEngine::new(4, 4_000, config);

        let next = engine.pass(None);

        assert_eq!(ms(&engine, 0), 6_000);
        assert_eq!(next, Some(seat(2)));
    }

    #[test]
    fn test_pass_to_explicit_target() {
        let mut engine = TurnEngine::new(4, 10_000, ClockConfig::default());

        assert_eq!(engine.pass(Some(seat(3))), Some(seat(3)));
        assert_eq!(engine.active(), seat(3));
    }

    #[test]
    fn test_pass_to_ineligible_target_falls_back() {
        let mut engine = TurnEngine::new(4, 10_000, ClockConfig::default());
        engine.set_time(seat(3), 0);

        assert_eq!(engine.pass(Some(seat(3))), Some(seat(2)));
        assert_eq!(engine.pass(Some(seat(42))), Some(seat(1)));
    }

    #[test]
    fn test_pass_with_nobody_eligible_stops() {
        let mut engine = TurnEngine::new(2, 10_000, ClockConfig::default());
        engine.start();
        engine.set_all_times(0);

        assert_eq!(engine.pass(None), None);
        assert!(!engine.is_running());
        assert_eq!(engine.active(), seat(0));
    }

    #[test]
    fn test_make_active_ignores_knocked() {
        let mut engine = TurnEngine::new(3, 10_000, ClockConfig::default());
        engine.knock_out(seat(2));

        assert!(!engine.make_active(seat(2)));
        assert!(engine.make_active(seat(1)));
        assert_eq!(engine.active(), seat(1));
        assert!(!engine.make_active(seat(9)));
    }

    #[test]
    fn test_knock_out_grants_everyone() {
        let mut engine = TurnEngine::new(4, 120_000, ClockConfig::default());

        assert_eq!(engine.knock_out(seat(2)), Some(KnockToggle::KnockedOut));

        for i in 0..4 {
            assert_eq!(ms(&engine, i), 180_000);
        }
        assert_eq!(engine.status(seat(2)), Some(SeatStatus::KnockedOut));
        assert_eq!(engine.active(), seat(0));
    }

    #[test]
    fn test_knock_out_active_passes() {
        let mut engine = TurnEngine::new(4, 120_000, ClockConfig::default());
        engine.make_active(seat(2));

        engine.knock_out(seat(2));

        assert_eq!(engine.active(), seat(3));
    }

    #[test]
    fn test_reinstate_grants_only_that_seat() {
        let config = ClockConfig::default().with_reinstate_bonus(30_000);
        let mut engine = TurnEngine::new(3, 100_000, config);
        engine.knock_out(seat(1));

        assert_eq!(engine.knock_out(seat(1)), Some(KnockToggle::Reinstated));

        assert_eq!(ms(&engine, 0), 160_000);
        assert_eq!(ms(&engine, 1), 190_000);
        assert_eq!(ms(&engine, 2), 160_000);
        assert!(!engine.seat(seat(1)).unwrap().knocked);
    }

    #[test]
    fn test_knock_toggle_keeps_running_flag() {
        let mut engine = TurnEngine::new(3, 100_000, ClockConfig::default());
        engine.start();
        engine.knock_out(seat(1));
        assert!(engine.is_running());
        engine.knock_out(seat(1));
        assert!(engine.is_running());
    }

    #[test]
    fn test_revive_only_when_timed_out() {
        let mut engine = TurnEngine::new(3, 100_000, ClockConfig::default());

        assert!(!engine.revive(seat(1)));
        assert_eq!(ms(&engine, 1), 100_000);

        engine.set_time(seat(1), 0);
        assert_eq!(engine.status(seat(1)), Some(SeatStatus::TimedOut));
        assert!(engine.revive(seat(1)));
        assert_eq!(ms(&engine, 1), 60_000);
        assert_eq!(ms(&engine, 0), 100_000);

        engine.set_time(seat(2), 0);
        engine.knock_out(seat(2));
        let before = ms(&engine, 2);
        assert!(!engine.revive(seat(2)));
        assert_eq!(ms(&engine, 2), before);
    }

    #[test]
    fn test_advance_reassigns_knocked_active() {
        let mut engine = TurnEngine::new(3, 100_000, ClockConfig::default());
        engine.active = seat(1);
        engine.seats[seat(1)].knocked = true;
        engine.start();

        assert_eq!(engine.advance(1_000), TickOutcome::Reassigned { seat: seat(0) });
        assert_eq!(ms(&engine, 0), 100_000);
    }

    #[test]
    fn test_advance_stops_when_nobody_eligible() {
        let mut engine = TurnEngine::new(2, 100_000, ClockConfig::default());
        engine.start();
        engine.set_all_times(0);

        assert_eq!(engine.advance(16), TickOutcome::Stopped);
        assert!(!engine.is_running());
    }

    #[test]
    fn test_peek_next_does_not_mutate() {
        let config = ClockConfig::default().with_increment(IncrementMode::Increment, 2_000);
        let engine = TurnEngine::new(4, 10_000, config);

        assert_eq!(engine.peek_next(), Some(seat(2)));
        assert_eq!(engine.active(), seat(0));
        assert_eq!(ms(&engine, 0), 10_000);
    }

    #[test]
    fn test_reverse_direction() {
        let mut engine = TurnEngine::new(4, 10_000, ClockConfig::default());

        assert_eq!(engine.toggle_direction(), TurnDirection::Reverse);
        // Reverse order is 1 3 2 0, so after 0 comes 1.
        assert_eq!(engine.peek_next(), Some(seat(1)));
    }

    #[test]
    fn test_reset_and_reseat() {
        let mut engine = TurnEngine::new(4, 10_000, ClockConfig::default());
        engine.rename(seat(1), "Alice");
        engine.knock_out(seat(1));
        engine.make_active(seat(3));
        engine.start();

        engine.reset(20_000);
        assert!(!engine.is_running());
        assert_eq!(engine.active(), seat(0));
        assert!(!engine.seat(seat(1)).unwrap().knocked);
        assert_eq!(ms(&engine, 1), 20_000);
        assert_eq!(engine.seat(seat(1)).unwrap().name, "Alice");

        engine.set_ko_bonus(5_000);
        engine.reseat(6, 30_000);
        assert_eq!(engine.seat_count(), 6);
        assert_eq!(engine.seat(seat(1)).unwrap().name, "Player 2");
        assert_eq!(engine.config().ko_bonus_ms, 5_000);
    }

    #[test]
    fn test_rename_blank_falls_back() {
        let mut engine = TurnEngine::new(2, 10_000, ClockConfig::default());

        assert_eq!(engine.rename(seat(0), "  Bob  "), Some("Bob"));
        assert_eq!(engine.rename(seat(0), ""), Some("Player 1"));
        assert_eq!(engine.rename(seat(5), "Ghost"), None);
    }

    #[test]
    fn test_from_parts_clamps_active() {
        let players = vec![
            PlayerState::new(seat(0), 1_000),
            PlayerState::new(seat(1), 1_000),
        ];
        let engine = TurnEngine::from_parts(ClockConfig::default(), players, 7);

        assert_eq!(engine.active(), seat(1));
    }

    #[test]
    fn test_from_parts_keeps_table_in_bounds() {
        let engine = TurnEngine::from_parts(ClockConfig::default(), Vec::new(), 3);

        assert_eq!(engine.seat_count(), 2);
        assert_eq!(engine.active(), seat(1));
        assert_eq!(engine.seat(seat(0)).unwrap().name, "Player 1");
        assert_eq!(ms(&engine, 0), 0);

        let crowded: Vec<_> = (0..10).map(|i| PlayerState::new(seat(i % 8), 1_000)).collect();
        let engine = TurnEngine::from_parts(ClockConfig::default(), crowded, 9);

        assert_eq!(engine.seat_count(), 8);
        assert_eq!(engine.active(), seat(7));
    }

    #[test]
    fn test_make_active_leaves_running_unchanged() {
        let mut engine = TurnEngine::new(4, 100_000, ClockConfig::default());

        assert!(engine.make_active(seat(1)));
        assert!(!engine.is_running());

        engine.start();
        assert!(engine.make_active(seat(3)));
        assert!(engine.is_running());
        assert_eq!(engine.active(), seat(3));
    }

    #[test]
    fn test_advance_reassigns_timed_out_active() {
        let mut engine = TurnEngine::new(4, 100_000, ClockConfig::default());
        engine.set_time(seat(3), 0);
        engine.start();

        assert!(engine.make_active(seat(3)));
        assert_eq!(engine.active(), seat(3));

        // Forward order is 0 2 3 1, so seat 1 follows seat 3.
        assert_eq!(engine.advance(1_000), TickOutcome::Reassigned { seat: seat(1) });
        assert_eq!(ms(&engine, 1), 100_000);
        assert!(engine.is_running());
    }

    #[test]
    fn test_advance_reassigns_active_zeroed_while_running() {
        let mut engine = TurnEngine::new(3, 100_000, ClockConfig::default());
        engine.start();
        engine.advance(500);

        engine.set_time(seat(0), 0);

        assert_eq!(engine.advance(16), TickOutcome::Reassigned { seat: seat(2) });
        assert_eq!(ms(&engine, 0), 0);
        assert_eq!(ms(&engine, 2), 100_000);
    }
}
