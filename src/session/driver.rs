//! Tick driver: turns monotonic timestamps into `advance` calls.
//!
//! The host owns the frame loop and calls [`TickClock::drive`] once per
//! frame with `Instant::now()`. Sub-millisecond remainders carry over to
//! the next frame so no time is lost to rounding. Every restart of the
//! session starts a fresh baseline, whether or not the host kept calling
//! `drive` while the clock was stopped.

use std::time::{Duration, Instant};

use super::ClockSession;
use crate::persist::SettingsStore;
use crate::turns::TickOutcome;

/// Frame-to-frame elapsed time tracker.
#[derive(Clone, Debug, Default)]
pub struct TickClock {
    last: Option<Instant>,
    carry: Duration,
    seen_start: Option<u64>,
}

impl TickClock {
    /// Create a tracker with no baseline.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop the baseline. The next `tick` reports zero.
    pub fn reset(&mut self) {
        self.last = None;
        self.carry = Duration::ZERO;
    }

    /// Whole milliseconds elapsed since the previous call.
    ///
    /// The first call after construction or `reset` establishes the
    /// baseline and returns 0. A timestamp earlier than the baseline
    /// counts as no time.
    pub fn tick(&mut self, now: Instant) -> u64 {
        let Some(last) = self.last.replace(now) else {
            return 0;
        };
        let elapsed = now.saturating_duration_since(last) + self.carry;
        let whole_ms = elapsed.as_millis();
        self.carry = elapsed - Duration::from_millis(u64::try_from(whole_ms).unwrap_or(u64::MAX));
        u64::try_from(whole_ms).unwrap_or(u64::MAX)
    }

    /// Advance `session` by the time elapsed since the previous frame.
    ///
    /// The first frame after a restart only sets the baseline, so a pause
    /// is never charged to anyone. This holds even when the host suspends
    /// its frame loop while stopped, or stops and restarts between frames.
    pub fn drive<S: SettingsStore>(&mut self, session: &mut ClockSession<S>, now: Instant) -> TickOutcome {
        if !session.is_running() {
            self.reset();
            return TickOutcome::Idle;
        }
        let starts = session.start_count();
        if self.seen_start != Some(starts) {
            self.reset();
            self.seen_start = Some(starts);
        }
        let delta = self.tick(now);
        if delta == 0 {
            return TickOutcome::Idle;
        }
        session.advance(delta)
    }
}
