//! Host-facing session.
//!
//! [`ClockSession`] owns the turn engine, the score ledger, the
//! leaderboard history, the settings store and the rendering hook. It is
//! the single place user actions enter the system: each method mutates
//! state, persists what needs persisting, and notifies the renderer.
//!
//! ## Example
//!
//! ```
//! use table_clock::persist::MemoryStore;
//! use table_clock::scoring::Outcome;
//! use table_clock::session::SessionBuilder;
//! use table_clock::core::SeatId;
//!
//! let mut session = SessionBuilder::new().seat_count(3).build(MemoryStore::new());
//! session.rename(SeatId::new(0), "Alice");
//! session.start();
//! session.advance(1_500);
//! session.award(SeatId::new(0), Outcome::Win);
//!
//! assert_eq!(session.ledger().points("Alice"), 15);
//! ```

pub mod driver;
pub mod render;

use std::time::{SystemTime, UNIX_EPOCH};

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::core::{
    clamp_seat_count, time, ClockConfig, IncrementMode, SeatId, TurnDirection, DEFAULT_INITIAL_MS,
    DEFAULT_SEATS,
};
use crate::error::{ExportError, SnapshotError};
use crate::persist::{settings, snapshot, SessionSnapshot, SettingsStore};
use crate::scoring::{
    entries, to_csv, ArchiveEntry, Leaderboard, LeaderboardEntry, LeaderboardRow, Outcome, ScoreLedger,
    Scope, Standing,
};
use crate::turns::{KnockToggle, SeatStatus, TickOutcome, TurnEngine};

pub use driver::TickClock;
pub use render::{Refresh, Renderer};

/// Default initial time text.
pub const DEFAULT_INITIAL_TIME: &str = "05:00";

/// Builder for [`ClockSession`].
pub struct SessionBuilder {
    seat_count: usize,
    initial_time: String,
    renderer: Option<Box<dyn Renderer>>,
}

impl Default for SessionBuilder {
    fn default() -> Self {
        Self {
            seat_count: DEFAULT_SEATS,
            initial_time: DEFAULT_INITIAL_TIME.to_string(),
            renderer: None,
        }
    }
}

impl SessionBuilder {
    /// Start from the defaults: four seats at 05:00, no renderer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of seats. Clamped to 2..=8 when the session is built.
    #[must_use]
    pub fn seat_count(mut self, count: usize) -> Self {
        self.seat_count = count;
        self
    }

    /// Initial time text (`mm:ss` or seconds).
    #[must_use]
    pub fn initial_time(mut self, text: &str) -> Self {
        self.initial_time = text.to_string();
        self
    }

    /// Install a rendering hook.
    #[must_use]
    pub fn renderer(mut self, renderer: impl Renderer + 'static) -> Self {
        self.renderer = Some(Box::new(renderer));
        self
    }

    /// Load settings and points from `store` and build the session.
    pub fn build<S: SettingsStore>(self, store: S) -> ClockSession<S> {
        let config = ClockConfig::load(&store);
        let lock_names = settings::load_lock_names(&store);
        let ledger = ScoreLedger::restore(
            settings::load_points(&store),
            settings::load_archives(&store),
        );
        let initial_ms = time::parse_or(&self.initial_time, DEFAULT_INITIAL_MS);
        let engine = TurnEngine::new(self.seat_count, initial_ms, config);

        info!(
            seats = engine.seat_count(),
            initial_ms,
            mode = %engine.config().increment_mode,
            known_names = ledger.all_time().len(),
            "Session ready"
        );

        ClockSession {
            engine,
            ledger,
            leaderboard: Leaderboard::new(),
            initial_time: self.initial_time,
            lock_names,
            starts: 0,
            store,
            renderer: self.renderer,
        }
    }
}

/// One local table session.
pub struct ClockSession<S: SettingsStore> {
    engine: TurnEngine,
    ledger: ScoreLedger,
    leaderboard: Leaderboard,
    initial_time: String,
    lock_names: bool,
    starts: u64,
    store: S,
    renderer: Option<Box<dyn Renderer>>,
}

impl<S: SettingsStore> ClockSession<S> {
    // === Reads ===

    /// The turn engine.
    pub fn engine(&self) -> &TurnEngine {
        &self.engine
    }

    /// The score ledger.
    pub fn ledger(&self) -> &ScoreLedger {
        &self.ledger
    }

    /// The settings store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// The settings store, mutably.
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Initial time text as last set.
    pub fn initial_time(&self) -> &str {
        &self.initial_time
    }

    /// Initial time in milliseconds. Unusable text means 05:00.
    pub fn initial_ms(&self) -> u64 {
        time::parse_or(&self.initial_time, DEFAULT_INITIAL_MS)
    }

    /// Whether name editing is locked.
    pub fn lock_names(&self) -> bool {
        self.lock_names
    }

    /// Whether the clock is running.
    pub fn is_running(&self) -> bool {
        self.engine.is_running()
    }

    /// The active seat.
    pub fn active(&self) -> SeatId {
        self.engine.active()
    }

    /// Status of a seat.
    pub fn status(&self, seat: SeatId) -> Option<SeatStatus> {
        self.engine.status(seat)
    }

    /// The seat that would take over on a plain pass.
    pub fn peek_next(&self) -> Option<SeatId> {
        self.engine.peek_next()
    }

    /// All-time points for the name currently at `seat`.
    pub fn seat_points(&self, seat: SeatId) -> Option<u64> {
        self.engine.seat(seat).map(|p| self.ledger.points(&p.name))
    }

    /// How many times the clock has gone from stopped to running.
    ///
    /// Frame drivers compare this between frames to detect a restart they
    /// did not see.
    pub fn start_count(&self) -> u64 {
        self.starts
    }

    /// Replace the rendering hook.
    pub fn set_renderer(&mut self, renderer: impl Renderer + 'static) {
        self.renderer = Some(Box::new(renderer));
    }

    // === Clock ===

    /// Apply elapsed time.
    pub fn advance(&mut self, delta_ms: u64) -> TickOutcome {
        let outcome = self.engine.advance(delta_ms);
        match outcome {
            TickOutcome::Idle => {}
            TickOutcome::Delayed { .. } | TickOutcome::Consumed { .. } => {
                self.notify(Refresh::Clocks);
            }
            TickOutcome::TimedOut { .. } => {
                self.notify(Refresh::Clocks);
                self.notify(Refresh::Turn);
            }
            TickOutcome::Reassigned { .. } | TickOutcome::Stopped => {
                self.notify(Refresh::Turn);
            }
        }
        outcome
    }

    /// Start the clock.
    pub fn start(&mut self) {
        if !self.engine.is_running() {
            self.starts += 1;
        }
        self.engine.start();
        self.notify(Refresh::Turn);
    }

    /// Stop the clock.
    pub fn stop(&mut self) {
        self.engine.stop();
        self.notify(Refresh::Turn);
    }

    /// Start if stopped, stop if running.
    pub fn toggle_running(&mut self) {
        if !self.engine.is_running() {
            self.starts += 1;
        }
        self.engine.toggle_running();
        self.notify(Refresh::Turn);
    }

    /// Start the clock if it is stopped, otherwise end the current turn.
    pub fn start_or_pass(&mut self) -> Option<SeatId> {
        if self.engine.is_running() {
            self.pass(None)
        } else {
            self.start();
            Some(self.engine.active())
        }
    }

    /// End the current turn, optionally handing it to a specific seat.
    pub fn pass(&mut self, target: Option<SeatId>) -> Option<SeatId> {
        let next = self.engine.pass(target);
        self.notify(Refresh::Clocks);
        self.notify(Refresh::Turn);
        next
    }

    /// Hand the turn to `seat` and make sure the clock is running.
    pub fn pass_to_and_start(&mut self, seat: SeatId) -> Option<SeatId> {
        let next = self.pass(Some(seat));
        if next.is_some() && !self.engine.is_running() {
            self.start();
        }
        next
    }

    /// Make a seat active without passing. Knocked-out seats are ignored.
    pub fn make_active(&mut self, seat: SeatId) -> bool {
        let changed = self.engine.make_active(seat);
        if changed {
            self.notify(Refresh::Turn);
        }
        changed
    }

    // === Time edits ===

    /// Shift one seat's time.
    pub fn adjust_time(&mut self, seat: SeatId, delta_ms: i64) -> bool {
        let changed = self.engine.adjust_time(seat, delta_ms);
        if changed {
            self.notify(Refresh::Seats);
        }
        changed
    }

    /// Set one seat's time.
    pub fn set_time(&mut self, seat: SeatId, ms: u64) -> bool {
        let changed = self.engine.set_time(seat, ms);
        if changed {
            self.notify(Refresh::Seats);
        }
        changed
    }

    /// Set one seat's time from text. Text that parses to zero is ignored.
    pub fn set_time_text(&mut self, seat: SeatId, text: &str) -> bool {
        match time::parse(text) {
            0 => false,
            ms => self.set_time(seat, ms),
        }
    }

    /// Set every seat's time. Zero is ignored.
    pub fn apply_all(&mut self, ms: u64) -> bool {
        if ms == 0 {
            return false;
        }
        self.engine.set_all_times(ms);
        self.notify(Refresh::Seats);
        true
    }

    /// Stop, restore every seat to the initial time, clear knockouts and
    /// hand the turn to seat 0.
    pub fn reset_all(&mut self) {
        self.engine.reset(self.initial_ms());
        info!(initial_ms = self.initial_ms(), "Table reset");
        self.notify(Refresh::Seats);
        self.notify(Refresh::Turn);
    }

    // === Seats ===

    /// Knock a seat out, or reinstate it if already knocked out.
    pub fn toggle_knock(&mut self, seat: SeatId) -> Option<KnockToggle> {
        let toggled = self.engine.knock_out(seat)?;
        self.notify(Refresh::Seats);
        self.notify(Refresh::Turn);
        Some(toggled)
    }

    /// Give a timed-out seat another minute.
    pub fn revive(&mut self, seat: SeatId) -> bool {
        let revived = self.engine.revive(seat);
        if revived {
            self.notify(Refresh::Seats);
        }
        revived
    }

    /// Rename a seat. Returns the stored name.
    ///
    /// Points stay with the old name; future awards go to the new one.
    /// The name lock is advisory and not enforced here.
    pub fn rename(&mut self, seat: SeatId, name: &str) -> Option<String> {
        let stored = self.engine.rename(seat, name)?.to_string();
        debug!(%seat, name = %stored, "Seat renamed");
        self.notify(Refresh::Seats);
        self.notify(Refresh::Points);
        Some(stored)
    }

    /// Record a win or loss for whoever sits at `seat`.
    pub fn award(&mut self, seat: SeatId, outcome: Outcome) -> Option<Standing> {
        let name = self.engine.seat(seat)?.name.clone();
        let standing = self.ledger.award(&name, outcome);
        settings::save_points(&mut self.store, self.ledger.all_time());
        debug!(%seat, %name, ?outcome, all_time = standing.all_time, "Points awarded");
        self.notify(Refresh::Points);
        Some(standing)
    }

    /// Rebuild the table with a new seat count. Names and times reset;
    /// points are untouched since they follow names.
    pub fn set_player_count(&mut self, requested: i64) -> usize {
        let count = clamp_seat_count(requested);
        self.engine.reseat(count, self.initial_ms());
        self.notify(Refresh::Seats);
        self.notify(Refresh::Turn);
        count
    }

    // === Settings ===

    /// Change and persist the increment mode and length.
    pub fn set_increment(&mut self, mode: IncrementMode, ms: u64) {
        self.engine.set_increment(mode, ms);
        settings::save_increment(&mut self.store, mode, ms);
        self.notify(Refresh::Settings);
    }

    /// Change and persist the knockout bonus.
    pub fn set_ko_bonus(&mut self, ms: u64) {
        self.engine.set_ko_bonus(ms);
        settings::save_ko_bonus(&mut self.store, ms);
        self.notify(Refresh::Settings);
    }

    /// Change and persist the reinstatement bonus.
    pub fn set_reinstate_bonus(&mut self, ms: u64) {
        self.engine.set_reinstate_bonus(ms);
        settings::save_reinstate_bonus(&mut self.store, ms);
        self.notify(Refresh::Settings);
    }

    /// Change and persist the name lock.
    pub fn set_lock_names(&mut self, locked: bool) {
        self.lock_names = locked;
        settings::save_lock_names(&mut self.store, locked);
        self.notify(Refresh::Settings);
    }

    /// Flip the turn direction.
    pub fn toggle_direction(&mut self) -> TurnDirection {
        let direction = self.engine.toggle_direction();
        debug!(?direction, "Direction toggled");
        self.notify(Refresh::Turn);
        direction
    }

    /// Change the initial time text used by resets and reseats.
    pub fn set_initial_time(&mut self, text: &str) {
        self.initial_time = text.trim().to_string();
        self.notify(Refresh::Settings);
    }

    // === Leaderboard ===

    /// Ranked rows for `scope`, with movement since the last view of it.
    pub fn leaderboard_view(&mut self, scope: Scope) -> Vec<LeaderboardRow> {
        let seated = self.engine.seats().values().map(|p| p.name.as_str());
        let rows = self.leaderboard.build_view(scope, &self.ledger, seated);
        self.notify(Refresh::Leaderboard);
        rows
    }

    /// Sorted entries for `scope`, without touching rank history.
    pub fn leaderboard_entries(&self, scope: Scope) -> Vec<LeaderboardEntry> {
        let seated = self.engine.seats().values().map(|p| p.name.as_str());
        entries(scope, &self.ledger, seated)
    }

    /// The sorted entries for `scope` as `Rank,Name,Points` CSV text.
    pub fn leaderboard_csv(&self, scope: Scope) -> Result<String, ExportError> {
        to_csv(&self.leaderboard_entries(scope))
    }

    /// Clear session points.
    pub fn reset_session_points(&mut self) {
        self.ledger.reset_session();
        info!("Session points reset");
        self.notify(Refresh::Points);
        self.notify(Refresh::Leaderboard);
    }

    /// Archive the all-time table with the current wall-clock time and
    /// start a fresh one.
    pub fn archive_and_reset(&mut self) -> ArchiveEntry {
        self.archive_and_reset_at(now_ms())
    }

    /// Archive the all-time table under `timestamp` and start a fresh one.
    pub fn archive_and_reset_at(&mut self, timestamp: u64) -> ArchiveEntry {
        let entry = self.ledger.archive_and_reset(timestamp).clone();
        settings::save_archives(&mut self.store, self.ledger.archives());
        settings::save_points(&mut self.store, self.ledger.all_time());
        info!(timestamp, names = entry.points.len(), "All-time points archived");
        self.notify(Refresh::Points);
        self.notify(Refresh::Leaderboard);
        entry
    }

    // === Snapshots ===

    /// Capture the session.
    pub fn export_snapshot(&self) -> SessionSnapshot {
        SessionSnapshot::capture(
            &self.engine,
            &self.initial_time,
            self.lock_names,
            self.ledger.all_time(),
        )
    }

    /// Capture the session as pretty-printed JSON.
    pub fn export_json(&self) -> Result<String, SnapshotError> {
        self.export_snapshot().to_json()
    }

    /// Import a session from JSON text. See [`import_value`](Self::import_value).
    pub fn import_json(&mut self, text: &str) -> Result<(), SnapshotError> {
        let value: Value = serde_json::from_str(text).map_err(|err| {
            warn!(%err, "Rejected snapshot");
            SnapshotError::from(err)
        })?;
        self.import_value(&value)
    }

    /// Import a session.
    ///
    /// The snapshot is fully decoded before anything changes; a rejected
    /// snapshot leaves the session untouched. A successful import replaces
    /// the seats and settings, stops the clock, and replaces and persists
    /// the all-time points when the snapshot carries them. The turn
    /// direction is kept.
    pub fn import_value(&mut self, value: &Value) -> Result<(), SnapshotError> {
        let imported = snapshot::decode(value, self.engine.config(), &self.initial_time)
            .map_err(|err| {
                warn!(%err, "Rejected snapshot");
                err
            })?;

        self.engine = imported.engine();
        if let Some(text) = imported.initial_time {
            self.initial_time = text;
        }
        if let Some(locked) = imported.lock_names {
            self.lock_names = locked;
        }
        if let Some(points) = imported.points {
            self.ledger.replace_all_time(points);
            settings::save_points(&mut self.store, self.ledger.all_time());
        }

        info!(
            seats = self.engine.seat_count(),
            active = %self.engine.active(),
            "Snapshot imported"
        );
        self.notify(Refresh::Settings);
        self.notify(Refresh::Seats);
        self.notify(Refresh::Turn);
        self.notify(Refresh::Points);
        Ok(())
    }

    fn notify(&mut self, reason: Refresh) {
        if let Some(renderer) = self.renderer.as_mut() {
            renderer.refresh(reason);
        }
    }
}

/// Milliseconds since the Unix epoch.
fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
        .unwrap_or(0)
}
