//! # table-clock
//!
//! A shared countdown clock for turn-based tabletop card games.
//!
//! Two to eight seats each hold their own clock; exactly one runs at a
//! time and the turn travels around the table in serpentine order.
//! Knockouts, time-outs and revivals hand out time bonuses, and a
//! name-keyed ledger tracks wins and losses across sessions.
//!
//! ## Design Principles
//!
//! 1. **Host-Driven**: The crate owns no timer and no thread. The host
//!    calls `advance(delta_ms)` from its frame loop and forwards user input.
//!
//! 2. **Total Operations**: Clock actions never fail. Bad seat indices are
//!    ignored, times clamp at zero, seat counts clamp to 2..=8.
//!
//! 3. **Names, Not Seats, Score**: Points follow the player name, so they
//!    survive reseating and snapshot import.
//!
//! ## Modules
//!
//! - `core`: Seat IDs, player records, configuration, duration text, seating order
//! - `turns`: The turn engine state machine
//! - `scoring`: Point ledger, archives, ranked leaderboard views
//! - `persist`: Settings store seam, stored settings, session snapshots
//! - `session`: Host-facing session, rendering hook, tick driver
//! - `error`: Store and snapshot errors

pub mod core;
pub mod turns;
pub mod scoring;
pub mod persist;
pub mod session;
pub mod error;

// Re-export commonly used types
pub use crate::core::{
    ClockConfig, IncrementMode, PlayerState, SeatId, SeatMap, TurnDirection,
};

pub use crate::turns::{KnockToggle, SeatStatus, TickOutcome, TurnEngine};

pub use crate::scoring::{
    ArchiveEntry, Leaderboard, LeaderboardRow, Outcome, PointsMap, RankDelta, ScoreLedger, Scope,
};

pub use crate::persist::{MemoryStore, SessionSnapshot, SettingsStore};

pub use crate::session::{ClockSession, Refresh, Renderer, SessionBuilder, TickClock};

pub use crate::error::{ExportError, SnapshotError, StoreError};
