//! Point ledger keyed by player name.
//!
//! Two parallel maps: `all_time` (persisted by the session) and `session`
//! (reset independently, never persisted). Points always follow the name
//! string, never the seat, so renaming a seat switches buckets.
//!
//! Maps are `im::OrdMap` so archiving a snapshot is an O(1) clone and
//! iteration order is stable for export.

use im::{OrdMap, Vector};
use serde::{Deserialize, Serialize};

/// Points for a win.
pub const WIN_POINTS: u64 = 15;

/// Points deducted for a loss (floored at zero).
pub const LOSS_POINTS: u64 = 5;

/// Name → points.
pub type PointsMap = OrdMap<String, u64>;

/// Result of a game for one player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    /// +15 points.
    Win,
    /// −5 points, never below zero.
    Loss,
}

/// One archived all-time table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchiveEntry {
    /// Milliseconds since the Unix epoch at archive time.
    pub timestamp: u64,
    /// The all-time points as they were.
    pub points: PointsMap,
}

/// Which point totals a player ended up with after an award.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Standing {
    /// All-time total.
    pub all_time: u64,
    /// Session total.
    pub session: u64,
}

/// All-time and session point totals plus the archive log.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreLedger {
    all_time: PointsMap,
    session: PointsMap,
    archives: Vector<ArchiveEntry>,
}

impl ScoreLedger {
    /// Create an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from persisted all-time points and archives. Session starts empty.
    #[must_use]
    pub fn restore(all_time: PointsMap, archives: Vector<ArchiveEntry>) -> Self {
        Self {
            all_time,
            session: PointsMap::new(),
            archives,
        }
    }

    /// Record a win or loss for `name` in both maps.
    pub fn award(&mut self, name: &str, outcome: Outcome) -> Standing {
        let all_time = apply(&mut self.all_time, name, outcome);
        let session = apply(&mut self.session, name, outcome);
        Standing { all_time, session }
    }

    /// All-time points for a name (0 if unseen).
    #[must_use]
    pub fn points(&self, name: &str) -> u64 {
        self.all_time.get(name).copied().unwrap_or(0)
    }

    /// Session points for a name (0 if unseen).
    #[must_use]
    pub fn session_points(&self, name: &str) -> u64 {
        self.session.get(name).copied().unwrap_or(0)
    }

    /// The all-time map.
    #[must_use]
    pub fn all_time(&self) -> &PointsMap {
        &self.all_time
    }

    /// The session map.
    #[must_use]
    pub fn session(&self) -> &PointsMap {
        &self.session
    }

    /// Archived all-time tables, oldest first.
    #[must_use]
    pub fn archives(&self) -> &Vector<ArchiveEntry> {
        &self.archives
    }

    /// Clear session points. All-time points are untouched.
    pub fn reset_session(&mut self) {
        self.session = PointsMap::new();
    }

    /// Snapshot the all-time map into the archive, then clear it.
    /// Session points are untouched.
    pub fn archive_and_reset(&mut self, timestamp: u64) -> &ArchiveEntry {
        self.archives.push_back(ArchiveEntry {
            timestamp,
            points: std::mem::take(&mut self.all_time),
        });
        &self.archives[self.archives.len() - 1]
    }

    /// Replace the all-time map wholesale (snapshot import).
    pub fn replace_all_time(&mut self, points: PointsMap) {
        self.all_time = points;
    }
}

fn apply(map: &mut PointsMap, name: &str, outcome: Outcome) -> u64 {
    let current = map.get(name).copied().unwrap_or(0);
    let updated = match outcome {
        Outcome::Win => current.saturating_add(WIN_POINTS),
        Outcome::Loss => current.saturating_sub(LOSS_POINTS),
    };
    map.insert(name.to_string(), updated);
    updated
}
