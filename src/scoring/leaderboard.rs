//! Ranked leaderboard views with rank movement since the last view.
//!
//! Each scope remembers the ranks from its previous build, so two
//! consecutive views of the same scope report who climbed and who fell.
//! The memory is per session and never persisted.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::ledger::ScoreLedger;
use crate::error::ExportError;

/// Which point map a view ranks.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Scope {
    /// Persisted all-time totals.
    #[default]
    #[serde(rename = "all")]
    AllTime,
    /// Totals since the last session reset.
    #[serde(rename = "session")]
    Session,
}

/// A name and its points, before ranking.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    /// Player name.
    pub name: String,
    /// Points in the chosen scope.
    pub points: u64,
}

/// Rank movement compared to the previous view of the same scope.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RankDelta {
    /// Not present in the previous view.
    New,
    /// Climbed this many places.
    Up(usize),
    /// Fell this many places.
    Down(usize),
    /// Same rank as before.
    Same,
}

impl RankDelta {
    fn between(previous: Option<usize>, current: usize) -> Self {
        match previous {
            None => RankDelta::New,
            Some(prev) if prev > current => RankDelta::Up(prev - current),
            Some(prev) if prev < current => RankDelta::Down(current - prev),
            Some(_) => RankDelta::Same,
        }
    }
}

impl std::fmt::Display for RankDelta {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RankDelta::New => f.write_str("—"),
            RankDelta::Up(n) => write!(f, "▲ {n}"),
            RankDelta::Down(n) => write!(f, "▼ {n}"),
            RankDelta::Same => f.write_str("•"),
        }
    }
}

/// One ranked row.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardRow {
    /// 1-based rank.
    pub rank: usize,
    /// Player name.
    pub name: String,
    /// Points in the viewed scope.
    pub points: u64,
    /// Movement since the last view of this scope.
    pub delta: RankDelta,
}

/// Collect and sort the entries for a scope.
///
/// Every named entry of the scope's map is included, plus every seated
/// name not already present (with its points, usually 0). Sorted by
/// points descending, then name ascending.
pub fn entries<'a>(
    scope: Scope,
    ledger: &ScoreLedger,
    seated: impl IntoIterator<Item = &'a str>,
) -> Vec<LeaderboardEntry> {
    let map = match scope {
        Scope::AllTime => ledger.all_time(),
        Scope::Session => ledger.session(),
    };

    let mut entries: Vec<LeaderboardEntry> = map
        .iter()
        .filter(|(name, _)| !name.trim().is_empty())
        .map(|(name, &points)| LeaderboardEntry {
            name: name.clone(),
            points,
        })
        .collect();

    for name in seated {
        if !entries.iter().any(|e| e.name == name) {
            entries.push(LeaderboardEntry {
                name: name.to_string(),
                points: map.get(name).copied().unwrap_or(0),
            });
        }
    }

    entries.sort_by(|a, b| b.points.cmp(&a.points).then_with(|| a.name.cmp(&b.name)));
    entries
}

/// Write sorted entries as `Rank,Name,Points` CSV, one row per entry.
///
/// Ranks are 1-based positions in `entries`. Names containing commas,
/// quotes or line breaks are quoted, with inner quotes doubled.
pub fn to_csv(entries: &[LeaderboardEntry]) -> Result<String, ExportError> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    writer.write_record(["Rank", "Name", "Points"])?;
    for (idx, entry) in entries.iter().enumerate() {
        let rank = (idx + 1).to_string();
        let points = entry.points.to_string();
        writer.write_record([rank.as_str(), entry.name.as_str(), points.as_str()])?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|err| csv::Error::from(err.into_error()))?;
    Ok(String::from_utf8(bytes)?)
}

/// Builds ranked views and remembers the last ranks per scope.
#[derive(Clone, Debug, Default)]
pub struct Leaderboard {
    previous: FxHashMap<Scope, FxHashMap<String, usize>>,
}

impl Leaderboard {
    /// Create a leaderboard with no rank history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rank the entries of `scope` and compute deltas against the previous
    /// view of that scope. The current ranks then replace the previous ones.
    pub fn build_view<'a>(
        &mut self,
        scope: Scope,
        ledger: &ScoreLedger,
        seated: impl IntoIterator<Item = &'a str>,
    ) -> Vec<LeaderboardRow> {
        let previous = self.previous.remove(&scope).unwrap_or_default();
        let mut current = FxHashMap::default();

        let rows: Vec<LeaderboardRow> = entries(scope, ledger, seated)
            .into_iter()
            .enumerate()
            .map(|(idx, entry)| {
                let rank = idx + 1;
                current.insert(entry.name.clone(), rank);
                LeaderboardRow {
                    rank,
                    delta: RankDelta::between(previous.get(&entry.name).copied(), rank),
                    name: entry.name,
                    points: entry.points,
                }
            })
            .collect();

        self.previous.insert(scope, current);
        rows
    }
}
