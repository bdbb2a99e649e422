//! Name-keyed scoring: win/loss points, archives and ranked views.

pub mod ledger;
pub mod leaderboard;

pub use ledger::{
    ArchiveEntry, Outcome, PointsMap, ScoreLedger, Standing, LOSS_POINTS, WIN_POINTS,
};
pub use leaderboard::{entries, to_csv, Leaderboard, LeaderboardEntry, LeaderboardRow, RankDelta, Scope};
