// Home-run aggregation: stats source, collection, ranking and payouts.

pub mod cache;
pub mod collector;
pub mod leaderboard;
pub mod mlb;
pub mod payout;
pub mod snapshot;
pub mod source;
pub mod table;
pub mod tracker;

pub use source::{BatterLine, BoxScore, GameId, SourceError, StatsSource};
pub use tracker::{Standings, TableOrigin, Tracker, TrackerError};
