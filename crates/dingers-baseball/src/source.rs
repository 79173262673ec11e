// The seam between the collector and whatever serves game data.

use async_trait::async_trait;
use chrono::NaiveDate;
use thiserror::Error;

/// Identifier of a single scheduled game (MLB `gamePk`).
pub type GameId = u64;

/// One player's batting line from a box score.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatterLine {
    /// Full name as published by the stats source (not normalized).
    pub name: String,
    pub home_runs: u32,
}

/// Batting lines for both sides of one game.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoxScore {
    pub game: GameId,
    pub batters: Vec<BatterLine>,
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("network error for {url}: {source}")]
    Network {
        url: String,
        source: reqwest::Error,
    },

    #[error("HTTP {status} from {url}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        source: reqwest::Error,
    },

    #[error("stats source unavailable: {0}")]
    Unavailable(String),
}

/// Read-only access to daily schedules and box scores.
#[async_trait]
pub trait StatsSource: Send + Sync {
    /// Games scheduled on `date`. An empty list means an off day.
    async fn schedule(&self, date: NaiveDate) -> Result<Vec<GameId>, SourceError>;

    /// Batting lines for one game.
    async fn box_score(&self, game: GameId) -> Result<BoxScore, SourceError>;
}
