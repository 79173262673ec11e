// MLB Stats API client: daily schedule and per-game boxscore endpoints.

use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use dingers_core::config::StatsApiConfig;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use crate::source::{BatterLine, BoxScore, GameId, SourceError, StatsSource};

const USER_AGENT: &str = concat!("dingers/", env!("CARGO_PKG_VERSION"));

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// `StatsSource` backed by the public MLB Stats API.
#[derive(Debug, Clone)]
pub struct MlbStatsClient {
    http: Client,
    base_url: String,
    sport_id: u32,
}

impl MlbStatsClient {
    pub fn new(base_url: &str, sport_id: u32, timeout: Duration) -> Result<Self, SourceError> {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(SourceError::Client)?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            sport_id,
        })
    }

    pub fn from_config(config: &StatsApiConfig) -> Result<Self, SourceError> {
        Self::new(
            &config.base_url,
            config.sport_id,
            Duration::from_secs(config.timeout_secs),
        )
    }

    fn schedule_url(&self, date: NaiveDate) -> String {
        format!(
            "{}/schedule?sportId={}&date={}",
            self.base_url,
            self.sport_id,
            date.format("%Y-%m-%d")
        )
    }

    fn box_score_url(&self, game: GameId) -> String {
        format!("{}/game/{game}/boxscore", self.base_url)
    }

    async fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T, SourceError> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| SourceError::Network {
                url: url.to_owned(),
                source: e,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status {
                url: url.to_owned(),
                status,
            });
        }

        response.json::<T>().await.map_err(|e| SourceError::Decode {
            url: url.to_owned(),
            source: e,
        })
    }
}

#[async_trait]
impl StatsSource for MlbStatsClient {
    async fn schedule(&self, date: NaiveDate) -> Result<Vec<GameId>, SourceError> {
        let url = self.schedule_url(date);
        let raw: ScheduleResponse = self.get(&url).await?;
        let games = game_ids(raw);
        debug!(%date, games = games.len(), "schedule fetched");
        Ok(games)
    }

    async fn box_score(&self, game: GameId) -> Result<BoxScore, SourceError> {
        let url = self.box_score_url(game);
        let raw: BoxscoreResponse = self.get(&url).await?;
        Ok(map_box_score(game, raw))
    }
}

// ---------------------------------------------------------------------------
// Wire types. Every field is optional; missing data reads as empty or zero.
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
struct ScheduleResponse {
    #[serde(default)]
    dates: Vec<ScheduleDate>,
}

#[derive(Debug, Default, Deserialize)]
struct ScheduleDate {
    #[serde(default)]
    games: Vec<ScheduleGame>,
}

#[derive(Debug, Default, Deserialize)]
struct ScheduleGame {
    #[serde(rename = "gamePk", default)]
    game_pk: Option<GameId>,
}

#[derive(Debug, Default, Deserialize)]
struct BoxscoreResponse {
    #[serde(default)]
    teams: BoxscoreTeams,
}

#[derive(Debug, Default, Deserialize)]
struct BoxscoreTeams {
    #[serde(default)]
    home: BoxscoreTeam,
    #[serde(default)]
    away: BoxscoreTeam,
}

#[derive(Debug, Default, Deserialize)]
struct BoxscoreTeam {
    /// Keyed by "ID<personId>".
    #[serde(default)]
    players: BTreeMap<String, BoxscorePlayer>,
}

#[derive(Debug, Default, Deserialize)]
struct BoxscorePlayer {
    #[serde(default)]
    person: Person,
    #[serde(default)]
    stats: PlayerStats,
}

#[derive(Debug, Default, Deserialize)]
struct Person {
    #[serde(rename = "fullName", default)]
    full_name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct PlayerStats {
    #[serde(default)]
    batting: BattingStats,
}

#[derive(Debug, Default, Deserialize)]
struct BattingStats {
    #[serde(rename = "homeRuns", default)]
    home_runs: Option<u32>,
}

// ---------------------------------------------------------------------------
// Mapping: wire types -> domain types
// ---------------------------------------------------------------------------

fn game_ids(raw: ScheduleResponse) -> Vec<GameId> {
    raw.dates
        .into_iter()
        .flat_map(|d| d.games)
        .filter_map(|g| g.game_pk)
        .collect()
}

fn map_box_score(game: GameId, raw: BoxscoreResponse) -> BoxScore {
    let batters = [raw.teams.home, raw.teams.away]
        .into_iter()
        .flat_map(|team| team.players.into_values())
        .filter_map(|player| {
            let name = player.person.full_name?;
            Some(BatterLine {
                name,
                home_runs: player.stats.batting.home_runs.unwrap_or(0),
            })
        })
        .collect();
    BoxScore { game, batters }
}
