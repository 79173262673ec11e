// Configuration loading and parsing (league.toml, settings.toml).

use chrono::NaiveDate;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

use crate::roster::Roster;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("failed to initialize config from defaults: {message}")]
    DefaultsCopyError { message: String },
}

// ---------------------------------------------------------------------------
// Top-level assembled Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Config {
    pub league: LeagueConfig,
    pub payout: PayoutConfig,
    pub teams: Vec<TeamConfig>,
    pub stats_api: StatsApiConfig,
    pub snapshots: SnapshotConfig,
}

impl Config {
    /// Build the roster index from the configured teams.
    pub fn roster(&self) -> Result<Roster, ConfigError> {
        Roster::from_teams(&self.teams).map_err(|e| ConfigError::ValidationError {
            field: "teams".into(),
            message: e.to_string(),
        })
    }
}

// ---------------------------------------------------------------------------
// league.toml structs
// ---------------------------------------------------------------------------

/// Raw deserialization target for the entire league.toml file.
#[derive(Debug, Clone, Deserialize)]
struct LeagueFile {
    league: LeagueConfig,
    #[serde(default)]
    payout: PayoutConfig,
    #[serde(default)]
    teams: Vec<TeamConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LeagueConfig {
    pub name: String,
    /// How many of a team's top home-run hitters count toward its total.
    #[serde(default = "default_counting_players")]
    pub counting_players: usize,
    pub season_opener: NaiveDate,
}

fn default_counting_players() -> usize {
    6
}

/// How payouts are reported for a selected month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PayoutMode {
    /// The selected month only.
    #[default]
    Single,
    /// Every month from the opener through the selected one, summed.
    Cumulative,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PayoutConfig {
    #[serde(default = "default_entry_fee")]
    pub entry_fee: u32,
    /// Prize by finishing place; index 0 is first place.
    #[serde(default = "default_prizes")]
    pub prizes: Vec<u32>,
    #[serde(default)]
    pub mode: PayoutMode,
}

fn default_entry_fee() -> u32 {
    10
}

fn default_prizes() -> Vec<u32> {
    vec![35, 15]
}

impl Default for PayoutConfig {
    fn default() -> Self {
        Self {
            entry_fee: default_entry_fee(),
            prizes: default_prizes(),
            mode: PayoutMode::default(),
        }
    }
}

/// One fantasy team and the display names of its players.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TeamConfig {
    pub id: String,
    #[serde(default)]
    pub players: Vec<String>,
}

// ---------------------------------------------------------------------------
// settings.toml structs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
struct SettingsFile {
    stats_api: StatsApiConfig,
    #[serde(default)]
    snapshots: SnapshotConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StatsApiConfig {
    pub base_url: String,
    #[serde(default = "default_sport_id")]
    pub sport_id: u32,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_sport_id() -> u32 {
    1
}

fn default_timeout_secs() -> u64 {
    30
}

#[derive(Debug, Clone, Deserialize)]
pub struct SnapshotConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_snapshot_dir")]
    pub dir: String,
}

fn default_snapshot_dir() -> String {
    "data/snapshots".into()
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            dir: default_snapshot_dir(),
        }
    }
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate configuration from `config/league.toml` and
/// `config/settings.toml`, relative to the given `base_dir`.
///
/// Does not copy defaults; prefer `load_config()` for that.
pub fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let config_dir = base_dir.join("config");

    // --- league.toml (required) ---
    let league_path = config_dir.join("league.toml");
    let league_text = read_file(&league_path)?;
    let league_file: LeagueFile =
        toml::from_str(&league_text).map_err(|e| ConfigError::ParseError {
            path: league_path.clone(),
            source: e,
        })?;

    // --- settings.toml (required) ---
    let settings_path = config_dir.join("settings.toml");
    let settings_text = read_file(&settings_path)?;
    let settings_file: SettingsFile =
        toml::from_str(&settings_text).map_err(|e| ConfigError::ParseError {
            path: settings_path.clone(),
            source: e,
        })?;

    let config = Config {
        league: league_file.league,
        payout: league_file.payout,
        teams: league_file.teams,
        stats_api: settings_file.stats_api,
        snapshots: settings_file.snapshots,
    };

    validate(&config)?;

    Ok(config)
}

/// Seed `config/` from `defaults/`: every `*.toml` default without a
/// counterpart in `config/` is copied over, existing files are left alone.
/// Returns the paths written, in file-name order.
pub fn ensure_config_files(base_dir: &Path) -> Result<Vec<PathBuf>, ConfigError> {
    let defaults_dir = base_dir.join("defaults");
    let config_dir = base_dir.join("config");

    if !defaults_dir.is_dir() {
        if config_dir.is_dir() {
            return Ok(Vec::new());
        }
        return Err(ConfigError::DefaultsCopyError {
            message: format!(
                "no defaults/ or config/ directory under {}; run from the project root",
                base_dir.display()
            ),
        });
    }

    let mut defaults = Vec::new();
    for entry in fs::read_dir(&defaults_dir).map_err(copy_error("read defaults/"))? {
        let path = entry.map_err(copy_error("read defaults/"))?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "toml") {
            defaults.push(path);
        }
    }
    defaults.sort();

    fs::create_dir_all(&config_dir).map_err(copy_error("create config/"))?;

    let mut copied = Vec::new();
    for source in defaults {
        let Some(name) = source.file_name() else {
            continue;
        };
        let target = config_dir.join(name);
        if target.exists() {
            continue;
        }
        fs::copy(&source, &target).map_err(|e| ConfigError::DefaultsCopyError {
            message: format!("copy {} to {}: {e}", source.display(), target.display()),
        })?;
        info!(path = %target.display(), "created config file from defaults");
        copied.push(target);
    }

    Ok(copied)
}

fn copy_error(action: &'static str) -> impl Fn(std::io::Error) -> ConfigError {
    move |e| ConfigError::DefaultsCopyError {
        message: format!("failed to {action}: {e}"),
    }
}

/// Convenience wrapper: loads config relative to the current working directory.
/// Ensures default config files are copied before loading.
pub fn load_config() -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|_| ConfigError::FileNotFound {
        path: PathBuf::from("."),
    })?;
    ensure_config_files(&cwd)?;
    load_config_from(&cwd)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_file(path: &Path) -> Result<String, ConfigError> {
    fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.league.counting_players == 0 {
        return Err(ConfigError::ValidationError {
            field: "league.counting_players".into(),
            message: "must be greater than 0".into(),
        });
    }

    if config.teams.is_empty() {
        return Err(ConfigError::ValidationError {
            field: "teams".into(),
            message: "at least one team must be defined".into(),
        });
    }

    if let Some(team) = config.teams.iter().find(|t| t.id.trim().is_empty()) {
        return Err(ConfigError::ValidationError {
            field: "teams.id".into(),
            message: format!("team id must not be empty (players: {:?})", team.players),
        });
    }

    config.roster()?;

    if config.stats_api.base_url.trim().is_empty() {
        return Err(ConfigError::ValidationError {
            field: "stats_api.base_url".into(),
            message: "must not be empty".into(),
        });
    }

    if config.stats_api.timeout_secs == 0 {
        return Err(ConfigError::ValidationError {
            field: "stats_api.timeout_secs".into(),
            message: "must be greater than 0".into(),
        });
    }

    if config.snapshots.enabled && config.snapshots.dir.trim().is_empty() {
        return Err(ConfigError::ValidationError {
            field: "snapshots.dir".into(),
            message: "must not be empty when snapshots are enabled".into(),
        });
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
