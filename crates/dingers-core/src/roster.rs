// Roster index: normalized player name -> (team, display name).

use std::collections::HashMap;

use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::config::TeamConfig;
use crate::normalize::normalize_name;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RosterError {
    #[error("team `{team}` is defined more than once")]
    DuplicateTeam { team: String },

    #[error("player `{player}` on team `{team}` is already rostered on team `{existing_team}`")]
    DuplicatePlayer {
        player: String,
        team: String,
        existing_team: String,
    },

    #[error("player name `{player}` on team `{team}` has no matchable characters")]
    EmptyName { player: String, team: String },
}

/// A single rostered player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RosterEntry {
    pub normalized_name: String,
    pub display_name: String,
    pub team_id: String,
}

/// Every rostered player, in configuration order, with a lookup by
/// normalized name.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    entries: Vec<RosterEntry>,
    index: HashMap<String, usize>,
    teams: Vec<String>,
}

impl Roster {
    /// Build the index from the configured teams.
    ///
    /// Team order and player order are preserved; they are the tie-break
    /// order for the leaderboard.
    pub fn from_teams(teams: &[TeamConfig]) -> Result<Self, RosterError> {
        let mut roster = Roster::default();

        for team in teams {
            if roster.teams.contains(&team.id) {
                return Err(RosterError::DuplicateTeam {
                    team: team.id.clone(),
                });
            }
            roster.teams.push(team.id.clone());

            for player in &team.players {
                let normalized = normalize_name(player);
                if normalized.is_empty() {
                    return Err(RosterError::EmptyName {
                        player: player.clone(),
                        team: team.id.clone(),
                    });
                }
                if let Some(&existing) = roster.index.get(&normalized) {
                    return Err(RosterError::DuplicatePlayer {
                        player: player.clone(),
                        team: team.id.clone(),
                        existing_team: roster.entries[existing].team_id.clone(),
                    });
                }
                roster.index.insert(normalized.clone(), roster.entries.len());
                roster.entries.push(RosterEntry {
                    normalized_name: normalized,
                    display_name: player.trim().to_string(),
                    team_id: team.id.clone(),
                });
            }
        }

        debug!(
            teams = roster.teams.len(),
            players = roster.entries.len(),
            "roster index built"
        );
        Ok(roster)
    }

    /// Look up a player by an already-normalized name.
    pub fn lookup(&self, normalized_name: &str) -> Option<&RosterEntry> {
        self.index.get(normalized_name).map(|&i| &self.entries[i])
    }

    /// Look up a player by a raw display name.
    pub fn find(&self, raw_name: &str) -> Option<&RosterEntry> {
        self.lookup(&normalize_name(raw_name))
    }

    pub fn contains(&self, normalized_name: &str) -> bool {
        self.index.contains_key(normalized_name)
    }

    /// All entries in configuration order.
    pub fn entries(&self) -> &[RosterEntry] {
        &self.entries
    }

    /// Team ids in configuration order.
    pub fn team_ids(&self) -> &[String] {
        &self.teams
    }

    /// Position of a team in configuration order.
    pub fn team_position(&self, team_id: &str) -> Option<usize> {
        self.teams.iter().position(|t| t == team_id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
