// Team ranking under the top-N contributors rule.

use dingers_core::roster::Roster;
use serde::Serialize;

use crate::table::{PlayerRow, PlayerTable};

/// Default number of players per team that count toward its total.
pub const DEFAULT_COUNTING_PLAYERS: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeamStanding {
    pub team: String,
    /// Sum of the counted players' home runs.
    pub hrs: u32,
    /// How many players were counted (at most the configured cap).
    pub counted: usize,
}

/// Rank teams by the summed home runs of their `counting_players` best
/// hitters.
///
/// Players are ordered by home runs with roster order breaking ties, so the
/// cut is deterministic. Teams tie-break by roster team order. Every roster
/// team appears once, including teams with no home runs.
pub fn build_leaderboard(
    roster: &Roster,
    table: &PlayerTable,
    counting_players: usize,
) -> Vec<TeamStanding> {
    let mut standings: Vec<TeamStanding> = roster
        .team_ids()
        .iter()
        .map(|team| TeamStanding {
            team: team.clone(),
            hrs: 0,
            counted: 0,
        })
        .collect();

    let mut sorted: Vec<&PlayerRow> = table.rows().iter().collect();
    sorted.sort_by(|a, b| b.hrs.cmp(&a.hrs));

    for row in sorted {
        let Some(pos) = roster.team_position(&row.team) else {
            continue;
        };
        let standing = &mut standings[pos];
        if standing.counted < counting_players {
            standing.hrs += row.hrs;
            standing.counted += 1;
        }
    }

    standings.sort_by(|a, b| b.hrs.cmp(&a.hrs));
    standings
}
