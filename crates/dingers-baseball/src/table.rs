// Per-player home-run table: one row per roster entry, in roster order.

use std::collections::HashMap;

use dingers_core::normalize::normalize_name;
use dingers_core::roster::Roster;
use serde::Serialize;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerRow {
    /// Display name from the roster.
    pub player: String,
    pub team: String,
    pub hrs: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerTable {
    rows: Vec<PlayerRow>,
}

impl PlayerTable {
    /// Build the table from collected totals keyed by normalized name.
    /// Roster players missing from `totals` get zero.
    pub fn from_totals(roster: &Roster, totals: &HashMap<String, u32>) -> Self {
        let rows = roster
            .entries()
            .iter()
            .map(|entry| PlayerRow {
                player: entry.display_name.clone(),
                team: entry.team_id.clone(),
                hrs: totals.get(&entry.normalized_name).copied().unwrap_or(0),
            })
            .collect();
        Self { rows }
    }

    /// Reconcile previously stored rows with the current roster.
    ///
    /// Rows are matched by normalized player name; the roster decides the
    /// team and display name. Unknown players are dropped and roster players
    /// without a row get zero.
    pub fn from_rows(roster: &Roster, rows: impl IntoIterator<Item = PlayerRow>) -> Self {
        let mut totals = HashMap::new();
        for row in rows {
            let normalized = normalize_name(&row.player);
            if roster.contains(&normalized) {
                totals.insert(normalized, row.hrs);
            } else {
                debug!(player = %row.player, "dropping stored row for unrostered player");
            }
        }
        Self::from_totals(roster, &totals)
    }

    pub fn rows(&self) -> &[PlayerRow] {
        &self.rows
    }

    /// One team's players, most home runs first (roster order on ties).
    pub fn team_rows(&self, team: &str) -> Vec<&PlayerRow> {
        let mut rows: Vec<&PlayerRow> = self.rows.iter().filter(|r| r.team == team).collect();
        rows.sort_by(|a, b| b.hrs.cmp(&a.hrs));
        rows
    }

    pub fn total_hrs(&self) -> u32 {
        self.rows.iter().map(|r| r.hrs).sum()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dingers_core::config::TeamConfig;

    fn roster() -> Roster {
        Roster::from_teams(&[
            TeamConfig {
                id: "A".into(),
                players: vec!["Cal Raleigh".into(), "Matt Olson".into(), "Kyle Tucker".into()],
            },
            TeamConfig {
                id: "B".into(),
                players: vec!["José Ramírez".into()],
            },
        ])
        .unwrap()
    }

    fn row(player: &str, team: &str, hrs: u32) -> PlayerRow {
        PlayerRow {
            player: player.into(),
            team: team.into(),
            hrs,
        }
    }

    #[test]
    fn one_row_per_roster_entry() {
        let totals = HashMap::from([("matt olson".to_string(), 4), ("aaron judge".to_string(), 9)]);
        let table = PlayerTable::from_totals(&roster(), &totals);

        assert_eq!(
            table.rows(),
            &[
                row("Cal Raleigh", "A", 0),
                row("Matt Olson", "A", 4),
                row("Kyle Tucker", "A", 0),
                row("José Ramírez", "B", 0),
            ]
        );
        assert_eq!(table.total_hrs(), 4);
    }

    #[test]
    fn stored_rows_are_reconciled_with_roster() {
        let stored = vec![
            row("Jose Ramirez", "OLD", 7),
            row("Aaron Judge", "A", 12),
            row("Cal Raleigh", "A", 3),
        ];
        let table = PlayerTable::from_rows(&roster(), stored);

        assert_eq!(table.len(), 4);
        assert_eq!(table.rows()[0], row("Cal Raleigh", "A", 3));
        assert_eq!(table.rows()[1].hrs, 0);
        assert_eq!(table.rows()[3], row("José Ramírez", "B", 7));
        assert_eq!(table.total_hrs(), 10);
    }

    #[test]
    fn team_rows_sorted_with_stable_ties() {
        let totals = HashMap::from([
            ("cal raleigh".to_string(), 2),
            ("matt olson".to_string(), 5),
            ("kyle tucker".to_string(), 2),
        ]);
        let table = PlayerTable::from_totals(&roster(), &totals);

        let names: Vec<&str> = table
            .team_rows("A")
            .iter()
            .map(|r| r.player.as_str())
            .collect();
        assert_eq!(names, vec!["Matt Olson", "Cal Raleigh", "Kyle Tucker"]);
        assert!(table.team_rows("ZZZ").is_empty());
    }
}
