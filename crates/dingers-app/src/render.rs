// Plain-text rendering of standings for the terminal.

use std::fmt::Write;

use dingers_baseball::leaderboard::TeamStanding;
use dingers_baseball::payout::PayoutRecord;
use dingers_baseball::table::PlayerTable;
use dingers_baseball::TableOrigin;

const BAR_WIDTH: usize = 40;

/// Horizontal bar chart of team totals, longest bar for the leader.
pub fn leaderboard(title: &str, standings: &[TeamStanding], counting_players: usize) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Fantasy Leaderboard for {title} (Top {counting_players} Players Per Team)"
    );

    if standings.is_empty() {
        out.push_str("  No games were played in this period.\n");
        return out;
    }

    let max = standings.iter().map(|s| s.hrs).max().unwrap_or(0);
    let name_width = standings.iter().map(|s| s.team.len()).max().unwrap_or(0);
    for (rank, standing) in standings.iter().enumerate() {
        let bar_len = if max == 0 {
            0
        } else {
            (standing.hrs as usize * BAR_WIDTH).div_ceil(max as usize)
        };
        let _ = writeln!(
            out,
            "{:>3}. {:<name_width$}  {:<BAR_WIDTH$}  {}",
            rank + 1,
            standing.team,
            "█".repeat(bar_len),
            standing.hrs,
        );
    }
    out
}

pub fn payouts(records: &[PayoutRecord]) -> String {
    let mut out = String::from("Payouts\n");
    if records.is_empty() {
        out.push_str("  No payouts for this period.\n");
        return out;
    }

    let name_width = records.iter().map(|r| r.team.len()).max().unwrap_or(0).max(4);
    let _ = writeln!(
        out,
        "  {:<name_width$}  {:>6}  {:>6}  {:>6}",
        "Team", "Paid", "Won", "Net"
    );
    for record in records {
        let _ = writeln!(
            out,
            "  {:<name_width$}  {:>6}  {:>6}  {:>+6}",
            record.team, record.paid, record.won, record.net
        );
    }
    out
}

/// One team's players, most home runs first.
pub fn team_breakdown(table: &PlayerTable, team: &str) -> String {
    let rows = table.team_rows(team);
    let mut out = String::new();
    let _ = writeln!(out, "{team}'s Player Stats");

    let name_width = rows.iter().map(|r| r.player.chars().count()).max().unwrap_or(0).max(6);
    let _ = writeln!(out, "  {:<name_width$}  {:>3}", "Player", "HRs");
    for row in rows {
        let pad = name_width - row.player.chars().count();
        let _ = writeln!(out, "  {}{}  {:>3}", row.player, " ".repeat(pad), row.hrs);
    }
    out
}

/// Short note on where the numbers came from, if worth mentioning.
pub fn origin_note(origin: &TableOrigin) -> Option<String> {
    if let TableOrigin::Snapshot = origin {
        return Some("(read from saved snapshot; use --refresh to re-fetch)".into());
    }
    let skipped = origin.skipped_dates();
    if skipped.is_empty() {
        return None;
    }
    let dates: Vec<String> = skipped.iter().map(|d| d.to_string()).collect();
    Some(format!(
        "(warning: could not read games for {}; totals may be low)",
        dates.join(", ")
    ))
}
