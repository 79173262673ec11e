// Day-by-day home-run collection over a date range.
//
// Each date is read in full before its home runs are merged into the range
// totals. If any fetch for a date fails, that date contributes nothing and is
// reported as skipped, so the totals always equal a clean read of the
// remaining dates.

use std::collections::HashMap;

use chrono::NaiveDate;
use dingers_core::normalize::normalize_name;
use dingers_core::period::DateRange;
use dingers_core::roster::Roster;
use tracing::{debug, info, trace, warn};

use crate::source::{SourceError, StatsSource};

/// Normalized roster name -> home runs.
pub type PlayerTotals = HashMap<String, u32>;

/// What happened on one date of a collection pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DayOutcome {
    /// No games were scheduled.
    NoGames,
    /// Every scheduled game was read.
    Collected { games: usize, home_runs: u32 },
    /// A fetch failed; the date contributes zero.
    Failed { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayReport {
    pub date: NaiveDate,
    pub outcome: DayOutcome,
}

/// Result of collecting a date range.
#[derive(Debug, Clone)]
pub struct CollectionReport {
    pub range: DateRange,
    /// One entry per roster player, zero when nothing matched.
    pub totals: PlayerTotals,
    /// One report per date, ascending.
    pub days: Vec<DayReport>,
}

impl CollectionReport {
    /// Dates whose data could not be read.
    pub fn skipped_dates(&self) -> Vec<NaiveDate> {
        self.days
            .iter()
            .filter(|d| matches!(d.outcome, DayOutcome::Failed { .. }))
            .map(|d| d.date)
            .collect()
    }

    /// Number of games whose box scores were counted.
    pub fn games_read(&self) -> usize {
        self.days
            .iter()
            .map(|d| match d.outcome {
                DayOutcome::Collected { games, .. } => games,
                _ => 0,
            })
            .sum()
    }

    pub fn total_for(&self, normalized_name: &str) -> u32 {
        self.totals.get(normalized_name).copied().unwrap_or(0)
    }
}

/// Home runs matched on a single date, before merging.
struct DayTally {
    games: usize,
    hits: PlayerTotals,
}

/// Collect rostered players' home runs for every date in `range`, in order,
/// one fetch at a time.
pub async fn collect_home_runs<S>(source: &S, roster: &Roster, range: DateRange) -> CollectionReport
where
    S: StatsSource + ?Sized,
{
    let mut totals: PlayerTotals = roster
        .entries()
        .iter()
        .map(|e| (e.normalized_name.clone(), 0))
        .collect();
    let mut days = Vec::new();

    for date in range.days() {
        let outcome = match collect_day(source, roster, date).await {
            Ok(None) => DayOutcome::NoGames,
            Ok(Some(tally)) => {
                let mut home_runs = 0;
                for (name, hrs) in tally.hits {
                    *totals.entry(name).or_insert(0) += hrs;
                    home_runs += hrs;
                }
                DayOutcome::Collected {
                    games: tally.games,
                    home_runs,
                }
            }
            Err(e) => {
                warn!(%date, error = %e, "skipping date after fetch failure");
                DayOutcome::Failed {
                    reason: e.to_string(),
                }
            }
        };
        days.push(DayReport { date, outcome });
    }

    let report = CollectionReport {
        range,
        totals,
        days,
    };
    info!(
        %range,
        games = report.games_read(),
        skipped = report.skipped_dates().len(),
        "home-run collection finished"
    );
    report
}

async fn collect_day<S>(
    source: &S,
    roster: &Roster,
    date: NaiveDate,
) -> Result<Option<DayTally>, SourceError>
where
    S: StatsSource + ?Sized,
{
    let games = source.schedule(date).await?;
    if games.is_empty() {
        trace!(%date, "no games scheduled");
        return Ok(None);
    }

    let mut tally = DayTally {
        games: games.len(),
        hits: PlayerTotals::new(),
    };

    for game in games {
        let box_score = source.box_score(game).await?;
        debug!(%date, game, batters = box_score.batters.len(), "box score read");

        for line in &box_score.batters {
            if line.home_runs == 0 {
                continue;
            }
            let normalized = normalize_name(&line.name);
            if roster.contains(&normalized) {
                *tally.hits.entry(normalized).or_insert(0) += line.home_runs;
            } else {
                trace!(player = %line.name, home_runs = line.home_runs, "not rostered");
            }
        }
    }

    Ok(Some(tally))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{BatterLine, BoxScore, GameId};
    use async_trait::async_trait;
    use chrono::Datelike;
    use dingers_core::config::TeamConfig;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 5, d).unwrap()
    }

    fn roster() -> Roster {
        Roster::from_teams(&[
            TeamConfig {
                id: "JIM".into(),
                players: vec!["Cal Raleigh".into(), "Eugenio Suarez".into()],
            },
            TeamConfig {
                id: "TONY".into(),
                players: vec!["José Ramírez".into()],
            },
        ])
        .unwrap()
    }

    /// Two games on the 1st, an off day on the 2nd, one game on the 3rd.
    /// Game 31's box score is broken.
    struct ThreeDays {
        broken_box_score: bool,
    }

    fn line(name: &str, home_runs: u32) -> BatterLine {
        BatterLine {
            name: name.into(),
            home_runs,
        }
    }

    #[async_trait]
    impl StatsSource for ThreeDays {
        async fn schedule(&self, date: NaiveDate) -> Result<Vec<GameId>, SourceError> {
            Ok(match date.day() {
                1 => vec![11, 12],
                3 => vec![31],
                _ => vec![],
            })
        }

        async fn box_score(&self, game: GameId) -> Result<BoxScore, SourceError> {
            let batters = match game {
                11 => vec![line("Cal Raleigh", 2), line("Aaron Judge", 3)],
                12 => vec![line("Jose Ramirez", 1), line("Eugenio Suárez", 0)],
                31 if self.broken_box_score => {
                    return Err(SourceError::Unavailable("boxscore 31".into()))
                }
                31 => vec![line("Eugenio Suárez", 1), line("Cal Raleigh", 1)],
                _ => vec![],
            };
            Ok(BoxScore { game, batters })
        }
    }

    #[tokio::test]
    async fn accumulates_rostered_home_runs() {
        let range = DateRange::new(date(1), date(3)).unwrap();
        let report = collect_home_runs(&ThreeDays { broken_box_score: false }, &roster(), range).await;

        assert_eq!(report.total_for("cal raleigh"), 3);
        assert_eq!(report.total_for("eugenio suarez"), 1);
        assert_eq!(report.total_for("jose ramirez"), 1);
        assert_eq!(report.totals.len(), 3);
        assert!(!report.totals.contains_key("aaron judge"));
        assert_eq!(report.games_read(), 3);
        assert!(report.skipped_dates().is_empty());
        assert_eq!(report.days[1].outcome, DayOutcome::NoGames);
        assert_eq!(
            report.days[0].outcome,
            DayOutcome::Collected {
                games: 2,
                home_runs: 3
            }
        );
    }

    #[tokio::test]
    async fn failed_day_contributes_nothing() {
        let range = DateRange::new(date(1), date(3)).unwrap();
        let report = collect_home_runs(&ThreeDays { broken_box_score: true }, &roster(), range).await;

        assert_eq!(report.skipped_dates(), vec![date(3)]);
        assert_eq!(report.total_for("cal raleigh"), 2);
        assert_eq!(report.total_for("eugenio suarez"), 0);
        assert_eq!(report.games_read(), 2);
        assert!(matches!(report.days[2].outcome, DayOutcome::Failed { .. }));
    }

    #[tokio::test]
    async fn off_days_zero_fill_every_player() {
        let range = DateRange::single(date(2));
        let report = collect_home_runs(&ThreeDays { broken_box_score: false }, &roster(), range).await;

        assert_eq!(report.totals.len(), 3);
        assert!(report.totals.values().all(|&hrs| hrs == 0));
        assert_eq!(report.games_read(), 0);
    }
}
