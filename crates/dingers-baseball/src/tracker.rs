// Query service: resolves player tables through the cache, the snapshot
// store and finally the stats source, then ranks and pays out.

use chrono::NaiveDate;
use dingers_core::config::{Config, ConfigError, LeagueConfig, PayoutConfig, PayoutMode};
use dingers_core::period::{months_through, DateRange, LeagueMonth};
use dingers_core::roster::Roster;
use thiserror::Error;
use tracing::{info, warn};

use crate::cache::{CachedTable, QueryCache};
use crate::collector::collect_home_runs;
use crate::leaderboard::{build_leaderboard, TeamStanding};
use crate::payout::{accumulate_payouts, compute_payouts, PayoutRecord};
use crate::snapshot::SnapshotStore;
use crate::source::StatsSource;
use crate::table::PlayerTable;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TrackerError {
    #[error("{month} ends before the season opener on {opener}")]
    BeforeOpener { month: LeagueMonth, opener: NaiveDate },
}

/// Where a player table came from. Cached and fetched tables list the dates
/// that could not be read when they were collected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableOrigin {
    Cache { skipped_dates: Vec<NaiveDate> },
    Snapshot,
    Fetched { skipped_dates: Vec<NaiveDate> },
}

impl TableOrigin {
    pub fn skipped_dates(&self) -> &[NaiveDate] {
        match self {
            TableOrigin::Cache { skipped_dates } | TableOrigin::Fetched { skipped_dates } => {
                skipped_dates
            }
            TableOrigin::Snapshot => &[],
        }
    }
}

#[derive(Debug, Clone)]
pub struct TableLookup {
    pub range: DateRange,
    pub table: PlayerTable,
    /// Whether any game data backs the table. Without it there is nothing
    /// to rank.
    pub has_games: bool,
    pub origin: TableOrigin,
}

impl TableLookup {
    fn cached(range: DateRange, entry: &CachedTable) -> Self {
        Self {
            range,
            table: entry.table.clone(),
            has_games: entry.has_games,
            origin: TableOrigin::Cache {
                skipped_dates: entry.skipped_dates.clone(),
            },
        }
    }

    fn fetched(range: DateRange, entry: CachedTable) -> Self {
        Self {
            range,
            table: entry.table,
            has_games: entry.has_games,
            origin: TableOrigin::Fetched {
                skipped_dates: entry.skipped_dates,
            },
        }
    }
}

/// Everything the presentation layer shows for one query.
#[derive(Debug, Clone)]
pub struct Standings {
    pub range: DateRange,
    pub table: PlayerTable,
    pub has_games: bool,
    pub leaderboard: Vec<TeamStanding>,
    pub payouts: Vec<PayoutRecord>,
    pub origin: TableOrigin,
}

pub struct Tracker<S> {
    source: S,
    roster: Roster,
    league: LeagueConfig,
    payout: PayoutConfig,
    today: NaiveDate,
    cache: QueryCache,
    snapshots: Option<SnapshotStore>,
}

impl<S: StatsSource> Tracker<S> {
    /// `today` decides which months are complete enough to snapshot.
    pub fn new(
        source: S,
        roster: Roster,
        league: LeagueConfig,
        payout: PayoutConfig,
        today: NaiveDate,
    ) -> Self {
        Self {
            source,
            roster,
            league,
            payout,
            today,
            cache: QueryCache::new(),
            snapshots: None,
        }
    }

    /// Build a tracker from loaded configuration, with the snapshot store
    /// attached when enabled.
    pub fn from_config(source: S, config: &Config, today: NaiveDate) -> Result<Self, ConfigError> {
        let tracker = Self::new(
            source,
            config.roster()?,
            config.league.clone(),
            config.payout.clone(),
            today,
        );
        Ok(if config.snapshots.enabled {
            tracker.with_snapshots(SnapshotStore::new(&config.snapshots.dir))
        } else {
            tracker
        })
    }

    pub fn with_snapshots(mut self, store: SnapshotStore) -> Self {
        self.snapshots = Some(store);
        self
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn league(&self) -> &LeagueConfig {
        &self.league
    }

    pub fn payout_config(&self) -> &PayoutConfig {
        &self.payout
    }

    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    pub fn cache_mut(&mut self) -> &mut QueryCache {
        &mut self.cache
    }

    pub fn month_range(&self, month: LeagueMonth) -> Result<DateRange, TrackerError> {
        month.range(self.league.season_opener).ok_or(TrackerError::BeforeOpener {
            month,
            opener: self.league.season_opener,
        })
    }

    /// Player table for an arbitrary date range (cache, then source).
    pub async fn range_table(&mut self, range: DateRange) -> TableLookup {
        if let Some(entry) = self.cache.get(&range) {
            return TableLookup::cached(range, entry);
        }
        let entry = self.collect(range).await;
        self.cache.insert(range, entry.clone());
        TableLookup::fetched(range, entry)
    }

    /// Player table for a league month (cache, then snapshot, then source).
    ///
    /// `refresh` drops the cached table and the month's snapshot first. A
    /// freshly collected month is snapshotted only once it has ended, every
    /// date was read and at least one game was played.
    pub async fn month_table(
        &mut self,
        month: LeagueMonth,
        refresh: bool,
    ) -> Result<TableLookup, TrackerError> {
        let range = self.month_range(month)?;

        if refresh {
            self.cache.invalidate(&range);
            if let Some(store) = &self.snapshots {
                if let Err(e) = store.remove(month) {
                    warn!(%month, error = %e, "failed to remove snapshot");
                }
            }
        }

        if let Some(entry) = self.cache.get(&range) {
            return Ok(TableLookup::cached(range, entry));
        }

        if let Some(store) = &self.snapshots {
            match store.load(month) {
                Ok(Some(rows)) => {
                    // Only months with games are ever written.
                    let table = PlayerTable::from_rows(&self.roster, rows);
                    self.cache.insert(
                        range,
                        CachedTable {
                            table: table.clone(),
                            has_games: true,
                            skipped_dates: Vec::new(),
                        },
                    );
                    return Ok(TableLookup {
                        range,
                        table,
                        has_games: true,
                        origin: TableOrigin::Snapshot,
                    });
                }
                Ok(None) => {}
                Err(e) => warn!(%month, error = %e, "ignoring unreadable snapshot"),
            }
        }

        let entry = self.collect(range).await;

        if let Some(store) = &self.snapshots {
            if entry.has_games && entry.skipped_dates.is_empty() && range.end() < self.today {
                if let Err(e) = store.save(month, &entry.table) {
                    warn!(%month, error = %e, "failed to save snapshot");
                }
            }
        }

        self.cache.insert(range, entry.clone());
        Ok(TableLookup::fetched(range, entry))
    }

    /// Table, leaderboard and payouts for a month.
    ///
    /// In cumulative payout mode the payouts cover every month from the
    /// opener through `month`, each ranked on its own and summed. `refresh`
    /// only applies to `month` itself.
    pub async fn month_standings(
        &mut self,
        month: LeagueMonth,
        refresh: bool,
    ) -> Result<Standings, TrackerError> {
        let lookup = self.month_table(month, refresh).await?;
        let leaderboard = self.rank(&lookup);

        let payouts = match self.payout.mode {
            PayoutMode::Single => compute_payouts(&leaderboard, &self.payout),
            PayoutMode::Cumulative => {
                let mut periods = Vec::new();
                for earlier in months_through(self.league.season_opener, month) {
                    let board = if earlier == month {
                        leaderboard.clone()
                    } else {
                        let earlier_lookup = self.month_table(earlier, false).await?;
                        self.rank(&earlier_lookup)
                    };
                    periods.push(compute_payouts(&board, &self.payout));
                }
                accumulate_payouts(periods.iter().map(Vec::as_slice))
            }
        };

        info!(
            %month,
            teams = leaderboard.len(),
            total_hrs = lookup.table.total_hrs(),
            "standings built"
        );

        Ok(Standings {
            range: lookup.range,
            table: lookup.table,
            has_games: lookup.has_games,
            leaderboard,
            payouts,
            origin: lookup.origin,
        })
    }

    /// Table, leaderboard and single-period payouts for an arbitrary range.
    pub async fn range_standings(&mut self, range: DateRange) -> Standings {
        let lookup = self.range_table(range).await;
        let leaderboard = self.rank(&lookup);
        let payouts = compute_payouts(&leaderboard, &self.payout);
        Standings {
            range: lookup.range,
            table: lookup.table,
            has_games: lookup.has_games,
            leaderboard,
            payouts,
            origin: lookup.origin,
        }
    }

    /// A range with no game data has nothing to rank; otherwise every team
    /// is ranked, even if no rostered player homered.
    fn rank(&self, lookup: &TableLookup) -> Vec<TeamStanding> {
        if !lookup.has_games {
            return Vec::new();
        }
        build_leaderboard(&self.roster, &lookup.table, self.league.counting_players)
    }

    async fn collect(&self, range: DateRange) -> CachedTable {
        let report = collect_home_runs(&self.source, &self.roster, range).await;
        CachedTable {
            table: PlayerTable::from_totals(&self.roster, &report.totals),
            has_games: report.games_read() > 0,
            skipped_dates: report.skipped_dates(),
        }
    }
}
