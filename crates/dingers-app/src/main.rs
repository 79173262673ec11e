// Fantasy home-run tracker entry point.
//
// Startup sequence:
// 1. Initialize tracing (stderr, so stdout carries only the tables)
// 2. Parse the command line
// 3. Load config (copying defaults on first run)
// 4. Build the MLB client and the tracker
// 5. Run the command and print the result

mod render;

use anyhow::{bail, Context};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing::info;

use dingers_baseball::mlb::MlbStatsClient;
use dingers_baseball::{Standings, Tracker};
use dingers_core::config::{self, Config, PayoutMode};
use dingers_core::period::{available_months, DateRange, LeagueMonth};

#[derive(Parser)]
#[command(name = "dingers")]
#[command(about = "Fantasy home-run leaderboard and payouts from MLB box scores")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// List the months that can be selected, most recent first
    Months,

    /// Leaderboard, payouts and player stats for one month
    Standings {
        /// Month as YYYY-MM (defaults to the most recent month)
        #[arg(short, long)]
        month: Option<LeagueMonth>,

        /// Only show this team's player breakdown
        #[arg(short, long)]
        team: Option<String>,

        /// Discard cached and saved data for the month and fetch it again
        #[arg(long)]
        refresh: bool,
    },

    /// Leaderboard and payouts for an arbitrary date range
    Range {
        /// First date, YYYY-MM-DD
        #[arg(long)]
        from: NaiveDate,

        /// Last date (inclusive), YYYY-MM-DD
        #[arg(long)]
        to: NaiveDate,

        /// Only show this team's player breakdown
        #[arg(short, long)]
        team: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize tracing
    init_tracing()?;

    // 2. Parse the command line
    let cli = Cli::parse();

    // 3. Load config
    let config = config::load_config().context("failed to load configuration")?;
    info!(
        "Config loaded: league={}, {} teams, top {} count",
        config.league.name,
        config.teams.len(),
        config.league.counting_players
    );

    let today = chrono::Local::now().date_naive();

    match cli.command.unwrap_or(Command::Standings {
        month: None,
        team: None,
        refresh: false,
    }) {
        Command::Months => {
            let months = available_months(config.league.season_opener, today);
            if months.is_empty() {
                println!(
                    "The season opens on {}; no months to show yet.",
                    config.league.season_opener
                );
            }
            for month in months {
                println!("{month}  {}", month.title());
            }
        }
        Command::Standings {
            month,
            team,
            refresh,
        } => {
            let month = match month {
                Some(m) => m,
                None => match available_months(config.league.season_opener, today).first() {
                    Some(m) => *m,
                    None => bail!(
                        "the season opens on {}; there is nothing to show yet",
                        config.league.season_opener
                    ),
                },
            };

            // 4. Build the MLB client and the tracker
            let mut tracker = build_tracker(&config, today)?;
            check_team(&tracker, team.as_deref())?;

            // 5. Run and print
            let standings = tracker
                .month_standings(month, refresh)
                .await
                .with_context(|| format!("cannot show standings for {month}"))?;
            let payout_label = match config.payout.mode {
                PayoutMode::Single => None,
                PayoutMode::Cumulative => Some(format!(
                    "season to date through {}",
                    month.title()
                )),
            };
            print_standings(
                &tracker,
                &month.title(),
                &standings,
                payout_label.as_deref(),
                team.as_deref(),
            );
        }
        Command::Range { from, to, team } => {
            let range = DateRange::new(from, to).context("invalid date range")?;

            let mut tracker = build_tracker(&config, today)?;
            check_team(&tracker, team.as_deref())?;

            let standings = tracker.range_standings(range).await;
            print_standings(&tracker, &range.to_string(), &standings, None, team.as_deref());
        }
    }

    Ok(())
}

fn build_tracker(config: &Config, today: NaiveDate) -> anyhow::Result<Tracker<MlbStatsClient>> {
    let client =
        MlbStatsClient::from_config(&config.stats_api).context("failed to create MLB client")?;
    let tracker =
        Tracker::from_config(client, config, today).context("failed to build roster")?;
    Ok(tracker)
}

fn check_team(tracker: &Tracker<MlbStatsClient>, team: Option<&str>) -> anyhow::Result<()> {
    if let Some(team) = team {
        if tracker.roster().team_position(team).is_none() {
            bail!(
                "unknown team `{team}`; teams are: {}",
                tracker.roster().team_ids().join(", ")
            );
        }
    }
    Ok(())
}

fn print_standings(
    tracker: &Tracker<MlbStatsClient>,
    title: &str,
    standings: &Standings,
    payout_label: Option<&str>,
    team: Option<&str>,
) {
    println!(
        "{}",
        render::leaderboard(
            title,
            &standings.leaderboard,
            tracker.league().counting_players
        )
    );
    if let Some(label) = payout_label {
        println!("({label})");
    }
    println!("{}", render::payouts(&standings.payouts));

    let teams: Vec<&str> = match team {
        Some(team) => vec![team],
        None => tracker.roster().team_ids().iter().map(String::as_str).collect(),
    };
    for team in teams {
        println!("{}", render::team_breakdown(&standings.table, team));
    }

    if let Some(note) = render::origin_note(&standings.origin) {
        println!("{note}");
    }
}

/// Initialize tracing to stderr; `RUST_LOG` overrides the default filter.
fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new("dingers_app=info,dingers_baseball=info,dingers_core=info,warn")
        }))
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
