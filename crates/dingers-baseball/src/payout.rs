// Entry fees and prizes from a team ranking.

use dingers_core::config::PayoutConfig;
use serde::Serialize;

use crate::leaderboard::TeamStanding;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PayoutRecord {
    pub team: String,
    pub paid: u32,
    pub won: u32,
    /// `won - paid`.
    pub net: i64,
}

impl PayoutRecord {
    fn new(team: String, paid: u32, won: u32) -> Self {
        Self {
            team,
            paid,
            won,
            net: i64::from(won) - i64::from(paid),
        }
    }
}

/// One record per ranked team, in ranking order. Each team pays the entry
/// fee; the team at rank `i` wins `prizes[i]` (zero past the end of the
/// prize list). An empty ranking pays out nothing.
pub fn compute_payouts(leaderboard: &[TeamStanding], config: &PayoutConfig) -> Vec<PayoutRecord> {
    leaderboard
        .iter()
        .enumerate()
        .map(|(rank, standing)| {
            let won = config.prizes.get(rank).copied().unwrap_or(0);
            PayoutRecord::new(standing.team.clone(), config.entry_fee, won)
        })
        .collect()
}

/// Sum payouts across several periods, per team. Teams appear in the order
/// they are first seen.
pub fn accumulate_payouts<'a, I>(periods: I) -> Vec<PayoutRecord>
where
    I: IntoIterator<Item = &'a [PayoutRecord]>,
{
    let mut totals: Vec<PayoutRecord> = Vec::new();
    for period in periods {
        for record in period {
            match totals.iter_mut().find(|t| t.team == record.team) {
                Some(total) => {
                    total.paid += record.paid;
                    total.won += record.won;
                    total.net += record.net;
                }
                None => totals.push(record.clone()),
            }
        }
    }
    totals
}

#[cfg(test)]
mod tests {
    use super::*;

    fn standings(teams: &[(&str, u32)]) -> Vec<TeamStanding> {
        teams
            .iter()
            .map(|(team, hrs)| TeamStanding {
                team: team.to_string(),
                hrs: *hrs,
                counted: 1,
            })
            .collect()
    }

    fn total_won(records: &[PayoutRecord]) -> u32 {
        records.iter().map(|r| r.won).sum()
    }

    #[test]
    fn two_team_scenario() {
        let payouts = compute_payouts(&standings(&[("B", 10), ("A", 8)]), &PayoutConfig::default());
        assert_eq!(
            payouts,
            vec![
                PayoutRecord {
                    team: "B".into(),
                    paid: 10,
                    won: 35,
                    net: 25
                },
                PayoutRecord {
                    team: "A".into(),
                    paid: 10,
                    won: 15,
                    net: 5
                },
            ]
        );
    }

    #[test]
    fn prize_pool_by_ranked_team_count() {
        let config = PayoutConfig::default();
        assert_eq!(total_won(&compute_payouts(&standings(&[]), &config)), 0);
        assert_eq!(total_won(&compute_payouts(&standings(&[("A", 1)]), &config)), 35);
        assert_eq!(
            total_won(&compute_payouts(&standings(&[("A", 3), ("B", 2)]), &config)),
            50
        );
        assert_eq!(
            total_won(&compute_payouts(
                &standings(&[("A", 3), ("B", 2), ("C", 1), ("D", 0)]),
                &config
            )),
            50
        );
    }

    #[test]
    fn teams_past_prize_list_lose_fee() {
        let payouts = compute_payouts(
            &standings(&[("A", 3), ("B", 2), ("C", 1)]),
            &PayoutConfig::default(),
        );
        assert_eq!(payouts[2].won, 0);
        assert_eq!(payouts[2].net, -10);
    }

    #[test]
    fn empty_ranking_pays_nothing() {
        assert!(compute_payouts(&[], &PayoutConfig::default()).is_empty());
    }

    #[test]
    fn custom_fee_and_prizes() {
        let config = PayoutConfig {
            entry_fee: 20,
            prizes: vec![50, 20, 10],
            ..PayoutConfig::default()
        };
        let payouts = compute_payouts(&standings(&[("A", 3), ("B", 2), ("C", 1)]), &config);
        let nets: Vec<i64> = payouts.iter().map(|p| p.net).collect();
        assert_eq!(nets, vec![30, 0, -10]);
    }

    #[test]
    fn accumulates_across_periods() {
        let config = PayoutConfig::default();
        let april = compute_payouts(&standings(&[("A", 9), ("B", 4)]), &config);
        let may = compute_payouts(&standings(&[("B", 7), ("C", 5), ("A", 1)]), &config);

        let season = accumulate_payouts([april.as_slice(), may.as_slice()]);
        let find = |team: &str| season.iter().find(|r| r.team == team).unwrap().clone();

        assert_eq!(season.len(), 3);
        assert_eq!(season[0].team, "A");
        assert_eq!(find("A"), PayoutRecord::new("A".into(), 20, 35));
        assert_eq!(find("B"), PayoutRecord::new("B".into(), 20, 50));
        assert_eq!(find("C"), PayoutRecord::new("C".into(), 10, 15));
        assert_eq!(total_won(&season), 100);
    }

    #[test]
    fn accumulating_nothing_is_empty() {
        let none: Vec<&[PayoutRecord]> = Vec::new();
        assert!(accumulate_payouts(none).is_empty());
    }
}
