//! Ranking of aggregated players.
//!
//! Players are grouped by rounded mean score and groups are walked from the highest mean down.
//! Every member of a group shares the same rank: one plus the number of players in all strictly
//! higher groups (so `1, 1, 3, 4, 4, 6`, ...).
//!
//! Output is cut after `limit` players according to a [`CutoffPolicy`]. The default,
//! [`CutoffPolicy::KeepTiedGroup`], never splits a group: a group that starts below the limit is
//! emitted in full even if it ends past it, so the output may exceed `limit` by up to the group
//! size minus one.
//!
//! Within a group, players are emitted in ascending identifier order.

use std::collections::BTreeMap;

use tracing::{debug, instrument};

use crate::{player_id::PlayerId, player_stats::PlayerStats};

/// Number of players kept when nothing else is configured.
pub const DEFAULT_LIMIT: usize = 10;

/// What to do with the group that crosses the limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CutoffPolicy {
    /// Emit the crossing group in full, then stop.
    #[default]
    KeepTiedGroup,
    /// Never emit more than `limit` rows, cutting the crossing group if needed.
    HardCap,
}

/// Players sharing one rounded mean score.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreGroup {
    mean_score: i64,
    players: Vec<PlayerStats>,
}

impl ScoreGroup {
    /// Shared mean score.
    pub fn mean_score(&self) -> i64 {
        self.mean_score
    }

    /// Members, sorted by identifier.
    pub fn players(&self) -> &[PlayerStats] {
        &self.players
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.players.len()
    }

    /// Always false for groups built by [`group_by_mean_score`].
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}

/// One line of the leaderboard.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RankedRow {
    /// 1-based rank of the first player of this row's group.
    pub rank: usize,
    /// Player identifier.
    pub id: PlayerId,
    /// Rounded mean score.
    pub mean_score: i64,
}

impl RankedRow {
    /// The row as written to the sink: rank, player id, mean score.
    pub fn to_fields(&self) -> [String; 3] {
        [
            self.rank.to_string(),
            self.id.to_string(),
            self.mean_score.to_string(),
        ]
    }
}

/// Groups players by mean score, highest mean first.
pub fn group_by_mean_score(stats: impl IntoIterator<Item = PlayerStats>) -> Vec<ScoreGroup> {
    // BTreeMap keeps the keys sorted, walked in reverse for a descending order
    let mut groups: BTreeMap<i64, Vec<PlayerStats>> = BTreeMap::new();
    for player in stats {
        groups.entry(player.mean_score()).or_default().push(player);
    }

    groups
        .into_iter()
        .rev()
        .map(|(mean_score, mut players)| {
            players.sort_by(|a, b| a.id().cmp(b.id()));
            ScoreGroup {
                mean_score,
                players,
            }
        })
        .collect()
}

/// Ranking settings: how many players to keep and how to treat the crossing group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ranking {
    limit: usize,
    cutoff: CutoffPolicy,
}

impl Ranking {
    /// Ranking keeping about `limit` players with the default cutoff policy.
    pub fn new(limit: usize) -> Self {
        Self {
            limit,
            cutoff: CutoffPolicy::default(),
        }
    }

    /// Change the cutoff policy.
    pub fn with_cutoff(mut self, cutoff: CutoffPolicy) -> Self {
        self.cutoff = cutoff;
        self
    }

    /// Ranks `stats` and applies the cutoff.
    #[instrument(skip(stats))]
    pub fn rank(&self, stats: impl IntoIterator<Item = PlayerStats>) -> Vec<RankedRow> {
        let groups = group_by_mean_score(stats);
        let mut rows = Vec::new();
        let mut rank = 1;

        for group in groups {
            if rows.len() >= self.limit {
                break;
            }
            let size = group.len();
            for player in group.players {
                if self.cutoff == CutoffPolicy::HardCap && rows.len() >= self.limit {
                    break;
                }
                rows.push(RankedRow {
                    rank,
                    mean_score: group.mean_score,
                    id: player.id().clone(),
                });
            }
            rank += size;
        }

        debug!(rows = rows.len(), "ranking done");
        rows
    }
}

impl Default for Ranking {
    fn default() -> Self {
        Self::new(DEFAULT_LIMIT)
    }
}

/// Ranks `stats` keeping about `limit` players, never splitting a tied group.
pub fn rank(stats: impl IntoIterator<Item = PlayerStats>, limit: usize) -> Vec<RankedRow> {
    Ranking::new(limit).rank(stats)
}

#[cfg(test)]
mod ranking_tests {
    use super::*;

    fn player(n: u16, scores: &[i64]) -> PlayerStats {
        let id = PlayerId::validate(&format!("player{n:04}")).unwrap();
        let mut stats = PlayerStats::new(id, scores[0]);
        for s in &scores[1..] {
            stats.add_score(*s).unwrap();
        }
        stats
    }

    fn ranks(rows: &[RankedRow]) -> Vec<usize> {
        rows.iter().map(|r| r.rank).collect()
    }

    #[test]
    fn test_empty_input() {
        assert!(rank(Vec::<PlayerStats>::new(), 10).is_empty());
    }

    #[test]
    fn test_round_trip_scenario() {
        let rows = rank(vec![player(2, &[15]), player(1, &[10, 20])], 10);
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.rank == 1 && r.mean_score == 15));
        // ascending id inside the group
        assert_eq!(rows[0].id.as_str(), "player0001");
        assert_eq!(rows[1].id.as_str(), "player0002");
    }

    #[test]
    fn test_descending_order_and_tie_ranks() {
        let rows = rank(
            vec![
                player(1, &[50]),
                player(2, &[90]),
                player(3, &[70]),
                player(4, &[90]),
                player(5, &[70]),
                player(6, &[10]),
            ],
            10,
        );
        assert_eq!(ranks(&rows), vec![1, 1, 3, 3, 5, 6]);
        let means: Vec<i64> = rows.iter().map(|r| r.mean_score).collect();
        assert_eq!(means, vec![90, 90, 70, 70, 50, 10]);
    }

    #[test]
    fn test_groups_sorted_descending() {
        let groups = group_by_mean_score(vec![player(1, &[-5]), player(2, &[5]), player(3, &[0])]);
        let means: Vec<i64> = groups.iter().map(ScoreGroup::mean_score).collect();
        assert_eq!(means, vec![5, 0, -5]);
        assert!(groups.iter().all(|g| g.len() == 1 && !g.is_empty()));
    }

    #[test]
    fn test_rounded_means_share_a_group() {
        // 14.6 and 15.4 both round to 15
        let groups = group_by_mean_score(vec![
            player(1, &[14, 15, 15, 15, 14]),
            player(2, &[15, 16, 15, 15, 16]),
        ]);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].mean_score(), 15);
        assert_eq!(groups[0].players().len(), 2);
    }

    #[test]
    fn test_eleven_singletons_limit_ten() {
        let players = (1..=11).map(|n| player(n, &[100 - n as i64])).collect::<Vec<_>>();
        let rows = rank(players, 10);
        assert_eq!(rows.len(), 10);
        assert_eq!(ranks(&rows), (1..=10).collect::<Vec<_>>());
        assert!(rows.iter().all(|r| r.id.as_str() != "player0011"));
    }

    #[test]
    fn test_crossing_group_kept_whole() {
        // 9 singletons then a group of 3 starting at rank 10
        let mut players = (1..=9).map(|n| player(n, &[100 - n as i64])).collect::<Vec<_>>();
        players.extend((10..=12).map(|n| player(n, &[50])));
        players.push(player(13, &[1]));
        let rows = rank(players, 10);
        assert_eq!(rows.len(), 12);
        assert_eq!(&ranks(&rows)[9..], &[10, 10, 10]);
    }

    #[test]
    fn test_group_starting_at_limit_is_dropped() {
        // 10 singletons fill the limit, the following tie group is excluded
        let mut players = (1..=10).map(|n| player(n, &[100 - n as i64])).collect::<Vec<_>>();
        players.extend((11..=12).map(|n| player(n, &[50])));
        let rows = rank(players, 10);
        assert_eq!(rows.len(), 10);
    }

    #[test]
    fn test_single_group_ignores_limit() {
        let players = (1..=15).map(|n| player(n, &[7])).collect::<Vec<_>>();
        let rows = rank(players, 10);
        assert_eq!(rows.len(), 15);
        assert!(rows.iter().all(|r| r.rank == 1));
    }

    #[test]
    fn test_hard_cap_cuts_group() {
        let players = (1..=15).map(|n| player(n, &[7])).collect::<Vec<_>>();
        let rows = Ranking::new(10)
            .with_cutoff(CutoffPolicy::HardCap)
            .rank(players);
        assert_eq!(rows.len(), 10);
        assert!(rows.iter().all(|r| r.rank == 1));
        assert_eq!(rows[9].id.as_str(), "player0010");
    }

    #[test]
    fn test_zero_limit() {
        assert!(rank(vec![player(1, &[1])], 0).is_empty());
    }

    #[test]
    fn test_to_fields() {
        let rows = rank(vec![player(7, &[-3])], 10);
        assert_eq!(rows[0].to_fields(), ["1", "player0007", "-3"].map(String::from));
    }

    #[test]
    fn test_default_ranking() {
        assert_eq!(Ranking::default(), Ranking::new(DEFAULT_LIMIT));
    }
}
