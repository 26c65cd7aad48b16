//! Per-player running statistics.

use crate::player_id::PlayerId;

/// Cumulative score of one player over a run.
///
/// Created on the player's first score event and updated in place by
/// [`PlayerAggregator`](crate::aggregator::PlayerAggregator) on each later one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerStats {
    id: PlayerId,
    total_score: i64,
    play_count: u64,
}

impl PlayerStats {
    /// Statistics after a single event.
    pub fn new(id: PlayerId, score: i64) -> PlayerStats {
        PlayerStats {
            id,
            total_score: score,
            play_count: 1,
        }
    }

    /// Folds one more score in. Returns `None` (leaving `self` untouched) if the total would
    /// overflow.
    pub fn add_score(&mut self, score: i64) -> Option<()> {
        self.total_score = self.total_score.checked_add(score)?;
        self.play_count += 1;
        Some(())
    }

    /// Player identifier.
    pub fn id(&self) -> &PlayerId {
        &self.id
    }

    /// Sum of all scores seen.
    pub fn total_score(&self) -> i64 {
        self.total_score
    }

    /// Number of score events folded in, always at least 1.
    pub fn play_count(&self) -> u64 {
        self.play_count
    }

    /// Mean score rounded to the nearest integer, halves away from zero (`2.5 -> 3`,
    /// `-2.5 -> -3`).
    pub fn mean_score(&self) -> i64 {
        (self.total_score as f64 / self.play_count as f64).round() as i64
    }
}
