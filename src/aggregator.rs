//! Folds a stream of score records into one [`PlayerStats`] per player.
//!
//! Records are `[ignored, player_id, score]`. The first invalid record aborts the whole
//! aggregation: no partial statistics are ever handed out.

use std::collections::HashMap;

use tracing::{debug, info, instrument, trace};

use crate::{
    error::{RankingError, Result},
    player_id::PlayerId,
    player_stats::PlayerStats,
    records::RawRecord,
};

/// Accumulates per-player statistics, keyed by identifier.
#[derive(Debug, Default)]
pub struct PlayerAggregator {
    players: HashMap<PlayerId, PlayerStats>,
    records_read: u64,
}

impl PlayerAggregator {
    /// Empty aggregator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one already validated score event.
    ///
    /// Returns `None` if the player's total would overflow.
    pub fn add_score(&mut self, id: PlayerId, score: i64) -> Option<()> {
        match self.players.get_mut(&id) {
            Some(stats) => stats.add_score(score),
            None => {
                trace!("new player {id}");
                self.players.insert(id.clone(), PlayerStats::new(id, score));
                Some(())
            }
        }
    }

    /// Validates one record and folds it in. Records without any field are skipped.
    ///
    /// # Errors
    /// [`RankingError::MalformedRecord`] when the row has fewer than three fields, the id does
    /// not validate, the score is not a base-10 integer or the player's total overflows.
    pub fn ingest_record(&mut self, record: &RawRecord) -> Result<()> {
        let fields = &record.fields;
        if fields.is_empty() {
            trace!(line = record.line, "skipping empty record");
            return Ok(());
        }
        let [_, id_token, score_token, ..] = fields.as_slice() else {
            return Err(RankingError::malformed(
                record.line,
                fields.join(","),
                format!("expected 3 fields, found {}", fields.len()),
            ));
        };

        let id = PlayerId::validate(id_token).map_err(|e| {
            RankingError::malformed(record.line, id_token.as_str(), e.to_string())
        })?;
        let score: i64 = score_token.parse().map_err(|e| {
            RankingError::malformed(
                record.line,
                score_token.as_str(),
                format!("score is not an integer: {e}"),
            )
        })?;

        self.add_score(id, score).ok_or_else(|| {
            RankingError::malformed(record.line, score_token.as_str(), "total score overflow")
        })?;
        self.records_read += 1;
        Ok(())
    }

    /// Consumes `records` until exhausted. Stops at the first error, read or validation.
    #[instrument(skip_all)]
    pub fn ingest<I>(mut self, records: I) -> Result<Self>
    where
        I: IntoIterator<Item = Result<RawRecord>>,
    {
        for record in records {
            self.ingest_record(&record?)?;
        }
        info!(
            records = self.records_read,
            players = self.players.len(),
            "aggregation done"
        );
        Ok(self)
    }

    /// Number of score events folded in so far.
    pub fn records_read(&self) -> u64 {
        self.records_read
    }

    /// Number of distinct players seen so far.
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// Statistics of one player, if seen.
    pub fn get(&self, id: &PlayerId) -> Option<&PlayerStats> {
        self.players.get(id)
    }

    /// Final statistics. The order is unspecified.
    pub fn finish(self) -> Vec<PlayerStats> {
        debug!("handing over {} players", self.players.len());
        self.players.into_values().collect()
    }
}

/// Runs a fresh [`PlayerAggregator`] over `records` and returns the final statistics.
pub fn aggregate<I>(records: I) -> Result<Vec<PlayerStats>>
where
    I: IntoIterator<Item = Result<RawRecord>>,
{
    Ok(PlayerAggregator::new().ingest(records)?.finish())
}

#[cfg(test)]
mod aggregator_tests {
    use super::*;

    fn record(line: u64, fields: &[&str]) -> Result<RawRecord> {
        Ok(RawRecord::new(line, fields.iter().map(|f| f.to_string()).collect()))
    }

    fn id(raw: &str) -> PlayerId {
        PlayerId::validate(raw).unwrap()
    }

    #[test]
    fn test_round_trip_scenario() {
        let aggregator = PlayerAggregator::new()
            .ingest(vec![
                record(2, &["l1", "player0001", "10"]),
                record(3, &["l2", "player0001", "20"]),
                record(4, &["l3", "player0002", "15"]),
            ])
            .unwrap();

        let p1 = aggregator.get(&id("player0001")).unwrap();
        assert_eq!((p1.total_score(), p1.play_count(), p1.mean_score()), (30, 2, 15));
        let p2 = aggregator.get(&id("player0002")).unwrap();
        assert_eq!((p2.total_score(), p2.play_count(), p2.mean_score()), (15, 1, 15));
        assert_eq!(aggregator.records_read(), 3);
        assert_eq!(aggregator.player_count(), 2);
    }

    #[test]
    fn test_canonical_id_merges_prefixed_tokens() {
        let stats = aggregate(vec![
            record(2, &["a", "player0001", "1"]),
            record(3, &["b", "xxplayer0001", "3"]),
        ])
        .unwrap();
        assert_eq!(stats.len(), 1);
        assert_eq!(stats[0].total_score(), 4);
        assert_eq!(stats[0].play_count(), 2);
    }

    #[test]
    fn test_empty_record_skipped() {
        let stats = aggregate(vec![
            record(2, &[]),
            record(3, &["a", "player0001", "5"]),
            record(4, &[]),
        ])
        .unwrap();
        assert_eq!(stats.len(), 1);
        assert_eq!(stats[0].play_count(), 1);
    }

    #[test]
    fn test_signed_scores() {
        let stats = aggregate(vec![
            record(2, &["a", "player0001", "-10"]),
            record(3, &["a", "player0001", "+4"]),
        ])
        .unwrap();
        assert_eq!(stats[0].total_score(), -6);
    }

    #[test]
    fn test_bad_score_aborts() {
        let err = aggregate(vec![
            record(2, &["a", "player0001", "5"]),
            record(3, &["a", "player0002", "abc"]),
        ])
        .unwrap_err();
        match err {
            RankingError::MalformedRecord { line, token, .. } => {
                assert_eq!(line, 3);
                assert_eq!(token, "abc");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_bad_id_aborts() {
        let err = aggregate(vec![record(2, &["a", "player0001x", "5"])]).unwrap_err();
        assert!(
            matches!(err, RankingError::MalformedRecord { ref token, .. } if token == "player0001x")
        );
    }

    #[test]
    fn test_short_record_aborts() {
        let err = aggregate(vec![record(2, &["a", "player0001"])]).unwrap_err();
        assert!(matches!(err, RankingError::MalformedRecord { line: 2, .. }));
    }

    #[test]
    fn test_extra_fields_ignored() {
        let stats = aggregate(vec![record(2, &["a", "player0001", "5", "extra"])]).unwrap();
        assert_eq!(stats[0].total_score(), 5);
    }

    #[test]
    fn test_source_error_aborts() {
        let err = aggregate(vec![
            record(2, &["a", "player0001", "5"]),
            Err(RankingError::malformed(3, "\u{fffd}", "invalid UTF-8")),
        ])
        .unwrap_err();
        assert!(matches!(err, RankingError::MalformedRecord { line: 3, .. }));
    }

    #[test]
    fn test_overflow_aborts() {
        let max = i64::MAX.to_string();
        let err = aggregate(vec![
            record(2, &["a", "player0001", &max]),
            record(3, &["a", "player0001", "1"]),
        ])
        .unwrap_err();
        assert!(matches!(err, RankingError::MalformedRecord { line: 3, .. }));
    }

    #[test]
    fn test_no_records() {
        assert!(aggregate(Vec::<Result<RawRecord>>::new()).unwrap().is_empty());
    }
}
