//! # Player Ranking
//!
//! Turns a CSV log of per-event player scores into a top-N leaderboard.
//!
//! It provides:
//! - Player identifier validation ([`PlayerId`](crate::player_id::PlayerId))
//! - Per-player score aggregation ([`PlayerAggregator`](crate::aggregator::PlayerAggregator))
//! - Tie-aware ranking with a cutoff that never splits tied players
//!   ([`Ranking`](crate::ranking::Ranking))
//! - A one-shot runner reading the source file and writing the leaderboard
//!   ([`Leaderboard`](crate::leaderboard::Leaderboard))
//!
//! # Input & Output
//!
//! The source is a CSV file with a header row followed by `ignored,player_id,score` rows:
//!
//! ```text
//! create_timestamp,player_id,score
//! 2021/01/01 12:00,player0001,12345
//! 2021/01/02 13:00,player0002,10000
//! ```
//!
//! The leaderboard is written as `rank,player_id,mean_score` rows, best mean score first. Players
//! with the same rounded mean share the rank of the first of them:
//!
//! ```text
//! rank,player_id,mean_score
//! 1,player0001,12345
//! 2,player0002,10000
//! ```
//!
//! # Documentation Overview
//!
//! - For the identifier shape, see the [`player_id`] module.
//! - For the rounding rule of mean scores, see [`PlayerStats::mean_score`](crate::player_stats::PlayerStats::mean_score).
//! - For rank assignment and the cutoff, see the [`ranking`] module.
//! - For the run phases and failure behavior, see the [`leaderboard`] module.
//!
//! # Usage Example
//!
//! ```rust
//! use player_ranking::prelude::*;
//!
//! let records = vec![
//!     Ok(RawRecord::new(2, vec!["l1".into(), "player0001".into(), "10".into()])),
//!     Ok(RawRecord::new(3, vec!["l2".into(), "player0001".into(), "20".into()])),
//!     Ok(RawRecord::new(4, vec!["l3".into(), "player0002".into(), "15".into()])),
//! ];
//! let stats = aggregate(records).unwrap();
//! let rows = rank(stats, 10);
//!
//! assert_eq!(rows.len(), 2);
//! assert!(rows.iter().all(|row| row.rank == 1 && row.mean_score == 15));
//! ```
#![warn(missing_docs)]

pub use anyhow;
pub mod aggregator;
pub mod configuration;
pub mod error;
pub mod leaderboard;
pub mod logger;
pub mod player_id;
pub mod player_stats;
pub mod ranking;
pub mod records;

/// Commonly used types and functions for quick access.
///
/// ```rust
/// use player_ranking::prelude::*;
/// ```
pub mod prelude {
    pub use crate::aggregator::{aggregate, PlayerAggregator};
    pub use crate::configuration::Configuration;
    pub use crate::error::RankingError;
    pub use crate::leaderboard::{Leaderboard, RunSummary};
    pub use crate::player_id::PlayerId;
    pub use crate::player_stats::PlayerStats;
    pub use crate::ranking::{rank, CutoffPolicy, RankedRow, Ranking};
    pub use crate::records::RawRecord;
}
