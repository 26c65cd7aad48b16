//! One leaderboard run, from the score file to the ranked output file.
//!
//! The run is a single linear pass with no overlap between phases:
//!
//! 1. read every record of the source (header discarded),
//! 2. aggregate them into one statistics entry per player,
//! 3. rank and cut the players,
//! 4. write the header and the ranked rows to the output file.
//!
//! Any error aborts the run. Errors raised before step 4 leave the output file untouched; a
//! failure while writing may leave it truncated.
//!
//! # Example
//!
//! ```no_run
//! use player_ranking::prelude::*;
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = Configuration::new()
//!         .with_output_path("top.csv")
//!         .with_limit(5)
//!         .with_verbose(false);
//!     let summary = Leaderboard::new(config).run("scores.csv")?;
//!     println!("{} players ranked", summary.rows_written);
//!     Ok(())
//! }
//! ```

use std::{
    fmt, fs,
    io::{self, Write},
    path::{Path, PathBuf},
};

use tracing::{info, instrument, trace, warn};

use crate::{
    aggregator::{aggregate, PlayerAggregator},
    configuration::Configuration,
    error::{RankingError, Result},
    logger::init_logger,
    ranking::RankedRow,
    records::{write_leaderboard, ScoreReader},
};

/// What a successful run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Score events read from the source.
    pub records_read: u64,
    /// Distinct players aggregated.
    pub players: usize,
    /// Rows written, header excluded.
    pub rows_written: usize,
    /// Where the leaderboard was written.
    pub output_path: PathBuf,
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} records, {} players, {} rows written to '{}'",
            self.records_read,
            self.players,
            self.rows_written,
            self.output_path.display()
        )
    }
}

/// Runs leaderboards with a given [`Configuration`].
#[derive(Debug, Clone, Default)]
pub struct Leaderboard {
    config: Configuration,
}

impl Leaderboard {
    /// Create a [`Leaderboard`] runner.
    ///
    /// Installs the file logger when the configuration asks for it. A logger that cannot be
    /// installed is reported on stderr and the runner works without it.
    pub fn new(config: Configuration) -> Self {
        if config.log {
            if let Err(e) = init_logger(Some(config.log_dir.as_path()), config.verbose) {
                eprintln!("logging disabled: {e:#}");
            }
        }

        trace!(?config);
        Self { config }
    }

    /// Reads and ranks `source` without writing anything.
    pub fn rank_file(&self, source: impl AsRef<Path>) -> Result<Vec<RankedRow>> {
        let stats = aggregate(ScoreReader::from_path(source.as_ref())?)?;
        Ok(self.config.ranking().rank(stats))
    }

    /// Reads `source`, ranks its players and writes the leaderboard to the configured output.
    ///
    /// # Errors
    /// Returns the first I/O or malformed record error met; nothing is written in the latter case.
    /// A source that is also the output is a configuration error.
    ///
    /// Prints the summary to stdout unless the configuration is quiet.
    #[instrument(skip(self, source), fields(source = %source.as_ref().display()))]
    pub fn run(&self, source: impl AsRef<Path>) -> Result<RunSummary> {
        let summary = self.write_file(source.as_ref())?;
        if let Err(e) = self.print_summary(&mut io::stdout().lock(), &summary) {
            warn!("could not print summary: {e}");
        }
        Ok(summary)
    }

    /// Writes `summary` to `out` when the configuration is verbose.
    pub fn print_summary<W: Write>(&self, out: &mut W, summary: &RunSummary) -> io::Result<()> {
        if self.config.verbose {
            writeln!(out, "\x1b[32mOk\x1b[39m {summary}")?;
        }
        Ok(())
    }

    fn write_file(&self, source: &Path) -> Result<RunSummary> {
        if same_file(source, &self.config.output_path) {
            return Err(RankingError::Configuration(format!(
                "source '{}' is also the output file",
                source.display()
            )));
        }
        let reader = ScoreReader::from_path(source)?;
        let aggregator = PlayerAggregator::new().ingest(reader)?;
        let records_read = aggregator.records_read();
        let players = aggregator.player_count();
        let rows = self.config.ranking().rank(aggregator.finish());

        write_leaderboard(&self.config.output_path, &rows)?;

        let summary = RunSummary {
            records_read,
            players,
            rows_written: rows.len(),
            output_path: self.config.output_path.clone(),
        };
        info!(%summary, "leaderboard written");
        Ok(summary)
    }
}

/// Whether `a` and `b` name the same file. Paths that cannot be resolved, such as an output that
/// does not exist yet, are compared as written.
fn same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}
