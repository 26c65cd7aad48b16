//! Config for a leaderboard run
//!
//! A [`Configuration`] is built programmatically with [`Configuration::new()`] and the `with_*`
//! methods. The binary maps its command line flags onto it; nothing is read from the environment.

use std::path::{Path, PathBuf};

use crate::ranking::{CutoffPolicy, Ranking, DEFAULT_LIMIT};

/// Output file used when none is given.
pub const DEFAULT_OUTPUT_PATH: &str = "output.csv";

/// Configuration for a leaderboard run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    pub(crate) output_path: PathBuf,
    pub(crate) limit: usize,
    pub(crate) cutoff: CutoffPolicy,
    pub(crate) verbose: bool,
    pub(crate) log: bool,
    pub(crate) log_dir: PathBuf,
}

impl Configuration {
    /// Create a new configuration with default parameters.
    ///
    /// By default:
    /// - The leaderboard is written to `output.csv` in the working directory.
    /// - About 10 players are kept, tied groups are never split.
    /// - [`Leaderboard::run`](crate::leaderboard::Leaderboard::run) prints a summary to stdout.
    /// - Logging to file is disabled. When enabled, the log file goes to the working directory.
    pub fn new() -> Self {
        Self {
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            limit: DEFAULT_LIMIT,
            cutoff: CutoffPolicy::KeepTiedGroup,
            verbose: true,
            log: false,
            log_dir: PathBuf::from("."),
        }
    }

    /// Set the file the leaderboard is written to.
    pub fn with_output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = path.into();
        self
    }

    /// Set the number of players to keep.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Set what happens to the tied group crossing the limit.
    pub fn with_cutoff(mut self, cutoff: CutoffPolicy) -> Self {
        self.cutoff = cutoff;
        self
    }

    /// Enable or disable silent mode.
    pub fn with_verbose(mut self, value: bool) -> Self {
        self.verbose = value;
        self
    }

    /// Enable or disable logging to file.
    ///
    /// The logger is installed when a [`Leaderboard`](crate::leaderboard::Leaderboard) is created
    /// from this configuration, and only if no global subscriber is set yet.
    pub fn with_log(mut self, value: bool) -> Self {
        self.log = value;
        self
    }

    /// Set the directory log files are created in.
    pub fn with_log_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.log_dir = dir.into();
        self
    }

    /// File the leaderboard is written to.
    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// Number of players to keep.
    pub fn limit(&self) -> usize {
        self.limit
    }

    pub(crate) fn ranking(&self) -> Ranking {
        Ranking::new(self.limit).with_cutoff(self.cutoff)
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Self::new()
    }
}
