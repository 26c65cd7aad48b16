//! Errors raised while building a leaderboard.
//!
//! Every error is terminal for a run: there is no retry and no partial output.

use std::path::PathBuf;

use thiserror::Error;

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, RankingError>;

/// Everything that can abort a ranking run.
#[derive(Debug, Error)]
pub enum RankingError {
    /// Invalid invocation or configuration values.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The source could not be opened or read, or the sink could not be created or written.
    #[error("I/O error on '{}': {source}", path.display())]
    Io {
        /// File the operation was performed on.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// A token does not match the `player` + four digits shape.
    #[error("invalid player id: '{0}'")]
    InvalidIdentifier(String),

    /// The header or a data row cannot be turned into a score event.
    #[error("malformed record at line {line}: '{token}' ({reason})")]
    MalformedRecord {
        /// 1-based line in the source, 0 when unknown.
        line: u64,
        /// The offending token (or the whole row when the shape is wrong).
        token: String,
        /// Why the token was rejected.
        reason: String,
    },
}

impl RankingError {
    pub(crate) fn malformed(
        line: u64,
        token: impl Into<String>,
        reason: impl Into<String>,
    ) -> RankingError {
        RankingError::MalformedRecord {
            line,
            token: token.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> RankingError {
        RankingError::Io {
            path: path.into(),
            source,
        }
    }
}
