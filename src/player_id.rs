//! Player identifiers.
//!
//! A [`PlayerId`] is the literal `player` followed by exactly four ASCII digits. Validation looks
//! for that shape at the *end* of the raw token and keeps only the match, so leading characters
//! are dropped (`"xxplayer0001"` gives `player0001`) while anything after the digits rejects the
//! token (`"player0001x"` is invalid).

use std::{fmt, str::FromStr, sync::LazyLock};

use regex::Regex;
use tracing::debug;

use crate::error::{RankingError, Result};

// `\d` would also accept non-ASCII digits
static PLAYER_ID_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"player[0-9]{4}$").expect("player id pattern is valid"));

/// Canonical player identifier. The only way to get one is [`PlayerId::validate`] (or `parse`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PlayerId(String);

impl PlayerId {
    /// Extracts the canonical identifier from `raw`.
    ///
    /// # Errors
    /// [`RankingError::InvalidIdentifier`] when `raw` does not end with `player` + four digits.
    pub fn validate(raw: &str) -> Result<PlayerId> {
        match PLAYER_ID_PATTERN.find(raw) {
            Some(m) => Ok(PlayerId(m.as_str().to_owned())),
            None => {
                debug!("rejected player id {raw:?}");
                Err(RankingError::InvalidIdentifier(raw.to_owned()))
            }
        }
    }

    /// The identifier as written in the output.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The four digits as a number (`player0042` -> 42).
    pub fn number(&self) -> u16 {
        // the pattern guarantees four ASCII digits after the 6-byte prefix
        self.0[6..].parse().unwrap_or_default()
    }
}

impl FromStr for PlayerId {
    type Err = RankingError;

    fn from_str(s: &str) -> Result<Self> {
        PlayerId::validate(s)
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for PlayerId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
