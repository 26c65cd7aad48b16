//! CSV source of score records and sink of leaderboard rows.
//!
//! The source is a CSV file whose first row is a header (read and discarded) followed by rows of
//! `[ignored, player_id, score]`. The sink gets the header `rank,player_id,mean_score` and then one
//! row per [`RankedRow`].

use std::{
    fs::File,
    io::{self, Read, Write},
    path::{Path, PathBuf},
};

use tracing::{debug, instrument};

use crate::{
    error::{RankingError, Result},
    ranking::RankedRow,
};

/// Header written before the leaderboard rows.
pub const OUTPUT_HEADER: [&str; 3] = ["rank", "player_id", "mean_score"];

/// Index of the player id column.
const ID_FIELD: usize = 1;
/// Index of the score column.
const SCORE_FIELD: usize = 2;

/// One data row of the source, not validated yet.
///
/// The player id and score fields are exact UTF-8. Other columns are never looked at and are
/// decoded lossily.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    /// 1-based line of the row in the source (0 when unknown).
    pub line: u64,
    /// Raw fields.
    pub fields: Vec<String>,
}

impl RawRecord {
    /// Record read at `line`.
    pub fn new(line: u64, fields: Vec<String>) -> Self {
        Self { line, fields }
    }
}

/// Reads score records from CSV data, yielding them one by one.
pub struct ScoreReader<R: Read> {
    records: csv::ByteRecordsIntoIter<R>,
    origin: PathBuf,
}

impl ScoreReader<File> {
    /// Opens `path` and consumes its header row.
    ///
    /// # Errors
    /// [`RankingError::Io`] if the file cannot be opened, [`RankingError::MalformedRecord`] if the
    /// header is missing.
    #[instrument]
    pub fn from_path(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| RankingError::io(path, e))?;
        ScoreReader::new(file, path)
    }
}

impl<R: Read> ScoreReader<R> {
    /// Wraps `reader` and consumes its header row without looking at its content. `origin` is
    /// only used in error messages.
    pub fn new(reader: R, origin: impl Into<PathBuf>) -> Result<Self> {
        let origin = origin.into();
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let header = reader
            .byte_headers()
            .map_err(|e| csv_error(&origin, e, "unreadable header"))?;
        if header.is_empty() {
            return Err(RankingError::malformed(1, "", "missing header"));
        }
        debug!(fields = header.len(), "header skipped");

        Ok(Self {
            records: reader.into_byte_records(),
            origin,
        })
    }
}

impl<R: Read> Iterator for ScoreReader<R> {
    type Item = Result<RawRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        let record = match self.records.next()? {
            Ok(record) => record,
            Err(e) => return Some(Err(csv_error(&self.origin, e, "unreadable row"))),
        };
        let line = record.position().map_or(0, csv::Position::line);
        let mut fields = Vec::with_capacity(record.len());
        for (i, field) in record.iter().enumerate() {
            let field = if i == ID_FIELD || i == SCORE_FIELD {
                match std::str::from_utf8(field) {
                    Ok(token) => token.to_owned(),
                    Err(e) => {
                        return Some(Err(RankingError::malformed(
                            line,
                            String::from_utf8_lossy(field),
                            format!("invalid UTF-8: {e}"),
                        )))
                    }
                }
            } else {
                String::from_utf8_lossy(field).into_owned()
            };
            fields.push(field);
        }
        Some(Ok(RawRecord::new(line, fields)))
    }
}

/// Writes the header and `rows` as CSV to `writer`.
pub fn write_rows<W: Write>(writer: W, rows: &[RankedRow]) -> io::Result<()> {
    let mut writer = csv::Writer::from_writer(writer);
    writer.write_record(OUTPUT_HEADER).map_err(into_io)?;
    for row in rows {
        writer.write_record(row.to_fields()).map_err(into_io)?;
    }
    writer.flush()
}

/// Creates (or truncates) `path` and writes the leaderboard to it.
///
/// # Errors
/// [`RankingError::Io`] if the file cannot be created or written. The file may already have been
/// truncated when a write fails.
#[instrument(skip(rows), fields(rows = rows.len()))]
pub fn write_leaderboard(path: &Path, rows: &[RankedRow]) -> Result<()> {
    let file = File::create(path).map_err(|e| RankingError::io(path, e))?;
    write_rows(file, rows).map_err(|e| RankingError::io(path, e))
}

fn csv_error(origin: &Path, err: csv::Error, what: &str) -> RankingError {
    let line = err.position().map_or(0, csv::Position::line);
    let message = err.to_string();
    match err.into_kind() {
        csv::ErrorKind::Io(e) => RankingError::io(origin, e),
        _ => RankingError::malformed(line, "", format!("{what}: {message}")),
    }
}

fn into_io(err: csv::Error) -> io::Error {
    let message = err.to_string();
    match err.into_kind() {
        csv::ErrorKind::Io(e) => e,
        _ => io::Error::other(message),
    }
}
