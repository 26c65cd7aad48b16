//! Tracing subscriber setup.

use std::{fs::File, path::Path};

use anyhow::Context;
use time::{
    format_description::{self, parse},
    OffsetDateTime,
};
use tracing::{subscriber::set_global_default, Level};
use tracing_subscriber::{fmt::writer::BoxMakeWriter, FmtSubscriber};

/// Installs the global tracing subscriber.
///
/// With a `log_dir`, every event goes to a timestamped log file in that directory.
/// Otherwise events go to stderr, `INFO` and above when `verbose`, `WARN` and above if not.
///
/// Fails if the log file cannot be created or a global subscriber is already set.
pub fn init_logger(log_dir: Option<&Path>, verbose: bool) -> anyhow::Result<()> {
    let local_offset =
        time::UtcOffset::current_local_offset().unwrap_or(time::UtcOffset::UTC);
    let timer = tracing_subscriber::fmt::time::OffsetTime::new(
        local_offset,
        format_description::parse("[year]-[month]-[day] [hour]:[minute]:[second]")?,
    );

    let (writer, level) = if let Some(dir) = log_dir {
        let path = dir.join(get_log_file_name()?);
        let file = File::create(&path)
            .with_context(|| format!("could not create log file '{}'", path.display()))?;
        (BoxMakeWriter::new(file), Level::TRACE)
    } else if verbose {
        (BoxMakeWriter::new(std::io::stderr), Level::INFO)
    } else {
        (BoxMakeWriter::new(std::io::stderr), Level::WARN)
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_ansi(false)
        .with_timer(timer)
        .with_writer(writer)
        .finish();

    set_global_default(subscriber).context("a global tracing subscriber is already set")
}

fn get_log_file_name() -> anyhow::Result<String> {
    let format = parse("[year]-[month]-[day]_[hour]:[minute]:[second]_log.txt")?;
    let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
    Ok(now.format(&format)?)
}
