use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use player_ranking::{
    configuration::DEFAULT_OUTPUT_PATH, logger::init_logger, prelude::*, ranking::DEFAULT_LIMIT,
};
use tracing::error;

#[derive(Debug, Parser)]
#[command(name = "player-ranking", version)]
#[command(about = "Rank players by mean score from a CSV score log")]
struct Args {
    /// CSV file of `ignored,player_id,score` rows, with a header row
    source: PathBuf,

    /// Where the leaderboard is written
    #[arg(short, long, default_value = DEFAULT_OUTPUT_PATH)]
    output: PathBuf,

    /// Number of players to keep (tied players past it are kept too)
    #[arg(short = 'n', long, default_value_t = DEFAULT_LIMIT)]
    limit: usize,

    /// Never write more than `limit` rows, even if it splits tied players
    #[arg(long)]
    strict_limit: bool,

    /// Write a trace log to a timestamped file in the working directory
    #[arg(long)]
    log: bool,

    /// Directory the log file is written to
    #[arg(long, default_value = ".")]
    log_dir: PathBuf,

    /// Only print errors
    #[arg(short, long)]
    quiet: bool,
}

impl Args {
    fn configuration(&self) -> Configuration {
        let cutoff = if self.strict_limit {
            CutoffPolicy::HardCap
        } else {
            CutoffPolicy::KeepTiedGroup
        };
        Configuration::new()
            .with_output_path(&self.output)
            .with_limit(self.limit)
            .with_cutoff(cutoff)
            .with_verbose(!self.quiet)
            .with_log(self.log)
            .with_log_dir(&self.log_dir)
    }
}

fn main() -> anyhow::Result<()> {
    // wrong argument count exits here, before any file is touched
    let args = Args::parse();
    // the file logger is installed by the leaderboard itself
    if !args.log {
        init_logger(None, !args.quiet)?;
    }

    let leaderboard = Leaderboard::new(args.configuration());
    leaderboard
        .run(&args.source)
        .inspect_err(|e| error!("run aborted: {e}"))
        .with_context(|| format!("could not rank '{}'", args.source.display()))?;
    Ok(())
}
