use std::{
    fs,
    io::{self, Write},
    sync::{Arc, Mutex},
};

use player_ranking::prelude::*;
use tempfile::TempDir;
use tracing::Level;
use tracing_subscriber::fmt::MakeWriter;

#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl Captured {
    fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl Write for Captured {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for Captured {
    type Writer = Captured;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

#[test]
fn test_run_logs_its_phases() {
    let dir = TempDir::new().unwrap();
    let source = dir.path().join("scores.csv");
    fs::write(
        &source,
        "ts,player_id,score\nl1,player0001,10\nl2,player0001,20\nl3,player0002,15\n",
    )
    .unwrap();
    let config = Configuration::new()
        .with_output_path(dir.path().join("output.csv"))
        .with_verbose(false);

    let captured = Captured::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(captured.clone())
        .with_ansi(false)
        .with_max_level(Level::TRACE)
        .finish();
    tracing::subscriber::with_default(subscriber, || {
        Leaderboard::new(config).run(&source).unwrap();
    });

    let logs = captured.contents();
    assert!(logs.contains("aggregation done"));
    assert!(logs.contains("records=3"));
    assert!(logs.contains("players=2"));
    assert!(logs.contains("leaderboard written"));
}
