//! Text front end: a human plays the minimax engine over stdin/stdout.
//!
//! Usage: `chess_play [--config <file>]`. Logging goes to stderr and is
//! controlled with `RUST_LOG`.

mod config;
mod session;

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{bail, Result};
use tracing_subscriber::EnvFilter;

use config::PlayConfig;
use session::{Flow, Session, HELP};

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Option<PathBuf>> {
    let mut config = None;
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" | "-c" => match args.next() {
                Some(path) => config = Some(PathBuf::from(path)),
                None => bail!("--config needs a file path"),
            },
            other => bail!("unknown argument '{other}'"),
        }
    }
    Ok(config)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let config = match parse_args(std::env::args().skip(1))? {
        Some(path) => PlayConfig::load(&path)?,
        None => PlayConfig::default(),
    };
    let mut session = Session::new(config);

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    writeln!(stdout, "{HELP}")?;
    session.handle("board", &mut stdout)?;
    stdout.flush()?;

    for line in stdin.lock().lines() {
        let line = line?;
        match session.handle(&line, &mut stdout) {
            Ok(Flow::Quit) => break,
            Ok(Flow::Continue) => {}
            Err(e) => writeln!(stdout, "error: {e:#}")?,
        }
        stdout.flush()?;
    }
    Ok(())
}
