use anyhow::{Context, Result};
use clap::Parser;
use std::fs::File;
use std::io::{self, BufReader, Write};
use tracing::info;

use scoreboard::config::Config;
use scoreboard::session::{render_summary, Session};

fn main() -> Result<()> {
    // Initialise tracing / logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let config = Config::parse();
    config.validate()?;

    let mut session = Session::new(config.json, config.fail_fast);
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match &config.script {
        Some(path) => {
            info!("Replaying script {}", path.display());
            let file = File::open(path)
                .with_context(|| format!("Failed to open script {}", path.display()))?;
            session.run(BufReader::new(file), &mut out)?;
        }
        None => {
            info!("Reading commands from stdin");
            session.run(io::stdin().lock(), &mut out)?;
        }
    }

    if !config.no_final_summary {
        let rendered = render_summary(session.board(), config.json)?;
        writeln!(out, "{}", rendered.trim_end()).context("Failed to write summary")?;
    }

    Ok(())
}
