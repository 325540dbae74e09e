//! Headless match runner.
//!
//! Usage:
//!   catfight-replay [match.json] [--json]
//!
//! Reads a recorded match from the given file or stdin, replays it and
//! prints the outcome. `--json` prints the outcome as JSON instead.

use std::io::Read;
use std::time::Instant;

use anyhow::{Context, Result};
use catfight_core::{replay, MatchOutcome, ReplayInput, Side};
use serde::Serialize;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Outcome with hashes spelled out in hex.
#[derive(Serialize)]
struct Report<'a> {
    frames: u32,
    knockouts: &'a [catfight_core::Knockout],
    winner: Option<&'static str>,
    health: [i32; 2],
    transcript_hash: String,
    seed_commit: String,
}

impl<'a> From<&'a MatchOutcome> for Report<'a> {
    fn from(o: &'a MatchOutcome) -> Self {
        Report {
            frames: o.frames,
            knockouts: &o.knockouts,
            winner: o.winner.map(Side::winner_label),
            health: o.health,
            transcript_hash: hex::encode(o.transcript_hash),
            seed_commit: hex::encode(o.seed_commit),
        }
    }
}

fn setup_logging() {
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::INFO.into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn load_input(path: Option<&str>) -> Result<ReplayInput> {
    let json_str = match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read match file {}", path))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read match from stdin")?;
            buf
        }
    };

    serde_json::from_str(&json_str).context("failed to parse match JSON")
}

fn main() -> Result<()> {
    setup_logging();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let as_json = args.iter().any(|a| a == "--json");
    let path = args.iter().find(|a| !a.starts_with("--")).map(String::as_str);

    let input = load_input(path)?;
    tracing::info!(
        frames = input.transcript.len(),
        seed = input.config.seed,
        "replaying match"
    );

    let start = Instant::now();
    let outcome = replay::run(&input).context("invalid match config")?;
    tracing::info!(elapsed_ms = start.elapsed().as_millis() as u64, "replay finished");

    let report = Report::from(&outcome);
    if as_json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Frames: {}", report.frames);
    for ko in &outcome.knockouts {
        println!("Knockout at frame {}: {}", ko.frame, ko.winner.winner_label());
    }
    println!("Winner: {}", report.winner.unwrap_or("none (match still running)"));
    println!("Health: P1={}, P2={}", report.health[0], report.health[1]);
    println!("Transcript hash: {}", report.transcript_hash);
    println!("Seed commit: {}", report.seed_commit);

    Ok(())
}
