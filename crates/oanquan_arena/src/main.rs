//! Ô Ăn Quan arena - command-line entry point.

#![warn(missing_docs)]

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use oanquan::Board;
use oanquan_arena::{AgentConfig, ArenaConfig, Tournament, Transcript, build_agent};
use std::path::PathBuf;
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Play {
            config,
            agent_a,
            agent_b,
            rounds,
            seed,
            transcript,
        } => {
            let mut arena = load_config(config)?;
            if let Some(kind) = agent_a {
                arena = arena.with_agent_a(AgentConfig::new(format!("{kind}_a"), kind));
            }
            if let Some(kind) = agent_b {
                arena = arena.with_agent_b(AgentConfig::new(format!("{kind}_b"), kind));
            }
            if let Some(rounds) = rounds {
                arena = arena.with_rounds(rounds);
            }
            if let Some(seed) = seed {
                arena = arena.with_seed(seed);
            }
            if let Some(path) = transcript {
                arena = arena.with_transcript(path);
            }
            arena.validate()?;
            run_play(arena).await
        }
        Command::Rules { config } => {
            let arena = load_config(config)?;
            println!("{}", toml::to_string_pretty(arena.rules())?);
            Ok(())
        }
        Command::Board { config } => {
            let arena = load_config(config)?;
            println!("{}", Board::new(arena.rules()));
            Ok(())
        }
    }
}

fn load_config(path: Option<PathBuf>) -> Result<ArenaConfig> {
    Ok(match path {
        Some(path) => ArenaConfig::from_file(path)?,
        None => ArenaConfig::default(),
    })
}

/// Runs the configured tournament and prints the summary.
#[instrument(skip(arena), fields(rounds = *arena.rounds()))]
async fn run_play(arena: ArenaConfig) -> Result<()> {
    let [seed_a, seed_b] = arena.agent_seeds();
    let first = build_agent(arena.agent_a(), seed_a)?;
    let second = build_agent(arena.agent_b(), seed_b)?;

    let transcript = match arena.transcript() {
        Some(path) => Some(Transcript::create(path).await?),
        None => None,
    };

    info!(a = %first.name(), b = %second.name(), "Starting match");
    let summary = Tournament::new(arena.rules().clone(), first, second, *arena.rounds())
        .with_max_illegal_attempts(*arena.max_illegal_attempts())
        .with_transcript(transcript)
        .run()
        .await?;

    for (round, result) in summary.results().iter().enumerate() {
        println!("Game {}: {}", round + 1, result);
    }
    println!("{}", summary);
    Ok(())
}
