//! Command-line interface for the Ô Ăn Quan arena.

use oanquan_arena::AgentKind;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Ô Ăn Quan arena - pit agents against each other
#[derive(Parser, Debug)]
#[command(name = "oanquan")]
#[command(about = "Play Ô Ăn Quan between built-in and LLM agents", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play one or more games
    Play {
        /// Path to arena config (TOML)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Override agent A with a built-in strategy
        #[arg(long, value_enum)]
        agent_a: Option<AgentKind>,

        /// Override agent B with a built-in strategy
        #[arg(long, value_enum)]
        agent_b: Option<AgentKind>,

        /// Number of games (seats swap every game)
        #[arg(short, long)]
        rounds: Option<u32>,

        /// Base seed for random agents
        #[arg(long)]
        seed: Option<u64>,

        /// Append moves and results to this JSON-lines file
        #[arg(long)]
        transcript: Option<PathBuf>,
    },

    /// Print the effective rules as TOML
    Rules {
        /// Path to arena config (TOML)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Print the opening board
    Board {
        /// Path to arena config (TOML)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}
