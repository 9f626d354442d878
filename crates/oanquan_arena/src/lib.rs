//! Ô Ăn Quan arena - agents and match orchestration
//!
//! Drives [`oanquan`] games between pluggable agents.
//!
//! # Architecture
//!
//! - **Agents**: built-in strategies and LLM players behind one async trait
//! - **LLM client**: OpenAI-compatible (OpenAI, OpenRouter) and Anthropic APIs
//! - **Orchestrator**: one game, with retries for refused moves
//! - **Tournament**: several games with alternating seats
//! - **Transcript**: JSON-lines record of every move and result
//!
//! # Example
//!
//! ```no_run
//! use oanquan::RulesConfig;
//! use oanquan_arena::{FirstLegalAgent, GreedyAgent, Orchestrator};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let mut orchestrator = Orchestrator::new(
//!     RulesConfig::default(),
//!     Box::new(GreedyAgent::new("greedy")),
//!     Box::new(FirstLegalAgent::new("first")),
//! )?;
//! let result = orchestrator.run().await?;
//! println!("{}", result);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod agent_config;
mod agents;
mod arena_config;
mod llm_client;
mod orchestrator;
mod tournament;
mod transcript;

pub mod prompt;

// Crate-level exports - Configuration
pub use agent_config::{AgentConfig, AgentKind};
pub use arena_config::ArenaConfig;

// Crate-level exports - Agents
pub use agents::{
    Agent, AgentError, AgentErrorKind, Decision, FirstLegalAgent, GreedyAgent, LlmAgent,
    RandomAgent, build_agent,
};

// Crate-level exports - LLM client
pub use llm_client::{LlmClient, LlmConfig, LlmError, LlmProvider};

// Crate-level exports - Orchestration
pub use orchestrator::{DEFAULT_MAX_ILLEGAL_ATTEMPTS, GameEvent, Orchestrator};
pub use tournament::{Tournament, TournamentSummary};
pub use transcript::{Transcript, TranscriptEntry, TranscriptError};
