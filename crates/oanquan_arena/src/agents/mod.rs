//! Agent trait and implementations.

mod first_legal;
mod greedy;
mod llm;
mod random;

pub use first_legal::FirstLegalAgent;
pub use greedy::GreedyAgent;
pub use llm::LlmAgent;
pub use random::RandomAgent;

use crate::agent_config::{AgentConfig, AgentKind};
use crate::llm_client::{LlmClient, LlmError};
use derive_more::{Display, Error};
use oanquan::{CellIndex, ConfigError, Snapshot};
use tracing::{info, instrument};

/// What an agent wants to do on its turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Decision {
    /// Sow from the given cell.
    #[display("sow {}", _0)]
    Sow(CellIndex),
    /// Give up the game.
    #[display("resign")]
    Resign,
}

/// Trait for players that can make moves.
#[async_trait::async_trait]
pub trait Agent: Send {
    /// Returns the agent's display name.
    fn name(&self) -> &str;

    /// Chooses a move for the position in `snapshot`.
    async fn request_move(&mut self, snapshot: &Snapshot) -> Result<Decision, AgentError>;

    /// Told that its last decision was refused, before it is asked again.
    fn rejected(&mut self, _reason: &str) {}
}

/// Category of an [`AgentError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum AgentErrorKind {
    /// The model API call failed.
    #[display("llm")]
    Llm,
    /// The reply named no usable move.
    #[display("malformed reply")]
    Malformed,
    /// The agent was asked to move with nothing to sow.
    #[display("no legal moves")]
    NoLegalMoves,
}

/// Agent failure; counted by the orchestrator as an illegal attempt.
#[derive(Debug, Clone, Display, Error)]
#[display("Agent error ({}): {} at {}:{}", kind, message, file, line)]
pub struct AgentError {
    /// Category.
    pub kind: AgentErrorKind,
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl AgentError {
    /// Creates a new agent error.
    #[track_caller]
    pub fn new(kind: AgentErrorKind, message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// Wraps a failed model call.
    #[track_caller]
    pub fn llm(error: LlmError) -> Self {
        Self::new(AgentErrorKind::Llm, error.message)
    }

    /// A reply that could not be turned into a move.
    #[track_caller]
    pub fn malformed(message: String) -> Self {
        Self::new(AgentErrorKind::Malformed, message)
    }

    /// Asked to move without any legal cell.
    #[track_caller]
    pub fn no_legal_moves() -> Self {
        Self::new(AgentErrorKind::NoLegalMoves, "snapshot lists no legal moves".to_string())
    }
}

/// Builds the agent described by `config`.
///
/// `fallback_seed` seeds random agents whose config has no seed of its own.
///
/// # Errors
///
/// Returns [`ConfigError`] when an LLM agent's API key is missing.
#[instrument(skip(config), fields(agent = %config.name(), kind = %config.kind()))]
pub fn build_agent(config: &AgentConfig, fallback_seed: u64) -> Result<Box<dyn Agent>, ConfigError> {
    let name = config.name().clone();
    let agent: Box<dyn Agent> = match config.kind() {
        AgentKind::FirstLegal => Box::new(FirstLegalAgent::new(name)),
        AgentKind::Greedy => Box::new(GreedyAgent::new(name)),
        AgentKind::Random => {
            Box::new(RandomAgent::new(name, config.seed().unwrap_or(fallback_seed)))
        }
        AgentKind::Llm => {
            let client = LlmClient::new(config.create_llm_config()?);
            Box::new(LlmAgent::new(name, config.persona().clone(), client))
        }
    };
    info!("Agent ready");
    Ok(agent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_build_builtin_agents() {
        for kind in AgentKind::iter().filter(|kind| *kind != AgentKind::Llm) {
            let config = AgentConfig::new(format!("{kind}"), kind);
            let agent = build_agent(&config, 1).expect("built-in agents need no keys");
            assert_eq!(agent.name(), kind.to_string());
        }
    }

    #[test]
    fn test_decision_display() {
        let cell: CellIndex = "A3".parse().expect("label");
        assert_eq!(Decision::Sow(cell).to_string(), "sow A3");
        assert_eq!(Decision::Resign.to_string(), "resign");
    }
}
