//! Arena configuration: rules, both agents and match settings in one TOML file.

use crate::agent_config::{AgentConfig, AgentKind};
use crate::orchestrator::DEFAULT_MAX_ILLEGAL_ATTEMPTS;
use derive_getters::Getters;
use oanquan::{ConfigError, RulesConfig};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

/// Everything needed to run a match.
///
/// ```toml
/// rounds = 4
/// seed = 7
///
/// [rules]
/// max_moves = 150
///
/// [agent_a]
/// name = "Greedy"
/// kind = "greedy"
///
/// [agent_b]
/// name = "Dice"
/// kind = "random"
/// ```
#[derive(Debug, Clone, PartialEq, Getters, Serialize, Deserialize)]
pub struct ArenaConfig {
    /// Rules shared by every game.
    #[serde(default)]
    rules: RulesConfig,

    /// Agent seated as A in the first game.
    #[serde(default = "default_agent_a")]
    agent_a: AgentConfig,

    /// Agent seated as B in the first game.
    #[serde(default = "default_agent_b")]
    agent_b: AgentConfig,

    /// Games to play; seats swap every game.
    #[serde(default = "default_rounds")]
    rounds: u32,

    /// Base seed for random agents without their own seed.
    #[serde(default)]
    seed: Option<u64>,

    /// Refused decisions allowed per turn before the agent forfeits.
    #[serde(default = "default_max_illegal_attempts")]
    max_illegal_attempts: u32,

    /// JSON-lines transcript destination.
    #[serde(default)]
    transcript: Option<PathBuf>,
}

fn default_agent_a() -> AgentConfig {
    AgentConfig::new("Greedy".to_string(), AgentKind::Greedy)
}

fn default_agent_b() -> AgentConfig {
    AgentConfig::new("FirstLegal".to_string(), AgentKind::FirstLegal)
}

fn default_rounds() -> u32 {
    1
}

fn default_max_illegal_attempts() -> u32 {
    DEFAULT_MAX_ILLEGAL_ATTEMPTS
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self::new(default_agent_a(), default_agent_b())
    }
}

impl ArenaConfig {
    /// Creates a single-game configuration with default rules.
    pub fn new(agent_a: AgentConfig, agent_b: AgentConfig) -> Self {
        Self {
            rules: RulesConfig::default(),
            agent_a,
            agent_b,
            rounds: default_rounds(),
            seed: None,
            max_illegal_attempts: default_max_illegal_attempts(),
            transcript: None,
        }
    }

    /// Loads configuration from TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading arena config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;
        let config = Self::from_toml(&content)?;
        info!(
            agent_a = %config.agent_a.name(),
            agent_b = %config.agent_b.name(),
            rounds = config.rounds,
            "Config loaded successfully"
        );
        Ok(config)
    }

    /// Parses and validates TOML text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects configurations that cannot run.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.rules.validate()?;
        if self.rounds == 0 {
            return Err(ConfigError::new("rounds must be at least 1".to_string()));
        }
        if self.max_illegal_attempts == 0 {
            return Err(ConfigError::new("max_illegal_attempts must be at least 1".to_string()));
        }
        Ok(())
    }

    /// Returns a copy with a different number of rounds.
    pub fn with_rounds(mut self, rounds: u32) -> Self {
        self.rounds = rounds;
        self
    }

    /// Returns a copy with a base seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Returns a copy writing a transcript to `path`.
    pub fn with_transcript(mut self, path: PathBuf) -> Self {
        self.transcript = Some(path);
        self
    }

    /// Returns a copy with agent A replaced.
    pub fn with_agent_a(mut self, agent: AgentConfig) -> Self {
        self.agent_a = agent;
        self
    }

    /// Returns a copy with agent B replaced.
    pub fn with_agent_b(mut self, agent: AgentConfig) -> Self {
        self.agent_b = agent;
        self
    }

    /// Seeds for agents A and B when they have none of their own.
    pub fn agent_seeds(&self) -> [u64; 2] {
        let base = self.seed.unwrap_or(0);
        [base, base.wrapping_add(1)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oanquan::Direction;

    #[test]
    fn test_empty_toml_is_a_valid_default() {
        let config = ArenaConfig::from_toml("").expect("defaults");
        assert_eq!(config, ArenaConfig::default());
        assert_eq!(*config.max_illegal_attempts(), 3);
    }

    #[test]
    fn test_full_toml() {
        let config = ArenaConfig::from_toml(
            r#"
            rounds = 4
            seed = 7
            max_illegal_attempts = 2
            transcript = "games.jsonl"

            [rules]
            direction = "backward"

            [agent_a]
            name = "Dice"
            kind = "random"

            [agent_b]
            name = "Greedy"
            kind = "greedy"
            "#,
        )
        .expect("valid");
        assert_eq!(*config.rounds(), 4);
        assert_eq!(*config.rules().direction(), Direction::Backward);
        assert_eq!(*config.agent_a().kind(), AgentKind::Random);
        assert_eq!(config.agent_seeds(), [7, 8]);
        assert_eq!(config.transcript(), &Some(PathBuf::from("games.jsonl")));
    }

    #[test]
    fn test_zero_rounds_rejected() {
        let err = ArenaConfig::from_toml("rounds = 0").expect_err("invalid");
        assert!(err.message.contains("rounds"));
    }

    #[test]
    fn test_invalid_rules_rejected() {
        let err = ArenaConfig::from_toml("[rules]\nmax_moves = 0").expect_err("invalid");
        assert!(err.message.contains("max_moves"));
    }
}
