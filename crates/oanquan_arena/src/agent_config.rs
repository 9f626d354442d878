//! Agent configuration.

use crate::llm_client::{LlmConfig, LlmProvider};
use derive_getters::Getters;
use oanquan::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Which built-in strategy drives an agent.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
    clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum AgentKind {
    /// Always sows from the lowest legal cell.
    #[default]
    FirstLegal,
    /// Takes the largest immediate capture.
    Greedy,
    /// Picks uniformly among legal cells.
    Random,
    /// Asks a language model.
    Llm,
}

/// Configuration for one player.
#[derive(Debug, Clone, PartialEq, Getters, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Display name.
    name: String,

    /// Strategy.
    #[serde(default)]
    kind: AgentKind,

    /// Free-text persona handed to LLM agents.
    #[serde(default = "default_persona")]
    persona: String,

    /// Seed for random agents; derived from the arena seed when absent.
    #[serde(default)]
    seed: Option<u64>,

    /// LLM provider (openai, openrouter or anthropic).
    #[serde(default = "default_provider")]
    llm_provider: LlmProvider,

    /// LLM model name (e.g., "gpt-4o-mini", "openai/gpt-4o-mini-2024-07-18").
    #[serde(default = "default_model")]
    llm_model: String,

    /// Maximum tokens for LLM responses.
    #[serde(default = "default_max_tokens")]
    llm_max_tokens: u32,

    /// Overrides the provider's API root.
    #[serde(default)]
    llm_base_url: Option<String>,
}

fn default_persona() -> String {
    "an intelligent and strategic player".to_string()
}

fn default_provider() -> LlmProvider {
    LlmProvider::OpenAI
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_max_tokens() -> u32 {
    400
}

impl AgentConfig {
    /// Creates a configuration for a built-in strategy.
    #[instrument(skip(name), fields(agent_name = %name))]
    pub fn new(name: String, kind: AgentKind) -> Self {
        Self {
            name,
            kind,
            persona: default_persona(),
            seed: None,
            llm_provider: default_provider(),
            llm_model: default_model(),
            llm_max_tokens: default_max_tokens(),
            llm_base_url: None,
        }
    }

    /// Creates a configuration for an LLM agent.
    #[instrument(skip(name, persona), fields(agent_name = %name))]
    pub fn with_llm(name: String, persona: String, llm_provider: LlmProvider, llm_model: String, llm_max_tokens: u32) -> Self {
        Self {
            persona,
            llm_provider,
            llm_model,
            llm_max_tokens,
            ..Self::new(name, AgentKind::Llm)
        }
    }

    /// Returns a copy with a fixed random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Loads configuration from TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading agent config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(agent_name = %config.name, kind = %config.kind, "Config loaded successfully");
        Ok(config)
    }

    /// Creates LLM configuration from this agent config.
    ///
    /// Reads the provider's API key from the environment
    /// (`OPENAI_API_KEY`, `OPENROUTER_API_KEY` or `ANTHROPIC_API_KEY`).
    #[instrument(skip(self), fields(provider = ?self.llm_provider, model = %self.llm_model))]
    pub fn create_llm_config(&self) -> Result<LlmConfig, ConfigError> {
        debug!("Creating LLM config");
        let var = self.llm_provider.api_key_var();
        let api_key = std::env::var(var)
            .map_err(|_| ConfigError::new(format!("{} environment variable not set", var)))?;

        let config = LlmConfig::new(
            self.llm_provider,
            api_key,
            self.llm_model.clone(),
            self.llm_max_tokens,
        );
        Ok(match &self.llm_base_url {
            Some(url) => config.with_base_url(url.clone()),
            None => config,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_toml_uses_defaults() {
        let config: AgentConfig = toml::from_str(r#"name = "Lowest""#).expect("parses");
        assert_eq!(config.name(), "Lowest");
        assert_eq!(*config.kind(), AgentKind::FirstLegal);
        assert_eq!(*config.llm_provider(), LlmProvider::OpenAI);
        assert_eq!(config.seed(), &None);
    }

    #[test]
    fn test_llm_toml() {
        let config: AgentConfig = toml::from_str(
            r#"
            name = "Router"
            kind = "llm"
            persona = "a cautious defender"
            llm_provider = "openrouter"
            llm_model = "openai/gpt-4o-mini-2024-07-18"
            "#,
        )
        .expect("parses");
        assert_eq!(*config.kind(), AgentKind::Llm);
        assert_eq!(*config.llm_provider(), LlmProvider::OpenRouter);
        assert_eq!(config.persona(), "a cautious defender");
    }

    #[test]
    fn test_unknown_kind_is_rejected() {
        let parsed: Result<AgentConfig, _> = toml::from_str(
            r#"
            name = "X"
            kind = "telepathic"
            "#,
        );
        assert!(parsed.is_err());
    }
}
