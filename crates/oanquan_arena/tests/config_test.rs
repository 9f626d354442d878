//! Tests for loading arena and agent configuration files.

use oanquan::ReplenishTrigger;
use oanquan_arena::{AgentConfig, AgentKind, ArenaConfig, LlmProvider, build_agent};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_arena_config_from_file() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("arena.toml");
    fs::write(
        &path,
        r#"
rounds = 2
seed = 3

[rules]
replenish_trigger = "empty_side"
mandarin_min_stones = 3

[agent_a]
name = "Dice"
kind = "random"

[agent_b]
name = "Greedy"
kind = "greedy"
"#,
    )
    .expect("Failed to write TOML");

    let config = ArenaConfig::from_file(&path).expect("loads");
    assert_eq!(*config.rounds(), 2);
    assert_eq!(*config.rules().replenish_trigger(), ReplenishTrigger::EmptySide);
    assert_eq!(*config.rules().mandarin_min_stones(), Some(3));

    let [seed_a, _] = config.agent_seeds();
    let agent = build_agent(config.agent_a(), seed_a).expect("builds");
    assert_eq!(agent.name(), "Dice");
}

#[test]
fn test_missing_file_is_config_error() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let err = ArenaConfig::from_file(dir.path().join("absent.toml")).expect_err("missing");
    assert!(err.message.contains("Failed to read config file"));
}

#[test]
fn test_agent_config_from_file() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("agent.toml");
    fs::write(
        &path,
        r#"
name = "Claude"
kind = "llm"
llm_provider = "anthropic"
llm_model = "claude-3-5-haiku-20241022"
llm_max_tokens = 300
"#,
    )
    .expect("Failed to write TOML");

    let config = AgentConfig::from_file(&path).expect("loads");
    assert_eq!(*config.kind(), AgentKind::Llm);
    assert_eq!(*config.llm_provider(), LlmProvider::Anthropic);
    assert_eq!(*config.llm_max_tokens(), 300);
}
