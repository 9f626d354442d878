//! Integration tests against live LLM APIs (run with `--features api`).

use oanquan::GameState;
use oanquan_arena::{Agent, AgentConfig, Decision, LlmClient, LlmConfig, LlmProvider, build_agent};

#[tokio::test]
#[cfg_attr(not(feature = "api"), ignore)]
async fn test_anthropic_connectivity() {
    dotenvy::dotenv().ok();

    let api_key = std::env::var("ANTHROPIC_API_KEY").expect("ANTHROPIC_API_KEY not set");
    let config = LlmConfig::new(
        LlmProvider::Anthropic,
        api_key,
        "claude-3-5-haiku-20241022".to_string(),
        50,
    );

    let response = LlmClient::new(config)
        .generate("You are a helpful assistant.", "Say 'Hello, world!' and nothing else.")
        .await
        .expect("Failed to generate");

    assert!(!response.is_empty(), "Response should not be empty");
}

#[tokio::test]
#[cfg_attr(not(feature = "api"), ignore)]
async fn test_openrouter_agent_picks_legal_cell() {
    dotenvy::dotenv().ok();

    let config = AgentConfig::with_llm(
        "router".to_string(),
        "an intelligent and strategic player".to_string(),
        LlmProvider::OpenRouter,
        "openai/gpt-4o-mini-2024-07-18".to_string(),
        400,
    );
    let mut agent = build_agent(&config, 0).expect("OPENROUTER_API_KEY set");
    let snapshot = GameState::default().snapshot();

    let decision = agent.request_move(&snapshot).await.expect("model replies");

    match decision {
        Decision::Sow(cell) => assert!(snapshot.is_legal(cell), "{cell} is not legal"),
        Decision::Resign => panic!("resigned from the opening"),
    }
}
