//! Tests for multi-game tournaments and transcripts.

use oanquan::RulesConfig;
use oanquan_arena::{GreedyAgent, RandomAgent, Tournament, Transcript};
use tempfile::TempDir;

#[tokio::test]
async fn test_tournament_summary_and_transcript() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("match.jsonl");
    let transcript = Transcript::create(&path).await.expect("opens");

    let summary = Tournament::new(
        RulesConfig::default(),
        Box::new(RandomAgent::new("dice", 11)),
        Box::new(GreedyAgent::new("greedy")),
        4,
    )
    .with_transcript(Some(transcript))
    .run()
    .await
    .expect("tournament runs");

    assert_eq!(*summary.games(), 4);
    assert_eq!(summary.wins()[0] + summary.wins()[1] + summary.draws(), 4);
    assert_eq!(summary.agents(), &["dice".to_string(), "greedy".to_string()]);
    assert!(summary.average_moves() > 0.0);

    let text = std::fs::read_to_string(&path).expect("transcript readable");
    let entries: Vec<serde_json::Value> = text
        .lines()
        .map(|line| serde_json::from_str(line).expect("json line"))
        .collect();
    let results: Vec<&serde_json::Value> = entries.iter().filter(|e| e["event"] == "result").collect();
    let moves = entries.iter().filter(|e| e["event"] == "move").count();
    assert_eq!(results.len(), 4);
    assert_eq!(moves as u32, *summary.total_moves());

    // Seats alternate: dice sits as A in games 1 and 3.
    assert_eq!(results[0]["players"][0], "dice");
    assert_eq!(results[1]["players"][0], "greedy");
    assert_eq!(results[2]["players"][0], "dice");
}

#[tokio::test]
async fn test_seeded_tournaments_repeat() {
    let run = || async {
        Tournament::new(
            RulesConfig::default(),
            Box::new(RandomAgent::new("r1", 5)),
            Box::new(RandomAgent::new("r2", 6)),
            2,
        )
        .run()
        .await
        .expect("tournament runs")
    };
    assert_eq!(run().await, run().await);
}
