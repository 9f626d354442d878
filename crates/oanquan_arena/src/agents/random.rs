//! Agent that plays uniformly random legal moves.

use super::{Agent, AgentError, Decision};
use oanquan::Snapshot;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use tracing::debug;

/// Seeded random player; the same seed replays the same game.
pub struct RandomAgent {
    name: String,
    rng: StdRng,
}

impl RandomAgent {
    /// Creates a new random agent.
    pub fn new(name: impl Into<String>, seed: u64) -> Self {
        Self {
            name: name.into(),
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

#[async_trait::async_trait]
impl Agent for RandomAgent {
    fn name(&self) -> &str {
        &self.name
    }

    async fn request_move(&mut self, snapshot: &Snapshot) -> Result<Decision, AgentError> {
        let cell = snapshot
            .legal_moves
            .choose(&mut self.rng)
            .copied()
            .ok_or_else(AgentError::no_legal_moves)?;
        debug!(agent = %self.name, %cell, "Chose random cell");
        Ok(Decision::Sow(cell))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oanquan::GameState;

    #[tokio::test]
    async fn test_same_seed_same_choices() {
        let snapshot = GameState::default().snapshot();
        let mut first = RandomAgent::new("r1", 42);
        let mut second = RandomAgent::new("r2", 42);
        for _ in 0..10 {
            let a = first.request_move(&snapshot).await.expect("decides");
            let b = second.request_move(&snapshot).await.expect("decides");
            assert_eq!(a, b);
            assert!(matches!(a, Decision::Sow(cell) if snapshot.is_legal(cell)));
        }
    }
}
