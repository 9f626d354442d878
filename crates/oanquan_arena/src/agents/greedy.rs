//! Agent that maximises the immediate capture.

use super::{Agent, AgentError, Decision};
use oanquan::{CellIndex, Snapshot, resolve};
use tracing::{debug, instrument};

/// Simulates every legal move and keeps the one that captures the most.
///
/// Ties go to the lowest cell index.
pub struct GreedyAgent {
    name: String,
}

impl GreedyAgent {
    /// Creates a new greedy agent.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Best move for `snapshot`, with the value it captures.
    #[instrument(skip_all)]
    pub fn best_move(snapshot: &Snapshot) -> Option<(CellIndex, u32)> {
        let mut best: Option<(CellIndex, u32)> = None;
        for &cell in &snapshot.legal_moves {
            let Ok(resolution) = resolve(&snapshot.board, cell, snapshot.current_player, &snapshot.rules) else {
                continue;
            };
            let value = resolution.captured_value();
            debug!(%cell, value, "Simulated");
            if best.is_none_or(|(_, top)| value > top) {
                best = Some((cell, value));
            }
        }
        best
    }
}

#[async_trait::async_trait]
impl Agent for GreedyAgent {
    fn name(&self) -> &str {
        &self.name
    }

    async fn request_move(&mut self, snapshot: &Snapshot) -> Result<Decision, AgentError> {
        let (cell, value) = Self::best_move(snapshot).ok_or_else(AgentError::no_legal_moves)?;
        debug!(agent = %self.name, %cell, value, "Chose greediest cell");
        Ok(Decision::Sow(cell))
    }
}
