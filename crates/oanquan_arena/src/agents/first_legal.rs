//! Agent that always sows from the lowest legal cell.

use super::{Agent, AgentError, Decision};
use oanquan::Snapshot;
use tracing::debug;

/// Picks the first legal cell in ring order.
pub struct FirstLegalAgent {
    name: String,
}

impl FirstLegalAgent {
    /// Creates a new first-legal agent.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[async_trait::async_trait]
impl Agent for FirstLegalAgent {
    fn name(&self) -> &str {
        &self.name
    }

    async fn request_move(&mut self, snapshot: &Snapshot) -> Result<Decision, AgentError> {
        let cell = snapshot
            .legal_moves
            .first()
            .copied()
            .ok_or_else(AgentError::no_legal_moves)?;
        debug!(agent = %self.name, %cell, "Chose first legal cell");
        Ok(Decision::Sow(cell))
    }
}
