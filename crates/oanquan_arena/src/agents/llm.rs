//! Agent backed by a language model.

use super::{Agent, AgentError, Decision};
use crate::llm_client::LlmClient;
use crate::prompt;
use oanquan::Snapshot;
use tracing::{debug, info, instrument};

/// Prompts a model with the position and parses the move from its reply.
pub struct LlmAgent {
    name: String,
    persona: String,
    client: LlmClient,
    last_rejection: Option<String>,
}

impl LlmAgent {
    /// Creates a new LLM agent.
    pub fn new(name: impl Into<String>, persona: impl Into<String>, client: LlmClient) -> Self {
        let name = name.into();
        info!(agent = %name, model = %client.config().model(), "Creating LLM agent");
        Self {
            name,
            persona: persona.into(),
            client,
            last_rejection: None,
        }
    }
}

#[async_trait::async_trait]
impl Agent for LlmAgent {
    fn name(&self) -> &str {
        &self.name
    }

    #[instrument(skip_all, fields(agent = %self.name, move_number = snapshot.move_number))]
    async fn request_move(&mut self, snapshot: &Snapshot) -> Result<Decision, AgentError> {
        let user_message = prompt::render(snapshot, &self.persona, self.last_rejection.as_deref());
        let reply = self
            .client
            .generate(prompt::SYSTEM_PROMPT, &user_message)
            .await
            .map_err(AgentError::llm)?;
        debug!(reply = %reply, "Model replied");

        let decision = prompt::parse_decision(&reply)?;
        self.last_rejection = None;
        Ok(decision)
    }

    fn rejected(&mut self, reason: &str) {
        self.last_rejection = Some(reason.to_string());
    }
}
