//! Game orchestration between two agents.

use crate::agents::{Agent, Decision};
use crate::transcript::{Transcript, TranscriptEntry};
use anyhow::Result;
use oanquan::{GameError, GameResult, GameState, MoveRecord, RulesConfig, Side};
use tokio::sync::mpsc;
use tracing::{debug, info, instrument, warn};

/// Default number of refused decisions before an agent forfeits.
pub const DEFAULT_MAX_ILLEGAL_ATTEMPTS: u32 = 3;

/// Messages sent from the orchestrator to observers.
#[derive(Debug, Clone)]
pub enum GameEvent {
    /// An agent is being asked for a move.
    TurnStarted {
        /// Agent name.
        agent: String,
        /// Seat.
        player: Side,
        /// Moves already played.
        move_number: u32,
    },
    /// An agent's decision was refused.
    MoveRejected {
        /// Agent name.
        agent: String,
        /// 1-based attempt number.
        attempt: u32,
        /// Why it was refused.
        reason: String,
    },
    /// A move was applied.
    MoveMade(MoveRecord),
    /// An agent resigned, by choice or by running out of attempts.
    Resigned {
        /// Agent name.
        agent: String,
        /// Seat.
        player: Side,
    },
    /// Game ended.
    GameOver(GameResult),
}

/// Runs one game between two agents.
pub struct Orchestrator {
    game: GameState,
    game_number: u32,
    agent_a: Box<dyn Agent>,
    agent_b: Box<dyn Agent>,
    max_illegal_attempts: u32,
    transcript: Option<Transcript>,
    event_tx: Option<mpsc::UnboundedSender<GameEvent>>,
}

impl Orchestrator {
    /// Creates a new orchestrator; `agent_a` moves first.
    ///
    /// # Errors
    ///
    /// [`GameError::InvalidSetup`] if `rules` cannot start a game.
    pub fn new(
        rules: RulesConfig,
        agent_a: Box<dyn Agent>,
        agent_b: Box<dyn Agent>,
    ) -> Result<Self, GameError> {
        Ok(Self {
            game: GameState::new(rules)?,
            game_number: 1,
            agent_a,
            agent_b,
            max_illegal_attempts: DEFAULT_MAX_ILLEGAL_ATTEMPTS,
            transcript: None,
            event_tx: None,
        })
    }

    /// Sets how many refused decisions an agent gets per turn.
    pub fn with_max_illegal_attempts(mut self, attempts: u32) -> Self {
        self.max_illegal_attempts = attempts.max(1);
        self
    }

    /// Numbers this game within a longer run.
    pub fn with_game_number(mut self, game_number: u32) -> Self {
        self.game_number = game_number;
        self
    }

    /// Appends every move and the result to `transcript`.
    pub fn with_transcript(mut self, transcript: Option<Transcript>) -> Self {
        self.transcript = transcript;
        self
    }

    /// Publishes [`GameEvent`]s on `event_tx`.
    pub fn with_events(mut self, event_tx: mpsc::UnboundedSender<GameEvent>) -> Self {
        self.event_tx = Some(event_tx);
        self
    }

    /// Game being played.
    pub fn game(&self) -> &GameState {
        &self.game
    }

    /// Hands back the agents (A, B) and the transcript.
    pub fn into_parts(self) -> (Box<dyn Agent>, Box<dyn Agent>, Option<Transcript>) {
        (self.agent_a, self.agent_b, self.transcript)
    }

    /// Runs the game loop until the game finishes.
    ///
    /// # Errors
    ///
    /// Fails on a broken engine invariant or when the transcript cannot be
    /// written. Agent failures never abort the game; they count as refused
    /// decisions.
    #[instrument(skip(self), fields(game = self.game_number, a = %self.agent_a.name(), b = %self.agent_b.name()))]
    pub async fn run(&mut self) -> Result<GameResult> {
        info!("Starting game orchestration");

        loop {
            if let Some(result) = self.game.result().cloned() {
                info!(%result, "Game over");
                if let Some(transcript) = self.transcript.as_mut() {
                    let players = [self.agent_a.name(), self.agent_b.name()];
                    transcript
                        .append(&TranscriptEntry::Result {
                            game: self.game_number,
                            players,
                            result: &result,
                        })
                        .await?;
                }
                emit(&self.event_tx, GameEvent::GameOver(result.clone()));
                return Ok(result);
            }

            self.play_turn().await?;
        }
    }

    /// Asks the current agent for a move until one is accepted or its
    /// attempts run out.
    async fn play_turn(&mut self) -> Result<()> {
        let player = self.game.current_player();
        let agent = match player {
            Side::A => &mut self.agent_a,
            Side::B => &mut self.agent_b,
        };
        let snapshot = self.game.snapshot();

        emit(
            &self.event_tx,
            GameEvent::TurnStarted {
                agent: agent.name().to_string(),
                player,
                move_number: snapshot.move_number,
            },
        );

        for attempt in 1..=self.max_illegal_attempts {
            debug!(agent = %agent.name(), attempt, "Waiting for move");
            let reason = match agent.request_move(&snapshot).await {
                Ok(Decision::Sow(cell)) => match self.game.apply_move(cell.get()) {
                    Ok(record) => {
                        info!(agent = %agent.name(), %record, "Move made");
                        if let Some(transcript) = self.transcript.as_mut() {
                            transcript
                                .append(&TranscriptEntry::Move {
                                    game: self.game_number,
                                    record: &record,
                                })
                                .await?;
                        }
                        emit(&self.event_tx, GameEvent::MoveMade(record));
                        return Ok(());
                    }
                    Err(e @ GameError::IllegalMove { .. }) => e.to_string(),
                    Err(e) => return Err(e.into()),
                },
                Ok(Decision::Resign) => {
                    info!(agent = %agent.name(), "Agent resigned");
                    self.game.resign()?;
                    emit(
                        &self.event_tx,
                        GameEvent::Resigned {
                            agent: agent.name().to_string(),
                            player,
                        },
                    );
                    return Ok(());
                }
                Err(e) => e.to_string(),
            };

            warn!(agent = %agent.name(), attempt, %reason, "Move rejected");
            agent.rejected(&reason);
            emit(
                &self.event_tx,
                GameEvent::MoveRejected {
                    agent: agent.name().to_string(),
                    attempt,
                    reason,
                },
            );
        }

        warn!(
            agent = %agent.name(),
            attempts = self.max_illegal_attempts,
            "Out of attempts, treating as resignation"
        );
        self.game.resign()?;
        emit(
            &self.event_tx,
            GameEvent::Resigned {
                agent: agent.name().to_string(),
                player,
            },
        );
        Ok(())
    }
}

fn emit(event_tx: &Option<mpsc::UnboundedSender<GameEvent>>, event: GameEvent) {
    if let Some(tx) = event_tx {
        if tx.send(event).is_err() {
            debug!("Event receiver dropped");
        }
    }
}
