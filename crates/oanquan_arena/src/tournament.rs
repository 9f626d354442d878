//! Multi-game matches with alternating seats.

use crate::agents::Agent;
use crate::orchestrator::{DEFAULT_MAX_ILLEGAL_ATTEMPTS, GameEvent, Orchestrator};
use crate::transcript::Transcript;
use anyhow::Result;
use derive_getters::Getters;
use derive_new::new;
use oanquan::{GameResult, RulesConfig, Side};
use serde::Serialize;
use tokio::sync::mpsc;
use tracing::{info, instrument};

/// Aggregate results of a tournament.
#[derive(Debug, Clone, PartialEq, Getters, Serialize, new)]
pub struct TournamentSummary {
    /// Agent names in entry order.
    agents: [String; 2],
    /// Wins per agent, in entry order.
    #[new(default)]
    wins: [u32; 2],
    /// Drawn games.
    #[new(default)]
    draws: u32,
    /// Games played.
    #[new(default)]
    games: u32,
    /// Moves summed over all games.
    #[new(default)]
    total_moves: u32,
    /// Every game's result, in order.
    #[new(default)]
    results: Vec<GameResult>,
}

impl TournamentSummary {
    /// Adds a game in which the agent at entry index `first_seat` sat as A.
    fn record(&mut self, first_seat: usize, result: GameResult) {
        match result.winner() {
            Some(Side::A) => self.wins[first_seat] += 1,
            Some(Side::B) => self.wins[1 - first_seat] += 1,
            None => self.draws += 1,
        }
        self.games += 1;
        self.total_moves += *result.total_moves();
        self.results.push(result);
    }

    /// Mean moves per game (0 when nothing was played).
    pub fn average_moves(&self) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            f64::from(self.total_moves) / f64::from(self.games)
        }
    }
}

impl std::fmt::Display for TournamentSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Games played: {}", self.games)?;
        for (name, wins) in self.agents.iter().zip(self.wins) {
            writeln!(f, "  {}: {} wins", name, wins)?;
        }
        writeln!(f, "  Draws: {}", self.draws)?;
        write!(f, "  Average moves: {:.1}", self.average_moves())
    }
}

/// A series of games between two agents; seats swap every game.
pub struct Tournament {
    rules: RulesConfig,
    first: Box<dyn Agent>,
    second: Box<dyn Agent>,
    rounds: u32,
    max_illegal_attempts: u32,
    transcript: Option<Transcript>,
    event_tx: Option<mpsc::UnboundedSender<GameEvent>>,
}

impl Tournament {
    /// Creates a tournament; `first` sits as A in the opening game.
    pub fn new(rules: RulesConfig, first: Box<dyn Agent>, second: Box<dyn Agent>, rounds: u32) -> Self {
        Self {
            rules,
            first,
            second,
            rounds,
            max_illegal_attempts: DEFAULT_MAX_ILLEGAL_ATTEMPTS,
            transcript: None,
            event_tx: None,
        }
    }

    /// Sets how many refused decisions an agent gets per turn.
    pub fn with_max_illegal_attempts(mut self, attempts: u32) -> Self {
        self.max_illegal_attempts = attempts;
        self
    }

    /// Writes every game to `transcript`.
    pub fn with_transcript(mut self, transcript: Option<Transcript>) -> Self {
        self.transcript = transcript;
        self
    }

    /// Forwards every game's events to `event_tx`.
    pub fn with_events(mut self, event_tx: mpsc::UnboundedSender<GameEvent>) -> Self {
        self.event_tx = Some(event_tx);
        self
    }

    /// Plays every round and returns the summary.
    ///
    /// # Errors
    ///
    /// Propagates the first fatal orchestration error.
    #[instrument(skip(self), fields(rounds = self.rounds))]
    pub async fn run(self) -> Result<TournamentSummary> {
        let Self {
            rules,
            mut first,
            mut second,
            rounds,
            max_illegal_attempts,
            mut transcript,
            event_tx,
        } = self;
        let mut summary = TournamentSummary::new([first.name().to_string(), second.name().to_string()]);

        for round in 0..rounds {
            let first_seat = (round % 2) as usize;
            let (agent_a, agent_b) = if first_seat == 0 { (first, second) } else { (second, first) };

            let mut orchestrator = Orchestrator::new(rules.clone(), agent_a, agent_b)?
                .with_game_number(round + 1)
                .with_max_illegal_attempts(max_illegal_attempts)
                .with_transcript(transcript.take());
            if let Some(tx) = &event_tx {
                orchestrator = orchestrator.with_events(tx.clone());
            }

            let outcome = orchestrator.run().await;
            let (agent_a, agent_b, returned) = orchestrator.into_parts();
            transcript = returned;
            (first, second) = if first_seat == 0 { (agent_a, agent_b) } else { (agent_b, agent_a) };

            let result = outcome?;
            info!(round = round + 1, %result, "Round finished");
            summary.record(first_seat, result);
        }

        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oanquan::{EndReason, Outcome, Scores};

    fn result(outcome: Outcome, moves: u32) -> GameResult {
        serde_json::from_value(serde_json::json!({
            "outcome": outcome,
            "reason": EndReason::MoveLimit,
            "final_scores": Scores::new(1, 1),
            "total_moves": moves,
        }))
        .expect("valid result")
    }

    #[test]
    fn test_record_maps_seats_back_to_agents() {
        let mut summary = TournamentSummary::new(["x".into(), "y".into()]);
        summary.record(0, result(Outcome::Winner(Side::A), 10));
        summary.record(1, result(Outcome::Winner(Side::A), 20));
        summary.record(1, result(Outcome::Draw, 30));
        assert_eq!(summary.wins(), &[1, 1]);
        assert_eq!(*summary.draws(), 1);
        assert_eq!(summary.average_moves(), 20.0);
    }
}
