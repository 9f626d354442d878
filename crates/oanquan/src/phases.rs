//! Game status and final results.

use crate::types::{Scores, Side};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Outcome of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// Side won the game.
    Winner(Side),
    /// Game ended in a draw.
    Draw,
}

impl Outcome {
    /// Higher bank wins; equal banks draw.
    pub fn by_score(scores: &Scores) -> Self {
        match scores.leader() {
            Some(side) => Outcome::Winner(side),
            None => Outcome::Draw,
        }
    }

    /// Returns the winner if there is one.
    pub fn winner(&self) -> Option<Side> {
        match self {
            Outcome::Winner(side) => Some(*side),
            Outcome::Draw => None,
        }
    }

    /// Returns true if the game was a draw.
    pub fn is_draw(&self) -> bool {
        matches!(self, Outcome::Draw)
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Winner(side) => write!(f, "Player {} wins", side),
            Outcome::Draw => write!(f, "Draw"),
        }
    }
}

/// Why a game finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "snake_case")]
pub enum EndReason {
    /// Both mandarin cells were captured.
    MandarinsCaptured,
    /// A bank reached the configured threshold.
    ScoreThreshold,
    /// A player could not replenish their side.
    Eliminated,
    /// The player to move had no legal move.
    Stalled,
    /// The move limit was reached.
    MoveLimit,
    /// A player resigned.
    Resigned,
}

/// Final result handed to whoever runs the game.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct GameResult {
    /// Winner or draw.
    outcome: Outcome,
    /// What ended the game.
    reason: EndReason,
    /// Banks at the end.
    final_scores: Scores,
    /// Moves played.
    total_moves: u32,
}

impl GameResult {
    pub(crate) fn new(outcome: Outcome, reason: EndReason, final_scores: Scores, total_moves: u32) -> Self {
        Self {
            outcome,
            reason,
            final_scores,
            total_moves,
        }
    }

    /// Winning side, if any.
    pub fn winner(&self) -> Option<Side> {
        self.outcome.winner()
    }
}

impl std::fmt::Display for GameResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} ({}) after {} moves, {}",
            self.outcome, self.reason, self.total_moves, self.final_scores
        )
    }
}

/// Current status of the game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// Game is ongoing.
    InProgress,
    /// Game has finished.
    Finished(GameResult),
}
