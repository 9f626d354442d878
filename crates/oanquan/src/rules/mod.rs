//! Game rules applied between turns.
//!
//! These are pure functions over a board and a pair of banks, kept apart
//! from [`GameState`](crate::GameState) so they can be checked in isolation.

pub mod replenish;
pub mod termination;

pub use replenish::{ReplenishReport, replenish, replenish_side};
pub use termination::{check_mandarins, check_score_threshold, elimination_outcome};

use crate::action::Replenishment;
use crate::board::Board;
use crate::config::RulesConfig;
use crate::phases::{EndReason, Outcome};
use crate::types::{Scores, Side};
use tracing::instrument;

/// What happened between the end of a move and the next turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    /// Replenishments applied.
    pub replenishments: Vec<Replenishment>,
    /// Set when the game is over.
    pub end: Option<(Outcome, EndReason)>,
}

/// Runs the between-turn rules: mandarin check, score threshold, then
/// replenishment for the side about to move (`next`).
///
/// Stalling and the move limit depend on turn bookkeeping and are left to
/// the caller.
#[instrument(skip(board, scores, rules))]
pub fn evaluate(board: &mut Board, scores: &mut Scores, next: Side, rules: &RulesConfig) -> Evaluation {
    if let Some(end) = check_mandarins(board, scores) {
        return Evaluation {
            replenishments: Vec::new(),
            end: Some(end),
        };
    }

    if let Some(end) = check_score_threshold(scores, rules) {
        return Evaluation {
            replenishments: Vec::new(),
            end: Some(end),
        };
    }

    let report = replenish(board, scores, next, rules);
    let end = elimination_outcome(&report.eliminated, scores);
    Evaluation {
        replenishments: report.replenishments,
        end,
    }
}
