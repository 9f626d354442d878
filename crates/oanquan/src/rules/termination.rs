//! End-of-game checks that depend only on the board and the banks.

use crate::board::Board;
use crate::config::RulesConfig;
use crate::phases::{EndReason, Outcome};
use crate::types::{Scores, Side};
use tracing::instrument;

/// Ends the game once both mandarin cells are holes.
#[instrument(skip(board))]
pub fn check_mandarins(board: &Board, scores: &Scores) -> Option<(Outcome, EndReason)> {
    board
        .both_mandarins_captured()
        .then(|| (Outcome::by_score(scores), EndReason::MandarinsCaptured))
}

/// Ends the game once a bank reaches the optional threshold.
#[instrument(skip(rules))]
pub fn check_score_threshold(scores: &Scores, rules: &RulesConfig) -> Option<(Outcome, EndReason)> {
    let threshold = (*rules.score_threshold())?;
    (scores.a >= threshold || scores.b >= threshold)
        .then(|| (Outcome::by_score(scores), EndReason::ScoreThreshold))
}

/// Outcome when sides failed to replenish.
///
/// One eliminated side loses outright; if both are out the banks decide.
pub fn elimination_outcome(eliminated: &[Side], scores: &Scores) -> Option<(Outcome, EndReason)> {
    match eliminated {
        [] => None,
        [side] => Some((Outcome::Winner(side.opponent()), EndReason::Eliminated)),
        _ => Some((Outcome::by_score(scores), EndReason::Eliminated)),
    }
}
