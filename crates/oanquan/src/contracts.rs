//! Contract-based validation for moves.
//!
//! Contracts define correctness through preconditions and postconditions.
//! They formalize the Hoare-style reasoning: {P} action {Q}

use crate::error::{GameError, IllegalReason};
use crate::invariants::{InvariantSet, OanQuanInvariants};
use crate::types::{CellIndex, CellKind};
use crate::GameState;
use tracing::{instrument, warn};

// ─────────────────────────────────────────────────────────────
//  Contract Trait
// ─────────────────────────────────────────────────────────────

/// A contract defines preconditions and postconditions for state transitions.
pub trait Contract<S, A> {
    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), GameError>;

    /// Checks postconditions after applying the action.
    fn post(before: &S, after: &S) -> Result<(), GameError>;
}

// ─────────────────────────────────────────────────────────────
//  Move Preconditions
// ─────────────────────────────────────────────────────────────

/// Precondition: the game has not finished.
pub struct GameInProgress;

impl GameInProgress {
    /// Fails with [`IllegalReason::GameFinished`] once the game is over.
    pub fn check(cell: usize, game: &GameState) -> Result<(), GameError> {
        if game.is_finished() {
            Err(GameError::illegal(cell, IllegalReason::GameFinished))
        } else {
            Ok(())
        }
    }
}

/// Precondition: the cell is one of the current player's folk cells.
pub struct OwnFolkCell;

impl OwnFolkCell {
    /// Fails when out of range, a mandarin cell, or the opponent's cell.
    pub fn check(cell: usize, game: &GameState) -> Result<CellIndex, GameError> {
        let index = CellIndex::new(cell).ok_or(GameError::illegal(cell, IllegalReason::OutOfRange))?;
        if index.kind() != CellKind::Folk || index.side() != game.current_player() {
            return Err(GameError::illegal(cell, IllegalReason::NotOwned));
        }
        Ok(index)
    }
}

/// Composite precondition: the cell is in the current legal move list.
pub struct LegalMove;

impl LegalMove {
    /// Validates all preconditions for a move.
    #[instrument(skip(game))]
    pub fn check(cell: usize, game: &GameState) -> Result<(), GameError> {
        GameInProgress::check(cell, game)?;
        let index = OwnFolkCell::check(cell, game)?;
        if !game.legal_moves()?.contains(&index) {
            return Err(GameError::illegal(cell, IllegalReason::EmptyCell));
        }
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────
//  Move Contract (Pre + Post)
// ─────────────────────────────────────────────────────────────

/// Contract for sowing moves.
///
/// Preconditions:
/// - Game in progress
/// - Cell is a non-empty folk cell of the current player
///
/// Postconditions:
/// - Exactly one move was added
/// - Value is conserved, holes stay empty, history matches the board
pub struct MoveContract;

impl Contract<GameState, usize> for MoveContract {
    fn pre(game: &GameState, cell: &usize) -> Result<(), GameError> {
        LegalMove::check(*cell, game)
    }

    fn post(before: &GameState, after: &GameState) -> Result<(), GameError> {
        if after.move_number() != before.move_number() + 1 {
            warn!(
                before = before.move_number(),
                after = after.move_number(),
                "Move count did not advance by one"
            );
            return Err(GameError::InvariantViolation(
                "Postcondition failed: move count did not advance by one".to_string(),
            ));
        }

        OanQuanInvariants::check_all(after).map_err(|violations| {
            let descriptions = violations
                .iter()
                .map(|v| v.description.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            GameError::InvariantViolation(format!("Postcondition failed: {}", descriptions))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Board, RulesConfig, Scores, Side};

    #[test]
    fn test_precondition_accepts_opening_move() {
        let game = GameState::default();
        assert!(MoveContract::pre(&game, &3).is_ok());
    }

    #[test]
    fn test_precondition_rejects_opponent_cell() {
        let game = GameState::default();
        assert_eq!(
            MoveContract::pre(&game, &8),
            Err(GameError::illegal(8, IllegalReason::NotOwned))
        );
    }

    #[test]
    fn test_precondition_rejects_out_of_range() {
        let game = GameState::default();
        assert_eq!(
            MoveContract::pre(&game, &12),
            Err(GameError::illegal(12, IllegalReason::OutOfRange))
        );
    }

    #[test]
    fn test_precondition_rejects_empty_cell() {
        let board = Board::from_counts([0, 0, 5, 0, 0, 0, 0, 5, 0, 0, 0, 0], 10);
        let game = GameState::with_position(RulesConfig::default(), board, Scores::new(20, 20), Side::A)
            .expect("valid position");
        assert_eq!(
            MoveContract::pre(&game, &1),
            Err(GameError::illegal(1, IllegalReason::EmptyCell))
        );
    }

    #[test]
    fn test_postcondition_holds_after_move() {
        let before = GameState::default();
        let mut after = before.clone();
        after.apply_move(4).expect("legal");
        assert!(MoveContract::post(&before, &after).is_ok());
    }

    #[test]
    fn test_postcondition_detects_corruption() {
        let before = GameState::default();
        let mut after = before.clone();
        after.apply_move(4).expect("legal");
        after.board_mut().cell_mut(2).drop_stone();
        assert!(MoveContract::post(&before, &after).is_err());
    }

    #[test]
    fn test_postcondition_requires_one_move() {
        let game = GameState::default();
        assert!(matches!(
            MoveContract::post(&game, &game),
            Err(GameError::InvariantViolation(_))
        ));
    }
}
