//! Errors raised by the game engine.

use crate::types::Side;

/// Why a move was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum IllegalReason {
    /// The index is not on the ring.
    #[display("cell index out of range")]
    OutOfRange,
    /// The cell is a mandarin cell or belongs to the opponent.
    #[display("cell is not one of the mover's folk cells")]
    NotOwned,
    /// The cell holds no stones.
    #[display("cell is empty")]
    EmptyCell,
    /// The game has already finished.
    #[display("game is already over")]
    GameFinished,
}

/// Error that can occur when querying or advancing a game.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum GameError {
    /// The chosen cell is not a legal start for the current player.
    #[display("Illegal move at cell {}: {}", cell, reason)]
    IllegalMove {
        /// Raw index the caller asked for.
        cell: usize,
        /// Why it was rejected.
        reason: IllegalReason,
    },

    /// The player to move owns no non-empty folk cell.
    #[display("Player {} has no legal moves", player)]
    NoLegalMoves {
        /// Side without moves.
        player: Side,
    },

    /// A game could not be set up from the given rules or position.
    #[display("Invalid setup: {}", _0)]
    InvalidSetup(String),

    /// An engine invariant no longer holds. Fatal.
    #[display("Invariant violation: {}", _0)]
    InvariantViolation(String),

    /// The operation requires a game in progress.
    #[display("Game is already over")]
    GameOver,
}

impl std::error::Error for GameError {}

impl GameError {
    /// Shorthand for [`GameError::IllegalMove`].
    pub fn illegal(cell: usize, reason: IllegalReason) -> Self {
        GameError::IllegalMove { cell, reason }
    }
}
