//! Read-only view handed to agents.

use crate::board::Board;
use crate::config::RulesConfig;
use crate::types::{CellIndex, Scores, Side};
use serde::{Deserialize, Serialize};

/// Immutable copy of everything an agent may look at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Current board.
    pub board: Board,
    /// Banks.
    pub scores: Scores,
    /// Side to move.
    pub current_player: Side,
    /// Moves played so far.
    pub move_number: u32,
    /// Legal starting cells for `current_player` (empty once finished).
    pub legal_moves: Vec<CellIndex>,
    /// Rules in force, so agents can simulate moves.
    pub rules: RulesConfig,
}

impl Snapshot {
    /// Whether `cell` is among the legal moves.
    pub fn is_legal(&self, cell: CellIndex) -> bool {
        self.legal_moves.contains(&cell)
    }

    /// Legal moves rendered as labels, e.g. `A1, A3`.
    pub fn legal_labels(&self) -> String {
        self.legal_moves
            .iter()
            .map(|c| c.label())
            .collect::<Vec<_>>()
            .join(", ")
    }
}
