//! Records emitted while resolving moves.
//!
//! A [`MoveRecord`] is the structured event handed to observers after every
//! applied move. The engine never formats or persists it.

use crate::board::Board;
use crate::types::{CellIndex, Scores, Side};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// One captured cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Capture {
    /// Cell that was emptied.
    pub cell: CellIndex,
    /// Points banked from it.
    pub value: u32,
    /// Side that banked the points.
    pub captured_by: Side,
    /// Whether the capture took a mandarin stone.
    pub mandarin: bool,
}

/// Stones moved from a bank back onto the board.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Replenishment {
    /// Side that paid.
    pub player: Side,
    /// Folk cells refilled.
    pub cells: Vec<CellIndex>,
    /// Stones spent in total.
    pub spent: u32,
}

/// Structured record of one applied move.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct MoveRecord {
    /// 1-based move number.
    move_number: u32,
    /// Side that moved.
    player: Side,
    /// Cell the stones were picked up from.
    start_cell: CellIndex,
    /// Captures in the order they happened.
    captures: Vec<Capture>,
    /// Replenishments applied after the move.
    replenishments: Vec<Replenishment>,
    /// Sowing rounds the move took.
    rounds: u32,
    /// Board after the move.
    board_after: Board,
    /// Banks after the move.
    scores_after: Scores,
}

impl MoveRecord {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        move_number: u32,
        player: Side,
        start_cell: CellIndex,
        captures: Vec<Capture>,
        replenishments: Vec<Replenishment>,
        rounds: u32,
        board_after: Board,
        scores_after: Scores,
    ) -> Self {
        Self {
            move_number,
            player,
            start_cell,
            captures,
            replenishments,
            rounds,
            board_after,
            scores_after,
        }
    }

    /// Points captured by this move.
    pub fn captured_value(&self) -> u32 {
        self.captures.iter().map(|c| c.value).sum()
    }
}

impl std::fmt::Display for MoveRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "#{} {} sows {} ({} rounds, +{}) [{}]",
            self.move_number,
            self.player,
            self.start_cell,
            self.rounds,
            self.captured_value(),
            self.scores_after
        )
    }
}
