//! Sowing and capture resolution.
//!
//! [`resolve`] is a pure function: it copies the board it is given, plays
//! one complete turn on the copy and reports what happened. It never
//! touches banks, turn order or termination; those belong to
//! [`GameState`](crate::GameState).
//!
//! A turn is a loop over explicit state (cursor, stock) rather than
//! recursion:
//!
//! 1. Pick up every stone in the cursor cell and drop them one by one on
//!    the following cells, skipping captured mandarin holes.
//! 2. Look at the cell after the last drop. A non-empty folk cell becomes the
//!    new cursor and the loop repeats. A non-empty mandarin cell ends the
//!    turn. An empty cell opens a capture chain.
//! 3. A capture chain takes the cell after each empty gap. The cell after a
//!    capture is then looked at exactly as in step 2: another gap continues
//!    the chain, a non-empty folk cell is picked up and sown.

use crate::action::Capture;
use crate::board::Board;
use crate::config::{Direction, RulesConfig};
use crate::error::{GameError, IllegalReason};
use crate::types::{CellIndex, CellKind, RING_SIZE, Side};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

/// Outcome of resolving one move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    /// Board after the turn.
    pub board: Board,
    /// Captures in the order they happened.
    pub captures: Vec<Capture>,
    /// Sowing rounds played (1 for a move that never chains).
    pub rounds: u32,
}

impl Resolution {
    /// Points captured during the turn.
    pub fn captured_value(&self) -> u32 {
        self.captures.iter().map(|c| c.value).sum()
    }
}

/// Resolves `mover` sowing from `start` on a copy of `board`.
///
/// # Errors
///
/// Returns [`GameError::IllegalMove`] when `start` is not one of the
/// mover's non-empty folk cells.
#[instrument(skip_all, fields(start = %start, mover = %mover))]
pub fn resolve(
    board: &Board,
    start: CellIndex,
    mover: Side,
    rules: &RulesConfig,
) -> Result<Resolution, GameError> {
    let origin = board.cell_at(start.get());
    if origin.kind() != CellKind::Folk || origin.owner() != mover {
        return Err(GameError::illegal(start.get(), IllegalReason::NotOwned));
    }
    if origin.stones() == 0 {
        return Err(GameError::illegal(start.get(), IllegalReason::EmptyCell));
    }

    let direction = *rules.direction();
    let mut board = board.clone();
    let mut captures = Vec::new();
    let mut cursor = start.get();
    let mut rounds = 0;

    loop {
        rounds += 1;
        let stock = board.cell_mut(cursor).take_stones();
        let last = sow(&mut board, cursor, stock, direction);
        debug!(round = rounds, from = cursor, stock, last, "Sowed");

        let Some(next) = settle(&mut board, last, mover, rules, &mut captures) else {
            break;
        };
        if rounds >= *rules.max_rounds() {
            warn!(rounds, "Sowing round limit reached, turn ends");
            break;
        }
        cursor = next;
    }

    Ok(Resolution {
        board,
        captures,
        rounds,
    })
}

/// Drops `stock` stones one per cell after `from`, skipping holes.
///
/// Returns the index of the last cell that received a stone.
fn sow(board: &mut Board, from: usize, mut stock: u32, direction: Direction) -> usize {
    let mut index = from;
    while stock > 0 {
        index = direction.advance(index);
        if board.cell_at(index).is_hole() {
            continue;
        }
        board.cell_mut(index).drop_stone();
        stock -= 1;
    }
    index
}

/// Inspects the cells after `last`, capturing across empty gaps.
///
/// Returns the folk cell to pick up for another round, or `None` when the
/// turn is over.
fn settle(
    board: &mut Board,
    last: usize,
    mover: Side,
    rules: &RulesConfig,
    captures: &mut Vec<Capture>,
) -> Option<usize> {
    let direction = *rules.direction();
    let mut at = last;
    // Cells covered by the capture chain so far; one lap at most.
    let mut travelled = 0;

    loop {
        let next = direction.advance(at);
        let next_cell = board.cell_at(next);
        if !next_cell.is_empty() {
            if next_cell.kind() == CellKind::Mandarin {
                debug!(next, "Next cell is a mandarin cell, turn ends");
                return None;
            }
            return Some(next);
        }

        if travelled + 2 > RING_SIZE {
            debug!(next, "Capture chain completed a lap");
            return None;
        }

        let target = direction.advance(next);
        let cell = board.cell_at(target);
        if cell.is_empty() {
            debug!(gap = next, target, "Two empty cells, turn ends");
            return None;
        }
        if is_immature_mandarin(cell.has_mandarin(), cell.stones(), rules) {
            debug!(target, stones = cell.stones(), "Mandarin cell is immature, turn ends");
            return None;
        }

        let mandarin = cell.has_mandarin();
        let value = board.cell_mut(target).capture();
        let capture = Capture {
            cell: CellIndex::wrapping(target),
            value,
            captured_by: mover,
            mandarin,
        };
        debug!(cell = %capture.cell, value, mandarin, "Captured");
        captures.push(capture);

        at = target;
        travelled += 2;
    }
}

fn is_immature_mandarin(has_mandarin: bool, stones: u32, rules: &RulesConfig) -> bool {
    match rules.mandarin_min_stones() {
        Some(min) => has_mandarin && stones < *min,
        None => false,
    }
}
