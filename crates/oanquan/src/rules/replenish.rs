//! Refilling folk cells from a player's bank.

use crate::action::Replenishment;
use crate::board::Board;
use crate::config::{ReplenishTrigger, RulesConfig};
use crate::types::{Scores, Side};
use strum::IntoEnumIterator;
use tracing::{debug, info, instrument};

/// Result of running replenishment before a turn.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplenishReport {
    /// Sides that refilled at least one cell.
    pub replenishments: Vec<Replenishment>,
    /// Sides that needed to refill and could not cover a single cell.
    pub eliminated: Vec<Side>,
}

/// Applies the configured replenishment trigger before `next` moves.
///
/// If any side due to refill cannot cover a single cell, nothing is
/// refilled and that side is reported as eliminated.
#[instrument(skip(board, scores, rules))]
pub fn replenish(board: &mut Board, scores: &mut Scores, next: Side, rules: &RulesConfig) -> ReplenishReport {
    let sides: Vec<Side> = match rules.replenish_trigger() {
        ReplenishTrigger::BoardSweep if board.folk_swept() => Side::iter().collect(),
        ReplenishTrigger::EmptySide if board.side_is_empty(next) => vec![next],
        _ => Vec::new(),
    };

    let stones = *rules.replenish_stones();
    let eliminated: Vec<Side> = sides
        .iter()
        .copied()
        .filter(|side| scores.get(*side) < stones)
        .collect();
    if !eliminated.is_empty() {
        // The game is over; nobody refills.
        info!(?eliminated, "Cannot replenish, game ends");
        return ReplenishReport {
            replenishments: Vec::new(),
            eliminated,
        };
    }

    let replenishments = sides
        .into_iter()
        .filter_map(|side| replenish_side(board, scores, side, stones))
        .collect();
    ReplenishReport {
        replenishments,
        eliminated: Vec::new(),
    }
}

/// Refills `side`'s folk cells in ring order, `stones` each, while the bank covers them.
///
/// Returns `None` when not even one cell could be refilled.
#[instrument(skip(board, scores))]
pub fn replenish_side(board: &mut Board, scores: &mut Scores, side: Side, stones: u32) -> Option<Replenishment> {
    let mut cells = Vec::new();
    for cell in side.folk_cells() {
        if !scores.spend(side, stones) {
            break;
        }
        board.cell_mut(cell.get()).add_stones(stones);
        cells.push(cell);
    }

    if cells.is_empty() {
        info!(%side, bank = scores.get(side), "Cannot replenish, player eliminated");
        return None;
    }

    let spent = stones * cells.len() as u32;
    debug!(%side, spent, cells = cells.len(), "Replenished");
    Some(Replenishment {
        player: side,
        cells,
        spent,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn swept() -> Board {
        Board::from_counts([0; 12], 10)
    }

    #[test]
    fn test_full_refill_when_bank_covers_all_cells() {
        let mut board = swept();
        let mut scores = Scores::new(30, 0);
        let replenishment = replenish_side(&mut board, &mut scores, Side::A, 5).expect("refilled");
        assert_eq!(replenishment.cells.len(), 5);
        assert_eq!(replenishment.spent, 25);
        assert_eq!(scores.a, 5);
        assert_eq!(board.side_stones(Side::A), 25);
    }

    #[test]
    fn test_partial_refill() {
        let mut board = swept();
        let mut scores = Scores::new(0, 12);
        let replenishment = replenish_side(&mut board, &mut scores, Side::B, 5).expect("refilled");
        assert_eq!(replenishment.cells.len(), 2);
        assert_eq!(scores.b, 2);
        assert_eq!(board.cell_at(7).stones(), 5);
        assert_eq!(board.cell_at(8).stones(), 5);
        assert_eq!(board.cell_at(9).stones(), 0);
    }

    #[test]
    fn test_board_sweep_eliminates_poor_side() {
        let mut board = swept();
        let mut scores = Scores::new(3, 40);
        let report = replenish(&mut board, &mut scores, Side::A, &RulesConfig::default());
        assert_eq!(report.eliminated, vec![Side::A]);
        assert!(report.replenishments.is_empty());
        assert_eq!(scores, Scores::new(3, 40));
        assert_eq!(board.side_stones(Side::B), 0);
    }

    #[test]
    fn test_board_sweep_needs_both_sides_empty() {
        let mut board = Board::from_counts([0, 0, 0, 0, 0, 0, 0, 2, 0, 0, 0, 0], 10);
        let mut scores = Scores::new(3, 40);
        let report = replenish(&mut board, &mut scores, Side::A, &RulesConfig::default());
        assert_eq!(report, ReplenishReport::default());
    }

    #[test]
    fn test_empty_side_trigger_only_refills_next_player() {
        let rules = RulesConfig::default()
            .with_replenish_trigger(ReplenishTrigger::EmptySide)
            .with_replenish_stones(1);
        let mut board = Board::from_counts([0, 0, 0, 0, 0, 0, 0, 2, 0, 0, 0, 0], 10);
        let mut scores = Scores::new(8, 40);
        let report = replenish(&mut board, &mut scores, Side::A, &rules);
        assert!(report.eliminated.is_empty());
        assert_eq!(report.replenishments[0].cells.len(), 5);
        assert_eq!(scores, Scores::new(3, 40));
        assert_eq!(board.side_stones(Side::A), 5);
    }
}
