//! History consistency: the record list matches the live state.

use super::Invariant;
use crate::GameState;

/// Invariant: one record per move, numbered 1..=n, the last one matching
/// the current board and banks.
pub struct HistoryConsistentInvariant;

impl Invariant<GameState> for HistoryConsistentInvariant {
    fn holds(game: &GameState) -> bool {
        let history = game.history();
        if history.len() != game.move_number() as usize {
            return false;
        }

        let numbered = history
            .iter()
            .enumerate()
            .all(|(i, record)| *record.move_number() as usize == i + 1);
        if !numbered {
            return false;
        }

        match history.last() {
            Some(last) => last.board_after() == game.board() && *last.scores_after() == game.scores(),
            None => true,
        }
    }

    fn description() -> &'static str {
        "Move history matches the move count and the current position"
    }
}
