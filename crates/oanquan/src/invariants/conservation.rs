//! Value conservation: stones are moved or banked, never created or lost.

use super::Invariant;
use crate::GameState;

/// Invariant: board value plus both banks equals the rule set's total.
pub struct ConservationInvariant;

impl Invariant<GameState> for ConservationInvariant {
    fn holds(game: &GameState) -> bool {
        game.board().total_value() + game.scores().total() == game.config().total_value()
    }

    fn description() -> &'static str {
        "Board value plus banked scores equals the total value in play"
    }
}
