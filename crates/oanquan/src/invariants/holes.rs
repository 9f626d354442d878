//! Captured mandarin cells stay empty for the rest of the game.

use super::Invariant;
use crate::{CellKind, GameState};

/// Invariant: holes hold nothing, live mandarin cells keep their full
/// mandarin value, and folk cells never hold a mandarin.
pub struct HolesStayEmptyInvariant;

impl Invariant<GameState> for HolesStayEmptyInvariant {
    fn holds(game: &GameState) -> bool {
        let mandarin_value = *game.config().mandarin_value();
        game.board().cells().iter().all(|cell| match cell.kind() {
            CellKind::Folk => !cell.has_mandarin() && !cell.is_hole(),
            CellKind::Mandarin if cell.is_hole() => cell.is_empty(),
            CellKind::Mandarin => cell.mandarin_value() == mandarin_value,
        })
    }

    fn description() -> &'static str {
        "Captured mandarin cells are empty holes"
    }
}
