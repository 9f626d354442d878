//! Scripted positions exercising captures, replenishment and termination.

use oanquan::{
    Board, Cell, CellIndex, EndReason, GameError, GameState, IllegalReason, Outcome, RulesConfig,
    Scores, Side,
};

fn cell(label: &str) -> usize {
    label.parse::<CellIndex>().expect("valid label").get()
}

fn total(game: &GameState) -> u32 {
    game.board().total_value() + game.scores().total()
}

#[test]
fn test_single_stone_captures_cell_after_gap() {
    let board = Board::from_counts([0, 1, 0, 0, 3, 0, 0, 0, 0, 4, 0, 0], 10);
    let mut game = GameState::with_position(RulesConfig::default(), board, Scores::new(0, 42), Side::A)
        .expect("valid position");

    let record = game.apply_move(cell("A1")).expect("legal");

    assert_eq!(record.captures().len(), 1);
    assert_eq!(record.captures()[0].cell.label(), "A4");
    assert_eq!(record.captures()[0].value, 3);
    assert_eq!(game.board().cell_at(cell("A2")).stones(), 1);
    assert!(game.board().is_empty(cell("A4")));
    assert_eq!(game.scores(), Scores::new(3, 42));
    assert_eq!(total(&game), 70);
}

#[test]
fn test_non_empty_next_cell_is_sown_instead_of_captured() {
    let board = Board::from_counts([0, 1, 0, 2, 3, 0, 0, 0, 0, 2, 0, 0], 10);
    let mut game = GameState::with_position(RulesConfig::default(), board, Scores::new(0, 42), Side::A)
        .expect("valid position");

    let record = game.apply_move(cell("A1")).expect("legal");

    // A3's two stones travel on to A4 and A5; QB is next, so the turn ends.
    assert!(record.captures().is_empty());
    assert_eq!(*record.rounds(), 2);
    assert_eq!(game.board().cell_at(cell("A3")).stones(), 0);
    assert_eq!(game.board().cell_at(cell("A4")).stones(), 4);
    assert_eq!(game.board().cell_at(cell("A5")).stones(), 1);
    assert_eq!(game.scores(), Scores::new(0, 42));
}

#[test]
fn test_opening_a5_chains_once_without_capture() {
    let mut game = GameState::default();

    let record = game.apply_move(cell("A5")).expect("legal");

    assert!(record.captures().is_empty());
    assert_eq!(*record.rounds(), 2);
    let board = game.board();
    for label in ["A1", "A2", "A3", "A4", "B1", "B2", "B3", "B4"] {
        assert_eq!(board.cell_at(cell(label)).stones(), 6, "{label}");
    }
    assert_eq!(board.cell_at(cell("A5")).stones(), 0);
    assert_eq!(board.cell_at(cell("B5")).stones(), 0);
    assert_eq!(board.cell_at(cell("QA")).stones(), 1);
    assert_eq!(board.cell_at(cell("QB")).stones(), 1);
    assert_eq!(board.cell_at(cell("QB")).value(), 11);
    assert_eq!(game.scores(), Scores::default());
    assert_eq!(game.current_player(), Side::B);
}

#[test]
fn test_board_sweep_with_short_bank_loses() {
    // A5 drops its only stone into QB; B1 and B2 are empty so nothing is
    // taken, and every folk cell is now empty.
    let board = Board::from_counts([0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0], 10);
    let mut game = GameState::with_position(RulesConfig::default(), board, Scores::new(3, 46), Side::A)
        .expect("valid position");

    let record = game.apply_move(cell("A5")).expect("legal");

    let result = game.result().expect("finished");
    assert_eq!(result.reason(), &EndReason::Eliminated);
    assert_eq!(result.outcome(), &Outcome::Winner(Side::B));
    assert!(record.replenishments().is_empty());
    assert_eq!(result.final_scores(), &Scores::new(3, 46));
    assert!(game.board().folk_swept());
    assert_eq!(total(&game), 70);
}

#[test]
fn test_board_sweep_refills_both_sides_and_play_continues() {
    let board = Board::from_counts([0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0], 10);
    let mut game = GameState::with_position(RulesConfig::default(), board, Scores::new(25, 24), Side::A)
        .expect("valid position");

    let record = game.apply_move(cell("A5")).expect("legal");

    assert!(!game.is_finished());
    assert_eq!(record.replenishments().len(), 2);
    assert_eq!(record.replenishments()[1].cells.len(), 4);
    assert_eq!(game.scores(), Scores::new(0, 4));
    assert_eq!(game.current_player(), Side::B);
    assert_eq!(total(&game), 70);
}

#[test]
fn test_capturing_last_mandarin_ends_game_by_score() {
    let mut cells = *Board::from_counts([0, 0, 0, 1, 0, 0, 5, 2, 0, 0, 0, 0], 10).cells();
    cells[0] = Cell::hole(Side::A);
    let board = Board::from_cells(cells);
    let mut game = GameState::with_position(RulesConfig::default(), board, Scores::new(20, 32), Side::A)
        .expect("valid position");
    assert_eq!(total(&game), 70);

    let record = game.apply_move(cell("A3")).expect("legal");

    assert_eq!(record.captured_value(), 15);
    assert!(record.captures()[0].mandarin);
    let result = game.result().expect("finished");
    assert_eq!(result.reason(), &EndReason::MandarinsCaptured);
    assert_eq!(result.winner(), Some(Side::A));
    assert_eq!(result.final_scores(), &Scores::new(35, 32));
    assert!(game.board().both_mandarins_captured());
}

#[test]
fn test_score_threshold_ends_game() {
    let rules = RulesConfig::default().with_score_threshold(Some(25));
    let board = Board::from_counts([0, 1, 0, 0, 3, 0, 0, 0, 0, 4, 0, 0], 10);
    let mut game = GameState::with_position(rules, board, Scores::new(22, 20), Side::A)
        .expect("valid position");

    game.apply_move(cell("A1")).expect("legal");

    let result = game.result().expect("finished");
    assert_eq!(result.reason(), &EndReason::ScoreThreshold);
    assert_eq!(result.winner(), Some(Side::A));
}

#[test]
fn test_opponent_stalled_after_move() {
    // A5 drops into QB, B1 is empty and B2 holds B's last stones. A1 keeps
    // the board from being swept, so B is simply stuck.
    let board = Board::from_counts([0, 2, 0, 0, 0, 1, 0, 0, 3, 0, 0, 0], 10);
    let mut game = GameState::with_position(RulesConfig::default(), board, Scores::new(10, 34), Side::A)
        .expect("valid position");

    let record = game.apply_move(cell("A5")).expect("legal");

    assert_eq!(record.captured_value(), 3);
    assert!(game.board().side_is_empty(Side::B));
    let result = game.result().expect("finished");
    assert_eq!(result.reason(), &EndReason::Stalled);
    assert_eq!(result.winner(), Some(Side::B));
    assert_eq!(game.legal_moves(), Ok(Vec::new()));
}

#[test]
fn test_finished_game_rejects_moves_without_change() {
    let mut game = GameState::default();
    game.resign().expect("in progress");
    let before = game.clone();

    let err = game.apply_move(cell("A1")).expect_err("finished");

    assert_eq!(err, GameError::illegal(1, IllegalReason::GameFinished));
    assert_eq!(game, before);
}
