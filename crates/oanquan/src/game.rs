//! Turn controller for one game.

use crate::action::MoveRecord;
use crate::board::Board;
use crate::config::RulesConfig;
use crate::contracts::{Contract, MoveContract};
use crate::error::{GameError, IllegalReason};
use crate::phases::{EndReason, GameResult, GameStatus, Outcome};
use crate::resolver::{self, Resolution};
use crate::rules;
use crate::snapshot::Snapshot;
use crate::types::{CellIndex, Scores, Side};
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument};

/// Complete game state.
///
/// Owns the board and both banks. Every mutation goes through
/// [`apply_move`](Self::apply_move) or [`resign`](Self::resign).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    config: RulesConfig,
    board: Board,
    scores: Scores,
    current_player: Side,
    move_number: u32,
    status: GameStatus,
    history: Vec<MoveRecord>,
}

impl GameState {
    /// Creates a new game with the opening layout; A moves first.
    ///
    /// # Errors
    ///
    /// [`GameError::InvalidSetup`] if `config` fails
    /// [`RulesConfig::validate`].
    #[instrument(skip(config))]
    pub fn new(config: RulesConfig) -> Result<Self, GameError> {
        validate_rules(&config)?;
        let board = Board::new(&config);
        Ok(Self::start(config, board, Scores::default(), Side::A))
    }

    /// Creates a game from an arbitrary position.
    ///
    /// If `current_player` has nothing to sow the game is finished
    /// immediately as stalled.
    ///
    /// # Errors
    ///
    /// [`GameError::InvalidSetup`] if `config` is invalid or the board and
    /// banks together do not hold the value `config` puts in play.
    #[instrument(skip(config, board))]
    pub fn with_position(
        config: RulesConfig,
        board: Board,
        scores: Scores,
        current_player: Side,
    ) -> Result<Self, GameError> {
        validate_rules(&config)?;
        let total = board.total_value() + scores.total();
        if total != config.total_value() {
            error!(total, expected = config.total_value(), "Position does not hold the full value");
            return Err(GameError::InvalidSetup(format!(
                "board and banks hold {} but the rules put {} in play",
                total,
                config.total_value()
            )));
        }
        Ok(Self::start(config, board, scores, current_player))
    }

    fn start(config: RulesConfig, board: Board, scores: Scores, current_player: Side) -> Self {
        let mut state = Self {
            config,
            board,
            scores,
            current_player,
            move_number: 0,
            status: GameStatus::InProgress,
            history: Vec::new(),
        };
        state.finish_if_stalled(current_player);
        state
    }

    /// Rules in force.
    pub fn config(&self) -> &RulesConfig {
        &self.config
    }

    /// Current board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Banked scores.
    pub fn scores(&self) -> Scores {
        self.scores
    }

    /// Side to move (the side that would have moved, once finished).
    pub fn current_player(&self) -> Side {
        self.current_player
    }

    /// Moves applied so far.
    pub fn move_number(&self) -> u32 {
        self.move_number
    }

    /// Game status.
    pub fn status(&self) -> &GameStatus {
        &self.status
    }

    /// Records of every applied move.
    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    /// Final result, once finished.
    pub fn result(&self) -> Option<&GameResult> {
        match &self.status {
            GameStatus::Finished(result) => Some(result),
            GameStatus::InProgress => None,
        }
    }

    /// Whether the game has finished.
    pub fn is_finished(&self) -> bool {
        self.result().is_some()
    }

    /// Legal starting cells for the current player.
    ///
    /// A finished game has no legal moves and returns an empty list.
    ///
    /// # Errors
    ///
    /// [`GameError::NoLegalMoves`] when the game is in progress and the
    /// current player owns no non-empty folk cell.
    pub fn legal_moves(&self) -> Result<Vec<CellIndex>, GameError> {
        if self.is_finished() {
            return Ok(Vec::new());
        }
        self.legal_moves_for(self.current_player)
    }

    fn legal_moves_for(&self, side: Side) -> Result<Vec<CellIndex>, GameError> {
        let cells = self.board.legal_start_cells(side);
        if cells.is_empty() {
            return Err(GameError::NoLegalMoves { player: side });
        }
        Ok(cells)
    }

    /// Read-only view for agents.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            board: self.board.clone(),
            scores: self.scores,
            current_player: self.current_player,
            move_number: self.move_number,
            legal_moves: self.legal_moves().unwrap_or_default(),
            rules: self.config.clone(),
        }
    }

    /// Sows from `cell` for the current player and advances the game.
    ///
    /// On any error the state is left exactly as it was.
    ///
    /// # Errors
    ///
    /// - [`GameError::IllegalMove`] if the game is over or `cell` is not a
    ///   legal start.
    /// - [`GameError::InvariantViolation`] if the move would break value
    ///   conservation. This is fatal and the game must not continue.
    #[instrument(skip(self), fields(player = %self.current_player, move_number = self.move_number))]
    pub fn apply_move(&mut self, cell: usize) -> Result<MoveRecord, GameError> {
        MoveContract::pre(self, &cell)?;

        #[cfg(debug_assertions)]
        let before = self.clone();

        let mover = self.current_player;
        let start = CellIndex::new(cell).ok_or(GameError::illegal(cell, IllegalReason::OutOfRange))?;
        let Resolution {
            mut board,
            captures,
            rounds,
        } = resolver::resolve(&self.board, start, mover, &self.config)?;

        let mut scores = self.scores;
        for capture in &captures {
            scores.bank(mover, capture.value);
        }

        let next = mover.opponent();
        let evaluation = rules::evaluate(&mut board, &mut scores, next, &self.config);

        let total = board.total_value() + scores.total();
        if total != self.config.total_value() {
            error!(
                total,
                expected = self.config.total_value(),
                "Value not conserved, refusing to commit move"
            );
            return Err(GameError::InvariantViolation(format!(
                "value not conserved after {} sowed {}: {} != {}",
                mover,
                start,
                total,
                self.config.total_value()
            )));
        }

        self.board = board;
        self.scores = scores;
        self.move_number += 1;

        match evaluation.end {
            Some((outcome, reason)) => self.finish(outcome, reason),
            None => self.advance_turn(next),
        }

        let record = MoveRecord::new(
            self.move_number,
            mover,
            start,
            captures,
            evaluation.replenishments,
            rounds,
            self.board.clone(),
            self.scores,
        );
        self.history.push(record.clone());

        #[cfg(debug_assertions)]
        self.check_post(before)?;

        info!(%record, "Move applied");
        Ok(record)
    }

    /// Current player resigns; the opponent wins.
    ///
    /// # Errors
    ///
    /// [`GameError::GameOver`] if the game has already finished.
    #[instrument(skip(self), fields(player = %self.current_player))]
    pub fn resign(&mut self) -> Result<GameResult, GameError> {
        if self.is_finished() {
            return Err(GameError::GameOver);
        }
        self.finish(Outcome::Winner(self.current_player.opponent()), EndReason::Resigned);
        self.result().cloned().ok_or(GameError::GameOver)
    }

    /// Hands the turn to `next`, unless it is stalled or the move limit is hit.
    fn advance_turn(&mut self, next: Side) {
        if self.finish_if_stalled(next) {
            return;
        }
        if self.move_number >= *self.config.max_moves() {
            self.finish(Outcome::by_score(&self.scores), EndReason::MoveLimit);
            return;
        }
        self.current_player = next;
    }

    fn finish_if_stalled(&mut self, side: Side) -> bool {
        match self.legal_moves_for(side) {
            Err(GameError::NoLegalMoves { player }) => {
                info!(%player, "No legal moves, game over");
                self.finish(Outcome::by_score(&self.scores), EndReason::Stalled);
                true
            }
            _ => false,
        }
    }

    fn finish(&mut self, outcome: Outcome, reason: EndReason) {
        let result = GameResult::new(outcome, reason, self.scores, self.move_number);
        info!(%result, "Game finished");
        self.status = GameStatus::Finished(result);
    }

    /// Rolls back to `before` if the move contract's postcondition fails.
    #[cfg(debug_assertions)]
    fn check_post(&mut self, before: Self) -> Result<(), GameError> {
        if let Err(e) = MoveContract::post(&before, self) {
            error!(error = %e, "Postcondition failed, rolling back");
            *self = before;
            return Err(e);
        }
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }
}

impl Default for GameState {
    fn default() -> Self {
        let config = RulesConfig::default();
        let board = Board::new(&config);
        Self::start(config, board, Scores::default(), Side::A)
    }
}

fn validate_rules(config: &RulesConfig) -> Result<(), GameError> {
    config
        .validate()
        .map_err(|e| GameError::InvalidSetup(e.message))
}
