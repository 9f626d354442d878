//! Rule configuration for a game.
//!
//! Every rule that varies between regional rule sets lives here and is
//! handed to [`GameState`](crate::GameState) at construction, so rule
//! variants can be exercised without code changes.

use crate::types::{RING_SIZE, Side};
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Direction stones travel around the ring. Fixed for a whole game.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Increasing ring index (A1 → A2 → … → QB → B1 …).
    #[default]
    Forward,
    /// Decreasing ring index.
    Backward,
}

impl Direction {
    /// Index one step further along the ring.
    pub fn advance(self, index: usize) -> usize {
        match self {
            Direction::Forward => (index + 1) % RING_SIZE,
            Direction::Backward => (index + RING_SIZE - 1) % RING_SIZE,
        }
    }
}

/// When folk cells are replenished from a player's bank.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "snake_case")]
pub enum ReplenishTrigger {
    /// Both players replenish once every folk cell on the board is empty.
    #[default]
    BoardSweep,
    /// The player about to move replenishes when their own side is empty.
    EmptySide,
}

/// Immutable rule set for one game.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Stones placed in each folk cell at setup.
    folk_stones: u32,
    /// Point value of a mandarin stone.
    mandarin_value: u32,
    /// Sowing direction.
    direction: Direction,
    /// Moves after which the game ends on the move limit.
    max_moves: u32,
    /// Upper bound on chained sowing rounds within one turn.
    max_rounds: u32,
    /// When replenishment happens.
    replenish_trigger: ReplenishTrigger,
    /// Stones each folk cell receives on replenishment.
    replenish_stones: u32,
    /// Optional bank at which the game ends immediately.
    score_threshold: Option<u32>,
    /// Ordinary stones an uncaptured mandarin cell needs before it can be captured.
    mandarin_min_stones: Option<u32>,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            folk_stones: 5,
            mandarin_value: 10,
            direction: Direction::Forward,
            max_moves: 200,
            max_rounds: 70,
            replenish_trigger: ReplenishTrigger::BoardSweep,
            replenish_stones: 5,
            score_threshold: None,
            mandarin_min_stones: Some(5),
        }
    }
}

impl RulesConfig {
    /// Total value in play: every folk stone plus both mandarins.
    pub fn total_value(&self) -> u32 {
        let folk_cells = Side::A.folk_cells().len() as u32 * 2;
        folk_cells * self.folk_stones + 2 * self.mandarin_value
    }

    /// Returns a copy with a different sowing direction.
    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Returns a copy with a different move limit.
    pub fn with_max_moves(mut self, max_moves: u32) -> Self {
        self.max_moves = max_moves;
        self
    }

    /// Returns a copy with a different replenishment trigger.
    pub fn with_replenish_trigger(mut self, trigger: ReplenishTrigger) -> Self {
        self.replenish_trigger = trigger;
        self
    }

    /// Returns a copy with a different replenishment amount.
    pub fn with_replenish_stones(mut self, stones: u32) -> Self {
        self.replenish_stones = stones;
        self
    }

    /// Returns a copy with a score threshold.
    pub fn with_score_threshold(mut self, threshold: Option<u32>) -> Self {
        self.score_threshold = threshold;
        self
    }

    /// Returns a copy with a different immature-mandarin limit.
    pub fn with_mandarin_min_stones(mut self, min: Option<u32>) -> Self {
        self.mandarin_min_stones = min;
        self
    }

    /// Rejects rule sets that cannot produce a playable game.
    #[instrument(skip(self))]
    pub fn validate(&self) -> Result<(), ConfigError> {
        debug!(?self, "Validating rules");
        if self.folk_stones == 0 {
            return Err(ConfigError::new("folk_stones must be at least 1".to_string()));
        }
        if self.mandarin_value == 0 {
            return Err(ConfigError::new("mandarin_value must be at least 1".to_string()));
        }
        if self.max_moves == 0 {
            return Err(ConfigError::new("max_moves must be at least 1".to_string()));
        }
        if self.max_rounds == 0 {
            return Err(ConfigError::new("max_rounds must be at least 1".to_string()));
        }
        if self.replenish_stones == 0 {
            return Err(ConfigError::new("replenish_stones must be at least 1".to_string()));
        }
        Ok(())
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
