//! Ô Ăn Quan game engine.
//!
//! A two-player, perfect-information game of sowing and capture played on a
//! ring of twelve cells: ten folk cells (five per player) and two mandarin
//! end cells.
//!
//! # Architecture
//!
//! - **Board**: the ring of cells, read-only outside the crate
//! - **Resolver**: pure sowing and capture resolution for one move
//! - **Rules**: between-turn replenishment and end-of-game checks
//! - **GameState**: turn controller owning the board and both banks
//! - **Invariants / Contracts**: properties checked around every move
//!
//! # Example
//!
//! ```
//! use oanquan::{GameState, RulesConfig};
//!
//! let mut game = GameState::new(RulesConfig::default())?;
//! let first = game.legal_moves()?[0];
//! let record = game.apply_move(first.get())?;
//! assert_eq!(*record.move_number(), 1);
//! # Ok::<(), oanquan::GameError>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod board;
mod config;
mod error;
mod game;
mod phases;
mod snapshot;
mod types;

pub mod contracts;
pub mod invariants;
pub mod resolver;
pub mod rules;

pub use action::{Capture, MoveRecord, Replenishment};
pub use board::Board;
pub use config::{ConfigError, Direction, ReplenishTrigger, RulesConfig};
pub use error::{GameError, IllegalReason};
pub use game::GameState;
pub use phases::{EndReason, GameResult, GameStatus, Outcome};
pub use resolver::{Resolution, resolve};
pub use snapshot::Snapshot;
pub use types::{Cell, CellIndex, CellKind, MANDARIN_A, MANDARIN_B, RING_SIZE, Scores, Side};
