//! Rules engine for standard chess.
//!
//! This crate decides whether a proposed move is legal, executes legal
//! moves (including castling, en passant, and promotion), and determines
//! terminal game states. It is layered bottom-up:
//! - [`Board`] - a 64-cell grid of piece-or-empty values plus the
//!   transient en-passant target
//! - [`movement`] - per-kind destination legality ("pattern-legal")
//! - attack/check detection and the king-safety filter on [`Board`]
//! - [`special`] - the castling, en-passant, and promotion protocols
//! - [`Game`] - the turn/status state machine tying it all together
//!
//! Prompting for input, rendering the board, and naming players are the
//! caller's business; the engine is synchronous and turn-based, with
//! exactly one move attempt in flight at a time.
//!
//! # Example
//!
//! ```
//! use caissa_core::Square;
//! use caissa_rules::Game;
//!
//! let mut game = Game::new();
//! let e2 = Square::from_algebraic("e2").unwrap();
//! let e4 = Square::from_algebraic("e4").unwrap();
//! game.play(e2, e4).unwrap();
//! assert!(!game.status().is_over());
//! ```

mod attack;
mod board;
mod game;
pub mod movement;
pub mod special;

pub use board::Board;
pub use game::{Game, GameStatus, MoveError, MoveOutcome};
pub use movement::is_legal_destination;
