//! Core value types for the caissa chess rules engine.
//!
//! This crate provides the vocabulary shared by the rules engine and its
//! collaborators:
//! - [`Side`] for the two players
//! - [`Square`], [`File`], and [`Rank`] for board coordinates
//! - [`PieceKind`] and [`Piece`] for what sits on a square
//! - [`Promotion`] and [`Wing`] for the two player choices that are not a
//!   square pair
//! - [`Fen`] for position setup parsing

mod fen;
mod piece;
mod side;
mod square;
mod wing;

pub use fen::{Fen, FenError};
pub use piece::{Piece, PieceKind, Promotion};
pub use side::Side;
pub use square::{File, Rank, Square};
pub use wing::Wing;
