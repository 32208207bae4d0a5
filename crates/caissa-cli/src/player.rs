//! Player metadata: names and capture tally.
//!
//! This is collaborator state only; the rules engine knows nothing about
//! player identity.

use caissa_core::{PieceKind, Side};

/// A named participant and the running value of pieces they have captured.
#[derive(Debug, Clone)]
pub struct Player {
    pub name: String,
    pub side: Side,
    captured_value: u32,
}

impl Player {
    pub fn new(name: impl Into<String>, side: Side) -> Self {
        Player {
            name: name.into(),
            side,
            captured_value: 0,
        }
    }

    /// Records a capture using the conventional 1/3/3/5/9 piece values.
    pub fn record_capture(&mut self, kind: PieceKind) {
        self.captured_value += piece_value(kind);
    }

    pub fn captured_value(&self) -> u32 {
        self.captured_value
    }
}

fn piece_value(kind: PieceKind) -> u32 {
    match kind {
        PieceKind::Pawn => 1,
        PieceKind::Knight | PieceKind::Bishop => 3,
        PieceKind::Rook => 5,
        PieceKind::Queen => 9,
        // the king is never captured
        PieceKind::King => 0,
    }
}
