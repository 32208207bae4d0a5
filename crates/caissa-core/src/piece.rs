//! Piece representation.

use crate::Side;

/// The six kinds of chess pieces.
///
/// This is a closed set: movement legality, display, and the promotion
/// menu all match on it exhaustively, so adding a kind is a compile-time
/// checked change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PieceKind {
    Pawn = 0,
    Knight = 1,
    Bishop = 2,
    Rook = 3,
    Queen = 4,
    King = 5,
}

impl PieceKind {
    /// All piece kinds in order.
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
    ];

    /// Returns the placement letter for this kind with the given side
    /// (uppercase for White, lowercase for Black).
    pub const fn to_char(self, side: Side) -> char {
        let c = match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        };
        match side {
            Side::White => c.to_ascii_uppercase(),
            Side::Black => c,
        }
    }

    /// Parses a placement letter into a kind and side.
    pub const fn from_char(c: char) -> Option<(PieceKind, Side)> {
        let side = if c.is_ascii_uppercase() {
            Side::White
        } else {
            Side::Black
        };
        let kind = match c.to_ascii_lowercase() {
            'p' => PieceKind::Pawn,
            'n' => PieceKind::Knight,
            'b' => PieceKind::Bishop,
            'r' => PieceKind::Rook,
            'q' => PieceKind::Queen,
            'k' => PieceKind::King,
            _ => return None,
        };
        Some((kind, side))
    }
}

impl std::fmt::Display for PieceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PieceKind::Pawn => "Pawn",
            PieceKind::Knight => "Knight",
            PieceKind::Bishop => "Bishop",
            PieceKind::Rook => "Rook",
            PieceKind::Queen => "Queen",
            PieceKind::King => "King",
        };
        write!(f, "{}", name)
    }
}

/// A piece on the board: its kind, its owning side, and whether it has
/// ever been relocated.
///
/// `ever_moved` is set by the board the first time the piece moves; it
/// gates castling eligibility and the pawn double-step. A `Piece` is owned
/// by exactly one board cell; relocation transfers the value, never
/// aliases it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    pub kind: PieceKind,
    pub side: Side,
    pub ever_moved: bool,
}

impl Piece {
    /// Creates a piece that has not moved yet.
    #[inline]
    pub const fn new(kind: PieceKind, side: Side) -> Self {
        Piece {
            kind,
            side,
            ever_moved: false,
        }
    }

    /// Returns the display letter (uppercase White, lowercase Black).
    #[inline]
    pub const fn to_char(self) -> char {
        self.kind.to_char(self.side)
    }
}

/// A pawn-promotion choice.
///
/// The fallback applied when no recognizable choice is supplied is a
/// policy of the game, not of this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Promotion {
    Queen,
    Rook,
    Bishop,
    Knight,
}

impl Promotion {
    /// Parses a promotion choice letter, case-insensitively.
    pub const fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'q' => Some(Promotion::Queen),
            'r' => Some(Promotion::Rook),
            'b' => Some(Promotion::Bishop),
            'n' => Some(Promotion::Knight),
            _ => None,
        }
    }

    /// Returns the piece kind this choice promotes to.
    pub const fn kind(self) -> PieceKind {
        match self {
            Promotion::Queen => PieceKind::Queen,
            Promotion::Rook => PieceKind::Rook,
            Promotion::Bishop => PieceKind::Bishop,
            Promotion::Knight => PieceKind::Knight,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_to_char() {
        assert_eq!(PieceKind::Pawn.to_char(Side::White), 'P');
        assert_eq!(PieceKind::Pawn.to_char(Side::Black), 'p');
        assert_eq!(PieceKind::King.to_char(Side::White), 'K');
        assert_eq!(PieceKind::Knight.to_char(Side::Black), 'n');
    }

    #[test]
    fn kind_from_char() {
        assert_eq!(
            PieceKind::from_char('P'),
            Some((PieceKind::Pawn, Side::White))
        );
        assert_eq!(
            PieceKind::from_char('q'),
            Some((PieceKind::Queen, Side::Black))
        );
        assert_eq!(PieceKind::from_char('x'), None);
    }

    #[test]
    fn new_piece_has_not_moved() {
        let piece = Piece::new(PieceKind::Rook, Side::Black);
        assert!(!piece.ever_moved);
        assert_eq!(piece.to_char(), 'r');
    }

    #[test]
    fn promotion_from_char() {
        assert_eq!(Promotion::from_char('q'), Some(Promotion::Queen));
        assert_eq!(Promotion::from_char('Q'), Some(Promotion::Queen));
        assert_eq!(Promotion::from_char('n'), Some(Promotion::Knight));
        assert_eq!(Promotion::from_char('R'), Some(Promotion::Rook));
        assert_eq!(Promotion::from_char('b'), Some(Promotion::Bishop));
        assert_eq!(Promotion::from_char('k'), None);
        assert_eq!(Promotion::from_char('?'), None);
    }

    #[test]
    fn promotion_kind() {
        assert_eq!(Promotion::Queen.kind(), PieceKind::Queen);
        assert_eq!(Promotion::Knight.kind(), PieceKind::Knight);
    }
}
