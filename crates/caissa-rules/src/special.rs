//! The special-move protocol: castling, en passant, and promotion.
//!
//! These functions execute mechanics only; the turn/status state machine
//! decides when to invoke them.

use crate::Board;
use caissa_core::{File, Piece, PieceKind, Promotion, Side, Square, Wing};

const fn rook_file(wing: Wing) -> File {
    match wing {
        Wing::Kingside => File::H,
        Wing::Queenside => File::A,
    }
}

/// Returns true if `side` may castle on `wing`: the king and that wing's
/// rook stand on their original squares and have never moved, every square
/// between them is empty, and neither the king's current square nor its
/// transit and destination squares are attacked by the opponent.
pub fn can_castle(board: &Board, side: Side, wing: Wing) -> bool {
    let rank = side.back_rank();
    let king_from = Square::new(File::E, rank);
    let rook_from = Square::new(rook_file(wing), rank);

    let unmoved = |square: Square, kind: PieceKind| {
        matches!(
            board.piece_at(square),
            Some(p) if p.kind == kind && p.side == side && !p.ever_moved
        )
    };
    if !unmoved(king_from, PieceKind::King) || !unmoved(rook_from, PieceKind::Rook) {
        return false;
    }

    let between: &[File] = match wing {
        Wing::Kingside => &[File::F, File::G],
        Wing::Queenside => &[File::B, File::C, File::D],
    };
    if between
        .iter()
        .any(|&file| !board.is_empty(Square::new(file, rank)))
    {
        return false;
    }

    // The king may not castle out of, through, or into check.
    let enemy = side.opposite();
    let king_path: [File; 3] = match wing {
        Wing::Kingside => [File::E, File::F, File::G],
        Wing::Queenside => [File::E, File::D, File::C],
    };
    !king_path
        .iter()
        .any(|&file| board.is_attacked(Square::new(file, rank), enemy))
}

/// Executes castling for `side` on `wing`: the king moves two squares
/// toward the rook, and the rook lands on the square the king crossed.
///
/// The caller must have verified eligibility with [`can_castle`]. Both
/// relocations go through the normal primitive, so the king's and rook's
/// `ever_moved` flags are set.
pub fn perform_castle(board: &mut Board, side: Side, wing: Wing) {
    let rank = side.back_rank();
    let (king_to, rook_to) = match wing {
        Wing::Kingside => (File::G, File::F),
        Wing::Queenside => (File::C, File::D),
    };
    board.move_piece(Square::new(File::E, rank), Square::new(king_to, rank));
    board.move_piece(Square::new(rook_file(wing), rank), Square::new(rook_to, rank));
}

/// Returns true if moving `from` to `to` is an en-passant capture: the
/// moving piece is a pawn and `to` is the current en-passant target.
pub fn is_en_passant_capture(board: &Board, from: Square, to: Square) -> bool {
    matches!(board.piece_at(from), Some(p) if p.kind == PieceKind::Pawn)
        && board.en_passant_target() == Some(to)
}

/// Executes an en-passant capture: relocates the capturing pawn onto the
/// target square and discards the bypassed pawn, which sits one rank
/// behind the target rather than on it.
pub fn perform_en_passant(board: &mut Board, from: Square, to: Square) {
    let Some(pawn) = board.piece_at(from) else {
        return;
    };
    board.move_piece(from, to);
    if let Some(bypassed) = to.offset(0, -pawn.side.pawn_direction()) {
        board.take(bypassed);
    }
}

/// Replaces the pawn on `square` with a newly created piece of the chosen
/// kind and the same side. Does nothing when the occupant is not a pawn.
pub fn promote(board: &mut Board, square: Square, choice: Promotion) {
    let Some(pawn) = board.piece_at(square) else {
        return;
    };
    if pawn.kind != PieceKind::Pawn {
        return;
    }
    board.place(square, Piece::new(choice.kind(), pawn.side));
}
