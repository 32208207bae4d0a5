//! Per-kind destination legality.
//!
//! These predicates answer whether a piece could physically make a move
//! given current board occupancy ("pattern-legal"). Whether the move
//! leaves the mover's own king in check is layered on separately; a king
//! may even step onto an attacked square as far as this module is
//! concerned.

use crate::Board;
use caissa_core::{PieceKind, Side, Square};

/// Returns true if the piece on `from` may move to `to` under its own
/// movement rule, ignoring king safety. False when `from` is empty.
pub fn is_legal_destination(board: &Board, from: Square, to: Square) -> bool {
    let Some(piece) = board.piece_at(from) else {
        return false;
    };
    match piece.kind {
        PieceKind::Pawn => pawn_move(board, piece.side, piece.ever_moved, from, to),
        PieceKind::Knight => knight_move(board, piece.side, from, to),
        PieceKind::Bishop => bishop_move(board, piece.side, from, to),
        PieceKind::Rook => rook_move(board, piece.side, from, to),
        PieceKind::Queen => queen_move(board, piece.side, from, to),
        PieceKind::King => king_move(board, piece.side, from, to),
    }
}

fn file_delta(from: Square, to: Square) -> i8 {
    to.file().index() as i8 - from.file().index() as i8
}

fn rank_delta(from: Square, to: Square) -> i8 {
    to.rank().index() as i8 - from.rank().index() as i8
}

fn own_piece_at(board: &Board, side: Side, square: Square) -> bool {
    matches!(board.piece_at(square), Some(p) if p.side == side)
}

fn pawn_move(board: &Board, side: Side, ever_moved: bool, from: Square, to: Square) -> bool {
    let forward = side.pawn_direction();
    let files = file_delta(from, to);
    let ranks = rank_delta(from, to);

    // One step forward onto an empty square.
    if files == 0 && ranks == forward && board.is_empty(to) {
        return true;
    }

    // Two steps forward: only before the pawn's first move, and both the
    // intermediate and destination squares must be empty.
    if files == 0 && ranks == 2 * forward && !ever_moved {
        if let Some(middle) = from.offset(0, forward) {
            if board.is_empty(middle) && board.is_empty(to) {
                return true;
            }
        }
    }

    // Diagonal capture, onto an opposing piece or the en-passant target.
    if files.abs() == 1 && ranks == forward {
        if matches!(board.piece_at(to), Some(p) if p.side != side) {
            return true;
        }
        if board.en_passant_target() == Some(to) {
            return true;
        }
    }

    false
}

fn knight_move(board: &Board, side: Side, from: Square, to: Square) -> bool {
    let files = file_delta(from, to).abs();
    let ranks = rank_delta(from, to).abs();
    // L-shape jump; no path clearance.
    ((files == 1 && ranks == 2) || (files == 2 && ranks == 1)) && !own_piece_at(board, side, to)
}

fn bishop_move(board: &Board, side: Side, from: Square, to: Square) -> bool {
    let files = file_delta(from, to).abs();
    let ranks = rank_delta(from, to).abs();
    files == ranks && files > 0 && board.path_clear(from, to) && !own_piece_at(board, side, to)
}

fn rook_move(board: &Board, side: Side, from: Square, to: Square) -> bool {
    let files = file_delta(from, to);
    let ranks = rank_delta(from, to);
    // Exactly one of the deltas is zero.
    (files == 0) != (ranks == 0) && board.path_clear(from, to) && !own_piece_at(board, side, to)
}

fn queen_move(board: &Board, side: Side, from: Square, to: Square) -> bool {
    rook_move(board, side, from, to) || bishop_move(board, side, from, to)
}

fn king_move(board: &Board, side: Side, from: Square, to: Square) -> bool {
    let files = file_delta(from, to).abs();
    let ranks = rank_delta(from, to).abs();
    files.max(ranks) == 1 && !own_piece_at(board, side, to)
}
