//! ASCII board rendering.

use caissa_core::{File, Rank, Square};
use caissa_rules::Board;

/// Renders the board as a bordered ASCII grid, rank 8 on top, with
/// uppercase letters for White and lowercase for Black.
pub fn board_to_string(board: &Board) -> String {
    let mut out = String::new();
    out.push_str("\n  +---+---+---+---+---+---+---+---+\n");
    for &rank in Rank::ALL.iter().rev() {
        out.push_str(&format!("{} |", rank));
        for &file in File::ALL.iter() {
            match board.piece_at(Square::new(file, rank)) {
                Some(piece) => out.push_str(&format!(" {} |", piece.to_char())),
                None => out.push_str("   |"),
            }
        }
        out.push_str("\n  +---+---+---+---+---+---+---+---+\n");
    }
    out.push_str("    a   b   c   d   e   f   g   h\n");
    out
}
