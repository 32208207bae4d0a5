//! Attack, check, and king-safety detection.

use crate::movement::is_legal_destination;
use crate::Board;
use caissa_core::{Side, Square};

impl Board {
    /// Returns true if any piece of `by_side` has `square` as a legal
    /// destination under its own movement rule.
    ///
    /// King safety of the attacker is ignored: a pinned piece still gives
    /// check.
    pub fn is_attacked(&self, square: Square, by_side: Side) -> bool {
        Square::all().any(|from| {
            matches!(self.piece_at(from), Some(p) if p.side == by_side)
                && is_legal_destination(self, from, square)
        })
    }

    /// Returns true if `side`'s king is attacked. False when the king is
    /// absent from the board (not a reachable game state).
    pub fn is_in_check(&self, side: Side) -> bool {
        match self.king_square(side) {
            Some(king) => self.is_attacked(king, side.opposite()),
            None => false,
        }
    }

    /// Returns true if relocating the piece on `from` to `to` would leave
    /// `side`'s king attacked. Returns true when `from` is empty.
    ///
    /// The move is simulated by transferring the cell value directly, so
    /// the mover's `ever_moved` flag is untouched, and rolled back before
    /// returning: the board is left exactly as it was on every path,
    /// captured occupant included.
    pub fn would_be_in_check(&mut self, from: Square, to: Square, side: Side) -> bool {
        let Some(mover) = self.take(from) else {
            return true;
        };
        let captured = self.take(to);
        self.place(to, mover);

        let in_check = self.is_in_check(side);

        self.take(to);
        self.place(from, mover);
        if let Some(piece) = captured {
            self.place(to, piece);
        }

        in_check
    }
}

#[cfg(test)]
mod tests {
    use caissa_core::{Fen, Side, Square};
    use proptest::prelude::*;

    use crate::Board;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    fn board_from(fen: &str) -> Board {
        Board::from_setup(&Fen::parse(fen).unwrap())
    }

    #[test]
    fn attacked_squares_in_startpos() {
        let board = Board::startpos();
        // knights cover rank 3, and a pawn push counts as a legal
        // destination, so pushable squares register too
        assert!(board.is_attacked(sq("h3"), Side::White));
        assert!(board.is_attacked(sq("e3"), Side::White));
        assert!(board.is_attacked(sq("e4"), Side::White));
        assert!(board.is_attacked(sq("f6"), Side::Black));
        // nothing reaches the opponent's half yet
        assert!(!board.is_attacked(sq("e5"), Side::White));
        assert!(!board.is_attacked(sq("e4"), Side::Black));
    }

    #[test]
    fn rook_attack_blocked_by_intervening_piece() {
        let board = board_from("4k3/8/8/8/8/8/4P3/4K2r w - - 0 1");
        // the h1 rook attacks along the rank up to the king
        assert!(board.is_attacked(sq("f1"), Side::Black));
        assert!(board.is_attacked(sq("e1"), Side::Black));
        // but not through it
        assert!(!board.is_attacked(sq("d1"), Side::Black));
        // the open h-file is fully covered
        assert!(board.is_attacked(sq("h8"), Side::Black));
    }

    #[test]
    fn check_detection() {
        // black queen pinning nothing, giving check down the e-file
        let board = board_from("4k3/4q3/8/8/8/8/8/4K3 w - - 0 1");
        assert!(board.is_in_check(Side::White));
        assert!(!board.is_in_check(Side::Black));
    }

    #[test]
    fn absent_king_is_not_in_check() {
        let board = board_from("8/8/8/8/8/8/8/K7 w - - 0 1");
        assert!(!board.is_in_check(Side::Black));
    }

    #[test]
    fn pinned_piece_may_not_move_away() {
        // knight on e2 shields the king from the rook on e7
        let mut board = board_from("4k3/4r3/8/8/8/8/4N3/4K3 w - - 0 1");
        assert!(board.would_be_in_check(sq("e2"), sq("c3"), Side::White));
        // the king itself may step aside
        assert!(!board.would_be_in_check(sq("e1"), sq("d1"), Side::White));
    }

    #[test]
    fn capturing_the_checker_resolves_check() {
        let mut board = board_from("4k3/8/8/8/8/8/3q4/3RK3 w - - 0 1");
        assert!(board.is_in_check(Side::White));
        assert!(!board.would_be_in_check(sq("d1"), sq("d2"), Side::White));
        assert!(board.would_be_in_check(sq("d1"), sq("d3"), Side::White));
    }

    #[test]
    fn empty_source_counts_as_unsafe() {
        let mut board = Board::startpos();
        assert!(board.would_be_in_check(sq("e4"), sq("e5"), Side::White));
    }

    #[test]
    fn simulation_restores_board_exactly() {
        // non-capturing candidate
        let mut board = Board::startpos();
        let before = board.clone();
        board.would_be_in_check(sq("g1"), sq("f3"), Side::White);
        assert_eq!(board, before);

        // capturing candidate, including the captured piece coming back
        let mut board = board_from("4k3/8/8/8/8/8/3q4/3RK3 w - - 0 1");
        let before = board.clone();
        board.would_be_in_check(sq("d1"), sq("d2"), Side::White);
        assert_eq!(board, before);
    }

    #[test]
    fn simulation_preserves_ever_moved_flag() {
        let mut board = Board::startpos();
        board.would_be_in_check(sq("e2"), sq("e4"), Side::White);
        assert!(!board.piece_at(sq("e2")).unwrap().ever_moved);
    }

    proptest! {
        #[test]
        fn simulation_never_leaves_a_trace(from in 0..64u8, to in 0..64u8) {
            // a middlegame position with captures available both ways
            let mut board = board_from(
                "r1bqkbnr/pppp1ppp/2n5/1B2p3/4P3/5N2/PPPP1PPP/R1BQK2R w KQkq - 0 1",
            );
            let before = board.clone();
            let from = Square::from_index(from).unwrap();
            let to = Square::from_index(to).unwrap();
            board.would_be_in_check(from, to, Side::White);
            prop_assert_eq!(&board, &before);
            board.would_be_in_check(from, to, Side::Black);
            prop_assert_eq!(&board, &before);
        }
    }
}
