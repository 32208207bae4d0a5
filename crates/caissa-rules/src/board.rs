//! The board: a 64-cell grid of piece-or-empty values plus the transient
//! en-passant state.

use caissa_core::{Fen, File, Piece, PieceKind, Rank, Side, Square};

/// An 8x8 chess board.
///
/// Each cell owns at most one [`Piece`]; relocating a piece transfers the
/// value between cells, so a piece is never aliased across two squares.
/// The only state beyond the grid is the en-passant target, which survives
/// for exactly one reply after a pawn double-step.
///
/// The mutating methods here are mechanical primitives: legality is
/// decided by the layers above.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    squares: [Option<Piece>; 64],
    en_passant: Option<Square>,
}

impl Board {
    /// Creates an empty board.
    pub const fn empty() -> Self {
        Board {
            squares: [None; 64],
            en_passant: None,
        }
    }

    /// Creates a board with the standard starting layout.
    pub fn startpos() -> Self {
        use PieceKind::*;
        const BACK_RANK: [PieceKind; 8] = [Rook, Knight, Bishop, Queen, King, Bishop, Knight, Rook];

        let mut board = Board::empty();
        for (file, kind) in File::ALL.into_iter().zip(BACK_RANK) {
            board.place(Square::new(file, Rank::R1), Piece::new(kind, Side::White));
            board.place(Square::new(file, Rank::R2), Piece::new(Pawn, Side::White));
            board.place(Square::new(file, Rank::R7), Piece::new(Pawn, Side::Black));
            board.place(Square::new(file, Rank::R8), Piece::new(kind, Side::Black));
        }
        board
    }

    /// Builds a board from parsed setup fields.
    ///
    /// The notation does not carry per-piece movement history, so the
    /// `ever_moved` flags are inferred: pawns off their home rank have
    /// moved, a missing castling-rights letter marks the corresponding
    /// corner rook as moved, and a side with neither letter gets its king
    /// marked as moved. Nothing else depends on the flag.
    pub fn from_setup(fen: &Fen) -> Self {
        let mut board = Board::empty();

        for (&rank, rank_str) in Rank::ALL.iter().rev().zip(fen.placement.split('/')) {
            let mut files = File::ALL.iter();
            for c in rank_str.chars() {
                if let Some(skip) = c.to_digit(10) {
                    for _ in 0..skip {
                        files.next();
                    }
                } else if let Some((kind, side)) = PieceKind::from_char(c) {
                    if let Some(&file) = files.next() {
                        let mut piece = Piece::new(kind, side);
                        piece.ever_moved = kind == PieceKind::Pawn && rank != side.pawn_rank();
                        board.place(Square::new(file, rank), piece);
                    }
                }
            }
        }

        board.apply_castling_rights(&fen.castling);
        board.en_passant = fen.en_passant;
        board
    }

    /// Returns the piece occupying `square`, if any.
    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.squares[square.index() as usize]
    }

    /// Returns true if `square` is empty.
    #[inline]
    pub fn is_empty(&self, square: Square) -> bool {
        self.piece_at(square).is_none()
    }

    /// Relocates the piece on `from` to `to`, discarding whatever occupied
    /// `to`, and marks the piece as having moved.
    ///
    /// Returns `false` (and mutates nothing) when `from` is empty. No
    /// legality check is performed here.
    pub fn move_piece(&mut self, from: Square, to: Square) -> bool {
        let Some(mut piece) = self.take(from) else {
            return false;
        };
        piece.ever_moved = true;
        self.place(to, piece);
        true
    }

    /// Returns true if every square strictly between `from` and `to` is
    /// empty.
    ///
    /// Meaningful only for colinear pairs (same rank, same file, or an
    /// exact diagonal); callers must not rely on the result otherwise.
    pub fn path_clear(&self, from: Square, to: Square) -> bool {
        let file_step = (to.file().index() as i8 - from.file().index() as i8).signum();
        let rank_step = (to.rank().index() as i8 - from.rank().index() as i8).signum();

        let mut current = from.offset(file_step, rank_step);
        while let Some(square) = current {
            if square == to {
                return true;
            }
            if !self.is_empty(square) {
                return false;
            }
            current = square.offset(file_step, rank_step);
        }
        true
    }

    /// Marks `square` as capturable en passant for the next reply.
    pub fn set_en_passant_target(&mut self, square: Square) {
        self.en_passant = Some(square);
    }

    /// Clears the en-passant target.
    pub fn clear_en_passant(&mut self) {
        self.en_passant = None;
    }

    /// Returns the current en-passant target square, if any.
    pub fn en_passant_target(&self) -> Option<Square> {
        self.en_passant
    }

    /// Returns the square of `side`'s king, if it is on the board.
    pub fn king_square(&self, side: Side) -> Option<Square> {
        Square::all().find(|&square| {
            matches!(
                self.piece_at(square),
                Some(p) if p.kind == PieceKind::King && p.side == side
            )
        })
    }

    /// Places `piece` on `square`, replacing any occupant.
    pub(crate) fn place(&mut self, square: Square, piece: Piece) {
        self.squares[square.index() as usize] = Some(piece);
    }

    /// Removes and returns the occupant of `square`.
    pub(crate) fn take(&mut self, square: Square) -> Option<Piece> {
        self.squares[square.index() as usize].take()
    }

    /// The piece-placement field of the current position, rank 8 first.
    pub(crate) fn placement_field(&self) -> String {
        let mut out = String::new();
        for (i, &rank) in Rank::ALL.iter().rev().enumerate() {
            let mut empty_run = 0;
            for &file in File::ALL.iter() {
                match self.piece_at(Square::new(file, rank)) {
                    Some(piece) => {
                        if empty_run > 0 {
                            out.push_str(&empty_run.to_string());
                            empty_run = 0;
                        }
                        out.push(piece.to_char());
                    }
                    None => empty_run += 1,
                }
            }
            if empty_run > 0 {
                out.push_str(&empty_run.to_string());
            }
            if i < 7 {
                out.push('/');
            }
        }
        out
    }

    /// The castling-rights field, derived from the `ever_moved` flags of
    /// the kings and corner rooks.
    pub(crate) fn castling_field(&self) -> String {
        let mut out = String::new();
        for side in [Side::White, Side::Black] {
            let rank = side.back_rank();
            let king_unmoved = self.unmoved_at(Square::new(File::E, rank), PieceKind::King, side);
            for (letter, rook_file) in [('K', File::H), ('Q', File::A)] {
                let rook_unmoved = self.unmoved_at(Square::new(rook_file, rank), PieceKind::Rook, side);
                if king_unmoved && rook_unmoved {
                    out.push(match side {
                        Side::White => letter,
                        Side::Black => letter.to_ascii_lowercase(),
                    });
                }
            }
        }
        if out.is_empty() {
            out.push('-');
        }
        out
    }

    fn unmoved_at(&self, square: Square, kind: PieceKind, side: Side) -> bool {
        matches!(
            self.piece_at(square),
            Some(p) if p.kind == kind && p.side == side && !p.ever_moved
        )
    }

    fn apply_castling_rights(&mut self, rights: &str) {
        for side in [Side::White, Side::Black] {
            let (kingside, queenside) = match side {
                Side::White => (rights.contains('K'), rights.contains('Q')),
                Side::Black => (rights.contains('k'), rights.contains('q')),
            };
            let rank = side.back_rank();
            if !kingside {
                self.mark_moved(Square::new(File::H, rank), PieceKind::Rook, side);
            }
            if !queenside {
                self.mark_moved(Square::new(File::A, rank), PieceKind::Rook, side);
            }
            if !kingside && !queenside {
                self.mark_moved(Square::new(File::E, rank), PieceKind::King, side);
            }
        }
    }

    fn mark_moved(&mut self, square: Square, kind: PieceKind, side: Side) {
        if let Some(piece) = &mut self.squares[square.index() as usize] {
            if piece.kind == kind && piece.side == side {
                piece.ever_moved = true;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    #[test]
    fn startpos_layout() {
        let board = Board::startpos();
        assert_eq!(
            board.piece_at(sq("e1")),
            Some(Piece::new(PieceKind::King, Side::White))
        );
        assert_eq!(
            board.piece_at(sq("d8")),
            Some(Piece::new(PieceKind::Queen, Side::Black))
        );
        assert_eq!(
            board.piece_at(sq("a1")),
            Some(Piece::new(PieceKind::Rook, Side::White))
        );
        for file in File::ALL {
            assert_eq!(
                board.piece_at(Square::new(file, Rank::R2)),
                Some(Piece::new(PieceKind::Pawn, Side::White))
            );
            assert_eq!(
                board.piece_at(Square::new(file, Rank::R7)),
                Some(Piece::new(PieceKind::Pawn, Side::Black))
            );
        }
        let occupied = Square::all().filter(|&s| !board.is_empty(s)).count();
        assert_eq!(occupied, 32);
        assert_eq!(board.en_passant_target(), None);
    }

    #[test]
    fn move_piece_relocates_and_marks() {
        let mut board = Board::startpos();
        assert!(board.move_piece(sq("e2"), sq("e4")));
        assert!(board.is_empty(sq("e2")));
        let pawn = board.piece_at(sq("e4")).unwrap();
        assert_eq!(pawn.kind, PieceKind::Pawn);
        assert!(pawn.ever_moved);
    }

    #[test]
    fn move_piece_from_empty_square_fails_without_mutation() {
        let mut board = Board::startpos();
        let before = board.clone();
        assert!(!board.move_piece(sq("e4"), sq("e5")));
        assert_eq!(board, before);
    }

    #[test]
    fn move_piece_discards_captured_piece() {
        let mut board = Board::startpos();
        board.move_piece(sq("d1"), sq("d7"));
        let queen = board.piece_at(sq("d7")).unwrap();
        assert_eq!(queen.kind, PieceKind::Queen);
        assert_eq!(queen.side, Side::White);
        let occupied = Square::all().filter(|&s| !board.is_empty(s)).count();
        assert_eq!(occupied, 31);
    }

    #[test]
    fn path_clear_straight_and_diagonal() {
        let board = Board::startpos();
        // d1-d7 runs through the d2 pawn
        assert!(!board.path_clear(sq("d1"), sq("d7")));
        // c1-a3 runs through b2
        assert!(!board.path_clear(sq("c1"), sq("a3")));

        let mut open = Board::startpos();
        open.take(sq("d2"));
        assert!(open.path_clear(sq("d1"), sq("d7")));
        // adjacent squares have nothing strictly between them
        assert!(open.path_clear(sq("d1"), sq("d2")));
    }

    #[test]
    fn en_passant_accessors() {
        let mut board = Board::empty();
        assert_eq!(board.en_passant_target(), None);
        board.set_en_passant_target(sq("e3"));
        assert_eq!(board.en_passant_target(), Some(sq("e3")));
        board.clear_en_passant();
        assert_eq!(board.en_passant_target(), None);
    }

    #[test]
    fn king_square_scan() {
        let board = Board::startpos();
        assert_eq!(board.king_square(Side::White), Some(sq("e1")));
        assert_eq!(board.king_square(Side::Black), Some(sq("e8")));
        assert_eq!(Board::empty().king_square(Side::White), None);
    }

    #[test]
    fn setup_of_startpos_matches_constructor() {
        let fen = Fen::parse(Fen::STARTPOS).unwrap();
        assert_eq!(Board::from_setup(&fen), Board::startpos());
    }

    #[test]
    fn setup_marks_pawns_off_home_rank_as_moved() {
        let fen =
            Fen::parse("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1").unwrap();
        let board = Board::from_setup(&fen);
        assert!(board.piece_at(sq("e4")).unwrap().ever_moved);
        assert!(!board.piece_at(sq("d2")).unwrap().ever_moved);
    }

    #[test]
    fn setup_infers_moved_flags_from_castling_rights() {
        let fen = Fen::parse("r3k2r/8/8/8/8/8/8/R3K2R w Kq - 0 1").unwrap();
        let board = Board::from_setup(&fen);
        // White keeps only kingside rights
        assert!(!board.piece_at(sq("e1")).unwrap().ever_moved);
        assert!(!board.piece_at(sq("h1")).unwrap().ever_moved);
        assert!(board.piece_at(sq("a1")).unwrap().ever_moved);
        // Black keeps only queenside rights
        assert!(!board.piece_at(sq("e8")).unwrap().ever_moved);
        assert!(!board.piece_at(sq("a8")).unwrap().ever_moved);
        assert!(board.piece_at(sq("h8")).unwrap().ever_moved);
    }

    #[test]
    fn setup_marks_king_moved_when_no_rights_remain() {
        let fen = Fen::parse("4k3/8/8/8/8/8/8/R3K2R w - - 0 1").unwrap();
        let board = Board::from_setup(&fen);
        assert!(board.piece_at(sq("e1")).unwrap().ever_moved);
        assert!(board.piece_at(sq("a1")).unwrap().ever_moved);
        assert!(board.piece_at(sq("h1")).unwrap().ever_moved);
    }

    #[test]
    fn placement_field_round_trip() {
        assert_eq!(
            Board::startpos().placement_field(),
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR"
        );

        let fen = Fen::parse("r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3")
            .unwrap();
        let board = Board::from_setup(&fen);
        assert_eq!(
            board.placement_field(),
            "r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R"
        );
    }

    #[test]
    fn castling_field_tracks_moved_flags() {
        let mut board = Board::startpos();
        assert_eq!(board.castling_field(), "KQkq");

        board.move_piece(sq("h1"), sq("g1"));
        board.move_piece(sq("g1"), sq("h1"));
        assert_eq!(board.castling_field(), "Qkq");

        board.move_piece(sq("e8"), sq("d8"));
        board.move_piece(sq("d8"), sq("e8"));
        assert_eq!(board.castling_field(), "Q");
    }
}
