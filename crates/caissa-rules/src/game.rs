//! The turn/status state machine.

use crate::movement::is_legal_destination;
use crate::special;
use crate::Board;
use caissa_core::{Fen, FenError, PieceKind, Promotion, Side, Square, Wing};
use thiserror::Error;

/// Why a move attempt was rejected.
///
/// Structural rejections carry their reason; the two legality rejections
/// ([`NotLegal`](MoveError::NotLegal) and
/// [`ExposesKing`](MoveError::ExposesKing)) are bare. Every rejection is
/// side-effect-free.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("the game is already over")]
    GameOver,

    #[error("no piece on {0}")]
    EmptySquare(Square),

    #[error("the piece on {square} belongs to {owner}")]
    WrongSide { square: Square, owner: Side },

    #[error("move not accepted")]
    NotLegal,

    #[error("that move would leave the king in check")]
    ExposesKing,

    #[error("castling {0} is not available")]
    CastlingUnavailable(Wing),

    #[error("the promotion on {0} must be resolved first")]
    PromotionPending(Square),

    #[error("no promotion is pending")]
    NoPromotionPending,
}

/// The result of an accepted move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The move completed and the turn passed to the opponent.
    Played {
        /// The kind of piece the move captured, if any.
        captured: Option<PieceKind>,
    },
    /// A pawn reached its final rank. [`Game::promote`] must supply the
    /// replacement before the turn passes.
    PromotionPending {
        at: Square,
        captured: Option<PieceKind>,
    },
}

/// Whether the game is still running, and how it ended if not.
///
/// Recomputed from the board after every completed move, never stored
/// independently of it. There is no transition out of the terminal
/// states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    Checkmate { winner: Side },
    Stalemate,
}

impl GameStatus {
    /// Returns true for the terminal states.
    #[inline]
    pub const fn is_over(self) -> bool {
        !matches!(self, GameStatus::InProgress)
    }

    /// Returns the winning side, if there is one.
    #[inline]
    pub const fn winner(self) -> Option<Side> {
        match self {
            GameStatus::Checkmate { winner } => Some(winner),
            _ => None,
        }
    }
}

/// A chess game: the board, whose turn it is, and the derived status.
///
/// One move attempt is in flight at a time; an attempt either completes
/// or is rejected synchronously, and a rejected attempt leaves the game
/// untouched.
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    side_to_move: Side,
    status: GameStatus,
    pending_promotion: Option<Square>,
    default_promotion: Promotion,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// Creates a game from the standard starting position, White to move.
    pub fn new() -> Self {
        Self::with_board(Board::startpos(), Side::White)
    }

    /// Creates a game from an arbitrary board and side to move.
    ///
    /// The status is evaluated immediately, so a game may be over at
    /// construction.
    pub fn with_board(board: Board, side_to_move: Side) -> Self {
        let mut game = Game {
            board,
            side_to_move,
            status: GameStatus::InProgress,
            pending_promotion: None,
            default_promotion: Promotion::Queen,
        };
        game.update_status();
        game
    }

    /// Creates a game from a position setup string.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        let parsed = Fen::parse(fen)?;
        let board = Board::from_setup(&parsed);
        Ok(Self::with_board(board, parsed.side_to_move))
    }

    /// Serializes the current position. The clock fields are emitted as
    /// `0 1` since the engine tracks neither.
    pub fn to_fen(&self) -> String {
        let en_passant = match self.board.en_passant_target() {
            Some(square) => square.to_algebraic(),
            None => "-".to_string(),
        };
        format!(
            "{} {} {} {} 0 1",
            self.board.placement_field(),
            match self.side_to_move {
                Side::White => 'w',
                Side::Black => 'b',
            },
            self.board.castling_field(),
            en_passant,
        )
    }

    /// Returns the current board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the side to move.
    pub fn side_to_move(&self) -> Side {
        self.side_to_move
    }

    /// Returns the game status as of the last completed move.
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Returns true if the side to move is in check.
    pub fn is_check(&self) -> bool {
        self.board.is_in_check(self.side_to_move)
    }

    /// Sets the piece kind an unrecognized or missing promotion choice
    /// resolves to. Queen unless overridden.
    pub fn set_default_promotion(&mut self, choice: Promotion) {
        self.default_promotion = choice;
    }

    /// Attempts the ordinary move `from` -> `to` for the side to move.
    ///
    /// A successful attempt either completes the turn or, when a pawn
    /// reaches its final rank, returns
    /// [`MoveOutcome::PromotionPending`] and waits for
    /// [`promote`](Game::promote) before the turn passes.
    pub fn play(&mut self, from: Square, to: Square) -> Result<MoveOutcome, MoveError> {
        if self.status.is_over() {
            return Err(MoveError::GameOver);
        }
        if let Some(square) = self.pending_promotion {
            return Err(MoveError::PromotionPending(square));
        }

        let piece = self
            .board
            .piece_at(from)
            .ok_or(MoveError::EmptySquare(from))?;
        if piece.side != self.side_to_move {
            return Err(MoveError::WrongSide {
                square: from,
                owner: piece.side,
            });
        }
        if !is_legal_destination(&self.board, from, to) {
            return Err(MoveError::NotLegal);
        }
        if self.board.would_be_in_check(from, to, self.side_to_move) {
            return Err(MoveError::ExposesKing);
        }

        // Decide the special cases before mutating anything.
        let en_passant = special::is_en_passant_capture(&self.board, from, to);
        let double_step = piece.kind == PieceKind::Pawn
            && (to.rank().index() as i8 - from.rank().index() as i8).abs() == 2;
        let captured = if en_passant {
            Some(PieceKind::Pawn)
        } else {
            self.board.piece_at(to).map(|p| p.kind)
        };

        // An en-passant opportunity survives for exactly one reply.
        self.board.clear_en_passant();

        if en_passant {
            special::perform_en_passant(&mut self.board, from, to);
        } else {
            self.board.move_piece(from, to);
        }

        if double_step {
            if let Some(middle) = from.offset(0, piece.side.pawn_direction()) {
                self.board.set_en_passant_target(middle);
            }
        }

        if piece.kind == PieceKind::Pawn && to.rank() == piece.side.promotion_rank() {
            self.pending_promotion = Some(to);
            return Ok(MoveOutcome::PromotionPending { at: to, captured });
        }

        self.finish_turn();
        Ok(MoveOutcome::Played { captured })
    }

    /// Resolves a pending promotion and completes the turn. `None` (or a
    /// choice the collaborator could not parse) falls back to the
    /// configured default.
    pub fn promote(&mut self, choice: Option<Promotion>) -> Result<(), MoveError> {
        let square = self
            .pending_promotion
            .take()
            .ok_or(MoveError::NoPromotionPending)?;
        special::promote(
            &mut self.board,
            square,
            choice.unwrap_or(self.default_promotion),
        );
        self.finish_turn();
        Ok(())
    }

    /// Attempts to castle on `wing` for the side to move.
    pub fn castle(&mut self, wing: Wing) -> Result<(), MoveError> {
        if self.status.is_over() {
            return Err(MoveError::GameOver);
        }
        if let Some(square) = self.pending_promotion {
            return Err(MoveError::PromotionPending(square));
        }
        if !special::can_castle(&self.board, self.side_to_move, wing) {
            return Err(MoveError::CastlingUnavailable(wing));
        }

        self.board.clear_en_passant();
        special::perform_castle(&mut self.board, self.side_to_move, wing);
        self.finish_turn();
        Ok(())
    }

    /// Returns true if `side` has at least one rule-legal move.
    ///
    /// This enumerates every piece of `side` against every destination
    /// square through the same pattern-legality and king-safety
    /// predicates as ordinary validation, short-circuiting on the first
    /// success.
    pub fn has_any_legal_move(&mut self, side: Side) -> bool {
        for from in Square::all() {
            if !matches!(self.board.piece_at(from), Some(p) if p.side == side) {
                continue;
            }
            for to in Square::all() {
                if is_legal_destination(&self.board, from, to)
                    && !self.board.would_be_in_check(from, to, side)
                {
                    return true;
                }
            }
        }
        false
    }

    fn finish_turn(&mut self) {
        self.side_to_move = self.side_to_move.opposite();
        self.update_status();
    }

    fn update_status(&mut self) {
        let side = self.side_to_move;
        self.status = if self.has_any_legal_move(side) {
            GameStatus::InProgress
        } else if self.board.is_in_check(side) {
            GameStatus::Checkmate {
                winner: side.opposite(),
            }
        } else {
            GameStatus::Stalemate
        };
    }
}
