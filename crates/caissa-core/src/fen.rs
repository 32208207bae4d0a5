//! Position setup notation (a FEN subset).
//!
//! Parses the board-description fields of Forsyth-Edwards Notation so
//! tests and the command line can set up arbitrary positions. The clock
//! fields are accepted but ignored: the engine tracks neither a halfmove
//! clock nor a move number.

use crate::{PieceKind, Side, Square};
use thiserror::Error;

/// Errors that can occur when parsing a position setup string.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FenError {
    #[error("expected 4 to 6 fields, got {0}")]
    FieldCount(usize),

    #[error("invalid piece placement: {0}")]
    Placement(String),

    #[error("invalid side to move: expected 'w' or 'b', got '{0}'")]
    SideToMove(String),

    #[error("invalid castling rights: '{0}'")]
    Castling(String),

    #[error("invalid en passant square: '{0}'")]
    EnPassant(String),
}

/// The parsed fields of a position setup string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fen {
    /// Piece placement, validated to eight ranks of eight squares each,
    /// running from rank 8 down to rank 1.
    pub placement: String,
    /// The side to move.
    pub side_to_move: Side,
    /// The castling-rights letters still available (a subset of "KQkq"),
    /// empty when none are.
    pub castling: String,
    /// The en-passant target square, if one is set.
    pub en_passant: Option<Square>,
}

impl Fen {
    /// The standard starting position.
    pub const STARTPOS: &'static str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    /// Parses a position setup string.
    pub fn parse(fen: &str) -> Result<Self, FenError> {
        let fields: Vec<&str> = fen.split_whitespace().collect();
        if fields.len() < 4 || fields.len() > 6 {
            return Err(FenError::FieldCount(fields.len()));
        }

        validate_placement(fields[0])?;

        let side_to_move = match fields[1] {
            "w" => Side::White,
            "b" => Side::Black,
            other => return Err(FenError::SideToMove(other.to_string())),
        };

        let castling = parse_castling(fields[2])?;

        let en_passant = match fields[3] {
            "-" => None,
            s => Some(Square::from_algebraic(s).ok_or_else(|| FenError::EnPassant(s.to_string()))?),
        };

        Ok(Fen {
            placement: fields[0].to_string(),
            side_to_move,
            castling,
            en_passant,
        })
    }
}

fn validate_placement(placement: &str) -> Result<(), FenError> {
    let ranks: Vec<&str> = placement.split('/').collect();
    if ranks.len() != 8 {
        return Err(FenError::Placement(format!(
            "expected 8 ranks, got {}",
            ranks.len()
        )));
    }

    for (i, rank) in ranks.iter().enumerate() {
        let mut squares = 0u32;
        for c in rank.chars() {
            if let Some(skip) = c.to_digit(10) {
                squares += skip;
            } else if PieceKind::from_char(c).is_some() {
                squares += 1;
            } else {
                return Err(FenError::Placement(format!(
                    "invalid character '{}' in rank {}",
                    c,
                    8 - i
                )));
            }
        }
        if squares != 8 {
            return Err(FenError::Placement(format!(
                "rank {} has {} squares, expected 8",
                8 - i,
                squares
            )));
        }
    }

    Ok(())
}

fn parse_castling(castling: &str) -> Result<String, FenError> {
    if castling == "-" {
        return Ok(String::new());
    }
    if castling.is_empty() || !castling.chars().all(|c| "KQkq".contains(c)) {
        return Err(FenError::Castling(castling.to_string()));
    }
    Ok(castling.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_startpos() {
        let fen = Fen::parse(Fen::STARTPOS).unwrap();
        assert_eq!(fen.placement, "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR");
        assert_eq!(fen.side_to_move, Side::White);
        assert_eq!(fen.castling, "KQkq");
        assert_eq!(fen.en_passant, None);
    }

    #[test]
    fn parse_without_clocks() {
        let fen = Fen::parse("8/8/8/8/8/8/8/4K2k w - -").unwrap();
        assert_eq!(fen.side_to_move, Side::White);
        assert_eq!(fen.castling, "");
        assert_eq!(fen.en_passant, None);
    }

    #[test]
    fn parse_en_passant_square() {
        let fen =
            Fen::parse("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1").unwrap();
        assert_eq!(fen.side_to_move, Side::Black);
        assert_eq!(fen.en_passant, Square::from_algebraic("e3"));
    }

    #[test]
    fn field_count_errors() {
        assert_eq!(
            Fen::parse("8/8/8/8/8/8/8/8 w -"),
            Err(FenError::FieldCount(3))
        );
        assert_eq!(
            Fen::parse("8/8/8/8/8/8/8/8 w - - 0 1 extra"),
            Err(FenError::FieldCount(7))
        );
    }

    #[test]
    fn placement_errors() {
        assert!(matches!(
            Fen::parse("8/8/8/8/8/8/8 w - - 0 1"),
            Err(FenError::Placement(_))
        ));
        assert!(matches!(
            Fen::parse("9/8/8/8/8/8/8/8 w - - 0 1"),
            Err(FenError::Placement(_))
        ));
        assert!(matches!(
            Fen::parse("xnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"),
            Err(FenError::Placement(_))
        ));
    }

    #[test]
    fn side_to_move_error() {
        assert_eq!(
            Fen::parse("8/8/8/8/8/8/8/8 x - - 0 1"),
            Err(FenError::SideToMove("x".to_string()))
        );
    }

    #[test]
    fn castling_errors() {
        assert_eq!(
            Fen::parse("8/8/8/8/8/8/8/8 w KX - 0 1"),
            Err(FenError::Castling("KX".to_string()))
        );
    }

    #[test]
    fn en_passant_error() {
        assert_eq!(
            Fen::parse("8/8/8/8/8/8/8/8 w - e9 0 1"),
            Err(FenError::EnPassant("e9".to_string()))
        );
    }
}
