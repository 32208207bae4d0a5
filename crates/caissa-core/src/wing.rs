//! Castling wings and castle-token parsing.

use std::fmt;

/// The two castling wings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Wing {
    /// Castling toward the H-file rook (O-O).
    Kingside,
    /// Castling toward the A-file rook (O-O-O).
    Queenside,
}

impl Wing {
    /// Parses a castle token: "O-O" or "O-O-O", accepting letter-O or
    /// digit-zero in any case. Returns `None` for anything else.
    pub fn from_token(token: &str) -> Option<Self> {
        let normalized: String = token
            .chars()
            .map(|c| match c {
                '0' => 'o',
                other => other.to_ascii_lowercase(),
            })
            .collect();
        match normalized.as_str() {
            "o-o" => Some(Wing::Kingside),
            "o-o-o" => Some(Wing::Queenside),
            _ => None,
        }
    }
}

impl fmt::Display for Wing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Wing::Kingside => write!(f, "O-O"),
            Wing::Queenside => write!(f, "O-O-O"),
        }
    }
}
