use std::fmt;
use std::str::FromStr;

use crate::game_state::chess_types::PieceKind;
use crate::rules::board_square::BoardSquare;
use crate::utils::long_algebraic::{format_long_algebraic, parse_long_algebraic};

/// A move in board coordinates. Castling is the king's two-square move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChessMove {
    pub from: BoardSquare,
    pub to: BoardSquare,
    pub promotion: Option<PieceKind>,
}

impl ChessMove {
    #[inline]
    pub const fn new(from: BoardSquare, to: BoardSquare) -> Self {
        Self {
            from,
            to,
            promotion: None,
        }
    }

    #[inline]
    pub const fn with_promotion(from: BoardSquare, to: BoardSquare, piece: PieceKind) -> Self {
        Self {
            from,
            to,
            promotion: Some(piece),
        }
    }

    /// Same origin and destination, ignoring any promotion piece.
    #[inline]
    pub fn connects(&self, from: BoardSquare, to: BoardSquare) -> bool {
        self.from == from && self.to == to
    }
}

impl fmt::Display for ChessMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = format_long_algebraic(self.from.index(), self.to.index(), self.promotion)
            .map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}

impl FromStr for ChessMove {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (from, to, promotion) = parse_long_algebraic(s)?;
        let from = BoardSquare::from_index(from).ok_or_else(|| format!("Invalid move: {s}"))?;
        let to = BoardSquare::from_index(to).ok_or_else(|| format!("Invalid move: {s}"))?;
        Ok(Self {
            from,
            to,
            promotion,
        })
    }
}
