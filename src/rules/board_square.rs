//! Orientation-independent board coordinates.

use std::fmt;
use std::str::FromStr;

use crate::game_state::chess_types::Square;
use crate::utils::algebraic::{algebraic_to_square, square_to_algebraic};

/// A square on the 8x8 grid. File `0` is the a-file, rank `0` is White's
/// back rank. Values outside `0..=7` cannot be constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoardSquare {
    file: u8,
    rank: u8,
}

impl BoardSquare {
    pub const fn new(file: u8, rank: u8) -> Option<Self> {
        if file < 8 && rank < 8 {
            Some(Self { file, rank })
        } else {
            None
        }
    }

    #[inline]
    pub const fn file(self) -> u8 {
        self.file
    }

    #[inline]
    pub const fn rank(self) -> u8 {
        self.rank
    }

    /// Bitboard index (`0 == a1`, `63 == h8`).
    #[inline]
    pub const fn index(self) -> Square {
        self.rank * 8 + self.file
    }

    pub const fn from_index(index: Square) -> Option<Self> {
        if index < 64 {
            Some(Self {
                file: index % 8,
                rank: index / 8,
            })
        } else {
            None
        }
    }

    /// The same square seen from the other side of the board.
    #[inline]
    pub const fn mirrored(self) -> Self {
        Self {
            file: 7 - self.file,
            rank: 7 - self.rank,
        }
    }
}

impl fmt::Display for BoardSquare {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = square_to_algebraic(self.index()).map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}

impl FromStr for BoardSquare {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let index = algebraic_to_square(s.trim())?;
        Self::from_index(index).ok_or_else(|| format!("Invalid square: {s}"))
    }
}

#[cfg(test)]
mod tests {
    use super::BoardSquare;

    #[test]
    fn construction_is_bounded() {
        assert!(BoardSquare::new(7, 7).is_some());
        assert!(BoardSquare::new(8, 0).is_none());
        assert!(BoardSquare::new(0, 8).is_none());
        assert!(BoardSquare::from_index(64).is_none());
    }

    #[test]
    fn index_and_text_agree() {
        let e4: BoardSquare = "e4".parse().expect("e4 should parse");
        assert_eq!((e4.file(), e4.rank()), (4, 3));
        assert_eq!(e4.index(), 28);
        assert_eq!(e4.to_string(), "e4");

        let a1 = BoardSquare::from_index(0).expect("a1");
        assert_eq!(a1.to_string(), "a1");
        assert_eq!(a1.mirrored().to_string(), "h8");
    }
}
