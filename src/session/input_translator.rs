//! Pointer-to-square translation.
//!
//! This is the only place that knows about pixels and board orientation.
//! Everything downstream works in orientation-independent `BoardSquare`s.

use crate::game_state::chess_types::Color;
use crate::rules::board_square::BoardSquare;

/// Which side's pieces are drawn at the bottom of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Orientation {
    #[default]
    WhiteAtBottom,
    BlackAtBottom,
}

impl Orientation {
    /// The player's own pieces at the bottom.
    pub const fn for_player(color: Color) -> Self {
        match color {
            Color::Light => Orientation::WhiteAtBottom,
            Color::Dark => Orientation::BlackAtBottom,
        }
    }

    #[inline]
    pub const fn flipped(self) -> Self {
        match self {
            Orientation::WhiteAtBottom => Orientation::BlackAtBottom,
            Orientation::BlackAtBottom => Orientation::WhiteAtBottom,
        }
    }

    #[inline]
    pub const fn is_flipped(self) -> bool {
        matches!(self, Orientation::BlackAtBottom)
    }
}

/// Pixel rectangle the board is drawn in. The board is square.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardGeometry {
    pub origin_x: i32,
    pub origin_y: i32,
    pub size: u32,
}

impl Default for BoardGeometry {
    /// A 600 px board at the top of a 600x700 window, 10 px below the edge.
    fn default() -> Self {
        Self {
            origin_x: 0,
            origin_y: 10,
            size: 600,
        }
    }
}

impl BoardGeometry {
    pub fn contains(&self, x: i32, y: i32) -> bool {
        self.offsets(x, y).is_some()
    }

    /// Pixel offsets inside the board, or `None` outside it.
    fn offsets(&self, x: i32, y: i32) -> Option<(i64, i64)> {
        let size = i64::from(self.size);
        let dx = i64::from(x) - i64::from(self.origin_x);
        let dy = i64::from(y) - i64::from(self.origin_y);
        ((0..size).contains(&dx) && (0..size).contains(&dy)).then_some((dx, dy))
    }

    /// Centre pixel of `square` as drawn under `orientation`.
    pub fn square_center(&self, square: BoardSquare, orientation: Orientation) -> (i32, i32) {
        let shown = if orientation.is_flipped() {
            square.mirrored()
        } else {
            square
        };
        let column = i64::from(shown.file());
        let row = 7 - i64::from(shown.rank());
        let size = i64::from(self.size);

        let x = i64::from(self.origin_x) + (2 * column + 1) * size / 16;
        let y = i64::from(self.origin_y) + (2 * row + 1) * size / 16;
        (clamp_to_i32(x), clamp_to_i32(y))
    }
}

fn clamp_to_i32(value: i64) -> i32 {
    value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

/// Board square under the pointer, or `None` when the pointer is off the board.
pub fn resolve(
    x: i32,
    y: i32,
    geometry: &BoardGeometry,
    orientation: Orientation,
) -> Option<BoardSquare> {
    let (dx, dy) = geometry.offsets(x, y)?;
    let size = i64::from(geometry.size);

    let column = u8::try_from(dx * 8 / size).ok()?;
    let row = u8::try_from(dy * 8 / size).ok()?;
    let square = BoardSquare::new(column, 7u8.checked_sub(row)?)?;

    Some(if orientation.is_flipped() {
        square.mirrored()
    } else {
        square
    })
}

#[cfg(test)]
mod tests {
    use super::{resolve, BoardGeometry, Orientation};
    use crate::game_state::chess_types::Color;
    use crate::rules::board_square::BoardSquare;

    fn square(text: &str) -> BoardSquare {
        text.parse().expect("square should parse")
    }

    #[test]
    fn corners_map_under_default_orientation() {
        let geometry = BoardGeometry::default();
        let white = Orientation::WhiteAtBottom;
        assert_eq!(resolve(0, 10, &geometry, white), Some(square("a8")));
        assert_eq!(resolve(599, 609, &geometry, white), Some(square("h1")));
        assert_eq!(resolve(0, 609, &geometry, white), Some(square("a1")));
        assert_eq!(resolve(599, 10, &geometry, white), Some(square("h8")));
    }

    #[test]
    fn outside_the_rectangle_is_none() {
        let geometry = BoardGeometry::default();
        for (x, y) in [(-1, 300), (600, 300), (300, 9), (300, 610), (i32::MIN, i32::MAX)] {
            assert_eq!(resolve(x, y, &geometry, Orientation::WhiteAtBottom), None);
            assert!(!geometry.contains(x, y));
        }
    }

    #[test]
    fn every_inside_pixel_resolves_in_bounds() {
        let geometry = BoardGeometry {
            origin_x: 13,
            origin_y: -7,
            size: 203,
        };
        for x in (13..216).step_by(3) {
            for y in (-7..196).step_by(5) {
                for orientation in [Orientation::WhiteAtBottom, Orientation::BlackAtBottom] {
                    let sq = resolve(x, y, &geometry, orientation).expect("inside pixel");
                    assert!(sq.file() < 8 && sq.rank() < 8);
                }
            }
        }
    }

    #[test]
    fn a_single_flip_mirrors_file_and_rank() {
        let geometry = BoardGeometry::default();
        let o = Orientation::WhiteAtBottom;
        for (x, y) in [(10, 20), (300, 300), (599, 609), (123, 456)] {
            let square = resolve(x, y, &geometry, o).expect("inside");
            let once = resolve(x, y, &geometry, o.flipped()).expect("inside");
            let twice = resolve(x, y, &geometry, o.flipped().flipped()).expect("inside");
            assert_eq!(once, square.mirrored());
            assert_eq!(twice, square);
        }
    }

    #[test]
    fn square_centers_resolve_back_to_their_square() {
        let geometry = BoardGeometry::default();
        for index in 0..64 {
            let sq = BoardSquare::from_index(index).expect("index in range");
            for orientation in [Orientation::WhiteAtBottom, Orientation::BlackAtBottom] {
                let (x, y) = geometry.square_center(sq, orientation);
                assert_eq!(resolve(x, y, &geometry, orientation), Some(sq));
            }
        }
    }

    #[test]
    fn zero_sized_board_resolves_nothing() {
        let geometry = BoardGeometry {
            origin_x: 0,
            origin_y: 0,
            size: 0,
        };
        assert_eq!(resolve(0, 0, &geometry, Orientation::WhiteAtBottom), None);
    }

    #[test]
    fn player_colour_sits_at_the_bottom() {
        assert_eq!(Orientation::for_player(Color::Light), Orientation::WhiteAtBottom);
        assert_eq!(Orientation::for_player(Color::Dark), Orientation::BlackAtBottom);
    }
}
