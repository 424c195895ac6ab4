//! Precomputed attack bitboards for the non-sliding pieces.
//!
//! Knight, king, and pawn attacks depend only on the origin square, so each is
//! a 64-entry table built at compile time from a list of (file, rank) offsets.

use crate::game_state::chess_types::{Color, Square};

const KNIGHT_OFFSETS: [(i32, i32); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

const KING_OFFSETS: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

const LIGHT_PAWN_OFFSETS: [(i32, i32); 2] = [(-1, 1), (1, 1)];
const DARK_PAWN_OFFSETS: [(i32, i32); 2] = [(-1, -1), (1, -1)];

pub const KNIGHT_ATTACKS: [u64; 64] = build_table(&KNIGHT_OFFSETS);
pub const KING_ATTACKS: [u64; 64] = build_table(&KING_OFFSETS);
pub const LIGHT_PAWN_ATTACKS: [u64; 64] = build_table(&LIGHT_PAWN_OFFSETS);
pub const DARK_PAWN_ATTACKS: [u64; 64] = build_table(&DARK_PAWN_OFFSETS);

#[inline]
pub const fn knight_attacks(square: Square) -> u64 {
    KNIGHT_ATTACKS[square as usize]
}

#[inline]
pub const fn king_attacks(square: Square) -> u64 {
    KING_ATTACKS[square as usize]
}

/// Squares a pawn of `color` standing on `square` attacks.
#[inline]
pub const fn pawn_attacks(color: Color, square: Square) -> u64 {
    match color {
        Color::Light => LIGHT_PAWN_ATTACKS[square as usize],
        Color::Dark => DARK_PAWN_ATTACKS[square as usize],
    }
}

const fn build_table(offsets: &[(i32, i32)]) -> [u64; 64] {
    let mut table = [0u64; 64];
    let mut sq = 0usize;

    while sq < 64 {
        let file = (sq % 8) as i32;
        let rank = (sq / 8) as i32;
        let mut attacks = 0u64;
        let mut i = 0usize;

        while i < offsets.len() {
            attacks |= set_if_valid(file + offsets[i].0, rank + offsets[i].1);
            i += 1;
        }

        table[sq] = attacks;
        sq += 1;
    }

    table
}

const fn set_if_valid(file: i32, rank: i32) -> u64 {
    if file < 0 || file > 7 || rank < 0 || rank > 7 {
        return 0;
    }

    1u64 << (rank * 8 + file)
}

#[cfg(test)]
mod tests {
    use super::{king_attacks, knight_attacks, pawn_attacks};
    use crate::game_state::chess_types::Color;

    #[test]
    fn knight_attacks_from_d4_and_a1() {
        assert_eq!(knight_attacks(27).count_ones(), 8);
        assert_eq!(knight_attacks(0), (1u64 << 10) | (1u64 << 17));
    }

    #[test]
    fn king_attacks_from_a1_has_three_targets() {
        assert_eq!(king_attacks(0).count_ones(), 3);
        assert_eq!(king_attacks(27).count_ones(), 8);
    }

    #[test]
    fn pawn_attacks_point_forward_for_each_color() {
        let e2 = 12u8;
        assert_eq!(pawn_attacks(Color::Light, e2), (1u64 << 19) | (1u64 << 21));
        let e7 = 52u8;
        assert_eq!(pawn_attacks(Color::Dark, e7), (1u64 << 43) | (1u64 << 45));
        // Edge files only attack inward.
        assert_eq!(pawn_attacks(Color::Light, 8), 1u64 << 17);
    }
}
