//! Occupancy-aware attacks for bishops, rooks, and queens.
//!
//! Rays are traced square by square and stop at (and include) the first
//! occupied square. Fast enough for the fixed-depth searches this crate runs.

use crate::game_state::chess_types::Square;

const BISHOP_DIRECTIONS: [(i32, i32); 4] = [(1, 1), (-1, 1), (1, -1), (-1, -1)];
const ROOK_DIRECTIONS: [(i32, i32); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];

#[inline]
pub fn bishop_attacks(square: Square, occupancy: u64) -> u64 {
    BISHOP_DIRECTIONS
        .iter()
        .fold(0u64, |acc, &(df, dr)| acc | trace_ray(square, df, dr, occupancy))
}

#[inline]
pub fn rook_attacks(square: Square, occupancy: u64) -> u64 {
    ROOK_DIRECTIONS
        .iter()
        .fold(0u64, |acc, &(df, dr)| acc | trace_ray(square, df, dr, occupancy))
}

#[inline]
pub fn queen_attacks(square: Square, occupancy: u64) -> u64 {
    bishop_attacks(square, occupancy) | rook_attacks(square, occupancy)
}

fn trace_ray(square: Square, file_step: i32, rank_step: i32, occupancy: u64) -> u64 {
    let mut file = i32::from(square % 8) + file_step;
    let mut rank = i32::from(square / 8) + rank_step;
    let mut attacks = 0u64;

    while (0..8).contains(&file) && (0..8).contains(&rank) {
        let bit = 1u64 << (rank * 8 + file);
        attacks |= bit;

        if occupancy & bit != 0 {
            break;
        }

        file += file_step;
        rank += rank_step;
    }

    attacks
}

#[cfg(test)]
mod tests {
    use super::{bishop_attacks, queen_attacks, rook_attacks};

    #[test]
    fn empty_board_ray_counts_from_d4() {
        let d4 = 27u8;
        assert_eq!(bishop_attacks(d4, 0).count_ones(), 13);
        assert_eq!(rook_attacks(d4, 0).count_ones(), 14);
        assert_eq!(queen_attacks(d4, 0).count_ones(), 27);
    }

    #[test]
    fn blockers_stop_rays_but_are_included() {
        let a1 = 0u8;
        let blocker_on_a4 = 1u64 << 24;
        let attacks = rook_attacks(a1, blocker_on_a4);
        assert_ne!(attacks & (1u64 << 24), 0);
        assert_eq!(attacks & (1u64 << 32), 0);

        let c1 = 2u8;
        let blocker_on_e3 = 1u64 << 20;
        let attacks = bishop_attacks(c1, blocker_on_e3);
        assert_ne!(attacks & (1u64 << 20), 0);
        assert_eq!(attacks & (1u64 << 29), 0);
    }
}
