//! Pluggable board evaluation.
//!
//! Search delegates static position scoring to `BoardScorer`, so alternate
//! heuristics can be swapped without touching the search code.

use crate::game_state::{chess_types::*, game_state::GameState};

pub const MATE_SCORE: i32 = 30000;

pub trait BoardScorer: Send + Sync {
    /// Score from the perspective of the side to move.
    fn score(&self, game_state: &GameState) -> i32;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MaterialScorer;

impl MaterialScorer {
    #[inline]
    pub const fn piece_value(piece: PieceKind) -> i32 {
        match piece {
            PieceKind::Pawn => 100,
            PieceKind::Knight => 320,
            PieceKind::Bishop => 330,
            PieceKind::Rook => 500,
            PieceKind::Queen => 900,
            PieceKind::King => 0,
        }
    }

    fn material_balance_white_minus_black(game_state: &GameState) -> i32 {
        ALL_PIECE_KINDS
            .iter()
            .map(|&piece| {
                let white = game_state.pieces_of(Color::Light, piece).count_ones() as i32;
                let black = game_state.pieces_of(Color::Dark, piece).count_ones() as i32;
                (white - black) * Self::piece_value(piece)
            })
            .sum()
    }
}

impl BoardScorer for MaterialScorer {
    fn score(&self, game_state: &GameState) -> i32 {
        let white_minus_black = Self::material_balance_white_minus_black(game_state);
        match game_state.side_to_move {
            Color::Light => white_minus_black,
            Color::Dark => -white_minus_black,
        }
    }
}

/// Material plus a small bonus for pieces and pawns near the centre.
///
/// Keeps the stronger engine from shuffling aimlessly in quiet positions.
#[derive(Debug, Clone, Copy, Default)]
pub struct CentralizingScorer;

const CENTRE: u64 = 0x0000_0018_1800_0000;
const EXTENDED_CENTRE: u64 = 0x0000_3C3C_3C3C_0000;

impl CentralizingScorer {
    fn centre_bonus(game_state: &GameState, color: Color) -> i32 {
        let minors_and_pawns = game_state.pieces_of(color, PieceKind::Pawn)
            | game_state.pieces_of(color, PieceKind::Knight)
            | game_state.pieces_of(color, PieceKind::Bishop);
        (minors_and_pawns & CENTRE).count_ones() as i32 * 20
            + (minors_and_pawns & EXTENDED_CENTRE).count_ones() as i32 * 8
    }
}

impl BoardScorer for CentralizingScorer {
    fn score(&self, game_state: &GameState) -> i32 {
        let side = game_state.side_to_move;
        MaterialScorer.score(game_state) + Self::centre_bonus(game_state, side)
            - Self::centre_bonus(game_state, side.opposite())
    }
}

#[cfg(test)]
mod tests {
    use super::{BoardScorer, CentralizingScorer, MaterialScorer};
    use crate::game_state::game_state::GameState;

    #[test]
    fn start_position_is_balanced() {
        let game = GameState::new_game();
        assert_eq!(MaterialScorer.score(&game), 0);
        assert_eq!(CentralizingScorer.score(&game), 0);
    }

    #[test]
    fn material_score_is_side_relative() {
        let white_to_move =
            GameState::from_fen("4k3/8/8/8/8/8/8/R3K3 w - - 0 1").expect("FEN should parse");
        let black_to_move =
            GameState::from_fen("4k3/8/8/8/8/8/8/R3K3 b - - 0 1").expect("FEN should parse");
        assert_eq!(MaterialScorer.score(&white_to_move), 500);
        assert_eq!(MaterialScorer.score(&black_to_move), -500);
    }

    #[test]
    fn central_pawn_outscores_rim_pawn() {
        let central =
            GameState::from_fen("4k3/8/8/8/4P3/8/8/4K3 w - - 0 1").expect("FEN should parse");
        let rim = GameState::from_fen("4k3/8/8/8/P7/8/8/4K3 w - - 0 1").expect("FEN should parse");
        assert!(CentralizingScorer.score(&central) > CentralizingScorer.score(&rim));
    }
}
