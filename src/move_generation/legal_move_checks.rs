use crate::game_state::{chess_types::*, game_state::GameState};
use crate::moves::leaper_attacks::{king_attacks, knight_attacks, pawn_attacks};
use crate::moves::slider_attacks::{bishop_attacks, rook_attacks};

#[inline]
pub fn king_square(game_state: &GameState, color: Color) -> Option<Square> {
    let kings = game_state.pieces_of(color, PieceKind::King);
    if kings == 0 {
        None
    } else {
        Some(kings.trailing_zeros() as Square)
    }
}

#[inline]
pub fn is_king_in_check(game_state: &GameState, color: Color) -> bool {
    let Some(king_sq) = king_square(game_state, color) else {
        return false;
    };
    is_square_attacked(game_state, king_sq, color.opposite())
}

/// Whether any piece of `attacker_color` attacks `square`.
pub fn is_square_attacked(game_state: &GameState, square: Square, attacker_color: Color) -> bool {
    let theirs = |piece| game_state.pieces_of(attacker_color, piece);

    // Reverse lookups: a pawn of ours on `square` would attack exactly the
    // squares their pawns attack it from.
    if pawn_attacks(attacker_color.opposite(), square) & theirs(PieceKind::Pawn) != 0 {
        return true;
    }
    if knight_attacks(square) & theirs(PieceKind::Knight) != 0 {
        return true;
    }
    if king_attacks(square) & theirs(PieceKind::King) != 0 {
        return true;
    }

    let occupancy = game_state.occupancy_all;
    let diagonal = theirs(PieceKind::Bishop) | theirs(PieceKind::Queen);
    if bishop_attacks(square, occupancy) & diagonal != 0 {
        return true;
    }

    let straight = theirs(PieceKind::Rook) | theirs(PieceKind::Queen);
    rook_attacks(square, occupancy) & straight != 0
}

#[cfg(test)]
mod tests {
    use super::{is_king_in_check, is_square_attacked, king_square};
    use crate::game_state::chess_types::Color;
    use crate::game_state::game_state::GameState;

    #[test]
    fn start_position_has_no_checks() {
        let game = GameState::new_game();
        assert_eq!(king_square(&game, Color::Light), Some(4));
        assert_eq!(king_square(&game, Color::Dark), Some(60));
        assert!(!is_king_in_check(&game, Color::Light));
        assert!(!is_king_in_check(&game, Color::Dark));
        // f3 is covered by the g1 knight and the e2/g2 pawns.
        assert!(is_square_attacked(&game, 21, Color::Light));
        assert!(!is_square_attacked(&game, 28, Color::Light));
    }

    #[test]
    fn detects_slider_and_pawn_checks() {
        let rook_check =
            GameState::from_fen("4k3/8/8/8/8/8/8/4K2r w - - 0 1").expect("FEN should parse");
        assert!(is_king_in_check(&rook_check, Color::Light));

        let blocked =
            GameState::from_fen("4k3/8/8/8/8/8/8/4KB1r w - - 0 1").expect("FEN should parse");
        assert!(!is_king_in_check(&blocked, Color::Light));

        let pawn_check =
            GameState::from_fen("4k3/8/8/8/8/8/3p4/4K3 w - - 0 1").expect("FEN should parse");
        assert!(is_king_in_check(&pawn_check, Color::Light));
    }
}
