//! Copy-make move application.
//!
//! `apply_move` returns the successor state for a packed move description,
//! maintaining castling rights, en passant, clocks, the Zobrist key, and the
//! repetition history. It trusts that the move is at least pseudo-legal;
//! legality is filtered by the generator.

use crate::game_state::{chess_types::*, game_state::GameState};
use crate::moves::move_descriptions::{
    move_from, move_promotion_piece, move_to, pack_move_description, FLAG_CAPTURE, FLAG_CASTLING,
    FLAG_DOUBLE_PAWN_PUSH, FLAG_EN_PASSANT,
};
use crate::search::zobrist::compute_zobrist_key;

pub fn apply_move(game_state: &GameState, move_description: u64) -> Result<GameState, String> {
    let from = move_from(move_description);
    let to = move_to(move_description);
    let from_mask = 1u64 << from;
    let to_mask = 1u64 << to;

    let moving_color = game_state.side_to_move;
    let enemy_color = moving_color.opposite();

    let moved_piece = match game_state.piece_on(from) {
        Some((color, piece)) if color == moving_color => piece,
        Some(_) => return Err(format!("Piece on from-square {from} belongs to the opponent")),
        None => return Err(format!("No piece on from-square {from}")),
    };

    let mut next = game_state.clone();

    next.pieces[moving_color.index()][moved_piece.index()] &= !from_mask;

    if move_description & FLAG_EN_PASSANT != 0 {
        let capture_sq = match moving_color {
            Color::Light => to.checked_sub(8),
            Color::Dark => to.checked_add(8),
        }
        .ok_or("Invalid en-passant capture square")?;
        next.pieces[enemy_color.index()][PieceKind::Pawn.index()] &= !(1u64 << capture_sq);
    } else if move_description & FLAG_CAPTURE != 0 {
        for piece in ALL_PIECE_KINDS {
            next.pieces[enemy_color.index()][piece.index()] &= !to_mask;
        }
    }

    let placed = move_promotion_piece(move_description).unwrap_or(moved_piece);
    next.pieces[moving_color.index()][placed.index()] |= to_mask;

    if move_description & FLAG_CASTLING != 0 && moved_piece == PieceKind::King {
        let (rook_from, rook_to) = match (moving_color, to) {
            (Color::Light, 6) => (7, 5),
            (Color::Light, 2) => (0, 3),
            (Color::Dark, 62) => (63, 61),
            (Color::Dark, 58) => (56, 59),
            _ => return Err(format!("Invalid castling destination {to}")),
        };
        let rooks = &mut next.pieces[moving_color.index()][PieceKind::Rook.index()];
        *rooks = (*rooks & !(1u64 << rook_from)) | (1u64 << rook_to);
    }

    next.castling_rights &= !(castling_rights_touched(from) | castling_rights_touched(to));
    if moved_piece == PieceKind::King {
        next.castling_rights &= match moving_color {
            Color::Light => !(CASTLE_LIGHT_KINGSIDE | CASTLE_LIGHT_QUEENSIDE),
            Color::Dark => !(CASTLE_DARK_KINGSIDE | CASTLE_DARK_QUEENSIDE),
        };
    }

    next.en_passant_square = if move_description & FLAG_DOUBLE_PAWN_PUSH != 0 {
        Some((from + to) / 2)
    } else {
        None
    };

    let irreversible = moved_piece == PieceKind::Pawn || move_description & FLAG_CAPTURE != 0;
    next.halfmove_clock = if irreversible {
        0
    } else {
        next.halfmove_clock.saturating_add(1)
    };
    if moving_color == Color::Dark {
        next.fullmove_number = next.fullmove_number.saturating_add(1);
    }

    next.side_to_move = enemy_color;
    next.recalc_occupancy();

    next.zobrist_key = compute_zobrist_key(&next);
    if irreversible || next.castling_rights != game_state.castling_rights {
        next.repetition_history.clear();
    }
    next.repetition_history.push(next.zobrist_key);

    Ok(next)
}

#[inline]
pub fn build_move(
    from: Square,
    to: Square,
    moved_piece: PieceKind,
    captured_piece: Option<PieceKind>,
    promotion_piece: Option<PieceKind>,
    flags: u64,
) -> u64 {
    pack_move_description(from, to, moved_piece, captured_piece, promotion_piece, flags)
}

/// Castling rights lost when a piece leaves or lands on `square`.
fn castling_rights_touched(square: Square) -> CastlingRights {
    match square {
        0 => CASTLE_LIGHT_QUEENSIDE,
        7 => CASTLE_LIGHT_KINGSIDE,
        56 => CASTLE_DARK_QUEENSIDE,
        63 => CASTLE_DARK_KINGSIDE,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::{apply_move, build_move};
    use crate::game_state::chess_types::*;
    use crate::game_state::game_state::GameState;
    use crate::moves::move_descriptions::{FLAG_CAPTURE, FLAG_CASTLING, FLAG_DOUBLE_PAWN_PUSH};

    #[test]
    fn double_push_sets_en_passant_and_resets_history() {
        let game = GameState::new_game();
        let mv = build_move(12, 28, PieceKind::Pawn, None, None, FLAG_DOUBLE_PAWN_PUSH);
        let next = apply_move(&game, mv).expect("e2e4 should apply");

        assert_eq!(next.side_to_move, Color::Dark);
        assert_eq!(next.en_passant_square, Some(20));
        assert_eq!(next.halfmove_clock, 0);
        assert_eq!(next.repetition_history, vec![next.zobrist_key]);
        assert_eq!(
            next.get_fen(),
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1"
        );
    }

    #[test]
    fn kingside_castle_moves_rook_and_clears_rights() {
        let game =
            GameState::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").expect("FEN should parse");
        let mv = build_move(4, 6, PieceKind::King, None, None, FLAG_CASTLING);
        let next = apply_move(&game, mv).expect("castle should apply");

        assert_eq!(next.piece_on(5), Some((Color::Light, PieceKind::Rook)));
        assert_eq!(next.piece_on(7), None);
        assert_eq!(
            next.castling_rights,
            CASTLE_DARK_KINGSIDE | CASTLE_DARK_QUEENSIDE
        );
    }

    #[test]
    fn capturing_a_corner_rook_removes_that_right() {
        let game =
            GameState::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").expect("FEN should parse");
        let mv = build_move(7, 63, PieceKind::Rook, Some(PieceKind::Rook), None, FLAG_CAPTURE);
        let next = apply_move(&game, mv).expect("capture should apply");

        assert_eq!(next.castling_rights, CASTLE_LIGHT_QUEENSIDE | CASTLE_DARK_QUEENSIDE);
        assert_eq!(next.pieces_of(Color::Dark, PieceKind::Rook).count_ones(), 1);
    }

    #[test]
    fn quiet_moves_accumulate_repetition_history() {
        let game = GameState::from_fen("4k3/8/8/8/8/8/8/4K2N w - - 0 1").expect("FEN should parse");
        let mv = build_move(7, 22, PieceKind::Knight, None, None, 0);
        let next = apply_move(&game, mv).expect("knight move should apply");

        assert_eq!(next.halfmove_clock, 1);
        assert_eq!(next.repetition_history.len(), 2);
    }

    #[test]
    fn rejects_moving_an_enemy_piece() {
        let game = GameState::new_game();
        let mv = build_move(52, 36, PieceKind::Pawn, None, None, FLAG_DOUBLE_PAWN_PUSH);
        assert!(apply_move(&game, mv).is_err());
    }
}
