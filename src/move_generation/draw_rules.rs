//! Automatic draw predicates: insufficient material, the fifty-move rule, and
//! threefold repetition.

use crate::game_state::chess_rules::{FIFTY_MOVE_HALFMOVES, REPETITION_DRAW_COUNT};
use crate::game_state::{chess_types::*, game_state::GameState};

/// Neither side can possibly deliver mate.
pub fn is_insufficient_material(game_state: &GameState) -> bool {
    has_insufficient_material(game_state, Color::Light)
        && has_insufficient_material(game_state, Color::Dark)
}

/// Whether `color` alone lacks the material to ever checkmate.
///
/// A lone king, or a lone minor piece against a defender with nothing that
/// could block its own king, cannot force or even help mate. Bishops are
/// harmless only while every bishop on the board shares one square colour.
pub fn has_insufficient_material(game_state: &GameState, color: Color) -> bool {
    let ours = game_state.occupancy_by_color[color.index()];
    let theirs = game_state.occupancy_by_color[color.opposite().index()];

    let heavy = game_state.pieces_of(color, PieceKind::Pawn)
        | game_state.pieces_of(color, PieceKind::Rook)
        | game_state.pieces_of(color, PieceKind::Queen);
    if heavy != 0 {
        return false;
    }

    if game_state.pieces_of(color, PieceKind::Knight) != 0 {
        let their_kings_and_queens = game_state.pieces_of(color.opposite(), PieceKind::King)
            | game_state.pieces_of(color.opposite(), PieceKind::Queen);
        return ours.count_ones() <= 2 && theirs & !their_kings_and_queens == 0;
    }

    if game_state.pieces_of(color, PieceKind::Bishop) != 0 {
        let bishops = game_state.pieces_of_kind(PieceKind::Bishop);
        let same_colour = bishops & DARK_SQUARES == 0 || bishops & LIGHT_SQUARES == 0;
        let blockers =
            game_state.pieces_of_kind(PieceKind::Pawn) | game_state.pieces_of_kind(PieceKind::Knight);
        return same_colour && blockers == 0;
    }

    true
}

#[inline]
pub fn is_fifty_move_draw(game_state: &GameState) -> bool {
    game_state.halfmove_clock >= FIFTY_MOVE_HALFMOVES
}

/// The current position has occurred at least three times since the last
/// irreversible move.
pub fn is_repetition_draw(game_state: &GameState) -> bool {
    let key = game_state.zobrist_key;
    game_state
        .repetition_history
        .iter()
        .filter(|&&k| k == key)
        .count()
        >= REPETITION_DRAW_COUNT
}
