//! Full legal move generation pipeline.
//!
//! Generates pseudo-legal moves piece by piece, applies each candidate, and
//! filters out moves that leave the mover's own king in check.

use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_apply::{apply_move, build_move};
use crate::move_generation::legal_move_checks::{is_king_in_check, is_square_attacked};
use crate::move_generation::move_generator::{
    GeneratedMove, MoveGenResult, MoveGenerationError, MoveGenerator,
};
use crate::moves::leaper_attacks::{king_attacks, knight_attacks, pawn_attacks};
use crate::moves::move_descriptions::{
    FLAG_CAPTURE, FLAG_CASTLING, FLAG_DOUBLE_PAWN_PUSH, FLAG_EN_PASSANT,
};
use crate::moves::slider_attacks::{bishop_attacks, queen_attacks, rook_attacks};

#[derive(Debug, Clone, Copy, Default)]
pub struct LegalMoveGenerator;

impl MoveGenerator for LegalMoveGenerator {
    fn generate_legal_moves(&self, game_state: &GameState) -> MoveGenResult<Vec<GeneratedMove>> {
        let mut pseudo = Vec::<u64>::with_capacity(128);

        generate_pawn_moves(game_state, &mut pseudo);
        generate_piece_moves(game_state, PieceKind::Knight, &mut pseudo);
        generate_piece_moves(game_state, PieceKind::Bishop, &mut pseudo);
        generate_piece_moves(game_state, PieceKind::Rook, &mut pseudo);
        generate_piece_moves(game_state, PieceKind::Queen, &mut pseudo);
        generate_piece_moves(game_state, PieceKind::King, &mut pseudo);
        generate_castling_moves(game_state, &mut pseudo);

        let mut legal = Vec::<GeneratedMove>::with_capacity(pseudo.len());
        for mv in pseudo {
            let next = apply_move(game_state, mv).map_err(|x| {
                MoveGenerationError::InvalidState(format!("apply_move failed: {x}"))
            })?;

            // Illegal if own king is in check after move.
            if is_king_in_check(&next, game_state.side_to_move) {
                continue;
            }

            legal.push(GeneratedMove {
                move_description: mv,
                game_after_move: next,
            });
        }

        Ok(legal)
    }
}

fn enemy_piece_on(game_state: &GameState, square: Square) -> Option<PieceKind> {
    match game_state.piece_on(square) {
        Some((color, piece)) if color != game_state.side_to_move => Some(piece),
        _ => None,
    }
}

fn push_targets(
    game_state: &GameState,
    from: Square,
    piece: PieceKind,
    mut targets: u64,
    out: &mut Vec<u64>,
) {
    while targets != 0 {
        let to = targets.trailing_zeros() as Square;
        let captured = enemy_piece_on(game_state, to);
        let flags = if captured.is_some() { FLAG_CAPTURE } else { 0 };
        out.push(build_move(from, to, piece, captured, None, flags));
        targets &= targets - 1;
    }
}

fn generate_piece_moves(game_state: &GameState, piece: PieceKind, out: &mut Vec<u64>) {
    let side = game_state.side_to_move;
    let own_occ = game_state.occupancy_by_color[side.index()];
    let occupancy = game_state.occupancy_all;

    let mut bb = game_state.pieces_of(side, piece);
    while bb != 0 {
        let from = bb.trailing_zeros() as Square;
        let attacks = match piece {
            PieceKind::Knight => knight_attacks(from),
            PieceKind::Bishop => bishop_attacks(from, occupancy),
            PieceKind::Rook => rook_attacks(from, occupancy),
            PieceKind::Queen => queen_attacks(from, occupancy),
            PieceKind::King => king_attacks(from),
            PieceKind::Pawn => 0,
        };
        push_targets(game_state, from, piece, attacks & !own_occ, out);
        bb &= bb - 1;
    }
}

fn push_pawn_move(
    from: Square,
    to: Square,
    captured: Option<PieceKind>,
    flags: u64,
    promotion_rank: u8,
    out: &mut Vec<u64>,
) {
    if to / 8 == promotion_rank {
        for promo in PROMOTION_CHOICES {
            out.push(build_move(from, to, PieceKind::Pawn, captured, Some(promo), flags));
        }
    } else {
        out.push(build_move(from, to, PieceKind::Pawn, captured, None, flags));
    }
}

fn generate_pawn_moves(game_state: &GameState, out: &mut Vec<u64>) {
    let side = game_state.side_to_move;
    let enemy_occ = game_state.occupancy_by_color[side.opposite().index()];
    let empty = !game_state.occupancy_all;
    let promotion_rank = side.promotion_rank();
    let start_rank = match side {
        Color::Light => 1,
        Color::Dark => 6,
    };

    let mut pawns = game_state.pieces_of(side, PieceKind::Pawn);
    while pawns != 0 {
        let from = pawns.trailing_zeros() as Square;

        let one_step = match side {
            Color::Light => from.checked_add(8).filter(|&sq| sq < 64),
            Color::Dark => from.checked_sub(8),
        };
        if let Some(to) = one_step {
            if (1u64 << to) & empty != 0 {
                push_pawn_move(from, to, None, 0, promotion_rank, out);

                if from / 8 == start_rank {
                    let two_step = match side {
                        Color::Light => to + 8,
                        Color::Dark => to - 8,
                    };
                    if (1u64 << two_step) & empty != 0 {
                        out.push(build_move(
                            from,
                            two_step,
                            PieceKind::Pawn,
                            None,
                            None,
                            FLAG_DOUBLE_PAWN_PUSH,
                        ));
                    }
                }
            }
        }

        let attacks = pawn_attacks(side, from);
        let mut captures = attacks & enemy_occ;
        while captures != 0 {
            let to = captures.trailing_zeros() as Square;
            let captured = enemy_piece_on(game_state, to);
            push_pawn_move(from, to, captured, FLAG_CAPTURE, promotion_rank, out);
            captures &= captures - 1;
        }

        if let Some(ep) = game_state.en_passant_square {
            if attacks & (1u64 << ep) != 0 {
                out.push(build_move(
                    from,
                    ep,
                    PieceKind::Pawn,
                    Some(PieceKind::Pawn),
                    None,
                    FLAG_CAPTURE | FLAG_EN_PASSANT,
                ));
            }
        }

        pawns &= pawns - 1;
    }
}

struct CastlePath {
    right: CastlingRights,
    king_from: Square,
    king_to: Square,
    rook_from: Square,
    must_be_empty: u64,
    must_be_safe: [Square; 3],
}

const CASTLE_PATHS: [CastlePath; 4] = [
    CastlePath {
        right: CASTLE_LIGHT_KINGSIDE,
        king_from: 4,
        king_to: 6,
        rook_from: 7,
        must_be_empty: (1 << 5) | (1 << 6),
        must_be_safe: [4, 5, 6],
    },
    CastlePath {
        right: CASTLE_LIGHT_QUEENSIDE,
        king_from: 4,
        king_to: 2,
        rook_from: 0,
        must_be_empty: (1 << 1) | (1 << 2) | (1 << 3),
        must_be_safe: [4, 3, 2],
    },
    CastlePath {
        right: CASTLE_DARK_KINGSIDE,
        king_from: 60,
        king_to: 62,
        rook_from: 63,
        must_be_empty: (1 << 61) | (1 << 62),
        must_be_safe: [60, 61, 62],
    },
    CastlePath {
        right: CASTLE_DARK_QUEENSIDE,
        king_from: 60,
        king_to: 58,
        rook_from: 56,
        must_be_empty: (1 << 57) | (1 << 58) | (1 << 59),
        must_be_safe: [60, 59, 58],
    },
];

fn generate_castling_moves(game_state: &GameState, out: &mut Vec<u64>) {
    let side = game_state.side_to_move;
    let enemy = side.opposite();
    let kings = game_state.pieces_of(side, PieceKind::King);
    let rooks = game_state.pieces_of(side, PieceKind::Rook);

    for path in &CASTLE_PATHS {
        if game_state.castling_rights & path.right == 0 {
            continue;
        }
        if kings & (1u64 << path.king_from) == 0 || rooks & (1u64 << path.rook_from) == 0 {
            continue;
        }
        if game_state.occupancy_all & path.must_be_empty != 0 {
            continue;
        }
        if path
            .must_be_safe
            .iter()
            .any(|&sq| is_square_attacked(game_state, sq, enemy))
        {
            continue;
        }
        out.push(build_move(
            path.king_from,
            path.king_to,
            PieceKind::King,
            None,
            None,
            FLAG_CASTLING,
        ));
    }
}
