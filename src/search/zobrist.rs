//! Zobrist hashing for position identity and repetition tracking.
//!
//! The keys are generated from a fixed seed so hashes are deterministic across
//! runs. The en-passant file only contributes when an en-passant capture is
//! actually available, so positions that differ only by a dead en-passant
//! square count as repetitions of each other.

use std::sync::OnceLock;

use crate::game_state::{chess_types::*, game_state::GameState};
use crate::moves::leaper_attacks::pawn_attacks;

#[derive(Debug)]
struct ZobristTables {
    piece_square: [[[u64; 64]; 6]; 2],
    side_to_move: u64,
    castling: [u64; 16],
    en_passant_file: [u64; 8],
}

static TABLES: OnceLock<ZobristTables> = OnceLock::new();

#[inline]
fn tables() -> &'static ZobristTables {
    TABLES.get_or_init(build_tables)
}

fn build_tables() -> ZobristTables {
    let mut seed: u64 = 0x9E37_79B9_7F4A_7C15;

    let mut piece_square = [[[0u64; 64]; 6]; 2];
    for color in &mut piece_square {
        for piece in color {
            for sq in piece {
                *sq = next_random_u64(&mut seed);
            }
        }
    }

    let side_to_move = next_random_u64(&mut seed);

    let mut castling = [0u64; 16];
    for key in &mut castling {
        *key = next_random_u64(&mut seed);
    }

    let mut en_passant_file = [0u64; 8];
    for key in &mut en_passant_file {
        *key = next_random_u64(&mut seed);
    }

    ZobristTables {
        piece_square,
        side_to_move,
        castling,
        en_passant_file,
    }
}

#[inline]
fn next_random_u64(state: &mut u64) -> u64 {
    // splitmix64
    *state = state.wrapping_add(0x9E37_79B9_7F4A_7C15);
    let mut z = *state;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Compute the full position key from the complete game state.
pub fn compute_zobrist_key(game_state: &GameState) -> u64 {
    let tables = tables();
    let mut key = 0u64;

    for color in [Color::Light, Color::Dark] {
        for piece in ALL_PIECE_KINDS {
            let mut bb = game_state.pieces_of(color, piece);
            while bb != 0 {
                let sq = bb.trailing_zeros() as usize;
                key ^= tables.piece_square[color.index()][piece.index()][sq];
                bb &= bb - 1;
            }
        }
    }

    if game_state.side_to_move == Color::Dark {
        key ^= tables.side_to_move;
    }

    key ^= tables.castling[(game_state.castling_rights & 0x0F) as usize];

    if let Some(ep_square) = game_state.en_passant_square {
        if en_passant_capture_available(game_state, ep_square) {
            key ^= tables.en_passant_file[(ep_square % 8) as usize];
        }
    }

    key
}

fn en_passant_capture_available(game_state: &GameState, ep_square: Square) -> bool {
    let mover = game_state.side_to_move;
    // A mover's pawn attacks the target iff an enemy pawn on the target would attack it back.
    pawn_attacks(mover.opposite(), ep_square) & game_state.pieces_of(mover, PieceKind::Pawn) != 0
}

#[cfg(test)]
mod tests {
    use super::compute_zobrist_key;
    use crate::game_state::game_state::GameState;

    #[test]
    fn starting_position_hash_is_deterministic() {
        let a = GameState::new_game();
        let b = GameState::new_game();
        assert_eq!(a.zobrist_key, b.zobrist_key);
        assert_eq!(a.zobrist_key, compute_zobrist_key(&a));
    }

    #[test]
    fn side_to_move_changes_hash() {
        let w = GameState::from_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 1").expect("FEN should parse");
        let b = GameState::from_fen("4k3/8/8/8/8/8/8/4K3 b - - 0 1").expect("FEN should parse");
        assert_ne!(w.zobrist_key, b.zobrist_key);
    }

    #[test]
    fn castling_rights_change_hash() {
        let with_rights =
            GameState::from_fen("4k3/8/8/8/8/8/8/R3K2R w KQ - 0 1").expect("FEN should parse");
        let without_rights =
            GameState::from_fen("4k3/8/8/8/8/8/8/R3K2R w - - 0 1").expect("FEN should parse");
        assert_ne!(with_rights.zobrist_key, without_rights.zobrist_key);
    }

    #[test]
    fn en_passant_counts_only_when_capturable() {
        let dead_ep =
            GameState::from_fen("4k3/8/8/8/4P3/8/8/4K3 b - e3 0 1").expect("FEN should parse");
        let no_ep = GameState::from_fen("4k3/8/8/8/4P3/8/8/4K3 b - - 0 1").expect("FEN should parse");
        assert_eq!(dead_ep.zobrist_key, no_ep.zobrist_key);

        let live_ep =
            GameState::from_fen("4k3/8/8/8/3pP3/8/8/4K3 b - e3 0 1").expect("FEN should parse");
        let live_no_ep =
            GameState::from_fen("4k3/8/8/8/3pP3/8/8/4K3 b - - 0 1").expect("FEN should parse");
        assert_ne!(live_ep.zobrist_key, live_no_ep.zobrist_key);
    }
}
