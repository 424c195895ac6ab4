//! Core board state representation.
//!
//! `GameState` is the position model behind the rules collaborator. It stores
//! piece bitboards, occupancy caches, turn/state flags, clocks, and the
//! Zobrist history needed for repetition detection. Positions are advanced
//! copy-make style by `move_generation::legal_move_apply::apply_move`.

use crate::game_state::chess_types::*;
use crate::search::zobrist::compute_zobrist_key;
use crate::utils::fen_generator::generate_fen;
use crate::utils::fen_parser::parse_fen;

const LIGHT_BACK_RANK: [u64; 6] = [0xFF00, 0x42, 0x24, 0x81, 0x08, 0x10];
const START_CASTLING: CastlingRights =
    CASTLE_LIGHT_KINGSIDE | CASTLE_LIGHT_QUEENSIDE | CASTLE_DARK_KINGSIDE | CASTLE_DARK_QUEENSIDE;

#[derive(Debug, Clone)]
pub struct GameState {
    // --- Bitboard representation ---
    // [color][piece_kind]
    pub pieces: [[u64; 6]; 2],

    // Occupancy caches.
    pub occupancy_by_color: [u64; 2],
    pub occupancy_all: u64,

    // --- Side and state flags ---
    pub side_to_move: Color,
    pub castling_rights: CastlingRights,
    pub en_passant_square: Option<Square>,

    // --- Clocks / move counters ---
    pub halfmove_clock: u16,
    pub fullmove_number: u16,

    // --- Position identity ---
    pub zobrist_key: u64,

    // --- Repetition support ---
    /// Keys of every position since the last irreversible move, current included.
    pub repetition_history: Vec<u64>,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            pieces: [[0; 6]; 2],
            occupancy_by_color: [0; 2],
            occupancy_all: 0,

            side_to_move: Color::Light,
            castling_rights: 0,
            en_passant_square: None,

            halfmove_clock: 0,
            fullmove_number: 1,

            zobrist_key: 0,

            repetition_history: Vec::new(),
        }
    }
}

impl GameState {
    #[inline]
    pub fn new_empty() -> Self {
        Self::default()
    }

    /// Standard starting position.
    pub fn new_game() -> Self {
        let mut game_state = Self::new_empty();
        for piece in ALL_PIECE_KINDS {
            let light = LIGHT_BACK_RANK[piece.index()];
            // Dark mirrors light across the middle of the board.
            game_state.pieces[Color::Light.index()][piece.index()] = light;
            game_state.pieces[Color::Dark.index()][piece.index()] = light.swap_bytes();
        }
        game_state.castling_rights = START_CASTLING;
        game_state.recalc_occupancy();
        game_state.zobrist_key = compute_zobrist_key(&game_state);
        game_state.repetition_history.push(game_state.zobrist_key);
        game_state
    }

    #[inline]
    pub fn from_fen(fen: &str) -> Result<Self, String> {
        parse_fen(fen)
    }

    #[inline]
    pub fn get_fen(&self) -> String {
        generate_fen(self)
    }

    /// Color and kind of the piece on `square`, if any.
    pub fn piece_on(&self, square: Square) -> Option<(Color, PieceKind)> {
        let mask = 1u64 << square;
        if self.occupancy_all & mask == 0 {
            return None;
        }
        for color in [Color::Light, Color::Dark] {
            for piece in ALL_PIECE_KINDS {
                if self.pieces[color.index()][piece.index()] & mask != 0 {
                    return Some((color, piece));
                }
            }
        }
        None
    }

    #[inline]
    pub fn pieces_of(&self, color: Color, piece: PieceKind) -> u64 {
        self.pieces[color.index()][piece.index()]
    }

    /// Bitboard of `piece` for both colors.
    #[inline]
    pub fn pieces_of_kind(&self, piece: PieceKind) -> u64 {
        self.pieces[Color::Light.index()][piece.index()] | self.pieces[Color::Dark.index()][piece.index()]
    }

    pub fn recalc_occupancy(&mut self) {
        for color in [Color::Light, Color::Dark] {
            self.occupancy_by_color[color.index()] = self.pieces[color.index()]
                .iter()
                .copied()
                .fold(0u64, |acc, bb| acc | bb);
        }
        self.occupancy_all = self.occupancy_by_color[Color::Light.index()]
            | self.occupancy_by_color[Color::Dark.index()];
    }
}

#[cfg(test)]
mod tests {
    use super::GameState;
    use crate::game_state::chess_rules::STARTING_POSITION_FEN;
    use crate::game_state::chess_types::{Color, PieceKind};

    #[test]
    fn new_game_matches_starting_fen() {
        let game = GameState::new_game();
        assert_eq!(game.get_fen(), STARTING_POSITION_FEN);
        assert_eq!(game.occupancy_all.count_ones(), 32);
        assert_eq!(game.repetition_history, vec![game.zobrist_key]);
    }

    #[test]
    fn new_game_agrees_with_parsed_starting_fen() {
        let built = GameState::new_game();
        let parsed = GameState::from_fen(STARTING_POSITION_FEN).expect("starting FEN should parse");
        assert_eq!(built.pieces, parsed.pieces);
        assert_eq!(built.castling_rights, parsed.castling_rights);
        assert_eq!(built.zobrist_key, parsed.zobrist_key);
    }

    #[test]
    fn piece_on_reports_color_and_kind() {
        let game = GameState::new_game();
        assert_eq!(game.piece_on(4), Some((Color::Light, PieceKind::King)));
        assert_eq!(game.piece_on(59), Some((Color::Dark, PieceKind::Queen)));
        assert_eq!(game.piece_on(0), Some((Color::Light, PieceKind::Rook)));
        assert_eq!(game.piece_on(28), None);
    }
}
