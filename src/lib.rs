//! Crate root module declarations for the Plum Play interactive chess session.
//!
//! Exposes the bitboard rules (game state, move generation, search), the
//! engines that play against a human, the session controller that turns
//! clicks into moves, and the text presentation used by the binary.

pub mod game_state {
    pub mod chess_rules;
    pub mod chess_types;
    pub mod game_state;
}

pub mod moves {
    pub mod leaper_attacks;
    pub mod move_descriptions;
    pub mod slider_attacks;
}

pub mod move_generation {
    pub mod draw_rules;
    pub mod legal_move_apply;
    pub mod legal_move_checks;
    pub mod legal_move_generator;
    pub mod move_generator;
    pub mod perft;
}

pub mod search {
    pub mod board_scoring;
    pub mod iterative_deepening;
    pub mod zobrist;
}

pub mod engines {
    pub mod difficulty;
    pub mod engine_greedy;
    pub mod engine_iterative;
    pub mod engine_trait;
}

pub mod rules {
    pub mod board_square;
    pub mod chess_move;
    pub mod rules_trait;
    pub mod standard_rules;
}

pub mod session {
    pub mod input_translator;
    pub mod move_arbiter;
    pub mod selection;
    pub mod session_config;
    pub mod session_errors;
    pub mod session_state;
    pub mod termination;
    pub mod turn_scheduler;
}

pub mod presentation {
    pub mod command_loop;
    pub mod presentation_trait;
    pub mod text_board;
}

pub mod utils {
    pub mod algebraic;
    pub mod fen_generator;
    pub mod fen_parser;
    pub mod long_algebraic;
}
