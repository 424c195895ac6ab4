//! Canonical chess-rule constants.
//!
//! Static rule-related literals: the standard starting position and the
//! thresholds used by the draw rules.

/// Standard chess starting position in Forsyth-Edwards Notation (FEN).
pub const STARTING_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Half-move clock value at which the fifty-move rule applies.
pub const FIFTY_MOVE_HALFMOVES: u16 = 100;

/// Occurrences of one position needed for a repetition draw.
pub const REPETITION_DRAW_COUNT: usize = 3;
