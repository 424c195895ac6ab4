//! Rules capability interface.
//!
//! The session layer only ever talks to the board through this trait, so any
//! conforming position model (including scripted test doubles) can stand in.

use thiserror::Error;

use crate::game_state::chess_types::{Color, PieceKind};
use crate::move_generation::move_generator::MoveGenerationError;
use crate::rules::board_square::BoardSquare;
use crate::rules::chess_move::ChessMove;

pub type RulesResult<T> = Result<T, RulesError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RulesError {
    #[error("illegal move {0}")]
    IllegalMove(ChessMove),
    #[error("invalid FEN: {0}")]
    InvalidFen(String),
    #[error("move generation failed: {0}")]
    Generation(#[from] MoveGenerationError),
}

pub trait Rules {
    fn piece_at(&self, square: BoardSquare) -> Option<(Color, PieceKind)>;
    fn side_to_move(&self) -> Color;
    /// Plies applied since this position object was constructed.
    fn ply_count(&self) -> usize;
    /// Errors when the position is inconsistent, never on an ordinary
    /// position with no moves.
    fn legal_moves(&self) -> RulesResult<Vec<ChessMove>>;

    fn is_legal(&self, chess_move: &ChessMove) -> RulesResult<bool> {
        Ok(self.legal_moves()?.contains(chess_move))
    }

    fn is_check(&self) -> bool;
    fn is_checkmate(&self) -> RulesResult<bool>;
    fn is_stalemate(&self) -> RulesResult<bool>;
    fn is_insufficient_material(&self) -> bool;
    fn is_fifty_moves(&self) -> bool;
    fn is_repetition(&self) -> bool;
    fn last_move(&self) -> Option<ChessMove>;
    fn king_square(&self, color: Color) -> Option<BoardSquare>;

    /// Applies a legal move. An illegal move leaves the position untouched.
    fn apply_move(&mut self, chess_move: &ChessMove) -> RulesResult<()>;
}
