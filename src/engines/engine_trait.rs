//! Engine abstraction used by the session's turn scheduler.
//!
//! An engine is handed the live position read-only and must answer with one
//! legal move. Different strategies are selected at runtime behind this
//! trait, and tests substitute scripted engines.

use thiserror::Error;

use crate::rules::chess_move::ChessMove;

pub type EngineResult<T> = Result<T, EngineError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("no legal moves in the given position")]
    NoLegalMoves,
    #[error("search failed: {0}")]
    Search(String),
}

pub trait Engine<R: ?Sized>: Send {
    fn name(&self) -> &str;

    fn new_game(&mut self) {}

    fn choose_move(&mut self, rules: &R) -> EngineResult<ChessMove>;
}
