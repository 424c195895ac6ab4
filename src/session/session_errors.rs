use std::io;

use thiserror::Error;

use crate::engines::engine_trait::EngineError;
use crate::rules::chess_move::ChessMove;
use crate::rules::rules_trait::RulesError;

pub type SessionResult<T> = Result<T, SessionError>;

/// Collaborator contract violations. None of these are recoverable within
/// the current game.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("engine failed: {0}")]
    Engine(#[from] EngineError),
    #[error("engine '{engine}' returned illegal move {chess_move}")]
    IllegalEngineMove { engine: String, chess_move: ChessMove },
    #[error("rules rejected a move they reported legal: {0}")]
    Rules(#[from] RulesError),
    #[error("engine turn started without an engine")]
    EngineMissing,
    #[error("presentation failed: {0}")]
    Presentation(#[from] io::Error),
}
