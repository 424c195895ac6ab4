use thiserror::Error;

use crate::game_state::game_state::GameState;

pub type MoveGenResult<T> = Result<T, MoveGenerationError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveGenerationError {
    #[error("invalid game state: {0}")]
    InvalidState(String),
}

#[derive(Debug, Clone)]
pub struct GeneratedMove {
    pub move_description: u64,
    pub game_after_move: GameState,
}

pub trait MoveGenerator: Send + Sync {
    fn generate_legal_moves(&self, game_state: &GameState) -> MoveGenResult<Vec<GeneratedMove>>;
}
