use rand::prelude::IndexedRandom;
use tracing::debug;

use crate::engines::engine_trait::{Engine, EngineError, EngineResult};
use crate::move_generation::legal_move_generator::LegalMoveGenerator;
use crate::rules::chess_move::ChessMove;
use crate::rules::standard_rules::{chess_move_from_description, StandardRules};
use crate::search::board_scoring::CentralizingScorer;
use crate::search::iterative_deepening::{iterative_deepening_search, SearchConfig};

/// Fixed-depth iterative deepening alpha-beta search. Equally scored moves
/// are picked at random so games vary.
pub struct IterativeEngine {
    depth: u8,
    move_generator: LegalMoveGenerator,
    scorer: CentralizingScorer,
}

impl IterativeEngine {
    pub fn new(depth: u8) -> Self {
        Self {
            depth: depth.max(1),
            move_generator: LegalMoveGenerator,
            scorer: CentralizingScorer,
        }
    }

    #[inline]
    pub fn depth(&self) -> u8 {
        self.depth
    }
}

impl Engine<StandardRules> for IterativeEngine {
    fn name(&self) -> &str {
        "Iterative"
    }

    fn choose_move(&mut self, rules: &StandardRules) -> EngineResult<ChessMove> {
        let result = iterative_deepening_search(
            rules.game_state(),
            &self.move_generator,
            &self.scorer,
            SearchConfig {
                max_depth: self.depth,
            },
        )
        .map_err(|e| EngineError::Search(e.to_string()))?;

        let best = result
            .tied_moves
            .as_slice()
            .choose(&mut rand::rng())
            .copied()
            .or(result.best_move)
            .ok_or(EngineError::NoLegalMoves)?;
        debug!(
            depth = result.reached_depth,
            score = result.best_score,
            nodes = result.nodes,
            ties = result.tied_moves.len(),
            "iterative engine finished search"
        );
        chess_move_from_description(best)
            .ok_or_else(|| EngineError::Search(format!("invalid move description {best:#x}")))
    }
}
