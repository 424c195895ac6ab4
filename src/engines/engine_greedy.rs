use rand::prelude::IndexedRandom;
use tracing::debug;

use crate::engines::engine_trait::{Engine, EngineError, EngineResult};
use crate::move_generation::legal_move_generator::LegalMoveGenerator;
use crate::move_generation::move_generator::MoveGenerator;
use crate::moves::move_descriptions::move_captured_piece;
use crate::rules::chess_move::ChessMove;
use crate::rules::standard_rules::{chess_move_from_description, StandardRules};
use crate::search::board_scoring::MaterialScorer;

/// Takes the most valuable piece on offer; otherwise plays any move.
pub struct GreedyEngine {
    move_generator: LegalMoveGenerator,
}

impl GreedyEngine {
    pub fn new() -> Self {
        Self {
            move_generator: LegalMoveGenerator,
        }
    }
}

impl Default for GreedyEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine<StandardRules> for GreedyEngine {
    fn name(&self) -> &str {
        "Greedy"
    }

    fn choose_move(&mut self, rules: &StandardRules) -> EngineResult<ChessMove> {
        let legal_moves = self
            .move_generator
            .generate_legal_moves(rules.game_state())
            .map_err(|e| EngineError::Search(e.to_string()))?;

        let mut best_value = i32::MIN;
        let mut best_moves = Vec::new();

        for mv in &legal_moves {
            let capture_value = move_captured_piece(mv.move_description)
                .map_or(0, MaterialScorer::piece_value);

            if capture_value > best_value {
                best_value = capture_value;
                best_moves.clear();
                best_moves.push(mv.move_description);
            } else if capture_value == best_value {
                best_moves.push(mv.move_description);
            }
        }

        let mut rng = rand::rng();
        let picked = *best_moves
            .as_slice()
            .choose(&mut rng)
            .ok_or(EngineError::NoLegalMoves)?;

        debug!(
            legal_moves = legal_moves.len(),
            capture_score = best_value,
            "greedy engine picked a move"
        );
        chess_move_from_description(picked)
            .ok_or_else(|| EngineError::Search(format!("invalid move description {picked:#x}")))
    }
}

#[cfg(test)]
mod tests {
    use super::GreedyEngine;
    use crate::engines::engine_trait::{Engine, EngineError};
    use crate::rules::rules_trait::Rules;
    use crate::rules::standard_rules::StandardRules;

    #[test]
    fn takes_the_queen_over_the_pawn() {
        // The e4 knight forks the d6 queen and the f6 pawn.
        let rules = StandardRules::from_fen("4k3/8/3q1p2/8/4N3/8/8/4K3 w - - 0 1").expect("FEN");
        let mut engine = GreedyEngine::new();
        let chosen = engine.choose_move(&rules).expect("a move should be chosen");
        assert_eq!(chosen.to_string(), "e4d6");
        assert_eq!(rules.is_legal(&chosen), Ok(true));
    }

    #[test]
    fn any_legal_move_when_nothing_hangs() {
        let rules = StandardRules::new_game();
        let mut engine = GreedyEngine::default();
        for _ in 0..8 {
            let chosen = engine.choose_move(&rules).expect("a move should be chosen");
            assert_eq!(rules.is_legal(&chosen), Ok(true));
        }
    }

    #[test]
    fn reports_no_legal_moves_when_mated() {
        let rules = StandardRules::from_fen("7k/6Q1/6K1/8/8/8/8/8 b - - 0 1").expect("FEN");
        assert_eq!(
            GreedyEngine::new().choose_move(&rules),
            Err(EngineError::NoLegalMoves)
        );
    }
}
