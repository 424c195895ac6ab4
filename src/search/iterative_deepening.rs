//! Iterative deepening search with negamax alpha-beta pruning.
//!
//! Each iteration searches the previous iteration's best move first, so the
//! deeper passes prune harder. Automatic draws score zero inside the tree.

use crate::game_state::game_state::GameState;
use crate::move_generation::draw_rules::{
    is_fifty_move_draw, is_insufficient_material, is_repetition_draw,
};
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::move_generator::{GeneratedMove, MoveGenResult, MoveGenerator};
use crate::moves::move_descriptions::{move_captured_piece, move_promotion_piece};
use crate::search::board_scoring::{BoardScorer, MATE_SCORE};

#[derive(Debug, Clone, Copy)]
pub struct SearchConfig {
    pub max_depth: u8,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self { max_depth: 3 }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SearchResult {
    pub best_move: Option<u64>,
    pub best_score: i32,
    pub reached_depth: u8,
    pub nodes: u64,
    /// Root moves that tied for the best score in the final iteration.
    pub tied_moves: Vec<u64>,
}

pub fn iterative_deepening_search<G: MoveGenerator, S: BoardScorer>(
    game_state: &GameState,
    generator: &G,
    scorer: &S,
    config: SearchConfig,
) -> MoveGenResult<SearchResult> {
    if config.max_depth == 0 {
        return Ok(SearchResult {
            best_score: scorer.score(game_state),
            nodes: 1,
            ..SearchResult::default()
        });
    }

    let mut root_moves = generator.generate_legal_moves(game_state)?;
    if root_moves.is_empty() {
        return Ok(SearchResult {
            best_score: terminal_score(game_state, 0),
            nodes: 1,
            ..SearchResult::default()
        });
    }
    order_moves(&mut root_moves);

    let mut result = SearchResult::default();

    for depth in 1..=config.max_depth {
        let mut nodes = 0u64;
        let mut alpha = -MATE_SCORE - 1;
        let mut best_score = -MATE_SCORE - 1;
        let mut tied_moves = Vec::new();

        for mv in &root_moves {
            // Search ties with a widened window so equal moves keep exact scores.
            let score = -negamax(
                &mv.game_after_move,
                generator,
                scorer,
                depth - 1,
                -MATE_SCORE - 1,
                -(alpha - 1),
                1,
                &mut nodes,
            )?;

            if score > best_score {
                best_score = score;
                tied_moves.clear();
                tied_moves.push(mv.move_description);
            } else if score == best_score {
                tied_moves.push(mv.move_description);
            }
            alpha = alpha.max(score);
        }

        // Principal move first for the next iteration.
        if let Some(&best) = tied_moves.first() {
            if let Some(index) = root_moves.iter().position(|m| m.move_description == best) {
                let principal = root_moves.remove(index);
                root_moves.insert(0, principal);
            }
        }

        result = SearchResult {
            best_move: tied_moves.first().copied(),
            best_score,
            reached_depth: depth,
            nodes,
            tied_moves,
        };
    }

    Ok(result)
}

#[allow(clippy::too_many_arguments)]
fn negamax<G: MoveGenerator, S: BoardScorer>(
    game_state: &GameState,
    generator: &G,
    scorer: &S,
    depth: u8,
    mut alpha: i32,
    beta: i32,
    ply: u8,
    nodes: &mut u64,
) -> MoveGenResult<i32> {
    *nodes += 1;

    if is_fifty_move_draw(game_state)
        || is_repetition_draw(game_state)
        || is_insufficient_material(game_state)
    {
        return Ok(0);
    }

    let mut moves = generator.generate_legal_moves(game_state)?;
    if moves.is_empty() {
        // Terminal positions dominate material even at the horizon, so mating
        // lines are always preferred.
        return Ok(terminal_score(game_state, ply));
    }
    if depth == 0 {
        return Ok(scorer.score(game_state));
    }

    order_moves(&mut moves);
    let mut best = -MATE_SCORE;

    for mv in moves {
        let score = -negamax(
            &mv.game_after_move,
            generator,
            scorer,
            depth - 1,
            -beta,
            -alpha,
            ply.saturating_add(1),
            nodes,
        )?;

        best = best.max(score);
        alpha = alpha.max(score);
        if alpha >= beta {
            break;
        }
    }

    Ok(best)
}

/// Captures and promotions first, most valuable victim first.
fn order_moves(moves: &mut [GeneratedMove]) {
    moves.sort_by_key(|m| {
        let victim = move_captured_piece(m.move_description).map_or(0, |p| p.index() as i32 + 1);
        let promotion = move_promotion_piece(m.move_description).map_or(0, |p| p.index() as i32);
        -(victim * 10 + promotion)
    });
}

fn terminal_score(game_state: &GameState, ply: u8) -> i32 {
    if is_king_in_check(game_state, game_state.side_to_move) {
        -MATE_SCORE + i32::from(ply)
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::{iterative_deepening_search, SearchConfig};
    use crate::game_state::game_state::GameState;
    use crate::move_generation::legal_move_generator::LegalMoveGenerator;
    use crate::moves::move_descriptions::{move_from, move_to};
    use crate::search::board_scoring::{MaterialScorer, MATE_SCORE};

    #[test]
    fn search_depth_zero_returns_eval_only() {
        let game = GameState::new_game();
        let result = iterative_deepening_search(
            &game,
            &LegalMoveGenerator,
            &MaterialScorer,
            SearchConfig { max_depth: 0 },
        )
        .expect("search should run");

        assert_eq!(result.best_move, None);
        assert_eq!(result.best_score, 0);
        assert_eq!(result.reached_depth, 0);
    }

    #[test]
    fn search_prefers_winning_capture() {
        // The white queen on f1 can take the undefended black queen on e2.
        let game =
            GameState::from_fen("4k3/8/8/8/8/8/4q3/4KQ2 w - - 0 1").expect("FEN should parse");
        let result = iterative_deepening_search(
            &game,
            &LegalMoveGenerator,
            &MaterialScorer,
            SearchConfig { max_depth: 2 },
        )
        .expect("search should run");

        let best = result.best_move.expect("a move should be found");
        assert_eq!(move_to(best), 12);
        assert_eq!(result.reached_depth, 2);
    }

    #[test]
    fn search_finds_mate_in_one() {
        // Ra1-a8 mates the boxed-in king.
        let game = GameState::from_fen("6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1").expect("FEN should parse");
        let result = iterative_deepening_search(
            &game,
            &LegalMoveGenerator,
            &MaterialScorer,
            SearchConfig { max_depth: 2 },
        )
        .expect("search should run");

        let best = result.best_move.expect("a move should be found");
        assert_eq!((move_from(best), move_to(best)), (0, 56));
        assert!(result.best_score > MATE_SCORE - 10);
        assert_eq!(result.tied_moves, vec![best]);
    }

    #[test]
    fn search_with_no_moves_reports_none() {
        let mated = GameState::from_fen("7k/6Q1/6K1/8/8/8/8/8 b - - 0 1").expect("FEN should parse");
        let result = iterative_deepening_search(
            &mated,
            &LegalMoveGenerator,
            &MaterialScorer,
            SearchConfig::default(),
        )
        .expect("search should run");
        assert_eq!(result.best_move, None);
        assert_eq!(result.best_score, -MATE_SCORE);
    }
}
