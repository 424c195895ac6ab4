use std::sync::Arc;
use std::thread;

use crate::game_state::game_state::GameState;
use crate::move_generation::move_generator::{
    GeneratedMove, MoveGenResult, MoveGenerationError, MoveGenerator,
};
use crate::moves::move_descriptions::{
    move_promotion_piece, FLAG_CAPTURE, FLAG_CASTLING, FLAG_EN_PASSANT,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: usize,
    pub captures: usize,
    pub en_passant: usize,
    pub castles: usize,
    pub promotions: usize,
}

impl PerftCounts {
    fn merge(&mut self, rhs: PerftCounts) {
        self.nodes += rhs.nodes;
        self.captures += rhs.captures;
        self.en_passant += rhs.en_passant;
        self.castles += rhs.castles;
        self.promotions += rhs.promotions;
    }

    fn record_leaf(&mut self, move_description: u64) {
        self.nodes += 1;
        if move_description & FLAG_CAPTURE != 0 {
            self.captures += 1;
        }
        if move_description & FLAG_EN_PASSANT != 0 {
            self.en_passant += 1;
        }
        if move_description & FLAG_CASTLING != 0 {
            self.castles += 1;
        }
        if move_promotion_piece(move_description).is_some() {
            self.promotions += 1;
        }
    }
}

pub fn perft<G: MoveGenerator>(
    generator: &G,
    game_state: &GameState,
    depth: u8,
) -> MoveGenResult<PerftCounts> {
    if depth == 0 {
        return Ok(PerftCounts {
            nodes: 1,
            ..PerftCounts::default()
        });
    }

    let mut total = PerftCounts::default();
    for mv in generator.generate_legal_moves(game_state)? {
        perft_recurse(generator, &mv, depth - 1, &mut total)?;
    }
    Ok(total)
}

/// Splits the root moves across one thread each.
pub fn perft_multi_threaded(
    generator: Arc<dyn MoveGenerator>,
    game_state: &GameState,
    depth: u8,
) -> MoveGenResult<PerftCounts> {
    if depth == 0 {
        return Ok(PerftCounts {
            nodes: 1,
            ..PerftCounts::default()
        });
    }

    let root_moves = generator.generate_legal_moves(game_state)?;
    let mut handles = Vec::with_capacity(root_moves.len());

    for mv in root_moves {
        let generator_ref = Arc::clone(&generator);
        handles.push(thread::spawn(move || {
            let mut local = PerftCounts::default();
            let result = perft_recurse(generator_ref.as_ref(), &mv, depth - 1, &mut local);
            (result, local)
        }));
    }

    let mut total = PerftCounts::default();
    for handle in handles {
        let (result, local) = handle.join().map_err(|_| {
            MoveGenerationError::InvalidState("perft worker thread panicked".to_owned())
        })?;
        result?;
        total.merge(local);
    }

    Ok(total)
}

fn perft_recurse<G: MoveGenerator + ?Sized>(
    generator: &G,
    mv: &GeneratedMove,
    remaining: u8,
    counts: &mut PerftCounts,
) -> MoveGenResult<()> {
    if remaining == 0 {
        counts.record_leaf(mv.move_description);
        return Ok(());
    }

    for child in generator.generate_legal_moves(&mv.game_after_move)? {
        perft_recurse(generator, &child, remaining - 1, counts)?;
    }
    Ok(())
}
