//! Turns an origin/destination pair into at most one applied move.
//!
//! The arbiter is the only session component that mutates the position, and
//! it never guesses a promotion piece.

use tracing::{debug, warn};

use crate::game_state::chess_types::{Color, PieceKind};
use crate::rules::board_square::BoardSquare;
use crate::rules::chess_move::ChessMove;
use crate::rules::rules_trait::{Rules, RulesResult};
use crate::session::session_state::PendingPromotion;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArbiterVerdict {
    Applied(ChessMove),
    RequiresPromotionChoice(PendingPromotion),
    Illegal,
}

/// Whether moving `origin` to `destination` is a promotion by `player_color`
/// that the rules would accept with some piece.
fn is_promotion_move<R: Rules + ?Sized>(
    rules: &R,
    origin: BoardSquare,
    destination: BoardSquare,
    player_color: Color,
) -> RulesResult<bool> {
    if rules.piece_at(origin) != Some((player_color, PieceKind::Pawn))
        || destination.rank() != player_color.promotion_rank()
    {
        return Ok(false);
    }
    Ok(rules
        .legal_moves()?
        .iter()
        .any(|m| m.connects(origin, destination)))
}

/// Applies `origin -> destination` when legal. The position is untouched
/// unless the verdict is `Applied`, in which case it grew by exactly one ply.
pub fn attempt_move<R: Rules + ?Sized>(
    rules: &mut R,
    origin: BoardSquare,
    destination: BoardSquare,
    player_color: Color,
) -> RulesResult<ArbiterVerdict> {
    if is_promotion_move(rules, origin, destination, player_color)? {
        debug!(%origin, %destination, "promotion needs a piece choice");
        return Ok(ArbiterVerdict::RequiresPromotionChoice(PendingPromotion {
            origin,
            destination,
        }));
    }

    let candidate = ChessMove::new(origin, destination);
    if !rules.is_legal(&candidate)? {
        debug!(%candidate, "illegal move attempt");
        return Ok(ArbiterVerdict::Illegal);
    }

    rules.apply_move(&candidate)?;
    Ok(ArbiterVerdict::Applied(candidate))
}

/// Applies the pending promotion with the chosen piece. Any of queen, rook,
/// bishop or knight is accepted.
pub fn commit_promotion<R: Rules + ?Sized>(
    rules: &mut R,
    pending: PendingPromotion,
    piece: PieceKind,
) -> RulesResult<ArbiterVerdict> {
    let candidate = ChessMove::with_promotion(pending.origin, pending.destination, piece);
    if !piece.is_promotion_choice() || !rules.is_legal(&candidate)? {
        warn!(%candidate, "promotion commit rejected");
        return Ok(ArbiterVerdict::Illegal);
    }

    rules.apply_move(&candidate)?;
    Ok(ArbiterVerdict::Applied(candidate))
}
