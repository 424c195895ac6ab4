//! Long algebraic move text (`e2e4`, `e7e8n`).

use crate::game_state::chess_types::{PieceKind, Square};
use crate::moves::move_descriptions::{move_from, move_promotion_piece, move_to};
use crate::utils::algebraic::{algebraic_to_square, square_to_algebraic};

pub fn move_description_to_long_algebraic(move_description: u64) -> Result<String, String> {
    format_long_algebraic(
        move_from(move_description),
        move_to(move_description),
        move_promotion_piece(move_description),
    )
}

pub fn format_long_algebraic(
    from: Square,
    to: Square,
    promotion: Option<PieceKind>,
) -> Result<String, String> {
    let mut out = String::with_capacity(5);
    out.push_str(&square_to_algebraic(from)?);
    out.push_str(&square_to_algebraic(to)?);

    if let Some(piece) = promotion {
        if !piece.is_promotion_choice() {
            return Err(format!("Invalid promotion piece: {piece:?}"));
        }
        out.push(piece.letter());
    }

    Ok(out)
}

/// Split long algebraic text into origin, destination, and promotion piece.
pub fn parse_long_algebraic(text: &str) -> Result<(Square, Square, Option<PieceKind>), String> {
    let text = text.trim();
    if !text.is_ascii() || (text.len() != 4 && text.len() != 5) {
        return Err(format!("Invalid long algebraic move: {text}"));
    }

    let from = algebraic_to_square(&text[0..2])?;
    let to = algebraic_to_square(&text[2..4])?;

    let promotion = match text[4..].chars().next() {
        None => None,
        Some(ch) => match PieceKind::from_letter(ch) {
            Some(piece) if piece.is_promotion_choice() => Some(piece),
            _ => return Err(format!("Invalid promotion piece: {ch}")),
        },
    };

    Ok((from, to, promotion))
}
