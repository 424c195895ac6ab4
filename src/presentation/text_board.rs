//! Terminal-oriented Unicode board presentation.
//!
//! Draws a session snapshot as text: the board in the current orientation,
//! markers for the selection, last move, and a checked king, then the status
//! lines.

use std::io::{self, Write};

use crate::engines::difficulty::Difficulty;
use crate::game_state::chess_types::{Color, PieceKind};
use crate::presentation::presentation_trait::Presentation;
use crate::rules::board_square::BoardSquare;
use crate::rules::rules_trait::Rules;
use crate::session::session_state::{SessionMode, SessionSnapshot};

/// Render the board and status lines to a string.
pub fn render_snapshot<R: Rules>(snapshot: &SessionSnapshot<'_, R>) -> String {
    let flipped = snapshot.orientation.is_flipped();
    let files: Vec<u8> = if flipped {
        (0..8).rev().collect()
    } else {
        (0..8).collect()
    };
    let ranks: Vec<u8> = if flipped {
        (0..8).collect()
    } else {
        (0..8).rev().collect()
    };

    let file_labels: String = files
        .iter()
        .map(|&file| format!(" {} ", char::from(b'a' + file)))
        .collect();

    let mut out = String::new();
    out.push_str(&format!("  {file_labels}\n"));

    for &rank in &ranks {
        let rank_label = char::from(b'1' + rank);
        out.push(rank_label);
        out.push(' ');

        for &file in &files {
            let Some(square) = BoardSquare::new(file, rank) else {
                continue;
            };
            let (left, right) = square_markers(snapshot, square);
            let piece = snapshot
                .position
                .piece_at(square)
                .map_or('·', |(color, kind)| piece_to_unicode(color, kind));
            out.push(left);
            out.push(piece);
            out.push(right);
        }

        out.push(' ');
        out.push(rank_label);
        out.push('\n');
    }

    out.push_str(&format!("  {file_labels}\n"));

    if snapshot.mode == SessionMode::Menu {
        out.push_str(&format!("Difficulty: {}\n", menu_choices(snapshot.difficulty)));
    } else {
        out.push_str(&format!(
            "Difficulty: {} | You play: {}\n",
            snapshot.difficulty,
            snapshot.player_color.display_name()
        ));
    }
    out.push_str(snapshot.status);
    out.push('\n');

    out
}

/// Brackets around the selection, `!` around a checked king, and
/// parentheses around the last move's squares.
fn square_markers<R>(snapshot: &SessionSnapshot<'_, R>, square: BoardSquare) -> (char, char) {
    if snapshot.selected == Some(square) {
        ('[', ']')
    } else if snapshot.checked_king == Some(square) {
        ('!', '!')
    } else if snapshot
        .last_move
        .is_some_and(|m| m.from == square || m.to == square)
    {
        ('(', ')')
    } else {
        (' ', ' ')
    }
}

fn menu_choices(selected: Difficulty) -> String {
    Difficulty::ALL
        .iter()
        .map(|&d| {
            if d == selected {
                format!("[{d}]")
            } else {
                d.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn piece_to_unicode(color: Color, piece: PieceKind) -> char {
    match (color, piece) {
        (Color::Light, PieceKind::Pawn) => '♙',
        (Color::Light, PieceKind::Knight) => '♘',
        (Color::Light, PieceKind::Bishop) => '♗',
        (Color::Light, PieceKind::Rook) => '♖',
        (Color::Light, PieceKind::Queen) => '♕',
        (Color::Light, PieceKind::King) => '♔',
        (Color::Dark, PieceKind::Pawn) => '♟',
        (Color::Dark, PieceKind::Knight) => '♞',
        (Color::Dark, PieceKind::Bishop) => '♝',
        (Color::Dark, PieceKind::Rook) => '♜',
        (Color::Dark, PieceKind::Queen) => '♛',
        (Color::Dark, PieceKind::King) => '♚',
    }
}

/// Writes each snapshot to `W` as a text frame.
pub struct TextPresentation<W: Write> {
    writer: W,
}

impl<W: Write> TextPresentation<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    #[inline]
    pub fn writer_mut(&mut self) -> &mut W {
        &mut self.writer
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<R: Rules, W: Write> Presentation<R> for TextPresentation<W> {
    fn render(&mut self, snapshot: &SessionSnapshot<'_, R>) -> io::Result<()> {
        writeln!(self.writer)?;
        self.writer.write_all(render_snapshot(snapshot).as_bytes())?;
        self.writer.flush()
    }
}
