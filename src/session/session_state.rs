//! The session aggregate and the read-only snapshot handed to presentation.

use crate::engines::difficulty::Difficulty;
use crate::game_state::chess_types::Color;
use crate::rules::board_square::BoardSquare;
use crate::rules::chess_move::ChessMove;
use crate::rules::rules_trait::Rules;
use crate::session::input_translator::Orientation;
use crate::session::selection::SelectionState;
use crate::session::termination::GameOutcome;

pub const MENU_PROMPT: &str = "Select difficulty and start the game";
pub const PROMOTION_PROMPT: &str = "Choose promotion piece: q, r, b or n";

pub fn your_turn_text(player_color: Color) -> String {
    format!("Your turn ({})", player_color.display_name())
}

pub fn bot_turn_text(engine_color: Color) -> String {
    format!("Bot's turn ({})", engine_color.display_name())
}

pub fn thinking_text(difficulty: Difficulty) -> String {
    format!("Bot is thinking... ({difficulty} difficulty)")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionMode {
    Menu,
    AwaitingSelection,
    PendingDestination,
    AwaitingPromotionChoice,
    EngineTurn,
    GameOver,
}

/// A pawn move to the far rank that still needs its piece type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingPromotion {
    pub origin: BoardSquare,
    pub destination: BoardSquare,
}

#[derive(Debug, Clone)]
pub struct SessionState<R> {
    pub mode: SessionMode,
    pub position: R,
    pub orientation: Orientation,
    pub selection: SelectionState,
    pub pending_promotion: Option<PendingPromotion>,
    pub outcome: GameOutcome,
    pub status: String,
    pub difficulty: Difficulty,
    pub player_color: Color,
}

impl<R> SessionState<R> {
    /// A session sitting on the start menu.
    pub fn at_menu(
        position: R,
        player_color: Color,
        orientation: Orientation,
        difficulty: Difficulty,
    ) -> Self {
        Self {
            mode: SessionMode::Menu,
            position,
            orientation,
            selection: SelectionState::default(),
            pending_promotion: None,
            outcome: GameOutcome::Ongoing,
            status: MENU_PROMPT.to_owned(),
            difficulty,
            player_color,
        }
    }

    #[inline]
    pub fn engine_color(&self) -> Color {
        self.player_color.opposite()
    }
}

/// Everything a presentation needs to draw one frame.
#[derive(Debug)]
pub struct SessionSnapshot<'a, R> {
    pub position: &'a R,
    pub mode: SessionMode,
    pub orientation: Orientation,
    pub selected: Option<BoardSquare>,
    pub pending_promotion: Option<PendingPromotion>,
    pub status: &'a str,
    pub outcome: GameOutcome,
    pub last_move: Option<ChessMove>,
    pub checked_king: Option<BoardSquare>,
    pub difficulty: Difficulty,
    pub player_color: Color,
}

impl<'a, R: Rules> SessionSnapshot<'a, R> {
    pub fn of(state: &'a SessionState<R>) -> Self {
        let position = &state.position;
        let checked_king = if position.is_check() {
            position.king_square(position.side_to_move())
        } else {
            None
        };

        Self {
            position,
            mode: state.mode,
            orientation: state.orientation,
            selected: state.selection.selected(),
            pending_promotion: state.pending_promotion,
            status: &state.status,
            outcome: state.outcome,
            last_move: position.last_move(),
            checked_king,
            difficulty: state.difficulty,
            player_color: state.player_color,
        }
    }

    #[inline]
    pub fn is_awaiting_promotion(&self) -> bool {
        self.pending_promotion.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::{thinking_text, your_turn_text, SessionSnapshot, SessionState, MENU_PROMPT};
    use crate::engines::difficulty::Difficulty;
    use crate::game_state::chess_types::Color;
    use crate::rules::rules_trait::Rules;
    use crate::rules::standard_rules::StandardRules;
    use crate::session::input_translator::Orientation;

    #[test]
    fn status_texts_match_the_menu_wording() {
        assert_eq!(your_turn_text(Color::Dark), "Your turn (Black)");
        assert_eq!(
            thinking_text(Difficulty::Hard),
            "Bot is thinking... (hard difficulty)"
        );
    }

    #[test]
    fn snapshot_marks_the_checked_king() {
        let mut rules = StandardRules::new_game();
        for text in ["f2f3", "e7e5", "g2g4", "d8h4"] {
            rules
                .apply_move(&text.parse().expect("move"))
                .expect("scripted move should be legal");
        }
        let state = SessionState::at_menu(
            rules,
            Color::Light,
            Orientation::WhiteAtBottom,
            Difficulty::Easy,
        );
        let snapshot = SessionSnapshot::of(&state);
        assert_eq!(snapshot.status, MENU_PROMPT);
        assert_eq!(snapshot.checked_king, "e1".parse().ok());
        assert_eq!(snapshot.last_move, "d8h4".parse().ok());
        assert!(!snapshot.is_awaiting_promotion());
    }
}
