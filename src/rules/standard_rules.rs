//! Standard chess rules over the bitboard `GameState`.

use tracing::error;

use crate::game_state::chess_types::{Color, PieceKind};
use crate::game_state::game_state::GameState;
use crate::move_generation::draw_rules;
use crate::move_generation::legal_move_checks;
use crate::move_generation::legal_move_generator::LegalMoveGenerator;
use crate::move_generation::move_generator::{GeneratedMove, MoveGenerator};
use crate::moves::move_descriptions::{move_from, move_promotion_piece, move_to};
use crate::rules::board_square::BoardSquare;
use crate::rules::chess_move::ChessMove;
use crate::rules::rules_trait::{Rules, RulesError, RulesResult};

#[derive(Debug, Clone)]
pub struct StandardRules {
    state: GameState,
    move_log: Vec<ChessMove>,
}

impl Default for StandardRules {
    fn default() -> Self {
        Self::new_game()
    }
}

impl StandardRules {
    pub fn new_game() -> Self {
        Self::from_game_state(GameState::new_game())
    }

    pub fn from_fen(fen: &str) -> RulesResult<Self> {
        GameState::from_fen(fen)
            .map(Self::from_game_state)
            .map_err(RulesError::InvalidFen)
    }

    pub fn from_game_state(state: GameState) -> Self {
        Self {
            state,
            move_log: Vec::new(),
        }
    }

    #[inline]
    pub fn game_state(&self) -> &GameState {
        &self.state
    }

    #[inline]
    pub fn fen(&self) -> String {
        self.state.get_fen()
    }

    /// Moves applied since construction, oldest first.
    #[inline]
    pub fn move_log(&self) -> &[ChessMove] {
        &self.move_log
    }

    fn generated_moves(&self) -> RulesResult<Vec<GeneratedMove>> {
        LegalMoveGenerator
            .generate_legal_moves(&self.state)
            .map_err(|err| {
                error!(fen = %self.state.get_fen(), error = %err, "move generation failed");
                RulesError::from(err)
            })
    }
}

/// Board-coordinate view of a packed move description.
pub fn chess_move_from_description(move_description: u64) -> Option<ChessMove> {
    Some(ChessMove {
        from: BoardSquare::from_index(move_from(move_description))?,
        to: BoardSquare::from_index(move_to(move_description))?,
        promotion: move_promotion_piece(move_description),
    })
}

impl Rules for StandardRules {
    fn piece_at(&self, square: BoardSquare) -> Option<(Color, PieceKind)> {
        self.state.piece_on(square.index())
    }

    fn side_to_move(&self) -> Color {
        self.state.side_to_move
    }

    fn ply_count(&self) -> usize {
        self.move_log.len()
    }

    fn legal_moves(&self) -> RulesResult<Vec<ChessMove>> {
        Ok(self
            .generated_moves()?
            .iter()
            .filter_map(|m| chess_move_from_description(m.move_description))
            .collect())
    }

    fn is_check(&self) -> bool {
        legal_move_checks::is_king_in_check(&self.state, self.state.side_to_move)
    }

    fn is_checkmate(&self) -> RulesResult<bool> {
        Ok(self.is_check() && self.generated_moves()?.is_empty())
    }

    fn is_stalemate(&self) -> RulesResult<bool> {
        Ok(!self.is_check() && self.generated_moves()?.is_empty())
    }

    fn is_insufficient_material(&self) -> bool {
        draw_rules::is_insufficient_material(&self.state)
    }

    fn is_fifty_moves(&self) -> bool {
        draw_rules::is_fifty_move_draw(&self.state)
    }

    fn is_repetition(&self) -> bool {
        draw_rules::is_repetition_draw(&self.state)
    }

    fn last_move(&self) -> Option<ChessMove> {
        self.move_log.last().copied()
    }

    fn king_square(&self, color: Color) -> Option<BoardSquare> {
        legal_move_checks::king_square(&self.state, color).and_then(BoardSquare::from_index)
    }

    fn apply_move(&mut self, chess_move: &ChessMove) -> RulesResult<()> {
        let next = self
            .generated_moves()?
            .into_iter()
            .find(|m| chess_move_from_description(m.move_description).as_ref() == Some(chess_move))
            .ok_or(RulesError::IllegalMove(*chess_move))?;

        self.state = next.game_after_move;
        self.move_log.push(*chess_move);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::StandardRules;
    use crate::game_state::chess_types::{Color, PieceKind};
    use crate::game_state::game_state::GameState;
    use crate::rules::board_square::BoardSquare;
    use crate::rules::chess_move::ChessMove;
    use crate::rules::rules_trait::{Rules, RulesError};

    fn mv(text: &str) -> ChessMove {
        text.parse().expect("move text should parse")
    }

    fn play(rules: &mut StandardRules, moves: &[&str]) {
        for text in moves {
            rules.apply_move(&mv(text)).expect("scripted move should be legal");
        }
    }

    #[test]
    fn start_position_queries() {
        let rules = StandardRules::new_game();
        assert_eq!(rules.side_to_move(), Color::Light);
        assert_eq!(rules.ply_count(), 0);
        assert_eq!(rules.legal_moves().expect("moves").len(), 20);
        assert_eq!(rules.last_move(), None);
        assert_eq!(
            rules.piece_at("e2".parse().expect("e2")),
            Some((Color::Light, PieceKind::Pawn))
        );
        assert_eq!(rules.king_square(Color::Dark), "e8".parse::<BoardSquare>().ok());
    }

    #[test]
    fn illegal_move_leaves_position_untouched() {
        let mut rules = StandardRules::new_game();
        let before = rules.fen();
        assert_eq!(
            rules.apply_move(&mv("e2e5")),
            Err(RulesError::IllegalMove(mv("e2e5")))
        );
        assert_eq!(rules.fen(), before);
        assert_eq!(rules.ply_count(), 0);
    }

    #[test]
    fn applied_moves_grow_history_by_one_ply() {
        let mut rules = StandardRules::new_game();
        play(&mut rules, &["e2e4"]);
        assert_eq!(rules.ply_count(), 1);
        assert_eq!(rules.last_move(), Some(mv("e2e4")));
        assert_eq!(rules.side_to_move(), Color::Dark);
    }

    #[test]
    fn promotion_requires_explicit_piece() {
        let rules = StandardRules::from_fen("8/P7/8/8/8/8/8/k3K3 w - - 0 1").expect("FEN");
        assert_eq!(rules.is_legal(&mv("a7a8")), Ok(false));
        assert_eq!(rules.is_legal(&mv("a7a8n")), Ok(true));
        assert_eq!(
            rules
                .legal_moves()
                .expect("moves")
                .iter()
                .filter(|m| m.connects(mv("a7a8").from, mv("a7a8").to))
                .count(),
            4
        );
    }

    #[test]
    fn castling_is_the_kings_two_square_move() {
        let mut rules =
            StandardRules::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").expect("FEN");
        play(&mut rules, &["e1g1"]);
        assert_eq!(
            rules.piece_at("f1".parse().expect("f1")),
            Some((Color::Light, PieceKind::Rook))
        );
    }

    #[test]
    fn fools_mate_is_checkmate() {
        let mut rules = StandardRules::new_game();
        play(&mut rules, &["f2f3", "e7e5", "g2g4", "d8h4"]);
        assert!(rules.is_check());
        assert_eq!(rules.is_checkmate(), Ok(true));
        assert_eq!(rules.is_stalemate(), Ok(false));
    }

    #[test]
    fn cornered_king_is_stalemated() {
        let rules = StandardRules::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").expect("FEN");
        assert_eq!(rules.is_stalemate(), Ok(true));
        assert_eq!(rules.is_checkmate(), Ok(false));
    }

    #[test]
    fn bare_kings_are_insufficient_for_either_side_to_move() {
        for fen in ["4k3/8/8/8/8/8/8/4K3 w - - 0 1", "4k3/8/8/8/8/8/8/4K3 b - - 0 1"] {
            let rules = StandardRules::from_fen(fen).expect("FEN");
            assert!(rules.is_insufficient_material());
        }
    }

    #[test]
    fn fifty_move_rule_triggers_at_one_hundred_halfmoves() {
        let mut rules = StandardRules::from_fen("4k3/8/8/8/8/8/8/R3K3 w - - 99 70").expect("FEN");
        assert!(!rules.is_fifty_moves());
        play(&mut rules, &["a1a2"]);
        assert!(rules.is_fifty_moves());
    }

    #[test]
    fn knight_shuffle_repeats_the_start_position() {
        let mut rules = StandardRules::new_game();
        let shuffle = ["g1f3", "g8f6", "f3g1", "f6g8"];
        play(&mut rules, &shuffle);
        assert!(!rules.is_repetition());
        play(&mut rules, &shuffle);
        assert!(rules.is_repetition());
    }

    #[test]
    fn inconsistent_position_is_an_error_not_a_stalemate() {
        let mut state = GameState::new_game();
        state.occupancy_all = 0;
        let mut rules = StandardRules::from_game_state(state);

        assert!(matches!(rules.legal_moves(), Err(RulesError::Generation(_))));
        assert!(matches!(rules.is_stalemate(), Err(RulesError::Generation(_))));
        assert!(matches!(rules.is_checkmate(), Err(RulesError::Generation(_))));
        assert!(matches!(
            rules.apply_move(&mv("e2e4")),
            Err(RulesError::Generation(_))
        ));
        assert_eq!(rules.ply_count(), 0);
    }

    #[test]
    fn malformed_fen_is_rejected() {
        assert!(matches!(
            StandardRules::from_fen("not a fen"),
            Err(RulesError::InvalidFen(_))
        ));
    }
}
