use crate::game_state::chess_types::Color;
use crate::rules::rules_trait::{Rules, RulesResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GameOutcome {
    #[default]
    Ongoing,
    CheckmateForPlayer,
    CheckmateForEngine,
    Stalemate,
    InsufficientMaterial,
    FiftyMoveDraw,
    RepetitionDraw,
}

impl GameOutcome {
    #[inline]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, GameOutcome::Ongoing)
    }

    pub const fn result_message(self) -> Option<&'static str> {
        match self {
            GameOutcome::Ongoing => None,
            GameOutcome::CheckmateForPlayer => Some("You win by checkmate!"),
            GameOutcome::CheckmateForEngine => Some("Bot wins by checkmate!"),
            GameOutcome::Stalemate => Some("Draw by stalemate!"),
            GameOutcome::InsufficientMaterial => Some("Draw by insufficient material!"),
            GameOutcome::FiftyMoveDraw => Some("Draw by fifty-move rule!"),
            GameOutcome::RepetitionDraw => Some("Draw by repetition!"),
        }
    }
}

/// Outcome of the current position. The first matching rule wins:
/// checkmate, stalemate, insufficient material, fifty moves, repetition.
/// An inconsistent position is an error, never an outcome.
pub fn evaluate<R: Rules + ?Sized>(rules: &R, player_color: Color) -> RulesResult<GameOutcome> {
    let outcome = if rules.is_checkmate()? {
        if rules.side_to_move() == player_color {
            GameOutcome::CheckmateForEngine
        } else {
            GameOutcome::CheckmateForPlayer
        }
    } else if rules.is_stalemate()? {
        GameOutcome::Stalemate
    } else if rules.is_insufficient_material() {
        GameOutcome::InsufficientMaterial
    } else if rules.is_fifty_moves() {
        GameOutcome::FiftyMoveDraw
    } else if rules.is_repetition() {
        GameOutcome::RepetitionDraw
    } else {
        GameOutcome::Ongoing
    };
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::{evaluate, GameOutcome};
    use crate::game_state::chess_types::Color;
    use crate::game_state::game_state::GameState;
    use crate::rules::rules_trait::{Rules, RulesError};
    use crate::rules::standard_rules::StandardRules;

    fn rules(fen: &str) -> StandardRules {
        StandardRules::from_fen(fen).expect("FEN should parse")
    }

    fn outcome<R: Rules>(rules: &R, player: Color) -> GameOutcome {
        evaluate(rules, player).expect("position should be consistent")
    }

    #[test]
    fn bare_kings_are_insufficient_whoever_moves() {
        for fen in ["8/8/4k3/8/8/3K4/8/8 w - - 0 1", "8/8/4k3/8/8/3K4/8/8 b - - 0 1"] {
            for player in [Color::Light, Color::Dark] {
                assert_eq!(outcome(&rules(fen), player), GameOutcome::InsufficientMaterial);
            }
        }
    }

    #[test]
    fn checkmate_is_attributed_by_side_to_move() {
        let mated_black = rules("R5k1/5ppp/8/8/8/8/8/6K1 b - - 0 1");
        assert_eq!(outcome(&mated_black, Color::Light), GameOutcome::CheckmateForPlayer);
        assert_eq!(outcome(&mated_black, Color::Dark), GameOutcome::CheckmateForEngine);
    }

    #[test]
    fn stalemate_outranks_insufficient_material() {
        // King and bishop against a stalemated bare king.
        let position = rules("k7/2K5/1B6/8/8/8/8/8 b - - 0 1");
        assert!(position.is_insufficient_material());
        assert_eq!(outcome(&position, Color::Light), GameOutcome::Stalemate);
    }

    #[test]
    fn fifty_moves_and_repetition_are_reported() {
        assert_eq!(
            outcome(&rules("4k3/8/8/8/8/8/8/R3K3 b - - 100 90"), Color::Light),
            GameOutcome::FiftyMoveDraw
        );

        let mut repeated = StandardRules::new_game();
        for _ in 0..2 {
            for text in ["b1c3", "b8c6", "c3b1", "c6b8"] {
                repeated
                    .apply_move(&text.parse().expect("move"))
                    .expect("shuffle move should be legal");
            }
        }
        assert_eq!(outcome(&repeated, Color::Light), GameOutcome::RepetitionDraw);
    }

    #[test]
    fn evaluation_is_idempotent_and_messages_exist() {
        let position = StandardRules::new_game();
        let first = outcome(&position, Color::Light);
        assert_eq!(Ok(first), evaluate(&position, Color::Light));
        assert_eq!(first, GameOutcome::Ongoing);
        assert!(!first.is_terminal());
        assert_eq!(first.result_message(), None);
        assert_eq!(
            GameOutcome::FiftyMoveDraw.result_message(),
            Some("Draw by fifty-move rule!")
        );
    }

    #[test]
    fn inconsistent_position_is_not_reported_as_stalemate() {
        let mut state = GameState::new_game();
        state.occupancy_all = 0;
        let broken = StandardRules::from_game_state(state);
        assert!(matches!(
            evaluate(&broken, Color::Light),
            Err(RulesError::Generation(_))
        ));
    }
}
