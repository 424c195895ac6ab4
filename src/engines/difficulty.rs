use std::fmt;
use std::str::FromStr;

use crate::engines::engine_greedy::GreedyEngine;
use crate::engines::engine_iterative::IterativeEngine;
use crate::engines::engine_trait::Engine;
use crate::rules::standard_rules::StandardRules;

/// Opponent strength offered on the start menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub const fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!("Unknown difficulty: {other} (expected easy, medium or hard)")),
        }
    }
}

/// Engine for a difficulty on the standard rules.
pub fn build_engine(difficulty: Difficulty) -> Box<dyn Engine<StandardRules>> {
    match difficulty {
        Difficulty::Easy => Box::new(GreedyEngine::new()),
        Difficulty::Medium => Box::new(IterativeEngine::new(2)),
        Difficulty::Hard => Box::new(IterativeEngine::new(3)),
    }
}
