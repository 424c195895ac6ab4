use std::time::Duration;

use crate::engines::difficulty::Difficulty;
use crate::game_state::chess_types::Color;
use crate::session::input_translator::BoardGeometry;

#[derive(Debug, Clone, Copy)]
pub struct SessionConfig {
    pub player_color: Color,
    pub default_difficulty: Difficulty,
    /// Shortest time an engine turn may appear to take.
    pub min_think_time: Duration,
    pub geometry: BoardGeometry,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            player_color: Color::Light,
            default_difficulty: Difficulty::Medium,
            min_think_time: Duration::from_millis(500),
            geometry: BoardGeometry::default(),
        }
    }
}
