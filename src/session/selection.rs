use crate::rules::board_square::BoardSquare;

/// The origin square the player has picked, if any. Every square, a1
/// included, is a real selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelectionState {
    selected: Option<BoardSquare>,
}

impl SelectionState {
    #[inline]
    pub fn selected(&self) -> Option<BoardSquare> {
        self.selected
    }

    #[inline]
    pub fn is_selected(&self, square: BoardSquare) -> bool {
        self.selected == Some(square)
    }

    #[inline]
    pub fn select(&mut self, square: BoardSquare) {
        self.selected = Some(square);
    }

    #[inline]
    pub fn clear(&mut self) {
        self.selected = None;
    }
}
