use crate::chess::Color;
use derive_more::Display;

/// One of the possible outcomes of a chess game.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub enum Outcome {
    /// The side to move has no legal moves and is in check.
    #[display(fmt = "checkmate by the {} player", _0)]
    Checkmate(Color),

    /// The side to move has no legal moves but is not in check.
    #[display(fmt = "stalemate")]
    Stalemate,
}

impl Outcome {
    /// Whether the outcome is a draw.
    pub fn is_draw(&self) -> bool {
        matches!(self, Outcome::Stalemate)
    }

    /// Whether one of the sides has won.
    pub fn is_decisive(&self) -> bool {
        !self.is_draw()
    }

    /// The winning side, if the outcome is [decisive](`Self::is_decisive`).
    pub fn winner(&self) -> Option<Color> {
        match *self {
            Outcome::Checkmate(c) => Some(c),
            Outcome::Stalemate => None,
        }
    }
}
