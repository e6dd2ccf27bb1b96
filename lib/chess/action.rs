use crate::chess::{Board, Castle, Color, Move, Piece, Square};
use arrayvec::ArrayVec;
use derive_more::{Display, From};

/// An action a player may take on their turn.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash, From)]
pub enum Action {
    #[display(fmt = "{}", _0)]
    Move(Move),
    #[display(fmt = "{}", _0)]
    Castle(Castle),
}

impl Action {
    /// The side taking this action.
    pub fn side(&self) -> Color {
        match self {
            Action::Move(m) => m.piece().color(),
            Action::Castle(c) => c.side(),
        }
    }

    /// Where the moving piece (the king, if castling) starts.
    pub fn whence(&self) -> Square {
        match self {
            Action::Move(m) => m.whence(),
            Action::Castle(c) => c.whence(),
        }
    }

    /// Where the moving piece (the king, if castling) ends.
    pub fn whither(&self) -> Square {
        match self {
            Action::Move(m) => m.whither(),
            Action::Castle(c) => c.whither(),
        }
    }

    /// The [`Piece`] captured, if any.
    pub fn capture(&self) -> Option<Piece> {
        match self {
            Action::Move(m) => m.capture(),
            Action::Castle(_) => None,
        }
    }

    /// The single-piece moves this action consists of.
    pub fn moves(&self) -> ArrayVec<Move, 3> {
        match self {
            Action::Move(m) => ArrayVec::from_iter([*m]),
            Action::Castle(c) => ArrayVec::from(c.moves()),
        }
    }

    /// Commits this action to the board.
    pub fn execute(&self, board: &mut Board) {
        match self {
            Action::Move(m) => m.execute(board),
            Action::Castle(c) => c.execute(board),
        }
    }

    /// Reverts this action on the board.
    pub fn undo(&self, board: &mut Board) {
        match self {
            Action::Move(m) => m.undo(board),
            Action::Castle(c) => c.undo(board),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chess::{Castles, Wing};

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }

    #[test]
    fn move_action_consists_of_a_single_move() {
        let mut b = Board::default();
        let m = Move::new(&mut b, Color::White, sq("e2"), sq("e4"), false, None).unwrap();
        let a = Action::from(m);

        assert_eq!(a.side(), Color::White);
        assert_eq!(a.whence(), sq("e2"));
        assert_eq!(a.whither(), sq("e4"));
        assert_eq!(a.moves().as_slice(), &[m]);
        assert_eq!(a.to_string(), "e2e4");
    }

    #[test]
    fn castle_action_consists_of_three_moves() {
        let mut b: Board = "R...K..R/......../......../......../......../......../......../r...k..r"
            .parse()
            .unwrap();

        let c = Castle::new(&mut b, Color::Black, Wing::Long, Castles::all()).unwrap();
        let a = Action::from(c);

        assert_eq!(a.side(), Color::Black);
        assert_eq!(a.whence(), sq("e8"));
        assert_eq!(a.whither(), sq("c8"));
        assert_eq!(a.moves().len(), 3);
        assert_eq!(a.capture(), None);

        let before = b;
        a.execute(&mut b);
        assert_ne!(b, before);
        a.undo(&mut b);
        assert_eq!(b, before);
    }
}
