use crate::chess::{Board, Castles, Color, File, InvalidNotation, Move, Piece, Rank, Role, Square};
use derive_more::{DebugCustom, Display};
use std::ops::Not;

/// The side of the board a king castles towards.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub enum Wing {
    /// Towards the h-file.
    #[display(fmt = "O-O")]
    Short,
    /// Towards the a-file.
    #[display(fmt = "O-O-O")]
    Long,
}

impl Wing {
    /// Both wings, short first.
    pub fn iter() -> impl DoubleEndedIterator<Item = Self> + ExactSizeIterator {
        [Wing::Short, Wing::Long].into_iter()
    }

    /// The [`File`] the rook starts on.
    #[inline(always)]
    pub fn rook_file(&self) -> File {
        match self {
            Wing::Short => File::H,
            Wing::Long => File::A,
        }
    }

    #[inline(always)]
    fn step(&self, sq: Square) -> Option<Square> {
        match self {
            Wing::Short => sq.right(),
            Wing::Long => sq.left(),
        }
    }
}

impl Not for Wing {
    type Output = Self;

    #[inline(always)]
    fn not(self) -> Self {
        match self {
            Wing::Short => Wing::Long,
            Wing::Long => Wing::Short,
        }
    }
}

/// A legal castling move.
///
/// The king travels two single steps towards the rook, each of which is
/// itself a legal [`Move`], and the rook lands on the square the king crossed.
#[derive(DebugCustom, Display, Copy, Clone, Eq, PartialEq, Hash)]
#[debug(fmt = "Castle({}, {})", side, wing)]
#[display(fmt = "{}", wing)]
pub struct Castle {
    side: Color,
    wing: Wing,
    king: [Move; 2],
    rook: Move,
}

impl Castle {
    /// Validates castling on `wing` on behalf of `side`.
    ///
    /// The intermediate king steps are applied to `board` to check whether
    /// the king would pass through an attacked square, and reverted before
    /// returning, so `board` is unchanged when this function returns.
    pub fn new(
        board: &mut Board,
        side: Color,
        wing: Wing,
        rights: Castles,
    ) -> Result<Self, InvalidNotation> {
        use InvalidNotation::*;

        if !rights.has(side, wing) {
            return Err(CastlingRightsLost);
        }

        let rank = Rank::First.perspective(side);
        let home = Square::new(File::E, rank);
        let corner = Square::new(wing.rook_file(), rank);

        if board[home] != Some(Piece(side, Role::King))
            || board[corner] != Some(Piece(side, Role::Rook))
        {
            return Err(CastlingRightsLost);
        }

        let mut between = wing.step(home);
        while let Some(sq) = between.filter(|&sq| sq != corner) {
            if board[sq].is_some() {
                return Err(CastlingBlocked);
            }

            between = wing.step(sq);
        }

        if board.in_check(side) {
            return Err(CastlingOutOfCheck);
        }

        let transit = wing.step(home).ok_or(CastlingBlocked)?;
        let destination = wing.step(transit).ok_or(CastlingBlocked)?;

        let first = Move::new(board, side, home, transit, false, None)
            .map_err(|_| CastlingThroughCheck)?;

        first.execute(board);
        let second = Move::new(board, side, transit, destination, false, None);
        let rook = second.map(|second| {
            second.execute(board);
            let rook = Move::new(board, side, corner, transit, false, None);
            second.undo(board);
            (second, rook)
        });
        first.undo(board);

        let (second, rook) = rook.map_err(|_| CastlingThroughCheck)?;

        Ok(Castle {
            side,
            wing,
            king: [first, second],
            rook: rook?,
        })
    }

    /// The side castling.
    #[inline(always)]
    pub fn side(&self) -> Color {
        self.side
    }

    /// The [`Wing`] castled towards.
    #[inline(always)]
    pub fn wing(&self) -> Wing {
        self.wing
    }

    /// The king's starting square.
    #[inline(always)]
    pub fn whence(&self) -> Square {
        self.king[0].whence()
    }

    /// The king's final square.
    #[inline(always)]
    pub fn whither(&self) -> Square {
        self.king[1].whither()
    }

    /// The constituent moves, in order of execution.
    pub fn moves(&self) -> [Move; 3] {
        [self.king[0], self.king[1], self.rook]
    }

    /// Commits the king steps and the rook move to the board.
    pub fn execute(&self, board: &mut Board) {
        for m in self.moves() {
            m.execute(board);
        }
    }

    /// Reverts the rook move and the king steps in reverse order.
    pub fn undo(&self, board: &mut Board) {
        for m in self.moves().into_iter().rev() {
            m.undo(board);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_strategy::proptest;

    fn board(rows: [&str; 8]) -> Board {
        let mut b = Board::empty();
        b.set_board_state(rows).unwrap();
        b
    }

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }

    fn open() -> Board {
        board([
            "R...K..R",
            "........",
            "........",
            "........",
            "........",
            "........",
            "........",
            "r...k..r",
        ])
    }

    #[proptest]
    fn castling_moves_king_two_squares_and_rook_next_to_it(side: Color, wing: Wing) {
        let mut b = open();
        let c = Castle::new(&mut b, side, wing, Castles::all())?;
        assert_eq!(b, open());

        let rank = Rank::First.perspective(side);
        let (king, rook) = match wing {
            Wing::Short => (File::G, File::F),
            Wing::Long => (File::C, File::D),
        };

        c.execute(&mut b);
        assert_eq!(b[Square::new(king, rank)], Some(Piece(side, Role::King)));
        assert_eq!(b[Square::new(rook, rank)], Some(Piece(side, Role::Rook)));
        assert_eq!(b[Square::new(File::E, rank)], None);
        assert_eq!(b[Square::new(wing.rook_file(), rank)], None);

        c.undo(&mut b);
        assert_eq!(b, open());
    }

    #[proptest]
    fn castling_requires_the_right(side: Color, wing: Wing) {
        let mut rights = Castles::all();
        rights.remove(Castles::right(side, wing));
        assert_eq!(
            Castle::new(&mut open(), side, wing, rights),
            Err(InvalidNotation::CastlingRightsLost)
        );
    }

    #[test]
    fn castling_requires_king_and_rook_on_home_squares() {
        let mut b = board([
            "....K...",
            "........",
            "........",
            "........",
            "........",
            "........",
            "........",
            "r..k...r",
        ]);

        assert_eq!(
            Castle::new(&mut b, Color::White, Wing::Short, Castles::all()),
            Err(InvalidNotation::CastlingRightsLost)
        );
    }

    #[test]
    fn castling_requires_empty_squares_between_king_and_rook() {
        let mut b = board([
            "....K...",
            "........",
            "........",
            "........",
            "........",
            "........",
            "........",
            "rn..k.nr",
        ]);

        for wing in Wing::iter() {
            assert_eq!(
                Castle::new(&mut b, Color::White, wing, Castles::all()),
                Err(InvalidNotation::CastlingBlocked)
            );
        }
    }

    #[test]
    fn cannot_castle_out_of_check() {
        let mut b = board([
            "....K...",
            "....R...",
            "........",
            "........",
            "........",
            "........",
            "........",
            "r...k..r",
        ]);

        assert_eq!(
            Castle::new(&mut b, Color::White, Wing::Short, Castles::all()),
            Err(InvalidNotation::CastlingOutOfCheck)
        );
    }

    #[test]
    fn cannot_castle_through_check() {
        let mut b = board([
            "....K...",
            ".....R..",
            "........",
            "........",
            "........",
            "........",
            "........",
            "r...k..r",
        ]);

        let before = b;
        assert_eq!(
            Castle::new(&mut b, Color::White, Wing::Short, Castles::all()),
            Err(InvalidNotation::CastlingThroughCheck)
        );
        assert_eq!(b, before);
        assert!(Castle::new(&mut b, Color::White, Wing::Long, Castles::all()).is_ok());
    }

    #[test]
    fn cannot_castle_into_check() {
        let mut b = board([
            "....K...",
            "..R.....",
            "........",
            "........",
            "........",
            "........",
            "........",
            "r...k..r",
        ]);

        let before = b;
        assert_eq!(
            Castle::new(&mut b, Color::White, Wing::Long, Castles::all()),
            Err(InvalidNotation::CastlingThroughCheck)
        );
        assert_eq!(b, before);
    }

    #[test]
    fn long_castling_may_cross_an_attacked_b_file() {
        let mut b = board([
            "....K...",
            ".R......",
            "........",
            "........",
            "........",
            "........",
            "........",
            "r...k..r",
        ]);

        let c = Castle::new(&mut b, Color::White, Wing::Long, Castles::all()).unwrap();
        assert_eq!(c.whence(), sq("e1"));
        assert_eq!(c.whither(), sq("c1"));
    }

    #[test]
    fn castling_is_printed_in_algebraic_notation() {
        let mut b = open();
        let short = Castle::new(&mut b, Color::Black, Wing::Short, Castles::all()).unwrap();
        let long = Castle::new(&mut b, Color::Black, Wing::Long, Castles::all()).unwrap();
        assert_eq!(short.to_string(), "O-O");
        assert_eq!(long.to_string(), "O-O-O");
    }
}
