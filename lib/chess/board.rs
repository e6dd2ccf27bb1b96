use crate::chess::{Color, ParsePieceError, ParseSquareError, Piece, Rank, Role, Square};
use arrayvec::ArrayVec;
use derive_more::{DebugCustom, Display, Error};
use std::fmt::{self, Write};
use std::{ops::Index, str::FromStr};

/// The squares reachable along one direction, ordered from nearest to farthest.
pub type Ray = ArrayVec<Square, 7>;

/// The directional move groups of a piece.
pub type Rays = ArrayVec<Ray, 8>;

const KNIGHT: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

const KING: [(i8, i8); 8] = [
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
];

const ORTHOGONAL: [(i8, i8); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];
const DIAGONAL: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, -1), (-1, 1)];

/// The chess board.
///
/// The board only knows about geometry and piece placement,
/// it has no notion of turns, castling rights or en passant.
#[derive(DebugCustom, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[debug(fmt = "Board(\"{}\")", self)]
pub struct Board {
    cells: [[Option<Piece>; 8]; 8],
}

impl Default for Board {
    /// The standard starting position.
    fn default() -> Self {
        use Role::*;

        let mut board = Board::empty();
        let back = [Rook, Knight, Bishop, Queen, King, Bishop, Knight, Rook];

        for side in Color::iter() {
            let first = Rank::First.perspective(side).index();
            let second = Rank::Second.perspective(side).index();
            for (f, role) in back.into_iter().enumerate() {
                board.cells[first][f] = Some(Piece(side, role));
                board.cells[second][f] = Some(Piece(side, Pawn));
            }
        }

        board
    }
}

impl Board {
    /// A board without any pieces.
    pub fn empty() -> Self {
        Board {
            cells: [[None; 8]; 8],
        }
    }

    /// Looks up the [`Square`] at a location such as `"e4"`.
    pub fn get_square(&self, location: &str) -> Result<Square, ParseSquareError> {
        location.parse()
    }

    /// The [`Piece`] on the given [`Square`], if any.
    #[inline(always)]
    pub fn piece_on(&self, sq: Square) -> Option<Piece> {
        self.cells[sq.rank().index()][sq.file().index()]
    }

    /// Places a [`Piece`] on a [`Square`], or clears it, returning what was there.
    #[inline(always)]
    pub fn set(&mut self, sq: Square, p: Option<Piece>) -> Option<Piece> {
        std::mem::replace(&mut self.cells[sq.rank().index()][sq.file().index()], p)
    }

    /// An iterator over all pieces on the board, in rank-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::iter().filter_map(|sq| Some((sq, self[sq]?)))
    }

    /// An iterator over the pieces of a [`Color`].
    pub fn by_color(&self, c: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.iter().filter(move |(_, p)| p.color() == c)
    }

    /// [`Square`] occupied by the king of a [`Color`].
    pub fn king(&self, side: Color) -> Option<Square> {
        let king = Piece(side, Role::King);
        self.iter().find_map(|(sq, p)| (p == king).then_some(sq))
    }

    /// Replaces every cell from a grid of rows.
    ///
    /// The first row is the eighth rank and each row lists files a through h.
    /// A `.` is an empty square, lowercase symbols are white pieces and
    /// uppercase symbols are black pieces. The board is left untouched on error.
    pub fn set_board_state<I>(&mut self, rows: I) -> Result<(), ParseBoardError>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut cells = [[None; 8]; 8];
        let mut count = 0;

        for (i, row) in rows.into_iter().enumerate() {
            let rank = 7usize.checked_sub(i).ok_or(ParseBoardError::InvalidRowCount)?;

            let mut length = 0;
            for (f, c) in row.as_ref().chars().enumerate() {
                if f >= 8 {
                    return Err(ParseBoardError::InvalidRowLength);
                }

                cells[rank][f] = match c {
                    '.' => None,
                    c => Some(Piece::try_from(c)?),
                };

                length += 1;
            }

            if length != 8 {
                return Err(ParseBoardError::InvalidRowLength);
            }

            count += 1;
        }

        if count != 8 {
            return Err(ParseBoardError::InvalidRowCount);
        }

        self.cells = cells;
        Ok(())
    }

    /// The pseudo-legal directional move groups of the piece on a [`Square`].
    ///
    /// Sliding pieces yield one group per non-empty ray, other pieces yield
    /// singletons, except for the pawn advance which may hold two squares.
    /// Whether the move leaves the own king in check is not considered,
    /// and neither is en passant nor castling.
    pub fn moves(&self, sq: Square) -> Rays {
        let mut rays = Rays::new();

        if let Some(p) = self[sq] {
            let side = p.color();
            match p.role() {
                Role::Pawn => self.pawn(sq, side, &mut rays),
                Role::Knight => self.leap(sq, side, &KNIGHT, &mut rays),
                Role::King => self.leap(sq, side, &KING, &mut rays),
                Role::Bishop => self.slide(sq, side, &DIAGONAL, &mut rays),
                Role::Rook => self.slide(sq, side, &ORTHOGONAL, &mut rays),
                Role::Queen => {
                    self.slide(sq, side, &ORTHOGONAL, &mut rays);
                    self.slide(sq, side, &DIAGONAL, &mut rays);
                }
            }
        }

        rays
    }

    /// The pseudo-legal destinations of the piece on a [`Square`].
    pub fn destinations(&self, sq: Square) -> impl Iterator<Item = Square> {
        self.moves(sq).into_iter().flatten()
    }

    /// Whether the piece on `whence` could pseudo-legally move to `whither`.
    pub fn reaches(&self, whence: Square, whither: Square) -> bool {
        self.destinations(whence).any(|sq| sq == whither)
    }

    /// Whether the king of a [`Color`] is attacked.
    ///
    /// A side without a king is never in check.
    pub fn in_check(&self, side: Color) -> bool {
        match self.king(side) {
            None => false,
            Some(king) => self.by_color(!side).any(|(sq, _)| self.reaches(sq, king)),
        }
    }

    /// The material balance, positive if white is ahead.
    pub fn evaluate_by_material(&self) -> i32 {
        self.iter()
            .map(|(_, p)| match p.color() {
                Color::White => p.role().value(),
                Color::Black => -p.role().value(),
            })
            .sum()
    }

    fn pawn(&self, sq: Square, side: Color, rays: &mut Rays) {
        let mut advance = Ray::new();
        if let Some(one) = sq.forward(side).filter(|&s| self[s].is_none()) {
            advance.push(one);
            if sq.rank() == Rank::Second.perspective(side) {
                if let Some(two) = one.forward(side).filter(|&s| self[s].is_none()) {
                    advance.push(two);
                }
            }
        }

        if !advance.is_empty() {
            rays.push(advance);
        }

        for df in [-1, 1] {
            let dr = match side {
                Color::White => 1,
                Color::Black => -1,
            };

            if let Some(target) = sq.offset(df, dr) {
                if self[target].is_some_and(|p| p.color() != side) {
                    rays.push(Ray::from_iter([target]));
                }
            }
        }
    }

    fn leap(&self, sq: Square, side: Color, offsets: &[(i8, i8)], rays: &mut Rays) {
        for &(df, dr) in offsets {
            if let Some(target) = sq.offset(df, dr) {
                if self[target].map_or(true, |p| p.color() != side) {
                    rays.push(Ray::from_iter([target]));
                }
            }
        }
    }

    fn slide(&self, sq: Square, side: Color, directions: &[(i8, i8)], rays: &mut Rays) {
        for &(df, dr) in directions {
            let mut ray = Ray::new();
            let mut next = sq.offset(df, dr);

            while let Some(target) = next {
                match self[target] {
                    None => ray.push(target),
                    Some(p) => {
                        if p.color() != side {
                            ray.push(target);
                        }

                        break;
                    }
                }

                next = target.offset(df, dr);
            }

            if !ray.is_empty() {
                rays.push(ray);
            }
        }
    }
}

/// Retrieves the [`Piece`] at a given [`Square`], if any.
impl Index<Square> for Board {
    type Output = Option<Piece>;

    #[inline(always)]
    fn index(&self, sq: Square) -> &Self::Output {
        &self.cells[sq.rank().index()][sq.file().index()]
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.cells.iter().rev().enumerate() {
            if i > 0 {
                f.write_char('/')?;
            }

            for cell in row {
                match cell {
                    None => f.write_char('.')?,
                    Some(p) => fmt::Display::fmt(p, f)?,
                }
            }
        }

        Ok(())
    }
}

/// The reason why parsing the position setup grid failed.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error)]
pub enum ParseBoardError {
    #[display(fmt = "failed to parse board, expected exactly 8 rows")]
    InvalidRowCount,
    #[display(fmt = "failed to parse board, expected exactly 8 squares per row")]
    InvalidRowLength,
    #[display(fmt = "failed to parse board")]
    InvalidPiece(ParsePieceError),
}

impl From<ParsePieceError> for ParseBoardError {
    fn from(e: ParsePieceError) -> Self {
        ParseBoardError::InvalidPiece(e)
    }
}

impl FromStr for Board {
    type Err = ParseBoardError;

    /// Parses the rows of the position setup grid separated by `/`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut board = Board::empty();
        board.set_board_state(s.trim().split('/'))?;
        Ok(board)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chess::{File, Rank};
    use test_strategy::proptest;

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }

    fn board(rows: [&str; 8]) -> Board {
        let mut b = Board::empty();
        b.set_board_state(rows).unwrap();
        b
    }

    #[test]
    fn default_board_is_the_starting_position() {
        assert_eq!(
            Board::default().to_string(),
            "RNBQKBNR/PPPPPPPP/......../......../......../......../pppppppp/rnbqkbnr"
        );
    }

    #[test]
    fn default_board_has_one_king_per_side() {
        assert_eq!(Board::default().king(Color::White), Some(sq("e1")));
        assert_eq!(Board::default().king(Color::Black), Some(sq("e8")));
    }

    #[proptest]
    fn get_square_parses_printed_square(b: Board, s: Square) {
        assert_eq!(b.get_square(&s.to_string()), Ok(s));
    }

    #[proptest]
    fn get_square_fails_outside_the_board(
        b: Board,
        #[filter(#s.parse::<Square>().is_err())] s: String,
    ) {
        assert!(b.get_square(&s).is_err());
    }

    #[proptest]
    fn board_can_be_indexed_by_square(b: Board, s: Square) {
        assert_eq!(b[s], b.piece_on(s));
    }

    #[proptest]
    fn set_places_and_returns_previous_piece(mut b: Board, s: Square, p: Option<Piece>) {
        let before = b[s];
        assert_eq!(b.set(s, p), before);
        assert_eq!(b[s], p);
    }

    #[proptest]
    fn iter_returns_pieces_and_squares(b: Board) {
        for (s, p) in b.iter() {
            assert_eq!(b[s], Some(p));
        }
    }

    #[proptest]
    fn parsing_printed_board_is_an_identity(b: Board) {
        assert_eq!(b.to_string().parse(), Ok(b));
    }

    #[proptest]
    fn set_board_state_replaces_every_cell(mut a: Board, b: Board) {
        let rows: Vec<_> = b.to_string().split('/').map(String::from).collect();
        a.set_board_state(rows)?;
        assert_eq!(a, b);
    }

    #[proptest]
    fn set_board_state_leaves_board_untouched_on_error(mut b: Board) {
        let before = b;
        assert_eq!(
            b.set_board_state(["........"; 7]),
            Err(ParseBoardError::InvalidRowCount)
        );
        assert_eq!(
            b.set_board_state(["......."; 8]),
            Err(ParseBoardError::InvalidRowLength)
        );
        assert_eq!(
            b.set_board_state(["x......."; 8]),
            Err(ParseBoardError::InvalidPiece(ParsePieceError))
        );
        assert_eq!(b, before);
    }

    #[proptest]
    fn moves_from_empty_square_is_empty(b: Board, #[filter(#b[#s].is_none())] s: Square) {
        assert!(b.moves(s).is_empty());
    }

    #[proptest]
    fn destinations_are_never_occupied_by_own_pieces(b: Board, s: Square) {
        if let Some(p) = b[s] {
            for d in b.destinations(s) {
                assert_ne!(b[d].map(|q| q.color()), Some(p.color()));
            }
        }
    }

    #[test]
    fn pawn_on_start_rank_can_advance_two_squares() {
        let b = Board::default();
        assert_eq!(Vec::from_iter(b.destinations(sq("e2"))), [sq("e3"), sq("e4")]);
        assert_eq!(Vec::from_iter(b.destinations(sq("d7"))), [sq("d6"), sq("d5")]);
    }

    #[test]
    fn pawn_advance_is_blocked_by_any_piece() {
        let b = board([
            "....K...",
            "........",
            "........",
            "........",
            "...P.N..",
            "...n....",
            "...p.p..",
            "....k...",
        ]);

        assert_eq!(b.destinations(sq("d2")).count(), 0);
        assert_eq!(Vec::from_iter(b.destinations(sq("f2"))), [sq("f3")]);
    }

    #[test]
    fn pawn_captures_diagonally_only_onto_enemy_pieces() {
        let b = board([
            "....K...",
            "........",
            "........",
            "........",
            "........",
            "..P.n...",
            "...p....",
            "....k...",
        ]);

        let moves = b.moves(sq("d2"));
        assert_eq!(moves.len(), 2);
        assert_eq!(moves[0].as_slice(), [sq("d3"), sq("d4")]);
        assert_eq!(moves[1].as_slice(), [sq("c3")]);
    }

    #[test]
    fn knight_in_the_corner_has_two_destinations() {
        let b = board([
            "....K...",
            "........",
            "........",
            "........",
            "........",
            "........",
            "........",
            "n...k...",
        ]);

        let mut ds = Vec::from_iter(b.destinations(sq("a1")));
        ds.sort_by_key(Square::index);
        assert_eq!(ds, [sq("c2"), sq("b3")]);
    }

    #[test]
    fn slider_ray_includes_enemy_and_excludes_own_blocker() {
        let b = board([
            "....K...",
            "...P....",
            "........",
            "........",
            "........",
            "........",
            "...p....",
            "...rk...",
        ]);

        assert!(b.destinations(sq("d1")).all(|s| s.rank() == Rank::First));
        assert!(!b.reaches(sq("d2"), sq("d7")));

        let b = board([
            "....K...",
            "...P....",
            "........",
            "........",
            "........",
            "........",
            "........",
            "...rk...",
        ]);

        let up = &b.moves(sq("d1"))[0];
        assert_eq!(up.first(), Some(&sq("d2")));
        assert_eq!(up.last(), Some(&sq("d7")));
    }

    #[test]
    fn queen_moves_are_the_union_of_rook_and_bishop_moves() {
        let q = board([
            "....K...",
            "........",
            "........",
            "...q....",
            "........",
            "........",
            "........",
            "....k...",
        ]);

        let r = board([
            "....K...",
            "........",
            "........",
            "...r....",
            "........",
            "........",
            "........",
            "....k...",
        ]);

        let b = board([
            "....K...",
            "........",
            "........",
            "...b....",
            "........",
            "........",
            "........",
            "....k...",
        ]);

        let s = sq("d5");
        assert_eq!(
            q.destinations(s).count(),
            r.destinations(s).count() + b.destinations(s).count()
        );
        assert_eq!(q.moves(s).len(), 8);
    }

    #[test]
    fn king_is_in_check_when_attacked() {
        let b = board([
            "....K...",
            "........",
            "........",
            "........",
            "b.......",
            "........",
            "........",
            "....k...",
        ]);

        assert!(b.in_check(Color::Black));
        assert!(!b.in_check(Color::White));
    }

    #[test]
    fn pawns_only_give_check_diagonally() {
        let b = board([
            "........",
            "........",
            "........",
            "........",
            "...K....",
            "...p....",
            "........",
            "....k...",
        ]);

        assert!(!b.in_check(Color::Black));

        let b = board([
            "........",
            "........",
            "........",
            "........",
            "....K...",
            "...p....",
            "........",
            "....k...",
        ]);

        assert!(b.in_check(Color::Black));
    }

    #[test]
    fn side_without_king_is_never_in_check() {
        assert!(!Board::empty().in_check(Color::White));
    }

    #[test]
    fn material_is_balanced_in_the_starting_position() {
        assert_eq!(Board::default().evaluate_by_material(), 0);
    }

    #[test]
    fn material_favors_the_side_with_more_pieces() {
        let b = board([
            "....K...",
            "........",
            "........",
            "........",
            "........",
            "........",
            "........",
            "q...k..P",
        ]);

        assert_eq!(b.evaluate_by_material(), 8);
    }

    #[proptest]
    fn material_of_mirrored_colors_is_negated(b: Board) {
        let mut m = Board::empty();
        for (s, p) in b.iter() {
            m.set(s, Some(Piece(!p.color(), p.role())));
        }

        assert_eq!(m.evaluate_by_material(), -b.evaluate_by_material());
    }

    #[test]
    fn every_file_has_a_pawn_in_the_starting_position() {
        let b = Board::default();
        for f in File::iter() {
            assert_eq!(
                b[Square::new(f, Rank::Second)],
                Some(Piece(Color::White, Role::Pawn))
            );
        }
    }
}
