use crate::chess::{Board, Color, File, Piece, Rank, Role, Square, Wing};
use bitflags::bitflags;
use std::fmt::{self, Write};

bitflags! {
    /// The castling rights in a chess [`Game`][`crate::chess::Game`].
    ///
    /// Once lost, a right is never regained.
    pub struct Castles: u8 {
        const WHITE_SHORT = 0b0001;
        const WHITE_LONG =  0b0010;
        const BLACK_SHORT = 0b0100;
        const BLACK_LONG =  0b1000;
    }
}

impl Castles {
    /// The right of `side` to castle on `wing`.
    #[inline(always)]
    pub fn right(side: Color, wing: Wing) -> Self {
        match (side, wing) {
            (Color::White, Wing::Short) => Castles::WHITE_SHORT,
            (Color::White, Wing::Long) => Castles::WHITE_LONG,
            (Color::Black, Wing::Short) => Castles::BLACK_SHORT,
            (Color::Black, Wing::Long) => Castles::BLACK_LONG,
        }
    }

    /// Whether `side` may still castle on `wing`.
    #[inline(always)]
    pub fn has(&self, side: Color, wing: Wing) -> bool {
        self.contains(Castles::right(side, wing))
    }

    /// Revokes the rights that depend on the piece originally on this [`Square`].
    ///
    /// Moving a king or rook away from its home square, or capturing a rook
    /// on its home square, permanently revokes the corresponding rights.
    #[inline(always)]
    pub fn revoke(&mut self, sq: Square) {
        self.remove(Castles::from(sq));
    }

    /// The rights consistent with the placement of kings and rooks on a [`Board`].
    ///
    /// A right is held only if both the king and the rook stand on their home squares.
    pub fn infer(board: &Board) -> Self {
        let mut castles = Castles::empty();

        for side in Color::iter() {
            let rank = Rank::First.perspective(side);
            if board[Square::new(File::E, rank)] != Some(Piece(side, Role::King)) {
                continue;
            }

            for wing in Wing::iter() {
                if board[Square::new(wing.rook_file(), rank)] == Some(Piece(side, Role::Rook)) {
                    castles.insert(Castles::right(side, wing));
                }
            }
        }

        castles
    }
}

impl Default for Castles {
    #[inline(always)]
    fn default() -> Self {
        Castles::all()
    }
}

impl From<Square> for Castles {
    fn from(sq: Square) -> Self {
        match (sq.file(), sq.rank()) {
            (File::E, Rank::First) => Castles::WHITE_SHORT | Castles::WHITE_LONG,
            (File::H, Rank::First) => Castles::WHITE_SHORT,
            (File::A, Rank::First) => Castles::WHITE_LONG,
            (File::E, Rank::Eighth) => Castles::BLACK_SHORT | Castles::BLACK_LONG,
            (File::H, Rank::Eighth) => Castles::BLACK_SHORT,
            (File::A, Rank::Eighth) => Castles::BLACK_LONG,
            _ => Castles::empty(),
        }
    }
}

impl fmt::Display for Castles {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_char('-');
        }

        for (right, c) in [
            (Castles::WHITE_SHORT, 'K'),
            (Castles::WHITE_LONG, 'Q'),
            (Castles::BLACK_SHORT, 'k'),
            (Castles::BLACK_LONG, 'q'),
        ] {
            if self.contains(right) {
                f.write_char(c)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_strategy::proptest;

    #[test]
    fn all_rights_are_held_by_default() {
        for side in Color::iter() {
            for wing in Wing::iter() {
                assert!(Castles::default().has(side, wing));
            }
        }
    }

    #[proptest]
    fn moving_the_king_revokes_both_rights(side: Color) {
        let mut castles = Castles::all();
        castles.revoke(Square::new(File::E, Rank::First.perspective(side)));
        assert!(!castles.has(side, Wing::Short));
        assert!(!castles.has(side, Wing::Long));
        assert!(castles.has(!side, Wing::Short));
        assert!(castles.has(!side, Wing::Long));
    }

    #[proptest]
    fn moving_a_rook_revokes_one_right(side: Color, wing: Wing) {
        let mut castles = Castles::all();
        castles.revoke(Square::new(wing.rook_file(), Rank::First.perspective(side)));
        assert!(!castles.has(side, wing));
        assert!(castles.has(side, !wing));
    }

    #[proptest]
    fn revoking_is_permanent(bits: u8, sq: Square) {
        let mut castles = Castles::from_bits_truncate(bits);
        castles.revoke(sq);
        assert!(Castles::from_bits_truncate(bits).contains(castles));
    }

    #[proptest]
    fn other_squares_revoke_nothing(
        #[filter(![File::A, File::E, File::H].contains(&#sq.file()))] sq: Square,
    ) {
        let mut castles = Castles::all();
        castles.revoke(sq);
        assert_eq!(castles, Castles::all());
    }

    #[test]
    fn infer_holds_all_rights_in_the_starting_position() {
        assert_eq!(Castles::infer(&Board::default()), Castles::all());
    }

    #[test]
    fn infer_requires_king_and_rook_on_home_squares() -> Result<(), anyhow::Error> {
        let board: Board =
            "R...K.../......../......../......../......../......../......../....k..r".parse()?;
        assert_eq!(
            Castles::infer(&board),
            Castles::WHITE_SHORT | Castles::BLACK_LONG
        );

        Ok(())
    }

    #[test]
    fn castles_are_printed_like_fen() {
        assert_eq!(Castles::all().to_string(), "KQkq");
        assert_eq!(Castles::empty().to_string(), "-");
        assert_eq!((Castles::WHITE_LONG | Castles::BLACK_SHORT).to_string(), "Qk");
    }
}
