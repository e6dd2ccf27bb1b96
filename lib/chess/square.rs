use crate::chess::{Color, File, ParseFileError, ParseRankError, Rank};
use derive_more::{Display, Error};
use std::{fmt, str::FromStr};

/// A square on the chess board.
///
/// Squares are plain values, navigating away from a square never mutates it.
/// Steps that would leave the board yield [`None`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub struct Square {
    file: File,
    rank: Rank,
}

impl Square {
    /// Constructs [`Square`] from a pair of [`File`] and [`Rank`].
    #[inline(always)]
    pub fn new(file: File, rank: Rank) -> Self {
        Square { file, rank }
    }

    /// Constructs [`Square`] from its index, if in the range `(0..64)`.
    #[inline(always)]
    pub fn from_index(i: usize) -> Option<Self> {
        Some(Square::new(File::new(i % 8)?, Rank::new(i / 8)?))
    }

    /// This square's index, `0` for a1 and `63` for h8.
    #[inline(always)]
    pub fn index(&self) -> usize {
        self.rank.index() * 8 + self.file.index()
    }

    /// This square's [`File`].
    #[inline(always)]
    pub fn file(&self) -> File {
        self.file
    }

    /// This square's [`Rank`].
    #[inline(always)]
    pub fn rank(&self) -> Rank {
        self.rank
    }

    /// All squares in rank-major order, from a1 to h8.
    pub fn iter() -> impl DoubleEndedIterator<Item = Self> {
        Rank::iter().flat_map(|r| File::iter().map(move |f| Square::new(f, r)))
    }

    /// The square one rank up.
    #[inline(always)]
    pub fn up(&self) -> Option<Self> {
        Some(Square::new(self.file, self.rank.next()?))
    }

    /// The square one rank down.
    #[inline(always)]
    pub fn down(&self) -> Option<Self> {
        Some(Square::new(self.file, self.rank.previous()?))
    }

    /// The square one file to the left.
    #[inline(always)]
    pub fn left(&self) -> Option<Self> {
        Some(Square::new(self.file.previous()?, self.rank))
    }

    /// The square one file to the right.
    #[inline(always)]
    pub fn right(&self) -> Option<Self> {
        Some(Square::new(self.file.next()?, self.rank))
    }

    /// The square one rank ahead from the point of view of `side`.
    #[inline(always)]
    pub fn forward(&self, side: Color) -> Option<Self> {
        match side {
            Color::White => self.up(),
            Color::Black => self.down(),
        }
    }

    /// The square one rank behind from the point of view of `side`.
    #[inline(always)]
    pub fn backward(&self, side: Color) -> Option<Self> {
        self.forward(!side)
    }

    /// The square at a `(file, rank)` offset, if on the board.
    pub fn offset(&self, df: i8, dr: i8) -> Option<Self> {
        let f = usize::try_from(self.file.index() as i8 + df).ok()?;
        let r = usize::try_from(self.rank.index() as i8 + dr).ok()?;
        Some(Square::new(File::new(f)?, Rank::new(r)?))
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.file, f)?;
        fmt::Display::fmt(&self.rank, f)?;
        Ok(())
    }
}

/// The reason why parsing [`Square`] failed.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error)]
pub enum ParseSquareError {
    #[display(fmt = "failed to parse square")]
    InvalidFile(ParseFileError),
    #[display(fmt = "failed to parse square")]
    InvalidRank(ParseRankError),
    #[display(fmt = "failed to parse square, expected exactly two characters")]
    InvalidLength,
}

impl FromStr for Square {
    type Err = ParseSquareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let (Some(f), Some(r), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(ParseSquareError::InvalidLength);
        };

        Ok(Square::new(
            f.try_into().map_err(ParseSquareError::InvalidFile)?,
            r.try_into().map_err(ParseSquareError::InvalidRank)?,
        ))
    }
}
