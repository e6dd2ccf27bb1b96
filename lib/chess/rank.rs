use crate::chess::Color;
use derive_more::{Display, Error};
use std::{ops::Sub, str::FromStr};

/// A row on the chess board.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[repr(u8)]
pub enum Rank {
    #[display(fmt = "1")]
    First,
    #[display(fmt = "2")]
    Second,
    #[display(fmt = "3")]
    Third,
    #[display(fmt = "4")]
    Fourth,
    #[display(fmt = "5")]
    Fifth,
    #[display(fmt = "6")]
    Sixth,
    #[display(fmt = "7")]
    Seventh,
    #[display(fmt = "8")]
    Eighth,
}

impl Rank {
    const ALL: [Rank; 8] = [
        Rank::First,
        Rank::Second,
        Rank::Third,
        Rank::Fourth,
        Rank::Fifth,
        Rank::Sixth,
        Rank::Seventh,
        Rank::Eighth,
    ];

    /// Constructs [`Rank`] from its index, if in the range `(0..8)`.
    #[inline(always)]
    pub fn new(i: usize) -> Option<Self> {
        Self::ALL.get(i).copied()
    }

    /// This rank's index, `0` for [`Rank::First`].
    #[inline(always)]
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// All ranks, from first to eighth.
    pub fn iter() -> impl DoubleEndedIterator<Item = Self> + ExactSizeIterator {
        Self::ALL.into_iter()
    }

    /// The rank above, if any.
    #[inline(always)]
    pub fn next(&self) -> Option<Self> {
        Self::new(self.index() + 1)
    }

    /// The rank below, if any.
    #[inline(always)]
    pub fn previous(&self) -> Option<Self> {
        Self::new(self.index().checked_sub(1)?)
    }

    /// This rank as seen by the given side.
    ///
    /// White sees ranks as they are, black sees them mirrored.
    #[inline(always)]
    pub fn perspective(&self, side: Color) -> Self {
        match side {
            Color::White => *self,
            Color::Black => Self::ALL[7 - self.index()],
        }
    }
}

impl Sub for Rank {
    type Output = i8;

    #[inline(always)]
    fn sub(self, rhs: Self) -> Self::Output {
        self as i8 - rhs as i8
    }
}

/// The reason why parsing [`Rank`] failed.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error)]
#[display(fmt = "failed to parse rank, expected digit in the range `(1..=8)`")]
pub struct ParseRankError;

impl TryFrom<char> for Rank {
    type Error = ParseRankError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c {
            '1'..='8' => Self::new(c as usize - '1' as usize).ok_or(ParseRankError),
            _ => Err(ParseRankError),
        }
    }
}

impl FromStr for Rank {
    type Err = ParseRankError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => c.try_into(),
            _ => Err(ParseRankError),
        }
    }
}
