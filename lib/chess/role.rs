use derive_more::{Display, Error};
use std::str::FromStr;

/// The type of a chess [`Piece`][`crate::chess::Piece`].
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[repr(u8)]
pub enum Role {
    #[display(fmt = "P")]
    Pawn,
    #[display(fmt = "N")]
    Knight,
    #[display(fmt = "B")]
    Bishop,
    #[display(fmt = "R")]
    Rook,
    #[display(fmt = "Q")]
    Queen,
    #[display(fmt = "K")]
    King,
}

impl Role {
    /// All roles, from the least to the most valuable.
    pub fn iter() -> impl DoubleEndedIterator<Item = Self> + ExactSizeIterator {
        use Role::*;
        [Pawn, Knight, Bishop, Rook, Queen, King].into_iter()
    }

    /// The roles a pawn may be promoted to.
    pub fn promotions() -> impl DoubleEndedIterator<Item = Self> + ExactSizeIterator {
        use Role::*;
        [Queen, Rook, Bishop, Knight].into_iter()
    }

    /// The conventional material value of this role.
    ///
    /// The king is priceless and counts as nothing.
    pub fn value(&self) -> i32 {
        match self {
            Role::Pawn => 1,
            Role::Knight => 3,
            Role::Bishop => 3,
            Role::Rook => 5,
            Role::Queen => 9,
            Role::King => 0,
        }
    }
}

/// The reason why parsing [`Role`] failed.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error)]
#[display(fmt = "failed to parse role, expected one of `PNBRQK`")]
pub struct ParseRoleError;

impl FromStr for Role {
    type Err = ParseRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "P" => Ok(Role::Pawn),
            "N" => Ok(Role::Knight),
            "B" => Ok(Role::Bishop),
            "R" => Ok(Role::Rook),
            "Q" => Ok(Role::Queen),
            "K" => Ok(Role::King),
            _ => Err(ParseRoleError),
        }
    }
}
