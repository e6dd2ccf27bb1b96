use crate::chess::{File, Rank, Role, Square, Wing};
use derive_more::{Display, Error};
use std::fmt::{self, Write};
use std::str::FromStr;

/// The reason why a move in algebraic notation was rejected.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash, Error)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub enum InvalidNotation {
    #[display(fmt = "failed to parse algebraic notation")]
    Malformed,
    #[display(fmt = "no piece can move to the destination")]
    NoOrigin,
    #[display(fmt = "more than one piece can move to the destination")]
    Ambiguous,
    #[display(fmt = "the piece cannot move to the destination")]
    Unreachable,
    #[display(fmt = "there is no piece to move")]
    EmptyOrigin,
    #[display(fmt = "the piece to move belongs to the opponent")]
    NotYourPiece,
    #[display(fmt = "cannot capture your own piece")]
    CaptureOfOwnPiece,
    #[display(fmt = "there is nothing to capture")]
    NothingToCapture,
    #[display(fmt = "the destination is occupied, but no capture was indicated")]
    MissingCapture,
    #[display(fmt = "invalid promotion")]
    InvalidPromotion,
    #[display(fmt = "this move puts you in check")]
    SelfCheck,
    #[display(fmt = "the king or the rook has already moved")]
    CastlingRightsLost,
    #[display(fmt = "there are pieces between the king and the rook")]
    CastlingBlocked,
    #[display(fmt = "cannot castle out of check")]
    CastlingOutOfCheck,
    #[display(fmt = "cannot castle through or into check")]
    CastlingThroughCheck,
}

/// The syntactic content of a move in [algebraic notation].
///
/// This is what the text says, it has not been checked against any position.
///
/// [algebraic notation]: https://www.chessprogramming.org/Algebraic_Chess_Notation
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub enum Notation {
    /// `O-O` or `O-O-O`.
    Castle(Wing),

    /// A pawn advance, such as `e4` or `e8Q`.
    Advance {
        whither: Square,
        promotion: Option<Role>,
    },

    /// A pawn capture, such as `exd5` or `exd8N`.
    PawnCapture {
        file: File,
        whither: Square,
        promotion: Option<Role>,
    },

    /// A piece move, such as `Nf3`, `Rdxd1` or `Qh4e1`.
    Piece {
        role: Role,
        file: Option<File>,
        rank: Option<Rank>,
        capture: bool,
        whither: Square,
    },
}

impl Notation {
    /// The destination [`Square`], unless castling.
    pub fn whither(&self) -> Option<Square> {
        match *self {
            Notation::Castle(_) => None,
            Notation::Advance { whither, .. } => Some(whither),
            Notation::PawnCapture { whither, .. } => Some(whither),
            Notation::Piece { whither, .. } => Some(whither),
        }
    }

    /// Whether the text announces a capture.
    pub fn is_capture(&self) -> bool {
        match *self {
            Notation::Castle(_) | Notation::Advance { .. } => false,
            Notation::PawnCapture { .. } => true,
            Notation::Piece { capture, .. } => capture,
        }
    }
}

fn promotion(c: char) -> Option<Role> {
    match c {
        'Q' => Some(Role::Queen),
        'R' => Some(Role::Rook),
        'B' => Some(Role::Bishop),
        'N' => Some(Role::Knight),
        _ => None,
    }
}

fn piece(c: char) -> Option<Role> {
    match c {
        'K' => Some(Role::King),
        c => promotion(c),
    }
}

impl FromStr for Notation {
    type Err = InvalidNotation;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        use InvalidNotation::Malformed;

        match s {
            "O-O" => return Ok(Notation::Castle(Wing::Short)),
            "O-O-O" => return Ok(Notation::Castle(Wing::Long)),
            _ => {}
        }

        let mut chars: Vec<char> = s.chars().collect();

        let promotion = match chars.last().copied().and_then(promotion) {
            None => None,
            Some(r) => {
                chars.pop();
                if chars.last() == Some(&'=') {
                    chars.pop();
                }

                Some(r)
            }
        };

        let [prefix @ .., f, r] = chars.as_slice() else {
            return Err(Malformed);
        };

        let file = File::try_from(*f).map_err(|_| Malformed)?;
        let rank = Rank::try_from(*r).map_err(|_| Malformed)?;
        let whither = Square::new(file, rank);

        let (prefix, capture) = match prefix {
            [p @ .., 'x'] => (p, true),
            p => (p, false),
        };

        match prefix {
            [] if !capture => Ok(Notation::Advance { whither, promotion }),

            [f] if capture && File::try_from(*f).is_ok() => Ok(Notation::PawnCapture {
                file: File::try_from(*f).map_err(|_| Malformed)?,
                whither,
                promotion,
            }),

            [p, disambiguator @ ..] if promotion.is_none() => {
                let role = piece(*p).ok_or(Malformed)?;
                let (file, rank) = match disambiguator {
                    [] => (None, None),
                    [c] => match (File::try_from(*c), Rank::try_from(*c)) {
                        (Ok(f), _) => (Some(f), None),
                        (_, Ok(r)) => (None, Some(r)),
                        _ => return Err(Malformed),
                    },
                    [f, r] => (
                        Some(File::try_from(*f).map_err(|_| Malformed)?),
                        Some(Rank::try_from(*r).map_err(|_| Malformed)?),
                    ),
                    _ => return Err(Malformed),
                };

                Ok(Notation::Piece {
                    role,
                    file,
                    rank,
                    capture,
                    whither,
                })
            }

            _ => Err(Malformed),
        }
    }
}

impl fmt::Display for Notation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Notation::Castle(Wing::Short) => f.write_str("O-O"),
            Notation::Castle(Wing::Long) => f.write_str("O-O-O"),

            Notation::Advance { whither, promotion } => {
                write!(f, "{whither}")?;
                if let Some(r) = promotion {
                    write!(f, "{r}")?;
                }

                Ok(())
            }

            Notation::PawnCapture {
                file,
                whither,
                promotion,
            } => {
                write!(f, "{file}x{whither}")?;
                if let Some(r) = promotion {
                    write!(f, "{r}")?;
                }

                Ok(())
            }

            Notation::Piece {
                role,
                file,
                rank,
                capture,
                whither,
            } => {
                write!(f, "{role}")?;

                if let Some(file) = file {
                    write!(f, "{file}")?;
                }

                if let Some(rank) = rank {
                    write!(f, "{rank}")?;
                }

                if capture {
                    f.write_char('x')?;
                }

                write!(f, "{whither}")
            }
        }
    }
}
