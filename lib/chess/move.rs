use crate::chess::{Board, Color, InvalidNotation, Piece, Rank, Role, Square};
use derive_more::DebugCustom;
use std::fmt::{self, Write};

/// A legal transition of a single piece.
///
/// A [`Move`] can only be obtained through [`Move::new`], which rejects
/// moves that would leave the mover's own king in check.
#[derive(DebugCustom, Copy, Clone, Eq, PartialEq, Hash)]
#[debug(fmt = "Move({})", self)]
pub struct Move {
    whence: Square,
    whither: Square,
    piece: Piece,
    capture: Option<(Piece, Square)>,
    promotion: Option<Role>,
}

impl Move {
    /// Validates a move of the piece on `whence` to `whither` on behalf of `side`.
    ///
    /// The geometry is not checked here, only whether the origin holds a piece
    /// of `side`, what would be captured, whether the promotion fits, and
    /// whether the resulting position leaves `side` in check. The latter is
    /// tested by applying the move to `board` and reverting it, so `board` is
    /// unchanged when this function returns.
    pub fn new(
        board: &mut Board,
        side: Color,
        whence: Square,
        whither: Square,
        en_passant: bool,
        promotion: Option<Role>,
    ) -> Result<Self, InvalidNotation> {
        use InvalidNotation::*;

        let piece = board[whence].ok_or(EmptyOrigin)?;
        if piece.color() != side {
            return Err(NotYourPiece);
        }

        let capture = if en_passant {
            let behind = whither.backward(side).ok_or(NothingToCapture)?;
            match board[behind] {
                Some(p @ Piece(c, Role::Pawn))
                    if c != side && piece.role() == Role::Pawn && board[whither].is_none() =>
                {
                    Some((p, behind))
                }

                _ => return Err(NothingToCapture),
            }
        } else {
            match board[whither] {
                None => None,
                Some(p) if p.color() == side => return Err(CaptureOfOwnPiece),
                Some(p) => Some((p, whither)),
            }
        };

        let last = whither.rank() == Rank::Eighth.perspective(side);
        let promotion = match (piece.role(), last, promotion) {
            (Role::Pawn, true, None) => Some(Role::Queen),
            (Role::Pawn, true, Some(r)) if Role::promotions().any(|p| p == r) => Some(r),
            (_, _, None) => None,
            _ => return Err(InvalidPromotion),
        };

        let m = Move {
            whence,
            whither,
            piece,
            capture,
            promotion,
        };

        m.execute(board);
        let check = board.in_check(side);
        m.undo(board);

        if check {
            Err(SelfCheck)
        } else {
            Ok(m)
        }
    }

    /// The source [`Square`].
    #[inline(always)]
    pub fn whence(&self) -> Square {
        self.whence
    }

    /// The destination [`Square`].
    #[inline(always)]
    pub fn whither(&self) -> Square {
        self.whither
    }

    /// The [`Piece`] moved.
    #[inline(always)]
    pub fn piece(&self) -> Piece {
        self.piece
    }

    /// The [`Piece`] captured, if any.
    #[inline(always)]
    pub fn capture(&self) -> Option<Piece> {
        self.capture.map(|(p, _)| p)
    }

    /// The [`Square`] the captured piece stood on, if any.
    #[inline(always)]
    pub fn capture_square(&self) -> Option<Square> {
        self.capture.map(|(_, sq)| sq)
    }

    /// The [`Role`] the pawn is promoted to, if any.
    #[inline(always)]
    pub fn promotion(&self) -> Option<Role> {
        self.promotion
    }

    /// Whether this is a capture move.
    #[inline(always)]
    pub fn is_capture(&self) -> bool {
        self.capture.is_some()
    }

    /// Whether this is an en passant capture move.
    #[inline(always)]
    pub fn is_en_passant(&self) -> bool {
        self.capture_square().is_some_and(|sq| sq != self.whither)
    }

    /// Whether this is a pawn advancing two squares.
    #[inline(always)]
    pub fn is_double_advance(&self) -> bool {
        self.piece.role() == Role::Pawn && (self.whither.rank() - self.whence.rank()).abs() == 2
    }

    /// Commits this move to the board.
    pub fn execute(&self, board: &mut Board) {
        board.set(self.whence, None);

        if let Some((_, sq)) = self.capture {
            board.set(sq, None);
        }

        let placed = match self.promotion {
            None => self.piece,
            Some(r) => Piece(self.piece.color(), r),
        };

        board.set(self.whither, Some(placed));
    }

    /// Reverts this move on the board.
    pub fn undo(&self, board: &mut Board) {
        board.set(self.whither, None);

        if let Some((p, sq)) = self.capture {
            board.set(sq, Some(p));
        }

        board.set(self.whence, Some(self.piece));
    }
}

/// Pure coordinate notation, e.g. `e2e4` or `e7e8q`.
impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.whence, self.whither)?;

        if let Some(r) = self.promotion {
            f.write_char(Piece(Color::White, r).symbol())?;
        }

        Ok(())
    }
}
