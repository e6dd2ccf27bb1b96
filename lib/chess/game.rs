use crate::chess::{Action, Board, Castle, Castles, Color, File, InvalidNotation, Move};
use crate::chess::{Notation, Outcome, Piece, Rank, Role, Square, Wing};
use derive_more::{Display, Error};
use tracing::{debug, instrument};

/// The reason why an [`Action`] was rejected by [`Game::play`].
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash, Error)]
#[display(fmt = "`{}` is not a legal action in this position", _0)]
pub struct IllegalAction(#[error(not(source))] pub Action);

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
struct Entry {
    action: Action,
    castles: Castles,
}

/// The state of a chess game.
///
/// Every action taken is recorded along with the castling rights that
/// preceded it, so that it can be taken back with [`Game::undo_move`].
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Game {
    board: Board,
    turn: Color,
    castles: Castles,
    history: Vec<Entry>,
    captured: [Vec<Role>; 2],
}

impl Default for Game {
    fn default() -> Self {
        Game::with_board(Board::default(), Color::White)
    }
}

impl Game {
    /// Starts a game from an arbitrary [`Board`] with `turn` to move.
    ///
    /// Castling rights are inferred from the placement of kings and rooks.
    pub fn with_board(board: Board, turn: Color) -> Self {
        Game {
            board,
            turn,
            castles: Castles::infer(&board),
            history: Vec::new(),
            captured: Default::default(),
        }
    }

    /// The current [`Board`].
    #[inline(always)]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The side to move.
    #[inline(always)]
    pub fn turn(&self) -> Color {
        self.turn
    }

    /// The current castling rights.
    #[inline(always)]
    pub fn castles(&self) -> Castles {
        self.castles
    }

    /// The actions played so far, oldest first.
    pub fn history(&self) -> impl DoubleEndedIterator<Item = Action> + ExactSizeIterator + '_ {
        self.history.iter().map(|e| e.action)
    }

    /// The roles of the pieces of `side` that have been captured, in order of capture.
    #[inline(always)]
    pub fn captured(&self, side: Color) -> &[Role] {
        &self.captured[side as usize]
    }

    /// The file of a pawn that just advanced two squares, if any.
    pub fn en_passant(&self) -> Option<File> {
        match self.history.last()?.action {
            Action::Move(m) if m.is_double_advance() => Some(m.whither().file()),
            _ => None,
        }
    }

    /// Interprets a move in algebraic notation on behalf of the side to move.
    ///
    /// The game is not modified.
    pub fn notation_parser(&self, text: &str) -> Result<Action, InvalidNotation> {
        let notation: Notation = text.parse()?;
        let mut board = self.board;
        self.resolve(&mut board, notation)
    }

    /// The algebraic [`Notation`] of an action available to the side to move.
    ///
    /// Disambiguators are only included when necessary,
    /// preferring the file, then the rank, then both.
    pub fn notation(&self, action: &Action) -> Notation {
        let m = match action {
            Action::Castle(c) => return Notation::Castle(c.wing()),
            Action::Move(m) => m,
        };

        let (whence, whither) = (m.whence(), m.whither());
        let side = m.piece().color();

        match m.piece().role() {
            Role::Pawn if m.is_capture() => Notation::PawnCapture {
                file: whence.file(),
                whither,
                promotion: m.promotion(),
            },

            Role::Pawn => Notation::Advance {
                whither,
                promotion: m.promotion(),
            },

            role => {
                let mut board = self.board;
                let rivals: Vec<Square> = board
                    .by_color(side)
                    .filter(|&(sq, p)| p.role() == role && sq != whence)
                    .filter(|&(sq, _)| board.reaches(sq, whither))
                    .map(|(sq, _)| sq)
                    .collect();

                let rivals: Vec<Square> = rivals
                    .into_iter()
                    .filter(|&sq| Move::new(&mut board, side, sq, whither, false, None).is_ok())
                    .collect();

                let (file, rank) = if rivals.is_empty() {
                    (None, None)
                } else if rivals.iter().all(|sq| sq.file() != whence.file()) {
                    (Some(whence.file()), None)
                } else if rivals.iter().all(|sq| sq.rank() != whence.rank()) {
                    (None, Some(whence.rank()))
                } else {
                    (Some(whence.file()), Some(whence.rank()))
                };

                Notation::Piece {
                    role,
                    file,
                    rank,
                    capture: m.is_capture(),
                    whither,
                }
            }
        }
    }

    /// Plays a move in algebraic notation on behalf of the side to move.
    ///
    /// The game is left unchanged if the move is rejected.
    #[instrument(level = "debug", skip(self), fields(turn = %self.turn), ret)]
    pub fn play_move(&mut self, notation: &str) -> Result<Action, InvalidNotation> {
        let action = match self.notation_parser(notation) {
            Ok(action) => action,
            Err(e) => {
                debug!(error = %e, "rejected move");
                return Err(e);
            }
        };

        self.commit(action);
        Ok(action)
    }

    /// Plays an [`Action`] previously obtained from [`Game::generate_moves`].
    #[instrument(level = "debug", skip(self), fields(turn = %self.turn), err)]
    pub fn play(&mut self, action: Action) -> Result<(), IllegalAction> {
        if action.side() != self.turn || !self.generate_moves(self.turn).contains(&action) {
            return Err(IllegalAction(action));
        }

        self.commit(action);
        Ok(())
    }

    /// Takes back the last action, if any.
    #[instrument(level = "debug", skip(self), ret)]
    pub fn undo_move(&mut self) -> Option<Action> {
        let Entry { action, castles } = self.history.pop()?;
        action.undo(&mut self.board);
        self.castles = castles;

        if let Some(p) = action.capture() {
            self.captured[p.color() as usize].pop();
        }

        self.turn = !self.turn;
        Some(action)
    }

    /// Every legal action available to `side`.
    ///
    /// En passant captures are only considered when `side` is the side to move.
    pub fn generate_moves(&self, side: Color) -> Vec<Action> {
        let mut board = self.board;
        let mut actions = Vec::new();

        let origins: Vec<(Square, Piece)> = board.by_color(side).collect();
        let last = Rank::Eighth.perspective(side);

        for (whence, piece) in origins {
            for whither in board.moves(whence).into_iter().flatten() {
                if piece.role() == Role::Pawn && whither.rank() == last {
                    for r in Role::promotions() {
                        let promotion = Some(r);
                        if let Ok(m) = Move::new(&mut board, side, whence, whither, false, promotion) {
                            actions.push(m.into());
                        }
                    }
                } else if let Ok(m) = Move::new(&mut board, side, whence, whither, false, None) {
                    actions.push(m.into());
                }
            }
        }

        for wing in Wing::iter() {
            if let Ok(c) = Castle::new(&mut board, side, wing, self.castles) {
                actions.push(c.into());
            }
        }

        if side == self.turn {
            if let Some(file) = self.en_passant() {
                let whither = Square::new(file, Rank::Sixth.perspective(side));
                for df in [-1, 1] {
                    let whence = whither
                        .backward(side)
                        .and_then(|sq| sq.offset(df, 0))
                        .filter(|&sq| self.is_en_passant(&board, sq, whither));

                    if let Some(whence) = whence {
                        if let Ok(m) = Move::new(&mut board, side, whence, whither, true, None) {
                            actions.push(m.into());
                        }
                    }
                }
            }
        }

        actions
    }

    /// Whether the side to move is in check.
    pub fn is_check(&self) -> bool {
        self.board.in_check(self.turn)
    }

    /// Whether the side to move has no legal actions and is in check.
    pub fn is_checkmate(&self) -> bool {
        self.is_check() && self.generate_moves(self.turn).is_empty()
    }

    /// Whether the side to move has no legal actions but is not in check.
    pub fn is_stalemate(&self) -> bool {
        !self.is_check() && self.generate_moves(self.turn).is_empty()
    }

    /// The [`Outcome`] of the game, if it has ended.
    pub fn outcome(&self) -> Option<Outcome> {
        if !self.generate_moves(self.turn).is_empty() {
            None
        } else if self.is_check() {
            Some(Outcome::Checkmate(!self.turn))
        } else {
            Some(Outcome::Stalemate)
        }
    }

    /// Commits an action known to be legal.
    pub(crate) fn commit(&mut self, action: Action) {
        let castles = self.castles;
        action.execute(&mut self.board);

        for m in action.moves() {
            self.castles.revoke(m.whence());
            self.castles.revoke(m.whither());
        }

        if let Some(p) = action.capture() {
            self.captured[p.color() as usize].push(p.role());
        }

        self.history.push(Entry { action, castles });
        self.turn = !self.turn;
    }

    fn is_en_passant(&self, board: &Board, whence: Square, whither: Square) -> bool {
        let side = self.turn;
        board[whence] == Some(Piece(side, Role::Pawn))
            && board[whither].is_none()
            && whither.rank() == Rank::Sixth.perspective(side)
            && whither.backward(side).and_then(|sq| board[sq]) == Some(Piece(!side, Role::Pawn))
            && self.en_passant() == Some(whither.file())
    }

    fn resolve(&self, board: &mut Board, notation: Notation) -> Result<Action, InvalidNotation> {
        use InvalidNotation::*;

        let side = self.turn;
        let pawn = Some(Piece(side, Role::Pawn));

        match notation {
            Notation::Castle(wing) => Ok(Castle::new(board, side, wing, self.castles)?.into()),

            Notation::Advance { whither, promotion } => {
                let second = Rank::Second.perspective(side);
                let one = whither.backward(side).ok_or(NoOrigin)?;
                let whence = match board[one] {
                    p if p == pawn => one,
                    Some(_) => return Err(NoOrigin),
                    None => match one.backward(side) {
                        Some(two) if board[two] == pawn && two.rank() == second => two,
                        _ => return Err(NoOrigin),
                    },
                };

                self.displace(board, whence, whither, false, promotion)
            }

            Notation::PawnCapture {
                file,
                whither,
                promotion,
            } => {
                let behind = whither.backward(side).ok_or(NoOrigin)?;
                let whence = Square::new(file, behind.rank());

                if board[whence] != pawn {
                    return Err(NoOrigin);
                } else if (file - whither.file()).abs() != 1 {
                    return Err(Unreachable);
                }

                if board[whither].is_some() {
                    self.displace(board, whence, whither, true, promotion)
                } else if self.is_en_passant(board, whence, whither) {
                    Ok(Move::new(board, side, whence, whither, true, promotion)?.into())
                } else {
                    Err(NothingToCapture)
                }
            }

            Notation::Piece {
                role,
                file,
                rank,
                capture,
                whither,
            } => {
                match board[whither] {
                    Some(p) if p.color() == side => return Err(CaptureOfOwnPiece),
                    Some(_) if !capture => return Err(MissingCapture),
                    None if capture => return Err(NothingToCapture),
                    _ => {}
                }

                let candidates: Vec<Square> = board
                    .by_color(side)
                    .filter(|&(_, p)| p.role() == role)
                    .map(|(sq, _)| sq)
                    .filter(|sq| file.map_or(true, |f| sq.file() == f))
                    .filter(|sq| rank.map_or(true, |r| sq.rank() == r))
                    .filter(|&sq| board.reaches(sq, whither))
                    .collect();

                let mut found = None;
                let mut error = None;

                for whence in candidates {
                    match Move::new(board, side, whence, whither, false, None) {
                        Ok(_) if found.is_some() => return Err(Ambiguous),
                        Ok(m) => found = Some(m),
                        Err(e) => {
                            error.get_or_insert(e);
                        }
                    }
                }

                match (found, error) {
                    (Some(m), _) => Ok(m.into()),
                    (None, Some(e)) => Err(e),
                    (None, None) => Err(NoOrigin),
                }
            }
        }
    }

    fn displace(
        &self,
        board: &mut Board,
        whence: Square,
        whither: Square,
        capture: bool,
        promotion: Option<Role>,
    ) -> Result<Action, InvalidNotation> {
        use InvalidNotation::*;

        let side = self.turn;
        if board[whither].is_some_and(|p| p.color() == side) {
            return Err(CaptureOfOwnPiece);
        } else if !board.reaches(whence, whither) {
            return Err(Unreachable);
        }

        match board[whither] {
            Some(_) if !capture => Err(MissingCapture),
            None if capture => Err(NothingToCapture),
            _ => Ok(Move::new(board, side, whence, whither, false, promotion)?.into()),
        }
    }
}

#[cfg(test)]
impl proptest::arbitrary::Arbitrary for Game {
    type Parameters = ();
    type Strategy = proptest::strategy::BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        use proptest::{collection::vec, prelude::*, sample::Selector};

        vec(any::<Selector>(), 0..32)
            .prop_map(|selectors| {
                let mut game = Game::default();
                for selector in selectors {
                    match selector.try_select(game.generate_moves(game.turn())) {
                        Some(action) => game.commit(action),
                        None => break,
                    }
                }

                game
            })
            .no_shrink()
            .boxed()
    }
}
