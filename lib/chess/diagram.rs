use crate::chess::{Board, Color, File, Rank, Square};
use std::fmt::{self, Write};

/// A human readable rendition of a [`Board`] as seen by one of the players.
///
/// Ranks are printed one per line, the far rank first, and squares are
/// separated by a space. Empty squares are printed as `.`.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Diagram<'a> {
    board: &'a Board,
    perspective: Color,
}

impl<'a> Diagram<'a> {
    /// The [`Board`] as seen from the side of `perspective`.
    pub fn new(board: &'a Board, perspective: Color) -> Self {
        Diagram { board, perspective }
    }
}

impl fmt::Display for Diagram<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ranks: Vec<Rank> = match self.perspective {
            Color::White => Rank::iter().rev().collect(),
            Color::Black => Rank::iter().collect(),
        };

        let files: Vec<File> = match self.perspective {
            Color::White => File::iter().collect(),
            Color::Black => File::iter().rev().collect(),
        };

        for (i, &rank) in ranks.iter().enumerate() {
            if i > 0 {
                f.write_char('\n')?;
            }

            for (j, &file) in files.iter().enumerate() {
                if j > 0 {
                    f.write_char(' ')?;
                }

                match self.board[Square::new(file, rank)] {
                    None => f.write_char('.')?,
                    Some(p) => f.write_char(p.symbol())?,
                }
            }
        }

        Ok(())
    }
}
