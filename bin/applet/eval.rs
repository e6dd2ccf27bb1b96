use crate::io::Io;
use anyhow::Error as Anyhow;
use clap::Parser;
use lib::chess::{Board, Color, Diagram, Game};
use std::io::{empty, stdout};
use tracing::instrument;

/// Statically evaluates a position.
#[derive(Debug, Parser)]
#[clap(disable_help_flag = true, disable_version_flag = true)]
pub struct Eval {
    /// The position to evaluate, as 8 rows of 8 symbols separated by `/`.
    #[clap(long)]
    position: Option<Board>,

    /// The side to move.
    #[clap(short, long, default_value = "white")]
    turn: Color,
}

impl Eval {
    #[instrument(level = "trace", skip(self), err)]
    pub fn execute(self) -> Result<(), Anyhow> {
        let mut io = Io::new(stdout(), empty());
        let game = Game::with_board(self.position.unwrap_or_default(), self.turn);

        io.send(Diagram::new(game.board(), Color::White))?;
        io.send(format_args!("material: {:+}", game.board().evaluate_by_material()))?;
        io.send(format_args!("castling: {}", game.castles()))?;

        match game.outcome() {
            Some(outcome) => io.send(outcome)?,
            None if game.is_check() => io.send(format_args!("{} is in check", game.turn()))?,
            None => io.send(format_args!("{} to move", game.turn()))?,
        }

        io.flush()?;
        Ok(())
    }
}
