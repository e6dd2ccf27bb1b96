use crate::io::Io;
use anyhow::{Context, Error as Anyhow};
use clap::Parser;
use lib::chess::{Board, Color, Diagram, Game};
use std::io::{stdin, stdout};
use tracing::{info, instrument, warn};

/// Plays a game of chess, reading moves in algebraic notation from the standard input.
///
/// Besides moves, `undo` takes back the last move and `moves` lists the legal moves.
#[derive(Debug, Parser)]
#[clap(disable_help_flag = true, disable_version_flag = true)]
pub struct Play {
    /// The side whose point of view the board is printed from.
    #[clap(short, long, default_value = "white")]
    perspective: Color,

    /// The starting position, as 8 rows of 8 symbols separated by `/`.
    #[clap(long)]
    position: Option<Board>,

    /// The side to move in the starting position.
    #[clap(short, long, default_value = "white")]
    turn: Color,
}

impl Default for Play {
    fn default() -> Self {
        Play {
            perspective: Color::White,
            position: None,
            turn: Color::White,
        }
    }
}

impl Play {
    #[instrument(level = "trace", skip(self), err)]
    pub fn execute(self) -> Result<(), Anyhow> {
        let mut io = Io::new(stdout(), stdin());
        let mut game = match self.position {
            None => Game::default(),
            Some(board) => Game::with_board(board, self.turn),
        };

        io.send(Diagram::new(game.board(), self.perspective))?;

        while game.outcome().is_none() {
            io.send(format_args!("{} to move", game.turn()))?;
            io.flush()?;

            let Some(line) = io.recv().context("failed to read from the standard input")? else {
                break;
            };

            match line.trim() {
                "" => continue,

                "moves" => {
                    let moves: Vec<String> = game
                        .generate_moves(game.turn())
                        .iter()
                        .map(|a| game.notation(a).to_string())
                        .collect();

                    io.send(moves.join(" "))?;
                }

                "undo" => match game.undo_move() {
                    None => io.send("there is nothing to undo")?,
                    Some(action) => {
                        info!(%action, "took back");
                        io.send(Diagram::new(game.board(), self.perspective))?;
                    }
                },

                text => match game.play_move(text) {
                    Err(e) => {
                        warn!(text, error = %e, "rejected");
                        io.send(e)?;
                    }

                    Ok(action) => {
                        info!(%action, "played");
                        io.send(Diagram::new(game.board(), self.perspective))?;
                        if game.is_check() {
                            io.send("check")?;
                        }
                    }
                },
            }
        }

        if let Some(outcome) = game.outcome() {
            io.send(outcome)?;
        }

        io.flush()?;
        Ok(())
    }
}
