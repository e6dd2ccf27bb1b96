use crate::io::Io;
use anyhow::{Context, Error as Anyhow};
use clap::Parser;
use lib::chess::{Board, Color, Game};
use lib::search::{Control, Limits};
use lib::util::{Counter, Timer, Trigger};
use std::io::{empty, stdout};
use std::time::Instant;
use tracing::{info, instrument};

/// Counts the games reachable in a number of plies.
#[derive(Debug, Parser)]
#[clap(disable_help_flag = true, disable_version_flag = true)]
pub struct Perft {
    /// How many plies to enumerate.
    depth: u8,

    /// Bounds on the enumeration.
    #[clap(short, long, default_value_t)]
    limits: Limits,

    /// The starting position, as 8 rows of 8 symbols separated by `/`.
    #[clap(long)]
    position: Option<Board>,

    /// The side to move in the starting position.
    #[clap(short, long, default_value = "white")]
    turn: Color,
}

impl Perft {
    #[instrument(level = "trace", skip(self), err)]
    pub fn execute(self) -> Result<(), Anyhow> {
        let mut io = Io::new(stdout(), empty());
        let game = match self.position {
            None => Game::default(),
            Some(board) => Game::with_board(board, self.turn),
        };

        let counter = Counter::new(self.limits.nodes());
        let timer = Timer::new(self.limits.time());
        let trigger = Trigger::new();
        let ctrl = Control::Limited(&counter, &timer, &trigger);

        let start = Instant::now();
        let mut total = 0;

        if self.depth == 0 {
            total = 1;
        } else {
            for action in game.generate_moves(game.turn()) {
                let mut next = game.clone();
                next.play(action)?;

                let nodes = next
                    .perft(self.depth - 1, &ctrl)
                    .with_context(|| format!("enumeration bounded by `{}`", self.limits))?;

                io.send(format_args!("{}: {}", game.notation(&action), nodes))?;
                total += nodes;
            }
        }

        io.send(format_args!("total: {total}"))?;
        io.flush()?;

        info!(depth = self.depth, total, expanded = ctrl.expanded(), elapsed = ?start.elapsed());

        Ok(())
    }
}
