use crate::chess::Game;
use crate::search::{Control, Interrupted};
use rayon::prelude::*;
use tracing::instrument;

impl Game {
    /// Every game reachable from this one in `depth` plies.
    ///
    /// Games that end before `depth` plies are included as they are.
    /// Branches are explored in parallel, each on its own clone of the game.
    #[instrument(level = "debug", skip(self, ctrl), err)]
    pub fn possible_games(&self, depth: u8, ctrl: &Control) -> Result<Vec<Game>, Interrupted> {
        ctrl.expand()?;

        let actions = match depth {
            0 => Vec::new(),
            _ => self.generate_moves(self.turn()),
        };

        if actions.is_empty() {
            return Ok(vec![self.clone()]);
        }

        let branches: Vec<Vec<Game>> = actions
            .into_par_iter()
            .map(|action| {
                let mut next = self.clone();
                next.commit(action);
                next.possible_games(depth - 1, ctrl)
            })
            .collect::<Result<_, _>>()?;

        Ok(branches.into_iter().flatten().collect())
    }

    /// Counts the leaf nodes of the game tree `depth` plies deep.
    ///
    /// Unlike [`Game::possible_games`], games that end early are not counted.
    #[instrument(level = "debug", skip(self, ctrl), err)]
    pub fn perft(&self, depth: u8, ctrl: &Control) -> Result<usize, Interrupted> {
        self.count(depth, ctrl)
    }

    fn count(&self, depth: u8, ctrl: &Control) -> Result<usize, Interrupted> {
        ctrl.expand()?;

        match depth {
            0 => Ok(1),
            1 => Ok(self.generate_moves(self.turn()).len()),
            _ => self
                .generate_moves(self.turn())
                .into_par_iter()
                .map(|action| {
                    let mut next = self.clone();
                    next.commit(action);
                    next.count(depth - 1, ctrl)
                })
                .sum(),
        }
    }
}
