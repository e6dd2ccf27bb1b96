use lib::chess::{Board, Color, Game};
use lib::search::Control;
use rayon::prelude::*;

fn game(position: &str, turn: Color) -> Game {
    let board: Board = position.parse().unwrap();
    Game::with_board(board, turn)
}

fn perft(game: &Game, depth: u8) -> usize {
    match depth {
        0 => 1,
        1 => game.generate_moves(game.turn()).len(),
        d => game
            .generate_moves(game.turn())
            .into_par_iter()
            .map(|a| {
                let mut next = game.clone();
                next.play(a).unwrap();
                perft(&next, d - 1)
            })
            .sum(),
    }
}

#[test]
fn perft_from_the_starting_position() {
    // https://www.chessprogramming.org/Perft_Results#Initial_Position
    let game = Game::default();
    assert_eq!(perft(&game, 1), 20);
    assert_eq!(perft(&game, 2), 400);
    assert_eq!(perft(&game, 3), 8902);
    assert_eq!(perft(&game, 4), 197281);
}

#[test]
fn perft_with_castling_en_passant_and_promotions() {
    // https://www.chessprogramming.org/Perft_Results#Position_2
    let game = game(
        "R...K..R/P.PPQPB./BN..PNP./...pn.../.P..p.../..n..q.P/pppbbppp/r...k..r",
        Color::White,
    );

    assert_eq!(perft(&game, 1), 48);
    assert_eq!(perft(&game, 2), 2039);
    assert_eq!(perft(&game, 3), 97862);
}

#[test]
fn perft_with_pins_along_ranks() {
    // https://www.chessprogramming.org/Perft_Results#Position_3
    let game = game(
        "......../..P...../...P..../kp.....R/.r...P.K/......../....p.p./........",
        Color::White,
    );

    assert_eq!(perft(&game, 1), 14);
    assert_eq!(perft(&game, 2), 191);
    assert_eq!(perft(&game, 3), 2812);
    assert_eq!(perft(&game, 4), 43238);
}

#[test]
fn library_perft_agrees_with_reference_counts() {
    let game = Game::default();
    assert_eq!(game.perft(3, &Control::Unlimited), Ok(8902));
}

#[test]
fn possible_games_enumerates_every_sequence() {
    let games = Game::default().possible_games(2, &Control::Unlimited).unwrap();
    assert_eq!(games.len(), 400);
    assert!(games.iter().all(|g| g.history().len() == 2));
    assert!(games.iter().all(|g| g.turn() == Color::White));
}
