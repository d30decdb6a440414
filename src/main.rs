#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]

use std::{
    fmt::Write as _,
    io::{stdin, stdout},
};

use rand::{SeedableRng, rngs::SmallRng};

use crate::{
    board_display::BoardDisplay,
    color::Color,
    coord::Coord,
    game::{Game, Mode},
};

mod board;
mod board_display;
mod color;
mod coord;
mod game;
mod piece;

fn read_line() -> String {
    print!("> ");
    {
        use std::io::Write;
        stdout().flush().unwrap();
    }
    let mut input = String::new();
    stdin().read_line(&mut input).unwrap();
    input.trim().to_owned()
}

#[allow(
    clippy::too_many_lines,
    reason = "the session loop mirrors the input handling state machine; splitting it would scatter that state"
)]
fn main() {
    let mut rng = SmallRng::from_os_rng();
    'session: loop {
        println!("select game mode:");
        println!("1 - standard chess");
        println!("2 - chess960");
        let mode = loop {
            match read_line().as_str() {
                "1" => break Mode::Standard,
                "2" => break Mode::FischerRandom,
                "exit" => return,
                _ => eprintln!("Error: type `1`, `2`, or `exit`"),
            }
        };
        let mut game = Game::new(mode, &mut rng);
        let mut info = String::new();
        let mut highlighted: Vec<Coord> = Vec::new();
        let mut view = Color::White;
        let mut first_time = true;
        loop {
            info.clear();
            if let Some(winner) = game.winner() {
                writeln!(&mut info, "{winner} wins!").unwrap();
                writeln!(&mut info, "play again? (y/n)").unwrap();
            } else {
                writeln!(&mut info, "{} plays", game.current_player()).unwrap();
            }
            if first_time {
                writeln!(&mut info, "type `help` for instructions").unwrap();
                first_time = false;
            }
            print!(
                "{}",
                BoardDisplay {
                    board: game.board(),
                    view,
                    highlighted: &highlighted,
                    info: &info,
                },
            );
            loop {
                let input = read_line();
                let input = input.as_str();
                if game.winner().is_some() {
                    match input {
                        "y" | "Y" => continue 'session,
                        "n" | "N" | "exit" => return,
                        _ => {
                            eprintln!("Error: type `y` or `n`");
                            continue;
                        }
                    }
                }
                if input == "help" {
                    println!("flip    - flip the board");
                    println!("restart - return to the mode menu");
                    println!("exit    - exit the game");
                    println!("e2      - view the moves of a piece");
                    println!("e2e4    - play the move");
                } else if input == "exit" {
                    return;
                } else if input == "restart" {
                    continue 'session;
                } else if input == "flip" {
                    view = !view;
                } else if let Ok(square) = input.parse::<Coord>() {
                    highlighted.clear();
                    highlighted.extend(game.moves_from(square));
                } else {
                    let (Some(origin), Some(destination)) =
                        (input.get(0..2), input.get(2..4))
                    else {
                        eprintln!("Error: `{input}` is not a command or a move");
                        continue;
                    };
                    if input.len() != 4 {
                        eprintln!("Error: `{input}` is not a command or a move");
                        continue;
                    }
                    let origin: Coord = match origin.parse() {
                        Ok(origin) => origin,
                        Err(err) => {
                            eprintln!("Error: {err}");
                            continue;
                        }
                    };
                    let destination: Coord = match destination.parse() {
                        Ok(destination) => destination,
                        Err(err) => {
                            eprintln!("Error: {err}");
                            continue;
                        }
                    };
                    if let Err(err) = game.play(origin, destination) {
                        eprintln!("Error: {err}");
                        continue;
                    }
                    highlighted.clear();
                    highlighted.push(origin);
                    highlighted.push(destination);
                }
                break;
            }
        }
    }
}
