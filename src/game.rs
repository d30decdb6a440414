use std::{
    error::Error,
    fmt::{self, Display, Formatter},
};

use rand::Rng;
use rustc_hash::FxHashSet;

use crate::{board::Board, color::Color, coord::Coord};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    Standard,
    FischerRandom,
}

/// One game session: the board plus the turn indicator and the cached
/// outcome. Everything the engine needs lives here; there is no shared
/// state, so independent sessions can run side by side.
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    current_player: Color,
    winner: Option<Color>,
}
impl Game {
    pub fn new(mode: Mode, rng: &mut impl Rng) -> Self {
        let board = match mode {
            Mode::Standard => Board::standard(),
            Mode::FischerRandom => Board::fischer_random(rng),
        };
        Game {
            board,
            current_player: Color::White,
            winner: None,
        }
    }
    pub fn board(&self) -> &Board {
        &self.board
    }
    pub fn current_player(&self) -> Color {
        self.current_player
    }
    pub fn winner(&self) -> Option<Color> {
        self.winner
    }
    /// The destinations to highlight for `origin`: empty unless the game is
    /// still running and the square holds a piece of the side to move.
    pub fn moves_from(&self, origin: Coord) -> FxHashSet<Coord> {
        if self.winner.is_some()
            || self
                .board
                .get(origin)
                .is_none_or(|piece| piece.color != self.current_player)
        {
            FxHashSet::default()
        } else {
            self.board.moves_from(origin)
        }
    }
    /// Validates and plays one move, then passes the turn and rescans the
    /// board for a winner.
    pub fn play(&mut self, origin: Coord, destination: Coord) -> Result<(), IllegalMove> {
        if self.winner.is_some() {
            return Err(IllegalMove::GameOver);
        }
        let Some(piece) = self.board.get(origin) else {
            return Err(IllegalMove::EmptySquare(origin));
        };
        if piece.color != self.current_player {
            return Err(IllegalMove::OpponentPiece(origin));
        }
        if !self.board.moves_from(origin).contains(&destination) {
            return Err(IllegalMove::Unreachable {
                origin,
                destination,
            });
        }
        self.board.apply(origin, destination);
        self.current_player = !self.current_player;
        self.winner = self.board.winner();
        Ok(())
    }
}
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IllegalMove {
    GameOver,
    EmptySquare(Coord),
    OpponentPiece(Coord),
    Unreachable { origin: Coord, destination: Coord },
}
impl Display for IllegalMove {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            IllegalMove::GameOver => write!(f, "the game is already over")?,
            IllegalMove::EmptySquare(square) => write!(f, "no piece on {square}")?,
            IllegalMove::OpponentPiece(square) => {
                write!(f, "the piece on {square} belongs to the opponent")?;
            }
            IllegalMove::Unreachable {
                origin,
                destination,
            } => write!(f, "the piece on {origin} cannot reach {destination}")?,
        }
        Ok(())
    }
}
impl Error for IllegalMove {}
