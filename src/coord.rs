use std::{
    error::Error,
    fmt::{self, Display, Formatter},
    num::NonZero,
    ops::Mul,
    str::FromStr,
};

use crate::color::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParseCoordError {
    InvalidFile(char),
    InvalidRank(char),
    NotEnoughCharacter(u8),
    Unexpected(char),
}
impl Display for ParseCoordError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ParseCoordError::InvalidFile(file) => write!(
                f,
                "found `{file}`, characters from `a` to `h` were expected instead"
            )?,
            ParseCoordError::InvalidRank(rank) => write!(
                f,
                "found `{rank}`, characters from `1` to `8` were expected instead"
            )?,
            ParseCoordError::NotEnoughCharacter(len) => write!(
                f,
                "provided string have length of {len} characters, 2 were expected"
            )?,
            ParseCoordError::Unexpected(c) => write!(f, "unexpected `{c}`")?,
        }
        Ok(())
    }
}
impl Error for ParseCoordError {}

// Bit structure: 10RRRCCC
// first two bits is always `10` for `NonZero` size optimizations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Coord(NonZero<u8>);

impl Coord {
    pub fn new(row: u8, col: u8) -> Self {
        debug_assert!(row < 8);
        debug_assert!(col < 8);
        let byte = 0b1000_0000 | (row << 3) | col;
        Coord(NonZero::new(byte).unwrap())
    }
    pub fn new_checked(row: u8, col: u8) -> Option<Self> {
        if row >= 8 || col >= 8 {
            None
        } else {
            Some(Self::new(row, col))
        }
    }
    pub fn from_chars(file: char, rank: char) -> Result<Self, ParseCoordError> {
        let col = match file {
            'a'..='h' => file as u8 - b'a',
            _ => return Err(ParseCoordError::InvalidFile(file)),
        };
        let row = match rank {
            '1'..='8' => 7 - (rank as u8 - b'1'),
            _ => return Err(ParseCoordError::InvalidRank(rank)),
        };
        Ok(Coord::new(row, col))
    }
    pub fn row(self) -> u8 {
        (self.0.get() >> 3) & 0b_111
    }
    pub fn col(self) -> u8 {
        self.0.get() & 0b_111
    }
    pub fn move_by(self, movement: Vector) -> Option<Self> {
        Self::new_checked(
            self.row().checked_add_signed(movement.row)?,
            self.col().checked_add_signed(movement.col)?,
        )
    }
    /// Squares along `direction`, nearest first, excluding `self`, ending at
    /// the board edge.
    pub fn ray(self, direction: Vector) -> impl Iterator<Item = Self> {
        (1..).map_while(move |distance| self.move_by(direction * distance))
    }
    pub fn color(self) -> Color {
        match (self.row() + self.col()) % 2 {
            0 => Color::White,
            1 => Color::Black,
            _ => unreachable!(),
        }
    }
}
/// The rank a pawn of this color starts on, where a double step is allowed.
pub fn pawn_home_row(color: Color) -> u8 {
    match color {
        Color::White => 6,
        Color::Black => 1,
    }
}
/// The rank the non-pawn pieces of this color start on.
pub fn back_row(color: Color) -> u8 {
    match color {
        Color::White => 7,
        Color::Black => 0,
    }
}
impl Display for Coord {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let file = char::from(self.col() + b'a');
        let rank = 8 - self.row();
        write!(f, "{file}{rank}")?;
        Ok(())
    }
}
impl FromStr for Coord {
    type Err = ParseCoordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let Some(file) = chars.next() else {
            return Err(ParseCoordError::NotEnoughCharacter(0));
        };
        let Some(rank) = chars.next() else {
            return Err(ParseCoordError::NotEnoughCharacter(1));
        };
        if let Some(c) = chars.next() {
            return Err(ParseCoordError::Unexpected(c));
        }
        Coord::from_chars(file, rank)
    }
}
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Vector {
    pub row: i8,
    pub col: i8,
}
impl Vector {
    pub const KNIGHT_STEPS: [Self; 8] = [
        Vector { row: 2, col: 1 },
        Vector { row: 2, col: -1 },
        Vector { row: -2, col: 1 },
        Vector { row: -2, col: -1 },
        Vector { row: 1, col: 2 },
        Vector { row: 1, col: -2 },
        Vector { row: -1, col: 2 },
        Vector { row: -1, col: -2 },
    ];
    pub const KING_STEPS: [Self; 8] = [
        Vector { row: -1, col: -1 },
        Vector { row: -1, col: 0 },
        Vector { row: -1, col: 1 },
        Vector { row: 0, col: -1 },
        Vector { row: 0, col: 1 },
        Vector { row: 1, col: -1 },
        Vector { row: 1, col: 0 },
        Vector { row: 1, col: 1 },
    ];
    pub const ROOK_DIRECTIONS: [Self; 4] = [
        Vector { row: 1, col: 0 },
        Vector { row: -1, col: 0 },
        Vector { row: 0, col: 1 },
        Vector { row: 0, col: -1 },
    ];
    pub const BISHOP_DIRECTIONS: [Self; 4] = [
        Vector { row: 1, col: 1 },
        Vector { row: 1, col: -1 },
        Vector { row: -1, col: 1 },
        Vector { row: -1, col: -1 },
    ];
    pub const QUEEN_DIRECTIONS: [Self; 8] = [
        Vector { row: 1, col: 0 },
        Vector { row: -1, col: 0 },
        Vector { row: 0, col: 1 },
        Vector { row: 0, col: -1 },
        Vector { row: 1, col: 1 },
        Vector { row: 1, col: -1 },
        Vector { row: -1, col: 1 },
        Vector { row: -1, col: -1 },
    ];

    pub fn pawn_step(color: Color) -> Self {
        Vector {
            row: pawn_direction(color),
            col: 0,
        }
    }
    pub fn pawn_captures(color: Color) -> [Self; 2] {
        [-1, 1].map(|col| Vector {
            row: pawn_direction(color),
            col,
        })
    }
}
/// White advances toward row 0, black toward row 7.
pub fn pawn_direction(color: Color) -> i8 {
    match color {
        Color::White => -1,
        Color::Black => 1,
    }
}
impl Mul<i8> for Vector {
    type Output = Vector;

    fn mul(self, rhs: i8) -> Self::Output {
        Vector {
            row: self.row * rhs,
            col: self.col * rhs,
        }
    }
}
