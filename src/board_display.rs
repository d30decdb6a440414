use std::fmt::{self, Display, Formatter};

use crate::{board::Board, color::Color, coord::Coord, piece::Piece};

const WHITE: &str = "\x1b[30;107m";
const BLACK: &str = "\x1b[30;47m";
const HIGHLIGHTED: &str = "\x1b[30;103m";
const RESET: &str = "\x1b[0m";

/// Renders the board for the terminal, optionally flipped for black's view,
/// with highlighted destination squares and an info column beside the board.
pub struct BoardDisplay<'a, 'b> {
    pub board: &'a Board,
    pub view: Color,
    pub highlighted: &'a [Coord],
    pub info: &'b str,
}
impl Display for BoardDisplay<'_, '_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut lines = self.info.lines().fuse();
        for row in 0..8 {
            let row = match self.view {
                Color::White => row,
                Color::Black => 7 - row,
            };
            for col in 0..8 {
                let col = match self.view {
                    Color::White => col,
                    Color::Black => 7 - col,
                };
                let square = Coord::new(row, col);
                let background = if self.highlighted.contains(&square) {
                    HIGHLIGHTED
                } else {
                    match square.color() {
                        Color::White => WHITE,
                        Color::Black => BLACK,
                    }
                };
                let figurine = self
                    .board
                    .get(square)
                    .map_or(' ', Piece::figurine);
                write!(f, "{background}{figurine} {RESET}")?;
            }
            write!(f, "{}", 8 - row)?;
            if let Some(line) = lines.next() {
                write!(f, " {line}")?;
            }
            writeln!(f)?;
        }
        match self.view {
            Color::White => write!(f, "a b c d e f g h")?,
            Color::Black => write!(f, "h g f e d c b a")?,
        }
        if let Some(line) = lines.next() {
            write!(f, "   {line}")?;
        }
        writeln!(f)?;
        for line in lines {
            writeln!(f, "                  {line}")?;
        }
        Ok(())
    }
}
