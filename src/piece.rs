use rand::Rng;

use crate::color::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}
impl PieceKind {
    pub const STARTING_CONFIGURATION: [Self; 8] = [
        PieceKind::Rook,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Queen,
        PieceKind::King,
        PieceKind::Bishop,
        PieceKind::Knight,
        PieceKind::Rook,
    ];
    /// Draws a Chess960-style back rank: one bishop on each square shade,
    /// rooks on the outermost of the remaining columns with the king between
    /// them, then queen and knights on whatever is left, left to right.
    pub fn random_backrank(rng: &mut impl Rng) -> [Self; 8] {
        fn open_columns(backrank: &[Option<PieceKind>; 8]) -> impl Iterator<Item = usize> {
            (0..8).filter(|column| backrank[*column].is_none())
        }
        const LIGHT_COLUMNS: [usize; 4] = [1, 3, 5, 7];
        const DARK_COLUMNS: [usize; 4] = [0, 2, 4, 6];

        let mut backrank = [None; 8];
        backrank[LIGHT_COLUMNS[rng.random_range(0..LIGHT_COLUMNS.len())]] = Some(PieceKind::Bishop);
        backrank[DARK_COLUMNS[rng.random_range(0..DARK_COLUMNS.len())]] = Some(PieceKind::Bishop);

        // Rooks take the two extremes of the six columns left in ascending
        // order and the king the second, so the king always sits strictly
        // between the rooks.
        let open: Vec<usize> = open_columns(&backrank).collect();
        backrank[open[0]] = Some(PieceKind::Rook);
        backrank[open[open.len() - 1]] = Some(PieceKind::Rook);
        backrank[open[1]] = Some(PieceKind::King);

        let open: Vec<usize> = open_columns(&backrank).collect();
        for (column, piece) in open
            .into_iter()
            .zip([PieceKind::Queen, PieceKind::Knight, PieceKind::Knight])
        {
            backrank[column] = Some(piece);
        }
        backrank.map(|piece| piece.unwrap())
    }
}

/// One piece on the board. A piece keeps its identity for the whole game: the
/// board relocates it on a move rather than rebuilding it, so `has_moved`
/// survives. Nothing reads `has_moved` yet; it is tracked for castling and
/// pawn double-step rules that depend on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub color: Color,
    pub kind: PieceKind,
    pub has_moved: bool,
}
impl Piece {
    pub fn new(color: Color, kind: PieceKind) -> Self {
        Piece {
            color,
            kind,
            has_moved: false,
        }
    }
    pub fn figurine(&self) -> char {
        match (self.color, self.kind) {
            (Color::White, PieceKind::Pawn) => '♙',
            (Color::White, PieceKind::Knight) => '♘',
            (Color::White, PieceKind::Bishop) => '♗',
            (Color::White, PieceKind::Rook) => '♖',
            (Color::White, PieceKind::Queen) => '♕',
            (Color::White, PieceKind::King) => '♔',
            (Color::Black, PieceKind::Pawn) => '♟',
            (Color::Black, PieceKind::Knight) => '♞',
            (Color::Black, PieceKind::Bishop) => '♝',
            (Color::Black, PieceKind::Rook) => '♜',
            (Color::Black, PieceKind::Queen) => '♛',
            (Color::Black, PieceKind::King) => '♚',
        }
    }
}
