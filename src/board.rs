use std::{num::NonZero, ops::Index};

use rand::Rng;
use rustc_hash::FxHashSet;

use crate::{
    color::Color,
    coord::{Coord, Vector, back_row, pawn_home_row},
    piece::{Piece, PieceKind},
};

// Bit structure: 100SSSSS
// the fixed high bit keeps the byte non-zero, so a grid cell
// (`Option<PieceId>`) stays a single byte
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceId(NonZero<u8>);
impl PieceId {
    fn new(slot: usize) -> Self {
        debug_assert!(slot < 32);
        let byte: u8 = slot.try_into().unwrap();
        PieceId(NonZero::new(byte | 0b_1000_0000).unwrap())
    }
    fn slot(self) -> usize {
        (self.0.get() & 0b_1_1111) as usize
    }
}

/// The 8×8 board. Row 0 is black's back rank, row 7 white's.
///
/// Cells hold ids into a piece arena rather than pieces, so a move relocates
/// the same piece entity and a capture just drops the captured id from its
/// cell. A given id is referenced by at most one cell; captured pieces keep
/// their arena slot but no cell points at them anymore.
#[derive(Debug, Clone)]
pub struct Board {
    squares: [[Option<PieceId>; 8]; 8],
    pieces: Vec<Piece>,
}
impl Board {
    /// The fixed historical opening position.
    pub fn standard() -> Self {
        Board::from_backrank(PieceKind::STARTING_CONFIGURATION)
    }
    /// A Chess960-style opening position. One arrangement is drawn and
    /// applied to both colors at identical columns, mirroring the ranks
    /// rather than randomizing each side on its own.
    pub fn fischer_random(rng: &mut impl Rng) -> Self {
        Board::from_backrank(PieceKind::random_backrank(rng))
    }
    fn empty() -> Self {
        Board {
            squares: [[None; 8]; 8],
            pieces: Vec::with_capacity(32),
        }
    }
    fn from_backrank(backrank: [PieceKind; 8]) -> Self {
        let mut board = Board::empty();
        for (column, kind) in backrank.into_iter().enumerate() {
            let column: u8 = column.try_into().unwrap();
            board.place(Coord::new(back_row(Color::Black), column), Color::Black, kind);
            board.place(Coord::new(back_row(Color::White), column), Color::White, kind);
        }
        for column in 0..8 {
            board.place(
                Coord::new(pawn_home_row(Color::Black), column),
                Color::Black,
                PieceKind::Pawn,
            );
            board.place(
                Coord::new(pawn_home_row(Color::White), column),
                Color::White,
                PieceKind::Pawn,
            );
        }
        board
    }
    fn place(&mut self, square: Coord, color: Color, kind: PieceKind) {
        let id = PieceId::new(self.pieces.len());
        self.pieces.push(Piece::new(color, kind));
        self.squares[usize::from(square.row())][usize::from(square.col())] = Some(id);
    }
    pub fn get(&self, square: Coord) -> Option<&Piece> {
        self[square].map(|id| &self[id])
    }
    /// The pseudo-legal destinations of the piece on `origin`: every square
    /// its movement pattern reaches given the current occupancy, with no
    /// check filtering of any kind. An empty origin has no destinations.
    pub fn moves_from(&self, origin: Coord) -> FxHashSet<Coord> {
        let Some(piece) = self.get(origin) else {
            return FxHashSet::default();
        };
        let color = piece.color;
        match piece.kind {
            PieceKind::Pawn => self.pawn_targets(origin, color).collect(),
            PieceKind::Knight => self
                .step_targets(origin, color, &Vector::KNIGHT_STEPS)
                .collect(),
            PieceKind::Bishop => self
                .sliding_targets(origin, color, &Vector::BISHOP_DIRECTIONS)
                .collect(),
            PieceKind::Rook => self
                .sliding_targets(origin, color, &Vector::ROOK_DIRECTIONS)
                .collect(),
            PieceKind::Queen => self
                .sliding_targets(origin, color, &Vector::QUEEN_DIRECTIONS)
                .collect(),
            PieceKind::King => self
                .step_targets(origin, color, &Vector::KING_STEPS)
                .collect(),
        }
    }
    fn step_targets<'a>(
        &'a self,
        origin: Coord,
        color: Color,
        steps: &'a [Vector],
    ) -> impl Iterator<Item = Coord> + 'a {
        steps
            .iter()
            .copied()
            .filter_map(move |step| origin.move_by(step))
            .filter(move |destination| {
                self.get(*destination)
                    .is_none_or(|piece| piece.color != color)
            })
    }
    fn sliding_targets<'a>(
        &'a self,
        origin: Coord,
        color: Color,
        directions: &'a [Vector],
    ) -> impl Iterator<Item = Coord> + 'a {
        directions
            .iter()
            .copied()
            .flat_map(move |direction| self.ray_targets(origin, color, direction))
    }
    fn ray_targets(
        &self,
        origin: Coord,
        color: Color,
        direction: Vector,
    ) -> impl Iterator<Item = Coord> {
        let mut resume = true;
        origin.ray(direction).map_while(move |destination| {
            if resume {
                if let Some(piece) = self.get(destination) {
                    resume = false;
                    (piece.color != color).then_some(destination)
                } else {
                    Some(destination)
                }
            } else {
                None
            }
        })
    }
    // The forward ray is taken while empty, so the double step is only
    // reachable when the single step already was; the square in between is
    // never inspected on its own.
    fn pawn_targets(&self, origin: Coord, color: Color) -> impl Iterator<Item = Coord> {
        let forward_jumps = if origin.row() == pawn_home_row(color) {
            2
        } else {
            1
        };
        origin
            .ray(Vector::pawn_step(color))
            .take(forward_jumps)
            .take_while(move |square| self.get(*square).is_none())
            .chain(
                Vector::pawn_captures(color)
                    .into_iter()
                    .filter_map(move |step| origin.move_by(step))
                    .filter(move |square| {
                        self.get(*square)
                            .is_some_and(|piece| piece.color != color)
                    }),
            )
    }
    /// Relocates the piece on `origin` to `destination`, capturing whatever
    /// was there. The destination is trusted to come from [`Board::moves_from`];
    /// the session layer is the one validating that.
    ///
    /// # Panics
    ///
    /// Panics when `origin` is empty.
    pub fn apply(&mut self, origin: Coord, destination: Coord) {
        let id = self[origin].expect("no piece on the origin square");
        self.squares[usize::from(origin.row())][usize::from(origin.col())] = None;
        self.squares[usize::from(destination.row())][usize::from(destination.col())] = Some(id);
        self.pieces[id.slot()].has_moved = true;
    }
    /// Scans the board for kings. A side wins as soon as the opposing king is
    /// gone; with both kings gone the white-missing scan runs first and black
    /// is reported. Not a checkmate computation.
    pub fn winner(&self) -> Option<Color> {
        if !self.has_king(Color::White) {
            Some(Color::Black)
        } else if !self.has_king(Color::Black) {
            Some(Color::White)
        } else {
            None
        }
    }
    fn has_king(&self, color: Color) -> bool {
        self.squares
            .iter()
            .flatten()
            .filter_map(|id| *id)
            .any(|id| {
                let piece = &self[id];
                piece.kind == PieceKind::King && piece.color == color
            })
    }
}
impl Index<Coord> for Board {
    type Output = Option<PieceId>;

    fn index(&self, index: Coord) -> &Self::Output {
        &self.squares[usize::from(index.row())][usize::from(index.col())]
    }
}
impl Index<PieceId> for Board {
    type Output = Piece;

    fn index(&self, index: PieceId) -> &Self::Output {
        &self.pieces[index.slot()]
    }
}
#[cfg(test)]
mod test {
    use rand::{SeedableRng, rngs::SmallRng};
    use rustc_hash::FxHashSet;

    use crate::{
        board::Board,
        color::Color,
        coord::Coord,
        piece::PieceKind,
    };

    fn squares(texts: &[&str]) -> FxHashSet<Coord> {
        texts.iter().map(|text| text.parse().unwrap()).collect()
    }
    fn at(board: &Board, text: &str) -> (Color, PieceKind) {
        let piece = board.get(text.parse().unwrap()).unwrap();
        (piece.color, piece.kind)
    }

    #[test]
    fn standard_position_layout() {
        let board = Board::standard();
        assert_eq!(at(&board, "a8"), (Color::Black, PieceKind::Rook));
        assert_eq!(at(&board, "h8"), (Color::Black, PieceKind::Rook));
        assert_eq!(at(&board, "b8"), (Color::Black, PieceKind::Knight));
        assert_eq!(at(&board, "e8"), (Color::Black, PieceKind::King));
        assert_eq!(at(&board, "a1"), (Color::White, PieceKind::Rook));
        assert_eq!(at(&board, "h1"), (Color::White, PieceKind::Rook));
        assert_eq!(at(&board, "d1"), (Color::White, PieceKind::Queen));
        for column in 0..8 {
            assert_eq!(
                board.get(Coord::new(1, column)).map(|piece| piece.kind),
                Some(PieceKind::Pawn)
            );
            assert_eq!(
                board.get(Coord::new(6, column)).map(|piece| piece.kind),
                Some(PieceKind::Pawn)
            );
        }
        assert_eq!(board.winner(), None);
    }
    #[test]
    fn fischer_random_mirrors_one_arrangement_on_both_ranks() {
        let mut rng = SmallRng::seed_from_u64(7);
        for _ in 0..50 {
            let board = Board::fischer_random(&mut rng);
            for column in 0..8 {
                let black = board.get(Coord::new(0, column)).unwrap();
                let white = board.get(Coord::new(7, column)).unwrap();
                assert_eq!(black.kind, white.kind);
                assert_eq!(black.color, Color::Black);
                assert_eq!(white.color, Color::White);
                assert_eq!(
                    board.get(Coord::new(1, column)).map(|piece| piece.kind),
                    Some(PieceKind::Pawn)
                );
                assert_eq!(
                    board.get(Coord::new(6, column)).map(|piece| piece.kind),
                    Some(PieceKind::Pawn)
                );
            }
        }
    }
    #[test]
    fn pawns_have_the_double_step_from_their_home_row() {
        let board = Board::standard();
        assert_eq!(
            board.moves_from("e2".parse().unwrap()),
            squares(&["e3", "e4"])
        );
        assert_eq!(
            board.moves_from("e7".parse().unwrap()),
            squares(&["e6", "e5"])
        );
    }
    #[test]
    fn blocked_pawn_has_no_moves() {
        let mut board = Board::empty();
        board.place("e4".parse().unwrap(), Color::White, PieceKind::Pawn);
        board.place("e5".parse().unwrap(), Color::Black, PieceKind::Pawn);
        assert_eq!(board.moves_from("e4".parse().unwrap()), squares(&[]));
    }
    #[test]
    fn pawn_captures_diagonally_only_against_the_opponent() {
        let mut board = Board::empty();
        board.place("e4".parse().unwrap(), Color::White, PieceKind::Pawn);
        board.place("d5".parse().unwrap(), Color::Black, PieceKind::Pawn);
        board.place("f5".parse().unwrap(), Color::White, PieceKind::Pawn);
        assert_eq!(
            board.moves_from("e4".parse().unwrap()),
            squares(&["e5", "d5"])
        );
    }
    #[test]
    fn sliding_stops_before_a_friend_and_on_an_enemy() {
        let mut board = Board::empty();
        board.place("d4".parse().unwrap(), Color::White, PieceKind::Rook);
        board.place("d6".parse().unwrap(), Color::White, PieceKind::Pawn);
        board.place("b4".parse().unwrap(), Color::Black, PieceKind::Knight);
        let moves = board.moves_from("d4".parse().unwrap());
        assert_eq!(
            moves,
            squares(&["d5", "d3", "d2", "d1", "c4", "b4", "e4", "f4", "g4", "h4"])
        );
    }
    #[test]
    fn knight_jumps_over_the_pawn_row() {
        let board = Board::standard();
        assert_eq!(
            board.moves_from("b1".parse().unwrap()),
            squares(&["a3", "c3"])
        );
    }
    #[test]
    fn king_steps_around_friends_and_onto_enemies() {
        let mut board = Board::empty();
        board.place("d4".parse().unwrap(), Color::White, PieceKind::King);
        board.place("c4".parse().unwrap(), Color::White, PieceKind::Pawn);
        board.place("d5".parse().unwrap(), Color::Black, PieceKind::Pawn);
        assert_eq!(
            board.moves_from("d4".parse().unwrap()),
            squares(&["c3", "d3", "e3", "e4", "c5", "d5", "e5"])
        );
    }
    #[test]
    fn moves_from_an_empty_square_is_empty() {
        let board = Board::standard();
        assert_eq!(board.moves_from("e4".parse().unwrap()), squares(&[]));
    }
    #[test]
    fn apply_relocates_the_same_piece_and_nothing_else() {
        let mut board = Board::standard();
        let origin: Coord = "e2".parse().unwrap();
        let destination: Coord = "e4".parse().unwrap();
        let id = board[origin].unwrap();
        let before = board.squares;
        board.apply(origin, destination);
        assert_eq!(board[origin], None);
        assert_eq!(board[destination], Some(id));
        assert!(board[id].has_moved);
        assert_eq!(board[id].kind, PieceKind::Pawn);
        for row in 0..8 {
            for col in 0..8 {
                let square = Coord::new(row, col);
                if square != origin && square != destination {
                    assert_eq!(
                        board[square],
                        before[usize::from(row)][usize::from(col)]
                    );
                }
            }
        }
    }
    #[test]
    fn missing_king_decides_the_winner() {
        let mut board = Board::standard();
        board.squares[0][4] = None;
        assert_eq!(board.winner(), Some(Color::White));

        let mut board = Board::standard();
        board.squares[7][4] = None;
        assert_eq!(board.winner(), Some(Color::Black));
    }
    #[test]
    fn with_both_kings_missing_the_white_scan_decides_first() {
        let mut board = Board::standard();
        board.squares[0][4] = None;
        board.squares[7][4] = None;
        assert_eq!(board.winner(), Some(Color::Black));
    }
}
