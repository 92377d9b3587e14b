//! Active falling piece logic

use crate::board::{Board, COLS, ROWS};
use crate::tetromino::{RotationDirection, Shape, TetrominoType};
use ratatui::style::Color;

/// An active falling piece
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Piece {
    /// The type of tetromino
    pub piece_type: TetrominoType,
    /// Current orientation matrix
    pub shape: Shape,
    /// Board position of the matrix's top-left corner
    pub x: i32,
    pub y: i32,
    pub color: Color,
}

impl Piece {
    /// Create a new piece at the top center of the board.
    /// Spawning does not check for collisions; the caller does.
    pub fn spawn(piece_type: TetrominoType) -> Self {
        let shape = piece_type.shape();
        Self {
            piece_type,
            shape,
            x: (COLS as i32 - shape.size() as i32) / 2,
            y: 0,
            color: piece_type.color(),
        }
    }

    /// Absolute board positions (x, y) of the piece's blocks
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.shape
            .filled()
            .map(|(dx, dy)| (self.x + dx as i32, self.y + dy as i32))
    }

    /// Whether the piece overlaps a wall, the floor or a locked block.
    /// Blocks above the top row only get the wall check.
    pub fn collides(&self, board: &Board) -> bool {
        self.cells().any(|(x, y)| {
            y >= ROWS as i32
                || x < 0
                || x >= COLS as i32
                || (y >= 0 && board.is_occupied(x, y))
        })
    }

    /// Shift one column (`dir` is -1 or +1). Returns true if the piece moved
    pub fn move_by(&mut self, dir: i32, board: &Board) -> bool {
        self.x += dir;
        if self.collides(board) {
            self.x -= dir;
            false
        } else {
            true
        }
    }

    /// Try to move down one row, returns true if successful
    pub fn drop_one(&mut self, board: &Board) -> bool {
        self.y += 1;
        if self.collides(board) {
            self.y -= 1;
            false
        } else {
            true
        }
    }

    /// Rotate in place, nudging sideways if the new orientation collides.
    ///
    /// Kick offsets alternate sides with growing distance (+1, -2, +3, ...),
    /// each applied on top of the last, so the piece visits x+1, x-1, x+2, ...
    /// The search gives up once the next offset is wider than the matrix, and
    /// the piece is put back exactly as it was.
    pub fn rotate(&mut self, direction: RotationDirection, board: &Board) -> bool {
        let original_shape = self.shape;
        let original_x = self.x;
        let width = self.shape.size() as i32;

        self.shape = self.shape.rotated(direction);

        let mut offset: i32 = 1;
        while self.collides(board) {
            self.x += offset;
            offset = -(offset + offset.signum());
            if offset.abs() > width {
                self.shape = original_shape;
                self.x = original_x;
                return false;
            }
        }
        true
    }

    /// Hard drop - move down as far as possible and return distance dropped
    pub fn hard_drop(&mut self, board: &Board) -> i32 {
        let mut distance = 0;
        while self.drop_one(board) {
            distance += 1;
        }
        distance
    }

    /// Row the piece would come to rest on if dropped straight down
    pub fn ghost_y(&self, board: &Board) -> i32 {
        let mut ghost = self.clone();
        ghost.hard_drop(board);
        ghost.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Cell;

    fn wall(board: &mut Board, x: i32) {
        for y in 0..ROWS as i32 {
            board.set(x, y, Cell::Filled(Color::Gray));
        }
    }

    #[test]
    fn test_spawn_position() {
        let o = Piece::spawn(TetrominoType::O);
        assert_eq!((o.x, o.y), (4, 0));
        let i = Piece::spawn(TetrominoType::I);
        assert_eq!((i.x, i.y), (3, 0));
        let t = Piece::spawn(TetrominoType::T);
        assert_eq!((t.x, t.y), (3, 0));
        assert_eq!(t.color, TetrominoType::T.color());
    }

    #[test]
    fn test_o_piece_occupies_columns_four_and_five() {
        let o = Piece::spawn(TetrominoType::O);
        let mut cells: Vec<_> = o.cells().collect();
        cells.sort();
        assert_eq!(cells, vec![(4, 0), (4, 1), (5, 0), (5, 1)]);
    }

    #[test]
    fn test_collides_with_walls_and_floor() {
        let board = Board::new();
        let mut piece = Piece::spawn(TetrominoType::O);
        assert!(!piece.collides(&board));
        piece.x = -1;
        assert!(piece.collides(&board));
        piece.x = COLS as i32 - 1;
        assert!(piece.collides(&board));
        piece.x = 0;
        piece.y = ROWS as i32 - 1;
        assert!(piece.collides(&board));
    }

    #[test]
    fn test_blocks_above_top_only_check_walls() {
        let mut board = Board::new();
        board.set(4, 0, Cell::Filled(Color::Red));
        let mut piece = Piece::spawn(TetrominoType::O);
        piece.y = -2;
        assert!(!piece.collides(&board));
        piece.x = -1;
        assert!(piece.collides(&board));
    }

    #[test]
    fn test_collides_with_locked_block() {
        let mut board = Board::new();
        board.set(5, 1, Cell::Filled(Color::Red));
        let piece = Piece::spawn(TetrominoType::O);
        assert!(piece.collides(&board));
    }

    #[test]
    fn test_move_stops_at_wall() {
        let board = Board::new();
        let mut piece = Piece::spawn(TetrominoType::O);
        let mut moves = 0;
        while piece.move_by(-1, &board) {
            moves += 1;
            assert!(!piece.collides(&board));
        }
        assert_eq!(moves, 4);
        assert_eq!(piece.x, 0);
        assert!(!piece.move_by(-1, &board));
        assert_eq!(piece.x, 0);
    }

    #[test]
    fn test_move_blocked_by_stack() {
        let mut board = Board::new();
        board.set(6, 1, Cell::Filled(Color::Red));
        let mut piece = Piece::spawn(TetrominoType::O);
        assert!(!piece.move_by(1, &board));
        assert_eq!(piece.x, 4);
        assert!(!piece.collides(&board));
    }

    #[test]
    fn test_rotate_in_open_space() {
        let board = Board::new();
        let mut piece = Piece::spawn(TetrominoType::T);
        piece.y = 5;
        assert!(piece.rotate(RotationDirection::Clockwise, &board));
        assert_eq!(piece.x, 3);
        assert_eq!(piece.y, 5);
        assert_eq!(
            piece.shape,
            TetrominoType::T.shape().rotated(RotationDirection::Clockwise)
        );
    }

    #[test]
    fn test_rotate_then_inverse_restores_shape() {
        let board = Board::new();
        let mut piece = Piece::spawn(TetrominoType::J);
        piece.y = 5;
        let before = piece.clone();
        assert!(piece.rotate(RotationDirection::Clockwise, &board));
        assert!(piece.rotate(RotationDirection::CounterClockwise, &board));
        assert_eq!(piece, before);
    }

    #[test]
    fn test_rotate_kicks_off_left_wall() {
        let board = Board::new();
        // Vertical I in column 0 of its matrix, hugging the left wall
        let mut piece = Piece::spawn(TetrominoType::I);
        piece.shape = Shape::parse(&[".#..", ".#..", ".#..", ".#.."]);
        piece.x = -1;
        piece.y = 5;
        assert!(!piece.collides(&board));

        // Flat I at x = -1 pokes through the wall; first kick moves it to x = 0
        assert!(piece.rotate(RotationDirection::Clockwise, &board));
        assert_eq!(piece.x, 0);
        assert_eq!(piece.y, 5);
        assert!(!piece.collides(&board));
    }

    #[test]
    fn test_rotate_kicks_second_offset() {
        let board = Board::new();
        // Vertical I against the right wall
        let mut piece = Piece::spawn(TetrominoType::I);
        piece.shape = Shape::parse(&["..#.", "..#.", "..#.", "..#."]);
        piece.x = 7;
        piece.y = 5;
        assert!(!piece.collides(&board));

        // Rotated flat I lands on row 7 spanning x..x+3. At x = 7 it pokes
        // through the wall, x = 8 (+1) too, x = 6 (-2) fits.
        assert!(piece.rotate(RotationDirection::Clockwise, &board));
        assert_eq!(piece.x, 6);
        assert!(!piece.collides(&board));
    }

    #[test]
    fn test_rotate_fails_and_restores() {
        let mut board = Board::new();
        wall(&mut board, 3);
        wall(&mut board, 5);
        // Vertical I squeezed into the one-wide shaft at x = 4
        let mut piece = Piece::spawn(TetrominoType::I);
        piece.shape = Shape::parse(&[".#..", ".#..", ".#..", ".#.."]);
        piece.x = 3;
        piece.y = 10;
        assert!(!piece.collides(&board));
        let before = piece.clone();

        assert!(!piece.rotate(RotationDirection::Clockwise, &board));
        assert_eq!(piece, before);
    }

    #[test]
    fn test_hard_drop_lands_on_floor() {
        let board = Board::new();
        let mut piece = Piece::spawn(TetrominoType::O);
        assert_eq!(piece.hard_drop(&board), ROWS as i32 - 2);
        assert_eq!(piece.y, ROWS as i32 - 2);
        assert!(!piece.drop_one(&board));
    }

    #[test]
    fn test_ghost_row_does_not_move_piece() {
        let mut board = Board::new();
        board.set(4, 10, Cell::Filled(Color::Red));
        let piece = Piece::spawn(TetrominoType::O);
        assert_eq!(piece.ghost_y(&board), 8);
        assert_eq!(piece.y, 0);
    }
}
