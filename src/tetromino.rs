//! Tetromino catalog: the seven piece identities and their spawn matrices
//!
//! Every piece is described by a square orientation matrix (2x2, 3x3 or 4x4)
//! stored in a fixed 4x4 array. Matrices are `Copy`, so each spawn gets its own
//! orientation and rotating it never touches the catalog.

use ratatui::style::Color;

/// Largest matrix side used by any piece
pub const MAX_SHAPE_SIZE: usize = 4;

/// The 7 tetromino types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TetrominoType {
    I, // Cyan - long bar
    O, // Yellow - square
    T, // Purple - T-shape
    S, // Green - S-shape
    Z, // Red - Z-shape
    J, // Blue - J-shape
    L, // Orange - L-shape
}

impl TetrominoType {
    /// Get the color for this tetromino
    pub fn color(&self) -> Color {
        match self {
            TetrominoType::I => Color::Cyan,
            TetrominoType::O => Color::Yellow,
            TetrominoType::T => Color::Magenta,
            TetrominoType::S => Color::Green,
            TetrominoType::Z => Color::Red,
            TetrominoType::J => Color::Blue,
            TetrominoType::L => Color::Rgb(255, 165, 0), // Orange
        }
    }

    /// Get all tetromino types for bag randomization
    pub fn all() -> [TetrominoType; 7] {
        [
            TetrominoType::I,
            TetrominoType::O,
            TetrominoType::T,
            TetrominoType::S,
            TetrominoType::Z,
            TetrominoType::J,
            TetrominoType::L,
        ]
    }

    /// Spawn orientation of this piece (rows top to bottom, `#` = occupied)
    pub fn shape(&self) -> Shape {
        match self {
            TetrominoType::I => Shape::parse(&["....", "####", "....", "...."]),
            TetrominoType::O => Shape::parse(&["##", "##"]),
            TetrominoType::T => Shape::parse(&[".#.", "###", "..."]),
            TetrominoType::S => Shape::parse(&[".##", "##.", "..."]),
            TetrominoType::Z => Shape::parse(&["##.", ".##", "..."]),
            TetrominoType::J => Shape::parse(&["#..", "###", "..."]),
            TetrominoType::L => Shape::parse(&["..#", "###", "..."]),
        }
    }
}

/// Direction for rotation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationDirection {
    Clockwise,
    CounterClockwise,
}

/// A square orientation matrix, indexed `[y][x]` with y growing downward
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shape {
    size: usize,
    cells: [[bool; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE],
}

impl Shape {
    /// Build a shape from rows of `#` (filled) and `.` (empty).
    /// The side length is the number of rows; every row must be that long.
    pub fn parse(rows: &[&str]) -> Self {
        let size = rows.len().min(MAX_SHAPE_SIZE);
        let mut cells = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        for (y, row) in rows.iter().take(size).enumerate() {
            for (x, ch) in row.chars().take(size).enumerate() {
                cells[y][x] = ch == '#';
            }
        }
        Self { size, cells }
    }

    /// Side length N of the N x N matrix
    pub fn size(&self) -> usize {
        self.size
    }

    /// Whether the cell at matrix position (x, y) is occupied
    pub fn is_filled(&self, x: usize, y: usize) -> bool {
        x < self.size && y < self.size && self.cells[y][x]
    }

    /// Iterate over occupied cells as (x, y) matrix offsets
    pub fn filled(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.size).flat_map(move |y| {
            (0..self.size).filter_map(move |x| self.cells[y][x].then_some((x, y)))
        })
    }

    /// The matrix turned 90 degrees in the given direction
    pub fn rotated(&self, direction: RotationDirection) -> Shape {
        let n = self.size;
        let mut cells = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        for y in 0..n {
            for x in 0..n {
                match direction {
                    RotationDirection::Clockwise => cells[x][n - 1 - y] = self.cells[y][x],
                    RotationDirection::CounterClockwise => cells[n - 1 - x][y] = self.cells[y][x],
                }
            }
        }
        Shape { size: n, cells }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_piece_has_four_blocks() {
        for piece in TetrominoType::all() {
            assert_eq!(piece.shape().filled().count(), 4, "{:?}", piece);
        }
    }

    #[test]
    fn test_matrix_sizes() {
        assert_eq!(TetrominoType::I.shape().size(), 4);
        assert_eq!(TetrominoType::O.shape().size(), 2);
        for piece in [
            TetrominoType::T,
            TetrominoType::S,
            TetrominoType::Z,
            TetrominoType::J,
            TetrominoType::L,
        ] {
            assert_eq!(piece.shape().size(), 3);
        }
    }

    #[test]
    fn test_clockwise_rotation() {
        let t = TetrominoType::T.shape();
        // .#.      .#.
        // ###  ->  .##
        // ...      .#.
        let expected = Shape::parse(&[".#.", ".##", ".#."]);
        assert_eq!(t.rotated(RotationDirection::Clockwise), expected);
    }

    #[test]
    fn test_counter_clockwise_rotation() {
        let t = TetrominoType::T.shape();
        // .#.      .#.
        // ###  ->  ##.
        // ...      .#.
        let expected = Shape::parse(&[".#.", "##.", ".#."]);
        assert_eq!(t.rotated(RotationDirection::CounterClockwise), expected);
    }

    #[test]
    fn test_rotation_inverse_restores_matrix() {
        for piece in TetrominoType::all() {
            let shape = piece.shape();
            let round_trip = shape
                .rotated(RotationDirection::Clockwise)
                .rotated(RotationDirection::CounterClockwise);
            assert_eq!(round_trip, shape);
        }
    }

    #[test]
    fn test_four_turns_is_identity() {
        let shape = TetrominoType::L.shape();
        let mut turned = shape;
        for _ in 0..4 {
            turned = turned.rotated(RotationDirection::Clockwise);
        }
        assert_eq!(turned, shape);
    }
}
