//! Game board representation
//!
//! Coordinates are (x, y) with x growing rightward and y growing downward;
//! row 0 is the top of the well.

use crate::piece::Piece;
use ratatui::style::Color;

/// Standard board dimensions
pub const COLS: usize = 10;
pub const ROWS: usize = 20;

/// A cell on the board - either empty or filled with a color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Filled(Color),
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn is_filled(&self) -> bool {
        matches!(self, Cell::Filled(_))
    }
}

/// One board row, left to right
pub type Row = [Cell; COLS];

/// The game board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    /// Grid stored as [y][x], y = 0 is the top row
    cells: [Row; ROWS],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [[Cell::Empty; COLS]; ROWS],
        }
    }

    /// Get the cell at (x, y), None if out of bounds
    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        if !Self::in_bounds(x, y) {
            return None;
        }
        Some(self.cells[y as usize][x as usize])
    }

    /// Set the cell at (x, y). Returns false if out of bounds
    pub fn set(&mut self, x: i32, y: i32, cell: Cell) -> bool {
        if !Self::in_bounds(x, y) {
            return false;
        }
        self.cells[y as usize][x as usize] = cell;
        true
    }

    /// Whether (x, y) holds a locked block. Out-of-bounds positions are never
    /// occupied; wall and floor limits live in [`Piece::collides`].
    pub fn is_occupied(&self, x: i32, y: i32) -> bool {
        self.get(x, y).is_some_and(|cell| cell.is_filled())
    }

    /// Write the piece's blocks into the grid at its current position.
    ///
    /// The caller must make sure the piece does not collide. Blocks still above
    /// the top row are dropped.
    pub fn merge(&mut self, piece: &Piece) {
        let cell = Cell::Filled(piece.color);
        for (x, y) in piece.cells() {
            self.set(x, y, cell);
        }
    }

    /// Remove every full row, bottom to top, and return how many were removed.
    ///
    /// Rows above a removed row shift down by one and an empty row enters at the
    /// top. The same index is checked again after a removal because the row now
    /// sitting there came from above.
    pub fn clear_full_rows(&mut self) -> usize {
        let mut cleared = 0;
        let mut y = ROWS;
        while y > 0 {
            let row = y - 1;
            if self.is_row_full(row) {
                self.cells.copy_within(0..row, 1);
                self.cells[0] = [Cell::Empty; COLS];
                cleared += 1;
            } else {
                y -= 1;
            }
        }
        cleared
    }

    /// Check if a row is completely filled
    fn is_row_full(&self, y: usize) -> bool {
        self.cells[y].iter().all(|cell| cell.is_filled())
    }

    /// Check if the board has no locked blocks
    pub fn is_empty(&self) -> bool {
        self.cells
            .iter()
            .all(|row| row.iter().all(|cell| cell.is_empty()))
    }

    /// Rows from top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &Row> {
        self.cells.iter()
    }

    /// The whole grid, indexed [y][x]
    pub fn grid(&self) -> &[Row; ROWS] {
        &self.cells
    }

    fn in_bounds(x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < COLS && (y as usize) < ROWS
    }
}
