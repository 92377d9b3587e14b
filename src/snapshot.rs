//! Read-only view of the engine for the presentation layer

use crate::board::{ROWS, Row};
use crate::game::GameState;
use crate::piece::Piece;
use crate::tetromino::{Shape, TetrominoType};
use ratatui::style::Color;

/// The upcoming piece, shown in the preview box
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preview {
    pub piece_type: TetrominoType,
    pub shape: Shape,
    pub color: Color,
}

impl From<&Piece> for Preview {
    fn from(piece: &Piece) -> Self {
        Self {
            piece_type: piece.piece_type,
            shape: piece.shape,
            color: piece.color,
        }
    }
}

/// Everything a renderer needs after a tick or command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    /// Locked cells, top row first
    pub board: [Row; ROWS],
    pub active: Option<Piece>,
    /// Landing row of the active piece
    pub ghost_y: Option<i32>,
    pub next: Option<Preview>,
    pub score: u64,
    pub lines: u32,
    pub level: u32,
    pub state: GameState,
}

impl Snapshot {
    /// A game is in progress (paused or not)
    pub fn is_running(&self) -> bool {
        matches!(self.state, GameState::Running | GameState::Paused)
    }

    pub fn is_paused(&self) -> bool {
        self.state == GameState::Paused
    }

    pub fn is_game_over(&self) -> bool {
        self.state == GameState::GameOver
    }

    /// Color of the active piece block at (x, y), if any
    pub fn active_at(&self, x: usize, y: usize) -> Option<Color> {
        let piece = self.active.as_ref()?;
        piece
            .cells()
            .any(|cell| cell == (x as i32, y as i32))
            .then_some(piece.color)
    }

    /// Whether (x, y) is covered by the ghost of the active piece
    pub fn ghost_at(&self, x: usize, y: usize) -> bool {
        let (Some(piece), Some(ghost_y)) = (self.active.as_ref(), self.ghost_y) else {
            return false;
        };
        piece
            .shape
            .filled()
            .any(|(dx, dy)| (piece.x + dx as i32, ghost_y + dy as i32) == (x as i32, y as i32))
    }
}
