//! Core game state and logic
//!
//! [`Game`] owns the board, the active and next pieces, the randomizer and the
//! score. It never reads the clock or draws anything: the caller feeds it
//! commands and timestamps and polls [`Game::snapshot`] afterwards.

use crate::bag::Bag;
use crate::board::Board;
use crate::piece::Piece;
use crate::score::{DropSpeed, Score};
use crate::snapshot::{Preview, Snapshot};
use crate::tetromino::RotationDirection;
use std::time::{Duration, Instant};

/// Game state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GameState {
    /// Before the first start, or after a reset
    #[default]
    Idle,
    Running,
    Paused,
    GameOver,
}

/// Commands the game can process
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Start,
    TogglePause,
    MoveLeft,
    MoveRight,
    SoftDrop,
    HardDrop,
    RotateCW,
    RotateCCW,
    Reset,
}

/// The main game struct
#[derive(Debug, Clone)]
pub struct Game {
    /// The game board
    pub(crate) board: Board,
    /// Current falling piece
    pub(crate) current_piece: Option<Piece>,
    /// Piece that spawns after the current one locks
    pub(crate) next_piece: Option<Piece>,
    /// Piece bag randomizer
    bag: Bag,
    /// Score tracking
    pub(crate) score: Score,
    /// Current game state
    pub(crate) state: GameState,
    /// Gravity interval table
    speed: DropSpeed,
    /// Timestamp of the previous running tick; None right after start/resume
    last_tick: Option<Instant>,
    /// Running time accumulated towards the next gravity step
    drop_elapsed: Duration,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// Create an idle game with a randomly seeded bag
    pub fn new() -> Self {
        Self::with_bag(Bag::new())
    }

    /// Create an idle game whose piece sequence is fixed by `seed`
    pub fn with_seed(seed: u64) -> Self {
        Self::with_bag(Bag::with_seed(seed))
    }

    fn with_bag(bag: Bag) -> Self {
        Self {
            board: Board::new(),
            current_piece: None,
            next_piece: None,
            bag,
            score: Score::new(),
            state: GameState::Idle,
            speed: DropSpeed::default(),
            last_tick: None,
            drop_elapsed: Duration::ZERO,
        }
    }

    /// Replace the gravity interval table
    pub fn with_drop_speed(mut self, speed: DropSpeed) -> Self {
        self.speed = speed;
        self
    }

    /// Gravity interval at the current level
    pub fn drop_interval(&self) -> Duration {
        self.speed.interval(self.score.level)
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    /// Process an action
    pub fn process_action(&mut self, action: Action) {
        match action {
            Action::Start => self.start(),
            Action::TogglePause => self.toggle_pause(),
            Action::MoveLeft => self.move_left(),
            Action::MoveRight => self.move_right(),
            Action::SoftDrop => self.soft_drop(),
            Action::HardDrop => self.hard_drop(),
            Action::RotateCW => self.rotate(RotationDirection::Clockwise),
            Action::RotateCCW => self.rotate(RotationDirection::CounterClockwise),
            Action::Reset => self.reset(),
        }
    }

    /// Begin a new game. Only valid from Idle or GameOver
    pub fn start(&mut self) {
        if !matches!(self.state, GameState::Idle | GameState::GameOver) {
            return;
        }

        self.board = Board::new();
        self.score = Score::new();
        self.current_piece = Some(Piece::spawn(self.bag.draw()));
        self.next_piece = Some(Piece::spawn(self.bag.draw()));
        self.state = GameState::Running;
        self.last_tick = None;
        self.drop_elapsed = Duration::ZERO;

        tracing::info!(
            current = ?self.current_piece.as_ref().map(|p| p.piece_type),
            next = ?self.next_piece.as_ref().map(|p| p.piece_type),
            "game started"
        );
    }

    /// Drop the current game and go back to Idle
    pub fn reset(&mut self) {
        self.board = Board::new();
        self.score = Score::new();
        self.current_piece = None;
        self.next_piece = None;
        self.state = GameState::Idle;
        self.last_tick = None;
        self.drop_elapsed = Duration::ZERO;
        tracing::info!("game reset");
    }

    /// Switch between Running and Paused; ignored in any other state
    pub fn toggle_pause(&mut self) {
        match self.state {
            GameState::Running => self.state = GameState::Paused,
            GameState::Paused => {
                // Wall-clock time spent paused must not count as drop progress
                self.last_tick = None;
                self.state = GameState::Running;
            }
            GameState::Idle | GameState::GameOver => return,
        }
        tracing::debug!(state = ?self.state, "pause toggled");
    }

    pub fn move_left(&mut self) {
        self.shift(-1);
    }

    pub fn move_right(&mut self) {
        self.shift(1);
    }

    pub fn rotate_cw(&mut self) {
        self.rotate(RotationDirection::Clockwise);
    }

    pub fn rotate_ccw(&mut self) {
        self.rotate(RotationDirection::CounterClockwise);
    }

    /// Move the piece down one row, locking it if it cannot descend
    pub fn soft_drop(&mut self) {
        if self.state != GameState::Running {
            return;
        }
        self.fall();
        self.drop_elapsed = Duration::ZERO;
    }

    /// Drop the piece to the lowest legal row and lock it immediately
    pub fn hard_drop(&mut self) {
        if self.state != GameState::Running {
            return;
        }
        if let Some(piece) = &mut self.current_piece {
            let distance = piece.hard_drop(&self.board);
            tracing::trace!(distance, "hard drop");
        }
        self.lock_piece();
        self.drop_elapsed = Duration::ZERO;
    }

    /// Advance the clock to `now` (call every frame).
    ///
    /// Running time accumulates until it exceeds the current level's interval,
    /// then exactly one gravity step happens and the accumulator starts over.
    pub fn tick(&mut self, now: Instant) {
        if self.state != GameState::Running {
            return;
        }

        let delta = self
            .last_tick
            .map(|prev| now.saturating_duration_since(prev))
            .unwrap_or(Duration::ZERO);
        self.last_tick = Some(now);
        self.drop_elapsed += delta;

        if self.drop_elapsed > self.drop_interval() {
            self.drop_elapsed = Duration::ZERO;
            tracing::trace!(level = self.score.level, "gravity");
            self.fall();
        }
    }

    /// Read-only copy of everything the renderer shows
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            board: *self.board.grid(),
            active: self.current_piece.clone(),
            ghost_y: self
                .current_piece
                .as_ref()
                .filter(|_| self.state != GameState::GameOver)
                .map(|piece| piece.ghost_y(&self.board)),
            next: self.next_piece.as_ref().map(Preview::from),
            score: self.score.points,
            lines: self.score.lines,
            level: self.score.level,
            state: self.state,
        }
    }

    fn shift(&mut self, dir: i32) {
        if self.state != GameState::Running {
            return;
        }
        if let Some(piece) = &mut self.current_piece {
            piece.move_by(dir, &self.board);
        }
    }

    fn rotate(&mut self, direction: RotationDirection) {
        if self.state != GameState::Running {
            return;
        }
        if let Some(piece) = &mut self.current_piece {
            if !piece.rotate(direction, &self.board) {
                tracing::trace!(?direction, "rotation blocked");
            }
        }
    }

    /// One gravity step: descend, or lock when blocked
    fn fall(&mut self) {
        let Some(piece) = &mut self.current_piece else {
            return;
        };
        if !piece.drop_one(&self.board) {
            self.lock_piece();
        }
    }

    /// Lock the current piece, clear rows and spawn the next one
    fn lock_piece(&mut self) {
        let Some(piece) = self.current_piece.take() else {
            return;
        };

        self.board.merge(&piece);
        let cleared = self.board.clear_full_rows();

        let level_before = self.score.level;
        let awarded = self.score.add_clear(cleared);
        tracing::debug!(
            piece = ?piece.piece_type,
            x = piece.x,
            y = piece.y,
            cleared,
            awarded,
            score = self.score.points,
            "piece locked"
        );
        if self.score.level > level_before {
            tracing::info!(level = self.score.level, lines = self.score.lines, "level up");
        }

        self.spawn_next();
    }

    /// Promote the preview piece and draw a new preview.
    /// A promoted piece that already collides ends the game
    fn spawn_next(&mut self) {
        let piece = match self.next_piece.take() {
            Some(piece) => piece,
            None => Piece::spawn(self.bag.draw()),
        };
        self.next_piece = Some(Piece::spawn(self.bag.draw()));
        tracing::debug!(piece = ?piece.piece_type, "spawn");

        if piece.collides(&self.board) {
            self.state = GameState::GameOver;
            tracing::info!(
                score = self.score.points,
                lines = self.score.lines,
                level = self.score.level,
                "game over"
            );
        }
        self.current_piece = Some(piece);
    }
}
