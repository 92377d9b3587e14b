//! BLOCKFALL - a falling-block puzzle engine
//!
//! The engine (`game`) owns all simulation state and is driven entirely from
//! outside: commands come in through [`game::Game::process_action`], time comes
//! in through [`game::Game::tick`], and the presentation layer reads
//! [`snapshot::Snapshot`]s back out. `input`, `settings` and `ui` make up the
//! terminal front-end used by the `blockfall` binary.

pub mod bag;
pub mod board;
pub mod game;
pub mod input;
pub mod piece;
pub mod score;
pub mod settings;
pub mod snapshot;
pub mod tetromino;
pub mod ui;
