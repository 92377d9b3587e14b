//! BLOCKFALL - terminal front-end
//!
//! Polls keys, feeds the engine and redraws from its snapshot every frame.

use blockfall::game::Game;
use blockfall::input::{Command, KeyBindings};
use blockfall::settings::Settings;
use blockfall::ui;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::{
    io::{self, stdout},
    time::{Duration, Instant},
};

/// Target frame rate
const TARGET_FPS: u64 = 60;
const FRAME_DURATION: Duration = Duration::from_micros(1_000_000 / TARGET_FPS);

/// Get the blockfall temp directory, creating it if needed
fn blockfall_temp_dir() -> std::path::PathBuf {
    let dir = std::env::temp_dir().join("blockfall");
    let _ = std::fs::create_dir_all(&dir);
    dir
}

fn main() -> io::Result<()> {
    let session_id: u32 = rand::random();

    // Logs go to a file, the terminal belongs to the UI
    let log_dir = blockfall_temp_dir();
    let log_file = format!("{:08x}.log", session_id);
    let file_appender = tracing_appender::rolling::never(&log_dir, &log_file);
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("blockfall=debug"));
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(filter)
        .with_ansi(false)
        .init();

    tracing::info!(
        "BLOCKFALL starting up, session={:08x}, log={}",
        session_id,
        log_dir.join(&log_file).display()
    );

    let settings = Settings::load();
    if let Err(e) = Settings::create_default_file() {
        tracing::warn!("Could not write default settings: {}", e);
    }
    let bindings = KeyBindings::from_settings(&settings);
    let game = match settings.gameplay.seed {
        Some(seed) => Game::with_seed(seed),
        None => Game::new(),
    }
    .with_drop_speed(settings.gameplay.drop_speed());

    // Setup terminal
    enable_raw_mode()?;
    execute!(stdout(), EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout());
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_app(&mut terminal, game, &bindings, &settings);

    // Restore terminal
    disable_raw_mode()?;
    execute!(stdout(), LeaveAlternateScreen)?;

    match &result {
        Ok(game) => {
            let snapshot = game.snapshot();
            println!("\nThanks for playing BLOCKFALL!");
            println!("Final Score: {}", snapshot.score);
            println!("Level: {} | Lines: {}", snapshot.level, snapshot.lines);
            tracing::info!(score = snapshot.score, "shutting down");
        }
        Err(e) => tracing::error!("terminal error: {}", e),
    }

    result.map(|_| ())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    mut game: Game,
    bindings: &KeyBindings,
    settings: &Settings,
) -> io::Result<Game> {
    loop {
        let snapshot = game.snapshot();
        terminal.draw(|frame| ui::render_game(frame, &snapshot, settings))?;

        if event::poll(FRAME_DURATION)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match bindings.command_for(key) {
                        Some(Command::Quit) => return Ok(game),
                        Some(Command::Game(action)) => game.process_action(action),
                        None => {}
                    }
                }
            }
        }

        game.tick(Instant::now());
    }
}
