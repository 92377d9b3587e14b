//! Terminal UI rendering with ratatui
//!
//! Draws a [`Snapshot`]; never touches the engine directly.

use crate::board::{COLS, Cell, ROWS};
use crate::game::GameState;
use crate::settings::Settings;
use crate::snapshot::{Preview, Snapshot};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

const EMPTY: &str = "  ";

/// Total width needed: board(22) + next/stats(16) = 38
const GAME_WIDTH: u16 = 38;
/// Total height needed: board(20) + 2 for borders = 22
const GAME_HEIGHT: u16 = ROWS as u16 + 2;

/// Render the entire game UI
pub fn render_game(frame: &mut Frame, snapshot: &Snapshot, settings: &Settings) {
    let area = frame.area();
    let (block_char, _) = settings.visual.block_chars();

    // Center the game area
    let game_area = center_rect(area, GAME_WIDTH, GAME_HEIGHT);

    // Create main layout: board | next + stats
    let main_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(COLS as u16 * 2 + 2), // Board
            Constraint::Length(16),                  // Next + stats
        ])
        .split(game_area);

    render_board(frame, main_layout[0], snapshot, settings);

    let right_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6), // Next preview
            Constraint::Min(6),    // Stats
        ])
        .split(main_layout[1]);

    render_next(frame, right_layout[0], snapshot.next.as_ref(), block_char);
    render_stats(frame, right_layout[1], snapshot);

    // Overlays
    match snapshot.state {
        GameState::Idle => render_overlay(frame, area, "BLOCKFALL", "Press Enter to start"),
        GameState::Paused => render_overlay(frame, area, "PAUSED", "Press P to resume"),
        GameState::GameOver => render_overlay(frame, area, "GAME OVER", "Enter to play again"),
        GameState::Running => {}
    }
}

/// Center a rect within another rect
fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}

/// Render the next piece preview
fn render_next(frame: &mut Frame, area: Rect, next: Option<&Preview>, block_char: &str) {
    let block = Block::default()
        .title(" NEXT ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let Some(preview) = next else {
        return;
    };

    // Only the rows that hold blocks, so every piece sits at the top
    let lines: Vec<Line> = (0..preview.shape.size())
        .filter(|&y| (0..preview.shape.size()).any(|x| preview.shape.is_filled(x, y)))
        .map(|y| {
            let spans: Vec<Span> = (0..preview.shape.size())
                .map(|x| {
                    if preview.shape.is_filled(x, y) {
                        Span::styled(block_char, Style::default().fg(preview.color))
                    } else {
                        Span::raw(EMPTY)
                    }
                })
                .collect();
            Line::from(spans)
        })
        .collect();

    let paragraph = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(paragraph, inner);
}

/// Render the game board
fn render_board(frame: &mut Frame, area: Rect, snapshot: &Snapshot, settings: &Settings) {
    let (block_char, ghost_char) = settings.visual.block_chars();
    let show_ghost = settings.visual.show_ghost;

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::White));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines: Vec<Line> = snapshot
        .board
        .iter()
        .enumerate()
        .map(|(y, row)| {
            let spans: Vec<Span> = row
                .iter()
                .enumerate()
                .map(|(x, cell)| {
                    if let Some(color) = snapshot.active_at(x, y) {
                        Span::styled(block_char, Style::default().fg(color))
                    } else if let Cell::Filled(color) = cell {
                        Span::styled(block_char, Style::default().fg(*color))
                    } else if show_ghost && snapshot.ghost_at(x, y) {
                        let color = snapshot
                            .active
                            .as_ref()
                            .map_or(Color::DarkGray, |piece| piece.color);
                        Span::styled(ghost_char, Style::default().fg(color).dim())
                    } else {
                        Span::raw(EMPTY)
                    }
                })
                .collect();
            Line::from(spans)
        })
        .collect();

    let paragraph = Paragraph::new(lines);
    frame.render_widget(paragraph, inner);
}

/// Render stats panel
fn render_stats(frame: &mut Frame, area: Rect, snapshot: &Snapshot) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines = vec![
        Line::from(Span::styled("SCORE", Style::default().fg(Color::Gray))),
        Line::from(Span::styled(
            format!("{}", snapshot.score),
            Style::default().fg(Color::Yellow).bold(),
        )),
        Line::raw(""),
        Line::from(Span::styled("LEVEL", Style::default().fg(Color::Gray))),
        Line::from(Span::styled(
            format!("{}", snapshot.level),
            Style::default().fg(Color::Cyan),
        )),
        Line::raw(""),
        Line::from(Span::styled("LINES", Style::default().fg(Color::Gray))),
        Line::from(Span::styled(
            format!("{}", snapshot.lines),
            Style::default().fg(Color::Green),
        )),
    ];

    let paragraph = Paragraph::new(lines);
    frame.render_widget(paragraph, inner);
}

/// Render an overlay (for idle/pause/game over)
fn render_overlay(frame: &mut Frame, area: Rect, title: &str, subtitle: &str) {
    let popup_width = 24u16;
    let popup_height = 5u16;
    let popup_area = center_rect(area, popup_width, popup_height);

    // Clear the background
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .style(Style::default().bg(Color::Black));

    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let text = vec![
        Line::styled(title, Style::default().fg(Color::Yellow).bold()),
        Line::raw(""),
        Line::styled(subtitle, Style::default().fg(Color::Gray)),
    ];

    let paragraph = Paragraph::new(text).alignment(Alignment::Center);
    frame.render_widget(paragraph, inner);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Game;
    use ratatui::{Terminal, backend::TestBackend};

    fn draw(snapshot: &Snapshot) -> String {
        let backend = TestBackend::new(60, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        let settings = Settings::default();
        terminal
            .draw(|frame| render_game(frame, snapshot, &settings))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_idle_shows_start_hint() {
        let screen = draw(&Game::with_seed(1).snapshot());
        assert!(screen.contains("Press Enter to start"));
    }

    #[test]
    fn test_running_shows_stats_and_blocks() {
        let mut game = Game::with_seed(1);
        game.start();
        let screen = draw(&game.snapshot());
        assert!(screen.contains("SCORE"));
        assert!(screen.contains("NEXT"));
        assert!(screen.contains("█"));
        assert!(!screen.contains("PAUSED"));
    }

    #[test]
    fn test_pause_overlay() {
        let mut game = Game::with_seed(1);
        game.start();
        game.toggle_pause();
        let screen = draw(&game.snapshot());
        assert!(screen.contains("PAUSED"));
    }
}
