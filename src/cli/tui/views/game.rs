//! Game screen: board, sidebar, status bar and overlays

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

use super::{board, popup, sidebar};
use crate::cli::tui::app::{App, Overlay};
use crate::domain::GameStatus;

const HINT: &str = "[arrows]move [enter]remove [a]dd stack [r]estart [L]evels [?]help [q]uit";

/// Draw the whole screen
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(10),   // Board and sidebar
            Constraint::Length(3), // Status bar
        ])
        .split(area);

    let content_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(30), Constraint::Length(34)])
        .split(main_chunks[0]);

    board::draw(frame, app, content_chunks[0]);
    sidebar::draw(frame, app, content_chunks[1]);
    draw_status_bar(frame, app, main_chunks[1]);

    match app.overlay() {
        Overlay::None => {}
        Overlay::Help => popup::draw_help(frame, area),
        Overlay::LevelSelect => popup::draw_level_select(frame, app, area),
    }
}

/// Border color for the current status
pub fn status_color(status: GameStatus) -> Color {
    match status {
        GameStatus::InProgress => Color::Cyan,
        GameStatus::LevelComplete => Color::Green,
        GameStatus::GameOver => Color::Red,
    }
}

fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let session = app.session();
    let status = session.status();

    let turn = match status {
        GameStatus::InProgress => format!("{} to move", session.current_player()),
        other => other.to_string(),
    };

    let (message, style) = match app.status_message() {
        Some(msg) => (msg, Style::default().fg(status_color(status))),
        None => (HINT, Style::default()),
    };

    let line = Line::from(vec![
        Span::styled("Nails ", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(format!("[{} | moves {}] ", turn, session.moves())),
        Span::styled(message.to_string(), style),
    ]);

    let paragraph = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
    frame.render_widget(paragraph, area);
}
