//! Help and level-select overlays

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
};

use crate::cli::tui::app::App;
use crate::cli::tui::utils::truncate_str;
use crate::levels;

const HELP: [(&str, &str); 11] = [
    ("arrows / hjkl", "move the cursor"),
    ("tab", "next removable nail"),
    ("enter / space", "remove the selected nail"),
    ("a", "add an empty stack"),
    ("n", "next level (after completing one)"),
    ("r", "restart this level"),
    ("L", "choose a level"),
    ("?", "toggle this help"),
    ("q", "quit"),
    ("", ""),
    ("", "Bold nails can be removed now."),
];

/// Draw the key reference
pub fn draw_help(frame: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 60, area);
    frame.render_widget(Clear, popup_area);

    let mut lines: Vec<Line> = HELP
        .iter()
        .map(|(key, action)| {
            Line::from(vec![
                Span::styled(format!("{:>14}  ", key), Style::default().fg(Color::Yellow)),
                Span::raw(*action),
            ])
        })
        .collect();
    lines.push(Line::from(
        "Each removed nail goes onto the first stack that takes its color. \
         A full stack clears itself. If no stack takes a nail, the game is over.",
    ));

    let paragraph = Paragraph::new(lines)
        .wrap(ratatui::widgets::Wrap { trim: true })
        .block(
            Block::default()
                .title(" Help ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow)),
        );

    frame.render_widget(paragraph, popup_area);
}

/// Draw the level list with the cursor row highlighted
pub fn draw_level_select(frame: &mut Frame, app: &App, area: Rect) {
    let popup_area = centered_rect(50, 40, area);
    frame.render_widget(Clear, popup_area);

    let items: Vec<ListItem> = levels::all()
        .iter()
        .map(|level| {
            let marker = if level.number == app.level_number() { "*" } else { " " };
            ListItem::new(format!(
                "{} {}. {} ({} nails)",
                marker,
                level.number,
                truncate_str(&level.description, 22),
                level.nail_count()
            ))
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .title(" Levels [enter]load [esc]close ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    let mut state = ListState::default();
    state.select(Some(app.level_cursor()));
    frame.render_stateful_widget(list, popup_area, &mut state);
}

/// Rectangle of the given percentage size centered in `r`
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_rect_is_inside() {
        let area = Rect::new(0, 0, 100, 50);
        let popup = centered_rect(60, 60, area);
        assert_eq!(popup.width, 60);
        assert_eq!(popup.height, 30);
        assert_eq!(popup.x, 20);
        assert_eq!(popup.y, 10);
    }
}
