//! Board view: the nails on their grid

use std::collections::HashMap;

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

use super::game::status_color;
use crate::cli::board::grid_size;
use crate::cli::tui::app::App;
use crate::cli::tui::utils::type_color;
use crate::domain::{Nail, NailId, Session};

/// Each grid cell is a glyph plus a space
const CELL_WIDTH: u16 = 2;

/// Draw the board panel
pub fn draw(frame: &mut Frame, app: &App, area: Rect) {
    let session = app.session();
    let level = session.level();

    let title = format!(" Level {}: {} ", level.number, level.description);
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(status_color(session.status())));

    let inner = block.inner(area);
    let lines = board_lines(session, app.selected());
    let scroll = scroll_offset(session, app.selected(), inner);

    let paragraph = Paragraph::new(lines).block(block).scroll(scroll);
    frame.render_widget(paragraph, area);
}

fn cell_style(session: &Session, nail: &Nail, selected: bool) -> Style {
    let style = if nail.removed {
        Style::default().fg(Color::DarkGray)
    } else if session.is_removable(nail.id) {
        Style::default()
            .fg(type_color(Some(nail.nail_type)))
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
            .fg(type_color(Some(nail.nail_type)))
            .add_modifier(Modifier::DIM)
    };

    if selected {
        style.add_modifier(Modifier::REVERSED)
    } else {
        style
    }
}

/// One styled line per grid row
fn board_lines(session: &Session, selected: Option<NailId>) -> Vec<Line<'static>> {
    let (width, height) = grid_size(session);
    let level = session.level();

    let by_cell: HashMap<(usize, usize), &Nail> = session
        .nails()
        .filter_map(|nail| {
            level
                .position_of(nail.id)
                .map(|p| ((usize::from(p.x), usize::from(p.y)), nail))
        })
        .collect();

    (0..height)
        .map(|y| {
            let spans: Vec<Span<'static>> = (0..width)
                .map(|x| match by_cell.get(&(x, y)) {
                    Some(nail) => {
                        let glyph = if nail.removed { "○" } else { "●" };
                        let style = cell_style(session, nail, selected == Some(nail.id));
                        Span::styled(format!("{} ", glyph), style)
                    }
                    None => Span::raw("  "),
                })
                .collect();
            Line::from(spans)
        })
        .collect()
}

/// Scroll so the selected nail stays visible on boards larger than the panel
fn scroll_offset(session: &Session, selected: Option<NailId>, inner: Rect) -> (u16, u16) {
    let Some(pos) = selected.and_then(|id| session.level().position_of(id)) else {
        return (0, 0);
    };
    let (width, height) = grid_size(session);

    let offset = |cursor: u16, total: u16, visible: u16| -> u16 {
        if total <= visible {
            0
        } else {
            cursor.saturating_sub(visible / 2).min(total - visible)
        }
    };

    let rows = offset(pos.y, height as u16, inner.height);
    let cols = offset(pos.x * CELL_WIDTH, width as u16 * CELL_WIDTH, inner.width);
    (rows, cols)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::levels;

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn lines_follow_the_grid() {
        let session = Session::new(levels::get(1).unwrap()).unwrap();
        let lines = board_lines(&session, None);

        assert_eq!(lines.len(), 3);
        assert_eq!(line_text(&lines[0]), "  ●   ");
        assert_eq!(line_text(&lines[2]), "●   ● ");
    }

    #[test]
    fn selected_nail_is_reversed() {
        let session = Session::new(levels::get(1).unwrap()).unwrap();
        let lines = board_lines(&session, Some(NailId::new(1)));
        let star = &lines[0].spans[1];
        assert!(star.style.add_modifier.contains(Modifier::REVERSED));
        assert!(star.style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn blocked_and_removed_styles() {
        let mut session = Session::new(levels::get(1).unwrap()).unwrap();
        let blocked = session.nail(NailId::new(2)).unwrap().clone();
        assert!(cell_style(&session, &blocked, false)
            .add_modifier
            .contains(Modifier::DIM));

        session.attempt_remove(NailId::new(1)).unwrap();
        let removed = session.nail(NailId::new(1)).unwrap().clone();
        assert_eq!(cell_style(&session, &removed, false).fg, Some(Color::DarkGray));
    }

    #[test]
    fn small_boards_do_not_scroll() {
        let session = Session::new(levels::get(1).unwrap()).unwrap();
        let inner = Rect::new(0, 0, 40, 20);
        assert_eq!(scroll_offset(&session, Some(NailId::new(3)), inner), (0, 0));
    }

    #[test]
    fn large_boards_follow_the_cursor() {
        let session = Session::new(levels::christmas_tree()).unwrap();
        let inner = Rect::new(0, 0, 40, 10);
        let (rows, _) = scroll_offset(&session, session.level().nail_ids().last(), inner);
        assert!(rows > 0);
    }
}
