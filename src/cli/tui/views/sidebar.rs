//! Sidebar: stacks and the nail under the cursor

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
};

use crate::cli::board::id_list;
use crate::cli::tui::app::App;
use crate::cli::tui::utils::type_color;
use crate::domain::{Session, Stack};

/// Draw the stacks panel above the selected-nail panel
pub fn draw(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(6), Constraint::Length(9)])
        .split(area);

    draw_stacks(frame, app.session(), chunks[0]);
    draw_selected(frame, app, chunks[1]);
}

fn stack_item(index: usize, stack: &Stack) -> ListItem<'static> {
    let kind = stack.accepted_type();
    let label = kind.map(|t| t.as_str()).unwrap_or("empty");
    let contents = if stack.is_empty() {
        "-".to_string()
    } else {
        id_list(stack.items())
    };

    ListItem::new(vec![
        Line::from(vec![
            Span::raw(format!("{:>2}. ", index + 1)),
            Span::styled("■ ", Style::default().fg(type_color(kind))),
            Span::raw(format!("{:<7} {}/{}", label, stack.len(), stack.capacity())),
        ]),
        Line::from(Span::styled(
            format!("    {}", contents),
            Style::default().fg(Color::Gray),
        )),
    ])
}

fn draw_stacks(frame: &mut Frame, session: &Session, area: Rect) {
    let items: Vec<ListItem> = session
        .stacks()
        .iter()
        .enumerate()
        .map(|(i, stack)| stack_item(i, stack))
        .collect();

    let list = List::new(items).block(
        Block::default()
            .title(format!(" Stacks ({}) ", session.stacks().len()))
            .borders(Borders::ALL),
    );

    frame.render_widget(list, area);
}

/// Details lines for the nail under the cursor
fn selected_lines(app: &App) -> Vec<Line<'static>> {
    let session = app.session();
    let Some(nail) = app.selected().and_then(|id| session.nail(id)) else {
        return vec![Line::from("No nail selected")];
    };

    let state = if nail.removed {
        "removed"
    } else if session.is_removable(nail.id) {
        "removable"
    } else {
        "blocked"
    };

    let mut lines = vec![Line::from(vec![
        Span::styled(
            format!("Nail {} ", nail.id),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            nail.nail_type.as_str(),
            Style::default().fg(type_color(Some(nail.nail_type))),
        ),
        Span::raw(format!(" ({})", state)),
    ])];

    if let Some(description) = session.level().description_of(nail.id) {
        lines.push(Line::from(description.to_string()));
    }
    lines.push(Line::from(format!(
        "Needs:     {}",
        id_list(&session.graph().dependencies(nail.id))
    )));
    lines.push(Line::from(format!(
        "Needed by: {}",
        id_list(&session.graph().dependents(nail.id))
    )));

    lines
}

fn draw_selected(frame: &mut Frame, app: &App, area: Rect) {
    let paragraph = Paragraph::new(selected_lines(app))
        .block(Block::default().title(" Selected ").borders(Borders::ALL))
        .wrap(Wrap { trim: true });

    frame.render_widget(paragraph, area);
}
