//! Plain-text rendering of a session

use crate::domain::{NailId, Session, Stack};

const PRESENT: char = '●';
const REMOVED: char = '○';

/// Grid size for a session, falling back to the nail extents when the level
/// declares no size
pub fn grid_size(session: &Session) -> (usize, usize) {
    let level = session.level();
    let (max_x, max_y) = level
        .positions
        .values()
        .fold((0, 0), |(mx, my), p| (mx.max(p.x), my.max(p.y)));

    let width = usize::from(level.width.max(max_x + 1));
    let height = usize::from(level.height.max(max_y + 1));
    (width, height)
}

/// Draws the nails on a character grid, one string per row
pub fn grid(session: &Session) -> Vec<String> {
    let (width, height) = grid_size(session);
    let mut cells = vec![vec![' '; width]; height];

    for nail in session.nails() {
        if let Some(pos) = session.level().position_of(nail.id) {
            cells[usize::from(pos.y)][usize::from(pos.x)] =
                if nail.removed { REMOVED } else { PRESENT };
        }
    }

    cells
        .into_iter()
        .map(|row| {
            let line: Vec<String> = row.into_iter().map(String::from).collect();
            format!("  {}", line.join(" ")).trim_end().to_string()
        })
        .collect()
}

pub fn id_list(ids: &[NailId]) -> String {
    if ids.is_empty() {
        "none".to_string()
    } else {
        ids.iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

pub fn stack_line(index: usize, stack: &Stack) -> String {
    let kind = stack
        .accepted_type()
        .map(|t| t.as_str())
        .unwrap_or("empty");
    format!(
        "Stack {} [{}] {}/{}: {}",
        index + 1,
        kind,
        stack.len(),
        stack.capacity(),
        if stack.is_empty() {
            "-".to_string()
        } else {
            id_list(stack.items())
        }
    )
}

/// Full text view: grid, dependencies, removable and removed nails, stacks
pub fn render(session: &Session) -> Vec<String> {
    let level = session.level();
    let mut lines = vec![format!("=== Level {}: {} ===", level.number, level.description)];

    lines.extend(grid(session));
    lines.push(String::new());

    lines.push("Dependencies:".to_string());
    for nail in session.nails() {
        let deps = session.graph().dependencies(nail.id);
        if !deps.is_empty() {
            lines.push(format!("  Nail {} depends on: {}", nail.id, id_list(&deps)));
        }
    }
    lines.push(String::new());

    lines.push(format!("Removable: {}", id_list(&session.removable_nails())));
    lines.push(format!("Removed:   {}", id_list(&session.removed_nails())));
    for (index, stack) in session.stacks().iter().enumerate() {
        lines.push(stack_line(index, stack));
    }
    lines.push(format!("Turn: {}  Status: {}", session.current_player(), session.status()));

    lines
}
