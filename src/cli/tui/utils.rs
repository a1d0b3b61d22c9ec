//! Shared utilities for TUI views

use ratatui::style::Color;

use crate::domain::{type_rgb, NailId, NailType, Position};

/// Cursor movement on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Heading {
    Up,
    Down,
    Left,
    Right,
}

/// Picks the nail nearest to `from` in the given heading
///
/// Distance along the heading counts once and sideways drift counts twice,
/// so the cursor prefers staying on its row or column. Ties go to the lower
/// id.
pub fn nearest_in_heading(
    from: Position,
    heading: Heading,
    candidates: impl IntoIterator<Item = (NailId, Position)>,
) -> Option<NailId> {
    let (fx, fy) = (i32::from(from.x), i32::from(from.y));

    candidates
        .into_iter()
        .filter_map(|(id, pos)| {
            let (dx, dy) = (i32::from(pos.x) - fx, i32::from(pos.y) - fy);
            let (along, across) = match heading {
                Heading::Up => (-dy, dx),
                Heading::Down => (dy, dx),
                Heading::Left => (-dx, dy),
                Heading::Right => (dx, dy),
            };
            (along > 0).then(|| (along + 2 * across.abs(), id))
        })
        .min()
        .map(|(_, id)| id)
}

/// Terminal color for a nail type, grey for none
pub fn type_color(nail_type: Option<NailType>) -> Color {
    let (r, g, b) = type_rgb(nail_type);
    Color::Rgb(r, g, b)
}

/// Truncate a string to max_len characters, adding "..." if truncated
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let truncate_at = max_len.saturating_sub(3);
        let truncated: String = s.chars().take(truncate_at).collect();
        format!("{}...", truncated)
    }
}
