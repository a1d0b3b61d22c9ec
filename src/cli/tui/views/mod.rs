//! Views drawn by the TUI

mod board;
mod game;
mod popup;
mod sidebar;

pub use game::draw;
