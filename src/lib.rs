//! Nails - a two-player nail-pulling puzzle
//!
//! Nails sit on a board and depend on each other: a nail can only be pulled
//! once every nail it depends on is gone. Each pulled nail goes onto the
//! first stack that takes its color, and a stack that fills up clears
//! itself. A nail that no stack takes ends the game.

pub mod domain;
pub mod levels;
pub mod config;
pub mod cli;

pub use domain::{GameStatus, Level, NailId, NailType, Session};
