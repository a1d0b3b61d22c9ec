//! Domain models for the nail puzzle
//!
//! Contains the game core without any I/O concerns.

mod nail;
mod level;
mod graph;
mod stack;
mod session;

pub use nail::{type_rgb, Nail, NailId, NailParseError, NailType, NEUTRAL_RGB};
pub use level::{Level, LevelError, Position};
pub use graph::NailGraph;
pub use stack::{PlacementResult, Stack, Stacks};
pub use session::{ActionError, GameStatus, Player, Removal, Session, SessionSnapshot};
