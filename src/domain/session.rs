//! Game session
//!
//! A session is one level being played. It composes the nail graph and the
//! stacks, and is the only place game state changes. Every state change goes
//! through [`Session::attempt_remove`] or [`Session::add_stack`].
//!
//! ## State machine
//!
//! ```text
//! InProgress --remove+placed, nails left--> InProgress
//! InProgress --remove+placed, none left---> LevelComplete
//! InProgress --remove+rejected------------> GameOver
//! ```
//!
//! Both terminal states reject further actions with
//! [`ActionError::Inactive`].

use serde::Serialize;
use std::fmt;
use thiserror::Error;

use super::graph::NailGraph;
use super::level::{Level, LevelError};
use super::nail::{Nail, NailId};
use super::stack::{PlacementResult, Stack, Stacks};

/// Why an action was refused. The session is unchanged in every case.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ActionError {
    #[error("The game is over ({0}); no further moves are accepted")]
    Inactive(GameStatus),

    #[error("There is no nail {0} in this level")]
    UnknownNail(NailId),

    #[error("Nail {0} cannot be removed yet")]
    NotRemovable(NailId),
}

/// The two players, who alternate after every successful placement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Player {
    #[default]
    One,
    Two,
}

impl Player {
    /// Returns the other player
    pub fn opponent(self) -> Self {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    pub fn number(self) -> u8 {
        match self {
            Player::One => 1,
            Player::Two => 2,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Player {}", self.number())
    }
}

/// Session status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    #[default]
    InProgress,
    LevelComplete,
    GameOver,
}

impl GameStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, GameStatus::InProgress)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameStatus::InProgress => "in progress",
            GameStatus::LevelComplete => "level complete",
            GameStatus::GameOver => "game over",
        }
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of a successful removal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Removal {
    pub nail: NailId,
    pub placement: PlacementResult,
    pub status: GameStatus,
}

/// A level being played
#[derive(Debug, Clone)]
pub struct Session {
    level: Level,
    graph: NailGraph,
    stacks: Stacks,
    current_player: Player,
    game_over: bool,
    moves: u32,
}

impl Session {
    /// Starts a fresh session for a level
    pub fn new(level: Level) -> Result<Self, LevelError> {
        let graph = NailGraph::from_level(&level)?;
        let stacks = Stacks::new(level.stack_capacity);

        Ok(Self {
            level,
            graph,
            stacks,
            current_player: Player::One,
            game_over: false,
            moves: 0,
        })
    }

    /// Removes a nail and places it onto a stack
    ///
    /// The removal is kept even when no stack takes the nail; that is the
    /// losing move.
    pub fn attempt_remove(&mut self, id: NailId) -> Result<Removal, ActionError> {
        let status = self.status();
        if status.is_terminal() {
            return Err(ActionError::Inactive(status));
        }
        if !self.graph.contains(id) {
            return Err(ActionError::UnknownNail(id));
        }
        if !self.graph.is_removable(id) {
            return Err(ActionError::NotRemovable(id));
        }

        let nail = self
            .graph
            .remove(id)
            .cloned()
            .ok_or(ActionError::UnknownNail(id))?;

        let placement = self.stacks.try_place(&nail);
        match placement {
            PlacementResult::Placed { .. } => {
                self.current_player = self.current_player.opponent();
                self.moves += 1;
            }
            PlacementResult::Rejected => {
                self.game_over = true;
            }
        }

        Ok(Removal {
            nail: id,
            placement,
            status: self.status(),
        })
    }

    /// Adds an empty stack and returns its index
    pub fn add_stack(&mut self) -> Result<usize, ActionError> {
        let status = self.status();
        if status.is_terminal() {
            return Err(ActionError::Inactive(status));
        }
        Ok(self.stacks.add_stack())
    }

    /// Current status, derived from the game-over flag and the graph
    pub fn status(&self) -> GameStatus {
        if self.game_over {
            GameStatus::GameOver
        } else if self.graph.is_complete() {
            GameStatus::LevelComplete
        } else {
            GameStatus::InProgress
        }
    }

    pub fn is_removable(&self, id: NailId) -> bool {
        self.graph.is_removable(id)
    }

    /// True once every nail is removed
    pub fn is_complete(&self) -> bool {
        self.graph.is_complete()
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// The player whose turn it is
    pub fn current_player(&self) -> Player {
        self.current_player
    }

    /// The player who made the final placement of a completed level
    pub fn winner(&self) -> Option<Player> {
        match self.status() {
            GameStatus::LevelComplete => Some(self.current_player.opponent()),
            _ => None,
        }
    }

    /// Number of successful placements so far
    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    pub fn graph(&self) -> &NailGraph {
        &self.graph
    }

    /// All nails in id order
    pub fn nails(&self) -> impl Iterator<Item = &Nail> {
        self.graph.nails()
    }

    pub fn nail(&self, id: NailId) -> Option<&Nail> {
        self.graph.get(id)
    }

    /// Stacks in creation order
    pub fn stacks(&self) -> &[Stack] {
        self.stacks.as_slice()
    }

    pub fn removable_nails(&self) -> Vec<NailId> {
        self.graph.removable()
    }

    pub fn removed_nails(&self) -> Vec<NailId> {
        self.graph.removed()
    }

    /// Serializable view of the whole session
    pub fn snapshot(&self) -> SessionSnapshot<'_> {
        SessionSnapshot {
            level: self.level.number,
            description: &self.level.description,
            status: self.status(),
            current_player: self.current_player,
            winner: self.winner(),
            moves: self.moves,
            nails: self.nails().collect(),
            removable: self.removable_nails(),
            stacks: self.stacks(),
        }
    }
}

/// Read-only view of a session for rendering and JSON output
#[derive(Debug, Serialize)]
pub struct SessionSnapshot<'a> {
    pub level: u32,
    pub description: &'a str,
    pub status: GameStatus,
    pub current_player: Player,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub winner: Option<Player>,
    pub moves: u32,
    pub nails: Vec<&'a Nail>,
    pub removable: Vec<NailId>,
    pub stacks: &'a [Stack],
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::NailType;

    fn id(n: u32) -> NailId {
        NailId::new(n)
    }

    fn pair(capacity: usize) -> Level {
        Level::new(1, "Pair", capacity)
            .nail(1, (0, 0), NailType::Red)
            .nail(2, (1, 0), NailType::Red)
    }

    #[test]
    fn new_session_state() {
        let session = Session::new(pair(3)).unwrap();
        assert_eq!(session.status(), GameStatus::InProgress);
        assert_eq!(session.current_player(), Player::One);
        assert_eq!(session.stacks().len(), 1);
        assert_eq!(session.moves(), 0);
        assert_eq!(session.winner(), None);
    }

    #[test]
    fn invalid_level_prevents_session() {
        let level = pair(3).depends_on(1, &[7]);
        assert!(matches!(
            Session::new(level),
            Err(LevelError::UnknownDependency { .. })
        ));
    }

    #[test]
    fn unknown_nail_is_reported() {
        let mut session = Session::new(pair(3)).unwrap();
        assert_eq!(
            session.attempt_remove(id(9)),
            Err(ActionError::UnknownNail(id(9)))
        );
        assert_eq!(session.current_player(), Player::One);
    }

    #[test]
    fn removing_twice_is_not_removable() {
        let mut session = Session::new(pair(3)).unwrap();
        session.attempt_remove(id(1)).unwrap();
        assert_eq!(
            session.attempt_remove(id(1)),
            Err(ActionError::NotRemovable(id(1)))
        );
        assert_eq!(session.current_player(), Player::Two);
    }

    #[test]
    fn completing_the_level() {
        let mut session = Session::new(pair(3)).unwrap();
        session.attempt_remove(id(1)).unwrap();
        let removal = session.attempt_remove(id(2)).unwrap();

        assert_eq!(removal.status, GameStatus::LevelComplete);
        assert!(session.is_complete());
        assert_eq!(session.winner(), Some(Player::Two));
        assert_eq!(session.moves(), 2);
    }

    #[test]
    fn terminal_session_refuses_actions() {
        let mut session = Session::new(pair(3)).unwrap();
        session.attempt_remove(id(1)).unwrap();
        session.attempt_remove(id(2)).unwrap();

        assert_eq!(
            session.attempt_remove(id(1)),
            Err(ActionError::Inactive(GameStatus::LevelComplete))
        );
        assert_eq!(
            session.add_stack(),
            Err(ActionError::Inactive(GameStatus::LevelComplete))
        );
    }

    #[test]
    fn add_stack_keeps_turn() {
        let mut session = Session::new(pair(3)).unwrap();
        assert_eq!(session.add_stack(), Ok(1));
        assert_eq!(session.current_player(), Player::One);
        assert_eq!(session.status(), GameStatus::InProgress);
        assert_eq!(session.stacks().len(), 2);
    }

    #[test]
    fn snapshot_serializes() {
        let mut session = Session::new(pair(3)).unwrap();
        session.attempt_remove(id(1)).unwrap();

        let json = serde_json::to_value(session.snapshot()).unwrap();
        assert_eq!(json["level"], 1);
        assert_eq!(json["status"], "in_progress");
        assert_eq!(json["current_player"], "two");
        assert_eq!(json["moves"], 1);
        assert_eq!(json["removable"], serde_json::json!([2]));
        assert_eq!(json["stacks"][0]["items"], serde_json::json!([1]));
        assert_eq!(json["stacks"][0]["accepted_type"], "red");
        assert!(json.get("winner").is_none());
    }

    #[test]
    fn player_display() {
        assert_eq!(Player::One.to_string(), "Player 1");
        assert_eq!(Player::Two.opponent(), Player::One);
    }
}
