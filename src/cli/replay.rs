//! Replay command: runs a sequence of moves against a level headlessly
//!
//! Refused moves are part of the result, not command failures. Only a
//! malformed move or an unknown level makes the command fail.

use std::fmt;
use std::str::FromStr;

use anyhow::{Context, Result};
use serde::Serialize;

use super::board;
use super::level_cmd::find_level;
use super::output::Output;
use crate::domain::{GameStatus, NailId, NailParseError, PlacementResult, Removal, Session};

/// One move in a play trace
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Move {
    Remove(NailId),
    AddStack,
}

impl FromStr for Move {
    type Err = NailParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "+" | "add" => Ok(Move::AddStack),
            other => other.parse().map(Move::Remove),
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Move::Remove(id) => write!(f, "remove {}", id),
            Move::AddStack => f.write_str("add stack"),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum StepOutcome {
    Removed(Removal),
    StackAdded { stack: usize },
    Refused { error: String },
}

#[derive(Debug, Serialize)]
pub struct Step {
    #[serde(rename = "move")]
    pub action: String,
    pub result: StepOutcome,
}

/// Applies one move to the session
pub fn apply(session: &mut Session, action: Move) -> StepOutcome {
    let outcome = match action {
        Move::Remove(id) => session.attempt_remove(id).map(StepOutcome::Removed),
        Move::AddStack => session
            .add_stack()
            .map(|stack| StepOutcome::StackAdded { stack }),
    };

    outcome.unwrap_or_else(|e| StepOutcome::Refused {
        error: e.to_string(),
    })
}

fn describe(outcome: &StepOutcome) -> String {
    match outcome {
        StepOutcome::Removed(Removal { placement, .. }) => match placement {
            PlacementResult::Placed { stack, cleared: false } => {
                format!("placed on stack {}", stack + 1)
            }
            PlacementResult::Placed { stack, cleared: true } => {
                format!("placed on stack {} (stack full, cleared)", stack + 1)
            }
            PlacementResult::Rejected => "rejected: no stack accepts it".to_string(),
        },
        StepOutcome::StackAdded { stack } => format!("stack {} added", stack + 1),
        StepOutcome::Refused { error } => format!("refused: {}", error),
    }
}

/// Parses move tokens
pub fn parse_moves(tokens: &[String]) -> Result<Vec<Move>> {
    tokens
        .iter()
        .enumerate()
        .map(|(i, token)| {
            token
                .parse::<Move>()
                .with_context(|| format!("Invalid move #{}: '{}'", i + 1, token))
        })
        .collect()
}

/// Replay a trace of moves on a level
pub fn run(output: &Output, number: u32, tokens: &[String]) -> Result<()> {
    let moves = parse_moves(tokens)?;
    let level = find_level(number)?;
    let mut session = Session::new(level)?;
    output.verbose_ctx("replay", &format!("Replaying {} moves on level {}", moves.len(), number));

    let mut steps = Vec::with_capacity(moves.len());
    for action in moves {
        let result = apply(&mut session, action);
        output.verbose_ctx("replay", &format!("{} -> {:?}", action, result));
        steps.push(Step {
            action: action.to_string(),
            result,
        });
    }

    if output.is_json() {
        output.data(&serde_json::json!({
            "steps": steps,
            "final": session.snapshot(),
        }));
        return Ok(());
    }

    for (i, step) in steps.iter().enumerate() {
        println!("{:>3}. {:<12} {}", i + 1, step.action, describe(&step.result));
    }
    println!();
    for line in board::render(&session) {
        println!("{}", line);
    }

    match session.status() {
        GameStatus::LevelComplete => {
            if let Some(winner) = session.winner() {
                println!();
                println!("Level complete! {} made the final move.", winner);
            }
        }
        GameStatus::GameOver => {
            println!();
            println!("Game over: a nail was pulled that no stack would take.");
        }
        GameStatus::InProgress => {}
    }

    Ok(())
}
