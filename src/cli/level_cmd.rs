//! Level commands (levels, show, check)

use anyhow::{anyhow, Result};

use super::board;
use super::output::Output;
use crate::domain::{Level, Session};
use crate::levels;

/// Looks up a built-in level or fails with the valid range
pub fn find_level(number: u32) -> Result<Level> {
    levels::get(number).ok_or_else(|| {
        anyhow!(
            "Level {} does not exist (levels are numbered 1-{})",
            number,
            levels::count()
        )
    })
}

/// List the built-in levels
pub fn list(output: &Output) -> Result<()> {
    let all = levels::all();
    output.verbose_ctx("levels", &format!("Found {} levels", all.len()));

    if output.is_json() {
        let items: Vec<_> = all
            .iter()
            .map(|level| {
                serde_json::json!({
                    "number": level.number,
                    "description": level.description,
                    "nails": level.nail_count(),
                    "stack_capacity": level.stack_capacity,
                })
            })
            .collect();
        output.data(&items);
    } else {
        println!("{:<6} {:<24} {:>6} {:>9}", "LEVEL", "DESCRIPTION", "NAILS", "CAPACITY");
        println!("{}", "-".repeat(48));
        for level in &all {
            println!(
                "{:<6} {:<24} {:>6} {:>9}",
                level.number,
                level.description,
                level.nail_count(),
                level.stack_capacity
            );
        }
    }

    Ok(())
}

/// Show a level's starting board
pub fn show(output: &Output, number: u32) -> Result<()> {
    let level = find_level(number)?;
    output.verbose_ctx("show", &format!("Loaded level {}: {}", level.number, level.description));

    if output.is_json() {
        output.data(&level);
        return Ok(());
    }

    let session = Session::new(level)?;
    for line in board::render(&session) {
        println!("{}", line);
    }

    let level = session.level();
    if !level.descriptions.is_empty() {
        println!();
        println!("Nails:");
        for nail in session.nails() {
            if let Some(description) = level.description_of(nail.id) {
                println!("  {:>3} {:<7} {}", nail.id, nail.nail_type.as_str(), description);
            }
        }
    }

    Ok(())
}

/// Validate every built-in level
pub fn check(output: &Output) -> Result<()> {
    let failures = levels::check_all();
    output.verbose_ctx("check", &format!("Checked {} levels", levels::count()));

    if output.is_json() {
        let items: Vec<_> = levels::all()
            .iter()
            .map(|level| {
                let error = failures
                    .iter()
                    .find(|(number, _)| *number == level.number)
                    .map(|(_, e)| e.to_string());
                serde_json::json!({
                    "number": level.number,
                    "valid": error.is_none(),
                    "error": error,
                })
            })
            .collect();
        output.data(&items);
    } else {
        for level in levels::all() {
            match failures.iter().find(|(number, _)| *number == level.number) {
                Some((_, e)) => println!("Level {}: INVALID ({})", level.number, e),
                None => println!("Level {}: ok", level.number),
            }
        }
        if failures.is_empty() {
            output.success(&format!("All {} levels are valid", levels::count()));
        }
    }

    if failures.is_empty() {
        Ok(())
    } else {
        Err(anyhow!("{} level(s) failed validation", failures.len()))
    }
}
