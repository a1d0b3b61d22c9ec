//! Interactive terminal game
//!
//! A ratatui front end over [`Session`](crate::domain::Session). Every game
//! state change goes through the session; this module only tracks the
//! cursor, overlays and status messages.

mod app;
mod event;
mod ui;
mod utils;
mod views;

use std::panic::{self, AssertUnwindSafe};

use anyhow::{anyhow, Result};

use super::Output;
use crate::config::Config;
use app::App;
use event::EventHandler;

/// Launch the game on the given level
pub fn run(output: &Output, config: &Config, level: u32) -> Result<()> {
    output.verbose_ctx("tui", "Initializing TUI application");

    // Load the level before touching the terminal so errors print normally
    let mut app = App::new(level, config.show_help)?;
    output.verbose_ctx(
        "tui",
        &format!("Loaded level {} ({} nails)", level, app.session().level().nail_count()),
    );

    let mut terminal = ui::init_terminal()?;
    let event_handler = EventHandler::new(config.tick_rate_ms);

    // Restore the terminal even if the app panics
    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        app.run(&mut terminal, event_handler)
    }));

    let restore_result = ui::restore_terminal();

    match result {
        Ok(inner_result) => {
            restore_result?;
            inner_result?;
            output.verbose_ctx(
                "tui",
                &format!("Quit on level {} after {} moves", app.level_number(), app.session().moves()),
            );
            Ok(())
        }
        Err(panic_payload) => {
            let _ = restore_result;
            if let Some(s) = panic_payload.downcast_ref::<&str>() {
                Err(anyhow!("TUI panicked: {}", s))
            } else if let Some(s) = panic_payload.downcast_ref::<String>() {
                Err(anyhow!("TUI panicked: {}", s))
            } else {
                Err(anyhow!("TUI panicked with unknown error"))
            }
        }
    }
}
