//! # Command-Line Interface
//!
//! User-facing commands, output formatting and the terminal UI.
//!
//! ## Commands
//!
//! | Command | Purpose | Example |
//! |---------|---------|---------|
//! | `levels` | List built-in levels | `nails levels` |
//! | `show` | Print a level's starting board | `nails show 2` |
//! | `check` | Validate every built-in level | `nails check` |
//! | `replay` | Run a move trace headlessly | `nails replay 1 1 2 + 3` |
//! | `play` | Interactive terminal UI | `nails play --level 3` |
//!
//! ## Output Formats
//!
//! All commands support the `--format` flag:
//! - `text` (default) - Human-readable output
//! - `json` - Machine-parseable JSON
//!
//! The default can be changed with `default_format` in the config file.
//!
//! ## Verbose Mode
//!
//! Use `--verbose` (or `-v`) for debug output:
//! ```bash
//! nails --verbose replay 1 1 2
//! ```
//!
//! ## Entry Point
//!
//! Call [`run()`] to parse arguments and execute the appropriate command.

mod app;
mod board;
mod level_cmd;
mod output;
mod replay;
mod tui;

pub use app::{run, Cli, Commands};
pub use output::{Output, OutputFormat};
