//! Main CLI application structure

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use super::output::{Output, OutputFormat};
use super::{level_cmd, replay, tui};
use crate::config::Config;

#[derive(Parser)]
#[command(name = "nails")]
#[command(author, version, about = "Pull nails off the board without getting stuck")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format (defaults to the configured format, then text)
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Configuration file to use instead of the default location
    #[arg(long, global = true, env = "NAILS_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the built-in levels
    Levels,

    /// Show a level's starting board
    Show {
        /// Level number
        level: u32,
    },

    /// Validate every built-in level
    Check,

    /// Replay a sequence of moves on a level
    Replay {
        /// Level number
        level: u32,

        /// Moves: a nail id to remove it, or `+` to add a stack
        #[arg(required = true, allow_hyphen_values = true)]
        moves: Vec<String>,
    },

    /// Play interactively in the terminal
    Play {
        /// Level to start on (defaults to the configured starting level)
        #[arg(long, short)]
        level: Option<u32>,
    },
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;
    let output = Output::new(cli.format.unwrap_or(config.default_format), cli.verbose);

    output.verbose("Nails starting");
    if let Some(path) = &cli.config {
        output.verbose_ctx("config", &format!("Using config file: {}", path.display()));
    }

    match cli.command {
        Commands::Levels => level_cmd::list(&output)?,

        Commands::Show { level } => level_cmd::show(&output, level)?,

        Commands::Check => level_cmd::check(&output)?,

        Commands::Replay { level, moves } => {
            output.verbose_ctx("replay", &format!("Level {}, moves: {:?}", level, moves));
            replay::run(&output, level, &moves)?
        }

        Commands::Play { level } => {
            let level = level.unwrap_or(config.starting_level);
            output.verbose_ctx("play", &format!("Starting on level {}", level));
            tui::run(&output, &config, level)?
        }
    }

    output.verbose("Command completed successfully");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_replay_moves() {
        let cli = Cli::try_parse_from(["nails", "replay", "1", "1", "+", "2"]).unwrap();
        match cli.command {
            Commands::Replay { level, moves } => {
                assert_eq!(level, 1);
                assert_eq!(moves, vec!["1", "+", "2"]);
            }
            _ => panic!("Expected replay"),
        }
    }

    #[test]
    fn parse_format_flag() {
        let cli = Cli::try_parse_from(["nails", "levels", "--format", "json"]).unwrap();
        assert_eq!(cli.format, Some(OutputFormat::Json));

        let cli = Cli::try_parse_from(["nails", "levels"]).unwrap();
        assert_eq!(cli.format, None);
    }

    #[test]
    fn play_level_is_optional() {
        let cli = Cli::try_parse_from(["nails", "play"]).unwrap();
        assert!(matches!(cli.command, Commands::Play { level: None }));

        let cli = Cli::try_parse_from(["nails", "play", "--level", "3"]).unwrap();
        assert!(matches!(cli.command, Commands::Play { level: Some(3) }));
    }
}
