//! Nails - a two-player nail-pulling puzzle

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = nail_puzzle::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
