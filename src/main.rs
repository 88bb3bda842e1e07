//! Image Fidelity CLI Tool
//!
//! A command-line utility for comparing two images with full-reference
//! fidelity metrics.

use clap::Parser;
use pixfid::cli::{run, Cli};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
