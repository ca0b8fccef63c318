//! # Scaffold Operations CLI
//!
//! This is the binary entry point for the `scaffold-ops` command-line tool.
//!
//! Its primary responsibilities are:
//! - Parsing command-line arguments using `clap`.
//! - Setting up logging, which is where file reports end up.
//! - Executing the appropriate command and turning errors into user-facing
//!   output.
//!
//! All of the actual logic lives in the `scaffold_ops` library crate.

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli.execute()
}
