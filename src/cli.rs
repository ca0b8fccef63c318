//! CLI argument parsing and command dispatch

use std::io::Write;
use std::str::FromStr;

use anyhow::Result;
use clap::{Parser, Subcommand};
use log::{Level, LevelFilter};
use scaffold_ops::output::{ColorChoice, OutputConfig};

use crate::commands;

/// Scaffold Operations - Materialize project layouts on disk
#[derive(Parser, Debug)]
#[command(name = "scaffold-ops")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Colorize output (always, never, auto)
    #[arg(long, global = true, value_name = "WHEN", default_value = "auto")]
    color: ColorChoice,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(long, global = true, value_name = "LEVEL", default_value = "info")]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Materialize a layout file into a project directory
    Apply(commands::apply::ApplyArgs),

    /// Merge declared requirements with pinned package versions
    Requirements(commands::requirements::RequirementsArgs),

    /// Turn a name into a valid identifier or namespace
    Identifier(commands::identifier::IdentifierArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        init_logging(&self.log_level)?;
        let output = OutputConfig::from_env(self.color);

        match self.command {
            Commands::Apply(args) => commands::apply::execute(args, &output),
            Commands::Requirements(args) => commands::requirements::execute(args),
            Commands::Identifier(args) => commands::identifier::execute(args),
        }
    }
}

/// Install `env_logger` at `level`. `RUST_LOG`, when set, takes precedence.
fn init_logging(level: &str) -> Result<()> {
    let filter = LevelFilter::from_str(level).map_err(|_| {
        anyhow::anyhow!(
            "Invalid log level: {level}\n\n\
             hint: Use one of error, warn, info, debug, trace"
        )
    })?;

    let mut builder = env_logger::Builder::new();
    builder.filter_level(filter);
    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }

    // Reports are logged at info level and read best without decoration
    builder.format(|buf, record| {
        if record.level() == Level::Info {
            writeln!(buf, "{}", record.args())
        } else {
            writeln!(buf, "{}: {}", record.level(), record.args())
        }
    });

    // A logger may already be installed when running inside tests
    let _ = builder.try_init();
    Ok(())
}
