//! Command-line interface wiring for the `divecards` binary.
//!
//! This module owns the clap definitions and delegates execution to the
//! submodule that implements each command.

use anyhow::Result;
use clap::{Parser, Subcommand};

pub mod check;
pub mod common;
pub mod render;
pub mod utils;

/// Parsed CLI entrypoint for the `divecards` binary.
#[derive(Parser, Debug)]
#[command(name = "divecards", version, about = "Render illustrated dive cards as JPEG images")]
pub struct Cli {
    /// Log level: off, error, warn, info, debug or trace (`RUST_LOG` wins).
    #[arg(long = "log-level", global = true, default_value = "info")]
    pub log_level: String,

    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Commands made available to end users.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compose every dive in a record file and write one JPEG per dive.
    Render(render::RenderArgs),
    /// Validate a record file and print the planned rows of each card.
    Check(check::CheckArgs),
}

/// Execute the requested command.
pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Render(args) => render::handle(args),
        Command::Check(args) => check::handle(args),
    }
}
