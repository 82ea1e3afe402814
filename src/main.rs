use anyhow::{Result, anyhow};
use clap::Parser;

mod cli;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    divecards::logging::init_logging(&cli.log_level).map_err(|err| anyhow!(err))?;
    cli::run(cli)
}
