//! Tidemark CLI - create and step through versioned SQL migrations

use anyhow::Result;
use clap::Parser;
use tm_core::Direction;

mod cli;
mod commands;
mod plan;

use cli::Cli;
use commands::{create, migrate, status, version};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.global.verbose);

    match &cli.command {
        cli::Commands::Create(args) => create::execute(args, &cli.global),
        cli::Commands::Up(args) => migrate::execute(args, &cli.global, Direction::Up),
        cli::Commands::Down(args) => migrate::execute(args, &cli.global, Direction::Down),
        cli::Commands::Status(args) => status::execute(args, &cli.global),
        cli::Commands::Version => version::execute(&cli.global),
    }
}

/// Log to stderr; `RUST_LOG` overrides the default level.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .format_target(false)
        .init();
}
