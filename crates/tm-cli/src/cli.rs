//! CLI argument definitions using clap derive API

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Tidemark - versioned SQL migrations, one step at a time
#[derive(Parser, Debug)]
#[command(name = "tidemark")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all commands
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to project directory
    #[arg(short = 'p', long, global = true, default_value = ".")]
    pub project_dir: String,

    /// Override config file path
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Environment from tidemark.yml to use (falls back to TIDEMARK_ENV)
    #[arg(short, long, global = true)]
    pub env: Option<String>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate the next up/down migration pair
    Create(CreateArgs),

    /// Apply pending migrations
    Up(MigrateArgs),

    /// Revert applied migrations
    Down(MigrateArgs),

    /// List migrations and whether they are applied
    Status(StatusArgs),

    /// Print the current schema version
    Version,
}

/// Arguments for the create command
#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Migration name, e.g. add_users
    pub name: String,
}

/// Arguments shared by the up and down commands
#[derive(Args, Debug)]
pub struct MigrateArgs {
    /// Move this many steps instead of all the way
    #[arg(short = 'n', long, conflicts_with = "only")]
    pub steps: Option<u32>,

    /// Run only the migration with this version
    #[arg(long, value_name = "VERSION")]
    pub only: Option<u64>,
}

/// Arguments for the status command
#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub output: StatusOutput,
}

/// Status output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusOutput {
    /// Human-readable table
    Table,
    /// JSON array
    Json,
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;
