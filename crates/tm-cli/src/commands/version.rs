//! Version command implementation

use anyhow::{Context, Result};

use crate::cli::GlobalArgs;
use crate::commands::common::{load_config, open_driver};

/// Execute the version command
pub fn execute(global: &GlobalArgs) -> Result<()> {
    let config = load_config(global)?;
    let driver = open_driver(&config)?;
    let current = driver
        .current_version()
        .context("Failed to read current version")?;
    println!("{current}");
    Ok(())
}
