//! Create command implementation

use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::path::Path;
use tm_core::Service;

use crate::cli::{CreateArgs, GlobalArgs};
use crate::commands::common::{driver_for, load_config};

/// Execute the create command
pub fn execute(args: &CreateArgs, global: &GlobalArgs) -> Result<()> {
    let config = load_config(global)?;
    let driver = driver_for(&config)?;
    let service = Service::new(&config);

    service
        .make_migrations_dir()
        .context("Failed to create migrations directory")?;

    let (up, down) = service
        .next_migration(&args.name, driver.as_ref())
        .context("Failed to generate migration names")?;

    for migration in [&up, &down] {
        let path = migration
            .name()
            .context("Generated migration has no file name")?;
        write_stub(path)?;
        println!("Created {}", path.display());
    }
    Ok(())
}

/// Create an empty script, refusing to overwrite an existing file.
fn write_stub(path: &Path) -> Result<()> {
    OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    Ok(())
}
