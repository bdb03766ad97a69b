//! Up and down command implementation

use anyhow::{Context, Result};
use tm_core::{transaction, Direction, Service};

use crate::cli::{GlobalArgs, MigrateArgs};
use crate::commands::common::{load_config, open_driver};

/// Execute the up or down command, depending on `direction`
pub fn execute(args: &MigrateArgs, global: &GlobalArgs, direction: Direction) -> Result<()> {
    let config = load_config(global)?;
    let mut driver = open_driver(&config)?;

    let current = driver
        .current_version()
        .context("Failed to read current version")?;
    let service = Service::new(&config).with_version(current);

    println!(
        "Migrating {direction} from version {current} using {}",
        driver.name()
    );

    // One transaction for the whole batch: a failed step undoes the call.
    transaction(driver.as_mut(), |d| match (args.only, args.steps) {
        (Some(version), _) => service.apply_version(d, direction, version),
        (None, Some(steps)) if direction == Direction::Up => service.next_by(d, steps),
        (None, Some(steps)) => service.prev_by(d, steps),
        (None, None) if direction == Direction::Up => service.up(d),
        (None, None) => service.down(d),
    })
    .with_context(|| format!("Migrating {direction} failed"))?;

    println!("Done");
    Ok(())
}
