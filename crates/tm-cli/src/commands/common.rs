//! Shared utilities for CLI commands

use anyhow::{Context, Result};
use std::path::Path;
use tm_core::{Config, Driver, DriverRegistry};

use crate::cli::GlobalArgs;
use crate::plan;

/// Drivers compiled into the binary
pub(crate) fn registry() -> DriverRegistry {
    let mut registry = DriverRegistry::new();
    registry.register(plan::NAME, plan::PlanDriver::boxed);
    registry
}

/// Load tidemark.yml (or the `--config` override) and apply the selected
/// environment.
pub(crate) fn load_config(global: &GlobalArgs) -> Result<Config> {
    let config = match &global.config {
        Some(path) => Config::load(Path::new(path)),
        None => Config::load_from_dir(Path::new(&global.project_dir)),
    }
    .context("Failed to load config")?;

    let env = Config::resolve_environment(global.env.as_deref());
    if let Some(name) = &env {
        log::debug!("Using environment '{name}'");
    }
    config
        .for_environment(env.as_deref())
        .context("Failed to select environment")
}

/// Build the configured driver without connecting.
pub(crate) fn driver_for(config: &Config) -> Result<Box<dyn Driver>> {
    registry()
        .get(&config.driver)
        .context("Failed to create driver")
}

/// Build the configured driver and connect it.
pub(crate) fn open_driver(config: &Config) -> Result<Box<dyn Driver>> {
    let mut driver = driver_for(config)?;
    driver
        .open(&config.dsn)
        .with_context(|| format!("Failed to open {} driver", config.driver))?;
    Ok(driver)
}
