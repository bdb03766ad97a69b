//! Driver contract implemented by storage backends.
//!
//! A driver executes migration scripts and owns the persisted version
//! marker. Tidemark only defines the contract; backends register a factory
//! in a [`DriverRegistry`] under the name used in `tidemark.yml`.

use crate::direction::Direction;
use crate::error::{CoreError, CoreResult, DriverResult};
use crate::migration::Migration;
use std::collections::BTreeMap;

/// Backend-specific executor of migration scripts.
pub trait Driver {
    /// Driver identifier for logging
    fn name(&self) -> &str;

    /// Connect using a DSN
    fn open(&mut self, dsn: &str) -> DriverResult<()>;

    /// Version currently persisted by the backing store (0 when unset)
    fn current_version(&self) -> DriverResult<u64>;

    /// Execute one migration script inside the ambient transaction
    fn migrate(&mut self, migration: &Migration, direction: Direction) -> DriverResult<()>;

    /// Script file extension, including the leading dot
    fn ext(&self) -> &str;

    fn begin(&mut self) -> DriverResult<()>;

    fn commit(&mut self) -> DriverResult<()>;

    fn rollback(&mut self) -> DriverResult<()>;
}

/// Execute `body` between `begin` and `commit`, rolling back on error.
///
/// The error returned by `body` is passed through unchanged. A failed
/// commit is rolled back and reported as the error.
pub fn transaction<D, T, F>(driver: &mut D, body: F) -> CoreResult<T>
where
    D: Driver + ?Sized,
    F: FnOnce(&mut D) -> CoreResult<T>,
{
    driver.begin()?;

    let result = body(driver);

    match &result {
        Ok(_) => {
            if let Err(commit_err) = driver.commit() {
                if let Err(e) = driver.rollback() {
                    log::warn!("Rollback after failed commit also failed: {e}");
                }
                return Err(commit_err.into());
            }
        }
        Err(e) => {
            log::debug!("Rolling back {} transaction: {e}", driver.name());
            if let Err(rollback_err) = driver.rollback() {
                log::warn!("Rollback failed: {rollback_err}");
            }
        }
    }
    result
}

/// Constructor for a fresh, unopened driver
pub type DriverFactory = fn() -> Box<dyn Driver>;

/// Drivers available by name.
#[derive(Debug, Default, Clone)]
pub struct DriverRegistry {
    factories: BTreeMap<String, DriverFactory>,
}

impl DriverRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `factory` under `name`, replacing any previous entry.
    pub fn register(&mut self, name: impl Into<String>, factory: DriverFactory) -> &mut Self {
        self.factories.insert(name.into(), factory);
        self
    }

    /// Build a new driver registered under `name`.
    pub fn get(&self, name: &str) -> CoreResult<Box<dyn Driver>> {
        self.factories
            .get(name)
            .map(|factory| factory())
            .ok_or_else(|| CoreError::UnknownDriver {
                name: name.to_string(),
                available: self.names().join(", "),
            })
    }

    /// Registered names in sorted order
    pub fn names(&self) -> Vec<&str> {
        self.factories.keys().map(String::as_str).collect()
    }
}

#[cfg(test)]
#[path = "driver_test.rs"]
mod tests;
