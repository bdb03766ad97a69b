//! Shared test utilities for tm-core

use crate::direction::Direction;
use crate::driver::Driver;
use crate::error::{DriverError, DriverResult};
use crate::migration::Migration;
use std::path::Path;

/// In-memory driver that records every call instead of executing scripts.
#[derive(Debug, Default)]
pub struct RecordingDriver {
    /// Version reported by `current_version`
    pub version: u64,
    /// Fail `migrate` when it reaches this version
    pub fail_on: Option<u64>,
    /// `(version, direction)` of every successful `migrate` call, in order
    pub migrated: Vec<(u64, Direction)>,
    pub dsn: Option<String>,
    pub begins: usize,
    pub commits: usize,
    pub rollbacks: usize,
}

impl RecordingDriver {
    pub fn at_version(version: u64) -> Self {
        Self {
            version,
            ..Self::default()
        }
    }

    pub fn failing_on(mut self, version: u64) -> Self {
        self.fail_on = Some(version);
        self
    }

    /// Versions passed to `migrate`, in call order
    pub fn migrated_versions(&self) -> Vec<u64> {
        self.migrated.iter().map(|(v, _)| *v).collect()
    }
}

impl Driver for RecordingDriver {
    fn name(&self) -> &str {
        "recording"
    }

    fn open(&mut self, dsn: &str) -> DriverResult<()> {
        if dsn.is_empty() {
            return Err(DriverError::Connection("empty DSN".to_string()));
        }
        self.dsn = Some(dsn.to_string());
        Ok(())
    }

    fn current_version(&self) -> DriverResult<u64> {
        Ok(self.version)
    }

    fn migrate(&mut self, migration: &Migration, direction: Direction) -> DriverResult<()> {
        if self.fail_on == Some(migration.version()) {
            return Err(DriverError::Execution {
                version: migration.version(),
                message: "simulated failure".to_string(),
            });
        }
        self.migrated.push((migration.version(), direction));
        Ok(())
    }

    fn ext(&self) -> &str {
        ".sql"
    }

    fn begin(&mut self) -> DriverResult<()> {
        self.begins += 1;
        Ok(())
    }

    fn commit(&mut self) -> DriverResult<()> {
        self.commits += 1;
        Ok(())
    }

    fn rollback(&mut self) -> DriverResult<()> {
        self.rollbacks += 1;
        Ok(())
    }
}

/// Create empty migration files named `names` inside `dir`.
pub fn touch_migrations(dir: &Path, names: &[&str]) {
    std::fs::create_dir_all(dir).unwrap();
    for name in names {
        std::fs::write(dir.join(name), "").unwrap();
    }
}

/// Up/down pairs for sequential versions `1..=count`, e.g. `001_step1_up.sql`.
pub fn sequential_pairs(count: u64) -> Vec<String> {
    (1..=count)
        .flat_map(|v| {
            [
                format!("{v:03}_step{v}_up.sql"),
                format!("{v:03}_step{v}_down.sql"),
            ]
        })
        .collect()
}
