//! Migration orchestrator.
//!
//! [`Service`] is immutable: it holds the configuration and the current
//! version read from the driver. Every operation rescans the migrations
//! directory and steps through the result inside a short-lived [`Run`],
//! so no direction or cached set survives between calls.
//!
//! Callers wrap each top-level operation in one
//! [`transaction`](crate::driver::transaction), so a failure part-way
//! through a batch rolls back every step of that call.

use crate::config::Config;
use crate::direction::{Direction, Suffixes};
use crate::driver::Driver;
use crate::error::{CoreError, CoreResult};
use crate::migration::{Migration, Migrations};
use crate::version::{self, VersionFormat};
use chrono::{Local, NaiveDateTime};
use std::collections::HashMap;
use std::path::PathBuf;
use walkdir::WalkDir;

/// Step count large enough to walk past either end of any migration set
const WALK_TO_END: i64 = i64::MAX;

/// Sequences migrations found in the configured directory.
#[derive(Debug, Clone)]
pub struct Service<'a> {
    config: &'a Config,
    version: u64,
}

/// A discovered migration and whether the current version includes it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationStatus {
    pub migration: Migration,
    pub applied: bool,
}

impl<'a> Service<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config, version: 0 }
    }

    /// Set the current version (0 means nothing applied yet).
    pub fn with_version(mut self, version: u64) -> Self {
        self.version = version;
        self
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn migrations_dir(&self) -> PathBuf {
        self.config.migrations_dir()
    }

    fn suffixes(&self) -> &Suffixes {
        &self.config.suffixes
    }

    /// Create the migrations directory and any missing parents.
    pub fn make_migrations_dir(&self) -> CoreResult<()> {
        let dir = self.migrations_dir();
        std::fs::create_dir_all(&dir).map_err(|e| CoreError::IoWithPath {
            path: dir.display().to_string(),
            source: e,
        })
    }

    /// Walk the migrations directory and build the ordered set as seen
    /// from `direction`.
    ///
    /// Each version gets one record. A file's path is kept when its suffix
    /// matches `direction`, when it has no recognised suffix, or when the
    /// scan itself is `Unknown`.
    pub fn apply(&self, direction: Direction) -> CoreResult<Migrations> {
        let dir = self.migrations_dir();
        let mut by_version: HashMap<u64, Migration> = HashMap::new();

        let walker = WalkDir::new(&dir)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !is_hidden(e.file_name()));

        for entry in walker {
            let entry = entry.map_err(|e| CoreError::Filesystem {
                path: dir.display().to_string(),
                source: e,
            })?;
            if entry.file_type().is_dir() {
                continue;
            }

            let Some(file_name) = entry.file_name().to_str() else {
                log::warn!("Skipping non UTF-8 file name: {}", entry.path().display());
                continue;
            };

            let version = version::parse(file_name);
            let file_direction = self.suffixes().classify(file_name);
            let migration = by_version
                .entry(version)
                .or_insert_with(|| Migration::new(version));

            if direction == Direction::Unknown
                || file_direction == Direction::Unknown
                || file_direction == direction
            {
                log::debug!("Found {direction} migration {version}: {file_name}");
                migration.set_name(entry.into_path());
            }
        }

        Ok(Migrations::from_unordered(by_version.into_values().collect()))
    }

    /// Bring the schema to the newest version.
    ///
    /// Reaching the end of the migrations is the expected outcome and is
    /// not reported as an error.
    pub fn up(&self, driver: &mut dyn Driver) -> CoreResult<()> {
        swallow_out_of_bounds(self.step(driver, Direction::Up, WALK_TO_END))
    }

    /// Revert all the way down. Reaching the start is not an error.
    pub fn down(&self, driver: &mut dyn Driver) -> CoreResult<()> {
        swallow_out_of_bounds(self.step(driver, Direction::Down, -WALK_TO_END))
    }

    /// Apply exactly one migration; fails with `OutOfBounds` when already
    /// at the newest version.
    pub fn next(&self, driver: &mut dyn Driver) -> CoreResult<()> {
        self.next_by(driver, 1)
    }

    /// Revert exactly one migration; fails with `OutOfBounds` when nothing
    /// is left to revert.
    pub fn prev(&self, driver: &mut dyn Driver) -> CoreResult<()> {
        self.prev_by(driver, 1)
    }

    /// Apply `count` migrations, surfacing `OutOfBounds` if fewer exist.
    pub fn next_by(&self, driver: &mut dyn Driver, count: u32) -> CoreResult<()> {
        self.step(driver, Direction::Up, i64::from(count))
    }

    /// Revert `count` migrations, surfacing `OutOfBounds` if fewer exist.
    pub fn prev_by(&self, driver: &mut dyn Driver, count: u32) -> CoreResult<()> {
        self.step(driver, Direction::Down, -i64::from(count))
    }

    /// Run the single migration with `version` in `direction`.
    pub fn apply_version(
        &self,
        driver: &mut dyn Driver,
        direction: Direction,
        version: u64,
    ) -> CoreResult<()> {
        let mut run = self.run(driver, direction)?;
        let index = run
            .migrations
            .index(version)
            .ok_or_else(|| self.not_found(version))?;
        run.execute_at(index as i64)
    }

    /// Every discovered migration flagged applied or pending.
    pub fn status(&self) -> CoreResult<Vec<MigrationStatus>> {
        let migrations = self.apply(Direction::Up)?;
        Ok(migrations
            .into_iter()
            .map(|migration| {
                let applied = self.version != 0 && migration.version() <= self.version;
                MigrationStatus { migration, applied }
            })
            .collect())
    }

    /// Up/down placeholders for the next migration called `name`.
    ///
    /// Nothing is written; the returned paths follow
    /// `{version}_{name}_{suffix}{ext}` inside the migrations directory.
    pub fn next_migration(
        &self,
        name: &str,
        driver: &dyn Driver,
    ) -> CoreResult<(Migration, Migration)> {
        self.next_migration_at(name, driver, Local::now().naive_local())
    }

    /// [`next_migration`](Self::next_migration) with an explicit clock for
    /// timestamp-versioned projects.
    pub fn next_migration_at(
        &self,
        name: &str,
        driver: &dyn Driver,
        now: NaiveDateTime,
    ) -> CoreResult<(Migration, Migration)> {
        let name = sanitize_name(name)?;
        let migrations = self.apply(Direction::Unknown)?;

        // Files without a numeric version land at 0 and say nothing about
        // the naming convention.
        let format = migrations
            .iter()
            .filter(|m| m.version() != 0)
            .find_map(|m| m.name().and_then(|p| p.file_name()).and_then(|f| f.to_str()))
            .map(VersionFormat::infer)
            .unwrap_or_default();

        let following = migrations.last().map_or(1, |m| m.version() + 1);
        let next = if format.is_timestamp() {
            // A lagging clock must not reuse or undercut an existing version.
            version::timestamp(now).map_or(following, |ts| ts.max(following))
        } else {
            following
        };
        log::debug!("Next migration version {next} ({format})");

        let token = format.render(next);
        let dir = self.migrations_dir();
        let file = |direction: Direction| {
            dir.join(format!(
                "{token}_{name}_{}{}",
                self.suffixes().suffix(direction),
                driver.ext()
            ))
        };

        Ok((
            Migration::new(next).with_name(file(Direction::Up)),
            Migration::new(next).with_name(file(Direction::Down)),
        ))
    }

    fn run<'d>(&self, driver: &'d mut dyn Driver, direction: Direction) -> CoreResult<Run<'d>> {
        let migrations = self.apply(direction)?;
        Ok(Run {
            driver,
            direction,
            migrations,
        })
    }

    /// Rescan, then execute `|n|` migrations starting next to the current
    /// version.
    fn step(&self, driver: &mut dyn Driver, direction: Direction, n: i64) -> CoreResult<()> {
        let mut run = self.run(driver, direction)?;
        let start = self.start_index(&run.migrations, direction)?;
        run.step(start, n)
    }

    /// Position of the first migration to execute in `direction`.
    ///
    /// With no version set, Up starts at the first migration and Down has
    /// nothing before it. Otherwise the step starts next to the current
    /// version.
    fn start_index(&self, migrations: &Migrations, direction: Direction) -> CoreResult<i64> {
        if self.version == 0 {
            return Ok(match direction {
                Direction::Down => -1,
                _ => 0,
            });
        }
        let current = migrations
            .index(self.version)
            .ok_or_else(|| self.not_found(self.version))?;
        Ok(current as i64 + direction.sign())
    }

    fn not_found(&self, version: u64) -> CoreError {
        CoreError::VersionNotFound {
            version,
            directory: self.migrations_dir().display().to_string(),
        }
    }
}

/// Execution context of one top-level call
struct Run<'d> {
    driver: &'d mut dyn Driver,
    direction: Direction,
    migrations: Migrations,
}

impl Run<'_> {
    /// Execute the migration at `index`, or fail with `OutOfBounds`.
    fn execute_at(&mut self, index: i64) -> CoreResult<()> {
        let len = self.migrations.len();
        let migration = usize::try_from(index)
            .ok()
            .and_then(|i| self.migrations.get(i))
            .ok_or(CoreError::OutOfBounds { index, len })?;

        log::info!(
            "Migrating {} {} via {}",
            self.direction,
            migration,
            self.driver.name()
        );
        self.driver.migrate(migration, self.direction)?;
        Ok(())
    }

    /// Execute `|n|` consecutive migrations from `start`, moving up for
    /// positive `n` and down otherwise. Stops at the first failure.
    fn step(&mut self, start: i64, n: i64) -> CoreResult<()> {
        let sign = if n > 0 { 1 } else { -1 };
        for i in 0..n.unsigned_abs() {
            // execute_at fails on the first index outside 0..len
            self.execute_at(start + sign * i as i64)?;
        }
        Ok(())
    }
}

fn swallow_out_of_bounds(result: CoreResult<()>) -> CoreResult<()> {
    match result {
        Err(e) if e.is_out_of_bounds() => {
            log::debug!("{e}");
            Ok(())
        }
        other => other,
    }
}

fn is_hidden(name: &std::ffi::OsStr) -> bool {
    name.to_str().is_some_and(|s| s.starts_with('.'))
}

fn sanitize_name(name: &str) -> CoreResult<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(CoreError::InvalidMigrationName {
            name: name.to_string(),
            reason: "name cannot be empty".to_string(),
        });
    }
    if trimmed.contains(['/', '\\']) {
        return Err(CoreError::InvalidMigrationName {
            name: name.to_string(),
            reason: "name cannot contain path separators".to_string(),
        });
    }
    Ok(trimmed.split_whitespace().collect::<Vec<_>>().join("_"))
}

#[cfg(test)]
#[path = "service_test.rs"]
mod tests;
