//! Migration entity and the ordered collection the service steps through.

use std::fmt;
use std::path::{Path, PathBuf};

/// One schema-change step: a version and the script resolved for the
/// direction of the scan that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Migration {
    version: u64,
    name: Option<PathBuf>,
}

impl Migration {
    /// Create a migration with no script attached.
    pub fn new(version: u64) -> Self {
        Self {
            version,
            name: None,
        }
    }

    /// Attach the script path.
    pub fn with_name(mut self, name: impl Into<PathBuf>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// Script path, or `None` when no file matched the scan direction.
    pub fn name(&self) -> Option<&Path> {
        self.name.as_deref()
    }

    pub(crate) fn set_name(&mut self, name: PathBuf) {
        self.name = Some(name);
    }
}

impl fmt::Display for Migration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(path) => write!(f, "{} ({})", self.version, path.display()),
            None => write!(f, "{} (no script)", self.version),
        }
    }
}

/// Migrations sorted strictly ascending by version.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Migrations(Vec<Migration>);

impl Migrations {
    /// Build from an unordered set. Versions are expected to be unique.
    pub fn from_unordered(mut migrations: Vec<Migration>) -> Self {
        migrations.sort_by_key(Migration::version);
        Self(migrations)
    }

    /// Position of the migration with exactly `version`.
    pub fn index(&self, version: u64) -> Option<usize> {
        self.0
            .binary_search_by_key(&version, Migration::version)
            .ok()
    }

    /// Lowest version
    pub fn first(&self) -> Option<&Migration> {
        self.0.first()
    }

    /// Highest version
    pub fn last(&self) -> Option<&Migration> {
        self.0.last()
    }

    pub fn get(&self, index: usize) -> Option<&Migration> {
        self.0.get(index)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Migration> {
        self.0.iter()
    }

    pub fn versions(&self) -> Vec<u64> {
        self.0.iter().map(Migration::version).collect()
    }
}

impl<'a> IntoIterator for &'a Migrations {
    type Item = &'a Migration;
    type IntoIter = std::slice::Iter<'a, Migration>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for Migrations {
    type Item = Migration;
    type IntoIter = std::vec::IntoIter<Migration>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

#[cfg(test)]
#[path = "migration_test.rs"]
mod tests;
