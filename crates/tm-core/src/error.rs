//! Error types for tm-core

use thiserror::Error;

/// Core error type for Tidemark
#[derive(Error, Debug)]
pub enum CoreError {
    /// T001: Stepped past either end of the discovered migrations
    #[error("[T001] Out of bounds migration: index {index} outside 0..{len}")]
    OutOfBounds { index: i64, len: usize },

    /// T002: Walking the migrations directory failed
    #[error("[T002] Failed to read migrations directory '{path}': {source}")]
    Filesystem {
        path: String,
        #[source]
        source: walkdir::Error,
    },

    /// T003: The driver reported a failure
    #[error("[T003] {0}")]
    Driver(#[from] DriverError),

    /// T004: A version that should exist in the migrations directory does not
    #[error("[T004] Migration version {version} not found in {directory}")]
    VersionNotFound { version: u64, directory: String },

    /// T005: Name given for a new migration is unusable
    #[error("[T005] Invalid migration name '{name}': {reason}")]
    InvalidMigrationName { name: String, reason: String },

    /// T006: No driver registered under the requested name
    #[error("[T006] Unknown driver '{name}' (available: {available})")]
    UnknownDriver { name: String, available: String },

    /// T007: Configuration file not found
    #[error("[T007] Config file not found: {path}")]
    ConfigNotFound { path: String },

    /// T008: Invalid configuration value
    #[error("[T008] Invalid config: {message}")]
    ConfigInvalid { message: String },

    /// T009: Config YAML parse error
    #[error("[T009] Failed to parse config: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    /// T010: IO error with file path context
    #[error("[T010] Failed to access '{path}': {source}")]
    IoWithPath {
        path: String,
        source: std::io::Error,
    },
}

impl CoreError {
    /// True for the recoverable "no further migration in this direction" condition.
    pub fn is_out_of_bounds(&self) -> bool {
        matches!(self, CoreError::OutOfBounds { .. })
    }
}

/// Result type alias for CoreError
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors reported by [`Driver`](crate::driver::Driver) implementations
#[derive(Error, Debug)]
pub enum DriverError {
    /// Connection error (D001)
    #[error("[D001] Driver connection failed: {0}")]
    Connection(String),

    /// Reading the persisted version failed (D002)
    #[error("[D002] Failed to read current version: {0}")]
    VersionRead(String),

    /// Executing a migration script failed (D003)
    #[error("[D003] Migration {version} failed: {message}")]
    Execution { version: u64, message: String },

    /// Transaction management error (D004)
    #[error("[D004] Transaction failed: {0}")]
    Transaction(String),
}

/// Result type alias for DriverError
pub type DriverResult<T> = Result<T, DriverError>;
