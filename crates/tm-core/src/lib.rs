//! tm-core - Core library for Tidemark
//!
//! This crate discovers versioned migration scripts on disk, orders them,
//! and steps a [`Driver`] through them up or down. It also generates the
//! file names of the next migration pair. Executing scripts and persisting
//! the version marker are left to driver implementations.

pub mod config;
pub mod direction;
pub mod driver;
pub mod error;
pub mod migration;
pub mod service;
pub mod test_utils;
pub mod version;

pub use config::{Config, EnvironmentConfig};
pub use direction::{Direction, Suffixes};
pub use driver::{transaction, Driver, DriverFactory, DriverRegistry};
pub use error::{CoreError, CoreResult, DriverError, DriverResult};
pub use migration::{Migration, Migrations};
pub use service::{MigrationStatus, Service};
pub use version::VersionFormat;
