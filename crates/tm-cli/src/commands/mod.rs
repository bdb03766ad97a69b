//! CLI command implementations

pub(crate) mod common;
pub(crate) mod create;
pub(crate) mod migrate;
pub(crate) mod status;
pub(crate) mod version;

#[cfg(test)]
#[path = "commands_test.rs"]
mod tests;
