//! Configuration types and parsing for tidemark.yml

use crate::direction::Suffixes;
use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Environment variable consulted when no `--env` flag is given
pub const ENV_VAR: &str = "TIDEMARK_ENV";

/// Project configuration from tidemark.yml
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Directory holding migration scripts, relative to the config file
    #[serde(default = "default_directory")]
    pub directory: String,

    /// Registered driver name
    pub driver: String,

    /// Connection string handed to the driver
    #[serde(default)]
    pub dsn: String,

    /// Filename suffixes marking up/down scripts
    #[serde(default)]
    pub suffixes: Suffixes,

    /// Named overrides (e.g., development, production)
    #[serde(default)]
    pub environments: HashMap<String, EnvironmentConfig>,

    /// Directory the config was loaded from
    #[serde(skip, default = "default_root")]
    pub root: PathBuf,
}

/// Per-environment overrides of the top-level connection settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EnvironmentConfig {
    #[serde(default)]
    pub driver: Option<String>,

    #[serde(default)]
    pub dsn: Option<String>,

    #[serde(default)]
    pub directory: Option<String>,
}

fn default_directory() -> String {
    "migrations".to_string()
}

fn default_root() -> PathBuf {
    PathBuf::from(".")
}

impl Config {
    /// Load configuration from a file path
    pub fn load(path: &Path) -> CoreResult<Self> {
        if !path.exists() {
            return Err(CoreError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| CoreError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })?;
        let mut config: Config = serde_yaml::from_str(&content)?;
        config.root = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(default_root);
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a project directory
    /// Looks for tidemark.yml or tidemark.yaml
    pub fn load_from_dir(dir: &Path) -> CoreResult<Self> {
        let yml_path = dir.join("tidemark.yml");
        let yaml_path = dir.join("tidemark.yaml");

        if yml_path.exists() {
            Self::load(&yml_path)
        } else if yaml_path.exists() {
            Self::load(&yaml_path)
        } else {
            Err(CoreError::ConfigNotFound {
                path: yml_path.display().to_string(),
            })
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> CoreResult<()> {
        if self.driver.trim().is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "driver cannot be empty".to_string(),
            });
        }

        if self.directory.trim().is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "directory cannot be empty".to_string(),
            });
        }

        if self.suffixes.up.is_empty() || self.suffixes.down.is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "up and down suffixes cannot be empty".to_string(),
            });
        }

        if self.suffixes.up == self.suffixes.down {
            return Err(CoreError::ConfigInvalid {
                message: format!(
                    "up and down suffixes must differ (both are '{}')",
                    self.suffixes.up
                ),
            });
        }

        Ok(())
    }

    /// Absolute-or-root-relative path of the migrations directory
    pub fn migrations_dir(&self) -> PathBuf {
        self.root.join(&self.directory)
    }

    /// Names of the configured environments, sorted
    pub fn available_environments(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.environments.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Copy of this config with the named environment's overrides applied.
    ///
    /// `None` returns the base configuration unchanged.
    pub fn for_environment(&self, name: Option<&str>) -> CoreResult<Config> {
        let Some(name) = name else {
            return Ok(self.clone());
        };

        let env = self
            .environments
            .get(name)
            .ok_or_else(|| CoreError::ConfigInvalid {
                message: format!(
                    "environment '{}' not found. Available: [{}]",
                    name,
                    self.available_environments().join(", ")
                ),
            })?;

        let mut merged = self.clone();
        if let Some(driver) = &env.driver {
            merged.driver = driver.clone();
        }
        if let Some(dsn) = &env.dsn {
            merged.dsn = dsn.clone();
        }
        if let Some(directory) = &env.directory {
            merged.directory = directory.clone();
        }
        merged.validate()?;
        Ok(merged)
    }

    /// Resolve environment from CLI flag or TIDEMARK_ENV environment variable
    ///
    /// Priority: CLI flag > TIDEMARK_ENV env var > None
    pub fn resolve_environment(cli_env: Option<&str>) -> Option<String> {
        cli_env
            .map(String::from)
            .or_else(|| std::env::var(ENV_VAR).ok().filter(|v| !v.is_empty()))
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
