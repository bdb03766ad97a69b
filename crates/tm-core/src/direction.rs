//! Migration direction and the filename suffixes that encode it.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Which way a migration moves the schema version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// No suffix recognised; the file is usable from either direction
    #[default]
    Unknown,
    /// Apply forward
    Up,
    /// Revert
    Down,
}

impl Direction {
    /// +1 for Up, -1 for Down, 0 for Unknown
    pub fn sign(self) -> i64 {
        match self {
            Direction::Up => 1,
            Direction::Down => -1,
            Direction::Unknown => 0,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Unknown => write!(f, "unknown"),
            Direction::Up => write!(f, "up"),
            Direction::Down => write!(f, "down"),
        }
    }
}

/// Suffix tokens marking up and down scripts, e.g. `001_init_up.sql`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Suffixes {
    #[serde(default = "default_up")]
    pub up: String,

    #[serde(default = "default_down")]
    pub down: String,
}

fn default_up() -> String {
    "up".to_string()
}

fn default_down() -> String {
    "down".to_string()
}

impl Default for Suffixes {
    fn default() -> Self {
        Self {
            up: default_up(),
            down: default_down(),
        }
    }
}

impl Suffixes {
    /// Classify a file name by the last `_`-separated segment of its stem.
    ///
    /// Anything that does not match either configured suffix is `Unknown`.
    pub fn classify(&self, file_name: &str) -> Direction {
        let stem = Path::new(file_name)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(file_name);

        let Some((_, last)) = stem.rsplit_once('_') else {
            return Direction::Unknown;
        };

        if last == self.up {
            Direction::Up
        } else if last == self.down {
            Direction::Down
        } else {
            Direction::Unknown
        }
    }

    /// Suffix token for `direction`; empty for `Unknown`.
    pub fn suffix(&self, direction: Direction) -> &str {
        match direction {
            Direction::Up => &self.up,
            Direction::Down => &self.down,
            Direction::Unknown => "",
        }
    }
}

#[cfg(test)]
#[path = "direction_test.rs"]
mod tests;
