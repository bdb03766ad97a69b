//! Version tokens embedded at the front of migration file names.
//!
//! A version is either a zero-padded sequential integer (`001_init_up.sql`)
//! or a 14-digit wall-clock timestamp (`20240101120000_init_up.sql`).

use chrono::NaiveDateTime;
use std::fmt;
use std::path::Path;

/// `chrono` format of timestamp versions (`yyyyMMddHHmmss`)
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S";

const TIMESTAMP_WIDTH: usize = 14;
const DEFAULT_WIDTH: usize = 3;

/// Leading version token of a file name: everything before the first `_`,
/// or before the first `.` when there is no `_`.
pub fn token(file_name: &str) -> &str {
    let base = Path::new(file_name)
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or(file_name);
    let end = base
        .find('_')
        .or_else(|| base.find('.'))
        .unwrap_or(base.len());
    &base[..end]
}

/// Parse the version of a file name, defaulting to 0 when the token is not
/// an unsigned integer.
pub fn parse(file_name: &str) -> u64 {
    let tok = token(file_name);
    match tok.parse::<u64>() {
        Ok(v) => v,
        Err(_) => {
            log::warn!("Migration file '{file_name}' has no numeric version prefix; treating it as version 0");
            0
        }
    }
}

/// Render `now` as a timestamp version, or `None` when its year does not
/// fit in four digits.
pub fn timestamp(now: NaiveDateTime) -> Option<u64> {
    let tok = now.format(TIMESTAMP_FORMAT).to_string();
    if tok.len() != TIMESTAMP_WIDTH {
        return None;
    }
    tok.parse().ok()
}

fn is_timestamp(tok: &str) -> bool {
    tok.len() == TIMESTAMP_WIDTH
        && tok.bytes().all(|b| b.is_ascii_digit())
        && NaiveDateTime::parse_from_str(tok, TIMESTAMP_FORMAT).is_ok()
}

/// Naming convention of version tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionFormat {
    /// Zero-padded integer of the given width
    Sequential { width: usize },
    /// 14-digit wall-clock timestamp
    Timestamp,
}

impl Default for VersionFormat {
    fn default() -> Self {
        VersionFormat::Sequential {
            width: DEFAULT_WIDTH,
        }
    }
}

impl VersionFormat {
    /// Infer the convention from an existing file name.
    pub fn infer(file_name: &str) -> Self {
        let tok = token(file_name);
        if is_timestamp(tok) {
            VersionFormat::Timestamp
        } else if !tok.is_empty() && tok.bytes().all(|b| b.is_ascii_digit()) {
            VersionFormat::Sequential { width: tok.len() }
        } else {
            VersionFormat::default()
        }
    }

    /// Format `version` as a file name token.
    pub fn render(&self, version: u64) -> String {
        match self {
            VersionFormat::Sequential { width } => format!("{version:0width$}"),
            VersionFormat::Timestamp => version.to_string(),
        }
    }

    pub fn is_timestamp(&self) -> bool {
        matches!(self, VersionFormat::Timestamp)
    }
}

impl fmt::Display for VersionFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionFormat::Sequential { width } => write!(f, "sequential({width})"),
            VersionFormat::Timestamp => write!(f, "timestamp"),
        }
    }
}

#[cfg(test)]
#[path = "version_test.rs"]
mod tests;
