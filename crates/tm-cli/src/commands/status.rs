//! Status command implementation

use anyhow::{Context, Result};
use serde::Serialize;
use tm_core::{MigrationStatus, Service};

use crate::cli::{GlobalArgs, StatusArgs, StatusOutput};
use crate::commands::common::{load_config, open_driver};

/// Execute the status command
pub fn execute(args: &StatusArgs, global: &GlobalArgs) -> Result<()> {
    let config = load_config(global)?;
    let driver = open_driver(&config)?;
    let current = driver
        .current_version()
        .context("Failed to read current version")?;

    let status = Service::new(&config)
        .with_version(current)
        .status()
        .context("Failed to read migrations")?;
    let rows: Vec<StatusRow> = status.iter().map(StatusRow::from).collect();

    match args.output {
        StatusOutput::Table => print_table(current, &rows),
        StatusOutput::Json => print_json(&rows)?,
    }
    Ok(())
}

/// One line of the status report
#[derive(Debug, Serialize)]
struct StatusRow {
    version: u64,
    applied: bool,
    file: Option<String>,
}

impl From<&MigrationStatus> for StatusRow {
    fn from(status: &MigrationStatus) -> Self {
        Self {
            version: status.migration.version(),
            applied: status.applied,
            file: status
                .migration
                .name()
                .and_then(|p| p.file_name())
                .map(|f| f.to_string_lossy().into_owned()),
        }
    }
}

fn print_table(current: u64, rows: &[StatusRow]) {
    if rows.is_empty() {
        println!("No migrations found.");
        return;
    }

    let version_width = rows
        .iter()
        .map(|r| r.version.to_string().len())
        .max()
        .unwrap_or(7)
        .max("VERSION".len());

    println!("{:<version_width$}  {:<7}  FILE", "VERSION", "STATUS");
    for row in rows {
        let state = if row.applied { "applied" } else { "pending" };
        println!(
            "{:<version_width$}  {:<7}  {}",
            row.version,
            state,
            row.file.as_deref().unwrap_or("-")
        );
    }

    let pending = rows.iter().filter(|r| !r.applied).count();
    println!();
    println!("Current version: {current} ({pending} pending)");
}

fn print_json(rows: &[StatusRow]) -> Result<()> {
    let json = serde_json::to_string_pretty(rows).context("Failed to serialize to JSON")?;
    println!("{}", json);
    Ok(())
}
