//! Built-in `plan` driver: reports the steps a run would take without
//! executing any script.
//!
//! The DSN carries the version to plan from, e.g. `plan://3`; an empty DSN
//! or `plan://` means nothing has been applied.

use tm_core::{Direction, Driver, DriverError, DriverResult, Migration};

/// Name under which the driver is registered
pub(crate) const NAME: &str = "plan";

const SCHEME: &str = "plan://";

#[derive(Debug, Default)]
pub(crate) struct PlanDriver {
    version: u64,
    planned: Vec<(u64, Direction)>,
}

impl PlanDriver {
    pub(crate) fn boxed() -> Box<dyn Driver> {
        Box::new(Self::default())
    }

    /// Steps reported so far, in order
    #[cfg(test)]
    pub(crate) fn planned(&self) -> &[(u64, Direction)] {
        &self.planned
    }
}

/// Version encoded in a `plan://<version>` DSN.
pub(crate) fn parse_dsn(dsn: &str) -> DriverResult<u64> {
    let dsn = dsn.trim();
    if dsn.is_empty() {
        return Ok(0);
    }

    let rest = dsn.strip_prefix(SCHEME).ok_or_else(|| {
        DriverError::Connection(format!("expected '{SCHEME}<version>', got '{dsn}'"))
    })?;
    if rest.is_empty() {
        return Ok(0);
    }
    rest.parse::<u64>()
        .map_err(|e| DriverError::Connection(format!("invalid version in '{dsn}': {e}")))
}

impl Driver for PlanDriver {
    fn name(&self) -> &str {
        NAME
    }

    fn open(&mut self, dsn: &str) -> DriverResult<()> {
        self.version = parse_dsn(dsn)?;
        log::debug!("Planning from version {}", self.version);
        Ok(())
    }

    fn current_version(&self) -> DriverResult<u64> {
        Ok(self.version)
    }

    fn migrate(&mut self, migration: &Migration, direction: Direction) -> DriverResult<()> {
        let script = migration
            .name()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "<no script>".to_string());
        println!(
            "  would run {:<4} {:>14}  {script}",
            direction.to_string(),
            migration.version()
        );
        self.planned.push((migration.version(), direction));
        Ok(())
    }

    fn ext(&self) -> &str {
        ".sql"
    }

    fn begin(&mut self) -> DriverResult<()> {
        log::debug!("plan: BEGIN (no-op)");
        Ok(())
    }

    fn commit(&mut self) -> DriverResult<()> {
        log::debug!("plan: COMMIT (no-op)");
        Ok(())
    }

    fn rollback(&mut self) -> DriverResult<()> {
        log::debug!("plan: ROLLBACK (no-op)");
        Ok(())
    }
}

#[cfg(test)]
#[path = "plan_test.rs"]
mod tests;
