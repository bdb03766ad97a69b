use super::*;
use crate::error::DriverError;
use crate::test_utils::RecordingDriver;

#[test]
fn test_transaction_commits_on_success() {
    let mut driver = RecordingDriver::default();
    let value = transaction(&mut driver, |d| {
        d.migrate(&Migration::new(1), Direction::Up)?;
        Ok(42)
    })
    .unwrap();

    assert_eq!(value, 42);
    assert_eq!(driver.begins, 1);
    assert_eq!(driver.commits, 1);
    assert_eq!(driver.rollbacks, 0);
}

#[test]
fn test_transaction_rolls_back_on_failure() {
    let mut driver = RecordingDriver::default().failing_on(2);
    let err = transaction(&mut driver, |d| {
        d.migrate(&Migration::new(1), Direction::Up)?;
        d.migrate(&Migration::new(2), Direction::Up)?;
        Ok(())
    })
    .unwrap_err();

    assert!(matches!(
        err,
        CoreError::Driver(DriverError::Execution { version: 2, .. })
    ));
    assert_eq!(driver.commits, 0);
    assert_eq!(driver.rollbacks, 1);
}

#[test]
fn test_transaction_passes_body_error_through() {
    let mut driver = RecordingDriver::default();
    let err = transaction(&mut driver, |_| -> CoreResult<()> {
        Err(CoreError::OutOfBounds { index: 3, len: 3 })
    })
    .unwrap_err();

    assert!(err.is_out_of_bounds());
    assert_eq!(driver.rollbacks, 1);
}

#[test]
fn test_transaction_through_trait_object() {
    let mut boxed: Box<dyn Driver> = Box::new(RecordingDriver::default());
    transaction(boxed.as_mut(), |d| {
        d.migrate(&Migration::new(1), Direction::Up)?;
        Ok(())
    })
    .unwrap();
}

fn recording() -> Box<dyn Driver> {
    Box::new(RecordingDriver::at_version(7))
}

#[test]
fn test_registry_lookup() {
    let mut registry = DriverRegistry::new();
    registry.register("recording", recording);

    let driver = registry.get("recording").unwrap();
    assert_eq!(driver.name(), "recording");
    assert_eq!(driver.current_version().unwrap(), 7);
    assert_eq!(registry.names(), vec!["recording"]);
}

#[test]
fn test_registry_unknown_driver() {
    let mut registry = DriverRegistry::new();
    registry.register("recording", recording);

    let err = registry.get("postgres").err().unwrap();
    match err {
        CoreError::UnknownDriver { name, available } => {
            assert_eq!(name, "postgres");
            assert_eq!(available, "recording");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_open_reports_connection_error() {
    let mut driver = RecordingDriver::default();
    assert!(matches!(driver.open(""), Err(DriverError::Connection(_))));
    driver.open("mem://").unwrap();
    assert_eq!(driver.dsn.as_deref(), Some("mem://"));
}
