use super::*;
use tm_core::{transaction, Config, Service};

#[test]
fn test_parse_dsn() {
    assert_eq!(parse_dsn("").unwrap(), 0);
    assert_eq!(parse_dsn("plan://").unwrap(), 0);
    assert_eq!(parse_dsn("plan://3").unwrap(), 3);
    assert_eq!(parse_dsn(" plan://20240101120000 ").unwrap(), 20240101120000);
}

#[test]
fn test_parse_dsn_rejects_other_schemes() {
    assert!(matches!(
        parse_dsn("postgres://localhost"),
        Err(DriverError::Connection(_))
    ));
    assert!(matches!(
        parse_dsn("plan://three"),
        Err(DriverError::Connection(_))
    ));
}

#[test]
fn test_open_sets_current_version() {
    let mut driver = PlanDriver::default();
    driver.open("plan://2").unwrap();
    assert_eq!(driver.current_version().unwrap(), 2);
    assert_eq!(driver.ext(), ".sql");
}

#[test]
fn test_plans_remaining_steps() {
    let dir = tempfile::tempdir().unwrap();
    let migrations = dir.path().join("migrations");
    std::fs::create_dir_all(&migrations).unwrap();
    for name in ["001_a_up.sql", "002_b_up.sql", "003_c_up.sql"] {
        std::fs::write(migrations.join(name), "").unwrap();
    }
    std::fs::write(dir.path().join("tidemark.yml"), "driver: plan\ndsn: plan://1").unwrap();
    let config = Config::load_from_dir(dir.path()).unwrap();

    let mut driver = PlanDriver::default();
    driver.open(&config.dsn).unwrap();
    let service = Service::new(&config).with_version(driver.current_version().unwrap());
    transaction(&mut driver, |d| service.up(d)).unwrap();

    assert_eq!(
        driver.planned(),
        &[(2, Direction::Up), (3, Direction::Up)]
    );
}
