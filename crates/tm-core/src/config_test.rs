use super::*;
use serial_test::serial;
use tempfile::tempdir;

#[test]
fn test_parse_minimal_config() {
    let config: Config = serde_yaml::from_str("driver: plan").unwrap();
    assert_eq!(config.driver, "plan");
    assert_eq!(config.directory, "migrations");
    assert_eq!(config.dsn, "");
    assert_eq!(config.suffixes, Suffixes::default());
    assert!(config.environments.is_empty());
    assert_eq!(config.migrations_dir(), PathBuf::from("./migrations"));
}

#[test]
fn test_parse_full_config() {
    let yaml = r#"
directory: db/migrations
driver: postgres
dsn: "postgres://localhost/app"
suffixes:
  up: apply
  down: revert
environments:
  production:
    dsn: "postgres://prod/app"
"#;
    let config: Config = serde_yaml::from_str(yaml).unwrap();
    assert_eq!(config.directory, "db/migrations");
    assert_eq!(config.suffixes.up, "apply");
    assert_eq!(config.suffixes.down, "revert");
    assert_eq!(config.available_environments(), vec!["production"]);
    config.validate().unwrap();
}

#[test]
fn test_unknown_field_rejected() {
    let result: Result<Config, _> = serde_yaml::from_str("driver: plan\nmigrations: x");
    assert!(result.is_err());
}

#[test]
fn test_missing_driver_rejected() {
    let result: Result<Config, _> = serde_yaml::from_str("directory: migrations");
    assert!(result.is_err());
}

#[test]
fn test_validate_empty_driver() {
    let config: Config = serde_yaml::from_str("driver: ''").unwrap();
    assert!(matches!(
        config.validate(),
        Err(CoreError::ConfigInvalid { .. })
    ));
}

#[test]
fn test_validate_identical_suffixes() {
    let config: Config =
        serde_yaml::from_str("driver: plan\nsuffixes:\n  up: x\n  down: x").unwrap();
    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("must differ"));
}

#[test]
fn test_load_sets_root() {
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join("tidemark.yml"), "driver: plan\ndirectory: db").unwrap();

    let config = Config::load_from_dir(dir.path()).unwrap();
    assert_eq!(config.root, dir.path());
    assert_eq!(config.migrations_dir(), dir.path().join("db"));
}

#[test]
fn test_load_yaml_extension() {
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join("tidemark.yaml"), "driver: plan").unwrap();
    assert_eq!(Config::load_from_dir(dir.path()).unwrap().driver, "plan");
}

#[test]
fn test_load_missing_config() {
    let dir = tempdir().unwrap();
    let err = Config::load_from_dir(dir.path()).unwrap_err();
    assert!(matches!(err, CoreError::ConfigNotFound { .. }));
}

#[test]
fn test_load_invalid_yaml() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("tidemark.yml");
    std::fs::write(&path, "driver: [unclosed").unwrap();
    assert!(matches!(
        Config::load(&path),
        Err(CoreError::YamlParse(_))
    ));
}

#[test]
fn test_for_environment_merges_overrides() {
    let yaml = r#"
driver: plan
dsn: "plan://0"
environments:
  staging:
    dsn: "plan://4"
    directory: staging_migrations
"#;
    let config: Config = serde_yaml::from_str(yaml).unwrap();

    let base = config.for_environment(None).unwrap();
    assert_eq!(base.dsn, "plan://0");

    let staging = config.for_environment(Some("staging")).unwrap();
    assert_eq!(staging.driver, "plan");
    assert_eq!(staging.dsn, "plan://4");
    assert_eq!(staging.directory, "staging_migrations");
}

#[test]
fn test_for_environment_unknown() {
    let config: Config = serde_yaml::from_str("driver: plan").unwrap();
    let err = config.for_environment(Some("prod")).unwrap_err();
    assert!(err.to_string().contains("environment 'prod' not found"));
}

#[test]
#[serial]
fn test_resolve_environment_priority() {
    std::env::set_var(ENV_VAR, "staging");
    assert_eq!(
        Config::resolve_environment(Some("production")),
        Some("production".to_string())
    );
    assert_eq!(
        Config::resolve_environment(None),
        Some("staging".to_string())
    );

    std::env::remove_var(ENV_VAR);
    assert_eq!(Config::resolve_environment(None), None);
}
