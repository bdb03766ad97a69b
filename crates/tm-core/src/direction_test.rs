use super::*;

#[test]
fn test_classify_up_and_down() {
    let suffixes = Suffixes::default();
    assert_eq!(suffixes.classify("001_init_up.sql"), Direction::Up);
    assert_eq!(suffixes.classify("001_init_down.sql"), Direction::Down);
}

#[test]
fn test_classify_unknown() {
    let suffixes = Suffixes::default();
    assert_eq!(suffixes.classify("001_init.sql"), Direction::Unknown);
    assert_eq!(suffixes.classify("001.sql"), Direction::Unknown);
    assert_eq!(suffixes.classify("README"), Direction::Unknown);
    assert_eq!(suffixes.classify("001_setup_upgrade.sql"), Direction::Unknown);
}

#[test]
fn test_suffix_round_trips_through_classify() {
    let suffixes = Suffixes::default();
    for direction in [Direction::Up, Direction::Down] {
        let name = format!("002_add_users_{}.sql", suffixes.suffix(direction));
        assert_eq!(suffixes.classify(&name), direction);
    }
}

#[test]
fn test_custom_suffixes() {
    let suffixes = Suffixes {
        up: "apply".to_string(),
        down: "revert".to_string(),
    };
    assert_eq!(suffixes.classify("20240101120000_x_apply.sql"), Direction::Up);
    assert_eq!(suffixes.classify("20240101120000_x_revert.sql"), Direction::Down);
    assert_eq!(suffixes.classify("20240101120000_x_up.sql"), Direction::Unknown);
}

#[test]
fn test_unknown_suffix_is_empty() {
    assert_eq!(Suffixes::default().suffix(Direction::Unknown), "");
}

#[test]
fn test_sign() {
    assert_eq!(Direction::Up.sign(), 1);
    assert_eq!(Direction::Down.sign(), -1);
    assert_eq!(Direction::Unknown.sign(), 0);
}

#[test]
fn test_suffixes_yaml_defaults() {
    let suffixes: Suffixes = serde_yaml::from_str("up: forward").unwrap();
    assert_eq!(suffixes.up, "forward");
    assert_eq!(suffixes.down, "down");
}
