use super::*;

fn unordered(versions: &[u64]) -> Migrations {
    Migrations::from_unordered(versions.iter().map(|v| Migration::new(*v)).collect())
}

#[test]
fn test_sorted_ascending() {
    let migrations = unordered(&[3, 1, 20240101120000, 2]);
    assert_eq!(migrations.versions(), vec![1, 2, 3, 20240101120000]);
    assert!(migrations
        .versions()
        .windows(2)
        .all(|pair| pair[0] < pair[1]));
}

#[test]
fn test_index_matches_version() {
    let migrations = unordered(&[30, 10, 20]);
    for version in [10, 20, 30] {
        let pos = migrations.index(version).unwrap();
        assert_eq!(migrations.get(pos).unwrap().version(), version);
    }
}

#[test]
fn test_index_not_found() {
    let migrations = unordered(&[1, 2, 3]);
    assert_eq!(migrations.index(4), None);
    assert_eq!(migrations.index(0), None);
    assert_eq!(Migrations::default().index(1), None);
}

#[test]
fn test_first_and_last() {
    let migrations = unordered(&[5, 2, 9]);
    assert_eq!(migrations.first().unwrap().version(), 2);
    assert_eq!(migrations.last().unwrap().version(), 9);

    let empty = Migrations::default();
    assert!(empty.first().is_none());
    assert!(empty.last().is_none());
    assert!(empty.is_empty());
}

#[test]
fn test_name_attached() {
    let migration = Migration::new(1).with_name("/tmp/001_init_up.sql");
    assert_eq!(
        migration.name(),
        Some(Path::new("/tmp/001_init_up.sql"))
    );
    assert_eq!(migration.to_string(), "1 (/tmp/001_init_up.sql)");
    assert_eq!(Migration::new(2).to_string(), "2 (no script)");
}
