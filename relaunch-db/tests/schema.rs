use relaunch_db::schema::{create_database, create_galaxy_schema};
use relaunch_db::{REQUIRED_SCHEMA_OBJECTS, open_memory};

#[test]
fn fixture_contains_required_objects() {
    let conn = open_memory().unwrap();
    for name in REQUIRED_SCHEMA_OBJECTS {
        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE name = ?1",
                [name],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(count, 1, "missing {name}");
    }
}

#[test]
fn schema_is_idempotent() {
    let conn = open_memory().unwrap();
    // Creating again should not error or duplicate seed rows
    create_galaxy_schema(&conn).unwrap();
    let types: i64 = conn
        .query_row("SELECT COUNT(*) FROM PlayTaskTypes", [], |row| row.get(0))
        .unwrap();
    assert_eq!(types, 3);
}

#[test]
fn custom_task_type_is_seeded() {
    let conn = open_memory().unwrap();
    let id: i64 = conn
        .query_row(
            "SELECT id FROM PlayTaskTypes WHERE type = 'CustomTask'",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(id, 3);
}

#[test]
fn create_database_writes_a_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("galaxy-2.0.db");
    drop(create_database(&path).unwrap());
    assert!(path.exists());
}
