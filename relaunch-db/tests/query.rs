use std::path::PathBuf;

use relaunch_core::{LaunchTaskRecord, TaskTypeRecord, UserRecord};
use relaunch_db::schema::create_database;
use relaunch_db::{DbError, MissingPolicy, Params, QueryEngine, QueryOptions};
use tempfile::TempDir;

fn fixture() -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("galaxy-2.0.db");
    let conn = create_database(&path).unwrap();
    conn.execute_batch(
        r#"
        INSERT INTO Users (id) VALUES (46988221349126400);
        INSERT INTO PlayTasks (gameReleaseKey, userId, "order", typeId, isPrimary)
            VALUES ('gog_1', 46988221349126400, 1, 1, 1);
        "#,
    )
    .unwrap();
    (dir, path)
}

#[test]
fn open_requires_an_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    let mut engine = QueryEngine::default();
    let err = engine.open(&dir.path().join("absent.db")).unwrap_err();
    assert!(matches!(err, DbError::Open { .. }));
    assert!(!engine.is_open());
    assert!(engine.path().is_none());
}

#[test]
fn query_materializes_typed_records() {
    let (_dir, path) = fixture();
    let mut engine = QueryEngine::default();
    engine.open(&path).unwrap();

    let users: Vec<UserRecord> = engine.query("SELECT id FROM Users", &Params::new()).unwrap();
    assert_eq!(users, vec![UserRecord { id: 46_988_221_349_126_400 }]);

    let types: Vec<TaskTypeRecord> = engine
        .query(
            "SELECT id, type FROM PlayTaskTypes WHERE type = :type",
            &Params::new().with("type", "URLTask"),
        )
        .unwrap();
    assert_eq!(types.len(), 1);
    assert_eq!(types[0].id, 2);
}

#[test]
fn empty_result_is_an_empty_vec() {
    let (_dir, path) = fixture();
    let mut engine = QueryEngine::default();
    engine.open(&path).unwrap();
    let users: Vec<UserRecord> = engine
        .query("SELECT id FROM Users WHERE id = :id", &Params::new().with("id", 1_i64))
        .unwrap();
    assert!(users.is_empty());
}

#[test]
fn prefixed_placeholders_bind_by_bare_name() {
    let (_dir, path) = fixture();
    let mut engine = QueryEngine::default();
    engine.open(&path).unwrap();
    let types: Vec<TaskTypeRecord> = engine
        .query(
            "SELECT id, type FROM PlayTaskTypes WHERE id = @first OR id = $second",
            &Params::new().with("first", 1_i64).with("second", 3_i64),
        )
        .unwrap();
    assert_eq!(types.len(), 2);
}

#[test]
fn missing_parameter_is_lenient_by_default() {
    let (_dir, path) = fixture();
    let mut engine = QueryEngine::default();
    engine.open(&path).unwrap();
    // Unbound placeholders are NULL, which matches nothing.
    let users: Vec<UserRecord> = engine
        .query("SELECT id FROM Users WHERE id = :id", &Params::new())
        .unwrap();
    assert!(users.is_empty());
}

#[test]
fn missing_parameter_fails_when_strict() {
    let (_dir, path) = fixture();
    let mut engine = QueryEngine::new(QueryOptions {
        missing_parameter: MissingPolicy::Error,
        ..QueryOptions::default()
    });
    engine.open(&path).unwrap();
    let err = engine
        .query::<UserRecord>("SELECT id FROM Users WHERE id = :id", &Params::new())
        .unwrap_err();
    assert!(matches!(err, DbError::MissingParameter(ref name) if name == "id"));
}

#[test]
fn execute_reports_changed_rows() {
    let (_dir, path) = fixture();
    let mut engine = QueryEngine::default();
    engine.open(&path).unwrap();
    let changed = engine
        .execute(
            "UPDATE PlayTasks SET isPrimary = :isPrimary WHERE gameReleaseKey = :key",
            &Params::new().with("isPrimary", false).with("key", "gog_1"),
        )
        .unwrap();
    assert_eq!(changed, 1);

    let tasks: Vec<LaunchTaskRecord> = engine
        .query(r#"SELECT id, isPrimary FROM PlayTasks"#, &Params::new())
        .unwrap();
    assert!(!tasks[0].is_primary);
}

#[test]
fn syntax_errors_surface_as_sqlite_errors() {
    let (_dir, path) = fixture();
    let mut engine = QueryEngine::default();
    engine.open(&path).unwrap();
    let err = engine.execute("UPDATE Nowhere SET", &Params::new()).unwrap_err();
    assert!(matches!(err, DbError::Sqlite(_)));
}

#[test]
fn closed_engine_reports_not_open() {
    let (_dir, path) = fixture();
    let mut engine = QueryEngine::default();
    engine.open(&path).unwrap();
    engine.close();
    assert!(!engine.is_open());
    let err = engine.query::<UserRecord>("SELECT id FROM Users", &Params::new()).unwrap_err();
    assert!(matches!(err, DbError::NotOpen));
    // A second close only logs.
    engine.close();
}

#[test]
fn reconnect_reopens_the_last_path() {
    let (_dir, path) = fixture();
    let mut engine = QueryEngine::default();
    engine.open(&path).unwrap();
    engine.close();
    engine.reconnect().unwrap();
    assert!(engine.is_open());
    assert_eq!(engine.path(), Some(path.as_path()));
}

#[test]
fn failed_transaction_rolls_back() {
    let (_dir, path) = fixture();
    let mut engine = QueryEngine::default();
    engine.open(&path).unwrap();

    let result = engine.in_transaction(|tx| -> Result<(), DbError> {
        tx.execute("DELETE FROM PlayTasks", &Params::new())?;
        tx.execute("INSERT INTO Nowhere VALUES (1)", &Params::new())?;
        Ok(())
    });
    assert!(result.is_err());

    let tasks: Vec<LaunchTaskRecord> = engine
        .query("SELECT id FROM PlayTasks", &Params::new())
        .unwrap();
    assert_eq!(tasks.len(), 1);
}
