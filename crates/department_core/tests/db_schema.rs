use department_core::db::schema::{table_exists, DEPARTMENTS_TABLE};
use department_core::db::{open_db, open_db_in_memory};
use department_core::{drop_schema, ensure_schema, Department};
use rusqlite::Connection;

#[test]
fn opening_database_does_not_create_tables() {
    let conn = open_db_in_memory().unwrap();
    assert!(!table_exists(&conn, DEPARTMENTS_TABLE).unwrap());
}

#[test]
fn open_db_enables_foreign_keys() {
    let conn = open_db_in_memory().unwrap();
    let enabled: i64 = conn
        .query_row("PRAGMA foreign_keys;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(enabled, 1);
}

#[test]
fn ensure_schema_twice_keeps_existing_rows() {
    let conn = open_db_in_memory().unwrap();
    ensure_schema(&conn).unwrap();
    let created = Department::create(&conn, "Payroll", "Building A").unwrap();

    ensure_schema(&conn).unwrap();
    Department::create_table(&conn).unwrap();

    let rows = Department::all(&conn).unwrap();
    assert_eq!(rows, vec![created]);
}

#[test]
fn drop_then_ensure_yields_empty_table_and_valid_identities() {
    let conn = open_db_in_memory().unwrap();
    Department::create_table(&conn).unwrap();
    let before = Department::create(&conn, "Payroll", "Building A").unwrap();
    Department::create(&conn, "HR", "Building C").unwrap();

    Department::drop_table(&conn).unwrap();
    Department::create_table(&conn).unwrap();
    assert!(Department::all(&conn).unwrap().is_empty());

    let first = Department::create(&conn, "IT", "Building D").unwrap();
    let second = Department::create(&conn, "Ops", "Building E").unwrap();
    assert!(first.id().unwrap() > 0);
    assert_ne!(first.id(), second.id());
    assert!(before.id().is_some());
}

#[test]
fn drop_schema_is_idempotent() {
    let conn = open_db_in_memory().unwrap();
    drop_schema(&conn).unwrap();
    drop_schema(&conn).unwrap();
    assert!(!table_exists(&conn, DEPARTMENTS_TABLE).unwrap());
}

#[test]
fn departments_table_has_expected_columns() {
    let conn = open_db_in_memory().unwrap();
    ensure_schema(&conn).unwrap();

    let mut stmt = conn.prepare("PRAGMA table_info(departments);").unwrap();
    let columns: Vec<(String, String, i64, i64)> = stmt
        .query_map([], |row| {
            Ok((row.get(1)?, row.get(2)?, row.get(3)?, row.get(5)?))
        })
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();

    assert_eq!(
        columns,
        vec![
            ("id".to_string(), "INTEGER".to_string(), 0, 1),
            ("name".to_string(), "TEXT".to_string(), 1, 0),
            ("location".to_string(), "TEXT".to_string(), 1, 0),
        ]
    );
}

#[test]
fn not_null_constraint_is_enforced_by_storage() {
    let conn = open_db_in_memory().unwrap();
    ensure_schema(&conn).unwrap();

    let err = conn
        .execute(
            "INSERT INTO departments (name, location) VALUES (NULL, 'Building A');",
            [],
        )
        .unwrap_err();
    assert!(err.to_string().contains("NOT NULL"));
}

#[test]
fn rows_survive_reopening_file_database() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("departments.db");

    let conn_first = open_db(&path).unwrap();
    Department::create_table(&conn_first).unwrap();
    let created = Department::create(&conn_first, "Payroll", "Building A").unwrap();
    drop(conn_first);

    let conn_second = open_db(&path).unwrap();
    Department::create_table(&conn_second).unwrap();
    let loaded = Department::find_by_id(&conn_second, created.id().unwrap())
        .unwrap()
        .unwrap();
    assert_eq!(loaded, created);
    assert_row_count(&conn_second, 1);
}

fn assert_row_count(conn: &Connection, expected: i64) {
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM departments;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, expected);
}
