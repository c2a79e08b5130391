//! Explicit schema bootstrap for the `departments` table.
//!
//! # Responsibility
//! - Create the table when absent and drop it for full resets.
//! - Keep DDL in one place, outside of mapper load paths.
//!
//! # Invariants
//! - `ensure_schema` and `drop_schema` are idempotent.
//! - Each call commits its own transaction before returning.

use super::DbResult;
use log::{error, info};
use rusqlite::Connection;
use std::time::Instant;

/// Table backing the `Department` record.
pub const DEPARTMENTS_TABLE: &str = "departments";

const CREATE_DEPARTMENTS_SQL: &str = include_str!("departments.sql");
const DROP_DEPARTMENTS_SQL: &str = "DROP TABLE IF EXISTS departments;";

/// Creates the `departments` table if it does not exist yet.
///
/// Existing rows are left untouched.
pub fn ensure_schema(conn: &Connection) -> DbResult<()> {
    run_schema_statement(conn, "schema_ensure", CREATE_DEPARTMENTS_SQL)
}

/// Drops the `departments` table if present, destroying every row.
///
/// SQLite also forgets the table's AUTOINCREMENT high-water mark, so
/// identities assigned after a later `ensure_schema` may repeat old values.
pub fn drop_schema(conn: &Connection) -> DbResult<()> {
    run_schema_statement(conn, "schema_drop", DROP_DEPARTMENTS_SQL)
}

/// Returns whether a table with the given name exists.
pub fn table_exists(conn: &Connection, table_name: &str) -> DbResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table_name],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn run_schema_statement(conn: &Connection, event: &str, sql: &str) -> DbResult<()> {
    let started_at = Instant::now();
    let result = conn.unchecked_transaction().and_then(|tx| {
        tx.execute_batch(sql)?;
        tx.commit()
    });

    match result {
        Ok(()) => {
            info!(
                "event={} module=schema status=ok table={} duration_ms={}",
                event,
                DEPARTMENTS_TABLE,
                started_at.elapsed().as_millis()
            );
            Ok(())
        }
        Err(err) => {
            error!(
                "event={} module=schema status=error table={} duration_ms={} error={}",
                event,
                DEPARTMENTS_TABLE,
                started_at.elapsed().as_millis(),
                err
            );
            Err(err.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{drop_schema, ensure_schema, table_exists, DEPARTMENTS_TABLE};
    use crate::db::open_db_in_memory;

    #[test]
    fn ensure_then_drop_toggles_table_presence() {
        let conn = open_db_in_memory().unwrap();
        assert!(!table_exists(&conn, DEPARTMENTS_TABLE).unwrap());

        ensure_schema(&conn).unwrap();
        assert!(table_exists(&conn, DEPARTMENTS_TABLE).unwrap());

        drop_schema(&conn).unwrap();
        assert!(!table_exists(&conn, DEPARTMENTS_TABLE).unwrap());
    }

    #[test]
    fn drop_schema_without_table_is_a_no_op() {
        let conn = open_db_in_memory().unwrap();
        drop_schema(&conn).unwrap();
        drop_schema(&conn).unwrap();
        assert!(!table_exists(&conn, DEPARTMENTS_TABLE).unwrap());
    }
}
