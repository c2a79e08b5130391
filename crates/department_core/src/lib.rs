//! Active-record persistence for departments over SQLite.
//!
//! Callers open a storage handle with `db::open_db*`, bootstrap the table
//! with `Department::create_table`, then drive each record through
//! `save`/`update`/`delete` while passing the handle explicitly.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;

pub use db::schema::{drop_schema, ensure_schema};
pub use db::{open_db, open_db_in_memory, DbError, DbResult};
pub use logging::{default_log_level, init_logging, logging_status, LogLevel};
pub use model::department::{Department, DepartmentId, RecordState};
pub use repo::department_repo::{
    DepartmentRepository, RepoError, RepoResult, SqliteDepartmentRepository,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
