//! Department record mapper and SQLite implementation.
//!
//! # Responsibility
//! - Translate `Department` attributes to and from `departments` rows.
//! - Provide active-record methods that take the storage handle explicitly.
//!
//! # Invariants
//! - `save` always inserts; it never updates an existing row.
//! - `update`/`delete` require `RecordState::Persisted`.
//! - Insert and row-id read-back happen in one transaction.

use crate::db::schema;
use crate::db::DbError;
use crate::model::department::{Department, DepartmentId, RecordState};
use log::{debug, warn};
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

const DEPARTMENT_SELECT_SQL: &str = "SELECT
    id,
    name,
    location
FROM departments";

pub type RepoResult<T> = Result<T, RepoError>;

/// Error for department persistence and lifecycle misuse.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    /// Update/delete attempted on a record that has no live row.
    NotPersisted {
        operation: &'static str,
        state: RecordState,
    },
    /// Statement matched no row for this identity.
    NotFound(DepartmentId),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NotPersisted { operation, state } => {
                write!(f, "cannot {operation} department in {state} state")
            }
            Self::NotFound(id) => write!(f, "department not found: {id}"),
            Self::InvalidData(message) => {
                write!(f, "invalid persisted department data: {message}")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::NotPersisted { .. } | Self::NotFound(_) | Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Row-level persistence contract for departments.
pub trait DepartmentRepository {
    /// Inserts a new row and returns the storage-assigned identity.
    fn insert_department(&self, department: &Department) -> RepoResult<DepartmentId>;
    /// Overwrites name/location of the row with `id`.
    fn update_department(&self, id: DepartmentId, department: &Department) -> RepoResult<()>;
    /// Hard-deletes the row with `id`.
    fn delete_department(&self, id: DepartmentId) -> RepoResult<()>;
    fn get_department(&self, id: DepartmentId) -> RepoResult<Option<Department>>;
    /// Lists all rows ordered by identity.
    fn list_departments(&self) -> RepoResult<Vec<Department>>;
}

/// SQLite-backed department repository over a borrowed storage handle.
pub struct SqliteDepartmentRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteDepartmentRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl DepartmentRepository for SqliteDepartmentRepository<'_> {
    fn insert_department(&self, department: &Department) -> RepoResult<DepartmentId> {
        let started_at = Instant::now();
        let tx = self.conn.unchecked_transaction()?;
        tx.execute(
            "INSERT INTO departments (name, location) VALUES (?1, ?2);",
            params![department.name.as_str(), department.location.as_str()],
        )?;
        let id = tx.last_insert_rowid();
        tx.commit()?;

        debug!(
            "event=department_insert module=repo status=ok id={} duration_ms={}",
            id,
            started_at.elapsed().as_millis()
        );
        Ok(id)
    }

    fn update_department(&self, id: DepartmentId, department: &Department) -> RepoResult<()> {
        let started_at = Instant::now();
        let tx = self.conn.unchecked_transaction()?;
        let changed = tx.execute(
            "UPDATE departments
             SET
                name = ?1,
                location = ?2
             WHERE id = ?3;",
            params![department.name.as_str(), department.location.as_str(), id],
        )?;
        tx.commit()?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        debug!(
            "event=department_update module=repo status=ok id={} duration_ms={}",
            id,
            started_at.elapsed().as_millis()
        );
        Ok(())
    }

    fn delete_department(&self, id: DepartmentId) -> RepoResult<()> {
        let started_at = Instant::now();
        let tx = self.conn.unchecked_transaction()?;
        let changed = tx.execute("DELETE FROM departments WHERE id = ?1;", [id])?;
        tx.commit()?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        debug!(
            "event=department_delete module=repo status=ok id={} duration_ms={}",
            id,
            started_at.elapsed().as_millis()
        );
        Ok(())
    }

    fn get_department(&self, id: DepartmentId) -> RepoResult<Option<Department>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{DEPARTMENT_SELECT_SQL} WHERE id = ?1;"))?;

        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_department_row(row)?));
        }

        Ok(None)
    }

    fn list_departments(&self) -> RepoResult<Vec<Department>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{DEPARTMENT_SELECT_SQL} ORDER BY id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut departments = Vec::new();

        while let Some(row) = rows.next()? {
            departments.push(parse_department_row(row)?);
        }

        Ok(departments)
    }
}

impl Department {
    /// Creates the `departments` table when absent.
    pub fn create_table(conn: &Connection) -> RepoResult<()> {
        schema::ensure_schema(conn)?;
        Ok(())
    }

    /// Drops the `departments` table and every row in it.
    pub fn drop_table(conn: &Connection) -> RepoResult<()> {
        schema::drop_schema(conn)?;
        Ok(())
    }

    /// Constructs a department and inserts it in one step.
    pub fn create(
        conn: &Connection,
        name: impl Into<String>,
        location: impl Into<String>,
    ) -> RepoResult<Self> {
        let mut department = Self::new(name, location);
        department.save(conn)?;
        Ok(department)
    }

    /// Inserts a new row with the current attributes and adopts its identity.
    ///
    /// Always inserts: calling this on an already persisted or deleted record
    /// produces another row with a fresh identity. Use `upsert` to write back
    /// to the existing row instead.
    pub fn save(&mut self, conn: &Connection) -> RepoResult<DepartmentId> {
        let id = SqliteDepartmentRepository::new(conn).insert_department(self)?;
        self.mark_persisted(id);
        Ok(id)
    }

    /// Updates the backing row when persisted, inserts otherwise.
    pub fn upsert(&mut self, conn: &Connection) -> RepoResult<DepartmentId> {
        match self.state() {
            RecordState::Persisted(id) => {
                self.update(conn)?;
                Ok(id)
            }
            RecordState::Transient | RecordState::Deleted(_) => self.save(conn),
        }
    }

    /// Writes the in-memory name/location to the backing row.
    ///
    /// # Errors
    /// - `NotPersisted` when the record is transient or deleted.
    /// - `NotFound` when no row with this identity exists anymore.
    pub fn update(&self, conn: &Connection) -> RepoResult<()> {
        let id = self.require_persisted("update")?;
        SqliteDepartmentRepository::new(conn).update_department(id, self)
    }

    /// Deletes the backing row; attributes and identity stay readable.
    ///
    /// # Errors
    /// - `NotPersisted` when the record is transient or already deleted.
    /// - `NotFound` when no row with this identity exists; state is unchanged.
    pub fn delete(&mut self, conn: &Connection) -> RepoResult<()> {
        let id = self.require_persisted("delete")?;
        SqliteDepartmentRepository::new(conn).delete_department(id)?;
        self.mark_deleted(id);
        Ok(())
    }

    /// Loads the row with `id` as a persisted record.
    pub fn find_by_id(conn: &Connection, id: DepartmentId) -> RepoResult<Option<Self>> {
        SqliteDepartmentRepository::new(conn).get_department(id)
    }

    /// Loads every row ordered by identity.
    pub fn all(conn: &Connection) -> RepoResult<Vec<Self>> {
        SqliteDepartmentRepository::new(conn).list_departments()
    }

    fn require_persisted(&self, operation: &'static str) -> RepoResult<DepartmentId> {
        match self.state() {
            RecordState::Persisted(id) => Ok(id),
            state => {
                warn!(
                    "event=department_{} module=repo status=rejected error_code=not_persisted state={}",
                    operation, state
                );
                Err(RepoError::NotPersisted { operation, state })
            }
        }
    }
}

fn parse_department_row(row: &Row<'_>) -> RepoResult<Department> {
    let id: DepartmentId = row.get("id")?;
    let name = row.get::<_, Option<String>>("name")?.ok_or_else(|| {
        RepoError::InvalidData(format!("null value in departments.name for id {id}"))
    })?;
    let location = row.get::<_, Option<String>>("location")?.ok_or_else(|| {
        RepoError::InvalidData(format!("null value in departments.location for id {id}"))
    })?;

    Ok(Department::with_id(id, name, location))
}
