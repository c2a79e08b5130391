//! Department domain model.
//!
//! # Responsibility
//! - Hold department attributes and the lifecycle tag relating them to a row.
//! - Render the canonical `<Department id: name, location>` form.
//!
//! # Invariants
//! - `Transient` records carry no identity.
//! - `Persisted` and `Deleted` records keep the storage-assigned identity.
//! - Construction never touches storage and never validates attributes.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Storage-assigned primary key of a `departments` row.
pub type DepartmentId = i64;

/// Lifecycle of one in-memory record relative to its table row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordState {
    /// Exists only in memory; never inserted.
    Transient,
    /// Backed by the row with this identity.
    Persisted(DepartmentId),
    /// Row with this identity was deleted through this record.
    Deleted(DepartmentId),
}

impl RecordState {
    /// Identity carried by this state, if any.
    pub fn id(self) -> Option<DepartmentId> {
        match self {
            Self::Transient => None,
            Self::Persisted(id) | Self::Deleted(id) => Some(id),
        }
    }

    pub fn is_persisted(self) -> bool {
        matches!(self, Self::Persisted(_))
    }
}

impl Display for RecordState {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Transient => write!(f, "transient"),
            Self::Persisted(id) => write!(f, "persisted({id})"),
            Self::Deleted(id) => write!(f, "deleted({id})"),
        }
    }
}

/// Active record for one row of the `departments` table.
///
/// Attribute changes stay in memory until `update` is called; see
/// `repo::department_repo` for the persistence methods.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "DepartmentRecord", into = "DepartmentRecord")]
pub struct Department {
    pub name: String,
    pub location: String,
    state: RecordState,
}

impl Department {
    /// Creates a transient department with no identity.
    pub fn new(name: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            location: location.into(),
            state: RecordState::Transient,
        }
    }

    /// Creates a department bound to an existing row identity.
    ///
    /// Used when reconstructing from a row already known to exist. The row is
    /// not checked.
    pub fn with_id(
        id: DepartmentId,
        name: impl Into<String>,
        location: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            location: location.into(),
            state: RecordState::Persisted(id),
        }
    }

    /// Storage identity, `None` until first persisted.
    pub fn id(&self) -> Option<DepartmentId> {
        self.state.id()
    }

    pub fn state(&self) -> RecordState {
        self.state
    }

    pub(crate) fn mark_persisted(&mut self, id: DepartmentId) {
        self.state = RecordState::Persisted(id);
    }

    pub(crate) fn mark_deleted(&mut self, id: DepartmentId) {
        self.state = RecordState::Deleted(id);
    }
}

impl Display for Department {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.id() {
            Some(id) => write!(f, "<Department {id}: {}, {}>", self.name, self.location),
            None => write!(f, "<Department None: {}, {}>", self.name, self.location),
        }
    }
}

/// Flat serialized shape; the lifecycle tag is derived from `id`.
#[derive(Serialize, Deserialize)]
struct DepartmentRecord {
    id: Option<DepartmentId>,
    name: String,
    location: String,
}

impl From<DepartmentRecord> for Department {
    fn from(value: DepartmentRecord) -> Self {
        match value.id {
            Some(id) => Self::with_id(id, value.name, value.location),
            None => Self::new(value.name, value.location),
        }
    }
}

impl From<Department> for DepartmentRecord {
    fn from(value: Department) -> Self {
        Self {
            id: value.id(),
            name: value.name,
            location: value.location,
        }
    }
}
