//! Repository layer and active-record persistence methods.
//!
//! # Responsibility
//! - Keep SQL for mapped records inside the core persistence boundary.
//! - Expose lifecycle operations (`save`, `update`, `delete`) on entities.
//!
//! # Invariants
//! - Every mutation commits its own transaction before returning.
//! - Repository APIs return semantic errors (`NotPersisted`, `NotFound`) in
//!   addition to DB transport errors.

pub mod department_repo;
