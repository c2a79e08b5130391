//! Domain model for records mapped onto SQLite tables.
//!
//! # Responsibility
//! - Define in-memory entity shapes and their persistence lifecycle tags.
//!
//! # Invariants
//! - Identity is assigned by storage, never invented in memory.
//! - Hard delete leaves the in-memory value readable.

pub mod department;
