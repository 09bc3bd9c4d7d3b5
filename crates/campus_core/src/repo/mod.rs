//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define one generic data access contract shared by all entity tables.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Repository APIs return semantic errors (`NotFound`, `MissingKey`) in
//!   addition to DB transport errors.

pub mod record_repo;
pub mod tables;
