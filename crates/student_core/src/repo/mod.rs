//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the storage gateway contract for student records.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Repository APIs return semantic errors (`NotFound`,
//!   `ConstraintViolation`) in addition to storage transport errors.

pub mod student_repo;
