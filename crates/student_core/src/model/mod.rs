//! Student record domain model.
//!
//! # Responsibility
//! - Define the entity, read model and update inputs used by core.
//! - Own identifier generation and the `courses` text format.
//!
//! # Invariants
//! - Every record is identified by a short, immutable `StudentId`.
//! - Deletion is a hard delete; there are no tombstones.

pub mod courses;
pub mod id;
pub mod student;
