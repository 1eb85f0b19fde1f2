//! Core record management for the student records console.
//! This crate owns persistence, validation and update-merge semantics; the
//! console layer only collects fields and renders results.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::{AppConfig, StoreConfig};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::courses::{parse_courses_literal, render_courses_literal};
pub use model::id::{new_id, StudentId};
pub use model::student::{
    FieldValue, NewStudent, Student, StudentPatch, StudentRecord, StudentValidationError,
};
pub use repo::student_repo::{RepoError, RepoResult, SqliteStudentRepository, StudentRepository};
pub use service::student_service::StudentService;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
