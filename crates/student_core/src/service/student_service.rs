//! Student record use-case service.
//!
//! # Responsibility
//! - Validate caller input before anything reaches storage.
//! - Merge partial updates over the stored record.
//! - Translate absent lookups into `NotFound` for update/remove paths.
//!
//! # Invariants
//! - Service APIs never bypass repository validation/persistence contracts.
//! - Repository errors pass through unchanged.
//! - The service never formats user-facing text.

use crate::model::id::StudentId;
use crate::model::student::{
    validate_age, validate_name, NewStudent, Student, StudentPatch, StudentRecord,
};
use crate::repo::student_repo::{RepoError, RepoResult, StudentRepository};
use log::info;

/// Use-case service wrapper for student CRUD operations.
pub struct StudentService<R: StudentRepository> {
    repo: R,
}

impl<R: StudentRepository> StudentService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates the backing table when absent.
    pub fn ensure_table(&self) -> RepoResult<()> {
        self.repo.ensure_table()
    }

    /// Validates and stores a new student.
    ///
    /// # Contract
    /// - Rejects `age <= 0` and empty names before an entity is built.
    /// - Returns the generated id of the stored record.
    /// - Duplicate emails surface as `RepoError::ConstraintViolation`.
    pub fn add(&self, request: NewStudent) -> RepoResult<StudentId> {
        validate_age(request.age)?;
        validate_name(&request.name)?;

        let student = Student::new(
            request.name,
            request.age,
            request.email,
            request.gender,
            request.courses,
        );
        self.repo.insert(&student)?;

        info!("event=student_add module=service status=ok");
        Ok(student.student_id)
    }

    /// Looks up one student by email. Absence is not an error.
    pub fn get(&self, email: &str) -> RepoResult<Option<StudentRecord>> {
        self.repo.find_by_email(email)
    }

    /// Lists every student ordered by name.
    pub fn list(&self) -> RepoResult<Vec<StudentRecord>> {
        self.repo.list_all()
    }

    /// Applies `patch` over the record addressed by `email`.
    ///
    /// # Contract
    /// - Fails with `NotFound` when no record matches `email`.
    /// - Fields left `None` keep their stored values.
    /// - A supplied `age` is validated before any write.
    /// - Returns the merged record as written.
    pub fn update(&self, email: &str, patch: &StudentPatch) -> RepoResult<StudentRecord> {
        let current = self
            .get(email)?
            .ok_or_else(|| RepoError::NotFound(email.to_string()))?;

        if let Some(age) = patch.age {
            validate_age(age)?;
        }
        if let Some(name) = patch.name.as_deref() {
            validate_name(name)?;
        }

        let merged = patch.merge_into(&current);
        self.repo.update_by_email(email, &merged)?;

        info!("event=student_update module=service status=ok");
        Ok(merged)
    }

    /// Deletes the record addressed by `email`.
    ///
    /// The existence check and delete are a single statement; a missing
    /// record yields `NotFound` and nothing is removed.
    pub fn remove(&self, email: &str) -> RepoResult<bool> {
        if !self.repo.delete_by_email(email)? {
            return Err(RepoError::NotFound(email.to_string()));
        }

        info!("event=student_remove module=service status=ok");
        Ok(true)
    }
}
