//! Student repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD APIs over the `students` table.
//! - Keep all SQL inside the core persistence boundary.
//! - Translate engine failures into semantic repository errors.
//!
//! # Invariants
//! - Every operation opens its own connection, runs in one transaction,
//!   commits on success and releases the connection on every exit path.
//! - Field validation belongs to the service; rows that slip past it are
//!   rejected by the table constraints and surface as `ConstraintViolation`.
//! - Updates always rewrite all five mutable columns.

use crate::config::StoreConfig;
use crate::db::{ensure_schema, open_db, DbError};
use crate::model::id::StudentId;
use crate::model::student::{Student, StudentRecord, StudentValidationError};
use log::{debug, error, warn};
use rusqlite::{params, ErrorCode, Row, Transaction};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

const STUDENT_SELECT_SQL: &str = "SELECT
    student_id,
    name,
    age,
    email,
    gender,
    courses
FROM students";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for student persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    /// Input violated a field invariant; nothing was written.
    Validation(StudentValidationError),
    /// No record is addressed by the given email handle.
    NotFound(String),
    /// A storage constraint rejected the write (unique email, age check).
    ConstraintViolation(String),
    /// Connection or engine failure.
    StorageUnavailable(DbError),
    /// A stored row cannot be represented as a `StudentRecord`.
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound(email) => write!(f, "student not found: {email}"),
            Self::ConstraintViolation(detail) => write!(f, "constraint violation: {detail}"),
            Self::StorageUnavailable(err) => write!(f, "storage unavailable: {err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted student data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::StorageUnavailable(err) => Some(err),
            Self::NotFound(_) | Self::ConstraintViolation(_) | Self::InvalidData(_) => None,
        }
    }
}

impl From<StudentValidationError> for RepoError {
    fn from(value: StudentValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        match value {
            DbError::Sqlite(err) => Self::from(err),
            other => Self::StorageUnavailable(other),
        }
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        if let rusqlite::Error::SqliteFailure(failure, message) = &value {
            if failure.code == ErrorCode::ConstraintViolation {
                let detail = message.clone().unwrap_or_else(|| failure.to_string());
                return Self::ConstraintViolation(detail);
            }
        }
        Self::StorageUnavailable(DbError::Sqlite(value))
    }
}

impl RepoError {
    /// Stable short code used in log events.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::NotFound(_) => "not_found",
            Self::ConstraintViolation(_) => "constraint_violation",
            Self::StorageUnavailable(_) => "storage_unavailable",
            Self::InvalidData(_) => "invalid_data",
        }
    }
}

/// Repository interface for student CRUD operations.
pub trait StudentRepository {
    /// Creates the table when absent. Idempotent.
    fn ensure_table(&self) -> RepoResult<()>;
    /// Inserts one row and returns its email handle.
    fn insert(&self, student: &Student) -> RepoResult<Option<String>>;
    /// Exact-match lookup; `None` when no row matches.
    fn find_by_email(&self, email: &str) -> RepoResult<Option<StudentRecord>>;
    /// Every row ordered by `name` ascending.
    fn list_all(&self) -> RepoResult<Vec<StudentRecord>>;
    /// Rewrites all mutable columns of the row addressed by `email`.
    fn update_by_email(&self, email: &str, record: &StudentRecord) -> RepoResult<()>;
    /// Removes the row addressed by `email`; returns whether one existed.
    fn delete_by_email(&self, email: &str) -> RepoResult<bool>;
}

impl<R: StudentRepository + ?Sized> StudentRepository for &R {
    fn ensure_table(&self) -> RepoResult<()> {
        (**self).ensure_table()
    }

    fn insert(&self, student: &Student) -> RepoResult<Option<String>> {
        (**self).insert(student)
    }

    fn find_by_email(&self, email: &str) -> RepoResult<Option<StudentRecord>> {
        (**self).find_by_email(email)
    }

    fn list_all(&self) -> RepoResult<Vec<StudentRecord>> {
        (**self).list_all()
    }

    fn update_by_email(&self, email: &str, record: &StudentRecord) -> RepoResult<()> {
        (**self).update_by_email(email, record)
    }

    fn delete_by_email(&self, email: &str) -> RepoResult<bool> {
        (**self).delete_by_email(email)
    }
}

/// SQLite-backed student repository.
///
/// Holds only configuration; no connection outlives a single call.
#[derive(Debug, Clone)]
pub struct SqliteStudentRepository {
    config: StoreConfig,
}

impl SqliteStudentRepository {
    pub fn new(config: StoreConfig) -> Self {
        Self { config }
    }

    /// Runs `op` inside a scoped connection and transaction.
    ///
    /// The transaction commits only when `op` succeeds; dropping it on any
    /// error path rolls back, and the connection closes when this returns.
    fn with_transaction<T, F>(&self, event: &'static str, op: F) -> RepoResult<T>
    where
        F: FnOnce(&Transaction<'_>) -> RepoResult<T>,
    {
        let started_at = Instant::now();
        let result = open_db(&self.config.db_path, self.config.busy_timeout)
            .map_err(RepoError::from)
            .and_then(|mut conn| {
                let tx = conn.transaction()?;
                let value = op(&tx)?;
                tx.commit()?;
                Ok(value)
            });

        match &result {
            Ok(_) => debug!(
                "event={event} module=repo status=ok duration_ms={}",
                started_at.elapsed().as_millis()
            ),
            Err(err @ (RepoError::StorageUnavailable(_) | RepoError::InvalidData(_))) => error!(
                "event={event} module=repo status=error duration_ms={} error_code={} error={}",
                started_at.elapsed().as_millis(),
                err.code(),
                err
            ),
            Err(err) => warn!(
                "event={event} module=repo status=error duration_ms={} error_code={}",
                started_at.elapsed().as_millis(),
                err.code()
            ),
        }

        result
    }
}

impl StudentRepository for SqliteStudentRepository {
    fn ensure_table(&self) -> RepoResult<()> {
        self.with_transaction("student_ensure_table", |tx| {
            ensure_schema(tx)?;
            Ok(())
        })
    }

    fn insert(&self, student: &Student) -> RepoResult<Option<String>> {
        self.with_transaction("student_insert", |tx| {
            tx.execute(
                "INSERT INTO students (
                    student_id,
                    name,
                    age,
                    email,
                    gender,
                    courses
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
                params![
                    student.student_id.as_str(),
                    student.name.as_str(),
                    student.age,
                    student.email.as_deref(),
                    student.gender.as_deref(),
                    student.courses_serialized(),
                ],
            )?;
            Ok(student.email.clone())
        })
    }

    fn find_by_email(&self, email: &str) -> RepoResult<Option<StudentRecord>> {
        self.with_transaction("student_find", |tx| {
            let mut stmt = tx.prepare(&format!("{STUDENT_SELECT_SQL} WHERE email = ?1;"))?;
            let mut rows = stmt.query([email])?;
            if let Some(row) = rows.next()? {
                return Ok(Some(parse_student_row(row)?));
            }
            Ok(None)
        })
    }

    fn list_all(&self) -> RepoResult<Vec<StudentRecord>> {
        self.with_transaction("student_list", |tx| {
            let mut stmt = tx.prepare(&format!("{STUDENT_SELECT_SQL} ORDER BY name ASC;"))?;
            let mut rows = stmt.query([])?;
            let mut students = Vec::new();

            while let Some(row) = rows.next()? {
                students.push(parse_student_row(row)?);
            }

            Ok(students)
        })
    }

    fn update_by_email(&self, email: &str, record: &StudentRecord) -> RepoResult<()> {
        self.with_transaction("student_update", |tx| {
            let changed = tx.execute(
                "UPDATE students
                 SET
                    name = ?1,
                    age = ?2,
                    email = ?3,
                    gender = ?4,
                    courses = ?5
                 WHERE email = ?6;",
                params![
                    record.name.as_str(),
                    record.age,
                    record.email.as_deref(),
                    record.gender.as_deref(),
                    record.courses.as_deref(),
                    email,
                ],
            )?;

            if changed == 0 {
                return Err(RepoError::NotFound(email.to_string()));
            }

            Ok(())
        })
    }

    fn delete_by_email(&self, email: &str) -> RepoResult<bool> {
        self.with_transaction("student_delete", |tx| {
            let changed = tx.execute("DELETE FROM students WHERE email = ?1;", [email])?;
            Ok(changed > 0)
        })
    }
}

fn parse_student_row(row: &Row<'_>) -> RepoResult<StudentRecord> {
    let student_id = row
        .get::<_, Option<String>>("student_id")?
        .ok_or_else(|| RepoError::InvalidData("NULL value in students.student_id".to_string()))?;
    let name = row
        .get::<_, Option<String>>("name")?
        .ok_or_else(|| RepoError::InvalidData("NULL value in students.name".to_string()))?;

    Ok(StudentRecord {
        student_id: StudentId::from_stored(student_id),
        name,
        age: row.get("age")?,
        email: row.get("email")?,
        gender: row.get("gender")?,
        courses: row.get("courses")?,
    })
}
