//! Student domain model.
//!
//! # Responsibility
//! - Define the in-memory entity created for new records.
//! - Define the read model returned by storage lookups.
//! - Validate field invariants shared by the service and gateway.
//!
//! # Invariants
//! - `student_id` is assigned once at construction and never changes.
//! - `age` must be strictly positive for any record that reaches storage.
//! - `courses` is persisted as a list literal and read back verbatim.
//!
//! # See also
//! - `model::courses` for the literal format.

use crate::model::courses::{parse_courses_literal, render_courses_literal};
use crate::model::id::{new_id, StudentId};
use serde::Serialize;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};

/// Field-level validation failures for student input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StudentValidationError {
    /// Age was zero or negative.
    NonPositiveAge(i64),
    /// Name was empty after trimming whitespace.
    EmptyName,
}

impl Display for StudentValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NonPositiveAge(age) => write!(f, "age must be a positive number, got {age}"),
            Self::EmptyName => write!(f, "name cannot be empty"),
        }
    }
}

impl Error for StudentValidationError {}

/// Rejects ages that violate `age > 0`.
pub fn validate_age(age: i64) -> Result<(), StudentValidationError> {
    if age <= 0 {
        return Err(StudentValidationError::NonPositiveAge(age));
    }
    Ok(())
}

/// Rejects names that are empty or whitespace-only.
pub fn validate_name(name: &str) -> Result<(), StudentValidationError> {
    if name.trim().is_empty() {
        return Err(StudentValidationError::EmptyName);
    }
    Ok(())
}

/// One value in the display map produced by [`Student::to_map`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Integer(i64),
    List(Vec<String>),
    Null,
}

impl From<Option<String>> for FieldValue {
    fn from(value: Option<String>) -> Self {
        value.map_or(Self::Null, Self::Text)
    }
}

/// In-memory student created by the service before insertion.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct Student {
    pub student_id: StudentId,
    pub name: String,
    pub age: i64,
    pub email: Option<String>,
    pub gender: Option<String>,
    courses: Vec<String>,
}

impl Student {
    /// Creates a student with a freshly generated id.
    ///
    /// Field validation is the caller's job; see [`validate_age`] and
    /// [`validate_name`].
    pub fn new(
        name: impl Into<String>,
        age: i64,
        email: Option<String>,
        gender: Option<String>,
        courses: Vec<String>,
    ) -> Self {
        Self {
            student_id: new_id(),
            name: name.into(),
            age,
            email,
            gender,
            courses,
        }
    }

    /// Ordered course names held by this entity.
    pub fn courses(&self) -> &[String] {
        &self.courses
    }

    /// Text written into `students.courses`.
    pub fn courses_serialized(&self) -> String {
        render_courses_literal(&self.courses)
    }

    /// Returns every field keyed by its display name.
    ///
    /// `Courses` holds a copy of the list; mutating the map never touches the
    /// entity.
    pub fn to_map(&self) -> BTreeMap<&'static str, FieldValue> {
        BTreeMap::from([
            ("Student ID", FieldValue::Text(self.student_id.to_string())),
            ("Name", FieldValue::Text(self.name.clone())),
            ("Age", FieldValue::Integer(self.age)),
            ("Email", self.email.clone().into()),
            ("Gender", self.gender.clone().into()),
            ("Courses", FieldValue::List(self.courses.clone())),
        ])
    }
}

impl Debug for Student {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Student")
            .field("student_id", &self.student_id.as_str())
            .field("name", &self.name)
            .field("age", &self.age)
            .finish()
    }
}

/// Student row as read back from storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StudentRecord {
    pub student_id: StudentId,
    pub name: String,
    pub age: i64,
    pub email: Option<String>,
    pub gender: Option<String>,
    /// Raw list literal exactly as stored.
    pub courses: Option<String>,
}

impl StudentRecord {
    /// Parses the stored courses literal.
    ///
    /// Returns `None` when the column is NULL or not a list literal.
    pub fn courses_list(&self) -> Option<Vec<String>> {
        self.courses.as_deref().and_then(parse_courses_literal)
    }
}

/// Input for creating one student.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewStudent {
    pub name: String,
    pub age: i64,
    pub email: Option<String>,
    pub gender: Option<String>,
    pub courses: Vec<String>,
}

/// Field replacements for an update.
///
/// `None` keeps the stored value; there is no way to clear a column through
/// a patch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentPatch {
    pub name: Option<String>,
    pub age: Option<i64>,
    pub email: Option<String>,
    pub gender: Option<String>,
    pub courses: Option<Vec<String>>,
}

impl StudentPatch {
    /// Returns whether the patch replaces no field at all.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.age.is_none()
            && self.email.is_none()
            && self.gender.is_none()
            && self.courses.is_none()
    }

    /// Merges this patch over `current`, field by field.
    pub fn merge_into(&self, current: &StudentRecord) -> StudentRecord {
        StudentRecord {
            student_id: current.student_id.clone(),
            name: self.name.clone().unwrap_or_else(|| current.name.clone()),
            age: self.age.unwrap_or(current.age),
            email: self.email.clone().or_else(|| current.email.clone()),
            gender: self.gender.clone().or_else(|| current.gender.clone()),
            courses: self
                .courses
                .as_deref()
                .map(render_courses_literal)
                .or_else(|| current.courses.clone()),
        }
    }
}
