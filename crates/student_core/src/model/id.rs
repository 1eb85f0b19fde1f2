//! Short student identifier generation.
//!
//! # Responsibility
//! - Produce the 8-character token used as `students.student_id`.
//!
//! # Invariants
//! - Generated ids are the first 8 lowercase hex digits of a random v4 UUID.
//! - No uniqueness check against storage is performed here; a primary key
//!   collision surfaces from the gateway as a constraint violation.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Length of generated identifiers.
pub const STUDENT_ID_LEN: usize = 8;

/// Opaque primary key of a student row.
///
/// Rows written by other tools are accepted verbatim on read, so the wrapped
/// text is not re-validated against the generated shape.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StudentId(String);

impl StudentId {
    /// Generates a fresh identifier from a 128-bit random source.
    pub fn generate() -> Self {
        let token = Uuid::new_v4()
            .simple()
            .to_string()
            .chars()
            .take(STUDENT_ID_LEN)
            .collect();
        Self(token)
    }

    /// Wraps an identifier read back from storage.
    pub fn from_stored(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for StudentId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Produces a new short identifier.
pub fn new_id() -> StudentId {
    StudentId::generate()
}

#[cfg(test)]
mod tests {
    use super::{new_id, StudentId, STUDENT_ID_LEN};
    use std::collections::HashSet;

    #[test]
    fn generated_id_is_eight_lowercase_hex_chars() {
        let id = new_id();
        assert_eq!(id.as_str().len(), STUDENT_ID_LEN);
        assert!(id
            .as_str()
            .chars()
            .all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn generated_ids_differ_between_calls() {
        let ids: HashSet<StudentId> = (0..64).map(|_| new_id()).collect();
        assert!(ids.len() > 60);
    }

    #[test]
    fn stored_id_is_kept_verbatim() {
        let id = StudentId::from_stored("legacy-0001");
        assert_eq!(id.to_string(), "legacy-0001");
    }
}
