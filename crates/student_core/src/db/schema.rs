//! `students` table definition and shape check.

use super::{DbError, DbResult};
use rusqlite::Connection;
use std::collections::HashSet;

pub const STUDENTS_TABLE: &str = "students";

/// Columns every usable `students` table must carry.
pub const REQUIRED_COLUMNS: &[&str] = &["student_id", "name", "age", "email", "gender", "courses"];

const SCHEMA_SQL: &str = include_str!("schema.sql");

/// Creates the `students` table when absent and verifies its columns.
///
/// Safe to call on every startup; an existing table is left untouched.
pub fn ensure_schema(conn: &Connection) -> DbResult<()> {
    conn.execute_batch(SCHEMA_SQL)?;

    let mut stmt = conn.prepare("SELECT name FROM pragma_table_info(?1);")?;
    let columns = stmt
        .query_map([STUDENTS_TABLE], |row| row.get::<_, String>(0))?
        .collect::<Result<HashSet<_>, _>>()?;

    for &column in REQUIRED_COLUMNS {
        if !columns.contains(column) {
            return Err(DbError::MissingRequiredColumn {
                table: STUDENTS_TABLE,
                column,
            });
        }
    }

    Ok(())
}
