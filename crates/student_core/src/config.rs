//! Runtime configuration for storage and logging.
//!
//! # Responsibility
//! - Carry the database location into the storage gateway explicitly.
//! - Resolve process-level settings from environment and arguments.
//!
//! # Invariants
//! - Core never falls back to a hidden global database path; every gateway
//!   is constructed with a `StoreConfig`.

use crate::logging::default_log_level;
use std::ffi::OsString;
use std::path::PathBuf;
use std::time::Duration;

/// Default database file name, relative to the working directory.
pub const DEFAULT_DB_FILE_NAME: &str = "students.db";
const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_secs(5);

pub const DB_PATH_ENV: &str = "STUDENT_RECORDS_DB";
pub const LOG_LEVEL_ENV: &str = "STUDENT_RECORDS_LOG_LEVEL";
pub const LOG_DIR_ENV: &str = "STUDENT_RECORDS_LOG_DIR";

/// Storage gateway settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// SQLite file holding the `students` table.
    pub db_path: PathBuf,
    /// How long one connection waits on a locked database file.
    pub busy_timeout: Duration,
}

impl StoreConfig {
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
            busy_timeout: DEFAULT_BUSY_TIMEOUT,
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::new(DEFAULT_DB_FILE_NAME)
    }
}

/// Process-level settings used by executables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub store: StoreConfig,
    pub log_level: String,
    /// Absolute log directory; `None` keeps file logging disabled.
    pub log_dir: Option<String>,
}

impl AppConfig {
    /// Resolves settings from the process environment and arguments.
    ///
    /// The first positional argument after the program name overrides
    /// `STUDENT_RECORDS_DB`.
    pub fn from_env() -> Self {
        Self::resolve(|key| std::env::var_os(key), std::env::args_os().skip(1))
    }

    /// Resolves settings from explicit sources.
    pub fn resolve<E, A>(env: E, args: A) -> Self
    where
        E: Fn(&str) -> Option<OsString>,
        A: IntoIterator<Item = OsString>,
    {
        let db_path = args
            .into_iter()
            .next()
            .or_else(|| env(DB_PATH_ENV))
            .filter(|value| !value.is_empty())
            .map_or_else(|| PathBuf::from(DEFAULT_DB_FILE_NAME), PathBuf::from);

        let log_level = env(LOG_LEVEL_ENV)
            .and_then(|value| value.into_string().ok())
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| default_log_level().to_string());

        let log_dir = env(LOG_DIR_ENV)
            .and_then(|value| value.into_string().ok())
            .filter(|value| !value.trim().is_empty());

        Self {
            store: StoreConfig::new(db_path),
            log_level,
            log_dir,
        }
    }
}
