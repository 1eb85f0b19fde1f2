//! CLI startup entry point.
//!
//! # Responsibility
//! - Resolve configuration, start logging and prepare the student table.
//! - Exit non-zero when storage cannot be prepared.
//! - Report a short status line; the interactive menu lives elsewhere.

use log::error;
use std::process::ExitCode;
use student_core::{init_logging, AppConfig, SqliteStudentRepository, StudentService};

fn main() -> ExitCode {
    let config = AppConfig::from_env();

    if let Some(log_dir) = config.log_dir.as_deref() {
        if let Err(err) = init_logging(&config.log_level, log_dir) {
            eprintln!("logging disabled: {err}");
        }
    }

    let service = StudentService::new(SqliteStudentRepository::new(config.store.clone()));
    if let Err(err) = service.ensure_table() {
        error!("event=startup module=cli status=error error_code={}", err.code());
        eprintln!(
            "error initializing database `{}`: {err}",
            config.store.db_path.display()
        );
        return ExitCode::FAILURE;
    }

    match service.list() {
        Ok(students) => {
            println!("student_core version={}", student_core::core_version());
            println!(
                "database={} students={}",
                config.store.db_path.display(),
                students.len()
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error reading students: {err}");
            ExitCode::FAILURE
        }
    }
}
