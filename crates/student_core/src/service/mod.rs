//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Keep console/CLI layers decoupled from storage details.

pub mod student_service;
