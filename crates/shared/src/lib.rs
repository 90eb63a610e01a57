//! Shared types, errors, and configuration for Zeugnis.
//!
//! This crate provides common types used across all other crates:
//! - Typed IDs for type-safe record references
//! - The compile policy shared by configuration and the engine
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::{AppConfig, CompilerConfig, DatabaseConfig, ExportConfig, JobConfig};
pub use error::{AppError, AppResult};
pub use types::CompilePolicy;
