//! Report generation engine for Zeugnis.
//!
//! This crate turns student records into typeset competence reports. It has
//! ZERO database dependencies: records arrive through the [`record::RecordStore`]
//! trait, everything else works on plain types and the filesystem.
//!
//! # Modules
//!
//! - `record` - Snapshot types and the record store contract
//! - `layout` - Output directories and per-student file names
//! - `eligibility` - Which subjects, topics and competences a report shows
//! - `lua` - Lua table literals for the report template
//! - `template` - Per-student template instances
//! - `compile` - Document compilation and the per-class cache
//! - `export` - The report engine tying everything together

pub mod compile;
pub mod eligibility;
pub mod export;
pub mod layout;
pub mod lua;
pub mod record;
pub mod template;

#[cfg(test)]
mod fixtures;

pub use export::{ExportError, ExportOutcome, ExportRequest, ReportEngine};
