//! Report generation for one class batch.
//!
//! [`ReportEngine`] ties the pieces together: snapshot from the record store,
//! output layout, eligibility, Lua data files, template instances and finally
//! the compile orchestrator.

pub mod document;
pub mod error;
pub mod service;
pub mod types;


pub use document::student_document;
pub use error::ExportError;
pub use service::ReportEngine;
pub use types::{ExportOutcome, ExportRequest, ExportedFiles};
