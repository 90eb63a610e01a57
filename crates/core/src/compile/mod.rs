//! Compilation of template instances into documents.
//!
//! The [`CompileOrchestrator`] runs a [`DocumentCompiler`] for each student of a
//! class batch and maintains the class cache file `.compiled`:
//!
//! ```text
//! pending ──► compiling ──► compiled   (cached)
//!    │                 └──► failed     (removed from the cache)
//!    └──► skipped                      (already cached, SkipCompiled only)
//! ```
//!
//! A failing document never aborts the batch. The cache is written once, after
//! all jobs finished, by the orchestrator alone.

pub mod cache;
pub mod compiler;
pub mod error;
pub mod orchestrator;


pub use cache::{CACHE_FILE_NAME, CompileCache};
pub use compiler::{DocumentCompiler, LatexCompiler};
pub use error::CompileError;
pub use orchestrator::{CompileFailure, CompileOrchestrator, CompileReport, DocumentState};
pub use zeugnis_shared::CompilePolicy;
