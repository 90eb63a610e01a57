//! Per-student template instances.
//!
//! The report template references its data file by a fixed placeholder name.
//! Binding writes `<base>.lua` and a copy of the template, `<base>.tex`, whose
//! placeholder points at that data file.

pub mod binder;
pub mod error;

pub use binder::{BoundFiles, TemplateBinder};
pub use error::TemplateError;
