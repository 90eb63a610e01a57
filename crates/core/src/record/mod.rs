//! Read model of the student records an export works on.
//!
//! The engine never talks to a database directly. A [`RecordStore`] hands it one
//! consistent [`ExportSnapshot`] per invocation; everything downstream is pure.

pub mod store;
pub mod types;

pub use store::{RecordStore, RecordStoreError};
pub use types::*;
