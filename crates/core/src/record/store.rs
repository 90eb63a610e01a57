//! Read contract of the record store.

use async_trait::async_trait;
use thiserror::Error;
use zeugnis_shared::types::StudentId;

use super::types::ExportSnapshot;

/// Errors a record store reports while loading a snapshot.
#[derive(Debug, Error)]
pub enum RecordStoreError {
    /// There is no school year record.
    #[error("No school year record found")]
    SchoolYearMissing,

    /// The requested class does not exist.
    #[error("Class not found: {0}")]
    ClassNotFound(String),

    /// The request resolved to no students.
    #[error("No students found in class {0}")]
    NoStudents(String),

    /// Some requested students are not members of the class.
    #[error("Students {ids:?} are not in class {class}")]
    StudentsOutsideClass {
        /// Class name.
        class: String,
        /// Unresolved student ids.
        ids: Vec<StudentId>,
    },

    /// The backing store failed.
    #[error("Record store error: {0}")]
    Backend(String),
}

impl RecordStoreError {
    /// Creates a backend error from any displayable error.
    #[must_use]
    pub fn backend(err: impl std::fmt::Display) -> Self {
        Self::Backend(err.to_string())
    }
}

/// Source of export snapshots.
///
/// Implementations read everything inside one transaction so that a batch
/// never mixes two states of the records.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Loads the snapshot for `class_name`.
    ///
    /// An empty `student_ids` slice selects every student of the class.
    ///
    /// # Errors
    ///
    /// Returns an error if the school year or class is missing, no student
    /// resolves, a requested student belongs to another class, or the backend fails.
    async fn load_snapshot(
        &self,
        class_name: &str,
        student_ids: &[StudentId],
    ) -> Result<ExportSnapshot, RecordStoreError>;
}
