//! Export error types.

use thiserror::Error;
use zeugnis_shared::AppError;

use crate::compile::CompileError;
use crate::layout::LayoutError;
use crate::lua::LuaError;
use crate::record::RecordStoreError;
use crate::template::TemplateError;

/// Errors that abort a batch.
///
/// Per-student compiler failures are not among them; they are reported in
/// [`ExportOutcome::failures`](super::ExportOutcome::failures).
#[derive(Debug, Error)]
pub enum ExportError {
    /// Loading the snapshot failed.
    #[error(transparent)]
    Store(#[from] RecordStoreError),

    /// The output layout could not be prepared.
    #[error(transparent)]
    Layout(#[from] LayoutError),

    /// The template could not be loaded or written.
    #[error(transparent)]
    Template(#[from] TemplateError),

    /// A data file could not be serialized.
    #[error(transparent)]
    Lua(#[from] LuaError),

    /// The compile cache could not be maintained.
    #[error(transparent)]
    Compile(#[from] CompileError),
}

impl From<ExportError> for AppError {
    fn from(err: ExportError) -> Self {
        let message = err.to_string();
        match err {
            ExportError::Store(store) => match store {
                RecordStoreError::SchoolYearMissing => Self::Configuration(message),
                RecordStoreError::ClassNotFound(_) | RecordStoreError::NoStudents(_) => {
                    Self::NotFound(message)
                }
                RecordStoreError::StudentsOutsideClass { .. } => Self::Validation(message),
                RecordStoreError::Backend(_) => Self::Database(message),
            },
            ExportError::Layout(LayoutError::Io { .. })
            | ExportError::Template(TemplateError::Io { .. })
            | ExportError::Compile(CompileError::Cache { .. }) => Self::Io(message),
            ExportError::Layout(LayoutError::InvalidClassName(_)) => Self::Validation(message),
            ExportError::Layout(_) | ExportError::Template(_) => Self::Configuration(message),
            ExportError::Lua(_) => Self::Internal(message),
            ExportError::Compile(_) => Self::ExternalService(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_configuration_errors_map_to_configuration() {
        let err: AppError = ExportError::from(RecordStoreError::SchoolYearMissing).into();
        assert_eq!(err.error_code(), "CONFIGURATION_ERROR");

        let err: AppError =
            ExportError::from(LayoutError::TemplateBundleMissing(PathBuf::from("TexTemplate")))
                .into();
        assert_eq!(err.exit_code(), 78);

        let err: AppError = ExportError::from(TemplateError::PlaceholderMissing {
            path: PathBuf::from("Zeugnis.tex"),
            placeholder: "studentdata.lua".to_string(),
        })
        .into();
        assert!(matches!(err, AppError::Configuration(_)));
    }

    #[test]
    fn test_store_errors() {
        let err: AppError = ExportError::from(RecordStoreError::ClassNotFound("9z".into())).into();
        assert!(matches!(err, AppError::NotFound(ref m) if m.contains("9z")));

        let err: AppError = ExportError::from(RecordStoreError::backend("locked")).into();
        assert!(matches!(err, AppError::Database(_)));
    }

    #[test]
    fn test_invariant_violation_is_internal() {
        let err: AppError = ExportError::from(LuaError::NoBracketLevel { len: 12 }).into();
        assert_eq!(err.exit_code(), 70);
    }
}
