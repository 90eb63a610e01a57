//! Layout error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while resolving or preparing the output layout.
#[derive(Debug, Error)]
pub enum LayoutError {
    /// Neither a report date nor a parsable school-year name is available.
    #[error("Cannot determine report year from school year '{name}'")]
    ReportYearUnknown {
        /// School-year display name.
        name: String,
    },

    /// The class name cannot be used as a directory name.
    #[error("Invalid class name for output directory: '{0}'")]
    InvalidClassName(String),

    /// The static template bundle directory does not exist.
    #[error("Template bundle missing: {}", .0.display())]
    TemplateBundleMissing(PathBuf),

    /// A filesystem operation failed.
    #[error("I/O error at {}: {source}", .path.display())]
    Io {
        /// Path the operation was working on.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
}

impl LayoutError {
    /// Wraps an I/O error with the path it occurred at.
    #[must_use]
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
