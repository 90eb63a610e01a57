//! Template error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading or binding the template.
#[derive(Debug, Error)]
pub enum TemplateError {
    /// The template file does not exist.
    #[error("Template not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The template never references the data file.
    #[error("Template {} does not reference '{placeholder}'", .path.display())]
    PlaceholderMissing {
        /// Template path.
        path: PathBuf,
        /// Expected data-file reference.
        placeholder: String,
    },

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
