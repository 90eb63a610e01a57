//! Compilation error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while compiling documents.
#[derive(Debug, Error)]
pub enum CompileError {
    /// The compiler executable could not be started.
    #[error("Failed to start '{program}': {source}")]
    Spawn {
        /// Executable name.
        program: String,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The compiler exited unsuccessfully.
    #[error("Compiling {base_name} failed with {}", status_text(.status))]
    Failed {
        /// Document base name.
        base_name: String,
        /// Exit code, `None` when killed by a signal.
        status: Option<i32>,
        /// Tail of the captured compiler output.
        output: String,
    },

    /// The compiler exceeded its time limit and was killed.
    #[error("Compiling {base_name} timed out after {seconds}s")]
    TimedOut {
        /// Document base name.
        base_name: String,
        /// Configured limit.
        seconds: u64,
    },

    /// The compiler succeeded but the document is missing.
    #[error("Compiler produced no document at {}", .path.display())]
    MissingOutput {
        /// Document base name.
        base_name: String,
        /// Expected document path.
        path: PathBuf,
    },

    /// The cache file could not be read or written.
    #[error("Compile cache error at {}: {source}", .path.display())]
    Cache {
        /// Cache file path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
}

#[allow(clippy::ref_option)]
fn status_text(status: &Option<i32>) -> String {
    status.map_or_else(|| "no exit code".to_string(), |code| format!("exit code {code}"))
}

impl CompileError {
    /// Captured compiler output, if the error carries any.
    #[must_use]
    pub fn output(&self) -> Option<&str> {
        match self {
            Self::Failed { output, .. } => Some(output),
            _ => None,
        }
    }
}
