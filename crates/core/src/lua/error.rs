//! Lua literal error types.

use thiserror::Error;

/// Errors that can occur while writing or reading Lua literals.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LuaError {
    /// Every long bracket level occurs inside the string.
    #[error("No long bracket level fits a string of {len} bytes")]
    NoBracketLevel {
        /// Length of the offending string.
        len: usize,
    },

    /// An assignment target is not a Lua identifier.
    #[error("Not a Lua identifier: '{0}'")]
    InvalidIdentifier(String),

    /// The input is not a literal of the supported subset.
    #[error("Parse error at offset {offset}: {message}")]
    Parse {
        /// Character offset of the error.
        offset: usize,
        /// What went wrong.
        message: String,
    },
}

impl LuaError {
    /// Creates a parse error.
    #[must_use]
    pub fn parse(offset: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            offset,
            message: message.into(),
        }
    }
}
