//! Lua table literals for the typesetting pipeline.
//!
//! The report template loads one data file per student, a single assignment
//! `student = { ... }`. This module builds such literals from a [`LuaValue`]
//! tree and reads them back.
//!
//! Quoting rules:
//! - plain strings are written as `'...'` without any escapes
//! - strings containing a line break, `\`, `'` or `]]` are written as long
//!   brackets `[==[ ... ]==]`, with the shortest level (0 to 8) the string
//!   cannot terminate early
//!
//! Long brackets fold `\r\n` into `\n` when Lua reads them, so only text with
//! normalized line endings survives a round trip unchanged.

pub mod error;
pub mod reader;
pub mod value;
pub mod writer;

#[cfg(test)]
mod tests;

pub use error::LuaError;
pub use reader::{parse_assignment, parse_value};
pub use value::{LuaValue, normalize_grade};
pub use writer::{LONG_BRACKET_LEVELS, long_bracket_level, to_assignment, to_literal};
