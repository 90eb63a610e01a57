//! Lua literal writer.

use std::fmt::Write as _;

use super::error::LuaError;
use super::value::LuaValue;

/// Number of long bracket levels tried (`[[`, `[=[`, ... `[========[`).
pub const LONG_BRACKET_LEVELS: usize = 9;

const INDENT: usize = 2;

const KEYWORDS: [&str; 22] = [
    "and", "break", "do", "else", "elseif", "end", "false", "for", "function", "goto", "if",
    "in", "local", "nil", "not", "or", "repeat", "return", "then", "true", "until", "while",
];

/// Writes `name = <literal>` followed by a newline.
///
/// # Errors
///
/// Returns `InvalidIdentifier` if `name` is not a Lua identifier, or
/// `NoBracketLevel` if a string cannot be quoted.
pub fn to_assignment(name: &str, value: &LuaValue) -> Result<String, LuaError> {
    if !is_identifier(name) {
        return Err(LuaError::InvalidIdentifier(name.to_string()));
    }
    let mut out = format!("{name} = ");
    write_value(&mut out, value, 0)?;
    out.push('\n');
    Ok(out)
}

/// Writes a value as a Lua literal.
///
/// # Errors
///
/// Returns `NoBracketLevel` if a string cannot be quoted.
pub fn to_literal(value: &LuaValue) -> Result<String, LuaError> {
    let mut out = String::new();
    write_value(&mut out, value, 0)?;
    Ok(out)
}

/// Picks the long bracket level for `s`.
///
/// A level fits when neither its open nor its close marker occurs in `s` and
/// the close marker appended to `s` is not matched earlier by the string's
/// tail (a trailing `]` followed by `]]` would end the literal one early).
///
/// # Errors
///
/// Returns `NoBracketLevel` if no level below [`LONG_BRACKET_LEVELS`] fits.
pub fn long_bracket_level(s: &str) -> Result<usize, LuaError> {
    (0..LONG_BRACKET_LEVELS)
        .find(|&level| {
            let equals = "=".repeat(level);
            let open = format!("[{equals}[");
            let close = format!("]{equals}]");
            let terminated = format!("{s}{close}");
            !s.contains(&open) && terminated.find(&close) == Some(s.len())
        })
        .ok_or(LuaError::NoBracketLevel { len: s.len() })
}

fn needs_long_form(s: &str) -> bool {
    s.contains(['\n', '\r', '\\', '\'']) || s.contains("]]")
}

fn is_identifier(key: &str) -> bool {
    let mut chars = key.chars();
    let starts_well = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
    starts_well
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        && !KEYWORDS.contains(&key)
}

fn write_string(out: &mut String, s: &str) -> Result<(), LuaError> {
    if !needs_long_form(s) {
        out.push('\'');
        out.push_str(s);
        out.push('\'');
        return Ok(());
    }

    let equals = "=".repeat(long_bracket_level(s)?);
    // Lua drops a newline directly after the opening bracket, so one is always
    // written there and leading newlines of `s` survive.
    let _ = write!(out, "[{equals}[\n{s}]{equals}]");
    Ok(())
}

fn write_key(out: &mut String, key: &str) -> Result<(), LuaError> {
    if is_identifier(key) {
        out.push_str(key);
    } else {
        out.push_str("[ ");
        write_string(out, key)?;
        out.push_str(" ]");
    }
    Ok(())
}

fn write_value(out: &mut String, value: &LuaValue, indent: usize) -> Result<(), LuaError> {
    match value {
        LuaValue::Nil => out.push_str("nil"),
        LuaValue::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        LuaValue::Integer(n) => {
            let _ = write!(out, "{n}");
        }
        LuaValue::String(s) => write_string(out, s)?,
        LuaValue::Array(items) if items.is_empty() => out.push_str("{}"),
        LuaValue::Table(entries) if entries.is_empty() => out.push_str("{}"),
        LuaValue::Array(items) => {
            out.push_str("{\n");
            for item in items {
                pad(out, indent + INDENT);
                write_value(out, item, indent + INDENT)?;
                out.push_str(",\n");
            }
            pad(out, indent);
            out.push('}');
        }
        LuaValue::Table(entries) => {
            out.push_str("{\n");
            for (key, item) in entries {
                pad(out, indent + INDENT);
                write_key(out, key)?;
                out.push_str(" = ");
                write_value(out, item, indent + INDENT)?;
                out.push_str(",\n");
            }
            pad(out, indent);
            out.push('}');
        }
    }
    Ok(())
}

fn pad(out: &mut String, width: usize) {
    out.extend(std::iter::repeat_n(' ', width));
}
