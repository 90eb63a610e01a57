//! Lua value tree.

/// A value of the Lua literal subset used for report data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LuaValue {
    /// `nil`
    Nil,
    /// `true` / `false`
    Bool(bool),
    /// Integer literal.
    Integer(i64),
    /// String literal.
    String(String),
    /// Sequence `{ a, b, ... }`.
    Array(Vec<LuaValue>),
    /// Record `{ key = value, ... }` in insertion order.
    Table(Vec<(String, LuaValue)>),
}

impl LuaValue {
    /// Builds a record from key/value pairs, keeping their order.
    pub fn table<K: Into<String>>(entries: impl IntoIterator<Item = (K, LuaValue)>) -> Self {
        Self::Table(
            entries
                .into_iter()
                .map(|(key, value)| (key.into(), value))
                .collect(),
        )
    }

    /// Builds a sequence.
    pub fn array(items: impl IntoIterator<Item = LuaValue>) -> Self {
        Self::Array(items.into_iter().collect())
    }

    /// Looks up a key of a record.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&LuaValue> {
        match self {
            Self::Table(entries) => entries
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, value)| value),
            _ => None,
        }
    }

    /// Returns the string content, if this is a string.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the elements, if this is a sequence.
    #[must_use]
    pub fn as_array(&self) -> Option<&[LuaValue]> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }
}

impl From<&str> for LuaValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for LuaValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<bool> for LuaValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for LuaValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<u32> for LuaValue {
    fn from(value: u32) -> Self {
        Self::Integer(i64::from(value))
    }
}

/// Normalizes a grade (or short level code) for the template.
///
/// Numeric text equal to an integer between 0 and 9 becomes a bare integer:
/// `"1"`, `"1,0"`, `"2.00"` and `" 3 "` give 1, 1, 2 and 3. Anything else is
/// kept as trimmed text (`"2,5"`, `"sehr gut"`, `""`).
#[must_use]
pub fn normalize_grade(raw: &str) -> LuaValue {
    let trimmed = raw.trim();
    match integer_grade(trimmed) {
        Some(grade) => LuaValue::Integer(grade),
        None => LuaValue::String(trimmed.to_string()),
    }
}

fn integer_grade(text: &str) -> Option<i64> {
    let (negative, number) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };

    let (whole, fraction) = match number.split_once(['.', ',']) {
        Some((whole, fraction)) => (whole, fraction),
        None => (number, ""),
    };
    if whole.is_empty() && fraction.is_empty() {
        return None;
    }
    if !whole.bytes().all(|b| b.is_ascii_digit()) || !fraction.bytes().all(|b| b == b'0') {
        return None;
    }

    let digits = whole.trim_start_matches('0');
    let value: i64 = if digits.is_empty() {
        0
    } else if digits.len() > 1 {
        return None;
    } else {
        i64::from(digits.as_bytes()[0] - b'0')
    };

    if negative && value != 0 {
        return None;
    }
    Some(value)
}
