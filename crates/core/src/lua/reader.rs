//! Reader for the Lua literal subset the writer produces.
//!
//! Supports a single `name = value` assignment, tables (records and
//! sequences), short strings with the common escapes, long bracket strings,
//! integers, booleans, `nil` and `--` line comments. Tables with both keyed
//! and positional entries are rejected, `{}` reads as an empty sequence.

use super::error::LuaError;
use super::value::LuaValue;

/// Parses `name = value` and returns both parts.
///
/// # Errors
///
/// Returns `Parse` if the input is not a single assignment of a supported literal.
pub fn parse_assignment(source: &str) -> Result<(String, LuaValue), LuaError> {
    let mut parser = Parser::new(source);
    parser.skip_trivia();
    let name = parser
        .identifier()
        .ok_or_else(|| parser.error("expected identifier"))?;
    parser.skip_trivia();
    parser.expect('=')?;
    let value = parser.value()?;
    parser.finish()?;
    Ok((name, value))
}

/// Parses a bare literal.
///
/// # Errors
///
/// Returns `Parse` if the input is not a supported literal.
pub fn parse_value(source: &str) -> Result<LuaValue, LuaError> {
    let mut parser = Parser::new(source);
    let value = parser.value()?;
    parser.finish()?;
    Ok(value)
}

struct Parser {
    chars: Vec<char>,
    pos: usize,
}

impl Parser {
    fn new(source: &str) -> Self {
        Self {
            chars: source.chars().collect(),
            pos: 0,
        }
    }

    fn error(&self, message: impl Into<String>) -> LuaError {
        LuaError::parse(self.pos, message)
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        Some(c)
    }

    fn expect(&mut self, expected: char) -> Result<(), LuaError> {
        match self.bump() {
            Some(c) if c == expected => Ok(()),
            Some(c) => {
                self.pos -= 1;
                Err(self.error(format!("expected '{expected}', found '{c}'")))
            }
            None => Err(self.error(format!("expected '{expected}', found end of input"))),
        }
    }

    fn finish(&mut self) -> Result<(), LuaError> {
        self.skip_trivia();
        match self.peek() {
            None => Ok(()),
            Some(c) => Err(self.error(format!("unexpected '{c}' after value"))),
        }
    }

    fn skip_trivia(&mut self) {
        loop {
            while self.peek().is_some_and(char::is_whitespace) {
                self.pos += 1;
            }
            if self.peek() == Some('-') && self.peek_at(1) == Some('-') {
                while self.peek().is_some_and(|c| c != '\n') {
                    self.pos += 1;
                }
            } else {
                break;
            }
        }
    }

    fn identifier(&mut self) -> Option<String> {
        let first = self.peek()?;
        if !(first.is_ascii_alphabetic() || first == '_') {
            return None;
        }
        let start = self.pos;
        while self
            .peek()
            .is_some_and(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            self.pos += 1;
        }
        Some(self.chars[start..self.pos].iter().collect())
    }

    fn value(&mut self) -> Result<LuaValue, LuaError> {
        self.skip_trivia();
        match self.peek() {
            Some('{') => self.table(),
            Some('\'' | '"') => self.short_string().map(LuaValue::String),
            Some('[') => self.long_string().map(LuaValue::String),
            Some(c) if c == '-' || c.is_ascii_digit() => self.integer(),
            Some(c) if c.is_ascii_alphabetic() || c == '_' => {
                let start = self.pos;
                let word = self.identifier().unwrap_or_default();
                match word.as_str() {
                    "nil" => Ok(LuaValue::Nil),
                    "true" => Ok(LuaValue::Bool(true)),
                    "false" => Ok(LuaValue::Bool(false)),
                    _ => Err(LuaError::parse(start, format!("unexpected name '{word}'"))),
                }
            }
            Some(c) => Err(self.error(format!("unexpected '{c}'"))),
            None => Err(self.error("unexpected end of input")),
        }
    }

    fn integer(&mut self) -> Result<LuaValue, LuaError> {
        let start = self.pos;
        if self.peek() == Some('-') {
            self.pos += 1;
        }
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.pos += 1;
        }
        if self
            .peek()
            .is_some_and(|c| c == '.' || c == 'e' || c == 'E' || c == 'x')
        {
            return Err(self.error("only integer literals are supported"));
        }
        let text: String = self.chars[start..self.pos].iter().collect();
        text.parse()
            .map(LuaValue::Integer)
            .map_err(|_| LuaError::parse(start, format!("invalid integer '{text}'")))
    }

    fn short_string(&mut self) -> Result<String, LuaError> {
        let quote = self.bump().ok_or_else(|| self.error("expected string"))?;
        let mut out = String::new();
        loop {
            match self.bump() {
                None | Some('\n' | '\r') => return Err(self.error("unfinished string")),
                Some(c) if c == quote => return Ok(out),
                Some('\\') => self.escape(&mut out)?,
                Some(c) => out.push(c),
            }
        }
    }

    fn escape(&mut self, out: &mut String) -> Result<(), LuaError> {
        let c = self.bump().ok_or_else(|| self.error("unfinished escape"))?;
        match c {
            'n' | '\n' => out.push('\n'),
            't' => out.push('\t'),
            'r' => out.push('\r'),
            'a' => out.push('\u{7}'),
            'b' => out.push('\u{8}'),
            'f' => out.push('\u{c}'),
            'v' => out.push('\u{b}'),
            '\\' | '\'' | '"' => out.push(c),
            d if d.is_ascii_digit() => {
                let mut code = d.to_digit(10).unwrap_or(0);
                for _ in 0..2 {
                    match self.peek().and_then(|next| next.to_digit(10)) {
                        Some(digit) => {
                            code = code * 10 + digit;
                            self.pos += 1;
                        }
                        None => break,
                    }
                }
                let decoded = u8::try_from(code)
                    .map_err(|_| self.error("decimal escape too large"))?;
                out.push(char::from(decoded));
            }
            other => return Err(self.error(format!("invalid escape '\\{other}'"))),
        }
        Ok(())
    }

    /// Counts `=` after a `[` at the cursor and returns the level if a second `[` follows.
    fn long_open_level(&self) -> Option<usize> {
        let mut level = 0;
        while self.peek_at(1 + level) == Some('=') {
            level += 1;
        }
        (self.peek_at(1 + level) == Some('[')).then_some(level)
    }

    fn long_string(&mut self) -> Result<String, LuaError> {
        let level = self
            .long_open_level()
            .ok_or_else(|| self.error("invalid long string delimiter"))?;
        self.pos += level + 2;

        // a line break directly after the opening bracket is not part of the string
        self.skip_line_break();

        let mut out = String::new();
        loop {
            match self.peek() {
                None => return Err(self.error("unfinished long string")),
                Some(']') if self.closes_long(level) => {
                    self.pos += level + 2;
                    return Ok(out);
                }
                Some('\n' | '\r') => {
                    self.skip_line_break();
                    out.push('\n');
                }
                Some(c) => {
                    out.push(c);
                    self.pos += 1;
                }
            }
        }
    }

    fn closes_long(&self, level: usize) -> bool {
        (1..=level).all(|i| self.peek_at(i) == Some('='))
            && self.peek_at(level + 1) == Some(']')
    }

    /// Consumes `\n`, `\r`, `\r\n` or `\n\r` as one line break.
    fn skip_line_break(&mut self) -> bool {
        let Some(first) = self.peek().filter(|c| *c == '\n' || *c == '\r') else {
            return false;
        };
        self.pos += 1;
        if self
            .peek()
            .is_some_and(|second| (second == '\n' || second == '\r') && second != first)
        {
            self.pos += 1;
        }
        true
    }

    fn table(&mut self) -> Result<LuaValue, LuaError> {
        self.expect('{')?;
        let mut keyed: Vec<(String, LuaValue)> = Vec::new();
        let mut positional: Vec<LuaValue> = Vec::new();

        loop {
            self.skip_trivia();
            if self.peek() == Some('}') {
                self.pos += 1;
                break;
            }

            let start = self.pos;
            if let Some(key) = self.field_key()? {
                keyed.push((key, self.value()?));
            } else {
                self.pos = start;
                positional.push(self.value()?);
            }

            self.skip_trivia();
            match self.peek() {
                Some(',' | ';') => self.pos += 1,
                Some('}') => {}
                Some(c) => return Err(self.error(format!("expected ',' or '}}', found '{c}'"))),
                None => return Err(self.error("unfinished table")),
            }
        }

        match (keyed.is_empty(), positional.is_empty()) {
            (true, _) => Ok(LuaValue::Array(positional)),
            (false, true) => Ok(LuaValue::Table(keyed)),
            (false, false) => Err(self.error("mixed keyed and positional table entries")),
        }
    }

    /// Reads `name =` or `[ 'key' ] =`. Returns `None` (without guaranteeing the
    /// cursor) when the entry is positional.
    fn field_key(&mut self) -> Result<Option<String>, LuaError> {
        if self.peek() == Some('[') && self.long_open_level().is_none() {
            self.pos += 1;
            let key = match self.value()? {
                LuaValue::String(key) => key,
                _ => return Err(self.error("only string keys are supported")),
            };
            self.skip_trivia();
            self.expect(']')?;
            self.skip_trivia();
            self.expect('=')?;
            return Ok(Some(key));
        }

        let Some(name) = self.identifier() else {
            return Ok(None);
        };
        self.skip_trivia();
        if self.peek() == Some('=') && self.peek_at(1) != Some('=') {
            self.pos += 1;
            Ok(Some(name))
        } else {
            Ok(None)
        }
    }
}
