//! Property-based tests for the Lua literal writer and reader.

use proptest::prelude::*;

use super::reader::{parse_assignment, parse_value};
use super::value::{LuaValue, normalize_grade};
use super::writer::{to_assignment, to_literal};

/// Text without carriage returns, biased towards quoting hazards.
fn hazardous_text() -> impl Strategy<Value = String> {
    let pieces = prop_oneof![
        Just("\n".to_string()),
        Just("'".to_string()),
        Just("\\".to_string()),
        Just("]]".to_string()),
        Just("]".to_string()),
        Just("[[".to_string()),
        Just("]=]".to_string()),
        Just("[==[".to_string()),
        Just("=".to_string()),
        Just("\"".to_string()),
        Just("--".to_string()),
        "[a-zA-Z0-9 äöüß]{0,6}",
        "[^\r]{0,4}",
    ];
    prop::collection::vec(pieces, 0..12).prop_map(|parts| parts.concat())
}

fn lua_value() -> impl Strategy<Value = LuaValue> {
    let leaf = prop_oneof![
        Just(LuaValue::Nil),
        any::<bool>().prop_map(LuaValue::Bool),
        any::<i64>().prop_map(LuaValue::Integer),
        hazardous_text().prop_map(LuaValue::String),
    ];
    leaf.prop_recursive(3, 32, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..5).prop_map(LuaValue::Array),
            prop::collection::vec(("[a-z_][a-z0-9_]{0,8}|[ -~]{1,6}", inner), 1..5)
                .prop_map(|entries| {
                    // keys of a record are unique
                    let mut seen = std::collections::HashSet::new();
                    LuaValue::Table(
                        entries
                            .into_iter()
                            .filter(|(key, _)| seen.insert(key.clone()))
                            .collect(),
                    )
                }),
        ]
    })
}

proptest! {
    /// Any string without carriage returns survives write and re-read unchanged.
    #[test]
    fn test_string_round_trip(text in hazardous_text()) {
        let literal = to_literal(&LuaValue::String(text.clone())).unwrap();
        prop_assert_eq!(parse_value(&literal).unwrap(), LuaValue::String(text));
    }

    /// Nested documents keep structure, order and content.
    #[test]
    fn test_document_round_trip(value in lua_value()) {
        let source = to_assignment("student", &value).unwrap();
        let (name, parsed) = parse_assignment(&source).unwrap();
        prop_assert_eq!(name, "student");
        prop_assert_eq!(parsed, value);
    }

    /// Integers 0..=9 written in any decimal form normalize to the integer.
    #[test]
    fn test_grade_normalizes_small_integers(
        grade in 0i64..=9,
        zeros in 0usize..3,
        comma in any::<bool>(),
        padding in "[ \t]{0,2}",
    ) {
        let separator = if comma { "," } else { "." };
        let raw = if zeros == 0 {
            format!("{padding}{grade}{padding}")
        } else {
            format!("{padding}{grade}{separator}{}{padding}", "0".repeat(zeros))
        };
        prop_assert_eq!(normalize_grade(&raw), LuaValue::Integer(grade));
    }

    /// Text that is not a small integer is kept, trimmed.
    #[test]
    fn test_grade_keeps_other_text(text in "[a-z ]{1,10}") {
        prop_assert_eq!(normalize_grade(&text), LuaValue::String(text.trim().to_string()));
    }
}

mod unit_tests {
    use super::*;
    use crate::lua::LuaError;
    use rstest::rstest;

    #[rstest]
    #[case("1,0", LuaValue::Integer(1))]
    #[case("2.00", LuaValue::Integer(2))]
    #[case(" 3 ", LuaValue::Integer(3))]
    #[case("0", LuaValue::Integer(0))]
    #[case("-0", LuaValue::Integer(0))]
    #[case("+4", LuaValue::Integer(4))]
    #[case("09", LuaValue::Integer(9))]
    #[case(".0", LuaValue::Integer(0))]
    #[case("5.", LuaValue::Integer(5))]
    #[case("10", LuaValue::String("10".to_string()))]
    #[case("2,5", LuaValue::String("2,5".to_string()))]
    #[case("-1", LuaValue::String("-1".to_string()))]
    #[case("1e0", LuaValue::String("1e0".to_string()))]
    #[case(" sehr gut ", LuaValue::String("sehr gut".to_string()))]
    #[case("", LuaValue::String(String::new()))]
    #[case(".", LuaValue::String(".".to_string()))]
    fn test_normalize_grade(#[case] raw: &str, #[case] expected: LuaValue) {
        assert_eq!(normalize_grade(raw), expected);
    }

    #[test]
    fn test_leading_newline_survives() {
        let text = "\n\nzwei Leerzeilen";
        let literal = to_literal(&LuaValue::from(text)).unwrap();
        assert_eq!(parse_value(&literal).unwrap(), LuaValue::from(text));
    }

    #[test]
    fn test_reader_folds_carriage_returns_in_long_strings() {
        let parsed = parse_value("[[\r\na\r\nb\rc]]").unwrap();
        assert_eq!(parsed, LuaValue::from("a\nb\nc"));
    }

    #[test]
    fn test_reader_escapes_and_comments() {
        let source = "-- generated\nstudent = { name = \"O\\'Neil\\n\", code = '\\65', n = -3 }\n";
        let (name, value) = parse_assignment(source).unwrap();
        assert_eq!(name, "student");
        assert_eq!(value.get("name").and_then(LuaValue::as_str), Some("O'Neil\n"));
        assert_eq!(value.get("code").and_then(LuaValue::as_str), Some("A"));
        assert_eq!(value.get("n"), Some(&LuaValue::Integer(-3)));
    }

    #[test]
    fn test_reader_rejects_invalid_input() {
        assert!(matches!(parse_value("{ a = 1, 2 }"), Err(LuaError::Parse { .. })));
        assert!(matches!(parse_value("'unterminated"), Err(LuaError::Parse { .. })));
        assert!(matches!(parse_value("1.5"), Err(LuaError::Parse { .. })));
        assert!(matches!(parse_value("{ x = 1 } y"), Err(LuaError::Parse { .. })));
        assert!(matches!(parse_value("[=[ open ]]"), Err(LuaError::Parse { .. })));
        assert!(matches!(parse_value("print"), Err(LuaError::Parse { .. })));
    }

    #[test]
    fn test_empty_table_reads_as_sequence() {
        assert_eq!(parse_value("{}").unwrap(), LuaValue::Array(vec![]));
        assert_eq!(to_literal(&LuaValue::Table(vec![])).unwrap(), "{}");
    }
}
