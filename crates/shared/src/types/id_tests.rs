use super::*;
use std::collections::BTreeSet;
use std::str::FromStr;

#[test]
fn test_typed_id_roundtrip() {
    let id = StudentId::new(42);
    assert_eq!(id.into_inner(), 42);
    assert_eq!(StudentId::from(42), id);
}

#[test]
fn test_typed_id_display() {
    assert_eq!(format!("{}", TopicId::new(7)), "7");
}

#[test]
fn test_typed_id_from_str() {
    let id = CompetenceId::from_str(" 12 ").unwrap();
    assert_eq!(id, CompetenceId::new(12));
}

#[test]
fn test_typed_id_from_str_error() {
    assert!(ClassId::from_str("5a").is_err());
}

#[test]
fn test_typed_id_ordering() {
    let ids: BTreeSet<SubjectId> = [3, 1, 2].into_iter().map(SubjectId::new).collect();
    let ordered: Vec<i32> = ids.into_iter().map(SubjectId::into_inner).collect();
    assert_eq!(ordered, vec![1, 2, 3]);
}

#[test]
fn test_typed_id_serde_transparent() {
    let json = serde_json::to_string(&StudentId::new(5)).unwrap();
    assert_eq!(json, "5");
}
