#![allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]

use pretty_assertions::assert_eq;

use super::*;

fn person() -> DType {
    let mut rec = DType::empty_record();
    rec.add("Name", DType::Text)
        .unwrap()
        .add("Age", DType::Number)
        .unwrap();
    rec
}

#[test]
fn test_add_keeps_order_and_rejects_duplicates() {
    let mut rec = person();
    assert_eq!(rec.to_string(), "![Name:s, Age:n]");
    assert_eq!(
        rec.add("Name", DType::Text),
        Err(TypeError::DuplicateField("Name".into()))
    );
    assert_eq!(rec, person());
}

#[test]
fn test_add_on_scalar_fails() {
    assert_eq!(
        DType::Text.add("x", DType::Text),
        Err(TypeError::NotAggregate("s".into()))
    );
}

#[test]
fn test_drop() {
    let mut rec = person();
    assert_eq!(rec.drop("Name"), Ok(Field::new("Name", DType::Text)));
    assert_eq!(rec.to_string(), "![Age:n]");
    assert_eq!(
        rec.drop("Name"),
        Err(TypeError::FieldNotFound("Name".into()))
    );
}

#[test]
fn test_tables_hold_row_fields() {
    let mut table = DType::empty_table();
    table.add("Age", DType::Number).unwrap();
    assert_eq!(table.kind(), DKind::Table);
    assert_eq!(table.field("Age"), Some(&DType::Number));
    assert_eq!(table.to_string(), "*[Age:n]");
}

#[test]
fn test_accepts_is_structural_supertype() {
    let mut narrow = DType::empty_record();
    narrow.add("Name", DType::Text).unwrap();
    assert!(narrow.accepts(&person()));
    assert!(!person().accepts(&narrow));
    assert!(!narrow.accepts(&DType::empty_table()));
    assert!(DType::Text.accepts(&DType::Error));
    assert!(!DType::Text.accepts(&DType::Number));
}

#[test]
fn test_coercion_to_text() {
    assert!(DType::Number.coerces_to(&DType::Text));
    assert!(DType::Boolean.coerces_to(&DType::Text));
    assert!(!DType::Text.coerces_to(&DType::Number));
    assert!(!person().coerces_to(&DType::Text));
}

#[test]
fn test_union_merges_fields() {
    let mut a = DType::empty_record();
    a.add("A", DType::Text).unwrap();
    let mut b = DType::empty_record();
    b.add("A", DType::Number).unwrap().add("B", DType::Boolean).unwrap();
    assert_eq!(a.union(&b).to_string(), "![A:e, B:b]");
    assert_eq!(DType::Text.union(&DType::Unknown), DType::Text);
    assert_eq!(DType::Text.union(&DType::Number), DType::Error);
}
