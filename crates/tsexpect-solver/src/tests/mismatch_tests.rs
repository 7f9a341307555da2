use super::*;
use crate::test_utils::object;
use crate::types::PropertyInfo;

#[test]
fn test_nested_leaf_difference() {
    let db = TypeInterner::new();
    let one = db.literal_number(1.0);
    let actual = object(&db, &[("a", one), ("b", object(&db, &[("c", TypeId::STRING)]))]);
    let expected = object(&db, &[("a", one), ("b", object(&db, &[("c", TypeId::NUMBER)]))]);

    let info = mismatch_info(&db, actual, expected);
    assert!(!info.is_same());
    assert_eq!(
        info.to_string(),
        "{ a: 1; b: { c: Expected: number, Actual: string } }"
    );
    assert_eq!(info.differences(), vec![("b.c".to_string(), "number", "string")]);
}

#[test]
fn test_primitive_leaf() {
    let db = TypeInterner::new();
    let info = mismatch_info(&db, TypeId::STRING, TypeId::NUMBER);
    assert_eq!(
        info,
        MismatchInfo::Leaf {
            expected: "number".to_string(),
            actual: "string".to_string(),
        }
    );
    assert_eq!(info.to_string(), "Expected: number, Actual: string");
}

#[test]
fn test_any_prints_as_any() {
    let db = TypeInterner::new();
    let info = mismatch_info(&db, TypeId::ANY, TypeId::NUMBER);
    assert_eq!(info.to_string(), "Expected: number, Actual: any");
}

#[test]
fn test_missing_member_is_never() {
    let db = TypeInterner::new();
    let actual = object(&db, &[("a", TypeId::NUMBER)]);
    let expected = object(&db, &[("a", TypeId::NUMBER), ("b", TypeId::STRING)]);

    let info = mismatch_info(&db, actual, expected);
    assert_eq!(
        info.differences(),
        vec![("b".to_string(), "string", "never")]
    );
}

#[test]
fn test_modifier_only_difference_is_a_leaf() {
    let db = TypeInterner::new();
    let a = db.intern_string("a");
    let actual = db.object(vec![PropertyInfo::readonly(a, TypeId::NUMBER)]);
    let expected = object(&db, &[("a", TypeId::NUMBER)]);

    let info = mismatch_info(&db, actual, expected);
    assert!(!info.is_same());
    assert_eq!(
        info.differences(),
        vec![("".to_string(), "{ a: number }", "{ readonly a: number }")]
    );

    let nested = mismatch_info(
        &db,
        object(&db, &[("b", actual)]),
        object(&db, &[("b", expected)]),
    );
    assert_eq!(
        nested.to_string(),
        "{ b: Expected: { a: number }, Actual: { readonly a: number } }"
    );
}

#[test]
fn test_identical_types_are_same() {
    let db = TypeInterner::new();
    let ty = object(&db, &[("a", TypeId::NUMBER)]);
    assert!(mismatch_info(&db, ty, ty).is_same());
    assert!(mismatch_info(&db, TypeId::STRING, TypeId::STRING).is_same());

    let x = db.declare("X");
    db.define(x, object(&db, &[("x", x)]));
    let y = db.declare("Y");
    db.define(y, object(&db, &[("x", y)]));
    assert!(mismatch_info(&db, x, y).is_same());
}

#[test]
fn test_serializes_as_nested_map() {
    let db = TypeInterner::new();
    let actual = object(&db, &[("a", TypeId::STRING), ("b", TypeId::BOOLEAN)]);
    let expected = object(&db, &[("a", TypeId::NUMBER), ("b", TypeId::BOOLEAN)]);

    let json = serde_json::to_value(mismatch_info(&db, actual, expected)).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "a": "Expected: number, Actual: string",
            "b": "boolean",
        })
    );
}
