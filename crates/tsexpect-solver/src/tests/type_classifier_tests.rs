use super::*;
use crate::test_utils::{function, object, optional_prop, prop, readonly_prop, record};

#[test]
fn test_is_empty_object() {
    let db = TypeInterner::new();
    let one = db.literal_number(1.0);

    assert!(is_empty_object(&db, db.empty_object()));
    assert!(!is_empty_object(&db, object(&db, &[("a", one)])));
    assert!(!is_empty_object(&db, record(&db, TypeId::UNKNOWN)));
    assert!(!is_empty_object(&db, function(&db, &[], one)));

    assert!(is_empty_object(&db, TypeId::OBJECT));
    assert!(!is_empty_object(&db, TypeId::ANY));
    assert!(!is_empty_object(&db, TypeId::NEVER));
    assert!(!is_empty_object(&db, TypeId::STRING));
    assert!(!is_empty_object(&db, db.empty_tuple()));
    assert!(!is_empty_object(&db, db.array(TypeId::NUMBER)));
}

#[test]
fn test_special_type_checks() {
    let db = TypeInterner::new();
    assert!(is_never(&db, TypeId::NEVER));
    assert!(is_any(&db, TypeId::ANY));
    assert!(is_unknown(&db, TypeId::UNKNOWN));
    assert!(is_never_or_any(&db, TypeId::NEVER));
    assert!(is_never_or_any(&db, TypeId::ANY));
    assert!(!is_never_or_any(&db, TypeId::UNKNOWN));
    assert!(!is_any(&db, TypeId::UNKNOWN));

    // Named types are resolved before the check.
    let alias = db.declare("AlsoNever");
    db.define(alias, TypeId::NEVER);
    assert!(is_never(&db, alias));
}

#[test]
fn test_classification_precedence() {
    let db = TypeInterner::new();
    let hello = db.literal_string("hello");

    assert_eq!(classify_type(&db, TypeId::UNKNOWN), TypeCategory::Unknown);
    assert_eq!(classify_type(&db, TypeId::NEVER), TypeCategory::Never);
    assert_eq!(classify_type(&db, TypeId::ANY), TypeCategory::Any);
    assert_eq!(
        classify_type(&db, TypeId::STRING),
        TypeCategory::String { literal: false }
    );
    assert_eq!(
        classify_type(&db, hello),
        TypeCategory::String { literal: true }
    );
    assert_eq!(
        classify_type(&db, TypeId::BOOLEAN),
        TypeCategory::Boolean { literal: false }
    );
    assert_eq!(
        classify_type(&db, TypeId::BOOLEAN_TRUE),
        TypeCategory::Boolean { literal: true }
    );
    assert_eq!(classify_type(&db, TypeId::NULL), TypeCategory::Null);
    assert_eq!(classify_type(&db, TypeId::VOID), TypeCategory::Void);
    assert_eq!(
        classify_type(&db, function(&db, &[], TypeId::VOID)),
        TypeCategory::Function
    );
    assert_eq!(classify_type(&db, db.empty_tuple()), TypeCategory::EmptyTuple);
    assert_eq!(
        classify_type(&db, db.readonly_tuple(Vec::new())),
        TypeCategory::EmptyTuple
    );
    assert_eq!(classify_type(&db, db.empty_object()), TypeCategory::EmptyObject);
    assert_eq!(
        classify_type(&db, object(&db, &[("a", TypeId::NUMBER)])),
        TypeCategory::Other
    );
    assert_eq!(
        classify_type(&db, db.array(TypeId::NUMBER)),
        TypeCategory::Other
    );
}

#[test]
fn test_union_classification() {
    let db = TypeInterner::new();
    let a = db.literal_string("a");
    let b = db.literal_string("b");
    let one = db.literal_number(1.0);

    assert_eq!(
        classify_type(&db, db.union2(a, b)),
        TypeCategory::String { literal: true }
    );
    assert_eq!(classify_type(&db, db.union2(a, one)), TypeCategory::Other);
    assert_eq!(
        classify_type(&db, db.union2(TypeId::VOID, TypeId::UNDEFINED)),
        TypeCategory::Void
    );
    assert_eq!(
        classify_type(&db, db.union2(TypeId::STRING, TypeId::NULL)),
        TypeCategory::Other
    );
}

#[test]
fn test_key_queries() {
    let db = TypeInterner::new();
    let ty = db.object(vec![
        prop(&db, "required", TypeId::NUMBER),
        optional_prop(&db, "optional", TypeId::NUMBER),
        readonly_prop(&db, "fixed", TypeId::STRING),
    ]);

    let names = |keys: Vec<std::sync::Arc<str>>| -> Vec<String> {
        keys.iter().map(|k| k.to_string()).collect()
    };
    assert_eq!(names(required_keys(&db, ty)), ["required", "fixed"]);
    assert_eq!(names(optional_keys(&db, ty)), ["optional"]);
    assert_eq!(names(readonly_keys(&db, ty)), ["fixed"]);
    assert!(required_keys(&db, TypeId::STRING).is_empty());
}
