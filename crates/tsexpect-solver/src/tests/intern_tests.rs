use super::*;

#[test]
fn test_interner_intrinsics() {
    let interner = TypeInterner::new();

    assert_eq!(
        interner.lookup(TypeId::STRING),
        Some(TypeKey::Intrinsic(IntrinsicKind::String))
    );
    assert_eq!(
        interner.lookup(TypeId::BOOLEAN_TRUE),
        Some(TypeKey::Literal(LiteralValue::Boolean(true)))
    );
    assert_eq!(interner.literal_boolean(false), TypeId::BOOLEAN_FALSE);
    assert!(interner.is_empty());
}

#[test]
fn test_interner_deduplication() {
    let interner = TypeInterner::new();

    let id1 = interner.literal_string("hello");
    let id2 = interner.literal_string("hello");
    let id3 = interner.literal_string("world");

    assert_eq!(id1, id2);
    assert_ne!(id1, id3);
    assert!(!id1.is_intrinsic());
}

#[test]
fn test_interner_bigint_literal() {
    let interner = TypeInterner::new();

    let id = interner.literal_bigint("123");
    let key = interner
        .lookup(id)
        .expect("bigint literal should be interned");

    match key {
        TypeKey::Literal(LiteralValue::BigInt(atom)) => {
            assert_eq!(&*interner.resolve_atom(atom), "123");
        }
        _ => panic!("Expected bigint literal, got {key:?}"),
    }
}

#[test]
fn test_interner_union_normalization() {
    let interner = TypeInterner::new();

    assert_eq!(interner.union(vec![TypeId::STRING]), TypeId::STRING);
    assert_eq!(interner.union(vec![]), TypeId::NEVER);
    assert_eq!(
        interner.union(vec![TypeId::STRING, TypeId::ANY]),
        TypeId::ANY
    );
    assert_eq!(
        interner.union(vec![TypeId::STRING, TypeId::UNKNOWN]),
        TypeId::UNKNOWN
    );
    assert_eq!(
        interner.union(vec![TypeId::STRING, TypeId::NEVER]),
        TypeId::STRING
    );

    let ab = interner.union(vec![TypeId::STRING, TypeId::NUMBER]);
    let ba = interner.union(vec![TypeId::NUMBER, TypeId::STRING, TypeId::NUMBER]);
    assert_eq!(ab, ba);
}

#[test]
fn test_union_flattens_nested_unions() {
    let interner = TypeInterner::new();

    let inner = interner.union2(TypeId::STRING, TypeId::NULL);
    let outer = interner.union2(inner, TypeId::NUMBER);
    let flat = interner.union(vec![TypeId::NULL, TypeId::NUMBER, TypeId::STRING]);
    assert_eq!(outer, flat);
    assert_eq!(interner.union_members(outer).len(), 3);
}

#[test]
fn test_union_absorbs_literals_into_primitives() {
    let interner = TypeInterner::new();

    let hello = interner.literal_string("hello");
    let one = interner.literal_number(1.0);
    assert_eq!(interner.union2(hello, TypeId::STRING), TypeId::STRING);

    let mixed = interner.union(vec![hello, one, TypeId::NUMBER]);
    assert_eq!(mixed, interner.union2(hello, TypeId::NUMBER));
}

#[test]
fn test_true_or_false_is_boolean() {
    let interner = TypeInterner::new();

    let t = interner.literal_boolean(true);
    let f = interner.literal_boolean(false);
    assert_eq!(interner.union2(t, f), TypeId::BOOLEAN);
    assert_eq!(interner.union2(t, TypeId::BOOLEAN), TypeId::BOOLEAN);

    let with_null = interner.union(vec![t, TypeId::NULL, f]);
    assert_eq!(with_null, interner.union2(TypeId::BOOLEAN, TypeId::NULL));
}

#[test]
fn test_readonly_array_is_distinct() {
    let interner = TypeInterner::new();

    let mutable = interner.array(TypeId::NUMBER);
    let readonly = interner.readonly_array(TypeId::NUMBER);
    assert_ne!(mutable, readonly);
    assert_eq!(
        interner.lookup(readonly),
        Some(TypeKey::ReadonlyType(mutable))
    );
}

#[test]
fn test_object_shapes_are_interned_structurally() {
    let interner = TypeInterner::new();

    let x = interner.intern_string("x");
    let a = interner.object(vec![PropertyInfo::new(x, TypeId::NUMBER)]);
    let b = interner.object(vec![PropertyInfo::new(x, TypeId::NUMBER)]);
    let c = interner.object(vec![PropertyInfo::optional(x, TypeId::NUMBER)]);
    assert_eq!(a, b);
    assert_ne!(a, c);
}

#[test]
fn test_callable_without_properties_is_function() {
    let interner = TypeInterner::new();

    let signature = FunctionShape::new(Vec::new(), TypeId::NUMBER);
    let callable = interner.callable(CallableShape {
        signature: signature.clone(),
        properties: Vec::new(),
    });
    assert_eq!(callable, interner.function(signature));
}

#[test]
fn test_declare_define_resolve() {
    let interner = TypeInterner::new();

    let node = interner.declare("Node");
    assert_eq!(interner.resolve(node), TypeId::UNKNOWN);

    let next = interner.intern_string("next");
    let body = interner.object(vec![PropertyInfo::new(next, node)]);
    assert!(interner.define(node, body));
    assert_eq!(interner.resolve(node), body);
    assert_eq!(interner.declare("Node"), node);
    assert!(!interner.define(TypeId::STRING, body));
}

#[test]
fn test_alias_cycle_resolves_to_unknown() {
    let interner = TypeInterner::new();

    let a = interner.declare("A");
    let b = interner.declare("B");
    interner.define(a, b);
    interner.define(b, a);
    assert_eq!(interner.resolve(a), TypeId::UNKNOWN);
}

#[test]
fn test_union_looks_through_named_members() {
    let interner = TypeInterner::new();

    let nothing = interner.declare("Nothing");
    interner.define(nothing, TypeId::NEVER);
    assert_eq!(interner.union2(nothing, TypeId::STRING), TypeId::STRING);

    let anything = interner.declare("Anything");
    interner.define(anything, TypeId::ANY);
    assert_eq!(interner.union2(anything, TypeId::UNDEFINED), TypeId::ANY);

    let maybe = interner.declare("Maybe");
    interner.define(maybe, interner.union2(TypeId::STRING, TypeId::NULL));
    assert_eq!(
        interner.union2(maybe, TypeId::NUMBER),
        interner.union(vec![TypeId::STRING, TypeId::NULL, TypeId::NUMBER])
    );

    // Named object types stay named inside the union.
    let node = interner.declare("Node");
    let next = interner.intern_string("next");
    interner.define(node, interner.object(vec![PropertyInfo::new(next, node)]));
    let nullable_node = interner.union2(node, TypeId::NULL);
    assert_eq!(interner.union_members(nullable_node).as_slice(), &[TypeId::NULL, node]);
}

#[test]
fn test_union_with_later_defined_member_is_refreshed_on_resolve() {
    let interner = TypeInterner::new();

    let nothing = interner.declare("Nothing");
    let built_early = interner.union2(nothing, TypeId::STRING);
    assert_ne!(built_early, TypeId::STRING);

    interner.define(nothing, TypeId::NEVER);
    assert_eq!(interner.resolve(built_early), TypeId::STRING);

    let cyclic = interner.declare("Cyclic");
    let body = interner.union2(cyclic, TypeId::STRING);
    interner.define(cyclic, body);
    assert_eq!(interner.resolve(cyclic), body);
}
