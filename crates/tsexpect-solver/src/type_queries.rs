//! Structural extraction helpers.
//!
//! Every helper resolves `Lazy` references before inspecting the type, so
//! callers can pass named types directly.
//!
//! ## Available Extractors
//!
//! - Unions: get_union_members, map_union_members
//! - Objects: get_object_shape, get_property_type, has_property
//! - Arrays and tuples: get_array_element_type, get_tuple_elements, get_item_type
//! - Signatures: get_signature, get_parameters_tuple, get_constructor_parameters,
//!   get_instance_type, get_return_type, get_this_type, get_guard_type, get_asserts_type
//! - Promises: get_resolved_type
//! - Members for diffs: own_members, member_type

use crate::intern::TypeInterner;
use crate::relation::extends;
use crate::types::*;
use std::fmt;
use std::sync::Arc;
use tsexpect_common::Atom;

/// Get the members of a union type.
///
/// Returns None if the type is not a union.
pub fn get_union_members(db: &TypeInterner, type_id: TypeId) -> Option<Vec<TypeId>> {
    match db.lookup(db.resolve(type_id)) {
        Some(TypeKey::Union(list_id)) => Some(db.type_list(list_id).to_vec()),
        _ => None,
    }
}

/// Apply `f` to every member of a union and rebuild the union.
/// Non-unions are mapped directly. Named members reach `f` unresolved.
pub fn map_union_members(
    db: &TypeInterner,
    type_id: TypeId,
    mut f: impl FnMut(TypeId) -> TypeId,
) -> TypeId {
    match get_union_members(db, type_id) {
        Some(members) => {
            let mapped: Vec<TypeId> = members.into_iter().map(&mut f).collect();
            db.union(mapped)
        }
        None => f(type_id),
    }
}

/// Get the object shape of an object type, or the data properties of an
/// augmented callable.
pub fn get_object_shape(db: &TypeInterner, type_id: TypeId) -> Option<Arc<ObjectShape>> {
    match db.lookup(db.resolve(type_id)) {
        Some(TypeKey::Object(shape_id)) => Some(db.object_shape(shape_id)),
        Some(TypeKey::Callable(shape_id)) => {
            let callable = db.callable_shape(shape_id);
            Some(Arc::new(ObjectShape {
                properties: callable.properties.clone(),
                string_index: None,
                number_index: None,
            }))
        }
        _ => None,
    }
}

/// Get the element type of an array, looking through `readonly`.
pub fn get_array_element_type(db: &TypeInterner, type_id: TypeId) -> Option<TypeId> {
    match db.lookup(db.resolve(type_id)) {
        Some(TypeKey::Array(element)) => Some(element),
        Some(TypeKey::ReadonlyType(inner)) => match db.lookup(inner) {
            Some(TypeKey::Array(element)) => Some(element),
            _ => None,
        },
        _ => None,
    }
}

/// Get the elements of a tuple type, looking through `readonly`.
pub fn get_tuple_elements(db: &TypeInterner, type_id: TypeId) -> Option<Arc<[TupleElement]>> {
    match db.lookup(db.resolve(type_id)) {
        Some(TypeKey::Tuple(list_id)) => Some(db.tuple_list(list_id)),
        Some(TypeKey::ReadonlyType(inner)) => match db.lookup(inner) {
            Some(TypeKey::Tuple(list_id)) => Some(db.tuple_list(list_id)),
            _ => None,
        },
        _ => None,
    }
}

/// The type a tuple element contributes when read: rest elements are
/// unwrapped to their array element type and optional elements include
/// `undefined`.
pub fn tuple_element_read_type(db: &TypeInterner, element: &TupleElement) -> TypeId {
    let type_id = if element.rest {
        get_array_element_type(db, element.type_id).unwrap_or(element.type_id)
    } else {
        element.type_id
    };
    if element.optional {
        db.union2(type_id, TypeId::UNDEFINED)
    } else {
        type_id
    }
}

/// The type of reading property `name`.
///
/// Optional properties include `undefined`. For unions every member must
/// declare the property; the result is the union of the member types.
pub fn get_property_type(db: &TypeInterner, type_id: TypeId, name: &str) -> Option<TypeId> {
    let resolved = db.resolve(type_id);
    if resolved.is_any() {
        return Some(TypeId::ANY);
    }
    if let Some(members) = get_union_members(db, resolved) {
        let mut types = Vec::with_capacity(members.len());
        for member in members {
            types.push(get_property_type(db, member, name)?);
        }
        return Some(db.union(types));
    }

    if let Some(elements) = get_tuple_elements(db, resolved) {
        return tuple_property_type(db, &elements, name);
    }
    if let Some(element) = get_array_element_type(db, resolved) {
        return match name {
            "length" => Some(TypeId::NUMBER),
            _ if is_numeric_property_name(name) => Some(element),
            _ => None,
        };
    }

    let atom = db.intern_string(name);
    let shape = get_object_shape(db, resolved)?;
    if let Some(prop) = shape.property(atom) {
        return Some(if prop.optional {
            db.union2(prop.type_id, TypeId::UNDEFINED)
        } else {
            prop.type_id
        });
    }
    if is_numeric_property_name(name)
        && let Some(index) = &shape.number_index
    {
        return Some(index.value_type);
    }
    shape.string_index.as_ref().map(|index| index.value_type)
}

fn tuple_property_type(db: &TypeInterner, elements: &[TupleElement], name: &str) -> Option<TypeId> {
    if name == "length" {
        return Some(TypeId::NUMBER);
    }
    let index = name.parse::<usize>().ok()?;
    match elements.get(index) {
        Some(element) if !element.rest => Some(tuple_element_read_type(db, element)),
        _ => elements
            .iter()
            .find(|element| element.rest)
            .map(|element| tuple_element_read_type(db, element)),
    }
}

/// True if `keyof T` includes `name`.
pub fn has_property(db: &TypeInterner, type_id: TypeId, name: &str) -> bool {
    let resolved = db.resolve(type_id);
    if resolved.is_any() {
        return true;
    }
    if let Some(members) = get_union_members(db, resolved) {
        return members.into_iter().all(|member| has_property(db, member, name));
    }
    if let Some(shape) = get_object_shape(db, resolved) {
        let atom = db.intern_string(name);
        return shape.property(atom).is_some()
            || shape.string_index.is_some()
            || (shape.number_index.is_some() && is_numeric_property_name(name));
    }
    if let Some(elements) = get_tuple_elements(db, resolved) {
        return name
            .parse::<usize>()
            .is_ok_and(|index| index < elements.len() || elements.iter().any(|e| e.rest))
            || name == "length";
    }
    if get_array_element_type(db, resolved).is_some() {
        return is_numeric_property_name(name) || name == "length";
    }
    false
}

/// Numeric-looking names are matched by number index signatures.
pub fn is_numeric_property_name(name: &str) -> bool {
    !name.is_empty() && name.parse::<f64>().is_ok_and(|value| value.is_finite())
}

/// The call or construct signature of a function or augmented callable.
pub fn get_signature(db: &TypeInterner, type_id: TypeId) -> Option<FunctionShape> {
    match db.lookup(db.resolve(type_id)) {
        Some(TypeKey::Function(shape_id)) => Some(db.function_shape(shape_id).as_ref().clone()),
        Some(TypeKey::Callable(shape_id)) => Some(db.callable_shape(shape_id).signature.clone()),
        _ => None,
    }
}

fn get_call_signature(db: &TypeInterner, type_id: TypeId) -> Option<FunctionShape> {
    get_signature(db, type_id).filter(|shape| !shape.is_constructor)
}

fn get_construct_signature(db: &TypeInterner, type_id: TypeId) -> Option<FunctionShape> {
    get_signature(db, type_id).filter(|shape| shape.is_constructor)
}

/// Parameters of a signature as a tuple type, names and modifiers preserved.
pub fn params_tuple(db: &TypeInterner, shape: &FunctionShape) -> TypeId {
    let elements = shape
        .params
        .iter()
        .map(|param| TupleElement {
            type_id: param.type_id,
            name: param.name,
            optional: param.optional,
            rest: param.rest,
        })
        .collect();
    db.tuple(elements)
}

/// `Parameters<T>`: the parameter tuple of a call signature.
pub fn get_parameters_tuple(db: &TypeInterner, type_id: TypeId) -> Option<TypeId> {
    get_call_signature(db, type_id).map(|shape| params_tuple(db, &shape))
}

/// `ConstructorParameters<T>`, widened with `[]` when the type can also be
/// constructed without arguments.
pub fn get_constructor_parameters(db: &TypeInterner, type_id: TypeId) -> Option<TypeId> {
    let shape = get_construct_signature(db, type_id)?;
    let params = params_tuple(db, &shape);
    if shape.required_param_count() == 0 {
        Some(db.union2(params, db.empty_tuple()))
    } else {
        Some(params)
    }
}

/// `InstanceType<T>`.
pub fn get_instance_type(db: &TypeInterner, type_id: TypeId) -> Option<TypeId> {
    get_construct_signature(db, type_id).map(|shape| shape.return_type)
}

/// `ReturnType<T>`.
pub fn get_return_type(db: &TypeInterner, type_id: TypeId) -> Option<TypeId> {
    get_call_signature(db, type_id).map(|shape| shape.return_type)
}

/// `ThisParameterType<T>`: `unknown` when no `this` is declared.
pub fn get_this_type(db: &TypeInterner, type_id: TypeId) -> Option<TypeId> {
    get_call_signature(db, type_id).map(|shape| shape.this_type.unwrap_or(TypeId::UNKNOWN))
}

/// The narrowed type of a `x is T` predicate.
pub fn get_guard_type(db: &TypeInterner, type_id: TypeId) -> Option<TypeId> {
    let predicate = get_call_signature(db, type_id)?.type_predicate?;
    if predicate.asserts {
        return None;
    }
    predicate.type_id
}

/// The narrowed type of an `asserts x is T` predicate.
///
/// A narrowed type of `unknown` is treated as no assertion at all.
pub fn get_asserts_type(db: &TypeInterner, type_id: TypeId) -> Option<TypeId> {
    let predicate = get_call_signature(db, type_id)?.type_predicate?;
    if !predicate.asserts {
        return None;
    }
    predicate.type_id.filter(|narrowed| !narrowed.is_unknown())
}

/// The resolved value of a promise.
pub fn get_resolved_type(db: &TypeInterner, type_id: TypeId) -> Option<TypeId> {
    match db.lookup(db.resolve(type_id)) {
        Some(TypeKey::Promise(inner)) => Some(inner),
        _ => None,
    }
}

/// The element type when iterating: arrays, tuples and strings.
pub fn get_item_type(db: &TypeInterner, type_id: TypeId) -> Option<TypeId> {
    let resolved = db.resolve(type_id);
    if let Some(element) = get_array_element_type(db, resolved) {
        return Some(element);
    }
    if let Some(elements) = get_tuple_elements(db, resolved) {
        let types: Vec<TypeId> = elements
            .iter()
            .map(|element| tuple_element_read_type(db, element))
            .collect();
        return Some(db.union(types));
    }
    match db.lookup(resolved) {
        Some(TypeKey::Intrinsic(IntrinsicKind::String))
        | Some(TypeKey::Literal(LiteralValue::String(_))) => Some(TypeId::STRING),
        _ => None,
    }
}

/// `NonNullable<T>`: removes `null` and `undefined`.
pub fn non_nullable(db: &TypeInterner, type_id: TypeId) -> TypeId {
    map_union_members(db, type_id, |member| {
        if matches!(db.resolve(member), TypeId::NULL | TypeId::UNDEFINED) {
            TypeId::NEVER
        } else {
            member
        }
    })
}

/// `Extract<T, U>`: the members of `T` that extend `U`.
pub fn extract(db: &TypeInterner, type_id: TypeId, target: TypeId) -> TypeId {
    map_union_members(db, type_id, |member| {
        if extends(db, member, target) {
            member
        } else {
            TypeId::NEVER
        }
    })
}

/// `Exclude<T, U>`: the members of `T` that do not extend `U`.
pub fn exclude(db: &TypeInterner, type_id: TypeId, target: TypeId) -> TypeId {
    if db.resolve(type_id).is_any() {
        return TypeId::ANY;
    }
    map_union_members(db, type_id, |member| {
        if extends(db, member, target) {
            TypeId::NEVER
        } else {
            member
        }
    })
}

/// A key of a type as seen by the mismatch explainer.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum MemberKey {
    Property(Atom),
    /// Tuple element index.
    Element(usize),
    /// Element type of an array or a number index signature.
    NumberIndex,
    StringIndex,
    /// Resolved value of a promise.
    Resolves,
}

impl MemberKey {
    pub fn display<'a>(&'a self, db: &'a TypeInterner) -> MemberKeyDisplay<'a> {
        MemberKeyDisplay { key: self, db }
    }
}

pub struct MemberKeyDisplay<'a> {
    key: &'a MemberKey,
    db: &'a TypeInterner,
}

impl fmt::Display for MemberKeyDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.key {
            MemberKey::Property(atom) => f.write_str(&self.db.resolve_atom(*atom)),
            MemberKey::Element(index) => write!(f, "{index}"),
            MemberKey::NumberIndex => f.write_str("[number]"),
            MemberKey::StringIndex => f.write_str("[string]"),
            MemberKey::Resolves => f.write_str(":resolves"),
        }
    }
}

/// Own members of a type, in declaration order.
///
/// For unions only the members shared by every union member are reported.
pub fn own_members(db: &TypeInterner, type_id: TypeId) -> Vec<MemberKey> {
    let resolved = db.resolve(type_id);
    if let Some(members) = get_union_members(db, resolved) {
        let mut iter = members.into_iter();
        let Some(first) = iter.next() else {
            return Vec::new();
        };
        let mut keys = own_members(db, first);
        for member in iter {
            let other = own_members(db, member);
            keys.retain(|key| other.contains(key));
        }
        return keys;
    }

    if let Some(elements) = get_tuple_elements(db, resolved) {
        let mut keys: Vec<MemberKey> = (0..elements.len())
            .filter(|&index| !elements[index].rest)
            .map(MemberKey::Element)
            .collect();
        if elements.iter().any(|element| element.rest) {
            keys.push(MemberKey::NumberIndex);
        }
        return keys;
    }
    if get_array_element_type(db, resolved).is_some() {
        return vec![MemberKey::NumberIndex];
    }
    if get_resolved_type(db, resolved).is_some() {
        return vec![MemberKey::Resolves];
    }
    if let Some(shape) = get_object_shape(db, resolved) {
        let mut keys: Vec<MemberKey> = shape
            .properties
            .iter()
            .map(|prop| MemberKey::Property(prop.name))
            .collect();
        if shape.string_index.is_some() {
            keys.push(MemberKey::StringIndex);
        }
        if shape.number_index.is_some() {
            keys.push(MemberKey::NumberIndex);
        }
        return keys;
    }
    Vec::new()
}

/// The type found at `key`, if the type has that member.
pub fn member_type(db: &TypeInterner, type_id: TypeId, key: &MemberKey) -> Option<TypeId> {
    let resolved = db.resolve(type_id);
    if let Some(members) = get_union_members(db, resolved) {
        let mut types = Vec::with_capacity(members.len());
        for member in members {
            types.push(member_type(db, member, key)?);
        }
        return Some(db.union(types));
    }

    match key {
        MemberKey::Property(atom) => {
            let name = db.resolve_atom(*atom);
            get_property_type(db, resolved, &name)
        }
        MemberKey::Element(index) => {
            let elements = get_tuple_elements(db, resolved)?;
            let element = elements.get(*index).filter(|element| !element.rest)?;
            Some(tuple_element_read_type(db, element))
        }
        MemberKey::NumberIndex => {
            if let Some(element) = get_array_element_type(db, resolved) {
                return Some(element);
            }
            if let Some(elements) = get_tuple_elements(db, resolved) {
                return elements
                    .iter()
                    .find(|element| element.rest)
                    .map(|element| tuple_element_read_type(db, element));
            }
            get_object_shape(db, resolved)?
                .number_index
                .as_ref()
                .map(|index| index.value_type)
        }
        MemberKey::StringIndex => get_object_shape(db, resolved)?
            .string_index
            .as_ref()
            .map(|index| index.value_type),
        MemberKey::Resolves => get_resolved_type(db, resolved),
    }
}

#[cfg(test)]
#[path = "tests/type_queries_tests.rs"]
mod tests;
