//! Type classification.
//!
//! Every type falls into exactly one [`TypeCategory`], decided by a fixed
//! precedence so that overlapping categories (an empty tuple is also an
//! object, `never` extends everything) resolve the same way every time:
//!
//! ```text
//! unknown > never > any > string > number > boolean > bigint > symbol
//!         > null > undefined > function > void > [] > {} > other
//! ```
//!
//! The key queries (`required_keys`, `optional_keys`, `readonly_keys`) read
//! the explicit modifier flags of object and callable properties.
//!
//! # Example
//!
//! ```rust,ignore
//! use crate::type_classifier::{classify_type, TypeCategory};
//!
//! match classify_type(&db, type_id) {
//!     TypeCategory::String { literal: true } => { /* "a", "b" */ }
//!     TypeCategory::EmptyObject => { /* {} */ }
//!     _ => {}
//! }
//! ```

use crate::intern::TypeInterner;
use crate::logic::{and, or};
use crate::relation::extends;
use crate::type_queries::{get_object_shape, own_members};
use crate::types::*;
use std::sync::Arc;

/// Classification used by the type printer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TypeCategory {
    Unknown,
    Never,
    Any,
    /// `literal` is false for the wide primitive.
    String { literal: bool },
    Number { literal: bool },
    Boolean { literal: bool },
    Bigint { literal: bool },
    Symbol,
    Null,
    Undefined,
    /// A call signature (construct signatures are `Other`).
    Function,
    Void,
    EmptyTuple,
    EmptyObject,
    Other,
}

/// Classify `type_id` by the fixed precedence.
///
/// A union is classified by its members: members sharing a primitive family
/// classify as that family, `void | undefined` as `Void`, call signatures as
/// `Function`. Any other mix is `Other`.
pub fn classify_type(db: &TypeInterner, type_id: TypeId) -> TypeCategory {
    let resolved = db.resolve(type_id);
    match resolved {
        TypeId::UNKNOWN => return TypeCategory::Unknown,
        TypeId::NEVER => return TypeCategory::Never,
        TypeId::ANY => return TypeCategory::Any,
        _ => {}
    }

    let members = db.union_members(resolved);
    if members.len() > 1 {
        return classify_union(db, &members);
    }
    classify_member(db, resolved)
}

fn classify_union(db: &TypeInterner, members: &[TypeId]) -> TypeCategory {
    let categories: Vec<TypeCategory> = members
        .iter()
        .map(|&member| classify_member(db, member))
        .collect();

    let family = |pick: fn(TypeCategory) -> Option<bool>| -> Option<bool> {
        let mut all_literal = true;
        for &category in &categories {
            all_literal &= pick(category)?;
        }
        Some(all_literal)
    };

    if let Some(literal) = family(|c| match c {
        TypeCategory::String { literal } => Some(literal),
        _ => None,
    }) {
        return TypeCategory::String { literal };
    }
    if let Some(literal) = family(|c| match c {
        TypeCategory::Number { literal } => Some(literal),
        _ => None,
    }) {
        return TypeCategory::Number { literal };
    }
    if let Some(literal) = family(|c| match c {
        TypeCategory::Boolean { literal } => Some(literal),
        _ => None,
    }) {
        return TypeCategory::Boolean { literal };
    }
    if let Some(literal) = family(|c| match c {
        TypeCategory::Bigint { literal } => Some(literal),
        _ => None,
    }) {
        return TypeCategory::Bigint { literal };
    }
    if categories.iter().all(|c| *c == TypeCategory::Function) {
        return TypeCategory::Function;
    }
    if categories
        .iter()
        .all(|c| matches!(c, TypeCategory::Void | TypeCategory::Undefined))
    {
        return TypeCategory::Void;
    }
    TypeCategory::Other
}

fn classify_member(db: &TypeInterner, type_id: TypeId) -> TypeCategory {
    match db.lookup(type_id) {
        Some(TypeKey::Intrinsic(kind)) => match kind {
            IntrinsicKind::Unknown => TypeCategory::Unknown,
            IntrinsicKind::Never => TypeCategory::Never,
            IntrinsicKind::Any => TypeCategory::Any,
            IntrinsicKind::String => TypeCategory::String { literal: false },
            IntrinsicKind::Number => TypeCategory::Number { literal: false },
            IntrinsicKind::Boolean => TypeCategory::Boolean { literal: false },
            IntrinsicKind::Bigint => TypeCategory::Bigint { literal: false },
            IntrinsicKind::Symbol => TypeCategory::Symbol,
            IntrinsicKind::Null => TypeCategory::Null,
            IntrinsicKind::Undefined => TypeCategory::Undefined,
            IntrinsicKind::Void => TypeCategory::Void,
            IntrinsicKind::Object => TypeCategory::EmptyObject,
        },
        Some(TypeKey::Literal(literal)) => match literal {
            LiteralValue::String(_) => TypeCategory::String { literal: true },
            LiteralValue::Number(_) => TypeCategory::Number { literal: true },
            LiteralValue::Boolean(_) => TypeCategory::Boolean { literal: true },
            LiteralValue::BigInt(_) => TypeCategory::Bigint { literal: true },
        },
        Some(TypeKey::Function(shape_id)) if !db.function_shape(shape_id).is_constructor => {
            TypeCategory::Function
        }
        Some(TypeKey::Callable(shape_id)) if !db.callable_shape(shape_id).signature.is_constructor => {
            TypeCategory::Function
        }
        Some(TypeKey::Tuple(_)) | Some(TypeKey::ReadonlyType(_)) if is_empty_tuple(db, type_id) => {
            TypeCategory::EmptyTuple
        }
        _ if is_empty_object(db, type_id) => TypeCategory::EmptyObject,
        _ => TypeCategory::Other,
    }
}

/// `[]` or `readonly []`.
pub fn is_empty_tuple(db: &TypeInterner, type_id: TypeId) -> bool {
    match db.lookup(db.resolve(type_id)) {
        Some(TypeKey::Tuple(list_id)) => db.tuple_list(list_id).is_empty(),
        Some(TypeKey::ReadonlyType(inner)) => is_empty_tuple(db, inner),
        _ => false,
    }
}

pub fn is_never(db: &TypeInterner, type_id: TypeId) -> bool {
    db.resolve(type_id).is_never()
}

pub fn is_any(db: &TypeInterner, type_id: TypeId) -> bool {
    db.resolve(type_id).is_any()
}

pub fn is_unknown(db: &TypeInterner, type_id: TypeId) -> bool {
    db.resolve(type_id).is_unknown()
}

pub fn is_never_or_any(db: &TypeInterner, type_id: TypeId) -> bool {
    or(&[is_never(db, type_id), is_any(db, type_id)])
}

/// Mutually assignable with `{}` and declaring no keys of its own.
///
/// `{}` and `object` qualify. Functions, arrays, index-signature objects,
/// primitives and `any` do not.
pub fn is_empty_object(db: &TypeInterner, type_id: TypeId) -> bool {
    let resolved = db.resolve(type_id);
    if resolved.is_any() {
        return false;
    }
    let empty = db.empty_object();
    and(&[
        extends(db, resolved, empty),
        extends(db, empty, resolved),
        own_members(db, resolved).is_empty(),
    ])
}

fn property_list(db: &TypeInterner, type_id: TypeId) -> Arc<ObjectShape> {
    get_object_shape(db, type_id).unwrap_or_default()
}

/// Own properties that cannot be omitted.
pub fn required_keys(db: &TypeInterner, type_id: TypeId) -> Vec<Arc<str>> {
    property_list(db, type_id)
        .properties
        .iter()
        .filter(|prop| !prop.optional)
        .map(|prop| db.resolve_atom(prop.name))
        .collect()
}

/// Own properties not in [`required_keys`].
pub fn optional_keys(db: &TypeInterner, type_id: TypeId) -> Vec<Arc<str>> {
    property_list(db, type_id)
        .properties
        .iter()
        .filter(|prop| prop.optional)
        .map(|prop| db.resolve_atom(prop.name))
        .collect()
}

pub fn readonly_keys(db: &TypeInterner, type_id: TypeId) -> Vec<Arc<str>> {
    property_list(db, type_id)
        .properties
        .iter()
        .filter(|prop| prop.readonly)
        .map(|prop| db.resolve_atom(prop.name))
        .collect()
}

#[cfg(test)]
#[path = "tests/type_classifier_tests.rs"]
mod tests;
