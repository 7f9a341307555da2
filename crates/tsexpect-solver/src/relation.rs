//! The three relations the assertion surface is built on.
//!
//! - [`extends`]: plain assignability, except that `never` only conforms to
//!   `never` (so `never` cannot satisfy an assertion by vacuous truth).
//! - [`strict_extends`]: compares the flattened prop maps of both sides, which
//!   makes modifiers (`readonly`, `?`) and literal-vs-wide distinctions
//!   observable.
//! - [`equal`]: `strict_extends` in both directions.

use crate::intern::TypeInterner;
use crate::logic::and;
use crate::props::{PropMap, print_props};
use crate::subtype::SubtypeChecker;
use crate::types::TypeId;
use tracing::trace;

/// `L extends R`, with `never` conforming only to `never`.
pub fn extends(db: &TypeInterner, left: TypeId, right: TypeId) -> bool {
    let left_resolved = db.resolve(left);
    if left_resolved.is_never() {
        return db.resolve(right).is_never();
    }
    SubtypeChecker::new(db).is_assignable(left_resolved, right)
}

/// Every key of `right` must exist in `left` with a label set that is a
/// subset of the right's.
pub fn prop_map_extends(left: &PropMap, right: &PropMap) -> bool {
    right.iter().all(|(key, right_labels)| match left.get(key) {
        Some(left_labels) => left_labels.is_subset(right_labels),
        None => false,
    })
}

pub fn strict_extends(db: &TypeInterner, left: TypeId, right: TypeId) -> bool {
    let left_props = print_props(db, left);
    let right_props = print_props(db, right);
    let result = prop_map_extends(&left_props, &right_props);
    trace!(left = left.0, right = right.0, result, "strict_extends");
    result
}

/// Identity: neither side has a key or label the other lacks.
pub fn equal(db: &TypeInterner, left: TypeId, right: TypeId) -> bool {
    if left == right {
        return true;
    }
    let left_props = print_props(db, left);
    let right_props = print_props(db, right);
    and(&[
        prop_map_extends(&left_props, &right_props),
        prop_map_extends(&right_props, &left_props),
    ])
}

#[cfg(test)]
#[path = "tests/relation_tests.rs"]
mod tests;
