//! Structural assignability.
//!
//! `SubtypeChecker` answers "is `source` assignable to `target`" over the
//! interned type graph. Named (`Lazy`) types may be recursive; a comparison
//! that re-enters a `(source, target)` pair already on the stack is assumed to
//! hold, which is the usual coinductive reading of recursive structural types.
//!
//! Rule families live in `subtype_rules/`:
//! - `objects.rs`: properties, index signatures, augmented callables
//! - `tuples.rs`: arrays, tuples, `readonly`
//! - `functions.rs`: parameters, return types, `this`, type predicates

use crate::intern::TypeInterner;
use crate::recursion::{RecursionGuard, RecursionProfile, RecursionResult};
use crate::types::*;
use tracing::trace;

/// Outcome of a single assignability step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubtypeResult {
    True,
    False,
    /// The pair was already being compared further up the stack.
    CycleDetected,
    /// Depth or iteration budget exhausted.
    DepthExceeded,
}

impl SubtypeResult {
    /// Cycles count as success; exhausted budgets do not.
    #[inline]
    pub fn is_true(self) -> bool {
        matches!(self, SubtypeResult::True | SubtypeResult::CycleDetected)
    }

    #[inline]
    pub fn from_bool(value: bool) -> Self {
        if value {
            SubtypeResult::True
        } else {
            SubtypeResult::False
        }
    }
}

pub struct SubtypeChecker<'a> {
    pub(crate) interner: &'a TypeInterner,
    guard: RecursionGuard<(TypeId, TypeId)>,
}

impl<'a> SubtypeChecker<'a> {
    pub fn new(interner: &'a TypeInterner) -> Self {
        SubtypeChecker {
            interner,
            guard: RecursionGuard::with_profile(RecursionProfile::SubtypeCheck),
        }
    }

    pub fn with_profile(interner: &'a TypeInterner, profile: RecursionProfile) -> Self {
        SubtypeChecker {
            interner,
            guard: RecursionGuard::with_profile(profile),
        }
    }

    /// Top-level query. Resets the recursion state between calls.
    pub fn is_assignable(&mut self, source: TypeId, target: TypeId) -> bool {
        self.guard.reset();
        let result = self.check_subtype(source, target);
        trace!(
            source = source.0,
            target = target.0,
            ?result,
            "assignability"
        );
        result.is_true()
    }

    /// True if the last query ran out of depth or iterations.
    pub fn exceeded(&self) -> bool {
        self.guard.is_exceeded()
    }

    pub(crate) fn check_subtype(&mut self, source: TypeId, target: TypeId) -> SubtypeResult {
        if source == target {
            return SubtypeResult::True;
        }

        let source = self.interner.resolve(source);
        let target = self.interner.resolve(target);
        if source == target {
            return SubtypeResult::True;
        }

        if let Some(result) = check_top_and_bottom(source, target) {
            return result;
        }

        // Unions are decomposed before entering the guard; members get their own keys.
        if let Some(TypeKey::Union(list_id)) = self.interner.lookup(source) {
            let members = self.interner.type_list(list_id);
            for &member in members.iter() {
                let result = self.check_subtype(member, target);
                if !result.is_true() {
                    return result;
                }
            }
            return SubtypeResult::True;
        }
        if let Some(TypeKey::Union(list_id)) = self.interner.lookup(target) {
            let members = self.interner.type_list(list_id);
            let mut saw_exceeded = false;
            for &member in members.iter() {
                match self.check_subtype(source, member) {
                    result if result.is_true() => return SubtypeResult::True,
                    SubtypeResult::DepthExceeded => saw_exceeded = true,
                    _ => {}
                }
            }
            return if saw_exceeded {
                SubtypeResult::DepthExceeded
            } else {
                SubtypeResult::False
            };
        }

        if let Some(result) = self.check_intrinsic_fast_paths(source, target) {
            return result;
        }

        let key = (source, target);
        match self.guard.enter(key) {
            RecursionResult::Entered => {
                let result = self.check_structural(source, target);
                self.guard.leave(key);
                result
            }
            RecursionResult::Cycle => SubtypeResult::CycleDetected,
            RecursionResult::DepthExceeded | RecursionResult::IterationExceeded => {
                trace!(source = source.0, target = target.0, "subtype budget exceeded");
                SubtypeResult::DepthExceeded
            }
        }
    }

    /// Rules for primitives, literals, `object` and `{}` targets.
    /// Both sides are resolved non-union types. Returns `None` when the pair
    /// needs structural comparison.
    fn check_intrinsic_fast_paths(&self, source: TypeId, target: TypeId) -> Option<SubtypeResult> {
        let source_key = self.interner.lookup(source);
        if let Some(TypeKey::Literal(literal)) = &source_key {
            if literal.primitive() == target {
                return Some(SubtypeResult::True);
            }
        }
        if source == TypeId::UNDEFINED && target == TypeId::VOID {
            return Some(SubtypeResult::True);
        }

        match self.interner.lookup(target) {
            // `object` accepts every non-primitive.
            Some(TypeKey::Intrinsic(IntrinsicKind::Object)) => {
                Some(SubtypeResult::from_bool(is_non_primitive(source_key.as_ref())))
            }
            Some(TypeKey::Intrinsic(_)) | Some(TypeKey::Literal(_)) => {
                // boolean is `true | false`; a union source was already split.
                Some(SubtypeResult::from_bool(matches!(
                    (source, target),
                    (TypeId::BOOLEAN_TRUE | TypeId::BOOLEAN_FALSE, TypeId::BOOLEAN)
                )))
            }
            Some(TypeKey::Object(shape_id)) => {
                let shape = self.interner.object_shape(shape_id);
                if shape.is_empty() {
                    // `{}` accepts everything except the nullish types.
                    return Some(SubtypeResult::from_bool(!source.is_nullish()));
                }
                if is_primitive(source_key.as_ref()) {
                    return Some(SubtypeResult::False);
                }
                None
            }
            _ => {
                if is_primitive(source_key.as_ref()) {
                    return Some(SubtypeResult::False);
                }
                None
            }
        }
    }

    fn check_structural(&mut self, source: TypeId, target: TypeId) -> SubtypeResult {
        let (Some(source_key), Some(target_key)) =
            (self.interner.lookup(source), self.interner.lookup(target))
        else {
            return SubtypeResult::False;
        };

        match (&source_key, &target_key) {
            (_, TypeKey::Object(shape_id)) => {
                let target_shape = self.interner.object_shape(*shape_id);
                self.check_object_target(&source_key, &target_shape)
            }
            (_, TypeKey::Callable(shape_id)) => {
                let target_shape = self.interner.callable_shape(*shape_id);
                self.check_callable_target(&source_key, &target_shape)
            }
            (_, TypeKey::Function(shape_id)) => {
                let target_shape = self.interner.function_shape(*shape_id);
                match self.source_signature(&source_key) {
                    Some(source_shape) => self.check_function_subtype(&source_shape, &target_shape),
                    None => SubtypeResult::False,
                }
            }
            (_, TypeKey::Array(_) | TypeKey::Tuple(_) | TypeKey::ReadonlyType(_)) => {
                self.check_sequence_subtype(source, target)
            }
            (TypeKey::Promise(source_inner), TypeKey::Promise(target_inner)) => {
                self.check_subtype(*source_inner, *target_inner)
            }
            _ => SubtypeResult::False,
        }
    }

    pub(crate) fn source_signature(&self, source_key: &TypeKey) -> Option<FunctionShape> {
        match source_key {
            TypeKey::Function(shape_id) => {
                Some(self.interner.function_shape(*shape_id).as_ref().clone())
            }
            TypeKey::Callable(shape_id) => {
                Some(self.interner.callable_shape(*shape_id).signature.clone())
            }
            _ => None,
        }
    }
}

/// `any`, `unknown` and `never` on either side.
fn check_top_and_bottom(source: TypeId, target: TypeId) -> Option<SubtypeResult> {
    if target.is_any_or_unknown() || source.is_never() {
        return Some(SubtypeResult::True);
    }
    if source.is_any() {
        return Some(SubtypeResult::from_bool(!target.is_never()));
    }
    if target.is_never() || source.is_unknown() {
        return Some(SubtypeResult::False);
    }
    None
}

fn is_primitive(key: Option<&TypeKey>) -> bool {
    match key {
        Some(TypeKey::Literal(_)) => true,
        Some(TypeKey::Intrinsic(kind)) => !matches!(
            kind,
            IntrinsicKind::Object | IntrinsicKind::Any | IntrinsicKind::Unknown | IntrinsicKind::Never
        ),
        _ => false,
    }
}

fn is_non_primitive(key: Option<&TypeKey>) -> bool {
    matches!(
        key,
        Some(
            TypeKey::Intrinsic(IntrinsicKind::Object)
                | TypeKey::Array(_)
                | TypeKey::Tuple(_)
                | TypeKey::ReadonlyType(_)
                | TypeKey::Object(_)
                | TypeKey::Function(_)
                | TypeKey::Callable(_)
                | TypeKey::Promise(_)
        )
    )
}

/// Convenience wrapper for a one-off assignability query.
pub fn is_assignable_to(interner: &TypeInterner, source: TypeId, target: TypeId) -> bool {
    SubtypeChecker::new(interner).is_assignable(source, target)
}

#[cfg(test)]
#[path = "tests/subtype_tests.rs"]
mod tests;
