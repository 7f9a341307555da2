//! Array and tuple assignability.
//!
//! - `S[] <: T[]` iff `S <: T`
//! - `[A, B] <: T[]` iff `A <: T` and `B <: T`
//! - tuples compare element-wise; the source must supply every required target
//!   element and cannot carry extra elements unless the target has a rest
//! - mutable sequences are assignable to readonly ones, never the reverse

use crate::subtype::{SubtypeChecker, SubtypeResult};
use crate::type_queries::get_array_element_type;
use crate::types::*;

impl SubtypeChecker<'_> {
    pub(crate) fn check_sequence_subtype(&mut self, source: TypeId, target: TypeId) -> SubtypeResult {
        let (source_inner, source_readonly) = self.unwrap_readonly(source);
        let (target_inner, target_readonly) = self.unwrap_readonly(target);
        if source_readonly && !target_readonly {
            return SubtypeResult::False;
        }

        match (
            self.interner.lookup(source_inner),
            self.interner.lookup(target_inner),
        ) {
            (Some(TypeKey::Array(source_element)), Some(TypeKey::Array(target_element))) => {
                self.check_subtype(source_element, target_element)
            }
            (Some(TypeKey::Tuple(source_list)), Some(TypeKey::Array(target_element))) => {
                let elements = self.interner.tuple_list(source_list);
                for element in elements.iter() {
                    let element_type = self.rest_element_type(element);
                    let result = self.check_subtype(element_type, target_element);
                    if !result.is_true() {
                        return result;
                    }
                }
                SubtypeResult::True
            }
            (Some(TypeKey::Tuple(source_list)), Some(TypeKey::Tuple(target_list))) => {
                let source_elements = self.interner.tuple_list(source_list);
                let target_elements = self.interner.tuple_list(target_list);
                self.check_tuple_subtype(&source_elements, &target_elements)
            }
            // `T[]` only fits a tuple that is nothing but a rest element.
            (Some(TypeKey::Array(_)), Some(TypeKey::Tuple(target_list))) => {
                let target_elements = self.interner.tuple_list(target_list);
                match target_elements.as_ref() {
                    [only] if only.rest => self.check_subtype(source_inner, only.type_id),
                    _ => SubtypeResult::False,
                }
            }
            _ => SubtypeResult::False,
        }
    }

    fn unwrap_readonly(&self, type_id: TypeId) -> (TypeId, bool) {
        match self.interner.lookup(type_id) {
            Some(TypeKey::ReadonlyType(inner)) => (inner, true),
            _ => (type_id, false),
        }
    }

    /// Element type of a tuple element, unwrapping `...T[]`.
    fn rest_element_type(&self, element: &TupleElement) -> TypeId {
        if element.rest {
            get_array_element_type(self.interner, element.type_id).unwrap_or(element.type_id)
        } else {
            element.type_id
        }
    }

    pub(crate) fn check_tuple_subtype(
        &mut self,
        source: &[TupleElement],
        target: &[TupleElement],
    ) -> SubtypeResult {
        let target_fixed: Vec<&TupleElement> = target.iter().filter(|e| !e.rest).collect();
        let target_rest = target
            .iter()
            .find(|e| e.rest)
            .map(|e| self.rest_element_type(e));

        let mut source_fixed_count = 0;
        for (index, element) in source.iter().enumerate() {
            if element.rest {
                let Some(target_rest) = target_rest else {
                    return SubtypeResult::False;
                };
                let element_type = self.rest_element_type(element);
                let result = self.check_subtype(element_type, target_rest);
                if !result.is_true() {
                    return result;
                }
                // Positions the source leaves open must be optional in the target.
                if target_fixed[index.min(target_fixed.len())..]
                    .iter()
                    .any(|e| !e.optional)
                {
                    return SubtypeResult::False;
                }
                continue;
            }

            source_fixed_count += 1;
            let target_type = match target_fixed.get(index) {
                Some(target_element) => {
                    if element.optional && !target_element.optional {
                        return SubtypeResult::False;
                    }
                    target_element.type_id
                }
                None => match target_rest {
                    Some(rest) => rest,
                    None => return SubtypeResult::False,
                },
            };
            let result = self.check_subtype(element.type_id, target_type);
            if !result.is_true() {
                return result;
            }
        }

        let missing_required = target_fixed
            .iter()
            .skip(source_fixed_count)
            .any(|e| !e.optional);
        if missing_required && !source.iter().any(|e| e.rest) {
            return SubtypeResult::False;
        }

        SubtypeResult::True
    }
}
