//! Signature assignability.
//!
//! Parameters are contravariant and the source may accept fewer of them.
//! Returns are covariant, except that a `void`-returning target accepts any
//! call signature return. Call and construct signatures never mix.

use crate::subtype::{SubtypeChecker, SubtypeResult};
use crate::type_queries::{get_array_element_type, get_tuple_elements, tuple_element_read_type};
use crate::types::*;

impl SubtypeChecker<'_> {
    pub(crate) fn check_function_subtype(
        &mut self,
        source: &FunctionShape,
        target: &FunctionShape,
    ) -> SubtypeResult {
        if source.is_constructor != target.is_constructor {
            return SubtypeResult::False;
        }

        let ignore_return = target.return_type == TypeId::VOID && !target.is_constructor;
        if !ignore_return {
            let result = self.check_subtype(source.return_type, target.return_type);
            if !result.is_true() {
                return result;
            }
        }

        if let (Some(source_this), Some(target_this)) = (source.this_type, target.this_type) {
            let result = self.check_subtype(target_this, source_this);
            if !result.is_true() {
                return result;
            }
        }

        let result = self.check_parameters(&source.params, &target.params);
        if !result.is_true() {
            return result;
        }

        self.check_type_predicates(source.type_predicate.as_ref(), target.type_predicate.as_ref())
    }

    fn check_parameters(&mut self, source: &[ParamInfo], target: &[ParamInfo]) -> SubtypeResult {
        for (index, source_param) in source.iter().enumerate() {
            if source_param.rest {
                let source_element = self.param_rest_element_type(source_param.type_id);
                for target_param in target.iter().skip(index) {
                    let target_type = if target_param.rest {
                        self.param_rest_element_type(target_param.type_id)
                    } else {
                        target_param.type_id
                    };
                    let result = self.check_subtype(target_type, source_element);
                    if !result.is_true() {
                        return result;
                    }
                }
                return SubtypeResult::True;
            }

            match self.target_param_type(target, index) {
                Some(target_type) => {
                    let result = self.check_subtype(target_type, source_param.type_id);
                    if !result.is_true() {
                        return result;
                    }
                }
                // The target's callers never supply this argument.
                None if source_param.optional => {}
                None => return SubtypeResult::False,
            }
        }
        SubtypeResult::True
    }

    fn target_param_type(&self, target: &[ParamInfo], index: usize) -> Option<TypeId> {
        for (position, param) in target.iter().enumerate() {
            if param.rest {
                return Some(self.param_rest_element_type(param.type_id));
            }
            if position == index {
                return Some(param.type_id);
            }
        }
        None
    }

    fn param_rest_element_type(&self, type_id: TypeId) -> TypeId {
        if let Some(element) = get_array_element_type(self.interner, type_id) {
            return element;
        }
        if let Some(elements) = get_tuple_elements(self.interner, type_id) {
            let types: Vec<TypeId> = elements
                .iter()
                .map(|element| tuple_element_read_type(self.interner, element))
                .collect();
            return self.interner.union(types);
        }
        type_id
    }

    fn check_type_predicates(
        &mut self,
        source: Option<&TypePredicate>,
        target: Option<&TypePredicate>,
    ) -> SubtypeResult {
        let Some(target) = target else {
            return SubtypeResult::True;
        };
        let Some(source) = source else {
            return SubtypeResult::False;
        };
        if source.asserts != target.asserts || source.parameter_index != target.parameter_index {
            return SubtypeResult::False;
        }
        match (source.type_id, target.type_id) {
            (Some(source_type), Some(target_type)) => self.check_subtype(source_type, target_type),
            (None, None) => SubtypeResult::True,
            _ => SubtypeResult::False,
        }
    }
}
