//! The assertion surface.
//!
//! ```rust,ignore
//! let db = TypeInterner::new();
//! let one = db.literal_number(1.0);
//!
//! expect_type_of(&db, one).to_extend(TypeId::NUMBER)?;
//! expect_type_of(&db, one).not().to_be_identical_to(TypeId::NUMBER)?;
//! expect_type_of(&db, TypeId::NUMBER).to_be_identical_to(one).unwrap_err(); // carries a diff
//! ```
//!
//! A handle carries the actual type and a polarity. `.not()` flips the
//! polarity; navigation (`property`, `returns`, ...) keeps it. Navigation that
//! does not apply to the actual type yields a `never` handle rather than an
//! error, so the failure surfaces at the next assertion.

use crate::format::TypeFormatter;
use crate::intern::TypeInterner;
use crate::logic::{eq, not};
use crate::mismatch::{MismatchInfo, mismatch_info};
use crate::props::{PropMap, print_props};
use crate::relation::{equal, extends};
use crate::type_classifier::{is_any, is_never, is_unknown};
use crate::type_queries::{
    self, MemberKey, get_asserts_type, get_constructor_parameters, get_guard_type,
    get_instance_type, get_item_type, get_parameters_tuple, get_property_type, get_resolved_type,
    get_return_type, get_this_type, has_property, member_type, non_nullable,
};
use crate::types::*;
use thiserror::Error;
use tracing::debug;

/// Why an assertion failed.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum AssertionError {
    /// A predicate assertion did not agree with the handle's polarity.
    #[error("{assertion}: expected `{actual}` {expectation}")]
    PolarityMismatch {
        assertion: &'static str,
        /// `"to hold"` or `"not to hold"`.
        expectation: &'static str,
        actual: String,
    },
    /// A positive conformance or identity assertion failed.
    #[error("{assertion}: {info}")]
    Mismatch {
        assertion: &'static str,
        info: MismatchInfo,
    },
    #[error("{assertion}: `{actual}` is not callable with ({args})")]
    NotCallable {
        assertion: &'static str,
        actual: String,
        args: String,
    },
    #[error("{assertion}: `{actual}` is not constructible with ({args})")]
    NotConstructible {
        assertion: &'static str,
        actual: String,
        args: String,
    },
    /// The assertion has no negated form.
    #[error("{assertion} cannot be used after .not()")]
    Unavailable { assertion: &'static str },
}

impl AssertionError {
    /// The mismatch diff, for failures that carry one.
    pub fn mismatch(&self) -> Option<&MismatchInfo> {
        match self {
            AssertionError::Mismatch { info, .. } => Some(info),
            _ => None,
        }
    }
}

pub type AssertionResult = Result<(), AssertionError>;

/// Start an assertion chain on `actual`.
pub fn expect_type_of(db: &TypeInterner, actual: TypeId) -> ExpectTypeOf<'_> {
    ExpectTypeOf {
        db,
        actual,
        positive: true,
    }
}

#[derive(Clone, Copy)]
pub struct ExpectTypeOf<'a> {
    db: &'a TypeInterner,
    actual: TypeId,
    positive: bool,
}

impl<'a> ExpectTypeOf<'a> {
    /// Flip the polarity of the following assertion.
    pub fn not(self) -> Self {
        ExpectTypeOf {
            positive: not(self.positive),
            ..self
        }
    }

    pub fn is_positive(&self) -> bool {
        self.positive
    }

    /// The type under test.
    pub fn view(&self) -> TypeId {
        self.actual
    }

    /// The flattened prop map of the type under test.
    pub fn props(&self) -> PropMap {
        print_props(self.db, self.actual)
    }

    fn with_type(&self, type_id: TypeId) -> Self {
        ExpectTypeOf {
            actual: type_id,
            ..*self
        }
    }

    fn display(&self, type_id: TypeId) -> String {
        TypeFormatter::new(self.db).format(type_id)
    }

    fn check(&self, assertion: &'static str, holds: bool) -> AssertionResult {
        if eq(holds, self.positive) {
            return Ok(());
        }
        debug!(assertion, actual = self.actual.0, positive = self.positive, "assertion failed");
        Err(AssertionError::PolarityMismatch {
            assertion,
            expectation: if self.positive { "to hold" } else { "not to hold" },
            actual: self.display(self.actual),
        })
    }

    fn check_extends(&self, assertion: &'static str, target: TypeId) -> AssertionResult {
        self.check(assertion, extends(self.db, self.actual, target))
    }

    // =========================================================================
    // Predicates
    // =========================================================================

    pub fn to_be_any(&self) -> AssertionResult {
        self.check("toBeAny", is_any(self.db, self.actual))
    }

    pub fn to_be_unknown(&self) -> AssertionResult {
        self.check("toBeUnknown", is_unknown(self.db, self.actual))
    }

    pub fn to_be_never(&self) -> AssertionResult {
        self.check("toBeNever", is_never(self.db, self.actual))
    }

    /// Assignable to `(...args: any[]) => any`.
    pub fn to_be_function(&self) -> AssertionResult {
        let any_function = self.db.function(FunctionShape::new(
            vec![ParamInfo::rest(None, self.db.array(TypeId::ANY))],
            TypeId::ANY,
        ));
        self.check_extends("toBeFunction", any_function)
    }

    pub fn to_be_object(&self) -> AssertionResult {
        self.check_extends("toBeObject", TypeId::OBJECT)
    }

    /// Assignable to `any[]`.
    pub fn to_be_array(&self) -> AssertionResult {
        let any_array = self.db.array(TypeId::ANY);
        self.check_extends("toBeArray", any_array)
    }

    pub fn to_be_number(&self) -> AssertionResult {
        self.check_extends("toBeNumber", TypeId::NUMBER)
    }

    pub fn to_be_string(&self) -> AssertionResult {
        self.check_extends("toBeString", TypeId::STRING)
    }

    pub fn to_be_boolean(&self) -> AssertionResult {
        self.check_extends("toBeBoolean", TypeId::BOOLEAN)
    }

    pub fn to_be_void(&self) -> AssertionResult {
        self.check_extends("toBeVoid", TypeId::VOID)
    }

    pub fn to_be_symbol(&self) -> AssertionResult {
        self.check_extends("toBeSymbol", TypeId::SYMBOL)
    }

    pub fn to_be_null(&self) -> AssertionResult {
        self.check_extends("toBeNull", TypeId::NULL)
    }

    pub fn to_be_undefined(&self) -> AssertionResult {
        self.check_extends("toBeUndefined", TypeId::UNDEFINED)
    }

    /// The type admits `null` or `undefined`.
    pub fn to_be_nullable(&self) -> AssertionResult {
        let stripped = non_nullable(self.db, self.actual);
        self.check("toBeNullable", not(equal(self.db, self.actual, stripped)))
    }

    // =========================================================================
    // Relations
    // =========================================================================

    /// The type under test is assignable to `expected`.
    pub fn to_extend(&self, expected: TypeId) -> AssertionResult {
        self.relate("toExtend", expected, extends(self.db, self.actual, expected))
    }

    /// The two types are identical, modifiers and literals included.
    pub fn to_be_identical_to(&self, expected: TypeId) -> AssertionResult {
        self.relate("toBeIdenticalTo", expected, equal(self.db, self.actual, expected))
    }

    /// Older name of [`to_extend`](Self::to_extend).
    pub fn to_match_type_of(&self, expected: TypeId) -> AssertionResult {
        self.to_extend(expected)
    }

    /// Older name of [`to_be_identical_to`](Self::to_be_identical_to).
    pub fn to_equal_type_of(&self, expected: TypeId) -> AssertionResult {
        self.to_be_identical_to(expected)
    }

    fn relate(&self, assertion: &'static str, expected: TypeId, holds: bool) -> AssertionResult {
        if self.positive && !holds {
            let info = mismatch_info(self.db, self.actual, expected);
            debug!(assertion, actual = self.actual.0, expected = expected.0, "relation failed");
            return Err(AssertionError::Mismatch { assertion, info });
        }
        self.check(assertion, holds)
    }

    pub fn to_be_callable_with(&self, args: &[TypeId]) -> AssertionResult {
        const ASSERTION: &str = "toBeCallableWith";
        if !self.positive {
            return Err(AssertionError::Unavailable {
                assertion: ASSERTION,
            });
        }
        let callable = get_parameters_tuple(self.db, self.actual)
            .is_some_and(|params| extends(self.db, self.db.tuple_of(args), params));
        if callable {
            return Ok(());
        }
        Err(AssertionError::NotCallable {
            assertion: ASSERTION,
            actual: self.display(self.actual),
            args: self.display_args(args),
        })
    }

    pub fn to_be_constructible_with(&self, args: &[TypeId]) -> AssertionResult {
        const ASSERTION: &str = "toBeConstructibleWith";
        if !self.positive {
            return Err(AssertionError::Unavailable {
                assertion: ASSERTION,
            });
        }
        let constructible = get_constructor_parameters(self.db, self.actual)
            .is_some_and(|params| extends(self.db, self.db.tuple_of(args), params));
        if constructible {
            return Ok(());
        }
        Err(AssertionError::NotConstructible {
            assertion: ASSERTION,
            actual: self.display(self.actual),
            args: self.display_args(args),
        })
    }

    fn display_args(&self, args: &[TypeId]) -> String {
        let mut formatter = TypeFormatter::new(self.db);
        args.iter()
            .map(|&arg| formatter.format(arg))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Assert that `key` is (or, negated, is not) a key of the type.
    ///
    /// On positive success the handle for the property type is returned.
    /// A negated success has nothing to navigate to and returns `None`.
    pub fn to_have_property(&self, key: &str) -> Result<Option<ExpectTypeOf<'a>>, AssertionError> {
        let present = has_property(self.db, self.actual, key);
        self.check("toHaveProperty", present)?;
        if !present {
            return Ok(None);
        }
        Ok(Some(self.property(key)))
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    /// `Extract<Actual, U>`.
    pub fn extract(&self, target: TypeId) -> Self {
        self.with_type(type_queries::extract(self.db, self.actual, target))
    }

    /// `Exclude<Actual, U>`.
    pub fn exclude(&self, target: TypeId) -> Self {
        self.with_type(type_queries::exclude(self.db, self.actual, target))
    }

    pub fn property(&self, key: &str) -> Self {
        let type_id = get_property_type(self.db, self.actual, key).unwrap_or(TypeId::NEVER);
        self.with_type(type_id)
    }

    /// `Parameters<Actual>[index]`.
    pub fn parameter(&self, index: usize) -> Self {
        let type_id = get_parameters_tuple(self.db, self.actual)
            .and_then(|params| parameter_at(self.db, params, index))
            .unwrap_or(TypeId::NEVER);
        self.with_type(type_id)
    }

    pub fn parameters(&self) -> Self {
        self.navigate(get_parameters_tuple)
    }

    pub fn constructor_parameters(&self) -> Self {
        self.navigate(get_constructor_parameters)
    }

    pub fn this_parameter(&self) -> Self {
        self.navigate(get_this_type)
    }

    pub fn instance(&self) -> Self {
        self.navigate(get_instance_type)
    }

    pub fn returns(&self) -> Self {
        self.navigate(get_return_type)
    }

    pub fn resolves(&self) -> Self {
        self.navigate(get_resolved_type)
    }

    pub fn items(&self) -> Self {
        self.navigate(get_item_type)
    }

    /// The narrowed type of a `x is T` guard.
    pub fn guards(&self) -> Self {
        self.navigate(get_guard_type)
    }

    /// The narrowed type of an `asserts x is T` signature.
    pub fn asserts(&self) -> Self {
        self.navigate(get_asserts_type)
    }

    fn navigate(&self, query: fn(&TypeInterner, TypeId) -> Option<TypeId>) -> Self {
        self.with_type(query(self.db, self.actual).unwrap_or(TypeId::NEVER))
    }
}

/// Element `index` of a parameter tuple; positions past the fixed elements
/// read from the rest element.
fn parameter_at(db: &TypeInterner, params: TypeId, index: usize) -> Option<TypeId> {
    let elements = type_queries::get_tuple_elements(db, params)?;
    match elements.get(index) {
        Some(element) if !element.rest => member_type(db, params, &MemberKey::Element(index)),
        _ => member_type(db, params, &MemberKey::NumberIndex),
    }
}

#[cfg(test)]
#[path = "tests/expect_tests.rs"]
mod tests;
