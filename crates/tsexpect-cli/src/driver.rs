//! Runs fixture assertions and the `props`/`explain` queries.

use serde::Serialize;
use tracing::{debug, info_span};
use tsexpect_solver::{
    AssertionError, AssertionResult, ExpectTypeOf, MismatchInfo, PropMap, TypeFormatter,
    equal, expect_type_of, extends, mismatch_info, print_props,
};

use crate::fixture::{AssertionSpec, Check, Fixture, FixtureError, NavStep, TypeEnv};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssertionOutcome {
    pub index: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub check: Check,
    pub negated: bool,
    pub passed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mismatch: Option<MismatchInfo>,
}

impl AssertionOutcome {
    fn new(index: usize, spec: &AssertionSpec, result: AssertionResult) -> Self {
        let (message, mismatch) = match result {
            Ok(()) => (None, None),
            Err(err) => {
                let message = err.to_string();
                let mismatch = match err {
                    AssertionError::Mismatch { info, .. } => Some(info),
                    _ => None,
                };
                (Some(message), mismatch)
            }
        };
        AssertionOutcome {
            index,
            name: spec.name.clone(),
            check: spec.check,
            negated: spec.not,
            passed: message.is_none(),
            message,
            mismatch,
        }
    }

    /// The assertion's name, or `#<index> <check>` when it has none.
    pub fn label(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None if self.negated => format!("#{} not.{}", self.index, self.check),
            None => format!("#{} {}", self.index, self.check),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckReport {
    pub passed: usize,
    pub failed: usize,
    /// Assertions left unrun after a fail-fast stop.
    pub skipped: usize,
    pub outcomes: Vec<AssertionOutcome>,
}

impl CheckReport {
    pub fn success(&self) -> bool {
        self.failed == 0
    }
}

pub fn run_fixture(fixture: &Fixture, fail_fast: bool) -> Result<CheckReport, FixtureError> {
    let _span = info_span!("run_fixture", assertions = fixture.assertions.len()).entered();
    let env = TypeEnv::from_fixture(fixture)?;

    let mut report = CheckReport::default();
    for (index, spec) in fixture.assertions.iter().enumerate() {
        let outcome = run_assertion(&env, index, spec)?;
        debug!(index, check = %spec.check, passed = outcome.passed, "assertion evaluated");
        if outcome.passed {
            report.passed += 1;
        } else {
            report.failed += 1;
        }
        report.outcomes.push(outcome);
        if fail_fast && !report.success() {
            report.skipped = fixture.assertions.len() - index - 1;
            break;
        }
    }
    Ok(report)
}

pub fn run_assertion(
    env: &TypeEnv,
    index: usize,
    spec: &AssertionSpec,
) -> Result<AssertionOutcome, FixtureError> {
    let mut handle = expect_type_of(env.db(), env.build(&spec.actual)?);
    if spec.not {
        handle = handle.not();
    }
    for step in &spec.path {
        handle = navigate(env, &handle, step)?;
    }
    let result = evaluate(env, &handle, index, spec)?;
    Ok(AssertionOutcome::new(index, spec, result))
}

fn navigate<'a>(
    env: &'a TypeEnv,
    handle: &ExpectTypeOf<'a>,
    step: &NavStep,
) -> Result<ExpectTypeOf<'a>, FixtureError> {
    Ok(match step {
        NavStep::Extract(target) => handle.extract(env.build(target)?),
        NavStep::Exclude(target) => handle.exclude(env.build(target)?),
        NavStep::Property(key) => handle.property(key),
        NavStep::Parameter(index) => handle.parameter(*index),
        NavStep::Parameters => handle.parameters(),
        NavStep::ConstructorParameters => handle.constructor_parameters(),
        NavStep::ThisParameter => handle.this_parameter(),
        NavStep::Instance => handle.instance(),
        NavStep::Returns => handle.returns(),
        NavStep::Resolves => handle.resolves(),
        NavStep::Items => handle.items(),
        NavStep::Guards => handle.guards(),
        NavStep::Asserts => handle.asserts(),
    })
}

fn evaluate(
    env: &TypeEnv,
    handle: &ExpectTypeOf<'_>,
    index: usize,
    spec: &AssertionSpec,
) -> Result<AssertionResult, FixtureError> {
    let missing = |field| FixtureError::MissingField {
        index,
        check: spec.check.as_str(),
        field,
    };
    let expected = || match &spec.expected {
        Some(expr) => env.build(expr),
        None => Err(missing("expected")),
    };

    Ok(match spec.check {
        Check::ToBeAny => handle.to_be_any(),
        Check::ToBeUnknown => handle.to_be_unknown(),
        Check::ToBeNever => handle.to_be_never(),
        Check::ToBeFunction => handle.to_be_function(),
        Check::ToBeObject => handle.to_be_object(),
        Check::ToBeArray => handle.to_be_array(),
        Check::ToBeNumber => handle.to_be_number(),
        Check::ToBeString => handle.to_be_string(),
        Check::ToBeBoolean => handle.to_be_boolean(),
        Check::ToBeVoid => handle.to_be_void(),
        Check::ToBeSymbol => handle.to_be_symbol(),
        Check::ToBeNull => handle.to_be_null(),
        Check::ToBeUndefined => handle.to_be_undefined(),
        Check::ToBeNullable => handle.to_be_nullable(),
        Check::ToExtend => handle.to_extend(expected()?),
        Check::ToBeIdenticalTo => handle.to_be_identical_to(expected()?),
        Check::ToMatchTypeOf => handle.to_match_type_of(expected()?),
        Check::ToEqualTypeOf => handle.to_equal_type_of(expected()?),
        Check::ToBeCallableWith => handle.to_be_callable_with(&env.build_all(&spec.args)?),
        Check::ToBeConstructibleWith => {
            handle.to_be_constructible_with(&env.build_all(&spec.args)?)
        }
        Check::ToHaveProperty => {
            let key = spec.key.as_deref().ok_or_else(|| missing("key"))?;
            handle.to_have_property(key).map(|_| ())
        }
    })
}

/// The flattened prop map of one type.
pub fn props(fixture: &Fixture, type_arg: &str) -> Result<PropMap, FixtureError> {
    let env = TypeEnv::from_fixture(fixture)?;
    let type_id = env.parse_type_arg(type_arg)?;
    Ok(print_props(env.db(), type_id))
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Explanation {
    pub actual: String,
    pub expected: String,
    pub extends: bool,
    pub identical: bool,
    pub mismatch: MismatchInfo,
}

pub fn explain(
    fixture: &Fixture,
    actual_arg: &str,
    expected_arg: &str,
) -> Result<Explanation, FixtureError> {
    let env = TypeEnv::from_fixture(fixture)?;
    let db = env.db();
    let actual = env.parse_type_arg(actual_arg)?;
    let expected = env.parse_type_arg(expected_arg)?;
    let mut formatter = TypeFormatter::new(db);
    Ok(Explanation {
        actual: formatter.format(actual),
        expected: formatter.format(expected),
        extends: extends(db, actual, expected),
        identical: equal(db, actual, expected),
        mismatch: mismatch_info(db, actual, expected),
    })
}

#[cfg(test)]
#[path = "tests/driver_tests.rs"]
mod tests;
