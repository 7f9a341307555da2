//! JSON fixtures: named type declarations plus the assertions to run on them.
//!
//! ```json
//! {
//!   "types": {
//!     "Node": { "object": { "value": "number", "next": { "union": ["Node", "null"] } } }
//!   },
//!   "assertions": [
//!     { "actual": "Node", "check": "toHaveProperty", "key": "next" },
//!     { "actual": "Node", "path": [{ "property": "next" }], "check": "toBeNullable" }
//!   ]
//! }
//! ```
//!
//! A type expression is either a name (an intrinsic keyword or a declared
//! type) or a single-key object naming its constructor: `literal`, `bigint`,
//! `union`, `array`, `readonlyArray`, `tuple`, `readonlyTuple`, `object`,
//! `function`, `constructor`, `callable` or `promise`.
//!
//! Inside `object` and `callable` properties, the keys `[string]` and
//! `[number]` declare index signatures instead of named properties.

use anyhow::{Context, Result};
use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::debug;
use tsexpect_solver::{
    CallableShape, FunctionShape, IndexSignature, IntrinsicKind, ObjectShape, ParamInfo,
    PropertyInfo, TupleElement, TypeId, TypeInterner, TypePredicate,
};

const STRING_INDEX_KEY: &str = "[string]";
const NUMBER_INDEX_KEY: &str = "[number]";

#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("unknown type `{name}`")]
    UnknownType { name: String },
    #[error("`{name}` is a built-in type and cannot be redeclared")]
    ReservedName { name: String },
    #[error("type predicate refers to parameter {index}, but the signature has {count}")]
    PredicateParameter { index: u32, count: usize },
    #[error("callable types cannot carry index signatures")]
    CallableIndex,
    #[error("assertion {index} (`{check}`) needs a `{field}` field")]
    MissingField {
        index: usize,
        check: &'static str,
        field: &'static str,
    },
    #[error("invalid fixture JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// A type written in a fixture.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum TypeExpr {
    Name(String),
    Node(Box<TypeNode>),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TypeNode {
    Literal(LiteralExpr),
    Bigint(String),
    Union(Vec<TypeExpr>),
    Array(TypeExpr),
    ReadonlyArray(TypeExpr),
    Tuple(Vec<SlotExpr>),
    ReadonlyTuple(Vec<SlotExpr>),
    Object(IndexMap<String, PropertyExpr>),
    Function(SignatureExpr),
    Constructor(SignatureExpr),
    Callable {
        signature: SignatureExpr,
        #[serde(default)]
        properties: IndexMap<String, PropertyExpr>,
    },
    Promise(TypeExpr),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum LiteralExpr {
    Boolean(bool),
    Number(f64),
    String(String),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PropertyExpr {
    Detailed(PropertyDetail),
    Plain(TypeExpr),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PropertyDetail {
    #[serde(rename = "type")]
    pub type_expr: TypeExpr,
    #[serde(default)]
    pub optional: bool,
    #[serde(default)]
    pub readonly: bool,
}

/// A tuple element or a signature parameter.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SlotExpr {
    Detailed(SlotDetail),
    Plain(TypeExpr),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SlotDetail {
    #[serde(rename = "type")]
    pub type_expr: TypeExpr,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub optional: bool,
    #[serde(default)]
    pub rest: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SignatureExpr {
    #[serde(default)]
    pub params: Vec<SlotExpr>,
    /// Return type of a function, or instance type of a constructor.
    #[serde(default, alias = "instance")]
    pub returns: Option<TypeExpr>,
    #[serde(default)]
    pub this: Option<TypeExpr>,
    #[serde(default)]
    pub predicate: Option<PredicateExpr>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PredicateExpr {
    #[serde(default)]
    pub parameter: u32,
    #[serde(rename = "type", default)]
    pub type_expr: Option<TypeExpr>,
    #[serde(default)]
    pub asserts: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Fixture {
    #[serde(default)]
    pub types: IndexMap<String, TypeExpr>,
    #[serde(default)]
    pub assertions: Vec<AssertionSpec>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AssertionSpec {
    #[serde(default)]
    pub name: Option<String>,
    pub actual: TypeExpr,
    #[serde(default)]
    pub not: bool,
    #[serde(default)]
    pub path: Vec<NavStep>,
    pub check: Check,
    #[serde(default)]
    pub expected: Option<TypeExpr>,
    #[serde(default)]
    pub args: Vec<TypeExpr>,
    #[serde(default)]
    pub key: Option<String>,
}

/// One navigation step applied to the handle before the check runs.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NavStep {
    Extract(TypeExpr),
    Exclude(TypeExpr),
    Property(String),
    Parameter(usize),
    Parameters,
    ConstructorParameters,
    ThisParameter,
    Instance,
    Returns,
    Resolves,
    Items,
    Guards,
    Asserts,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Check {
    ToBeAny,
    ToBeUnknown,
    ToBeNever,
    ToBeFunction,
    ToBeObject,
    ToBeArray,
    ToBeNumber,
    ToBeString,
    ToBeBoolean,
    ToBeVoid,
    ToBeSymbol,
    ToBeNull,
    ToBeUndefined,
    ToBeNullable,
    ToExtend,
    ToBeIdenticalTo,
    ToMatchTypeOf,
    ToEqualTypeOf,
    ToBeCallableWith,
    ToBeConstructibleWith,
    ToHaveProperty,
}

impl Check {
    pub fn as_str(self) -> &'static str {
        match self {
            Check::ToBeAny => "toBeAny",
            Check::ToBeUnknown => "toBeUnknown",
            Check::ToBeNever => "toBeNever",
            Check::ToBeFunction => "toBeFunction",
            Check::ToBeObject => "toBeObject",
            Check::ToBeArray => "toBeArray",
            Check::ToBeNumber => "toBeNumber",
            Check::ToBeString => "toBeString",
            Check::ToBeBoolean => "toBeBoolean",
            Check::ToBeVoid => "toBeVoid",
            Check::ToBeSymbol => "toBeSymbol",
            Check::ToBeNull => "toBeNull",
            Check::ToBeUndefined => "toBeUndefined",
            Check::ToBeNullable => "toBeNullable",
            Check::ToExtend => "toExtend",
            Check::ToBeIdenticalTo => "toBeIdenticalTo",
            Check::ToMatchTypeOf => "toMatchTypeOf",
            Check::ToEqualTypeOf => "toEqualTypeOf",
            Check::ToBeCallableWith => "toBeCallableWith",
            Check::ToBeConstructibleWith => "toBeConstructibleWith",
            Check::ToHaveProperty => "toHaveProperty",
        }
    }
}

impl std::fmt::Display for Check {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn parse_fixture(source: &str) -> Result<Fixture, FixtureError> {
    Ok(serde_json::from_str(source)?)
}

pub fn load_fixture(path: &Path) -> Result<Fixture> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read fixture {}", path.display()))?;
    parse_fixture(&source).with_context(|| format!("failed to parse fixture {}", path.display()))
}

/// An interner populated with a fixture's named types.
pub struct TypeEnv {
    db: TypeInterner,
    names: FxHashMap<String, TypeId>,
}

impl Default for TypeEnv {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeEnv {
    pub fn new() -> Self {
        TypeEnv {
            db: TypeInterner::new(),
            names: FxHashMap::default(),
        }
    }

    pub fn from_fixture(fixture: &Fixture) -> Result<Self, FixtureError> {
        let mut env = TypeEnv::new();
        env.declare_all(&fixture.types)?;
        Ok(env)
    }

    pub fn db(&self) -> &TypeInterner {
        &self.db
    }

    /// Every name is declared before any body is built, so bodies may refer
    /// to each other in any order.
    pub fn declare_all(&mut self, types: &IndexMap<String, TypeExpr>) -> Result<(), FixtureError> {
        let mut pending = Vec::with_capacity(types.len());
        for (name, body) in types {
            if IntrinsicKind::from_keyword(name).is_some() {
                return Err(FixtureError::ReservedName { name: name.clone() });
            }
            let lazy = self.db.declare(name);
            self.names.insert(name.clone(), lazy);
            pending.push((lazy, body));
        }
        for (lazy, body) in pending {
            let built = self.build(body)?;
            self.db.define(lazy, built);
        }
        debug!(count = types.len(), "declared fixture types");
        Ok(())
    }

    pub fn lookup(&self, name: &str) -> Option<TypeId> {
        IntrinsicKind::from_keyword(name)
            .map(IntrinsicKind::to_type_id)
            .or_else(|| self.names.get(name).copied())
    }

    /// Parses a command-line type argument: a JSON type expression, or a bare name.
    pub fn parse_type_arg(&self, text: &str) -> Result<TypeId, FixtureError> {
        match serde_json::from_str::<TypeExpr>(text) {
            Ok(expr) => self.build(&expr),
            Err(_) => self.build(&TypeExpr::Name(text.trim().to_string())),
        }
    }

    pub fn build(&self, expr: &TypeExpr) -> Result<TypeId, FixtureError> {
        match expr {
            TypeExpr::Name(name) => self
                .lookup(name)
                .ok_or_else(|| FixtureError::UnknownType { name: name.clone() }),
            TypeExpr::Node(node) => self.build_node(node),
        }
    }

    fn build_node(&self, node: &TypeNode) -> Result<TypeId, FixtureError> {
        let db = &self.db;
        Ok(match node {
            TypeNode::Literal(LiteralExpr::Boolean(value)) => db.literal_boolean(*value),
            TypeNode::Literal(LiteralExpr::Number(value)) => db.literal_number(*value),
            TypeNode::Literal(LiteralExpr::String(value)) => db.literal_string(value),
            TypeNode::Bigint(digits) => db.literal_bigint(digits),
            TypeNode::Union(members) => db.union(self.build_all(members)?),
            TypeNode::Array(element) => db.array(self.build(element)?),
            TypeNode::ReadonlyArray(element) => db.readonly_array(self.build(element)?),
            TypeNode::Tuple(elements) => db.tuple(self.build_elements(elements)?),
            TypeNode::ReadonlyTuple(elements) => db.readonly_tuple(self.build_elements(elements)?),
            TypeNode::Object(properties) => {
                let shape = self.build_shape(properties)?;
                if shape.string_index.is_none() && shape.number_index.is_none() {
                    db.object(shape.properties)
                } else {
                    db.object_with_index(shape)
                }
            }
            TypeNode::Function(signature) => db.function(self.build_signature(signature, false)?),
            TypeNode::Constructor(signature) => {
                db.function(self.build_signature(signature, true)?)
            }
            TypeNode::Callable {
                signature,
                properties,
            } => {
                let shape = self.build_shape(properties)?;
                if shape.string_index.is_some() || shape.number_index.is_some() {
                    return Err(FixtureError::CallableIndex);
                }
                db.callable(CallableShape {
                    signature: self.build_signature(signature, false)?,
                    properties: shape.properties,
                })
            }
            TypeNode::Promise(inner) => db.promise(self.build(inner)?),
        })
    }

    pub fn build_all(&self, exprs: &[TypeExpr]) -> Result<Vec<TypeId>, FixtureError> {
        exprs.iter().map(|expr| self.build(expr)).collect()
    }

    fn build_elements(&self, slots: &[SlotExpr]) -> Result<Vec<TupleElement>, FixtureError> {
        slots
            .iter()
            .map(|slot| -> Result<TupleElement, FixtureError> {
                let (detail, type_id) = self.build_slot(slot)?;
                Ok(TupleElement {
                    type_id,
                    name: detail
                        .and_then(|d| d.name.as_deref())
                        .map(|name| self.db.intern_string(name)),
                    optional: detail.is_some_and(|d| d.optional),
                    rest: detail.is_some_and(|d| d.rest),
                })
            })
            .collect()
    }

    fn build_slot<'s>(
        &self,
        slot: &'s SlotExpr,
    ) -> Result<(Option<&'s SlotDetail>, TypeId), FixtureError> {
        match slot {
            SlotExpr::Detailed(detail) => Ok((Some(detail), self.build(&detail.type_expr)?)),
            SlotExpr::Plain(expr) => Ok((None, self.build(expr)?)),
        }
    }

    fn build_shape(
        &self,
        properties: &IndexMap<String, PropertyExpr>,
    ) -> Result<ObjectShape, FixtureError> {
        let mut shape = ObjectShape::default();
        for (key, expr) in properties {
            let (type_id, optional, readonly) = match expr {
                PropertyExpr::Detailed(detail) => (
                    self.build(&detail.type_expr)?,
                    detail.optional,
                    detail.readonly,
                ),
                PropertyExpr::Plain(expr) => (self.build(expr)?, false, false),
            };
            match key.as_str() {
                STRING_INDEX_KEY => {
                    shape.string_index = Some(IndexSignature {
                        value_type: type_id,
                        readonly,
                    });
                }
                NUMBER_INDEX_KEY => {
                    shape.number_index = Some(IndexSignature {
                        value_type: type_id,
                        readonly,
                    });
                }
                _ => {
                    let mut prop = PropertyInfo::new(self.db.intern_string(key), type_id);
                    prop.optional = optional;
                    prop.readonly = readonly;
                    shape.properties.push(prop);
                }
            }
        }
        Ok(shape)
    }

    fn build_signature(
        &self,
        signature: &SignatureExpr,
        is_constructor: bool,
    ) -> Result<FunctionShape, FixtureError> {
        let mut params = Vec::with_capacity(signature.params.len());
        for slot in &signature.params {
            let (detail, type_id) = self.build_slot(slot)?;
            let name = detail
                .and_then(|d| d.name.as_deref())
                .map(|name| self.db.intern_string(name));
            params.push(match detail {
                Some(d) if d.rest => ParamInfo::rest(name, type_id),
                Some(d) if d.optional => ParamInfo::optional(name, type_id),
                _ => ParamInfo::required(name, type_id),
            });
        }

        let return_type = match &signature.returns {
            Some(expr) => self.build(expr)?,
            None if is_constructor => self.db.empty_object(),
            None => TypeId::VOID,
        };
        let this_type = signature
            .this
            .as_ref()
            .map(|expr| self.build(expr))
            .transpose()?;
        let type_predicate = match &signature.predicate {
            Some(predicate) => {
                if predicate.parameter as usize >= params.len() {
                    return Err(FixtureError::PredicateParameter {
                        index: predicate.parameter,
                        count: params.len(),
                    });
                }
                Some(TypePredicate {
                    asserts: predicate.asserts,
                    parameter_index: predicate.parameter,
                    type_id: predicate
                        .type_expr
                        .as_ref()
                        .map(|expr| self.build(expr))
                        .transpose()?,
                })
            }
            None => None,
        };

        Ok(FunctionShape {
            params,
            this_type,
            return_type,
            type_predicate,
            is_constructor,
        })
    }
}

#[cfg(test)]
#[path = "tests/fixture_tests.rs"]
mod tests;
