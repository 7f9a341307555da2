//! Type representation for the structural solver.
//!
//! Types are described by [`TypeKey`] values and interned into lightweight
//! [`TypeId`] handles by the [`TypeInterner`](crate::TypeInterner). Two
//! structurally identical descriptions always intern to the same `TypeId`.

use crate::def::DefId;
use serde::Serialize;
use std::hash::{Hash, Hasher};
use tsexpect_common::Atom;

/// A handle to an interned type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct TypeId(pub u32);

impl TypeId {
    /// Internal placeholder; never produced by the interner.
    pub const NONE: TypeId = TypeId(0);

    pub const NEVER: TypeId = TypeId(1);
    pub const UNKNOWN: TypeId = TypeId(2);
    pub const ANY: TypeId = TypeId(3);
    pub const VOID: TypeId = TypeId(4);
    pub const UNDEFINED: TypeId = TypeId(5);
    pub const NULL: TypeId = TypeId(6);
    pub const BOOLEAN: TypeId = TypeId(7);
    pub const NUMBER: TypeId = TypeId(8);
    pub const STRING: TypeId = TypeId(9);
    pub const BIGINT: TypeId = TypeId(10);
    pub const SYMBOL: TypeId = TypeId(11);
    /// The non-primitive `object` type.
    pub const OBJECT: TypeId = TypeId(12);

    /// The `true` literal. Pre-registered so `true | false` can normalize to `boolean`.
    pub const BOOLEAN_TRUE: TypeId = TypeId(13);
    /// The `false` literal.
    pub const BOOLEAN_FALSE: TypeId = TypeId(14);

    /// First id handed out for user-constructed types.
    pub const FIRST_USER: u32 = 100;

    #[inline]
    pub const fn is_intrinsic(self) -> bool {
        self.0 < Self::FIRST_USER
    }

    #[inline]
    pub const fn is_any(self) -> bool {
        self.0 == Self::ANY.0
    }

    #[inline]
    pub const fn is_unknown(self) -> bool {
        self.0 == Self::UNKNOWN.0
    }

    #[inline]
    pub const fn is_never(self) -> bool {
        self.0 == Self::NEVER.0
    }

    #[inline]
    pub const fn is_any_or_unknown(self) -> bool {
        self.is_any() || self.is_unknown()
    }

    /// `null`, `undefined` or `void`.
    #[inline]
    pub const fn is_nullish(self) -> bool {
        matches!(self.0, 4..=6)
    }
}

/// Built-in type keywords.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IntrinsicKind {
    Any,
    Unknown,
    Never,
    Void,
    Undefined,
    Null,
    Boolean,
    Number,
    String,
    Bigint,
    Symbol,
    Object,
}

impl IntrinsicKind {
    pub const fn to_type_id(self) -> TypeId {
        match self {
            IntrinsicKind::Any => TypeId::ANY,
            IntrinsicKind::Unknown => TypeId::UNKNOWN,
            IntrinsicKind::Never => TypeId::NEVER,
            IntrinsicKind::Void => TypeId::VOID,
            IntrinsicKind::Undefined => TypeId::UNDEFINED,
            IntrinsicKind::Null => TypeId::NULL,
            IntrinsicKind::Boolean => TypeId::BOOLEAN,
            IntrinsicKind::Number => TypeId::NUMBER,
            IntrinsicKind::String => TypeId::STRING,
            IntrinsicKind::Bigint => TypeId::BIGINT,
            IntrinsicKind::Symbol => TypeId::SYMBOL,
            IntrinsicKind::Object => TypeId::OBJECT,
        }
    }

    pub const fn from_type_id(id: TypeId) -> Option<IntrinsicKind> {
        Some(match id {
            TypeId::ANY => IntrinsicKind::Any,
            TypeId::UNKNOWN => IntrinsicKind::Unknown,
            TypeId::NEVER => IntrinsicKind::Never,
            TypeId::VOID => IntrinsicKind::Void,
            TypeId::UNDEFINED => IntrinsicKind::Undefined,
            TypeId::NULL => IntrinsicKind::Null,
            TypeId::BOOLEAN => IntrinsicKind::Boolean,
            TypeId::NUMBER => IntrinsicKind::Number,
            TypeId::STRING => IntrinsicKind::String,
            TypeId::BIGINT => IntrinsicKind::Bigint,
            TypeId::SYMBOL => IntrinsicKind::Symbol,
            TypeId::OBJECT => IntrinsicKind::Object,
            _ => return None,
        })
    }

    /// The keyword as written in a type annotation.
    pub const fn keyword(self) -> &'static str {
        match self {
            IntrinsicKind::Any => "any",
            IntrinsicKind::Unknown => "unknown",
            IntrinsicKind::Never => "never",
            IntrinsicKind::Void => "void",
            IntrinsicKind::Undefined => "undefined",
            IntrinsicKind::Null => "null",
            IntrinsicKind::Boolean => "boolean",
            IntrinsicKind::Number => "number",
            IntrinsicKind::String => "string",
            IntrinsicKind::Bigint => "bigint",
            IntrinsicKind::Symbol => "symbol",
            IntrinsicKind::Object => "object",
        }
    }

    pub fn from_keyword(keyword: &str) -> Option<IntrinsicKind> {
        Some(match keyword {
            "any" => IntrinsicKind::Any,
            "unknown" => IntrinsicKind::Unknown,
            "never" => IntrinsicKind::Never,
            "void" => IntrinsicKind::Void,
            "undefined" => IntrinsicKind::Undefined,
            "null" => IntrinsicKind::Null,
            "boolean" => IntrinsicKind::Boolean,
            "number" => IntrinsicKind::Number,
            "string" => IntrinsicKind::String,
            "bigint" => IntrinsicKind::Bigint,
            "symbol" => IntrinsicKind::Symbol,
            "object" => IntrinsicKind::Object,
            _ => return None,
        })
    }
}

/// `f64` with total equality and hashing so number literals can be interned.
#[derive(Clone, Copy, Debug)]
pub struct OrderedFloat(pub f64);

impl PartialEq for OrderedFloat {
    fn eq(&self, other: &Self) -> bool {
        self.0.to_bits() == other.0.to_bits()
    }
}

impl Eq for OrderedFloat {}

impl Hash for OrderedFloat {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}

/// The value carried by a literal type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LiteralValue {
    String(Atom),
    Number(OrderedFloat),
    Boolean(bool),
    /// Decimal digits, optionally prefixed with `-`.
    BigInt(Atom),
}

impl LiteralValue {
    /// The wide primitive this literal belongs to.
    pub const fn primitive(self) -> TypeId {
        match self {
            LiteralValue::String(_) => TypeId::STRING,
            LiteralValue::Number(_) => TypeId::NUMBER,
            LiteralValue::Boolean(_) => TypeId::BOOLEAN,
            LiteralValue::BigInt(_) => TypeId::BIGINT,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TypeListId(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TupleListId(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ObjectShapeId(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FunctionShapeId(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CallableShapeId(pub u32);

/// Structural description of a type. Interned into a [`TypeId`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeKey {
    Intrinsic(IntrinsicKind),
    Literal(LiteralValue),
    /// Normalized union (flattened, deduplicated, at least two members).
    Union(TypeListId),
    /// Homogeneous array `T[]`.
    Array(TypeId),
    /// Fixed-length tuple.
    Tuple(TupleListId),
    /// `readonly` wrapper around an array or tuple.
    ReadonlyType(TypeId),
    /// Structural object with properties and optional index signatures.
    Object(ObjectShapeId),
    /// A single call or construct signature.
    Function(FunctionShapeId),
    /// A signature that also carries its own data properties.
    Callable(CallableShapeId),
    /// `Promise<T>`.
    Promise(TypeId),
    /// Reference to a named definition; may be self-referential.
    Lazy(DefId),
}

/// A property of an object or callable shape.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PropertyInfo {
    pub name: Atom,
    pub type_id: TypeId,
    pub optional: bool,
    pub readonly: bool,
}

impl PropertyInfo {
    /// A required, mutable property.
    pub fn new(name: Atom, type_id: TypeId) -> Self {
        PropertyInfo {
            name,
            type_id,
            optional: false,
            readonly: false,
        }
    }

    pub fn optional(name: Atom, type_id: TypeId) -> Self {
        PropertyInfo {
            optional: true,
            ..Self::new(name, type_id)
        }
    }

    pub fn readonly(name: Atom, type_id: TypeId) -> Self {
        PropertyInfo {
            readonly: true,
            ..Self::new(name, type_id)
        }
    }
}

/// `[key: string]: T` or `[key: number]: T`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct IndexSignature {
    pub value_type: TypeId,
    pub readonly: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ObjectShape {
    /// Properties in declaration order.
    pub properties: Vec<PropertyInfo>,
    pub string_index: Option<IndexSignature>,
    pub number_index: Option<IndexSignature>,
}

impl ObjectShape {
    /// True when the shape declares no properties and no index signatures.
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty() && self.string_index.is_none() && self.number_index.is_none()
    }

    pub fn property(&self, name: Atom) -> Option<&PropertyInfo> {
        self.properties.iter().find(|prop| prop.name == name)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ParamInfo {
    pub name: Option<Atom>,
    pub type_id: TypeId,
    pub optional: bool,
    /// Rest parameter; `type_id` is the array or tuple type.
    pub rest: bool,
}

impl ParamInfo {
    pub fn required(name: Option<Atom>, type_id: TypeId) -> Self {
        ParamInfo {
            name,
            type_id,
            optional: false,
            rest: false,
        }
    }

    pub fn optional(name: Option<Atom>, type_id: TypeId) -> Self {
        ParamInfo {
            optional: true,
            ..Self::required(name, type_id)
        }
    }

    pub fn rest(name: Option<Atom>, type_id: TypeId) -> Self {
        ParamInfo {
            rest: true,
            ..Self::required(name, type_id)
        }
    }
}

/// `x is T` / `asserts x is T` / `asserts x` on a signature.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TypePredicate {
    pub asserts: bool,
    pub parameter_index: u32,
    /// `None` for a bare `asserts x`.
    pub type_id: Option<TypeId>,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FunctionShape {
    pub params: Vec<ParamInfo>,
    pub this_type: Option<TypeId>,
    pub return_type: TypeId,
    pub type_predicate: Option<TypePredicate>,
    pub is_constructor: bool,
}

impl FunctionShape {
    /// A call signature with the given parameters and return type.
    pub fn new(params: Vec<ParamInfo>, return_type: TypeId) -> Self {
        FunctionShape {
            params,
            this_type: None,
            return_type,
            type_predicate: None,
            is_constructor: false,
        }
    }

    /// A construct signature producing `instance_type`.
    pub fn constructor(params: Vec<ParamInfo>, instance_type: TypeId) -> Self {
        FunctionShape {
            is_constructor: true,
            ..Self::new(params, instance_type)
        }
    }

    /// Number of parameters that must be supplied.
    pub fn required_param_count(&self) -> usize {
        self.params
            .iter()
            .filter(|param| !param.optional && !param.rest)
            .count()
    }
}

/// A signature plus data properties, e.g. `Object.assign(() => 1, { foo: "bar" })`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CallableShape {
    pub signature: FunctionShape,
    pub properties: Vec<PropertyInfo>,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TupleElement {
    pub type_id: TypeId,
    pub name: Option<Atom>,
    pub optional: bool,
    /// Spread element; `type_id` is the array type.
    pub rest: bool,
}

impl TupleElement {
    pub fn required(type_id: TypeId) -> Self {
        TupleElement {
            type_id,
            name: None,
            optional: false,
            rest: false,
        }
    }

    pub fn optional(type_id: TypeId) -> Self {
        TupleElement {
            optional: true,
            ..Self::required(type_id)
        }
    }

    pub fn rest(type_id: TypeId) -> Self {
        TupleElement {
            rest: true,
            ..Self::required(type_id)
        }
    }
}
