//! Structural type-assertion solver
//!
//! This crate decides whether one type description is assignable to,
//! identical to, or different from another, and explains the difference.
//! It uses:
//!
//! - **Interned `TypeKey`s**: structural type representation with `TypeId` handles
//! - **Coinductive assignability**: recursive named types compare without looping
//! - **Prop maps**: types flattened into path-keyed label sets for strict identity
//!
//! Key benefits:
//! - O(1) type equality via interning (`TypeId` comparison)
//! - Identity that sees `readonly`, `?` and literal-vs-wide differences
//! - Mismatch diffs that mirror the structure of the compared types
pub mod def;
pub mod expect;
pub mod format;
mod intern;
pub mod logic;
pub mod mismatch;
pub mod props;
pub mod recursion;
pub mod relation;
pub mod subtype;
mod subtype_rules;
pub mod type_classifier;
pub mod type_queries;
pub mod types;
pub use def::{DefId, DefinitionStore};
pub use expect::{AssertionError, AssertionResult, ExpectTypeOf, expect_type_of};
pub use format::{TypeFormatter, print_type};
pub use intern::TypeInterner;
pub use mismatch::{MismatchInfo, mismatch_info};
pub use props::{LabelSet, PropMap, escape_prop, join_path, print_props};
pub use relation::{equal, extends, strict_extends};
pub use subtype::{SubtypeChecker, SubtypeResult};
pub use type_classifier::{TypeCategory, classify_type};
pub use types::*;
#[cfg(test)]
#[path = "tests/test_utils.rs"]
mod test_utils;
