//! Mismatch explanation.
//!
//! When an assertion fails, [`mismatch_info`] mirrors the structure of the
//! actual type and replaces each differing leaf with an
//! `Expected: <label>, Actual: <label>` message. Matching subtrees are kept
//! as the actual type, so the diff reads like the type itself:
//!
//! ```text
//! actual:   { a: 1; b: { c: string } }
//! expected: { a: 1; b: { c: number } }
//!
//! { a: 1; b: { c: Expected: number, Actual: string } }
//! ```

use crate::format::{TypeFormatter, print_type};
use crate::intern::TypeInterner;
use crate::recursion::{DepthCounter, RecursionProfile};
use crate::relation::equal;
use crate::type_queries::{MemberKey, member_type, own_members};
use crate::types::TypeId;
use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt;
use tracing::debug;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MismatchInfo {
    /// Both sides are identical here.
    Same { type_id: TypeId, display: String },
    /// The sides differ and cannot be decomposed further.
    Leaf { expected: String, actual: String },
    /// Member-by-member comparison, keyed by member name.
    Object(IndexMap<String, MismatchInfo>),
}

impl MismatchInfo {
    /// True if no leaf in the tree differs.
    pub fn is_same(&self) -> bool {
        match self {
            MismatchInfo::Same { .. } => true,
            MismatchInfo::Leaf { .. } => false,
            MismatchInfo::Object(members) => members.values().all(MismatchInfo::is_same),
        }
    }

    /// Every differing leaf with its dotted member path.
    pub fn differences(&self) -> Vec<(String, &str, &str)> {
        let mut out = Vec::new();
        self.collect_differences(String::new(), &mut out);
        out
    }

    fn collect_differences<'s>(&'s self, path: String, out: &mut Vec<(String, &'s str, &'s str)>) {
        match self {
            MismatchInfo::Same { .. } => {}
            MismatchInfo::Leaf { expected, actual } => out.push((path, expected, actual)),
            MismatchInfo::Object(members) => {
                for (key, info) in members {
                    let child = if path.is_empty() {
                        key.clone()
                    } else {
                        format!("{path}.{key}")
                    };
                    info.collect_differences(child, out);
                }
            }
        }
    }

    fn leaf_message(expected: &str, actual: &str) -> String {
        format!("Expected: {expected}, Actual: {actual}")
    }
}

impl fmt::Display for MismatchInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MismatchInfo::Same { display, .. } => f.write_str(display),
            MismatchInfo::Leaf { expected, actual } => {
                f.write_str(&MismatchInfo::leaf_message(expected, actual))
            }
            MismatchInfo::Object(members) => {
                if members.is_empty() {
                    return f.write_str("{}");
                }
                f.write_str("{ ")?;
                for (i, (key, info)) in members.iter().enumerate() {
                    if i > 0 {
                        f.write_str("; ")?;
                    }
                    write!(f, "{key}: {info}")?;
                }
                f.write_str(" }")
            }
        }
    }
}

impl Serialize for MismatchInfo {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            MismatchInfo::Same { display, .. } => serializer.serialize_str(display),
            MismatchInfo::Leaf { expected, actual } => {
                serializer.serialize_str(&MismatchInfo::leaf_message(expected, actual))
            }
            MismatchInfo::Object(members) => {
                let mut map = serializer.serialize_map(Some(members.len()))?;
                for (key, info) in members {
                    map.serialize_entry(key, info)?;
                }
                map.end()
            }
        }
    }
}

/// Explain how `actual` differs from `expected`.
pub fn mismatch_info(db: &TypeInterner, actual: TypeId, expected: TypeId) -> MismatchInfo {
    MismatchExplainer::new(db).explain(actual, expected)
}

struct MismatchExplainer<'a> {
    db: &'a TypeInterner,
    depth: DepthCounter,
}

impl<'a> MismatchExplainer<'a> {
    fn new(db: &'a TypeInterner) -> Self {
        MismatchExplainer {
            db,
            depth: DepthCounter::with_profile(RecursionProfile::MismatchExplain),
        }
    }

    fn explain(&mut self, actual: TypeId, expected: TypeId) -> MismatchInfo {
        let actual_label = print_type(self.db, actual);
        let decompose = actual_label.as_deref() == Some("...");

        if decompose {
            if self.depth.enter() {
                let members = self.explain_members(actual, expected);
                self.depth.leave();
                if let Some(members) = members {
                    // Members agree but modifiers differ: report the whole node.
                    if members.values().all(MismatchInfo::is_same)
                        && !equal(self.db, actual, expected)
                    {
                        let mut fmt = TypeFormatter::new(self.db);
                        return MismatchInfo::Leaf {
                            expected: fmt.format(expected),
                            actual: fmt.format(actual),
                        };
                    }
                    return MismatchInfo::Object(members);
                }
            } else {
                debug!(actual = actual.0, expected = expected.0, "mismatch depth limit reached");
            }
        }

        if equal(self.db, actual, expected) {
            return MismatchInfo::Same {
                type_id: actual,
                display: TypeFormatter::new(self.db).format(actual),
            };
        }

        MismatchInfo::Leaf {
            expected: label_or_any(print_type(self.db, expected)),
            actual: label_or_any(actual_label),
        }
    }

    /// `None` when neither side has members to compare.
    fn explain_members(
        &mut self,
        actual: TypeId,
        expected: TypeId,
    ) -> Option<IndexMap<String, MismatchInfo>> {
        let mut keys: Vec<MemberKey> = own_members(self.db, actual);
        for key in own_members(self.db, expected) {
            if !keys.contains(&key) {
                keys.push(key);
            }
        }
        if keys.is_empty() {
            return None;
        }

        let mut members = IndexMap::with_capacity(keys.len());
        for key in keys {
            let actual_member = member_type(self.db, actual, &key).unwrap_or(TypeId::NEVER);
            let expected_member = member_type(self.db, expected, &key).unwrap_or(TypeId::NEVER);
            let info = self.explain(actual_member, expected_member);
            members.insert(key.display(self.db).to_string(), info);
        }
        Some(members)
    }
}

fn label_or_any(label: Option<String>) -> String {
    label.unwrap_or_else(|| "any".to_string())
}

#[cfg(test)]
#[path = "tests/mismatch_tests.rs"]
mod tests;
