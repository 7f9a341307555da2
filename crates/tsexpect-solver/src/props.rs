//! Deep structural flattening ("prop printing").
//!
//! A type is walked into a flat map from an escaped, path-shaped key to the
//! set of printed labels found at that position:
//!
//! ```text
//! {x?: {readonly y?: 1}}
//!
//! .x?               => undefined
//! .x?.y(readonly)?  => undefined | literal number: 1
//! ```
//!
//! Two types compared through their prop maps differ as soon as any modifier,
//! literal or nesting differs, which is what makes identity checks strict.
//!
//! Path segments:
//!
//! | Type | Segment |
//! |---|---|
//! | tuple element | `[0]`, `[0](readonly)` |
//! | array element / tuple rest | `[]`, `[](readonly)` |
//! | object property | `.name`, then `(readonly)`, then `?` |
//! | index signature | `[string]`, `[number]` |
//! | call signature | `:args`, `:return`, `:this` |
//! | construct signature | `:constructorParameters`, `:instance` |
//! | promise | `:resolves` |
//!
//! The walk does not detect cycles. Once a path holds
//! [`MAX_PROP_PRINT_DEPTH`] segments a bailout key is emitted with the empty
//! (`never`) label set and that branch stops.

use crate::format::print_type_labels;
use crate::intern::TypeInterner;
use crate::type_classifier::is_empty_object;
use crate::type_queries::{get_constructor_parameters, params_tuple};
use crate::types::*;
use indexmap::IndexMap;
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;
use tracing::debug;
use tsexpect_common::limits::{MAX_PROP_PRINT_DEPTH, PROP_PRINT_BAILOUT_SEGMENT};

/// A union of printed labels. The empty set is `never`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct LabelSet(BTreeSet<String>);

impl LabelSet {
    pub fn never() -> Self {
        LabelSet(BTreeSet::new())
    }

    pub fn single(label: impl Into<String>) -> Self {
        let mut set = BTreeSet::new();
        set.insert(label.into());
        LabelSet(set)
    }

    pub fn is_never(&self) -> bool {
        self.0.is_empty()
    }

    pub fn insert(&mut self, label: impl Into<String>) {
        self.0.insert(label.into());
    }

    pub fn extend(&mut self, other: LabelSet) {
        self.0.extend(other.0);
    }

    pub fn contains(&self, label: &str) -> bool {
        self.0.contains(label)
    }

    /// `never` is a subset of everything.
    pub fn is_subset(&self, other: &LabelSet) -> bool {
        self.0.is_subset(&other.0)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for LabelSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        LabelSet(iter.into_iter().map(Into::into).collect())
    }
}

impl fmt::Display for LabelSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_never() {
            return f.write_str("never");
        }
        for (i, label) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" | ")?;
            }
            f.write_str(label)?;
        }
        Ok(())
    }
}

/// Flattened view of a type: joined path key to label set, in first-visit order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PropMap(IndexMap<String, LabelSet>);

impl PropMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Union `labels` into the entry for `key`.
    pub fn insert(&mut self, key: String, labels: LabelSet) {
        self.0.entry(key).or_default().extend(labels);
    }

    pub fn get(&self, key: &str) -> Option<&LabelSet> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &LabelSet)> {
        self.0.iter().map(|(key, labels)| (key.as_str(), labels))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for PropMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (key, labels) in &self.0 {
            writeln!(f, "{key:?}: {labels}")?;
        }
        Ok(())
    }
}

/// Backslash-escape `\`, `.`, space, `[` and `]` so distinct property names
/// cannot produce the same joined path.
pub fn escape_prop(name: &str) -> String {
    let mut escaped = String::with_capacity(name.len());
    for ch in name.chars() {
        if matches!(ch, '\\' | '.' | ' ' | '[' | ']') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

pub fn join_path<S: AsRef<str>>(segments: &[S]) -> String {
    segments.iter().map(AsRef::as_ref).collect()
}

/// Flatten `type_id` into its [`PropMap`].
pub fn print_props(db: &TypeInterner, type_id: TypeId) -> PropMap {
    let mut printer = PropPrinter::new(db);
    printer.visit(type_id);
    printer.finish()
}

/// Walks a type with an explicit path accumulator.
pub struct PropPrinter<'a> {
    db: &'a TypeInterner,
    path: Vec<String>,
    props: PropMap,
}

impl<'a> PropPrinter<'a> {
    pub fn new(db: &'a TypeInterner) -> Self {
        PropPrinter {
            db,
            path: Vec::with_capacity(MAX_PROP_PRINT_DEPTH),
            props: PropMap::new(),
        }
    }

    pub fn finish(self) -> PropMap {
        self.props
    }

    pub fn visit(&mut self, type_id: TypeId) {
        if self.path.len() >= MAX_PROP_PRINT_DEPTH {
            let key = format!("{}{}", join_path(&self.path), PROP_PRINT_BAILOUT_SEGMENT);
            debug!(%key, "prop printer depth limit reached");
            self.props.insert(key, LabelSet::never());
            return;
        }

        let resolved = self.db.resolve(type_id);
        if resolved.is_any() {
            self.emit(LabelSet::single("any"));
            return;
        }
        if resolved.is_unknown() || resolved.is_never() || is_empty_object(self.db, resolved) {
            self.emit_printed(resolved);
            return;
        }

        for member in self.db.union_members(resolved) {
            self.visit_member(member);
        }
    }

    fn visit_member(&mut self, type_id: TypeId) {
        let Some(key) = self.db.lookup(type_id) else {
            self.emit_printed(type_id);
            return;
        };

        match key {
            TypeKey::Intrinsic(_) | TypeKey::Literal(_) => self.emit_printed(type_id),
            TypeKey::Union(_) => self.visit(type_id),
            TypeKey::Lazy(_) => self.visit(type_id),
            TypeKey::Tuple(list_id) => self.visit_tuple(type_id, list_id, false),
            TypeKey::Array(element) => self.visit_at("[]", element),
            TypeKey::ReadonlyType(inner) => match self.db.lookup(inner) {
                Some(TypeKey::Tuple(list_id)) => self.visit_tuple(inner, list_id, true),
                Some(TypeKey::Array(element)) => self.visit_at("[](readonly)", element),
                _ => self.visit(inner),
            },
            TypeKey::Function(shape_id) => {
                let shape = self.db.function_shape(shape_id);
                self.visit_signature(&shape);
            }
            TypeKey::Callable(shape_id) => {
                let shape = self.db.callable_shape(shape_id);
                self.visit_signature(&shape.signature);
                if !shape.signature.is_constructor && !shape.properties.is_empty() {
                    let properties = ObjectShape {
                        properties: shape.properties.clone(),
                        string_index: None,
                        number_index: None,
                    };
                    self.visit_object(&properties);
                }
            }
            TypeKey::Promise(inner) => self.visit_at(":resolves", inner),
            TypeKey::Object(shape_id) => {
                let shape = self.db.object_shape(shape_id);
                self.visit_object(&shape);
            }
        }
    }

    fn visit_tuple(&mut self, tuple_type: TypeId, list_id: TupleListId, readonly: bool) {
        let elements = self.db.tuple_list(list_id);
        if elements.is_empty() {
            self.emit_printed(tuple_type);
            return;
        }
        for (index, element) in elements.iter().enumerate() {
            if element.rest {
                // The rest type is an array; the array rule adds the `[]` segment.
                self.visit(element.type_id);
                continue;
            }
            let segment = if readonly {
                format!("[{index}](readonly)")
            } else {
                format!("[{index}]")
            };
            let element_type = if element.optional {
                self.db.union2(element.type_id, TypeId::UNDEFINED)
            } else {
                element.type_id
            };
            self.visit_at(segment, element_type);
        }
    }

    fn visit_signature(&mut self, shape: &FunctionShape) {
        if shape.is_constructor {
            let params = get_constructor_parameters_of(self.db, shape);
            self.visit_at(":constructorParameters", params);
            self.visit_at(":instance", shape.return_type);
            return;
        }
        let params = params_tuple(self.db, shape);
        self.visit_at(":args", params);
        self.visit_at(":return", shape.return_type);
        self.visit_at(":this", shape.this_type.unwrap_or(TypeId::UNKNOWN));
    }

    fn visit_object(&mut self, shape: &ObjectShape) {
        for prop in &shape.properties {
            let name = self.db.resolve_atom(prop.name);
            let mut pushed = 1;
            self.path.push(format!(".{}", escape_prop(&name)));
            if prop.readonly {
                self.path.push("(readonly)".to_string());
                pushed += 1;
            }
            if prop.optional {
                self.path.push("?".to_string());
                pushed += 1;
            }
            let prop_type = if prop.optional {
                self.db.union2(prop.type_id, TypeId::UNDEFINED)
            } else {
                prop.type_id
            };
            self.visit(prop_type);
            self.path.truncate(self.path.len() - pushed);
        }

        for (segment, index) in [("[string]", &shape.string_index), ("[number]", &shape.number_index)] {
            let Some(index) = index else {
                continue;
            };
            if index.readonly {
                self.path.push(segment.to_string());
                self.visit_at("(readonly)", index.value_type);
                self.path.pop();
            } else {
                self.visit_at(segment, index.value_type);
            }
        }
    }

    fn visit_at(&mut self, segment: impl Into<String>, type_id: TypeId) {
        self.path.push(segment.into());
        self.visit(type_id);
        self.path.pop();
    }

    fn emit_printed(&mut self, type_id: TypeId) {
        let labels = match print_type_labels(self.db, type_id) {
            Some(labels) => labels.into_iter().collect(),
            None => LabelSet::single("any"),
        };
        self.emit(labels);
    }

    fn emit(&mut self, labels: LabelSet) {
        self.props.insert(join_path(&self.path), labels);
    }
}

fn get_constructor_parameters_of(db: &TypeInterner, shape: &FunctionShape) -> TypeId {
    let constructor = db.function(shape.clone());
    get_constructor_parameters(db, constructor).unwrap_or(TypeId::NEVER)
}

#[cfg(test)]
#[path = "tests/props_tests.rs"]
mod tests;
