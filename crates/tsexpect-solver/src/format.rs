//! Type printing.
//!
//! Two renderings are provided:
//! - [`print_type`]: the coarse label used by prop maps and mismatch leaves
//!   (`"number"`, `"literal string: a"`, `"function"`, `"..."`).
//! - [`TypeFormatter`]: TypeScript-like source text for messages and the CLI.

use crate::intern::TypeInterner;
use crate::type_classifier::{TypeCategory, classify_type};
use crate::types::*;

/// Label for one non-union type. `None` for `any`, which has no label of its own.
fn print_member(db: &TypeInterner, type_id: TypeId) -> Option<String> {
    let label = match classify_type(db, type_id) {
        TypeCategory::Any => return None,
        TypeCategory::Unknown => "unknown".to_string(),
        TypeCategory::Never => "never".to_string(),
        TypeCategory::String { literal: false } => "string".to_string(),
        TypeCategory::Number { literal: false } => "number".to_string(),
        TypeCategory::Boolean { literal: false } => "boolean".to_string(),
        TypeCategory::Bigint { literal: false } => "bigint".to_string(),
        TypeCategory::String { literal: true }
        | TypeCategory::Number { literal: true }
        | TypeCategory::Boolean { literal: true }
        | TypeCategory::Bigint { literal: true } => literal_label(db, type_id),
        TypeCategory::Symbol => "symbol".to_string(),
        TypeCategory::Null => "null".to_string(),
        TypeCategory::Undefined => "undefined".to_string(),
        TypeCategory::Function => "function".to_string(),
        TypeCategory::Void => "void".to_string(),
        TypeCategory::EmptyTuple => "[]".to_string(),
        TypeCategory::EmptyObject => "{}".to_string(),
        TypeCategory::Other => "...".to_string(),
    };
    Some(label)
}

fn literal_label(db: &TypeInterner, type_id: TypeId) -> String {
    match db.lookup(type_id) {
        Some(TypeKey::Literal(literal)) => {
            let (category, value) = match literal {
                LiteralValue::String(atom) => ("string", db.resolve_atom(atom).to_string()),
                LiteralValue::Number(value) => ("number", format_number(value.0)),
                LiteralValue::Boolean(value) => ("boolean", value.to_string()),
                LiteralValue::BigInt(atom) => ("bigint", db.resolve_atom(atom).to_string()),
            };
            format!("literal {category}: {value}")
        }
        _ => "...".to_string(),
    }
}

/// Printed labels of a type, one per distinct union member label.
///
/// `None` when the type is `any`. `unknown` and `never` are labelled whole;
/// unions are otherwise labelled member by member.
pub fn print_type_labels(db: &TypeInterner, type_id: TypeId) -> Option<Vec<String>> {
    let resolved = db.resolve(type_id);
    if resolved.is_any() {
        return None;
    }
    let mut labels: Vec<String> = Vec::new();
    for member in db.union_members(resolved) {
        if let Some(label) = print_member(db, member)
            && !labels.contains(&label)
        {
            labels.push(label);
        }
    }
    Some(labels)
}

/// The printed label of a type, union labels joined with `" | "`.
///
/// Returns `None` for `any`, which no label can describe: any label would be
/// matched by `any` itself.
pub fn print_type(db: &TypeInterner, type_id: TypeId) -> Option<String> {
    print_type_labels(db, type_id).map(|labels| labels.join(" | "))
}

/// JavaScript number-to-string conversion for the common cases.
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }
    value.to_string()
}

/// Renders types as TypeScript-like source text.
///
/// Named types print as their name, so recursive types terminate.
pub struct TypeFormatter<'a> {
    interner: &'a TypeInterner,
    max_depth: u32,
    depth: u32,
}

impl<'a> TypeFormatter<'a> {
    pub fn new(interner: &'a TypeInterner) -> Self {
        TypeFormatter {
            interner,
            max_depth: 8,
            depth: 0,
        }
    }

    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn format(&mut self, type_id: TypeId) -> String {
        if self.depth >= self.max_depth {
            return "...".to_string();
        }
        self.depth += 1;
        let text = self.format_key(type_id);
        self.depth -= 1;
        text
    }

    fn format_key(&mut self, type_id: TypeId) -> String {
        let Some(key) = self.interner.lookup(type_id) else {
            return format!("<type {}>", type_id.0);
        };
        match key {
            TypeKey::Intrinsic(kind) => kind.keyword().to_string(),
            TypeKey::Literal(literal) => self.format_literal(literal),
            TypeKey::Union(list_id) => {
                let members = self.interner.type_list(list_id);
                let parts: Vec<String> = members.iter().map(|&m| self.format_operand(m)).collect();
                parts.join(" | ")
            }
            TypeKey::Array(element) => format!("{}[]", self.format_operand(element)),
            TypeKey::Tuple(list_id) => {
                let elements = self.interner.tuple_list(list_id);
                let parts: Vec<String> = elements.iter().map(|e| self.format_tuple_element(e)).collect();
                format!("[{}]", parts.join(", "))
            }
            TypeKey::ReadonlyType(inner) => format!("readonly {}", self.format(inner)),
            TypeKey::Object(shape_id) => {
                let shape = self.interner.object_shape(shape_id);
                self.format_object(&shape.properties, shape.string_index.as_ref(), shape.number_index.as_ref(), None)
            }
            TypeKey::Function(shape_id) => {
                let shape = self.interner.function_shape(shape_id);
                self.format_signature(&shape, false)
            }
            TypeKey::Callable(shape_id) => {
                let shape = self.interner.callable_shape(shape_id);
                let signature = self.format_signature(&shape.signature, true);
                self.format_object(&shape.properties, None, None, Some(signature))
            }
            TypeKey::Promise(inner) => format!("Promise<{}>", self.format(inner)),
            TypeKey::Lazy(def_id) => match self.interner.definitions.name(def_id) {
                Some(name) => name.to_string(),
                None => format!("<def {}>", def_id.0),
            },
        }
    }

    /// Parenthesize unions and signatures where they would bind wrongly.
    fn format_operand(&mut self, type_id: TypeId) -> String {
        let text = self.format(type_id);
        match self.interner.lookup(type_id) {
            Some(TypeKey::Union(_)) | Some(TypeKey::Function(_)) => format!("({text})"),
            _ => text,
        }
    }

    fn format_literal(&self, literal: LiteralValue) -> String {
        match literal {
            LiteralValue::String(atom) => format!("{:?}", &*self.interner.resolve_atom(atom)),
            LiteralValue::Number(value) => format_number(value.0),
            LiteralValue::Boolean(value) => value.to_string(),
            LiteralValue::BigInt(atom) => format!("{}n", self.interner.resolve_atom(atom)),
        }
    }

    fn format_tuple_element(&mut self, element: &TupleElement) -> String {
        let type_text = self.format(element.type_id);
        let name = element.name.map(|atom| self.interner.resolve_atom(atom));
        match (name, element.rest, element.optional) {
            (Some(name), true, _) => format!("...{name}: {type_text}"),
            (Some(name), false, true) => format!("{name}?: {type_text}"),
            (Some(name), false, false) => format!("{name}: {type_text}"),
            (None, true, _) => format!("...{type_text}"),
            (None, false, true) => format!("{type_text}?"),
            (None, false, false) => type_text,
        }
    }

    fn format_signature(&mut self, shape: &FunctionShape, in_object: bool) -> String {
        let mut params = Vec::with_capacity(shape.params.len() + 1);
        if let Some(this_type) = shape.this_type {
            params.push(format!("this: {}", self.format(this_type)));
        }
        for (index, param) in shape.params.iter().enumerate() {
            let name = match param.name {
                Some(atom) => self.interner.resolve_atom(atom).to_string(),
                None => format!("arg{index}"),
            };
            let rest = if param.rest { "..." } else { "" };
            let optional = if param.optional { "?" } else { "" };
            params.push(format!("{rest}{name}{optional}: {}", self.format(param.type_id)));
        }

        let return_text = match &shape.type_predicate {
            Some(predicate) => {
                let subject = shape
                    .params
                    .get(predicate.parameter_index as usize)
                    .and_then(|param| param.name)
                    .map(|atom| self.interner.resolve_atom(atom).to_string())
                    .unwrap_or_else(|| format!("arg{}", predicate.parameter_index));
                let asserts = if predicate.asserts { "asserts " } else { "" };
                match predicate.type_id {
                    Some(narrowed) => format!("{asserts}{subject} is {}", self.format(narrowed)),
                    None => format!("{asserts}{subject}"),
                }
            }
            None => self.format(shape.return_type),
        };

        let new = if shape.is_constructor { "new " } else { "" };
        if in_object {
            format!("{new}({}): {return_text}", params.join(", "))
        } else {
            format!("{new}({}) => {return_text}", params.join(", "))
        }
    }

    fn format_object(
        &mut self,
        properties: &[PropertyInfo],
        string_index: Option<&IndexSignature>,
        number_index: Option<&IndexSignature>,
        signature: Option<String>,
    ) -> String {
        let mut members = Vec::with_capacity(properties.len() + 3);
        if let Some(signature) = signature {
            members.push(signature);
        }
        for (key, index) in [("string", string_index), ("number", number_index)] {
            if let Some(index) = index {
                let readonly = if index.readonly { "readonly " } else { "" };
                members.push(format!("{readonly}[key: {key}]: {}", self.format(index.value_type)));
            }
        }
        for prop in properties {
            let readonly = if prop.readonly { "readonly " } else { "" };
            let optional = if prop.optional { "?" } else { "" };
            let name = self.interner.resolve_atom(prop.name);
            members.push(format!(
                "{readonly}{}{optional}: {}",
                format_property_name(&name),
                self.format(prop.type_id)
            ));
        }
        if members.is_empty() {
            return "{}".to_string();
        }
        format!("{{ {} }}", members.join("; "))
    }
}

fn format_property_name(name: &str) -> String {
    let is_identifier = name
        .chars()
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_' || c == '$')
        && name.chars().all(|c| c.is_alphanumeric() || c == '_' || c == '$');
    if is_identifier || crate::type_queries::is_numeric_property_name(name) {
        name.to_string()
    } else {
        format!("{name:?}")
    }
}

#[cfg(test)]
#[path = "tests/format_tests.rs"]
mod tests;
