//! Object, index signature and augmented callable assignability.
//!
//! - Width subtyping: the source may declare more properties than the target.
//! - Depth subtyping: shared properties are compared covariantly.
//! - An optional source property cannot satisfy a required target property.
//! - `readonly` does not affect assignability.
//! - A target index signature constrains every source property and index.

use crate::subtype::{SubtypeChecker, SubtypeResult};
use crate::type_queries::{is_numeric_property_name, tuple_element_read_type};
use crate::types::*;

impl SubtypeChecker<'_> {
    pub(crate) fn check_object_target(
        &mut self,
        source_key: &TypeKey,
        target: &ObjectShape,
    ) -> SubtypeResult {
        let source = self.object_view(source_key);
        self.check_object_subtype(&source, target)
    }

    pub(crate) fn check_callable_target(
        &mut self,
        source_key: &TypeKey,
        target: &CallableShape,
    ) -> SubtypeResult {
        let Some(signature) = self.source_signature(source_key) else {
            return SubtypeResult::False;
        };
        let result = self.check_function_subtype(&signature, &target.signature);
        if !result.is_true() {
            return result;
        }

        let source = self.object_view(source_key);
        let target = ObjectShape {
            properties: target.properties.clone(),
            string_index: None,
            number_index: None,
        };
        self.check_object_subtype(&source, &target)
    }

    /// The properties and index signatures a source type exposes when
    /// compared against an object type.
    fn object_view(&self, source_key: &TypeKey) -> ObjectShape {
        match source_key {
            TypeKey::Object(shape_id) => self.interner.object_shape(*shape_id).as_ref().clone(),
            TypeKey::Callable(shape_id) => ObjectShape {
                properties: self.interner.callable_shape(*shape_id).properties.clone(),
                string_index: None,
                number_index: None,
            },
            TypeKey::ReadonlyType(inner) => match self.interner.lookup(*inner) {
                Some(inner_key) => {
                    let mut view = self.object_view(&inner_key);
                    for prop in &mut view.properties {
                        prop.readonly = true;
                    }
                    if let Some(index) = &mut view.number_index {
                        index.readonly = true;
                    }
                    view
                }
                None => ObjectShape::default(),
            },
            TypeKey::Array(element) => ObjectShape {
                properties: vec![self.length_property(TypeId::NUMBER)],
                string_index: None,
                number_index: Some(IndexSignature {
                    value_type: *element,
                    readonly: false,
                }),
            },
            TypeKey::Tuple(list_id) => {
                let elements = self.interner.tuple_list(*list_id);
                let mut properties = Vec::with_capacity(elements.len() + 1);
                let mut element_types = Vec::with_capacity(elements.len());
                let mut fixed_length = true;
                for (index, element) in elements.iter().enumerate() {
                    let read_type = tuple_element_read_type(self.interner, element);
                    element_types.push(read_type);
                    if element.rest {
                        fixed_length = false;
                        continue;
                    }
                    let name = self.interner.intern_string(&index.to_string());
                    properties.push(PropertyInfo {
                        name,
                        type_id: element.type_id,
                        optional: element.optional,
                        readonly: false,
                    });
                }
                let length_type = if fixed_length && elements.iter().all(|e| !e.optional) {
                    self.interner.literal_number(elements.len() as f64)
                } else {
                    TypeId::NUMBER
                };
                properties.push(self.length_property(length_type));
                ObjectShape {
                    properties,
                    string_index: None,
                    number_index: Some(IndexSignature {
                        value_type: self.interner.union(element_types),
                        readonly: false,
                    }),
                }
            }
            _ => ObjectShape::default(),
        }
    }

    fn length_property(&self, type_id: TypeId) -> PropertyInfo {
        PropertyInfo::new(self.interner.intern_string("length"), type_id)
    }

    pub(crate) fn check_object_subtype(
        &mut self,
        source: &ObjectShape,
        target: &ObjectShape,
    ) -> SubtypeResult {
        for target_prop in &target.properties {
            match source.property(target_prop.name) {
                Some(source_prop) => {
                    if source_prop.optional && !target_prop.optional {
                        return SubtypeResult::False;
                    }
                    let target_type = if target_prop.optional {
                        self.interner.union2(target_prop.type_id, TypeId::UNDEFINED)
                    } else {
                        target_prop.type_id
                    };
                    let result = self.check_subtype(source_prop.type_id, target_type);
                    if !result.is_true() {
                        return result;
                    }
                }
                None if target_prop.optional => {}
                None => return SubtypeResult::False,
            }
        }

        if let Some(target_index) = &target.string_index {
            let result = self.check_string_index(source, target_index.value_type);
            if !result.is_true() {
                return result;
            }
        }
        if let Some(target_index) = &target.number_index {
            let result = self.check_number_index(source, target_index.value_type);
            if !result.is_true() {
                return result;
            }
        }

        SubtypeResult::True
    }

    fn check_string_index(&mut self, source: &ObjectShape, value_type: TypeId) -> SubtypeResult {
        for prop in &source.properties {
            let result = self.check_subtype(prop.type_id, value_type);
            if !result.is_true() {
                return result;
            }
        }
        for index in [&source.string_index, &source.number_index].into_iter().flatten() {
            let result = self.check_subtype(index.value_type, value_type);
            if !result.is_true() {
                return result;
            }
        }
        SubtypeResult::True
    }

    fn check_number_index(&mut self, source: &ObjectShape, value_type: TypeId) -> SubtypeResult {
        for prop in &source.properties {
            let name = self.interner.resolve_atom(prop.name);
            if !is_numeric_property_name(&name) {
                continue;
            }
            let result = self.check_subtype(prop.type_id, value_type);
            if !result.is_true() {
                return result;
            }
        }
        let source_index = source.number_index.as_ref().or(source.string_index.as_ref());
        match source_index {
            Some(index) => self.check_subtype(index.value_type, value_type),
            None => SubtypeResult::True,
        }
    }
}
