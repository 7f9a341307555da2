//! Type interning for structural deduplication.
//!
//! This module implements the interning engine that converts [`TypeKey`]
//! structures into lightweight [`TypeId`] handles.
//!
//! Benefits:
//! - O(1) type equality for structurally identical descriptions
//! - Each unique structure stored once
//! - Shapes and lists are shared through `Arc`s

use crate::def::{DefId, DefinitionStore};
use crate::types::*;
use rustc_hash::{FxHashMap, FxHasher};
use smallvec::SmallVec;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, RwLock};
use tsexpect_common::limits::MAX_ALIAS_RESOLUTION_DEPTH;
use tsexpect_common::{Atom, ShardedInterner};

const SHARD_BITS: u32 = 4;
const SHARD_COUNT: usize = 1 << SHARD_BITS;
const SHARD_MASK: u32 = (SHARD_COUNT as u32) - 1;
const TYPE_LIST_INLINE: usize = 8;

type TypeListBuffer = SmallVec<[TypeId; TYPE_LIST_INLINE]>;

struct TypeShard {
    key_to_index: RwLock<FxHashMap<TypeKey, u32>>,
    index_to_key: RwLock<Vec<TypeKey>>,
}

impl TypeShard {
    fn new() -> Self {
        TypeShard {
            key_to_index: RwLock::new(FxHashMap::default()),
            index_to_key: RwLock::new(Vec::new()),
        }
    }
}

struct SliceInterner<T> {
    items: Vec<Arc<[T]>>,
    map: FxHashMap<Arc<[T]>, u32>,
}

impl<T> SliceInterner<T>
where
    T: Eq + Hash,
{
    fn new() -> Self {
        let empty: Arc<[T]> = Arc::from(Vec::new());
        let mut map = FxHashMap::default();
        map.insert(empty.clone(), 0);
        SliceInterner {
            items: vec![empty],
            map,
        }
    }

    fn intern(&mut self, items: Vec<T>) -> u32 {
        if items.is_empty() {
            return 0;
        }

        if let Some(&id) = self.map.get(items.as_slice()) {
            return id;
        }

        let arc: Arc<[T]> = items.into();
        let id = self.items.len() as u32;
        self.items.push(arc.clone());
        self.map.insert(arc, id);
        id
    }

    fn get(&self, id: u32) -> Option<Arc<[T]>> {
        self.items.get(id as usize).cloned()
    }

    fn empty(&self) -> Arc<[T]> {
        self.items[0].clone()
    }
}

struct ValueInterner<T> {
    items: Vec<Arc<T>>,
    map: FxHashMap<Arc<T>, u32>,
}

impl<T> ValueInterner<T>
where
    T: Eq + Hash,
{
    fn new() -> Self {
        ValueInterner {
            items: Vec::new(),
            map: FxHashMap::default(),
        }
    }

    fn intern(&mut self, value: T) -> u32 {
        if let Some(&id) = self.map.get(&value) {
            return id;
        }

        let arc = Arc::new(value);
        let id = self.items.len() as u32;
        self.items.push(arc.clone());
        self.map.insert(arc, id);
        id
    }

    fn get(&self, id: u32) -> Option<Arc<T>> {
        self.items.get(id as usize).cloned()
    }
}

/// Type interning table.
/// Thread-safe via RwLock for concurrent access.
pub struct TypeInterner {
    shards: [TypeShard; SHARD_COUNT],
    /// String interner for property names and string literals
    pub string_interner: ShardedInterner,
    /// Named definitions referenced by `Lazy` types
    pub definitions: DefinitionStore,
    type_lists: RwLock<SliceInterner<TypeId>>,
    tuple_lists: RwLock<SliceInterner<TupleElement>>,
    object_shapes: RwLock<ValueInterner<ObjectShape>>,
    function_shapes: RwLock<ValueInterner<FunctionShape>>,
    callable_shapes: RwLock<ValueInterner<CallableShape>>,
}

impl TypeInterner {
    /// Create a new type interner with pre-registered intrinsics
    pub fn new() -> Self {
        TypeInterner {
            shards: std::array::from_fn(|_| TypeShard::new()),
            string_interner: ShardedInterner::new(),
            definitions: DefinitionStore::new(),
            type_lists: RwLock::new(SliceInterner::new()),
            tuple_lists: RwLock::new(SliceInterner::new()),
            object_shapes: RwLock::new(ValueInterner::new()),
            function_shapes: RwLock::new(ValueInterner::new()),
            callable_shapes: RwLock::new(ValueInterner::new()),
        }
    }

    pub fn intern_string(&self, s: &str) -> Atom {
        self.string_interner.intern(s)
    }

    pub fn resolve_atom(&self, atom: Atom) -> Arc<str> {
        self.string_interner.resolve(atom)
    }

    pub fn type_list(&self, id: TypeListId) -> Arc<[TypeId]> {
        let lists = self.type_lists.read().expect("type_lists lock poisoned");
        lists.get(id.0).unwrap_or_else(|| lists.empty())
    }

    pub fn tuple_list(&self, id: TupleListId) -> Arc<[TupleElement]> {
        let lists = self.tuple_lists.read().expect("tuple_lists lock poisoned");
        lists.get(id.0).unwrap_or_else(|| lists.empty())
    }

    pub fn object_shape(&self, id: ObjectShapeId) -> Arc<ObjectShape> {
        let shapes = self.object_shapes.read().expect("object_shapes lock poisoned");
        shapes
            .get(id.0)
            .unwrap_or_else(|| Arc::new(ObjectShape::default()))
    }

    pub fn function_shape(&self, id: FunctionShapeId) -> Arc<FunctionShape> {
        let shapes = self.function_shapes.read().expect("function_shapes lock poisoned");
        shapes.get(id.0).unwrap_or_else(|| {
            Arc::new(FunctionShape::new(Vec::new(), TypeId::UNKNOWN))
        })
    }

    pub fn callable_shape(&self, id: CallableShapeId) -> Arc<CallableShape> {
        let shapes = self.callable_shapes.read().expect("callable_shapes lock poisoned");
        shapes.get(id.0).unwrap_or_else(|| {
            Arc::new(CallableShape {
                signature: FunctionShape::new(Vec::new(), TypeId::UNKNOWN),
                properties: Vec::new(),
            })
        })
    }

    /// Intern a type key and return its TypeId.
    /// If the key already exists, returns the existing TypeId.
    pub fn intern(&self, key: TypeKey) -> TypeId {
        if let Some(id) = self.get_intrinsic_id(&key) {
            return id;
        }

        let mut hasher = FxHasher::default();
        key.hash(&mut hasher);
        let shard_idx = (hasher.finish() as usize) & (SHARD_COUNT - 1);
        let shard = &self.shards[shard_idx];

        {
            let map = shard.key_to_index.read().expect("shard key_to_index lock poisoned");
            if let Some(&local_index) = map.get(&key) {
                return self.make_id(local_index, shard_idx as u32);
            }
        }

        let mut map = shard.key_to_index.write().expect("shard key_to_index lock poisoned");
        let mut storage = shard.index_to_key.write().expect("shard index_to_key lock poisoned");

        if let Some(&local_index) = map.get(&key) {
            return self.make_id(local_index, shard_idx as u32);
        }

        let local_index = storage.len() as u32;
        if local_index > ((u32::MAX - TypeId::FIRST_USER) >> SHARD_BITS) {
            return TypeId::UNKNOWN;
        }

        storage.push(key.clone());
        map.insert(key, local_index);

        self.make_id(local_index, shard_idx as u32)
    }

    /// Look up the TypeKey for a given TypeId
    pub fn lookup(&self, id: TypeId) -> Option<TypeKey> {
        if id.is_intrinsic() {
            return self.get_intrinsic_key(id);
        }

        let raw_val = id.0.checked_sub(TypeId::FIRST_USER)?;
        let shard_idx = (raw_val & SHARD_MASK) as usize;
        let local_index = raw_val >> SHARD_BITS;

        let shard = self.shards.get(shard_idx)?;
        let storage = shard.index_to_key.read().expect("shard index_to_key lock poisoned");
        storage.get(local_index as usize).cloned()
    }

    /// Follow `Lazy` references until a structural type is reached.
    ///
    /// Declared-but-undefined names and alias cycles (`type A = B; type B = A`)
    /// resolve to `unknown`. Unions holding named members are re-normalized,
    /// since those names may have been defined after the union was built.
    pub fn resolve(&self, id: TypeId) -> TypeId {
        let mut current = id;
        for _ in 0..MAX_ALIAS_RESOLUTION_DEPTH {
            match self.lookup(current) {
                Some(TypeKey::Lazy(def_id)) => match self.definitions.body(def_id) {
                    Some(body) => current = body,
                    None => {
                        tracing::debug!(def_id = def_id.0, "lazy type has no body");
                        return TypeId::UNKNOWN;
                    }
                },
                Some(TypeKey::Union(list_id)) => return self.refresh_union(current, list_id),
                _ => return current,
            }
        }
        tracing::debug!(type_id = id.0, "alias resolution depth exceeded");
        TypeId::UNKNOWN
    }

    fn intern_type_list(&self, members: Vec<TypeId>) -> TypeListId {
        let mut lists = self.type_lists.write().expect("type_lists lock poisoned");
        TypeListId(lists.intern(members))
    }

    fn intern_tuple_list(&self, elements: Vec<TupleElement>) -> TupleListId {
        let mut lists = self.tuple_lists.write().expect("tuple_lists lock poisoned");
        TupleListId(lists.intern(elements))
    }

    fn intern_object_shape(&self, shape: ObjectShape) -> ObjectShapeId {
        let mut shapes = self.object_shapes.write().expect("object_shapes lock poisoned");
        ObjectShapeId(shapes.intern(shape))
    }

    fn intern_function_shape(&self, shape: FunctionShape) -> FunctionShapeId {
        let mut shapes = self.function_shapes.write().expect("function_shapes lock poisoned");
        FunctionShapeId(shapes.intern(shape))
    }

    fn intern_callable_shape(&self, shape: CallableShape) -> CallableShapeId {
        let mut shapes = self.callable_shapes.write().expect("callable_shapes lock poisoned");
        CallableShapeId(shapes.intern(shape))
    }

    /// Get the number of interned types
    pub fn len(&self) -> usize {
        let mut total = TypeId::FIRST_USER as usize;
        for shard in &self.shards {
            total += shard
                .index_to_key
                .read()
                .expect("shard index_to_key lock poisoned")
                .len();
        }
        total
    }

    /// Check if the interner is empty (only has intrinsics)
    pub fn is_empty(&self) -> bool {
        self.len() <= TypeId::FIRST_USER as usize
    }

    #[inline]
    fn make_id(&self, local_index: u32, shard_idx: u32) -> TypeId {
        let raw_val = (local_index << SHARD_BITS) | (shard_idx & SHARD_MASK);
        TypeId(TypeId::FIRST_USER + raw_val)
    }

    fn get_intrinsic_id(&self, key: &TypeKey) -> Option<TypeId> {
        match key {
            TypeKey::Intrinsic(kind) => Some(kind.to_type_id()),
            TypeKey::Literal(LiteralValue::Boolean(true)) => Some(TypeId::BOOLEAN_TRUE),
            TypeKey::Literal(LiteralValue::Boolean(false)) => Some(TypeId::BOOLEAN_FALSE),
            _ => None,
        }
    }

    fn get_intrinsic_key(&self, id: TypeId) -> Option<TypeKey> {
        match id {
            TypeId::BOOLEAN_TRUE => Some(TypeKey::Literal(LiteralValue::Boolean(true))),
            TypeId::BOOLEAN_FALSE => Some(TypeKey::Literal(LiteralValue::Boolean(false))),
            _ => IntrinsicKind::from_type_id(id).map(TypeKey::Intrinsic),
        }
    }

    // =========================================================================
    // Convenience methods for common type constructions
    // =========================================================================

    pub fn intrinsic(&self, kind: IntrinsicKind) -> TypeId {
        kind.to_type_id()
    }

    pub fn literal_string(&self, value: &str) -> TypeId {
        let atom = self.intern_string(value);
        self.intern(TypeKey::Literal(LiteralValue::String(atom)))
    }

    pub fn literal_number(&self, value: f64) -> TypeId {
        self.intern(TypeKey::Literal(LiteralValue::Number(OrderedFloat(value))))
    }

    pub fn literal_boolean(&self, value: bool) -> TypeId {
        self.intern(TypeKey::Literal(LiteralValue::Boolean(value)))
    }

    pub fn literal_bigint(&self, value: &str) -> TypeId {
        let atom = self.intern_string(value);
        self.intern(TypeKey::Literal(LiteralValue::BigInt(atom)))
    }

    /// Intern a union type, normalizing and deduplicating members
    pub fn union(&self, members: Vec<TypeId>) -> TypeId {
        self.union_from_iter(members)
    }

    pub fn union2(&self, left: TypeId, right: TypeId) -> TypeId {
        self.union_from_iter([left, right])
    }

    fn union_from_iter<I>(&self, members: I) -> TypeId
    where
        I: IntoIterator<Item = TypeId>,
    {
        let mut iter = members.into_iter();
        let Some(first) = iter.next() else {
            return TypeId::NEVER;
        };
        let Some(second) = iter.next() else {
            return first;
        };

        let mut flat: TypeListBuffer = SmallVec::new();
        self.push_union_member(&mut flat, first, 0);
        self.push_union_member(&mut flat, second, 0);
        for member in iter {
            self.push_union_member(&mut flat, member, 0);
        }

        self.normalize_union(flat)
    }

    /// Flatten `member` into `flat`.
    ///
    /// Named members whose body is an intrinsic, a literal or a union are
    /// replaced by that body so `never` drops out and `any` absorbs. Named
    /// structural members stay named; undefined names stay as they are.
    fn push_union_member(&self, flat: &mut TypeListBuffer, member: TypeId, depth: u32) {
        match self.lookup(member) {
            Some(TypeKey::Union(inner)) => {
                for &inner_member in self.type_list(inner).iter() {
                    self.push_union_member(flat, inner_member, depth);
                }
            }
            Some(TypeKey::Lazy(def_id)) if depth < MAX_ALIAS_RESOLUTION_DEPTH => {
                let Some(body) = self.definitions.body(def_id) else {
                    flat.push(member);
                    return;
                };
                match self.lookup(body) {
                    Some(TypeKey::Intrinsic(_)) | Some(TypeKey::Literal(_)) => flat.push(body),
                    Some(TypeKey::Union(_)) | Some(TypeKey::Lazy(_)) => {
                        self.push_union_member(flat, body, depth + 1)
                    }
                    _ => flat.push(member),
                }
            }
            _ => flat.push(member),
        }
    }

    /// Re-normalize a union built while some of its named members had no
    /// body yet.
    fn refresh_union(&self, union_id: TypeId, list_id: TypeListId) -> TypeId {
        let members = self.type_list(list_id);
        let has_named = members
            .iter()
            .any(|member| matches!(self.lookup(*member), Some(TypeKey::Lazy(_))));
        if !has_named {
            return union_id;
        }
        self.union_from_iter(members.iter().copied())
    }

    fn normalize_union(&self, mut flat: TypeListBuffer) -> TypeId {
        // Deduplicate and sort for consistent hashing
        flat.sort_by_key(|id| id.0);
        flat.dedup();

        if flat.contains(&TypeId::ANY) {
            return TypeId::ANY;
        }
        if flat.contains(&TypeId::UNKNOWN) {
            return TypeId::UNKNOWN;
        }
        flat.retain(|id| *id != TypeId::NEVER);

        // `true | false` is `boolean`
        if flat.contains(&TypeId::BOOLEAN_TRUE) && flat.contains(&TypeId::BOOLEAN_FALSE) {
            flat.retain(|id| *id != TypeId::BOOLEAN_TRUE && *id != TypeId::BOOLEAN_FALSE);
            flat.push(TypeId::BOOLEAN);
            flat.sort_by_key(|id| id.0);
        }

        // Absorb literal types into their primitive: "a" | string => string
        self.absorb_literals_into_primitives(&mut flat);

        match flat.len() {
            0 => TypeId::NEVER,
            1 => flat[0],
            _ => {
                let list_id = self.intern_type_list(flat.into_vec());
                self.intern(TypeKey::Union(list_id))
            }
        }
    }

    fn absorb_literals_into_primitives(&self, flat: &mut TypeListBuffer) {
        let has = |id: TypeId| flat.contains(&id);
        let (has_string, has_number, has_boolean, has_bigint) = (
            has(TypeId::STRING),
            has(TypeId::NUMBER),
            has(TypeId::BOOLEAN),
            has(TypeId::BIGINT),
        );
        if !(has_string || has_number || has_boolean || has_bigint) {
            return;
        }
        flat.retain(|id| {
            let Some(TypeKey::Literal(literal)) = self.lookup(*id) else {
                return true;
            };
            match literal {
                LiteralValue::String(_) => !has_string,
                LiteralValue::Number(_) => !has_number,
                LiteralValue::Boolean(_) => !has_boolean,
                LiteralValue::BigInt(_) => !has_bigint,
            }
        });
    }

    pub fn array(&self, element: TypeId) -> TypeId {
        self.intern(TypeKey::Array(element))
    }

    /// Distinct from the mutable array so readonly-ness is observable.
    pub fn readonly_array(&self, element: TypeId) -> TypeId {
        let array_type = self.array(element);
        self.intern(TypeKey::ReadonlyType(array_type))
    }

    pub fn tuple(&self, elements: Vec<TupleElement>) -> TypeId {
        let list_id = self.intern_tuple_list(elements);
        self.intern(TypeKey::Tuple(list_id))
    }

    /// Tuple of required elements.
    pub fn tuple_of(&self, element_types: &[TypeId]) -> TypeId {
        self.tuple(
            element_types
                .iter()
                .map(|&type_id| TupleElement::required(type_id))
                .collect(),
        )
    }

    pub fn empty_tuple(&self) -> TypeId {
        self.tuple(Vec::new())
    }

    pub fn readonly_tuple(&self, elements: Vec<TupleElement>) -> TypeId {
        let tuple_type = self.tuple(elements);
        self.intern(TypeKey::ReadonlyType(tuple_type))
    }

    /// Object type with properties in declaration order.
    pub fn object(&self, properties: Vec<PropertyInfo>) -> TypeId {
        self.object_with_index(ObjectShape {
            properties,
            string_index: None,
            number_index: None,
        })
    }

    /// The empty object type `{}`.
    pub fn empty_object(&self) -> TypeId {
        self.object(Vec::new())
    }

    pub fn object_with_index(&self, shape: ObjectShape) -> TypeId {
        let shape_id = self.intern_object_shape(shape);
        self.intern(TypeKey::Object(shape_id))
    }

    pub fn function(&self, shape: FunctionShape) -> TypeId {
        let shape_id = self.intern_function_shape(shape);
        self.intern(TypeKey::Function(shape_id))
    }

    /// A callable carrying data properties. Without properties this is a plain function.
    pub fn callable(&self, shape: CallableShape) -> TypeId {
        if shape.properties.is_empty() {
            return self.function(shape.signature);
        }
        let shape_id = self.intern_callable_shape(shape);
        self.intern(TypeKey::Callable(shape_id))
    }

    pub fn promise(&self, resolved: TypeId) -> TypeId {
        self.intern(TypeKey::Promise(resolved))
    }

    pub fn lazy(&self, def_id: DefId) -> TypeId {
        self.intern(TypeKey::Lazy(def_id))
    }

    /// Declare a named type and return the `Lazy` type referring to it.
    pub fn declare(&self, name: &str) -> TypeId {
        let def_id = self.definitions.declare(name);
        self.lazy(def_id)
    }

    /// Give the named type referred to by `lazy` its body.
    ///
    /// Returns `false` if `lazy` is not a `Lazy` type.
    pub fn define(&self, lazy: TypeId, body: TypeId) -> bool {
        match self.lookup(lazy) {
            Some(TypeKey::Lazy(def_id)) => {
                self.definitions.define(def_id, body);
                true
            }
            _ => false,
        }
    }

    /// Union members of `id`, or `id` itself for non-unions.
    pub fn union_members(&self, id: TypeId) -> SmallVec<[TypeId; 4]> {
        match self.lookup(id) {
            Some(TypeKey::Union(list_id)) => self.type_list(list_id).iter().copied().collect(),
            _ => smallvec::smallvec![id],
        }
    }
}

impl Default for TypeInterner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "tests/intern_tests.rs"]
mod tests;
