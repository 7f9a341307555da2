//! Relation and flattening benchmarks.
//!
//! Measures `extends`, `equal` and `print_props` on wide objects, nested
//! objects and recursive named types.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use tsexpect_solver::{PropertyInfo, TypeId, TypeInterner, equal, extends, print_props};

/// `{ p0: number; p1: number; ... }`
fn wide_object(db: &TypeInterner, width: usize, value: TypeId) -> TypeId {
    db.object(
        (0..width)
            .map(|i| PropertyInfo::new(db.intern_string(&format!("p{i}")), value))
            .collect(),
    )
}

/// `{ inner: { inner: ... { leaf: T } } }`
fn nested_object(db: &TypeInterner, depth: usize, leaf: TypeId) -> TypeId {
    let inner = db.intern_string("inner");
    let mut ty = db.object(vec![PropertyInfo::new(db.intern_string("leaf"), leaf)]);
    for _ in 0..depth {
        ty = db.object(vec![PropertyInfo::new(inner, ty)]);
    }
    ty
}

/// `interface Node { value: number; next: Node | null }`
fn linked_list(db: &TypeInterner, name: &str) -> TypeId {
    let node = db.declare(name);
    let next = db.union2(node, TypeId::NULL);
    db.define(
        node,
        db.object(vec![
            PropertyInfo::new(db.intern_string("value"), TypeId::NUMBER),
            PropertyInfo::new(db.intern_string("next"), next),
        ]),
    );
    node
}

fn bench_wide_objects(c: &mut Criterion) {
    let mut group = c.benchmark_group("wide_objects");
    for width in [4usize, 32, 128] {
        group.bench_with_input(BenchmarkId::new("extends", width), &width, |b, &width| {
            let db = TypeInterner::new();
            let narrow = wide_object(&db, width, db.literal_number(1.0));
            let wide = wide_object(&db, width, TypeId::NUMBER);
            b.iter(|| black_box(extends(&db, narrow, wide)))
        });
        group.bench_with_input(BenchmarkId::new("equal", width), &width, |b, &width| {
            let db = TypeInterner::new();
            let left = wide_object(&db, width, TypeId::NUMBER);
            let right = wide_object(&db, width, TypeId::NUMBER);
            b.iter(|| black_box(equal(&db, left, right)))
        });
    }
    group.finish();
}

fn bench_nesting(c: &mut Criterion) {
    let mut group = c.benchmark_group("nesting");
    for depth in [2usize, 8, 16] {
        group.bench_with_input(BenchmarkId::new("print_props", depth), &depth, |b, &depth| {
            let db = TypeInterner::new();
            let ty = nested_object(&db, depth, TypeId::STRING);
            b.iter(|| black_box(print_props(&db, ty)))
        });
        group.bench_with_input(BenchmarkId::new("equal_mismatch", depth), &depth, |b, &depth| {
            let db = TypeInterner::new();
            let left = nested_object(&db, depth, TypeId::STRING);
            let right = nested_object(&db, depth, TypeId::NUMBER);
            b.iter(|| black_box(equal(&db, left, right)))
        });
    }
    group.finish();
}

fn bench_recursive_types(c: &mut Criterion) {
    c.bench_function("recursive/extends", |b| {
        let db = TypeInterner::new();
        let left = linked_list(&db, "Left");
        let right = linked_list(&db, "Right");
        b.iter(|| black_box(extends(&db, left, right)))
    });
    c.bench_function("recursive/print_props", |b| {
        let db = TypeInterner::new();
        let list = linked_list(&db, "List");
        b.iter(|| black_box(print_props(&db, list)))
    });
}

criterion_group!(
    relation_benches,
    bench_wide_objects,
    bench_nesting,
    bench_recursive_types
);
criterion_main!(relation_benches);
