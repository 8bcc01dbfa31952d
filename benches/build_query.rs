//! Benchmarks for filter-tree construction and document serialization

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use es_fluent::filters::{Exists, Range, Term, Terms};
use es_fluent::QueryBuilder;

fn build_builder(clauses: usize) -> QueryBuilder {
    let mut builder = QueryBuilder::new();
    for i in 0..clauses {
        builder
            .and_filter(Term::new(format!("field_{i}"), i as i64))
            .unwrap();
    }
    builder.not_filter(Exists::new("deleted_at")).unwrap();
    builder.or_filter(Terms::new("tags", ["a", "b", "c"])).unwrap();
    builder.or_filter(Range::new("year").gte(2000).lt(2030)).unwrap();
    builder
}

fn bench_tree_construction(c: &mut Criterion) {
    c.bench_function("build_tree_32_clauses", |b| {
        b.iter(|| black_box(build_builder(32)))
    });
}

fn bench_serialization(c: &mut Criterion) {
    let builder = build_builder(32);
    c.bench_function("to_query_32_clauses", |b| {
        b.iter(|| black_box(builder.to_query()))
    });

    c.bench_function("to_query_json_text", |b| {
        b.iter(|| serde_json::to_string(&builder.to_query()).unwrap())
    });
}

criterion_group!(benches, bench_tree_construction, bench_serialization);
criterion_main!(benches);
