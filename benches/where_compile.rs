//! Benchmarks for WHERE compilation and statement assembly.

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;

use querymaker::{
    ComparisonOperator, CriteriaCompiler, FieldValue, LogicalOperator, NestedSpec, QueryMaker,
    Select, Table, Tables,
};

type Filter = querymaker::Criterion;

fn flat_criteria(n: usize) -> Vec<Filter> {
    (0..n)
        .map(|i| {
            Filter::new(format!("col_{}", i))
                .operator(ComparisonOperator::Gte)
                .value(i as i64)
        })
        .collect()
}

fn grouped_criteria(groups: usize) -> Vec<Filter> {
    let mut criteria = Vec::with_capacity(groups * 3);
    for g in 0..groups {
        let key = format!("g{}", g);
        criteria.push(
            Filter::equals(format!("status_{}", g), "active")
                .nested(NestedSpec::new(key.as_str()).before("OR")),
        );
        criteria.push(Filter::is_not_null(format!("email_{}", g)).group(key.as_str()));
        criteria.push(
            Filter::in_list(format!("role_{}", g), ["admin", "owner", "editor"])
                .logical(LogicalOperator::Or)
                .group(key.as_str()),
        );
    }
    criteria
}

/// Benchmark WHERE compilation across criteria counts.
fn bench_compile_flat(c: &mut Criterion) {
    let mut group = c.benchmark_group("compile_flat");
    let compiler = CriteriaCompiler::default();

    for size in [1, 5, 20, 100] {
        let criteria = flat_criteria(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &criteria, |b, criteria| {
            b.iter(|| black_box(compiler.compile(black_box(criteria))))
        });
    }

    group.finish();
}

/// Benchmark compilation of nested groups.
fn bench_compile_grouped(c: &mut Criterion) {
    let mut group = c.benchmark_group("compile_grouped");
    let compiler = CriteriaCompiler::default();

    for groups in [1, 5, 20] {
        let criteria = grouped_criteria(groups);
        group.bench_with_input(BenchmarkId::from_parameter(groups), &criteria, |b, criteria| {
            b.iter(|| black_box(compiler.compile(black_box(criteria))))
        });
    }

    group.finish();
}

/// Benchmark IN lists of growing length.
fn bench_compile_in_list(c: &mut Criterion) {
    let mut group = c.benchmark_group("compile_in_list");
    let compiler = CriteriaCompiler::default();

    for len in [10, 100, 1000] {
        let criteria = vec![Filter::in_list("id", (0..len).collect::<Vec<i64>>())];
        group.throughput(Throughput::Elements(len as u64));
        group.bench_with_input(BenchmarkId::from_parameter(len), &criteria, |b, criteria| {
            b.iter(|| black_box(compiler.compile(black_box(criteria))))
        });
    }

    group.finish();
}

/// Benchmark full statement assembly.
fn bench_statements(c: &mut Criterion) {
    let mut group = c.benchmark_group("statements");

    let mut tables = Tables::new();
    tables
        .add("u", Table::new("users"))
        .add("o", Table::new("orders").on("u.id", "o.user_id"));
    let maker = QueryMaker::new(tables);
    let criteria = flat_criteria(10);

    group.bench_function("select_join", |b| {
        b.iter(|| {
            black_box(maker.select_query(
                black_box(&criteria),
                Select::fields(["u.id", "o.total"]),
                Some("u.id DESC"),
                20,
                10,
            ))
        })
    });

    group.bench_function("count", |b| {
        b.iter(|| black_box(maker.count_query(black_box(&criteria))))
    });

    let fields: Vec<FieldValue> = (0..10)
        .map(|i| FieldValue::new(format!("field_{}", i), i as i64))
        .collect();

    group.bench_function("update", |b| {
        b.iter(|| black_box(maker.update_query(black_box(&criteria), &fields, 0, 1)))
    });

    let rows: Vec<Vec<FieldValue>> = (0..100).map(|_| fields.clone()).collect();
    group.throughput(Throughput::Elements(rows.len() as u64));
    group.bench_function("batch_insert_100", |b| {
        b.iter(|| black_box(maker.batch_insert_query(black_box(&rows))))
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_compile_flat,
    bench_compile_grouped,
    bench_compile_in_list,
    bench_statements,
);

criterion_main!(benches);
