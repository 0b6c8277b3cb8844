//! Benchmarks for binding values to statements.

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;

use querymaker_query::{
    BindType, BoundParams, ComparisonOperator, CriteriaCompiler, FieldValue, FilterValue,
    QueryMaker, QueryResult, Statement, placeholder_name,
};

type Filter = querymaker_query::Criterion;

/// Statement that only counts bindings, to isolate binder overhead.
#[derive(Default)]
struct CountingStatement {
    bound: usize,
}

impl Statement for CountingStatement {
    fn bind_named_value(
        &mut self,
        name: &str,
        value: &FilterValue,
        bind_type: BindType,
    ) -> QueryResult<()> {
        black_box((name, value, bind_type));
        self.bound += 1;
        Ok(())
    }
}

fn criteria(n: usize) -> Vec<Filter> {
    (0..n)
        .map(|i| {
            if i % 4 == 0 {
                Filter::in_list(format!("tag_{}", i), ["a", "b", "c"])
            } else {
                Filter::new(format!("col_{}", i))
                    .operator(ComparisonOperator::Lt)
                    .value(i as i64)
            }
        })
        .collect()
}

fn bench_placeholder_name(c: &mut Criterion) {
    let mut group = c.benchmark_group("placeholder_name");

    group.bench_function("plain", |b| b.iter(|| black_box(placeholder_name(black_box("created_at")))));
    group.bench_function("quoted_qualified", |b| {
        b.iter(|| black_box(placeholder_name(black_box("`users`.`created-at`"))))
    });

    group.finish();
}

fn bench_bind_criteria(c: &mut Criterion) {
    let mut group = c.benchmark_group("bind_criteria");
    let compiler = CriteriaCompiler::default();

    for size in [5, 20, 100] {
        let criteria = criteria(size);
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("counting", size), &criteria, |b, criteria| {
            b.iter(|| {
                let mut statement = CountingStatement::default();
                compiler.bind_criteria(&mut statement, black_box(criteria)).ok();
                black_box(statement.bound)
            })
        });

        group.bench_with_input(BenchmarkId::new("recorded", size), &criteria, |b, criteria| {
            b.iter(|| {
                let mut params = BoundParams::new();
                compiler.bind_criteria(&mut params, black_box(criteria)).ok();
                black_box(params)
            })
        });
    }

    group.finish();
}

fn bench_batch_bind(c: &mut Criterion) {
    let mut group = c.benchmark_group("batch_bind");
    let maker = QueryMaker::for_table("events");

    for rows in [10, 100, 1000] {
        let batch: Vec<Vec<FieldValue>> = (0..rows)
            .map(|i| {
                vec![
                    FieldValue::new("kind", "click"),
                    FieldValue::new("weight", i as i64).bind_type(BindType::Int),
                    FieldValue::raw("created_at", "NOW()"),
                ]
            })
            .collect();

        group.throughput(Throughput::Elements(rows as u64));
        group.bench_with_input(BenchmarkId::from_parameter(rows), &batch, |b, batch| {
            b.iter(|| {
                let mut statement = CountingStatement::default();
                maker
                    .batch_bind_values(&mut statement, &[], 0, 0, black_box(batch))
                    .ok();
                black_box(statement.bound)
            })
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_placeholder_name,
    bench_bind_criteria,
    bench_batch_bind,
);

criterion_main!(benches);
