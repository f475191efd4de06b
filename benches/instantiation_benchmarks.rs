//! Performance benchmarks for constructor resolution and row mapping.
//!
//! - Resolution: scoring overloaded constructors, with and without the memo
//! - Conversion: hierarchy walks of the conversion map
//! - Row mapping: instantiating batches of rows with a resolved instantiator

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use rowbind::prelude::*;
use std::hint::black_box;

struct Employee {
    _id: i64,
    _name: String,
    _salary: f64,
}

fn employee_engine() -> (Engine, TypeHash) {
    let engine = Engine::new();
    let employee = engine
        .register_class::<Employee>("Employee")
        .constructor(
            &[("id", builtins::INT32), ("name", builtins::STRING), ("salary", builtins::INT32)],
            |_| Err(NativeError::message("wrong overload")),
        )
        .constructor(
            &[("id", builtins::OBJECT), ("name", builtins::OBJECT), ("salary", builtins::OBJECT)],
            |_| Err(NativeError::message("wrong overload")),
        )
        .constructor(
            &[("id", builtins::INT64), ("name", builtins::STRING), ("salary", builtins::FLOAT64)],
            |args| {
                Ok(Employee {
                    _id: args.get(0)?,
                    _name: args.get(1)?,
                    _salary: args.get(2)?,
                })
            },
        )
        .build()
        .expect("register Employee");
    (engine, employee)
}

fn columns() -> NamedTypeList {
    NamedTypeList::builder(3)
        .add("id", builtins::INT64_BOX)
        .add("name", builtins::STRING)
        .add("salary", builtins::FLOAT64)
        .build()
}

fn resolution_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("instantiator/resolve");
    let columns = columns();

    let (engine, employee) = employee_engine();
    group.bench_function("memoized", |b| {
        b.iter(|| black_box(engine.find_instantiator(black_box(employee), &columns).unwrap()));
    });

    let (engine, employee) = employee_engine();
    engine.set_property(EngineProperty::CacheInstantiators, 0);
    group.bench_function("uncached", |b| {
        b.iter(|| black_box(engine.find_instantiator(black_box(employee), &columns).unwrap()));
    });

    group.finish();
}

fn conversion_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("conversion");
    let engine = Engine::new();

    group.bench_function("passthrough", |b| {
        b.iter(|| black_box(engine.convert(black_box(Value::Int32(7)), builtins::NUMBER)));
    });
    group.bench_function("number_to_int64", |b| {
        b.iter(|| black_box(engine.convert(black_box(Value::Int32(7)), builtins::INT64)));
    });
    group.bench_function("string_to_decimal", |b| {
        b.iter(|| {
            black_box(engine.convert(black_box(Value::String("12.75".into())), builtins::DECIMAL))
        });
    });

    group.finish();
}

fn row_mapping_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("instantiator/map_rows");
    let (engine, employee) = employee_engine();
    let columns = columns();

    for size in [10usize, 100, 1000] {
        let rows: Vec<Vec<Value>> = (0..size)
            .map(|i| {
                vec![
                    Value::Int64(i as i64),
                    Value::String(format!("employee-{i}")),
                    Value::Float64(1000.0 + i as f64),
                ]
            })
            .collect();
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &rows, |b, rows| {
            b.iter(|| black_box(engine.map_rows(employee, &columns, rows).unwrap().len()));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    resolution_benchmarks,
    conversion_benchmarks,
    row_mapping_benchmarks
);
criterion_main!(benches);
