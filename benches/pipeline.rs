//! Benchmarks for the objgroup pipeline.

use std::io::Cursor;

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use objgroup::{read_bundle, write_bundle, Block, BlockPos, ObjectGroup, Structure};

fn canopy(name: &str, size: i32) -> Structure {
    let mut s = Structure::new(name, size, size, size);
    for x in 0..size {
        for z in 0..size {
            s.set_block(BlockPos::new(x, 0, z), Block::DIRT);
            s.set_block(BlockPos::new(x, size - 1, z), Block::LEAVES);
        }
    }
    s.set_block(BlockPos::new(size / 2, 1, size / 2), Block::LOG);
    s
}

fn sample_group(schematics: usize, size: i32) -> ObjectGroup<Structure> {
    let mut group = ObjectGroup::new("trees/canopy");
    group.extend_flags(["priority 3", "world chance 0.4", "sink 1"]);
    for i in 0..schematics {
        group.push_schematic(canopy(&format!("canopy-{}", i), size));
    }
    group
}

// -- Variant benchmarks --

fn bench_variants(c: &mut Criterion) {
    let mut bench = c.benchmark_group("variants");

    let small = sample_group(4, 8);
    let large = sample_group(16, 24);

    bench.bench_function("process_variants_small", |b| {
        b.iter(|| {
            let mut group = small.copy("");
            black_box(group.process_variants())
        })
    });

    bench.bench_function("process_variants_large", |b| {
        b.iter(|| {
            let mut group = large.copy("");
            black_box(group.process_variants())
        })
    });

    bench.finish();
}

// -- Filter benchmarks --

fn bench_filters(c: &mut Criterion) {
    let mut bench = c.benchmark_group("filters");
    let group = sample_group(16, 24);

    bench.bench_function("lush_filter", |b| {
        b.iter(|| {
            let mut g = group.copy("");
            black_box(g.apply_lush_filter(0.3))
        })
    });

    bench.bench_function("snow_filter", |b| {
        b.iter(|| {
            let mut g = group.copy("");
            black_box(g.apply_snow_filter(2))
        })
    });

    bench.finish();
}

// -- Bundle benchmarks --

fn bench_bundle(c: &mut Criterion) {
    let mut bench = c.benchmark_group("bundle");

    let mut expanded = sample_group(16, 16);
    expanded.process_variants();
    let groups = vec![expanded, sample_group(8, 8)];

    let mut encoded = Vec::new();
    write_bundle(&groups, &mut encoded, None).unwrap();

    bench.bench_function("write_bundle", |b| {
        b.iter(|| {
            let mut buf = Vec::with_capacity(encoded.len());
            write_bundle(black_box(&groups), &mut buf, None).unwrap();
            buf
        })
    });

    bench.bench_function("read_bundle", |b| {
        b.iter(|| {
            let decoded: Vec<ObjectGroup<Structure>> =
                read_bundle(&mut Cursor::new(black_box(&encoded))).unwrap();
            decoded
        })
    });

    bench.finish();
}

criterion_group!(benches, bench_variants, bench_filters, bench_bundle);
criterion_main!(benches);
