// Arena allocator benchmarks
//
// These benchmarks measure raw push throughput, scratch scope cycles,
// block growth and the arena-backed collections.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use frog_mem::arena::{Arena, ArenaParams};
use frog_mem::arena_format;
use frog_mem::hash_map::ArenaHashMap;

/// Benchmark pushes of a fixed size into a warm arena.
///
/// The arena is rolled back every 1024 pushes so the benchmark stays inside
/// committed pages and measures the bump path only.
fn bench_push(c: &mut Criterion) {
    let mut group = c.benchmark_group("push");

    for size in &[8usize, 64, 256, 4096] {
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            let mut arena = Arena::with_defaults("bench").unwrap();
            let start = arena.pos();
            let mut n = 0;
            b.iter(|| {
                black_box(arena.push(black_box(size), 8).unwrap());
                n += 1;
                if n == 1024 {
                    arena.pop_to(start);
                    n = 0;
                }
            });
        });
    }

    group.finish();
}

/// Benchmark a scratch scope that allocates and is immediately released.
fn bench_scratch_cycle(c: &mut Criterion) {
    c.bench_function("scratch_cycle", |b| {
        let mut arena = Arena::with_defaults("bench").unwrap();
        b.iter(|| {
            let scratch = arena.scratch();
            for _ in 0..16 {
                black_box(scratch.push(128, 16).unwrap());
            }
        });
    });
}

/// Benchmark chaining and releasing blocks.
///
/// Every iteration grows the chain past the first reservation and pops back,
/// so each one pays for reserving and releasing address space.
fn bench_block_growth(c: &mut Criterion) {
    c.bench_function("block_growth", |b| {
        let mut arena = Arena::new("bench", ArenaParams::new(64 * 1024, 64 * 1024)).unwrap();
        b.iter(|| {
            for _ in 0..4 {
                black_box(arena.push(48 * 1024, 8).unwrap());
            }
            arena.clear();
        });
    });
}

fn bench_hash_map_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("hash_map_insert");

    for count in &[256u64, 4096] {
        group.bench_with_input(BenchmarkId::from_parameter(count), count, |b, &count| {
            let mut arena = Arena::with_defaults("bench").unwrap();
            b.iter(|| {
                let scratch = arena.scratch();
                let mut map: ArenaHashMap<u64, u64> = ArenaHashMap::new(&scratch, 1024).unwrap();
                for key in 0..count {
                    map.insert(black_box(key), key).unwrap();
                }
                black_box(map.len());
            });
        });
    }

    group.finish();
}

fn bench_format(c: &mut Criterion) {
    c.bench_function("arena_format", |b| {
        let mut arena = Arena::with_defaults("bench").unwrap();
        b.iter(|| {
            let scratch = arena.scratch();
            let s = arena_format!(&scratch, "pipeline-{}-{}", black_box(42), "opaque").unwrap();
            black_box(s.len());
        });
    });
}

criterion_group!(
    benches,
    bench_push,
    bench_scratch_cycle,
    bench_block_growth,
    bench_hash_map_insert,
    bench_format
);
criterion_main!(benches);
