use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use hbal_tree::{AvlTreeMap, ComparatorTree};
use std::collections::BTreeMap;

const N: usize = 10_000;

// ─── Helper functions to generate key sequences ─────────────────────────────

fn ordered_keys(n: usize) -> Vec<i64> {
    (0..n as i64).collect()
}

fn random_keys(n: usize) -> Vec<i64> {
    // Use a simple LCG for deterministic pseudo-random sequence
    let mut keys = Vec::with_capacity(n);
    let mut x: u64 = 12345;
    for _ in 0..n {
        x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
        keys.push((x >> 33) as i64);
    }
    keys
}

// ─── Insert ─────────────────────────────────────────────────────────────────

fn bench_insert(c: &mut Criterion, name: &str, keys: &[i64]) {
    let mut group = c.benchmark_group(name);

    group.bench_function(BenchmarkId::new("AvlTreeMap", N), |b| {
        b.iter(|| {
            let mut map = AvlTreeMap::new();
            for &k in keys {
                map.insert(k, k);
            }
            map
        });
    });

    group.bench_function(BenchmarkId::new("BTreeMap", N), |b| {
        b.iter(|| {
            let mut map = BTreeMap::new();
            for &k in keys {
                map.insert(k, k);
            }
            map
        });
    });

    group.finish();
}

fn bench_map_insert_ordered(c: &mut Criterion) {
    bench_insert(c, "map_insert_ordered", &ordered_keys(N));
}

fn bench_map_insert_reverse(c: &mut Criterion) {
    let mut keys = ordered_keys(N);
    keys.reverse();
    bench_insert(c, "map_insert_reverse", &keys);
}

fn bench_map_insert_random(c: &mut Criterion) {
    bench_insert(c, "map_insert_random", &random_keys(N));
}

/// Counting duplicates: the find-or-create path.
fn bench_map_get_or_insert(c: &mut Criterion) {
    let keys: Vec<i64> = random_keys(N).into_iter().map(|k| k % 512).collect();

    let mut group = c.benchmark_group("map_get_or_insert");

    group.bench_function(BenchmarkId::new("AvlTreeMap", N), |b| {
        b.iter(|| {
            let mut map: AvlTreeMap<i64, u32> = AvlTreeMap::new();
            for &k in &keys {
                *map.get_or_insert_default(k) += 1;
            }
            map
        });
    });

    group.bench_function(BenchmarkId::new("BTreeMap", N), |b| {
        b.iter(|| {
            let mut map: BTreeMap<i64, u32> = BTreeMap::new();
            for &k in &keys {
                *map.entry(k).or_default() += 1;
            }
            map
        });
    });

    group.finish();
}

// ─── Get ────────────────────────────────────────────────────────────────────

fn bench_map_get_random(c: &mut Criterion) {
    let keys = random_keys(N);
    let avl_map: AvlTreeMap<i64, i64> = keys.iter().map(|&k| (k, k)).collect();
    let bt_map: BTreeMap<i64, i64> = keys.iter().map(|&k| (k, k)).collect();

    let mut group = c.benchmark_group("map_get_random");

    group.bench_function(BenchmarkId::new("AvlTreeMap", N), |b| {
        b.iter(|| {
            let mut sum = 0i64;
            for &k in &keys {
                if let Some(&v) = avl_map.get(&k) {
                    sum = sum.wrapping_add(v);
                }
            }
            sum
        });
    });

    group.bench_function(BenchmarkId::new("BTreeMap", N), |b| {
        b.iter(|| {
            let mut sum = 0i64;
            for &k in &keys {
                if let Some(&v) = bt_map.get(&k) {
                    sum = sum.wrapping_add(v);
                }
            }
            sum
        });
    });

    group.finish();
}

// ─── Remove ─────────────────────────────────────────────────────────────────

fn bench_remove(c: &mut Criterion, name: &str, keys: &[i64]) {
    let mut group = c.benchmark_group(name);

    group.bench_function(BenchmarkId::new("AvlTreeMap", N), |b| {
        b.iter_batched(
            || keys.iter().map(|&k| (k, k)).collect::<AvlTreeMap<i64, i64>>(),
            |mut map| {
                for k in keys {
                    map.remove(k);
                }
                map
            },
            BatchSize::SmallInput,
        );
    });

    group.bench_function(BenchmarkId::new("BTreeMap", N), |b| {
        b.iter_batched(
            || keys.iter().map(|&k| (k, k)).collect::<BTreeMap<i64, i64>>(),
            |mut map| {
                for k in keys {
                    map.remove(k);
                }
                map
            },
            BatchSize::SmallInput,
        );
    });

    group.finish();
}

fn bench_map_remove_ordered(c: &mut Criterion) {
    bench_remove(c, "map_remove_ordered", &ordered_keys(N));
}

fn bench_map_remove_random(c: &mut Criterion) {
    bench_remove(c, "map_remove_random", &random_keys(N));
}

// ─── Iterate ────────────────────────────────────────────────────────────────

fn bench_map_iterate(c: &mut Criterion) {
    let keys = random_keys(N);
    let avl_map: AvlTreeMap<i64, i64> = keys.iter().map(|&k| (k, k)).collect();
    let bt_map: BTreeMap<i64, i64> = keys.iter().map(|&k| (k, k)).collect();

    let mut group = c.benchmark_group("map_iterate");

    group.bench_function(BenchmarkId::new("AvlTreeMap::cursor", N), |b| {
        b.iter(|| {
            let mut sum = 0i64;
            let mut cursor = avl_map.cursor();
            while cursor.has_more() {
                if let Some((_, &v)) = cursor.visit() {
                    sum = sum.wrapping_add(v);
                }
                cursor.advance();
            }
            sum
        });
    });

    group.bench_function(BenchmarkId::new("AvlTreeMap::iter", N), |b| {
        b.iter(|| avl_map.values().fold(0i64, |sum, &v| sum.wrapping_add(v)));
    });

    group.bench_function(BenchmarkId::new("BTreeMap", N), |b| {
        b.iter(|| bt_map.values().fold(0i64, |sum, &v| sum.wrapping_add(v)));
    });

    group.finish();
}

// ─── Comparator tree ────────────────────────────────────────────────────────

fn bench_comparator_insert_random(c: &mut Criterion) {
    let keys = random_keys(N);

    let mut group = c.benchmark_group("comparator_insert_random");

    group.bench_function(BenchmarkId::new("ComparatorTree", N), |b| {
        b.iter(|| {
            let mut tree = ComparatorTree::with_capacity(N, |a: &i64, b: &i64| a.cmp(b));
            for &k in &keys {
                tree.insert(k, k);
            }
            tree.len()
        });
    });

    group.bench_function(BenchmarkId::new("AvlTreeMap", N), |b| {
        b.iter(|| {
            let mut map = AvlTreeMap::new();
            for &k in &keys {
                map.insert(k, k);
            }
            map
        });
    });

    group.finish();
}

criterion_group!(
    map_insert_benches,
    bench_map_insert_ordered,
    bench_map_insert_reverse,
    bench_map_insert_random,
    bench_map_get_or_insert,
);

criterion_group!(map_get_benches, bench_map_get_random, bench_map_iterate,);

criterion_group!(map_remove_benches, bench_map_remove_ordered, bench_map_remove_random,);

criterion_group!(comparator_benches, bench_comparator_insert_random,);

criterion_main!(map_insert_benches, map_get_benches, map_remove_benches, comparator_benches);
