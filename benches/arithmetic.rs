use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use numtower::{Tower, Value};

const SAMPLE_COUNT: usize = 1_000;

fn machine_pairs(rng: &mut StdRng) -> Vec<(Value, Value)> {
    (0..SAMPLE_COUNT)
        .map(|_| {
            (
                Value::from(rng.gen_range(-1_000_000_i64..1_000_000)),
                Value::from(rng.gen_range(-1_000_000_i64..1_000_000)),
            )
        })
        .collect()
}

/// Pairs whose sum crosses the 64-bit boundary, forcing the promotion path.
fn promoting_pairs(rng: &mut StdRng) -> Vec<(Value, Value)> {
    (0..SAMPLE_COUNT)
        .map(|_| {
            (
                Value::from(i64::MAX - rng.gen_range(0_i64..1_000)),
                Value::from(rng.gen_range(1_001_i64..1_000_000)),
            )
        })
        .collect()
}

fn bench_add(c: &mut Criterion) {
    let tower = Tower::default();
    let mut rng = StdRng::seed_from_u64(11);
    let machine = machine_pairs(&mut rng);
    let promoting = promoting_pairs(&mut rng);

    let mut group = c.benchmark_group("add");
    group.bench_function("machine", |b| {
        b.iter(|| {
            for (x, y) in &machine {
                black_box(tower.add(x, y));
            }
        })
    });
    group.bench_function("promoting", |b| {
        b.iter(|| {
            for (x, y) in &promoting {
                black_box(tower.add(x, y));
            }
        })
    });
    group.finish();
}

fn bench_mul(c: &mut Criterion) {
    let tower = Tower::default();
    let mut rng = StdRng::seed_from_u64(13);
    let machine = machine_pairs(&mut rng);
    let wide: Vec<(Value, Value)> = (0..SAMPLE_COUNT)
        .map(|_| {
            let base = tower.mul(
                &Value::from(i64::MAX),
                &Value::from(rng.gen_range(2_i64..1_000)),
            );
            (base, Value::from(rng.gen_range(2_i64..1_000)))
        })
        .collect();

    let mut group = c.benchmark_group("mul");
    group.bench_function("machine", |b| {
        b.iter(|| {
            for (x, y) in &machine {
                black_box(tower.mul(x, y));
            }
        })
    });
    group.bench_function("wide", |b| {
        b.iter(|| {
            for (x, y) in &wide {
                black_box(tower.mul(x, y));
            }
        })
    });
    group.finish();
}

fn bench_pow(c: &mut Criterion) {
    let tower = Tower::default();
    let mut rng = StdRng::seed_from_u64(17);
    let machine: Vec<(Value, Value)> = (0..SAMPLE_COUNT)
        .map(|_| {
            (
                Value::from(rng.gen_range(2_i64..10)),
                Value::from(rng.gen_range(2_i64..20)),
            )
        })
        .collect();
    let promoting: Vec<(Value, Value)> = (0..SAMPLE_COUNT)
        .map(|_| {
            (
                Value::from(rng.gen_range(2_i64..10)),
                Value::from(rng.gen_range(64_i64..256)),
            )
        })
        .collect();

    let mut group = c.benchmark_group("pow");
    group.sample_size(10);
    group.bench_function("machine", |b| {
        b.iter(|| {
            for (base, exp) in &machine {
                black_box(tower.pow(base, exp).expect("small power succeeds"));
            }
        })
    });
    group.bench_function("promoting", |b| {
        b.iter(|| {
            for (base, exp) in &promoting {
                black_box(tower.pow(base, exp).expect("wide power succeeds"));
            }
        })
    });
    group.finish();
}

criterion_group!(benches, bench_add, bench_mul, bench_pow);
criterion_main!(benches);
