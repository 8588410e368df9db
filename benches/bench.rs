use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use rand::{Rng, SeedableRng};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use std::hint::black_box;
use tree_set::OrderedSet;

const SIZES: [usize; 3] = [100, 10_000, 100_000];

fn random_set(n: usize, rng: &mut StdRng) -> OrderedSet<usize> {
    let mut items: Vec<usize> = (0..n).map(|i| i * 2).collect();
    items.shuffle(rng);
    items.into_iter().collect()
}

fn add_remove_rand(c: &mut Criterion) {
    let mut group = c.benchmark_group("add_remove_rand");

    for &n in &SIZES {
        let mut rng = StdRng::seed_from_u64(n as u64);
        let mut set = random_set(n, &mut rng);

        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| b.iter(|| {
            let item = rng.gen_range(0..n) * 2 + 1;
            set.add(item);
            set.remove(&item);
        }));

        black_box(set);
    }

    group.finish();
}

fn contains_rand(c: &mut Criterion) {
    let mut group = c.benchmark_group("contains_rand");

    for &n in &SIZES {
        let mut rng = StdRng::seed_from_u64(n as u64);
        let set = random_set(n, &mut rng);

        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| b.iter(|| {
            black_box(set.contains(&rng.gen_range(0..2 * n)))
        }));
    }

    group.finish();
}

fn iter(c: &mut Criterion) {
    let mut group = c.benchmark_group("iter");

    for &n in &SIZES {
        let mut rng = StdRng::seed_from_u64(n as u64);
        let set = random_set(n, &mut rng);

        group.bench_with_input(BenchmarkId::from_parameter(n), &set, |b, set| b.iter(|| {
            for item in set { black_box(item); }
        }));
    }

    group.finish();
}

fn view_iter(c: &mut Criterion) {
    let mut group = c.benchmark_group("view_iter");

    for &n in &SIZES {
        let mut rng = StdRng::seed_from_u64(n as u64);
        let set = random_set(n, &mut rng);
        let view = set.between(n / 2, n);

        group.bench_with_input(BenchmarkId::from_parameter(n), &view, |b, view| b.iter(|| {
            for item in view { black_box(item); }
        }));
    }

    group.finish();
}

criterion_group!(benches, add_remove_rand, contains_rand, iter, view_iter);
criterion_main!(benches);
