use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::{rngs::StdRng, Rng, SeedableRng};
use subsequences::dynamic::{
    all_lcs, all_lis, all_unique_lcs_with, build_lcs_matrix, number_of_lis, EnumerationMode, Mask,
};

fn random_sequence(rng: &mut StdRng, len: usize, alphabet: i64) -> Vec<i64> {
    (0..len).map(|_| rng.gen_range(0..alphabet)).collect()
}

fn bench_lcs(c: &mut Criterion) {
    let mut group = c.benchmark_group("lcs");
    let mut rng = StdRng::seed_from_u64(42);

    for &len in &[50usize, 200, 800] {
        let a = random_sequence(&mut rng, len, 8);
        let b = random_sequence(&mut rng, len, 8);

        group.bench_with_input(BenchmarkId::new("matrix", len), &len, |bench, _| {
            bench.iter(|| build_lcs_matrix(black_box(&a), black_box(&b)))
        });
    }

    for &len in &[20usize, 40] {
        let a = random_sequence(&mut rng, len, 4);
        let b = random_sequence(&mut rng, len, 4);

        group.bench_with_input(BenchmarkId::new("all_lcs_100", len), &len, |bench, _| {
            bench.iter(|| all_lcs(black_box(&a), black_box(&b), 100))
        });
        group.bench_with_input(BenchmarkId::new("unique_exact_10", len), &len, |bench, _| {
            bench.iter(|| {
                all_unique_lcs_with(black_box(&a), black_box(&b), 10, EnumerationMode::Exact)
            })
        });
    }
    group.finish();
}

fn bench_lis(c: &mut Criterion) {
    let mut group = c.benchmark_group("lis");
    let mut rng = StdRng::seed_from_u64(7);

    for &len in &[100usize, 500, 2000] {
        let a = random_sequence(&mut rng, len, len as i64);
        let mask = Mask::all(len);

        group.bench_with_input(BenchmarkId::new("count", len), &len, |bench, _| {
            bench.iter(|| number_of_lis(black_box(&a), &mask))
        });
        group.bench_with_input(BenchmarkId::new("all_lis_100", len), &len, |bench, _| {
            bench.iter(|| all_lis(black_box(&a), &mask, 100))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_lcs, bench_lis);
criterion_main!(benches);
