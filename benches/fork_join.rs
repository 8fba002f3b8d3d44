use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use forkbench::forkjoin::ExecutionStrategy;
use forkbench::workloads::matrix::{Matrix, multiply};
use forkbench::workloads::sort::{merge_sort, random_array};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::hint::black_box;
use std::time::Duration;

/// Worker counts to compare against the sequential baseline
fn worker_counts() -> Vec<usize> {
    let cores = num_cpus::get();
    [1, 2, 4, cores]
        .into_iter()
        .filter(|&w| w <= cores)
        .collect::<std::collections::BTreeSet<_>>()
        .into_iter()
        .collect()
}

fn strategies() -> Vec<(String, ExecutionStrategy)> {
    let mut strategies = vec![("sequential".to_string(), ExecutionStrategy::Sequential)];
    for workers in worker_counts() {
        if let Ok(strategy) = ExecutionStrategy::parallel(workers) {
            strategies.push((format!("parallel-{workers}"), strategy));
        }
    }
    strategies
}

fn bench_merge_sort(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(42);
    let input = random_array(200_000, &mut rng);

    let mut group = c.benchmark_group("merge_sort");
    group.measurement_time(Duration::from_secs(10));
    group.sample_size(10);

    for (name, strategy) in strategies() {
        group.bench_with_input(BenchmarkId::new(name, input.len()), &input, |b, input| {
            b.iter(|| {
                let mut data = input.clone();
                merge_sort(&strategy, &mut data).unwrap();
                black_box(data)
            });
        });
    }

    group.finish();
}

fn bench_matrix_multiply(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(42);
    let size = 200;
    let a = Matrix::random(size, size, 100, &mut rng);
    let b = Matrix::random(size, size, 100, &mut rng);

    let mut group = c.benchmark_group("matrix_multiply");
    group.measurement_time(Duration::from_secs(10));
    group.sample_size(10);

    for (name, strategy) in strategies() {
        group.bench_with_input(BenchmarkId::new(name, size), &(&a, &b), |bench, (a, b)| {
            bench.iter(|| black_box(multiply(&strategy, a, b).unwrap()));
        });
    }

    group.finish();
}

criterion_group!(
    name = benches;
    config = Criterion::default().with_output_color(true);
    targets = bench_merge_sort, bench_matrix_multiply
);

criterion_main!(benches);
