use std::fs::File;
use std::io::{Cursor, Read};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use cachelab::config::Geometry;
use cachelab::simulator::Simulator;
use cachelab::transpose::{evaluate, registered_functions};
use cachelab::util::get_configs;

/// A long random trace, mostly loads and stores over a 1MB region
fn generated_trace(lines: usize) -> Vec<u8> {
    let mut rng = fastrand::Rng::with_seed(0xcac4e);
    let mut trace = String::with_capacity(lines * 16);
    for _ in 0..lines {
        let op = ['L', 'L', 'S', 'M', 'I'][rng.usize(0..5)];
        trace.push_str(&format!(" {op} {:x},{}\n", rng.u64(0..1 << 20), 1 << rng.u32(0..4)));
    }
    trace.into_bytes()
}

pub fn criterion_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("Replay");

    get_configs()
        .unwrap()
        .iter()
        .for_each(|case| {
            let mut trace_file = File::open(&case.trace).unwrap();
            let mut buf = Vec::new();
            // Not interested in IO effects here, the fixtures are tiny
            trace_file.read_to_end(&mut buf).unwrap();
            group.bench_with_input(BenchmarkId::new("Fixture", &case.name), &(case.geometry, buf), |bench, (geometry, buf)| {
                bench.iter(|| {
                    Simulator::new(*geometry, false).unwrap().simulate_quiet(Cursor::new(buf)).unwrap();
                });
            });
        });

    let trace = generated_trace(200_000);
    for (s, e, b) in [(0, 1, 4), (8, 1, 5), (6, 4, 6), (0, 64, 6)] {
        let geometry = Geometry::new(s, e, b).unwrap();
        group.bench_with_input(BenchmarkId::new("Generated", format!("s{s}E{e}b{b}")), &geometry, |bench, geometry| {
            bench.iter(|| {
                Simulator::new(*geometry, false).unwrap().simulate_quiet(Cursor::new(&trace)).unwrap();
            });
        });
    }
    group.finish();

    let mut group = c.benchmark_group("Transpose");
    let submission = registered_functions()[0];
    for (m, n) in [(32, 32), (64, 64), (61, 67)] {
        group.bench_function(BenchmarkId::new("Evaluate", format!("{m}x{n}")), |bench| {
            bench.iter(|| evaluate(&submission, m, n, 1).unwrap());
        });
    }
    group.finish();
}

criterion_group!(
    name = benches;
    config = Criterion::default().significance_level(0.1).sample_size(10);
    targets = criterion_benchmark
);
criterion_main!(benches);
