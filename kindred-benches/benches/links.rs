//! Probabilistic link sampling benchmarks.
//!
//! Measures single draws and Monte-Carlo connectivity estimates against the
//! link table of a seeded synthetic network.
#![expect(
    missing_docs,
    reason = "Criterion macros generate items without doc comments"
)]
#![expect(
    clippy::shadow_reuse,
    reason = "Criterion bench_with_input closures rebind parameter names"
)]
use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

use kindred_benches::{
    error::BenchSetupError,
    params::NetworkBenchParams,
    source::{SyntheticConfig, SyntheticNetwork},
};
use kindred_core::RngSource;

/// Seed used for network generation and sampling.
const SEED: u64 = 7;

/// Trial counts for connectivity estimates.
const TRIAL_COUNTS: &[usize] = &[100, 10_000];

fn sampling_impl(c: &mut Criterion) -> Result<(), BenchSetupError> {
    let shape = NetworkBenchParams {
        users: 10_000,
        friends_per_user: 4,
    };
    let synthetic = SyntheticNetwork::generate(&SyntheticConfig { shape, seed: SEED })?;
    let links = synthetic.network().links();
    let Some((left, right, _)) = links.links().next() else {
        return Ok(());
    };
    let (left, right) = (*left, *right);

    let mut group = c.benchmark_group("link_sampling");
    let mut source = RngSource::seeded(SEED);
    group.bench_function(BenchmarkId::new("sample_connected", &shape), |b| {
        b.iter(|| links.sample_connected(black_box(&left), black_box(&right), &mut source));
    });

    for &trials in TRIAL_COUNTS {
        links.estimate_connectivity(&left, &right, trials, &mut source)?;
        group.bench_with_input(
            BenchmarkId::new("estimate_connectivity", trials),
            &trials,
            |b, &trials| {
                b.iter(|| links.estimate_connectivity(&left, &right, trials, &mut source));
            },
        );
    }

    group.finish();
    Ok(())
}

fn sampling(c: &mut Criterion) {
    if let Err(err) = sampling_impl(c) {
        panic!("link sampling benchmark setup failed: {err}");
    }
}

criterion_group!(benches, sampling);
criterion_main!(benches);
