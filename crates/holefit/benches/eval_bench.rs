//! Criterion benchmarks for evaluation and one relaxation tick.
//! Hole sizes n in {8, 32, 128}; the figure is a ring of n/2 vertices with chords.
//! Results land under target/criterion by default.

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use holefit::prelude::*;
use rand::{rngs::StdRng, Rng, SeedableRng};

/// Star-shaped hole: sorted angles, random radii. Star-shaped about the origin
/// means no two edges cross.
fn star_hole(n: usize, rng: &mut StdRng) -> Vec<Point> {
    let mut angles: Vec<f64> = (0..n).map(|_| rng.gen::<f64>() * std::f64::consts::TAU).collect();
    angles.sort_by(f64::total_cmp);
    angles.dedup();
    angles
        .into_iter()
        .map(|t| {
            let r = rng.gen_range(50.0..100.0);
            Point::new((r * t.cos()).round(), (r * t.sin()).round())
        })
        .collect()
}

fn random_problem(n: usize, seed: u64) -> Problem {
    let mut rng = StdRng::seed_from_u64(seed);
    loop {
        let hole = star_hole(n, &mut rng);
        let m = (n / 2).max(3);
        let vertices: Vec<Point> = (0..m)
            .map(|i| {
                let t = i as f64 / m as f64 * std::f64::consts::TAU;
                Point::new((30.0 * t.cos()).round() + i as f64, (30.0 * t.sin()).round())
            })
            .collect();
        let mut edges: Vec<(usize, usize)> = (0..m).map(|i| (i, (i + 1) % m)).collect();
        edges.extend((0..m / 2).map(|i| (i, i + m / 2)));
        let figure = Figure { vertices, edges };
        // Rounding can fold a random star; draw again until it is simple.
        if let Ok(p) = Problem::new(hole, figure, 10_000, Vec::new()) {
            return p;
        }
    }
}

fn bench_eval(c: &mut Criterion) {
    let mut group = c.benchmark_group("holefit");
    for &n in &[8usize, 32, 128] {
        let problem = random_problem(n, 41);
        let pose = problem.figure().vertices.clone();

        group.bench_with_input(BenchmarkId::new("evaluate", n), &n, |b, _| {
            b.iter(|| evaluate(&problem, &pose, &HeldBonuses::none()))
        });

        group.bench_with_input(BenchmarkId::new("step_auto", n), &n, |b, _| {
            let cfg = StepCfg::auto();
            b.iter_batched(
                || pose.clone(),
                |mut pose| {
                    let _report = step(&problem, &mut pose, &cfg, &HeldBonuses::none());
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_with_input(BenchmarkId::new("match_corners", n), &n, |b, _| {
            b.iter_batched(
                || pose.clone(),
                |mut pose| {
                    let _report = holefit::matcher::match_corners(&problem, &mut pose);
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_eval);
criterion_main!(benches);
