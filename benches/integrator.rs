//! Benchmarks for the per-frame CPU path.
//!
//! Run with: `cargo bench`

use attractool::prelude::*;
use attractool::{Integrator, ParticlePool};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn bench_field_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("field_step");

    for field in VectorField::ALL {
        let params = ParameterSet::defaults(field);
        group.bench_function(field.id(), |b| {
            b.iter(|| black_box(field.step(black_box(DVec3::new(0.1, 0.2, 0.3)), &params, 1.0)))
        });
    }

    group.finish();
}

fn bench_integrator(c: &mut Criterion) {
    let mut group = c.benchmark_group("integrator_advance");

    for count in [1_000usize, 5_000] {
        group.bench_with_input(BenchmarkId::new("lorenz", count), &count, |b, &count| {
            let params = ParameterSet::defaults(VectorField::Lorenz);
            let mut pool = ParticlePool::with_seed(1);
            pool.initialize(count, VectorField::Lorenz);
            b.iter(|| Integrator::advance(&mut pool, VectorField::Lorenz, &params, 1.0, 1.0))
        });
    }

    group.finish();
}

fn bench_frame(c: &mut Criterion) {
    let mut group = c.benchmark_group("frame_tick");

    for trails in [false, true] {
        let name = if trails { "trails" } else { "points" };
        group.bench_function(name, |b| {
            let context = SimulationContext::with_seed(VectorField::Aizawa, 2_000, 3).unwrap();
            let mut frames = FrameLoop::new(context);
            frames.context_mut().set_trails(trails);
            let mut canvas = Canvas::new(800, 600, Color::BLACK);
            b.iter(|| frames.tick(&mut canvas))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_field_step, bench_integrator, bench_frame);
criterion_main!(benches);
