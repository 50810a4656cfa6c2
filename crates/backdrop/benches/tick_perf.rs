//! Benchmark: cost of one backdrop tick and one full frame.
//!
//! A tick plus redraw has to fit comfortably inside the 300 ms default
//! interval; in practice both should be in the microsecond range even on
//! a 4K viewport, which is what these numbers track.

use backdrop::render::{self, DrawCommand, Palette};
use backdrop::schedule::Backdrop;
use backdrop::{BackdropConfig, Simulation, Viewport};
use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};

const DESKTOP: Viewport = Viewport::new(1920, 1080);
const UHD: Viewport = Viewport::new(3840, 2160);

fn seeded_sim(viewport: Viewport) -> Simulation {
    let config = BackdropConfig::default().with_seed(0xBE_EF);
    let mut sim = Simulation::new(config, viewport).unwrap();
    sim.seed_targets();
    sim
}

/// Step only; no drawing.
fn bench_step(c: &mut Criterion) {
    c.bench_function("step_1920x1080", |b| {
        let mut sim = seeded_sim(DESKTOP);
        b.iter(|| {
            black_box(sim.step());
            sim.spawn_target();
        });
    });
}

/// Spawn against a full-length body, re-seeded so the target set is never full.
fn bench_spawn(c: &mut Criterion) {
    c.bench_function("spawn_target_1920x1080", |b| {
        b.iter_batched(
            || {
                let mut sim = seeded_sim(DESKTOP);
                for _ in 0..64 {
                    sim.step();
                }
                sim
            },
            |mut sim| {
                black_box(sim.spawn_target());
            },
            BatchSize::SmallInput,
        );
    });
}

/// Building the draw list dominates at large viewports (grid lines).
fn bench_frame(c: &mut Criterion) {
    let palette = Palette::default();
    for (name, viewport) in [("frame_1920x1080", DESKTOP), ("frame_3840x2160", UHD)] {
        let sim = seeded_sim(viewport);
        c.bench_function(name, |b| {
            b.iter(|| black_box(render::frame(&sim, &palette)));
        });
    }
}

/// Full Backdrop::tick(): step plus redraw into a recording surface.
fn bench_backdrop_tick(c: &mut Criterion) {
    c.bench_function("backdrop_tick_1920x1080", |b| {
        b.iter_batched(
            || {
                let mut backdrop: Backdrop<Vec<DrawCommand>> =
                    Backdrop::new(BackdropConfig::default()).unwrap();
                backdrop
                    .start(Some(Vec::with_capacity(256)), DESKTOP, 0.0, Some(7))
                    .unwrap();
                backdrop
            },
            |mut backdrop| {
                backdrop.tick();
                black_box(&backdrop);
            },
            BatchSize::SmallInput,
        );
    });
}

criterion_group!(
    benches,
    bench_step,
    bench_spawn,
    bench_frame,
    bench_backdrop_tick,
);
criterion_main!(benches);
