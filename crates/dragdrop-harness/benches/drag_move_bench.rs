//! Benchmark: per-move cost of the drag controller.
//!
//! Run with: `cargo bench -p dragdrop-harness --bench drag_move_bench`
//!
//! Measures a full pointer-move (snap, clamp, surface writes, callback) in
//! each axis mode, plus the start/stop cycle including lazy registration.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use dragdrop_core::{AxisMode, Bounds, DragOptions, Rect, Size};
use dragdrop_harness::Harness;

fn dragging_harness(options: DragOptions) -> (Harness, dragdrop_core::ElementId) {
    let mut h = Harness::new(Size::new(1920, 1080));
    let id = h.surface.spawn_draggable("knob", Rect::new(100, 100, 40, 40));
    h.controller
        .set(id, options, &mut h.surface)
        .expect("bench element registers");
    h.press(110, 110, id);
    (h, id)
}

// ===========================================================================
// Moves
// ===========================================================================

fn bench_move(c: &mut Criterion) {
    let mut group = c.benchmark_group("pointer_move");

    for mode in [
        AxisMode::Both,
        AxisMode::HorizontalOnly,
        AxisMode::VerticalOnly,
    ] {
        let (mut h, _) = dragging_harness(
            DragOptions::new()
                .with_mode(mode)
                .with_snap(8)
                .with_bounds(Bounds::new(0, 1600, 0, 900)),
        );
        let mut step = 0i32;
        group.bench_with_input(BenchmarkId::new("mode", mode.code()), &mode, |b, _| {
            b.iter(|| {
                step = (step + 37) % 2000;
                black_box(h.move_to(black_box(step), black_box(2000 - step)))
            });
        });
    }

    // Every move hits a bound.
    {
        let (mut h, _) =
            dragging_harness(DragOptions::new().with_bounds(Bounds::new(200, 300, 200, 300)));
        let mut flip = false;
        group.bench_function("clamped", |b| {
            b.iter(|| {
                flip = !flip;
                let p = if flip { -500 } else { 5000 };
                black_box(h.move_to(black_box(p), black_box(p)))
            });
        });
    }

    // Callback on every move.
    {
        let (mut h, _) = dragging_harness(DragOptions::new().on_move(|target| {
            black_box(target.rect());
        }));
        let mut step = 0i32;
        group.bench_function("with_callback", |b| {
            b.iter(|| {
                step = (step + 13) % 1000;
                black_box(h.move_to(black_box(step), black_box(step)))
            });
        });
    }

    group.finish();
}

// ===========================================================================
// Start / stop
// ===========================================================================

fn bench_cycle(c: &mut Criterion) {
    let mut group = c.benchmark_group("drag_cycle");

    group.bench_function("press_release", |b| {
        let mut h = Harness::new(Size::new(1920, 1080));
        let id = h.surface.spawn_draggable("knob", Rect::new(100, 100, 40, 40));
        b.iter(|| {
            black_box(h.press(110, 110, id));
            black_box(h.release(110, 110));
        });
    });

    group.bench_function("lazy_registration", |b| {
        b.iter_batched(
            || {
                let mut h = Harness::new(Size::new(1920, 1080));
                let id = h.surface.spawn_draggable("knob", Rect::new(100, 100, 40, 40));
                (h, id)
            },
            |(mut h, id)| black_box(h.press(110, 110, id)),
            criterion::BatchSize::SmallInput,
        );
    });

    group.finish();
}

criterion_group!(benches, bench_move, bench_cycle);
criterion_main!(benches);
