use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use timeruler::timecode::FrameRate;
use timeruler::timeline::{LabelWindow, TickLayout, TimeScale};

const ZOOM_LEVELS: [f64; 3] = [60.0, 15.0, 1.0];

fn bench_build(c: &mut Criterion) {
    for scale in ZOOM_LEVELS {
        let time_scale = TimeScale::new(scale, 100.0, 3_600.0);
        c.bench_with_input(
            BenchmarkId::new("build_layout", scale),
            &time_scale,
            |b, time_scale| b.iter(|| TickLayout::build(black_box(time_scale), 1024.0)),
        );
    }
}

fn bench_visible_labels(c: &mut Criterion) {
    let layout = TickLayout::build(&TimeScale::new(1.0, 100.0, 3_600.0), 1024.0);
    let window = LabelWindow::around(16_000.0, 1_280.0, layout.width());
    c.bench_function("visible_labels", |b| {
        b.iter(|| layout.labels_in(black_box(window), FrameRate::DEFAULT))
    });
}

criterion_group!(benches, bench_build, bench_visible_labels);
criterion_main!(benches);
