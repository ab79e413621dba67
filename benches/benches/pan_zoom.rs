// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::Point;
use understory_pan_zoom::{ManualClock, Matrix, PanZoom, PanZoomOptions};

#[derive(Clone)]
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_f64(&mut self) -> f64 {
        // Numerical Recipes LCG parameters.
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 11) as f64 / (1_u64 << 53) as f64
    }
}

fn gen_points(n: usize, seed: u64) -> Vec<Point> {
    let mut rng = Lcg::new(seed);
    (0..n)
        .map(|_| Point::new(rng.next_f64() * 2000.0 - 1000.0, rng.next_f64() * 2000.0 - 1000.0))
        .collect()
}

fn view() -> PanZoom {
    let mut view = PanZoom::with_clock(
        PanZoomOptions::new()
            .min_zoom(0.1)
            .max_zoom(16)
            .min_pan_x(-5000)
            .max_pan_x(5000),
        ManualClock::new(),
    );
    view.set_origin(320, 240);
    view.set_zoom(1.75);
    view.set_pan(-40, 12.5);
    view
}

fn bench_transform(c: &mut Criterion) {
    let mut group = c.benchmark_group("understory_pan_zoom");

    let v = view();
    group.bench_function("transform", |b| {
        b.iter(|| black_box(black_box(&v).transform()));
    });

    group.bench_function("concat_4", |b| {
        b.iter(|| {
            black_box(Matrix::concat([
                Matrix::translate((10.0, 20.0)),
                Matrix::translate((320.0, 240.0)),
                Matrix::scale(black_box(1.5)),
                Matrix::translate((-320.0, -240.0)),
            ]))
        });
    });

    group.bench_function("display", |b| {
        b.iter(|| black_box(black_box(&v).to_string()));
    });

    for &n in &[64_usize, 4_096, 65_536] {
        let points = gen_points(n, 0x9A2E_0000_0000_0001);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("apply_transform(n={n})"), |b| {
            b.iter(|| black_box(v.apply_transform(black_box(&points))));
        });
    }

    group.finish();
}

fn bench_setters(c: &mut Criterion) {
    let mut group = c.benchmark_group("understory_pan_zoom_setters");

    for &n in &[256_u32, 4_096] {
        group.throughput(Throughput::Elements(u64::from(n)));

        group.bench_function(format!("drag_pan_immediate(n={n})"), |b| {
            b.iter_batched(
                || {
                    let mut v = view();
                    v.set_on_change(|m| {
                        black_box(m);
                    });
                    v
                },
                |mut v| {
                    for i in 0..n {
                        v.set_pan(f64::from(i) * 0.5, -f64::from(i));
                    }
                    black_box(v);
                },
                BatchSize::SmallInput,
            );
        });

        group.bench_function(format!("wheel_zoom_trailing(n={n})"), |b| {
            b.iter_batched(
                || {
                    let clock = ManualClock::new();
                    let mut v = PanZoom::with_clock(
                        PanZoomOptions::new()
                            .max_zoom(16)
                            .notify_delay(16)
                            .notify_leading(false)
                            .on_change(|m| {
                                black_box(m);
                            }),
                        clock.clone(),
                    );
                    v.set_origin(320, 240);
                    (v, clock)
                },
                |(mut v, clock)| {
                    for i in 0..n {
                        v.set_zoom(1.0 + f64::from(i % 64) * 0.125);
                        clock.advance(core::time::Duration::from_millis(1));
                        v.poll();
                    }
                    black_box(v);
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

criterion_group!(benches, bench_transform, bench_setters);
criterion_main!(benches);
