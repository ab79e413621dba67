// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::rc::Rc;
use std::time::Duration;

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use understory_timing::{DebounceDelay, Debouncer, Edge, ManualClock};

fn debouncer(clock: &ManualClock, delay: DebounceDelay, edge: Edge) -> Debouncer<u32> {
    Debouncer::new(Rc::new(clock.clone()), delay, edge, |v: u32| {
        black_box(v);
    })
}

fn bench_debounce(c: &mut Criterion) {
    let mut group = c.benchmark_group("understory_timing");

    for &(name, delay) in &[
        ("immediate", DebounceDelay::IMMEDIATE),
        ("window_50ms", DebounceDelay::from_millis(50)),
    ] {
        for edge in [Edge::Leading, Edge::Trailing] {
            group.bench_function(format!("burst_1000({name},{edge:?})"), |b| {
                b.iter_batched(
                    || {
                        let clock = ManualClock::new();
                        let d = debouncer(&clock, delay, edge);
                        (d, clock)
                    },
                    |(mut d, clock)| {
                        for i in 0..1000_u32 {
                            d.invoke(i);
                            // Bursts of ten calls, separated by a quiet gap.
                            let step = if i % 10 == 9 { 100 } else { 1 };
                            clock.advance(Duration::from_millis(step));
                            d.poll();
                        }
                        black_box(d);
                    },
                    BatchSize::SmallInput,
                );
            });
        }
    }

    group.finish();
}

criterion_group!(benches, bench_debounce);
criterion_main!(benches);
