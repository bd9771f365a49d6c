/*!
 * Signal Controller Benchmarks
 *
 * Cost of reads, transitions and a full wake round-trip
 */

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use intersection_signal::{Road, SignalController};
use std::sync::Arc;
use std::thread;

fn bench_reads(c: &mut Criterion) {
    let controller = SignalController::new();
    let mut group = c.benchmark_group("reads");

    group.bench_function("is_green", |b| {
        b.iter(|| controller.is_green(black_box(Road::South)))
    });
    group.bench_function("is_stopped", |b| b.iter(|| controller.is_stopped()));

    group.finish();
}

fn bench_advance(c: &mut Criterion) {
    let controller = SignalController::new();
    c.bench_function("advance_uncontended", |b| b.iter(|| controller.advance()));
}

fn bench_wake_round_trip(c: &mut Criterion) {
    let mut group = c.benchmark_group("wake_round_trip");

    for waiters in [1usize, 3] {
        group.bench_with_input(
            BenchmarkId::from_parameter(waiters),
            &waiters,
            |b, &waiters| {
                b.iter(|| {
                    let controller = Arc::new(SignalController::new());
                    let handles: Vec<_> = Road::ALL[1..=waiters]
                        .iter()
                        .map(|&road| {
                            let controller = controller.clone();
                            thread::spawn(move || controller.wait_for_green(road))
                        })
                        .collect();

                    for _ in 0..waiters {
                        controller.advance();
                    }
                    controller.stop();
                    for handle in handles {
                        black_box(handle.join().ok());
                    }
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_reads, bench_advance, bench_wake_round_trip);
criterion_main!(benches);
