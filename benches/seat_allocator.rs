//! Benchmark: seat allocator hot paths
//!
//! Every operation runs under a single mutex, so these numbers are the
//! upper bound on booking throughput per process.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rail_booking::config::SectionConfig;
use rail_booking::models::SeatRef;
use rail_booking::services::SeatAllocator;

fn layout(sections: usize, seats: u32) -> Vec<SectionConfig> {
    (0..sections)
        .map(|i| SectionConfig::new(format!("S{i}"), seats))
        .collect()
}

fn bench_fill(c: &mut Criterion) {
    let mut group = c.benchmark_group("assign_until_full");

    for &(sections, seats) in &[(2usize, 20u32), (8, 100), (16, 500)] {
        let total = sections as u64 * seats as u64;
        group.throughput(Throughput::Elements(total));
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{sections}x{seats}")),
            &layout(sections, seats),
            |b, config| {
                b.iter(|| {
                    let allocator = SeatAllocator::new(config);
                    while let Ok(seat) = allocator.assign_seat() {
                        black_box(seat);
                    }
                });
            },
        );
    }

    group.finish();
}

fn bench_release_reassign(c: &mut Criterion) {
    let allocator = SeatAllocator::new(&layout(4, 250));
    let mut seats = Vec::new();
    while let Ok(seat) = allocator.assign_seat() {
        seats.push(seat);
    }

    // Освобождаем каждое второе место, чтобы в секциях были «дыры».
    let freed: Vec<SeatRef> = seats.into_iter().step_by(2).collect();
    for seat in &freed {
        let _ = allocator.release_seat(&seat.section, seat.seat_number);
    }

    c.bench_function("release_then_assign", |b| {
        b.iter(|| {
            let seat = allocator.assign_seat().unwrap();
            allocator
                .release_seat(&seat.section, seat.seat_number)
                .unwrap();
            black_box(seat);
        });
    });
}

fn bench_move(c: &mut Criterion) {
    let allocator = SeatAllocator::new(&layout(2, 100));
    let first = allocator.assign_seat().unwrap();
    let there = SeatRef::new("S1", 50);
    let back = first.clone();

    c.bench_function("move_seat/round_trip", |b| {
        b.iter(|| {
            allocator.move_seat(&back, &there).unwrap();
            allocator.move_seat(&there, &back).unwrap();
        });
    });
}

criterion_group!(benches, bench_fill, bench_release_reassign, bench_move);
criterion_main!(benches);
