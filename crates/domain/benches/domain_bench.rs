use std::hint::black_box;

use chrono::Utc;
use criterion::{Criterion, criterion_group, criterion_main};
use domain::{ItemId, MenuItem, Money, Order};

fn donut(id: i64) -> MenuItem {
    MenuItem::with_id(
        ItemId::new(id),
        format!("Donut {id}"),
        Money::from_cents(100 + id),
        "Benchmark donut",
    )
}

fn bench_add_item(c: &mut Criterion) {
    let item = donut(1);

    c.bench_function("domain/add_item", |b| {
        b.iter(|| {
            let mut order = Order::new("OD-20250101-0001", Utc::now());
            order.add_item(black_box(item.clone()), 2).unwrap();
            black_box(order.total())
        });
    });
}

fn bench_edit_large_order(c: &mut Criterion) {
    let mut order = Order::new("OD-20250101-0001", Utc::now());
    for id in 0..50 {
        order.add_item(donut(id), 1).unwrap();
    }

    c.bench_function("domain/set_line_quantity_50_lines", |b| {
        b.iter(|| {
            order.set_line_quantity(black_box(25), 3).unwrap();
            black_box(order.total())
        });
    });
}

fn bench_rebuild_from_parts(c: &mut Criterion) {
    let mut order = Order::new("OD-20250101-0001", Utc::now());
    for id in 0..50 {
        order.add_item(donut(id), 2).unwrap();
    }
    let summary = order.summary();
    let lines = order.lines().to_vec();

    c.bench_function("domain/from_parts_50_lines", |b| {
        b.iter(|| {
            let rebuilt = Order::from_parts(summary.clone(), lines.clone()).unwrap();
            black_box(rebuilt.total())
        });
    });
}

criterion_group!(
    benches,
    bench_add_item,
    bench_edit_large_order,
    bench_rebuild_from_parts
);
criterion_main!(benches);
