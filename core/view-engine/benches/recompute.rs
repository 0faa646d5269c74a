//! FILENAME: core/view-engine/benches/recompute.rs
//! Recompute cost of the view pipeline over a synthetic market.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use view_engine::{Record, ViewState};

fn synthetic_market(rows: usize) -> Vec<Record> {
    (0..rows)
        .map(|i| {
            Record::new(i.to_string())
                .with_field("rank", (i + 1).to_string())
                .with_field("name", format!("Coin {}", i))
                .with_field("symbol", format!("C{}", i % 997))
                .with_field("price_usd", format!("{:.4}", (i as f64 * 7.31) % 5000.0))
                .with_field("percent_change_24h", format!("{:.2}", (i as f64 % 21.0) - 10.0))
        })
        .collect()
}

fn bench_recompute(c: &mut Criterion) {
    let mut state = ViewState::new();
    state.load_dataset(synthetic_market(10_000));

    c.bench_function("global_search_10k", |b| {
        b.iter(|| {
            state.set_global_search(black_box("c1"));
            state.set_global_search("");
        })
    });

    c.bench_function("sort_cycle_price_10k", |b| {
        b.iter(|| {
            state.activate_sort(black_box("price_usd"));
        })
    });

    c.bench_function("field_filter_sorted_10k", |b| {
        state.activate_sort("rank");
        b.iter(|| {
            state.set_field_filter("symbol", black_box("c9"));
            state.set_field_filter("symbol", "");
        })
    });
}

criterion_group!(benches, bench_recompute);
criterion_main!(benches);
