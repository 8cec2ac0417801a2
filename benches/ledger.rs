use criterion::{black_box, criterion_group, criterion_main, Criterion};
use expense_core::{config::Config, ledger::Ledger, storage::MemoryStore};

const CATEGORIES: &[&str] = &["Food", "Rent", "Transport", "Health"];

fn populated(count: usize) -> Ledger {
    let (mut ledger, _) =
        Ledger::load(Box::new(MemoryStore::new()), Config::default()).expect("load ledger");
    for idx in 0..count {
        let category = CATEGORIES[idx % CATEGORIES.len()];
        let amount = format!("{}.{:02}", idx % 500 + 1, idx % 100);
        ledger
            .append(category, &amount, "2024-01-15")
            .expect("append expense");
    }
    ledger
}

fn bench_append(c: &mut Criterion) {
    c.bench_function("append_1k", |b| b.iter(|| populated(black_box(1_000))));
}

fn bench_render(c: &mut Criterion) {
    let ledger = populated(10_000);
    c.bench_function("render_10k", |b| b.iter(|| black_box(ledger.render())));
}

fn bench_persist(c: &mut Criterion) {
    let ledger = populated(10_000);
    c.bench_function("persist_10k", |b| {
        b.iter(|| ledger.persist().expect("persist ledger"))
    });
}

criterion_group!(benches, bench_append, bench_render, bench_persist);
criterion_main!(benches);
