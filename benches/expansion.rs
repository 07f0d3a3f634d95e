use chrono::{Duration, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use ledger_core::{
    ledger::{BaseTransaction, LedgerData, Recurrence, RecurrenceKind},
    storage::json_backend::{load_ledger_from_path, save_ledger_to_path},
    views::{build_list, predict_month_end, year_heatmap, TransactionFilter},
};
use tempfile::tempdir;

const KINDS: [RecurrenceKind; 4] = [
    RecurrenceKind::Daily,
    RecurrenceKind::Weekly,
    RecurrenceKind::Monthly,
    RecurrenceKind::Yearly,
];

fn build_sample_ledger(txn_count: usize) -> LedgerData {
    let mut data = LedgerData::new();
    let start_date = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();

    for idx in 0..txn_count {
        let date = start_date + Duration::days((idx % 365) as i64);
        let amount = if idx % 10 == 0 { 1500.0 } else { -(5.0 + (idx % 100) as f64) };
        let mut txn = BaseTransaction::new(date, amount, format!("category-{}", idx % 12));
        if idx % 20 == 0 {
            txn = txn.with_recurrence(Recurrence::new(KINDS[idx / 20 % KINDS.len()].clone()));
        }
        data.add_transaction(txn);
    }
    data
}

fn bench_expansion(c: &mut Criterion) {
    let data = build_sample_ledger(black_box(5_000));
    let today = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();

    c.bench_function("expand_5k", |b| {
        b.iter(|| black_box(data.expand(today)))
    });

    let entries = data.expand(today);
    c.bench_function("build_list_grouped", |b| {
        b.iter_batched(
            || entries.clone(),
            |entries| black_box(build_list(&entries, &TransactionFilter::new(), today, Some(50))),
            BatchSize::SmallInput,
        );
    });

    c.bench_function("year_heatmap", |b| {
        b.iter(|| black_box(year_heatmap(&entries, 2025)))
    });

    c.bench_function("predict_month_end", |b| {
        b.iter(|| black_box(predict_month_end(&data.transactions, &entries, today)))
    });
}

fn bench_ledger_io(c: &mut Criterion) {
    let data = build_sample_ledger(black_box(10_000));
    let dir = tempdir().expect("tempdir");
    let file_path = dir.path().join("ledger.json");

    c.bench_function("ledger_save_10k", |b| {
        b.iter(|| save_ledger_to_path(&data, &file_path).expect("save ledger"))
    });

    save_ledger_to_path(&data, &file_path).expect("seed");

    c.bench_function("ledger_load_10k", |b| {
        b.iter(|| black_box(load_ledger_from_path(&file_path).expect("load ledger")))
    });
}

criterion_group!(benches, bench_expansion, bench_ledger_io);
criterion_main!(benches);
