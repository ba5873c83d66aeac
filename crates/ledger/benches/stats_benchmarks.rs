use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use iou_ledger::{RawCreditor, RawDateRange, RawExpense, RawLedger, build, compute_stats};

const PARTICIPANTS: [&str; 8] = ["ann", "bob", "cat", "dan", "eve", "fay", "gus", "hal"];

/// Ledger with `expenses` entries: rotating payers, every third expense split among
/// a subset, amounts with cents so shares are non-terminating fractions.
fn generated_ledger(expenses: usize) -> RawLedger {
    let expenses = (0..expenses)
        .map(|i| {
            let payer = PARTICIPANTS[i % PARTICIPANTS.len()];
            let debtors_split = (i % 3 == 0).then(|| {
                PARTICIPANTS
                    .iter()
                    .take(3 + i % 5)
                    .map(|p| p.to_string())
                    .collect()
            });
            RawExpense {
                title: format!("expense {i}"),
                date: "2016-01-15".to_string(),
                creditors: vec![RawCreditor {
                    name: payer.to_string(),
                    amount: serde_json::Value::String(format!("{}.{:02}", 10 + i % 90, i % 100)),
                }],
                debtors_split,
            }
        })
        .collect();

    RawLedger {
        participants: PARTICIPANTS.iter().map(|p| p.to_string()).collect(),
        date: RawDateRange {
            from: "2016-01-01".to_string(),
            to: "2016-01-31".to_string(),
        },
        expenses,
    }
}

fn bench_build_and_compute(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_and_compute");

    for size in [10usize, 100, 1_000] {
        let raw = generated_ledger(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &raw, |b, raw| {
            b.iter(|| {
                let ledger = build(black_box(raw.clone())).unwrap();
                black_box(compute_stats(ledger))
            });
        });
    }

    group.finish();
}

fn bench_compute_only(c: &mut Criterion) {
    let mut group = c.benchmark_group("compute_stats");

    for size in [100usize, 1_000] {
        let ledger = build(generated_ledger(size)).unwrap();
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &ledger, |b, ledger| {
            b.iter(|| black_box(compute_stats(ledger.clone())));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_build_and_compute, bench_compute_only);
criterion_main!(benches);
