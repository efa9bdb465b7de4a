use criterion::{black_box, criterion_group, criterion_main, Criterion};
use ssit::export::csv_bytes;
use ssit::{ScanConfig, run_scan};

fn bench_run_scan(c: &mut Criterion) {
    let mut group = c.benchmark_group("run_scan");
    group.sample_size(10);
    for n_max in [10_000u64, 100_000] {
        let config = ScanConfig::with_n_max(n_max);
        group.bench_function(format!("n_max_{}", n_max), |b| {
            b.iter(|| run_scan(black_box(&config)))
        });
    }
    group.finish();
}

fn bench_csv_export(c: &mut Criterion) {
    let table = run_scan(&ScanConfig::with_n_max(50_000)).expect("scan should succeed");
    c.bench_function("csv_bytes_50k", |b| {
        b.iter(|| csv_bytes(black_box(&table)))
    });
}

criterion_group!(benches, bench_run_scan, bench_csv_export);
criterion_main!(benches);
