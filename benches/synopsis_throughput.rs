use criterion::{BatchSize, Criterion, criterion_group, criterion_main};

use csv_synopsis::synopsize;

fn generate_column(rows: usize) -> Vec<Option<String>> {
    (0..rows)
        .map(|i| match i % 10 {
            9 => None,
            8 => Some(String::new()),
            n => Some(format!("{}", n * 37 + i)),
        })
        .collect()
}

fn generate_status_column(rows: usize) -> Vec<Option<String>> {
    (0..rows)
        .map(|i| {
            let status = match i % 3 {
                0 => "shipped",
                1 => "pending",
                _ => "processing",
            };
            Some(status.to_string())
        })
        .collect()
}

fn bench_synopsize(c: &mut Criterion) {
    let mut group = c.benchmark_group("synopsize");

    group.bench_function("numeric_100k", |b| {
        b.iter_batched(
            || generate_column(100_000),
            |column| synopsize("numeric", column),
            BatchSize::SmallInput,
        );
    });

    group.bench_function("categorical_100k", |b| {
        b.iter_batched(
            || generate_status_column(100_000),
            |column| synopsize("status", column),
            BatchSize::SmallInput,
        );
    });

    group.finish();
}

criterion_group!(benches, bench_synopsize);
criterion_main!(benches);
