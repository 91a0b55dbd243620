use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use damos::{DecodeOptions, EncodeOptions, Grammar, Scheme};

const LINE_TEMPLATES: &[&str] = &[
    "min max 80 max 100ms max willneed",
    "min max 10% 20% 200ms 1h cold 1G 1s",
    "4K 2M 0% 10% 60s max pageout 1G 1s 3 2 1",
    "2M max 90% 100% 100ms max hugepage 1G 1s 3 2 1 free_mem_rate 5s 500 400 300",
    "2M max 0% 25% 100ms max nohugepage 10ms 1G 1s 3 2 1 free_mem_rate 5s 500 400 300",
];

fn make_line_document(count: usize) -> String {
    let mut out = String::new();
    for idx in 0..count {
        if idx % 10 == 0 {
            out.push_str("# batch comment\n");
        }
        out.push_str(LINE_TEMPLATES[idx % LINE_TEMPLATES.len()]);
        out.push('\n');
    }
    out
}

fn criterion_config() -> Criterion {
    if std::env::var("DAMOS_BENCH_MINIMAL").is_ok() {
        Criterion::default()
            .warm_up_time(Duration::from_secs(0))
            .measurement_time(Duration::from_millis(10))
            .sample_size(1)
            .nresamples(1)
    } else {
        Criterion::default()
    }
}

fn criterion_benchmark(c: &mut Criterion) {
    let lines_only = DecodeOptions::new().with_grammar(Grammar::Lines);

    let mut group = c.benchmark_group("decode");
    for count in [10, 1000] {
        let lines = make_line_document(count);
        let schemes: Vec<Scheme> = damos::from_str(&lines).unwrap();
        let json = damos::to_json_string(&schemes).unwrap();

        group.throughput(Throughput::Bytes(lines.len() as u64));
        group.bench_function(BenchmarkId::new("lines_auto", count), |b| {
            b.iter(|| black_box(damos::from_str(black_box(&lines)).unwrap()));
        });
        group.bench_function(BenchmarkId::new("lines_forced", count), |b| {
            b.iter(|| {
                black_box(damos::from_str_with_options(black_box(&lines), &lines_only).unwrap())
            });
        });
        group.throughput(Throughput::Bytes(json.len() as u64));
        group.bench_function(BenchmarkId::new("json", count), |b| {
            b.iter(|| black_box(damos::from_str(black_box(&json)).unwrap()));
        });
    }
    group.finish();

    let schemes: Vec<Scheme> = damos::from_str(&make_line_document(1000)).unwrap();
    let options = EncodeOptions::default();
    let mut group = c.benchmark_group("encode");
    group.bench_function("lines", |b| {
        b.iter(|| black_box(damos::to_lines_with_options(black_box(&schemes), &options).unwrap()));
    });
    group.bench_function("json", |b| {
        b.iter(|| black_box(damos::to_json_string(black_box(&schemes)).unwrap()));
    });
    group.finish();
}

criterion_group! {
    name = benches;
    config = criterion_config();
    targets = criterion_benchmark
}
criterion_main!(benches);
