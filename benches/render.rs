use criterion::{black_box, criterion_group, criterion_main, Criterion};
use json_exposition::exposition::{render_exposition, MetricSet};

fn payload(n: usize) -> Vec<u8> {
    let entries: Vec<String> = (0..n)
        .map(|i| format!("\"metric_{i}\": {}", i as f64 * 0.5))
        .collect();
    format!("{{{}}}", entries.join(",")).into_bytes()
}

fn bench_convert(c: &mut Criterion) {
    let body = payload(256);

    c.bench_function("parse_256", |b| {
        b.iter(|| MetricSet::from_json_bytes(black_box(&body)).unwrap())
    });

    let set = MetricSet::from_json_bytes(&body).unwrap();
    c.bench_function("render_256", |b| b.iter(|| render_exposition(black_box(&set))));
}

criterion_group!(benches, bench_convert);
criterion_main!(benches);
