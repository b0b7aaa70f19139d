//! HTTP data model benchmarks
//!
//! Measures the hot paths a server hits on every request:
//! - HTTP date formatting and parsing
//! - Header insertion and case-insensitive lookup
//! - Method normalization and comparison
//!
//! Run with: cargo bench --bench http_model

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use httpmodel::http::date::{format_http_time, parse_http_time};
use httpmodel::http::{HasHeaders, Headers, Method, Response};

fn bench_date_codec(c: &mut Criterion) {
    let mut group = c.benchmark_group("date_codec");

    group.bench_function("format_http_time", |b| {
        b.iter(|| black_box(format_http_time(black_box(784_111_777))));
    });

    group.bench_function("parse_http_time", |b| {
        b.iter(|| black_box(parse_http_time(black_box("Sun, 06 Nov 1994 08:49:37 GMT"))));
    });

    group.bench_function("parse_http_time_malformed", |b| {
        b.iter(|| black_box(parse_http_time(black_box("Sun, 06 Nov 1994"))));
    });

    group.finish();
}

fn bench_headers(c: &mut Criterion) {
    let mut group = c.benchmark_group("headers");

    let mut headers = Headers::new();
    for i in 0..20 {
        headers.insert(format!("X-Header-{}", i), "value");
    }
    headers.insert("Accept", "text/html");
    headers.insert("accept", "application/json");

    group.bench_function("get_single", |b| {
        b.iter(|| black_box(headers.get(black_box("x-header-19"))));
    });

    group.bench_function("get_joined", |b| {
        b.iter(|| black_box(headers.get(black_box("ACCEPT"))));
    });

    group.bench_function("to_list", |b| {
        b.iter(|| black_box(headers.to_list()));
    });

    group.bench_function("response_set_header", |b| {
        b.iter(|| {
            let resp = Response::new()
                .add_header("Content-Type", "text/plain")
                .add_header("Cache-Control", "no-cache")
                .set_header("content-type", "text/html");
            black_box(resp);
        });
    });

    group.finish();
}

fn bench_method(c: &mut Criterion) {
    let mut group = c.benchmark_group("method");

    group.bench_function("from_bytes_canonical", |b| {
        b.iter(|| black_box(Method::from_bytes(black_box(b"OPTIONS"))));
    });

    let custom = Method::Custom("PATCH".to_string());
    group.bench_function("eq_custom_canonical", |b| {
        b.iter(|| black_box(black_box(&custom) == black_box(&Method::Patch)));
    });

    group.finish();
}

criterion_group!(benches, bench_date_codec, bench_headers, bench_method);
criterion_main!(benches);
