// Copyright (c) 2026 Bountyy Oy. All rights reserved.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use sanctum_fetch::http::decode_uri_component;
use sanctum_fetch::{compose_url, normalize, Body, Config, MultipartForm};

fn url_benchmark(c: &mut Criterion) {
    let query = vec![
        ("q".to_string(), "ann lee".to_string()),
        ("page".to_string(), "2".to_string()),
    ];

    c.bench_function("compose_url", |b| {
        b.iter(|| black_box(compose_url("https://api.test/", "/users", &query)))
    });

    c.bench_function("decode_cookie", |b| {
        b.iter(|| black_box(decode_uri_component("eyJpdiI6IjEyMyIsInZhbHVlIjoiYWJjIn0%3D")))
    });
}

fn normalize_benchmark(c: &mut Criterion) {
    let headers = Config::default().default_headers;

    c.bench_function("normalize_form", |b| {
        b.iter(|| {
            let body = Body::form([("email", "ann@example.com"), ("name", "Ann")]);
            black_box(normalize("PATCH", Some(body), headers.clone()))
        })
    });

    c.bench_function("normalize_multipart", |b| {
        b.iter(|| {
            let form = MultipartForm::new().text("name", "Ann").file("doc", "a.txt", "x");
            black_box(normalize("PUT", Some(Body::Multipart(form)), headers.clone()))
        })
    });
}

criterion_group!(benches, url_benchmark, normalize_benchmark);
criterion_main!(benches);
