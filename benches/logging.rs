// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Benchmarks for context forking and record emission.
//!
//! Run with: `cargo bench --bench logging`

use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use std::hint::black_box;
use std::io;
use std::sync::Arc;

use scribe::context::ContextKey;
use scribe::trace::NoopSpanSource;
use scribe::{Configuration, JsonSink, Level, LogContext, Logger, Payload};

/// Benchmark the layered carrier: forks and lookups.
fn bench_context(c: &mut Criterion) {
    let mut group = c.benchmark_group("context");
    group.throughput(Throughput::Elements(1));

    group.bench_function("fork_one_value", |b| {
        let root = LogContext::new();
        b.iter(|| black_box(&root).with_value(ContextKey::TraceId, "abc123"));
    });

    group.bench_function("get_deep", |b| {
        let mut ctx = LogContext::new().with_value(ContextKey::TraceId, "abc123");
        for i in 0..32 {
            ctx = ctx.with_value(ContextKey::RequestId, i.to_string());
        }
        b.iter(|| black_box(&ctx).get(ContextKey::TraceId));
    });

    group.bench_function("from_headers", |b| {
        let headers = [
            ("trace_id", "abc123"),
            ("request_id", "r-1"),
            ("session_id", "s-1"),
            ("consumer_name", "mobile"),
        ];
        b.iter(|| LogContext::from_headers(Default::default(), black_box(headers)));
    });

    group.finish();
}

/// Benchmark a full emit through the JSON sink.
fn bench_emit(c: &mut Criterion) {
    let config = Configuration::new()
        .with_service("orders")
        .with_environment("prod")
        .with_team("checkout")
        .with_version("1.2.0");
    let logger = Logger::with_sink(config, Arc::new(JsonSink::new(io::sink(), Level::Debug)))
        .with_span_source(Arc::new(NoopSpanSource));

    let ctx = LogContext::new()
        .with_value(ContextKey::TraceId, "abc123")
        .with_value(ContextKey::RequestId, "r-1");
    let payload: Payload = [
        ("reason".to_string(), "timeout".to_string()),
        ("duration".to_string(), "42".to_string()),
    ]
    .into();

    let mut group = c.benchmark_group("emit");
    group.throughput(Throughput::Elements(1));

    group.bench_function("info_bare", |b| {
        b.iter(|| logger.info(black_box(&LogContext::new()), "created", "", None));
    });

    group.bench_function("info_full", |b| {
        b.iter(|| logger.info(black_box(&ctx), "created", "order.create", Some(&payload)));
    });

    group.finish();
}

criterion_group!(benches, bench_context, bench_emit);
criterion_main!(benches);
