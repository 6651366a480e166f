//! Performance benchmarks for the analyzer
//!
//! Both run on every keystroke of a message editor, so a long message should
//! stay well under a millisecond.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use smsbudget_core::analyzer::{analyze, detect_issues, sanitize};
use smsbudget_core::composer::compose;

/// Message of roughly `len` characters with typographic punctuation and emoji sprinkled in
fn generate_message(len: usize) -> String {
    let chunk = "Join us Sunday \u{2013} we\u{2019}d love to see you\u{2026} 🙏 ";
    chunk.chars().cycle().take(len).collect()
}

fn bench_analyze(c: &mut Criterion) {
    let mut group = c.benchmark_group("analyze");
    for len in [70, 160, 1600] {
        let text = generate_message(len);
        group.bench_with_input(BenchmarkId::from_parameter(len), &text, |b, text| {
            b.iter(|| analyze(black_box(text)))
        });
    }
    group.finish();
}

fn bench_sanitize(c: &mut Criterion) {
    let mut group = c.benchmark_group("sanitize");
    for len in [70, 160, 1600] {
        let text = generate_message(len);
        group.bench_with_input(BenchmarkId::from_parameter(len), &text, |b, text| {
            b.iter(|| sanitize(black_box(text)))
        });
    }
    group.finish();
}

fn bench_detect_and_compose(c: &mut Criterion) {
    let text = generate_message(480);
    c.bench_function("detect_issues_480", |b| b.iter(|| detect_issues(black_box(&text))));
    c.bench_function("compose_480_x_500", |b| {
        b.iter(|| compose(black_box(&text), black_box(500), false))
    });
}

criterion_group!(benches, bench_analyze, bench_sanitize, bench_detect_and_compose);
criterion_main!(benches);
