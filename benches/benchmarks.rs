// benches/benchmarks.rs — Performance benchmarks (criterion)
//
// Two hot paths on the send critical section:
//   1. Message validation — runs on every send intent
//   2. Preview truncation — runs on every committed exchange

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use parlor::core::types::{MessageKind, PREVIEW_CHARS};
use parlor::core::validate::{validate_message, MAX_MESSAGE_CHARS};
use parlor::util::preview;

fn bench_validate(c: &mut Criterion) {
    let short = "How do lifetimes interact with trait objects?";
    let long = "a".repeat(MAX_MESSAGE_CHARS);
    let multibyte = "émöji héavy tëxt ".repeat(500);

    c.bench_function("validate_short_text", |b| {
        b.iter(|| validate_message(black_box(short), MessageKind::Text))
    });

    c.bench_function("validate_at_limit", |b| {
        b.iter(|| validate_message(black_box(&long), MessageKind::Text))
    });

    c.bench_function("validate_multibyte", |b| {
        b.iter(|| validate_message(black_box(&multibyte), MessageKind::Text))
    });
}

fn bench_preview(c: &mut Criterion) {
    let long_reply = "The key points to consider are ownership, borrowing, and lifetimes. ".repeat(40);

    c.bench_function("preview_long_reply", |b| {
        b.iter(|| preview(black_box(&long_reply), PREVIEW_CHARS))
    });
}

criterion_group!(benches, bench_validate, bench_preview);
criterion_main!(benches);
