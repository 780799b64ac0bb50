//! Classification hot path benchmarks
//!
//! ```bash
//! cargo bench -p sg-core --bench classify
//! ```

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use sg_core::{classify, score_independence, Registry};

/// One URL per rule in the table, plus the fallback.
const MIX: &[&str] = &[
    "https://bit.ly/abc123",
    "https://github.com/torvalds",
    "https://alice.neocities.org/",
    "https://tilde.town/~bob/",
    "https://github.com/features/actions",
    "https://myusername.wordpress.com/",
    "https://tiny.social/",
    "https://mastodon.social/about",
    "https://jdoe.me/",
    "https://shop.bigretail.com/products/1",
    "not a url",
];

fn bench_classify(c: &mut Criterion) {
    // Build the registry outside the measured loop.
    let _ = Registry::builtin();

    let mut group = c.benchmark_group("classify");
    group.throughput(Throughput::Elements(MIX.len() as u64));
    group.bench_function("mix", |b| {
        b.iter(|| {
            for url in MIX {
                black_box(classify(black_box(url)));
            }
        })
    });
    group.finish();

    c.bench_function("classify/profile", |b| {
        b.iter(|| classify(black_box("https://www.linkedin.com/in/alice")))
    });
    c.bench_function("classify/fallback", |b| {
        b.iter(|| classify(black_box("https://jane-doe.com/about")))
    });
}

fn bench_scorer(c: &mut Criterion) {
    c.bench_function("score_independence", |b| {
        b.iter(|| score_independence(black_box("jdoe.me"), black_box("/now")))
    });
}

criterion_group!(benches, bench_classify, bench_scorer);
criterion_main!(benches);
