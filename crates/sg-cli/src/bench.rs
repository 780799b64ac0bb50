use std::cmp::Ordering;
use std::time::Instant;

use sg_core::Classifier;

/// Built-in workload covering every classification rule.
const REALISTIC_MIX: &[&str] = &[
    "https://bit.ly/abc123",
    "https://github.com/torvalds",
    "https://www.linkedin.com/in/alice",
    "https://alice.neocities.org/",
    "https://tilde.town/~bob/",
    "https://github.com/features/actions",
    "https://en.wikipedia.org/wiki/Rust",
    "https://myusername.wordpress.com/",
    "https://tiny.social/",
    "https://mastodon.social/about",
    "https://jdoe.me/",
    "https://shop.bigretail.com/products/1",
];

const WARMUP_ROUNDS: usize = 100;

pub struct BenchOptions {
    pub urls: Vec<String>,
    pub iterations: usize,
}

struct BenchResult {
    ops: usize,
    total_ms: f64,
    avg_us: f64,
    p50_us: f64,
    p95_us: f64,
    p99_us: f64,
    ops_per_sec: u64,
}

pub fn run(classifier: &Classifier<'_>, opts: BenchOptions) -> Result<(), String> {
    if opts.iterations == 0 {
        return Err("Iterations must be at least 1".to_string());
    }

    let urls: Vec<String> = if opts.urls.is_empty() {
        REALISTIC_MIX.iter().map(|s| s.to_string()).collect()
    } else {
        opts.urls
    };

    println!("============================================================");
    println!("SiteGate Classification Benchmark");
    println!("============================================================");

    println!("Warmup...");
    warmup(classifier, &urls);

    println!("------------------------------------------------------------");
    println!("Benchmark: {} URLs, {} iterations", urls.len(), opts.iterations);
    println!("------------------------------------------------------------");
    let result = run_benchmark(classifier, &urls, opts.iterations);
    println!("{}", format_result("Classify", &result));

    println!("------------------------------------------------------------");
    println!("Benchmark: Single Hot Path (1 URL, {} iterations)", opts.iterations * 10);
    println!("------------------------------------------------------------");
    let hot_path = run_benchmark(classifier, &urls[..1], opts.iterations * 10);
    println!("{}", format_result("Hot Path", &hot_path));

    Ok(())
}

fn warmup(classifier: &Classifier<'_>, urls: &[String]) {
    for _ in 0..WARMUP_ROUNDS {
        for url in urls {
            let _ = classifier.classify(url);
        }
    }
}

fn run_benchmark(classifier: &Classifier<'_>, urls: &[String], iterations: usize) -> BenchResult {
    let mut latencies = Vec::with_capacity(urls.len() * iterations);

    for _ in 0..iterations {
        for url in urls {
            let start = Instant::now();
            let _ = classifier.classify(url);
            latencies.push(start.elapsed().as_secs_f64() * 1_000_000.0);
        }
    }

    latencies.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    let ops = latencies.len();
    let total_us: f64 = latencies.iter().sum();
    let total_ms = total_us / 1000.0;

    BenchResult {
        ops,
        total_ms,
        avg_us: if ops == 0 { 0.0 } else { total_us / ops as f64 },
        p50_us: percentile(&latencies, 0.50),
        p95_us: percentile(&latencies, 0.95),
        p99_us: percentile(&latencies, 0.99),
        ops_per_sec: if total_ms > 0.0 { (ops as f64 / (total_ms / 1000.0)) as u64 } else { 0 },
    }
}

fn format_result(name: &str, result: &BenchResult) -> String {
    format!(
        "{}:\n  Operations:  {}\n  Total time:  {:.2}ms\n  Avg latency: {:.2}μs\n  P50 latency: {:.2}μs\n  P95 latency: {:.2}μs\n  P99 latency: {:.2}μs\n  Throughput:  {} ops/sec",
        name,
        result.ops,
        result.total_ms,
        result.avg_us,
        result.p50_us,
        result.p95_us,
        result.p99_us,
        result.ops_per_sec,
    )
}

/// Nearest-rank percentile over sorted values.
fn percentile(values: &[f64], p: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let idx = ((values.len() as f64) * p).ceil() as usize;
    let idx = idx.saturating_sub(1).min(values.len() - 1);
    values[idx]
}
