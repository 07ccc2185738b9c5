//! Benchmarks for the amount codec and the record normalizers.
//!
//! Both sit on the hot path of every list view: a `get_trades` page is
//! decoded entry by entry, each amount going through [`encode`].
//!
//! ## Running Benchmarks
//!
//! ```bash
//! # Run all benchmarks
//! cargo bench
//!
//! # Run specific benchmark
//! cargo bench -- trade_page
//! ```
//!
//! Results are saved to `target/criterion/` with HTML reports.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use papex_client::normalize::{normalize_summary, normalize_trades};
use papex_client::types::amount::{decode, encode, format_display, DEFAULT_DECIMALS};
use papex_client::ScValue;

const TRADER: &str = "GTRADERAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA";

// ============================================================================
// HELPER FUNCTIONS - Deterministic record generation
// ============================================================================

/// A `get_trades` entry as the contract returns it.
fn make_trade(i: u64) -> ScValue {
    ScValue::map([
        ("trader", ScValue::address(TRADER)),
        ("amount", ScValue::I128(i as i128 * 10_000_000 + 5_000_000)),
        ("cost", ScValue::I128(i as i128 * 52_500_000)),
        ("is_buy", ScValue::Bool(i % 3 != 0)),
        ("timestamp", ScValue::U64(1_700_000_000 + i)),
    ])
}

fn make_summary() -> ScValue {
    ScValue::map([
        ("name", ScValue::string("Attention Is All You Need")),
        ("symbol", ScValue::string("ATTN")),
        ("total_supply", ScValue::I128(100_000_000_000)),
        ("max_supply", ScValue::I128(1_000_000_000_000)),
        ("base_price", ScValue::I128(5_000_000)),
        ("slope", ScValue::I128(1_000)),
        ("liquidity", ScValue::I128(52_500_000_000)),
        ("trading_enabled", ScValue::Bool(true)),
    ])
}

// ============================================================================
// CODEC BENCHMARKS
// ============================================================================

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");
    for input in ["1", "10000", "1,234,567.8901234", "0.00000019999"] {
        group.bench_with_input(BenchmarkId::from_parameter(input), input, |b, input| {
            b.iter(|| decode(black_box(input), DEFAULT_DECIMALS))
        });
    }
    group.finish();
}

fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode");
    for value in [0i128, 10_000_000, 12_345_678_901_234, i128::MAX] {
        group.bench_with_input(BenchmarkId::from_parameter(value), &value, |b, value| {
            b.iter(|| encode(black_box(*value), DEFAULT_DECIMALS))
        });
    }
    group.finish();
}

fn bench_format_display(c: &mut Criterion) {
    c.bench_function("format_display", |b| {
        b.iter(|| format_display(black_box("1234567.8901234"), 3))
    });
}

// ============================================================================
// NORMALIZER BENCHMARKS
// ============================================================================

fn bench_summary(c: &mut Criterion) {
    let raw = make_summary();
    c.bench_function("normalize_summary", |b| {
        b.iter(|| normalize_summary(black_box(&raw), DEFAULT_DECIMALS))
    });
}

fn bench_trade_page(c: &mut Criterion) {
    let mut group = c.benchmark_group("trade_page");
    for size in [10u64, 100, 1_000] {
        let page = ScValue::Vec((0..size).map(make_trade).collect());
        group.throughput(Throughput::Elements(size));
        group.bench_with_input(BenchmarkId::from_parameter(size), &page, |b, page| {
            b.iter(|| normalize_trades(black_box(page), DEFAULT_DECIMALS))
        });
    }
    group.finish();
}

criterion_group!(codec, bench_decode, bench_encode, bench_format_display);
criterion_group!(normalizers, bench_summary, bench_trade_page);
criterion_main!(codec, normalizers);
