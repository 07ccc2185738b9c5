//! Randomized checks of the fixed-point codec.
//!
//! Inputs come from a seeded RNG, so a failing case reproduces on every run.
//!
//! ```bash
//! cargo test --release --test codec_roundtrip -- --nocapture
//! ```

use papex_client::types::amount::{decode, encode, pow10};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

// ============================================================================
// TEST CONSTANTS
// ============================================================================

/// Cases per property
const CASES: usize = 20_000;

/// Decimal places exercised by the string properties
const MAX_TEST_DECIMALS: u32 = 12;

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

/// Generate a canonical decimal string with at most `decimals` fraction digits.
fn canonical_decimal(rng: &mut ChaCha8Rng, decimals: u32) -> String {
    let whole: u64 = match rng.gen_range(0..3) {
        0 => 0,
        1 => rng.gen_range(1..1_000),
        _ => rng.gen_range(1..1_000_000_000_000),
    };
    let fraction_len = if decimals == 0 { 0 } else { rng.gen_range(0..=decimals) };
    let mut fraction: String = (0..fraction_len)
        .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
        .collect();
    while fraction.ends_with('0') {
        fraction.pop();
    }

    let body = if fraction.is_empty() {
        whole.to_string()
    } else {
        format!("{}.{}", whole, fraction)
    };
    if body != "0" && rng.gen_bool(0.3) {
        format!("-{}", body)
    } else {
        body
    }
}

/// Insert thousands separators into the integer part.
fn with_separators(value: &str) -> String {
    let (sign, unsigned) = match value.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", value),
    };
    let (whole, fraction) = match unsigned.split_once('.') {
        Some((w, f)) => (w, Some(f)),
        None => (unsigned, None),
    };

    let mut grouped = String::new();
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    match fraction {
        Some(f) => format!("{}{}.{}", sign, grouped, f),
        None => format!("{}{}", sign, grouped),
    }
}

// ============================================================================
// PROPERTIES
// ============================================================================

/// decode(encode(x, d), d) == x across the whole i128 range.
#[test]
fn test_scaled_integer_roundtrip() {
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    for _ in 0..CASES {
        let value: i128 = match rng.gen_range(0..4) {
            0 => rng.gen(),
            1 => rng.gen_range(-1_000_000_000i128..1_000_000_000),
            2 => i128::from(rng.gen::<i64>()),
            _ => [i128::MIN, i128::MAX, 0, -1, 1][rng.gen_range(0..5)],
        };
        let decimals = rng.gen_range(0..=38);
        let text = encode(value, decimals);
        assert_eq!(decode(&text, decimals).unwrap(), value, "value {} at {} decimals ({})", value, decimals, text);
    }
}

/// encode(decode(s, d), d) == s for canonical strings s.
#[test]
fn test_decimal_string_roundtrip() {
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    for _ in 0..CASES {
        let decimals = rng.gen_range(0..=MAX_TEST_DECIMALS);
        let text = canonical_decimal(&mut rng, decimals);
        let scaled = decode(&text, decimals).unwrap();
        assert_eq!(encode(scaled, decimals), text, "{} at {} decimals", text, decimals);
    }
}

/// Trailing zeros and thousands separators do not change the value.
#[test]
fn test_non_canonical_spellings_decode_equal() {
    let mut rng = ChaCha8Rng::seed_from_u64(1_337);
    for _ in 0..CASES {
        let decimals = rng.gen_range(1..=MAX_TEST_DECIMALS);
        let text = canonical_decimal(&mut rng, decimals);
        let expected = decode(&text, decimals).unwrap();

        let padded = if text.contains('.') {
            format!("{}000", text)
        } else {
            format!("{}.000", text)
        };
        assert_eq!(decode(&padded, decimals).unwrap(), expected, "{}", padded);
        assert_eq!(decode(&with_separators(&text), decimals).unwrap(), expected, "{}", text);
    }
}

/// Extra fraction digits are truncated toward zero, never rounded.
#[test]
fn test_excess_digits_truncate() {
    let mut rng = ChaCha8Rng::seed_from_u64(99);
    for _ in 0..CASES {
        let decimals = rng.gen_range(0..=MAX_TEST_DECIMALS);
        let text = canonical_decimal(&mut rng, decimals);
        let extra: String = (0..rng.gen_range(1..6))
            .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
            .collect();
        let longer = if text.contains('.') {
            let fraction_len = text.split_once('.').map_or(0, |(_, f)| f.len()) as u32;
            let pad = "0".repeat((decimals - fraction_len) as usize);
            format!("{}{}{}", text, pad, extra)
        } else {
            format!("{}.{}{}", text, "0".repeat(decimals as usize), extra)
        };
        assert_eq!(decode(&longer, decimals).unwrap(), decode(&text, decimals).unwrap(), "{}", longer);
    }
}

/// Zero encodes as "0" at every precision.
#[test]
fn test_zero_is_canonical() {
    for decimals in 0..=40 {
        assert_eq!(encode(0, decimals), "0");
    }
    assert!(pow10(38).is_some());
    assert!(pow10(39).is_none());
}
