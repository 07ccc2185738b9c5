//! Fixed-point amount codec.
//!
//! ## Overview
//!
//! Token contracts store every amount as an `i128` scaled by `10^decimals`
//! (Soroban tokens commonly use 7 decimals). The UI works with decimal
//! strings. This module converts between the two without ever touching
//! floating point.
//!
//! ## Canonical Form
//!
//! [`encode`] strips trailing fractional zeros and never emits a bare `.`:
//! `10_000_000` at 7 decimals is `"1"`, `15_000_000` is `"1.5"`, zero is
//! `"0"`.
//!
//! ## Truncation
//!
//! [`decode`] truncates (never rounds) fractional digits beyond `decimals`.
//!
//! ## Examples
//!
//! ```
//! use papex_client::types::amount::{decode, encode};
//!
//! let raw = decode("10000", 7).unwrap();
//! assert_eq!(raw, 100_000_000_000);
//! assert_eq!(encode(raw, 7), "10000");
//!
//! assert_eq!(decode("-0.5", 7).unwrap(), -5_000_000);
//! assert_eq!(encode(-5_000_000, 7), "-0.5");
//! ```

use rust_decimal::prelude::*;
use rust_decimal::Decimal;

use crate::error::{Error, Result};

/// Decimal precision used by Papex tokens unless configured otherwise.
pub const DEFAULT_DECIMALS: u32 = 7;

/// Largest `decimals` for which `10^decimals` fits in an i128.
pub const MAX_DECIMALS: u32 = 38;

/// Fraction digits kept by [`format_display`] when the caller has no preference.
pub const DISPLAY_FRACTION_DIGITS: u32 = 3;

// ============================================================================
// Conversion Functions
// ============================================================================

/// Convert a decimal string to its scaled integer representation.
///
/// Whitespace around the input and thousands-separating commas are ignored.
/// Empty input yields zero. Fractional digits beyond `decimals` are dropped.
///
/// # Errors
///
/// * [`Error::MalformedInput`] - if the input contains anything other than
///   digits, one leading `-`, one `.` and commas, has no digits at all, or
///   does not fit in an i128 once scaled.
///
/// # Example
///
/// ```
/// use papex_client::types::amount::decode;
///
/// assert_eq!(decode("1", 7).unwrap(), 10_000_000);
/// assert_eq!(decode("1,250.5", 2).unwrap(), 125_050);
/// assert_eq!(decode("", 7).unwrap(), 0);
/// assert_eq!(decode("1.23456789", 4).unwrap(), 12_345);
/// assert!(decode("1e5", 7).is_err());
/// ```
pub fn decode(input: &str, decimals: u32) -> Result<i128> {
    let sanitized: String = input.trim().chars().filter(|c| *c != ',').collect();
    if sanitized.is_empty() {
        return Ok(0);
    }

    let (negative, unsigned) = match sanitized.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, sanitized.as_str()),
    };

    let (whole, fraction) = match unsigned.split_once('.') {
        Some((whole, fraction)) => (whole, fraction),
        None => (unsigned, ""),
    };

    if let Some(bad) = whole.chars().chain(fraction.chars()).find(|c| !c.is_ascii_digit()) {
        return Err(Error::malformed(input, format!("unexpected character {:?}", bad)));
    }
    if whole.is_empty() && fraction.is_empty() {
        return Err(Error::malformed(input, "no digits"));
    }

    // Extra fraction digits are dropped; missing ones become a power-of-ten scale.
    let wanted = decimals as usize;
    let kept = fraction.len().min(wanted);
    let padding = wanted - kept;
    let overflow = || Error::malformed(input, "value exceeds 128-bit range");

    let mut magnitude: u128 = 0;
    for digit in whole.bytes().chain(fraction.bytes().take(kept)) {
        magnitude = magnitude
            .checked_mul(10)
            .and_then(|m| m.checked_add(u128::from(digit - b'0')))
            .ok_or_else(overflow)?;
    }

    if magnitude != 0 && padding > 0 {
        let scale = u32::try_from(padding)
            .ok()
            .and_then(pow10)
            .and_then(|p| u128::try_from(p).ok())
            .ok_or_else(overflow)?;
        magnitude = magnitude.checked_mul(scale).ok_or_else(overflow)?;
    }

    apply_sign(magnitude, negative).ok_or_else(overflow)
}

/// Convert a scaled integer to its canonical decimal string.
///
/// Never loses precision inside `decimals` digits and works for any
/// `decimals`, including values larger than [`MAX_DECIMALS`].
///
/// # Example
///
/// ```
/// use papex_client::types::amount::encode;
///
/// assert_eq!(encode(0, 7), "0");
/// assert_eq!(encode(10_000_000, 7), "1");
/// assert_eq!(encode(12_345_678, 7), "1.2345678");
/// assert_eq!(encode(-1, 7), "-0.0000001");
/// ```
pub fn encode(value: i128, decimals: u32) -> String {
    if value == 0 {
        return "0".to_string();
    }
    let digits = value.unsigned_abs().to_string();
    let wanted = decimals as usize;

    let (whole, fraction) = if digits.len() > wanted {
        let split = digits.len() - wanted;
        (digits[..split].to_string(), digits[split..].to_string())
    } else {
        ("0".to_string(), format!("{:0>width$}", digits, width = wanted))
    };

    let fraction = fraction.trim_end_matches('0');
    let body = if fraction.is_empty() {
        whole
    } else {
        format!("{}.{}", whole, fraction)
    };

    if value < 0 {
        format!("-{}", body)
    } else {
        body
    }
}

/// `10^decimals` as an i128, when it fits.
pub fn pow10(decimals: u32) -> Option<i128> {
    10i128.checked_pow(decimals)
}

fn apply_sign(magnitude: u128, negative: bool) -> Option<i128> {
    if negative {
        if magnitude == i128::MIN.unsigned_abs() {
            Some(i128::MIN)
        } else {
            i128::try_from(magnitude).ok().map(|m| -m)
        }
    } else {
        i128::try_from(magnitude).ok()
    }
}

// ============================================================================
// Arithmetic Helpers
// ============================================================================

/// Scale a raw amount by `percent / 100`, truncating toward zero.
///
/// Used for slippage buffers: `scale_by_percent(cost, 110)` is the quoted
/// cost plus ten percent.
///
/// # Returns
///
/// * `None` - if the intermediate product overflows
pub fn scale_by_percent(value: i128, percent: u32) -> Option<i128> {
    value.checked_mul(i128::from(percent)).map(|v| v / 100)
}

// ============================================================================
// Display Formatting
// ============================================================================

/// Format a canonical decimal string for presentation.
///
/// Rounds half away from zero to at most `max_fraction_digits` digits and
/// groups the integer part with commas. Empty input renders as `"0"`; input
/// that is not a decimal number is returned unchanged.
///
/// # Example
///
/// ```
/// use papex_client::types::amount::format_display;
///
/// assert_eq!(format_display("1234.56789", 3), "1,234.568");
/// assert_eq!(format_display("0.5000", 3), "0.5");
/// assert_eq!(format_display("", 3), "0");
/// ```
pub fn format_display(value: &str, max_fraction_digits: u32) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return "0".to_string();
    }
    match Decimal::from_str(trimmed) {
        Ok(decimal) => format_decimal(decimal, max_fraction_digits),
        // Beyond the 96-bit mantissa: round the digit string directly.
        Err(_) => format_digits(trimmed, max_fraction_digits).unwrap_or_else(|| value.to_string()),
    }
}

fn format_decimal(decimal: Decimal, max_fraction_digits: u32) -> String {
    let rounded = decimal
        .round_dp_with_strategy(max_fraction_digits, RoundingStrategy::MidpointAwayFromZero)
        .normalize();
    let text = rounded.abs().to_string();
    let (whole, fraction) = match text.split_once('.') {
        Some((w, f)) => (w, f),
        None => (text.as_str(), ""),
    };
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    join_display(negative, whole, fraction)
}

/// Round a plain decimal string half away from zero without a numeric type.
///
/// Returns `None` unless the input is an optional `-`, digits and at most
/// one `.`.
fn format_digits(value: &str, max_fraction_digits: u32) -> Option<String> {
    let (negative, unsigned) = match value.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, value),
    };
    let (whole, fraction) = unsigned.split_once('.').unwrap_or((unsigned, ""));
    if whole.is_empty() && fraction.is_empty() {
        return None;
    }
    if !whole.bytes().chain(fraction.bytes()).all(|b| b.is_ascii_digit()) {
        return None;
    }

    let keep = fraction.len().min(max_fraction_digits as usize);
    let round_up = fraction.as_bytes().get(keep).map_or(false, |d| *d >= b'5');

    let mut digits: Vec<u8> = if whole.is_empty() { b"0".to_vec() } else { whole.as_bytes().to_vec() };
    digits.extend_from_slice(&fraction.as_bytes()[..keep]);
    if round_up {
        let mut carry = true;
        for d in digits.iter_mut().rev() {
            if *d == b'9' {
                *d = b'0';
            } else {
                *d += 1;
                carry = false;
                break;
            }
        }
        if carry {
            digits.insert(0, b'1');
        }
    }

    let split = digits.len() - keep;
    let (whole, fraction) = digits.split_at(split);
    let whole = std::str::from_utf8(whole).ok()?.trim_start_matches('0');
    let fraction = std::str::from_utf8(fraction).ok()?.trim_end_matches('0');
    let whole = if whole.is_empty() { "0" } else { whole };
    let negative = negative && (whole != "0" || !fraction.is_empty());
    Some(join_display(negative, whole, fraction))
}

fn join_display(negative: bool, whole: &str, fraction: &str) -> String {
    let mut out = String::with_capacity(whole.len() + whole.len() / 3 + fraction.len() + 2);
    if negative {
        out.push('-');
    }
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if !fraction.is_empty() {
        out.push('.');
        out.push_str(fraction);
    }
    out
}

// ============================================================================
// Unit Tests
// ============================================================================
