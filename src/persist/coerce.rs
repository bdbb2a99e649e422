//! Lenient coercion of loosely typed JSON values.
//!
//! Snapshots and stored point tables are written by hand as often as by
//! the program, so numbers may arrive as strings, floats or garbage.
//! These helpers accept what they can and report `None` for the rest.

use serde_json::Value;

/// Read an integer the forgiving way: JSON integers as-is, floats
/// truncated toward zero, strings by their leading optionally signed
/// digits (`" 42abc"` is 42). Anything else is `None`.
#[must_use]
pub fn coerce_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_u64().map(|_| i64::MAX))
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64)),
        Value::String(s) => leading_int(s),
        _ => None,
    }
}

/// Coerce to a non-negative millisecond count. Unusable or negative
/// values become 0.
#[must_use]
pub fn coerce_ms(value: &Value) -> u64 {
    coerce_int(value)
        .and_then(|n| u64::try_from(n).ok())
        .unwrap_or(0)
}

/// Truthiness of a JSON value: `null`, `false`, `0` and `""` are false.
#[must_use]
pub fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn leading_int(text: &str) -> Option<i64> {
    let trimmed = text.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return None;
    }
    let magnitude = rest[..digits_len].parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -magnitude } else { magnitude })
}
