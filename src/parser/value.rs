//! Typing of raw field values.

use serde_json::{Number, Value};

/// Convert a raw field value into an untyped value.
///
/// Integers and decimals without superfluous leading zeros become
/// numbers; everything else stays a string.
pub(crate) fn typed(raw: &str) -> Value {
    if is_integer(raw) {
        if let Ok(n) = raw.parse::<i64>() {
            return Value::from(n);
        }
    }
    if let Some((int, frac)) = raw.split_once('.') {
        if is_integer(int) && !frac.is_empty() && frac.bytes().all(|b| b.is_ascii_digit()) {
            if let Some(n) = raw.parse::<f64>().ok().and_then(Number::from_f64) {
                return Value::Number(n);
            }
        }
    }
    Value::String(raw.to_string())
}

fn is_integer(raw: &str) -> bool {
    let digits = raw.strip_prefix('-').unwrap_or(raw);
    !digits.is_empty()
        && digits.bytes().all(|b| b.is_ascii_digit())
        && (digits == "0" || !digits.starts_with('0'))
}
