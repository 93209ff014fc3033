//! Numeric coercions shared by every pipeline.
//!
//! CSV exports carry numbers as free text: empty cells, stray whitespace and
//! integers written as floats (`"120.0"`) are all common. Both parsers are
//! total, an unparseable cell is indistinguishable from an empty one.

/// Parse a floating point cell, `None` when empty or malformed.
///
/// Non-finite values are rejected as well since they have no JSON encoding.
pub fn parse_float(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    raw.parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Parse an integer cell through a float, truncating toward zero.
///
/// Values outside the `i64` range are treated as malformed.
pub fn parse_int(raw: &str) -> Option<i64> {
    parse_float(raw)
        .map(f64::trunc)
        .filter(|value| value.abs() < 9.2e18)
        .map(|value| value as i64)
}

/// Round to a fixed number of decimal places.
///
/// The stored binary value is rounded exactly, ties going to even, so
/// `1.45` (stored slightly below) gives `1.4` and `0.25` gives `0.2`.
pub fn round_to(value: f64, decimals: usize) -> f64 {
    format!("{value:.decimals$}").parse().unwrap_or(value)
}
