//! Tolerant parsing for numeric dialog inputs.
//!
//! Dialog submit buttons stay disabled until the buffer parses, so nothing
//! unparsable is ever sent to the backend.

/// Keep only the characters that can appear in an amount, applied while the
/// user types.
pub fn sanitize_numeric_input(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, '.' | ',' | '-'))
        .collect()
}

/// Parse an amount, accepting `,` as a decimal separator and surrounding
/// whitespace. Returns `None` for anything that does not resolve to a finite
/// number.
pub fn parse_amount(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let normalized = trimmed.replace(',', ".");
    normalized
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// Parse a whole number (months, levels). Tolerates a `.0`-style fraction of
/// zero but rejects anything fractional.
pub fn parse_whole(raw: &str) -> Option<i64> {
    let value = parse_amount(raw)?;
    if value.fract() != 0.0 {
        return None;
    }
    if value < i64::MIN as f64 || value > i64::MAX as f64 {
        return None;
    }
    Some(value as i64)
}
