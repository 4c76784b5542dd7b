//! Length and number conversion.
//!
//! Every textual value token is normalized to points where a unit allows it,
//! and passed through untouched where it doesn't. Conversion never fails:
//! an unrecognized token comes back as its own trimmed text.

use std::fmt;

/// Base font size in points that `em` and `rem` are resolved against.
pub const BASE_FONT_SIZE: f64 = 11.0;

const PX_TO_PT: f64 = 0.75;
const IN_TO_PT: f64 = 72.0;
const MM_TO_PT: f64 = 2.83465;
const CM_TO_PT: f64 = 28.3465;

/// A converted value: either a number in points (or unitless) or text.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum Value {
    Number(f64),
    /// Keywords, percentages, viewport units and anything unrecognized.
    Text(String),
}

impl Value {
    /// Returns the number, if this is one.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            Value::Text(_) => None,
        }
    }

    /// Returns the text, if this is not a number.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Number(_) => None,
            Value::Text(s) => Some(s),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{n}"),
            Value::Text(s) => f.write_str(s),
        }
    }
}

/// Convert a length or number token.
///
/// - `inherit`, `initial`, `unset`, `auto` pass through as text
/// - bare numbers become unitless numbers
/// - `em`/`rem` scale by [`BASE_FONT_SIZE`], `px` by 0.75, `in`/`mm`/`cm`
///   to points, `pt` is kept as is
/// - percentages and `vw`/`vh` pass through as text
/// - anything else passes through as the trimmed input
pub fn convert(raw: &str) -> Value {
    let trimmed = raw.trim();

    if matches!(trimmed, "inherit" | "initial" | "unset" | "auto") {
        return Value::Text(trimmed.to_string());
    }

    let Some((number, unit)) = split_number(trimmed) else {
        return Value::Text(trimmed.to_string());
    };

    match unit.to_ascii_lowercase().as_str() {
        "" => Value::Number(number),
        "em" | "rem" => Value::Number(number * BASE_FONT_SIZE),
        "px" => Value::Number(number * PX_TO_PT),
        "pt" => Value::Number(number),
        "in" => Value::Number(number * IN_TO_PT),
        "mm" => Value::Number(number * MM_TO_PT),
        "cm" => Value::Number(number * CM_TO_PT),
        // %, vw, vh and unknown units are left to the renderer
        _ => Value::Text(trimmed.to_string()),
    }
}

/// Parse a bare (optionally signed) integer or decimal.
pub(crate) fn parse_number(raw: &str) -> Option<f64> {
    match split_number(raw.trim()) {
        Some((n, "")) => Some(n),
        _ => None,
    }
}

/// Split a token into its numeric prefix and unit suffix.
///
/// The unit must be alphabetic or `%`; `"12px"` gives `(12.0, "px")`,
/// `"12px solid"` gives `None`.
fn split_number(token: &str) -> Option<(f64, &str)> {
    let bytes = token.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let digits_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - digits_start;
    if end < bytes.len() && bytes[end] == b'.' {
        end += 1;
        let fraction_start = end;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
        digits += end - fraction_start;
    }
    if digits == 0 {
        return None;
    }

    let unit = &token[end..];
    if !(unit == "%" || unit.bytes().all(|b| b.is_ascii_alphabetic())) {
        return None;
    }

    let number = token[..end].parse::<f64>().ok()?;
    Some((number, unit))
}
