//! Locale-aware normalization of numeric-like payload fields.
//!
//! Report payloads carry amounts as JSON numbers or as strings formatted in
//! either convention (`"1.234.567"`, `"1,234.56"`, `"123,45"`). This module
//! turns any of those into a plain `f64` without ever failing; unparseable
//! input degrades to `0.0` with a warning.

use serde_json::Value;

/// Converts a numeric-like JSON value into a finite `f64`.
///
/// Rules:
/// - `null` (or any absent field the caller substitutes with `null`) → `0.0`
/// - JSON numbers pass through; non-finite values collapse to `0.0`
/// - strings go through [`clean_str`]
/// - any other JSON type → `0.0`
///
/// Never panics and never returns an error; bad data is recovered locally.
#[must_use]
pub fn clean_value(value: &Value) -> f64 {
    match value {
        Value::Null => 0.0,
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite()).unwrap_or(0.0),
        Value::String(s) => clean_str(s),
        other => {
            tracing::warn!(value = %other, "valor no numérico, se usará 0.0");
            0.0
        }
    }
}

/// Parses a numeric string that may use `.` or `,` as thousands or decimal
/// separator.
///
/// Decision table:
/// 1. Both separators present: the rightmost one is the decimal separator,
///    the other is stripped as a thousands marker.
/// 2. Only `.`: more than one dot, or a single dot followed by exactly three
///    digits, means thousands markers (stripped); otherwise the dot is a
///    decimal point.
/// 3. Only `,`: a lone comma is a decimal point; several commas are
///    thousands markers.
///
/// Rule 2 is inherently ambiguous for three-digit fractions: `"1.234"` is
/// read as `1234.0`. The heuristic accepts that rather than demanding a
/// locale flag from callers.
#[must_use]
pub fn clean_str(raw: &str) -> f64 {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return 0.0;
    }

    let canonical = canonicalize_separators(trimmed);
    match canonical.parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => {
            tracing::warn!(value = raw, "no se pudo convertir el valor, se usará 0.0");
            0.0
        }
    }
}

/// Rewrites a separator-laden numeric string into `f64::parse` syntax.
fn canonicalize_separators(s: &str) -> String {
    match (s.rfind('.'), s.rfind(',')) {
        (Some(dot), Some(comma)) => {
            if dot > comma {
                // "1,234.56": comma groups thousands.
                s.chars().filter(|&c| c != ',').collect()
            } else {
                // "1.234,56": dot groups thousands, comma is the decimal point.
                s.chars()
                    .filter(|&c| c != '.')
                    .map(|c| if c == ',' { '.' } else { c })
                    .collect()
            }
        }
        (Some(_), None) => {
            let groups: Vec<&str> = s.split('.').collect();
            let trailing_group_of_three = groups
                .last()
                .is_some_and(|g| g.len() == 3 && g.chars().all(|c| c.is_ascii_digit()));
            if groups.len() > 2 || trailing_group_of_three {
                s.chars().filter(|&c| c != '.').collect()
            } else {
                s.to_string()
            }
        }
        (None, Some(_)) => {
            if s.matches(',').count() == 1 {
                s.replace(',', ".")
            } else {
                s.chars().filter(|&c| c != ',').collect()
            }
        }
        (None, None) => s.to_string(),
    }
}
