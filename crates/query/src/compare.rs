//! Loose equality between record values and filter text.
//!
//! Order of checks: native string equality, then numeric equality when both
//! sides parse as finite numbers, then equality of string forms. A failed
//! numeric parse falls through; it never aborts evaluation.

use taxon_value::{parse_finite_number, Value};

/// Match a resolved value against filter text.
///
/// Arrays match when any element matches, nested arrays included.
#[must_use]
pub fn value_matches(resolved: &Value, expected: &str) -> bool {
    match resolved {
        Value::Array(items) => items.iter().any(|item| value_matches(item, expected)),
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) | Value::Object(_) => {
            scalar_equals(resolved, expected)
        }
    }
}

/// Compare a single value with filter text.
///
/// Null has no string form and never matches; booleans compare as `true` or
/// `false` text only, never numerically.
#[must_use]
pub fn scalar_equals(actual: &Value, expected: &str) -> bool {
    match actual {
        Value::String(s) => s == expected,
        Value::Number(n) => match parse_finite_number(expected) {
            Some(wanted) => *n == wanted,
            None => actual.scalar_text().is_some_and(|text| text == expected),
        },
        Value::Bool(_) => actual.scalar_text().is_some_and(|text| text == expected),
        Value::Null | Value::Array(_) | Value::Object(_) => false,
    }
}
