//! Lenient numeric parsing for free-text form fields.
//!
//! Form fields arrive as strings and are parsed the way browser forms do:
//! a leading numeric prefix is accepted and the rest of the string ignored,
//! so `"70 years"` reads as 70. A string without a numeric prefix is "not a
//! number" and yields `None`; callers treat that the same as an absent field.

use regex::Regex;
use std::num::IntErrorKind;
use std::sync::OnceLock;

static INT_PREFIX: OnceLock<Regex> = OnceLock::new();
static DECIMAL_PREFIX: OnceLock<Regex> = OnceLock::new();

fn int_prefix() -> &'static Regex {
    INT_PREFIX.get_or_init(|| {
        Regex::new(r"^\s*([+-]?[0-9]+)").expect("Valid regex")
    })
}

fn decimal_prefix() -> &'static Regex {
    DECIMAL_PREFIX.get_or_init(|| {
        Regex::new(r"^\s*([+-]?(?:[0-9]+\.?[0-9]*|\.[0-9]+)(?:[eE][+-]?[0-9]+)?)").expect("Valid regex")
    })
}

/// Parse the leading integer of `input`.
///
/// Fractional parts are truncated (`"70.9"` → 70). Digit runs too long for
/// `i64` saturate instead of failing, so very large ages still land in the
/// top age band. Only ASCII digits count.
#[must_use]
pub fn parse_leading_int(input: &str) -> Option<i64> {
    let caps = int_prefix().captures(input)?;
    let digits = caps.get(1)?.as_str();
    match digits.parse::<i64>() {
        Ok(v) => Some(v),
        Err(e) => match e.kind() {
            IntErrorKind::PosOverflow => Some(i64::MAX),
            IntErrorKind::NegOverflow => Some(i64::MIN),
            _ => None,
        },
    }
}

/// Parse the leading decimal number of `input`.
///
/// Returns `None` when there is no numeric prefix or the value is not finite.
#[must_use]
pub fn parse_leading_decimal(input: &str) -> Option<f64> {
    let caps = decimal_prefix().captures(input)?;
    caps.get(1)?
        .as_str()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

/// Parse an optional field; `None` and empty strings are absent.
#[must_use]
pub fn optional_int(field: Option<&str>) -> Option<i64> {
    field.filter(|s| !s.trim().is_empty()).and_then(parse_leading_int)
}

/// Parse an optional decimal field; `None` and empty strings are absent.
#[must_use]
pub fn optional_decimal(field: Option<&str>) -> Option<f64> {
    field
        .filter(|s| !s.trim().is_empty())
        .and_then(parse_leading_decimal)
}
