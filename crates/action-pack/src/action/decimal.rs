//! Decimal text for prices and sizes.
//!
//! The encoder writes decimal strings verbatim, so the text itself is part of
//! the signed bytes: `"0.5"` and `"0.50"` hash differently.

use crate::error::{Error, Result};

const WIRE_DECIMALS: usize = 8;
const PRECISION_GUARD: f64 = 1e-12;

/// Renders a float as canonical wire decimal text.
///
/// Rounds to 8 decimal places, refusing inputs that rounding would change by
/// `1e-12` or more, then strips trailing zeros and a trailing point. Values
/// that round to zero from below are written as `0`.
///
/// ```
/// use action_pack::action::float_to_wire;
///
/// assert_eq!(float_to_wire(0.1233).unwrap(), "0.1233");
/// assert_eq!(float_to_wire(45.0).unwrap(), "45");
/// assert!(float_to_wire(0.123456789).is_err());
/// ```
pub fn float_to_wire(x: f64) -> Result<String> {
    if !x.is_finite() {
        return Err(invalid(x, "not a finite number"));
    }
    let rounded = format!("{x:.prec$}", prec = WIRE_DECIMALS);
    let reparsed: f64 = rounded
        .parse()
        .map_err(|_| invalid(x, "rounded text does not parse"))?;
    if (reparsed - x).abs() >= PRECISION_GUARD {
        return Err(invalid(x, "rounding to 8 decimals loses precision"));
    }
    let trimmed = rounded.trim_end_matches('0').trim_end_matches('.');
    Ok(match trimmed {
        "-0" => "0".to_owned(),
        other => other.to_owned(),
    })
}

fn invalid(x: f64, reason: &'static str) -> Error {
    Error::InvalidDecimal {
        value: x.to_string(),
        reason,
    }
}

/// Whether `s` is canonical wire decimal text: ASCII digits with at most one
/// fractional part, no superfluous leading zero, and no trailing zero after
/// the point.
pub fn is_canonical_decimal(s: &str) -> bool {
    let all_digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());
    let (int, frac) = match s.split_once('.') {
        Some((int, frac)) => (int, Some(frac)),
        None => (s, None),
    };
    if !all_digits(int) || (int.len() > 1 && int.starts_with('0')) {
        return false;
    }
    match frac {
        None => true,
        Some(frac) => all_digits(frac) && !frac.ends_with('0'),
    }
}
