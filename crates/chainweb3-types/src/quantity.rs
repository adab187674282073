//! Quantity parsing and rendering.
//!
//! Nodes send numeric fields as `0x` hex strings, but older or non-standard
//! nodes also send decimal strings, bare JSON numbers, and occasionally
//! fractional or exponent forms. [`parse_quantity`] accepts all of them and
//! produces an arbitrary-precision [`Quantity`].

use num_bigint::BigUint;
use num_traits::Zero;
use serde::Serializer;

use crate::error::NumericError;
use crate::primitives::strip_hex_prefix;

/// Arbitrary-precision non-negative integer (balances, gas, block numbers).
pub type Quantity = BigUint;

/// Exponents beyond this magnitude are treated as malformed input rather
/// than materialized.
const MAX_DECIMAL_EXPONENT: i64 = 4096;

/// How the decoder reacts to malformed input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DecodeMode {
    /// Tolerate upstream sloppiness: fractions are truncated, negative or
    /// unparseable quantities and malformed hex fields become zero values.
    #[default]
    Lenient,
    /// Accept only canonical hex or plain decimal integers; anything else
    /// is reported as an error for the offending field.
    Strict,
}

/// Parse a quantity token under the given mode.
///
/// In [`DecodeMode::Lenient`] this never fails.
pub fn parse_quantity(token: &str, mode: DecodeMode) -> Result<Quantity, NumericError> {
    let trimmed = token.trim();
    match mode {
        DecodeMode::Strict => parse_strict(trimmed),
        DecodeMode::Lenient => Ok(parse_lenient(trimmed).unwrap_or_else(|| {
            tracing::trace!(token, "unparseable quantity, using zero");
            Quantity::zero()
        })),
    }
}

fn has_hex_prefix(s: &str) -> bool {
    s.starts_with("0x") || s.starts_with("0X")
}

fn parse_radix(digits: &str, radix: u32) -> Option<Quantity> {
    let valid = match radix {
        16 => digits.bytes().all(|b| b.is_ascii_hexdigit()),
        _ => digits.bytes().all(|b| b.is_ascii_digit()),
    };
    if !valid {
        return None;
    }
    if digits.is_empty() {
        return Some(Quantity::zero());
    }
    BigUint::parse_bytes(digits.as_bytes(), radix)
}

fn parse_strict(token: &str) -> Result<Quantity, NumericError> {
    if has_hex_prefix(token) {
        let digits = strip_hex_prefix(token);
        if digits.is_empty() {
            return Err(NumericError::new(token, "no hex digits after 0x prefix"));
        }
        return parse_radix(digits, 16)
            .ok_or_else(|| NumericError::new(token, "invalid hex digit"));
    }
    if token.is_empty() {
        return Err(NumericError::new(token, "empty quantity"));
    }
    if token.starts_with('-') {
        return Err(NumericError::new(token, "negative quantity"));
    }
    parse_radix(token, 10)
        .ok_or_else(|| NumericError::new(token, "not a non-negative integer"))
}

fn parse_lenient(token: &str) -> Option<Quantity> {
    if has_hex_prefix(token) {
        return parse_radix(strip_hex_prefix(token), 16);
    }
    parse_decimal_truncated(token)
}

/// Read a decimal literal with optional fraction and exponent, truncating
/// toward zero. Negative values clamp to zero.
fn parse_decimal_truncated(token: &str) -> Option<Quantity> {
    let (negative, unsigned) = match token.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, token.strip_prefix('+').unwrap_or(token)),
    };

    let (mantissa, exponent) = match unsigned.find(['e', 'E']) {
        Some(pos) => {
            let exp: i64 = unsigned[pos + 1..].parse().ok()?;
            (&unsigned[..pos], exp)
        }
        None => (unsigned, 0),
    };
    if exponent.unsigned_abs() > MAX_DECIMAL_EXPONENT.unsigned_abs() {
        return None;
    }

    let (int_part, frac_part) = match mantissa.split_once('.') {
        Some((i, f)) => (i, f),
        None => (mantissa, ""),
    };
    if int_part.is_empty() && frac_part.is_empty() {
        return None;
    }
    if !int_part.bytes().chain(frac_part.bytes()).all(|b| b.is_ascii_digit()) {
        return None;
    }
    if negative {
        return Some(Quantity::zero());
    }

    let digits = format!("{int_part}{frac_part}");
    let frac_len = i64::try_from(frac_part.len()).ok()?;
    let scale = exponent.checked_sub(frac_len)?;
    if scale >= 0 {
        let base = parse_radix(&digits, 10)?;
        Some(base * BigUint::from(10u32).pow(u32::try_from(scale).ok()?))
    } else {
        // drop the last |scale| digits
        let cut = usize::try_from(scale.unsigned_abs()).ok()?;
        match digits.len().checked_sub(cut) {
            Some(keep) if keep > 0 => parse_radix(&digits[..keep], 10),
            _ => Some(Quantity::zero()),
        }
    }
}

/// Render as minimal `0x` hex, the node's quantity encoding (`0` → `"0x0"`).
pub fn to_quantity_hex(value: &Quantity) -> String {
    format!("{value:#x}")
}

/// `serialize_with` helper rendering a [`Quantity`] as wire hex.
pub fn serialize_quantity<S: Serializer>(value: &Quantity, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&to_quantity_hex(value))
}

/// `serialize_with` helper for optional quantities.
pub fn serialize_opt_quantity<S: Serializer>(
    value: &Option<Quantity>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match value {
        Some(v) => serialize_quantity(v, serializer),
        None => serializer.serialize_none(),
    }
}
