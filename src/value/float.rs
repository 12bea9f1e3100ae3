use super::int::underscores_ok;
use super::{Handle, Resolved, Slot, Value};
use crate::error::ValueError;

/// Parse an IEEE-754 double.
///
/// Explicit infinities (`inf`, `+Infinity`, ...) are accepted; a finite
/// literal too large to represent, such as `1e500`, is a range error.
/// Hexadecimal literals need a binary exponent (`0x1p-2`, `0X1.8P+1`) and
/// may separate digits with `_`.
pub fn parse_float64(raw: &str) -> Result<f64, ValueError> {
    let v = if is_hex_literal(raw) {
        parse_hex_float(raw).ok_or_else(|| ValueError::syntax(raw))?
    } else {
        raw.parse().map_err(|_| ValueError::syntax(raw))?
    };
    if v.is_infinite() && !is_infinity_literal(raw) {
        return Err(ValueError::range(raw));
    }
    Ok(v)
}

fn is_hex_literal(raw: &str) -> bool {
    let unsigned = raw.trim_start_matches(['+', '-']);
    unsigned.starts_with("0x") || unsigned.starts_with("0X")
}

/// `[+-]0x<hex>[.<hex>]p[+-]<dec>`. Mantissa digits past 64 bits are
/// truncated.
fn parse_hex_float(raw: &str) -> Option<f64> {
    let (negative, unsigned) = match raw.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, raw.strip_prefix('+').unwrap_or(raw)),
    };
    let body = unsigned
        .strip_prefix("0x")
        .or_else(|| unsigned.strip_prefix("0X"))?;
    let (mantissa, exponent) = body.split_once(['p', 'P'])?;
    let (whole, fraction) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    if !underscores_ok(whole, true) || !(fraction.is_empty() || underscores_ok(fraction, false)) {
        return None;
    }

    let mut bits: u64 = 0;
    let mut scale: i64 = 0;
    let mut digits = 0;
    let whole_digits = whole.chars().map(|c| (c, false));
    for (c, fractional) in whole_digits.chain(fraction.chars().map(|c| (c, true))) {
        if c == '_' {
            continue;
        }
        let d = c.to_digit(16)?;
        digits += 1;
        if bits >> 60 == 0 {
            bits = (bits << 4) | u64::from(d);
            if fractional {
                scale -= 4;
            }
        } else if !fractional {
            scale += 4;
        }
    }
    if digits == 0 {
        return None;
    }

    if !exponent.bytes().all(|b| b.is_ascii_digit() || b == b'+' || b == b'-') {
        return None;
    }
    let exponent: i64 = exponent.parse().ok()?;
    let magnitude = if bits == 0 {
        0.0
    } else {
        scale_by_two(bits as f64, exponent.saturating_add(scale))
    };
    Some(if negative { -magnitude } else { magnitude })
}

fn scale_by_two(mut v: f64, mut exp: i64) -> f64 {
    while exp > 0 && v.is_finite() {
        let step = exp.min(1000);
        v *= 2f64.powi(step as i32);
        exp -= step;
    }
    while exp < 0 && v != 0.0 {
        let step = exp.max(-1000);
        v *= 2f64.powi(step as i32);
        exp -= step;
    }
    v
}

fn is_infinity_literal(raw: &str) -> bool {
    let unsigned = raw.trim_start_matches(['+', '-']);
    unsigned.eq_ignore_ascii_case("inf") || unsigned.eq_ignore_ascii_case("infinity")
}

pub struct Float64Value {
    slot: Slot<f64>,
}

impl Float64Value {
    pub fn new(default: f64) -> (Self, Handle<f64>) {
        let handle = Handle::new(default);
        (Self { slot: handle.slot() }, handle)
    }
}

impl Value for Float64Value {
    fn set(&self, raw: &str) -> Result<(), ValueError> {
        self.slot.store(parse_float64(raw)?);
        Ok(())
    }

    fn get(&self) -> Option<Resolved> {
        self.slot.map(|v| Resolved::Float64(*v))
    }
}
