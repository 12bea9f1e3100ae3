use super::{Handle, Resolved, Slot, Value};
use crate::error::ValueError;

/// Parse a signed integer that must fit the platform word.
///
/// Same grammar as [`parse_int64`].
pub fn parse_int(raw: &str) -> Result<isize, ValueError> {
    let v = parse_int64(raw)?;
    isize::try_from(v).map_err(|_| ValueError::range(raw))
}

/// Parse a signed 64-bit integer.
///
/// Accepts an optional sign, a `0x`, `0o` or `0b` prefix (or a bare leading
/// `0` for octal), and `_` between digits.
pub fn parse_int64(raw: &str) -> Result<i64, ValueError> {
    let (negative, body) = match raw.as_bytes().first() {
        Some(b'-') => (true, &raw[1..]),
        Some(b'+') => (false, &raw[1..]),
        _ => (false, raw),
    };

    let magnitude = parse_magnitude(body).map_err(|kind| match kind {
        Failure::Syntax => ValueError::syntax(raw),
        Failure::Range => ValueError::range(raw),
    })?;

    if negative {
        0_i64
            .checked_sub_unsigned(magnitude)
            .ok_or_else(|| ValueError::range(raw))
    } else {
        i64::try_from(magnitude).map_err(|_| ValueError::range(raw))
    }
}

enum Failure {
    Syntax,
    Range,
}

fn parse_magnitude(body: &str) -> Result<u64, Failure> {
    let lower = body.get(..2).map(str::to_ascii_lowercase);
    let (radix, digits, prefixed) = match lower.as_deref() {
        Some("0x") => (16, &body[2..], true),
        Some("0o") => (8, &body[2..], true),
        Some("0b") => (2, &body[2..], true),
        _ if body.len() > 1 && body.starts_with('0') => (8, &body[1..], true),
        _ => (10, body, false),
    };

    if digits.contains('_') && !underscores_ok(digits, prefixed) {
        return Err(Failure::Syntax);
    }
    let cleaned: String = digits.chars().filter(|c| *c != '_').collect();
    if cleaned.is_empty() || !cleaned.chars().all(|c| c.is_digit(radix)) {
        return Err(Failure::Syntax);
    }

    // Only overflow can fail past the digit check.
    u64::from_str_radix(&cleaned, radix).map_err(|_| Failure::Range)
}

/// `_` may only separate digits, or directly follow a base prefix.
pub(super) fn underscores_ok(digits: &str, prefixed: bool) -> bool {
    let mut prev_underscore = !prefixed;
    for c in digits.chars() {
        let is_underscore = c == '_';
        if is_underscore && prev_underscore {
            return false;
        }
        prev_underscore = is_underscore;
    }
    !prev_underscore
}

pub struct IntValue {
    slot: Slot<isize>,
}

impl IntValue {
    pub fn new(default: isize) -> (Self, Handle<isize>) {
        let handle = Handle::new(default);
        (Self { slot: handle.slot() }, handle)
    }
}

impl Value for IntValue {
    fn set(&self, raw: &str) -> Result<(), ValueError> {
        self.slot.store(parse_int(raw)?);
        Ok(())
    }

    fn get(&self) -> Option<Resolved> {
        self.slot.map(|v| Resolved::Int(*v))
    }
}

pub struct Int64Value {
    slot: Slot<i64>,
}

impl Int64Value {
    pub fn new(default: i64) -> (Self, Handle<i64>) {
        let handle = Handle::new(default);
        (Self { slot: handle.slot() }, handle)
    }
}

impl Value for Int64Value {
    fn set(&self, raw: &str) -> Result<(), ValueError> {
        self.slot.store(parse_int64(raw)?);
        Ok(())
    }

    fn get(&self) -> Option<Resolved> {
        self.slot.map(|v| Resolved::Int64(*v))
    }
}
