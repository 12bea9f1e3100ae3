use std::time::Duration;

use super::{Handle, Resolved, Slot, Value};
use crate::error::ValueError;

const NANOS_PER_UNIT: &[(&str, u128)] = &[
    ("ns", 1),
    ("us", 1_000),
    ("µs", 1_000),
    ("μs", 1_000),
    ("ms", 1_000_000),
    ("s", 1_000_000_000),
    ("m", 60_000_000_000),
    ("h", 3_600_000_000_000),
];

// Fraction digits past this point are below nanosecond resolution.
const MAX_FRACTION_DIGITS: usize = 18;

/// Parse a duration such as `300ms`, `1.5h` or `2h45m`.
///
/// A duration is a sequence of decimal numbers, each with an optional
/// fraction and a mandatory unit (`ns`, `us`/`µs`, `ms`, `s`, `m`, `h`).
/// A bare `0` is allowed. Negative durations cannot be represented and are
/// rejected, except for negative zero.
pub fn parse_duration(raw: &str) -> Result<Duration, ValueError> {
    let invalid = |reason: &str| ValueError::Duration {
        raw: raw.to_string(),
        reason: reason.to_string(),
    };

    let (negative, mut rest) = match raw.as_bytes().first() {
        Some(b'-') => (true, &raw[1..]),
        Some(b'+') => (false, &raw[1..]),
        _ => (false, raw),
    };

    if rest == "0" {
        return Ok(Duration::ZERO);
    }
    if rest.is_empty() {
        return Err(invalid("empty duration"));
    }

    let mut total: u128 = 0;
    while !rest.is_empty() {
        let int_len = rest.bytes().take_while(u8::is_ascii_digit).count();
        let (int_part, after_int) = rest.split_at(int_len);
        rest = after_int;

        let mut frac_part = "";
        if let Some(after_dot) = rest.strip_prefix('.') {
            let frac_len = after_dot.bytes().take_while(u8::is_ascii_digit).count();
            frac_part = &after_dot[..frac_len];
            rest = &after_dot[frac_len..];
        }
        if int_part.is_empty() && frac_part.is_empty() {
            return Err(invalid("expected a number"));
        }

        let unit_len = rest
            .find(|c: char| c == '.' || c.is_ascii_digit())
            .unwrap_or(rest.len());
        if unit_len == 0 {
            return Err(invalid("missing unit"));
        }
        let (unit, after_unit) = rest.split_at(unit_len);
        rest = after_unit;

        let scale = NANOS_PER_UNIT
            .iter()
            .find(|(name, _)| *name == unit)
            .map(|(_, nanos)| *nanos)
            .ok_or_else(|| invalid(&format!("unknown unit {unit:?}")))?;

        let whole: u128 = if int_part.is_empty() {
            0
        } else {
            int_part.parse().map_err(|_| ValueError::range(raw))?
        };

        let mut numerator: u128 = 0;
        let mut denominator: u128 = 1;
        for digit in frac_part.bytes().take(MAX_FRACTION_DIGITS) {
            numerator = numerator * 10 + u128::from(digit - b'0');
            denominator *= 10;
        }

        total = whole
            .checked_mul(scale)
            .and_then(|v| v.checked_add(numerator * scale / denominator))
            .and_then(|v| v.checked_add(total))
            .ok_or_else(|| ValueError::range(raw))?;
    }

    if negative && total != 0 {
        return Err(invalid("negative duration"));
    }

    let nanos = u64::try_from(total).map_err(|_| ValueError::range(raw))?;
    Ok(Duration::from_nanos(nanos))
}

pub struct DurationValue {
    slot: Slot<Duration>,
}

impl DurationValue {
    pub fn new(default: Duration) -> (Self, Handle<Duration>) {
        let handle = Handle::new(default);
        (Self { slot: handle.slot() }, handle)
    }
}

impl Value for DurationValue {
    fn set(&self, raw: &str) -> Result<(), ValueError> {
        self.slot.store(parse_duration(raw)?);
        Ok(())
    }

    fn get(&self) -> Option<Resolved> {
        self.slot.map(|v| Resolved::Duration(*v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_units() {
        assert_eq!(parse_duration("5s"), Ok(Duration::from_secs(5)));
        assert_eq!(parse_duration("2m"), Ok(Duration::from_secs(120)));
        assert_eq!(parse_duration("1h"), Ok(Duration::from_secs(3600)));
        assert_eq!(parse_duration("300ms"), Ok(Duration::from_millis(300)));
        assert_eq!(parse_duration("10us"), Ok(Duration::from_micros(10)));
        assert_eq!(parse_duration("10µs"), Ok(Duration::from_micros(10)));
        assert_eq!(parse_duration("7ns"), Ok(Duration::from_nanos(7)));
    }

    #[test]
    fn compound_and_fractional() {
        assert_eq!(parse_duration("2h45m"), Ok(Duration::from_secs(2 * 3600 + 45 * 60)));
        assert_eq!(parse_duration("1.5h"), Ok(Duration::from_secs(5400)));
        assert_eq!(parse_duration(".5s"), Ok(Duration::from_millis(500)));
        assert_eq!(parse_duration("1m30.25s"), Ok(Duration::from_millis(90_250)));
        assert_eq!(parse_duration("+3s"), Ok(Duration::from_secs(3)));
    }

    #[test]
    fn zero_forms() {
        assert_eq!(parse_duration("0"), Ok(Duration::ZERO));
        assert_eq!(parse_duration("-0"), Ok(Duration::ZERO));
        assert_eq!(parse_duration("0s"), Ok(Duration::ZERO));
    }

    #[test]
    fn invalid_forms() {
        for raw in ["", "5", "s", "5x", "1h5", ".s", "-5s", "5 s", "abc"] {
            assert!(
                matches!(parse_duration(raw), Err(ValueError::Duration { .. })),
                "{raw:?}"
            );
        }
    }

    #[test]
    fn overflow_is_a_range_error() {
        let raw = "99999999999999999999h";
        assert_eq!(parse_duration(raw), Err(ValueError::range(raw)));
    }

    #[test]
    fn adapter_reads_back() {
        let (value, handle) = DurationValue::new(Duration::from_secs(1));
        assert!(value.set("soon").is_err());
        assert_eq!(handle.get(), Duration::from_secs(1));

        value.set("250ms").unwrap();
        assert_eq!(value.get(), Some(Resolved::Duration(Duration::from_millis(250))));
    }
}
