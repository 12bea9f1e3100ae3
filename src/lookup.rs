//! Immediate lookups.
//!
//! Each function reads the process environment on the spot; nothing is
//! registered. Three flavors per type:
//!
//! - `get_*` returns the type's zero value when the variable is absent or
//!   unparseable.
//! - `get_*_or_default` returns the given default in those cases.
//! - `get_*_or_error` reports why: [`Error::NotSet`] when absent, an
//!   EmptyValue error when set to `""`, an InvalidValue error when
//!   unparseable.
//!
//! Values are trimmed before parsing, except by the string accessors.
//! Booleans accept, case-insensitively, `1 t true y yes on` and
//! `0 f false n no off`. Integers and durations use the same grammar as the
//! registry ([`parse_int`], [`parse_duration`]).

use std::env::VarError;
use std::time::Duration;

use crate::error::{Error, Result, ValueError};
use crate::source::{ReadEnv, SystemEnv};
use crate::value::{parse_duration, parse_int};

// ---------------------------------------------------------------------------
// String
// ---------------------------------------------------------------------------

/// Value of `name`, or `""` when absent.
pub fn get_string(name: &str) -> String {
    SystemEnv.var(name).unwrap_or_default()
}

/// Value of `name`, or `default` when absent or empty.
pub fn get_string_or_default(name: &str, default: &str) -> String {
    get_string_or_error(name).unwrap_or_else(|_| default.to_string())
}

pub fn get_string_or_error(name: &str) -> Result<String> {
    string_from(&SystemEnv, name)
}

// ---------------------------------------------------------------------------
// Bool
// ---------------------------------------------------------------------------

pub fn get_bool(name: &str) -> bool {
    get_bool_or_default(name, false)
}

pub fn get_bool_or_default(name: &str, default: bool) -> bool {
    get_bool_or_error(name).unwrap_or(default)
}

pub fn get_bool_or_error(name: &str) -> Result<bool> {
    bool_from(&SystemEnv, name)
}

// ---------------------------------------------------------------------------
// Int
// ---------------------------------------------------------------------------

pub fn get_int(name: &str) -> isize {
    get_int_or_default(name, 0)
}

pub fn get_int_or_default(name: &str, default: isize) -> isize {
    get_int_or_error(name).unwrap_or(default)
}

pub fn get_int_or_error(name: &str) -> Result<isize> {
    int_from(&SystemEnv, name)
}

// ---------------------------------------------------------------------------
// Duration
// ---------------------------------------------------------------------------

pub fn get_duration(name: &str) -> Duration {
    get_duration_or_default(name, Duration::ZERO)
}

pub fn get_duration_or_default(name: &str, default: Duration) -> Duration {
    get_duration_or_error(name).unwrap_or(default)
}

pub fn get_duration_or_error(name: &str) -> Result<Duration> {
    duration_from(&SystemEnv, name)
}

// ---------------------------------------------------------------------------
// Inner functions, generic over the source so tests stay off the process env
// ---------------------------------------------------------------------------

fn string_from<E: ReadEnv>(env: &E, name: &str) -> Result<String> {
    match env.var(name) {
        Ok(raw) if raw.is_empty() => Err(Error::value(name, ValueError::Empty)),
        Ok(raw) => Ok(raw),
        Err(VarError::NotPresent) => Err(Error::NotSet {
            name: name.to_string(),
        }),
        Err(VarError::NotUnicode(_)) => Err(Error::value(name, ValueError::NotUnicode)),
    }
}

fn parsed_from<E, T>(env: &E, name: &str, parse: fn(&str) -> std::result::Result<T, ValueError>) -> Result<T>
where
    E: ReadEnv,
{
    let raw = string_from(env, name)?;
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(Error::value(name, ValueError::Empty));
    }
    parse(trimmed).map_err(|source| Error::value(name, source))
}

fn bool_from<E: ReadEnv>(env: &E, name: &str) -> Result<bool> {
    parsed_from(env, name, parse_loose_bool)
}

fn int_from<E: ReadEnv>(env: &E, name: &str) -> Result<isize> {
    parsed_from(env, name, parse_int)
}

fn duration_from<E: ReadEnv>(env: &E, name: &str) -> Result<Duration> {
    parsed_from(env, name, parse_duration)
}

fn parse_loose_bool(raw: &str) -> std::result::Result<bool, ValueError> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "t" | "true" | "y" | "yes" | "on" => Ok(true),
        "0" | "f" | "false" | "n" | "no" | "off" => Ok(false),
        _ => Err(ValueError::syntax(raw)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::source::InMemoryEnv;

    fn env() -> InMemoryEnv {
        InMemoryEnv::new()
            .with("EMPTY", "")
            .with("BLANK", "   ")
            .with("HOST", " example.com ")
            .with("DEBUG", " Yes ")
            .with("QUIET", "off")
            .with("COLOR", "sometimes")
            .with("WORKERS", "0x10")
            .with("RETRIES", "three")
            .with("TIMEOUT", "1m30s")
            .with("GRACE", "later")
    }

    #[test]
    fn string_accessor_kinds() {
        let env = env();
        assert_eq!(string_from(&env, "HOST").unwrap(), " example.com ");
        assert!(string_from(&env, "MISSING").unwrap_err().is(ErrorKind::NotSet));
        assert!(string_from(&env, "EMPTY").unwrap_err().is(ErrorKind::EmptyValue));
    }

    #[test]
    fn loose_bool_literals() {
        for raw in ["1", "t", "TRUE", "y", "Yes", "ON"] {
            assert_eq!(parse_loose_bool(raw), Ok(true), "{raw}");
        }
        for raw in ["0", "F", "false", "N", "no", "Off"] {
            assert_eq!(parse_loose_bool(raw), Ok(false), "{raw}");
        }
        assert!(parse_loose_bool("sometimes").is_err());
    }

    #[test]
    fn bool_accessor_kinds() {
        let env = env();
        assert_eq!(bool_from(&env, "DEBUG"), Ok(true));
        assert_eq!(bool_from(&env, "QUIET"), Ok(false));
        assert!(bool_from(&env, "COLOR").unwrap_err().is(ErrorKind::InvalidValue));
        assert!(bool_from(&env, "BLANK").unwrap_err().is(ErrorKind::EmptyValue));
        assert!(bool_from(&env, "MISSING").unwrap_err().is(ErrorKind::NotSet));
    }

    #[test]
    fn int_accessor_kinds() {
        let env = env();
        assert_eq!(int_from(&env, "WORKERS"), Ok(16));
        let err = int_from(&env, "RETRIES").unwrap_err();
        assert!(err.is(ErrorKind::InvalidValue));
        assert_eq!(err.name(), "RETRIES");
    }

    #[test]
    fn duration_accessor_kinds() {
        let env = env();
        assert_eq!(duration_from(&env, "TIMEOUT"), Ok(Duration::from_secs(90)));
        assert!(duration_from(&env, "GRACE").unwrap_err().is(ErrorKind::InvalidValue));
        assert!(duration_from(&env, "MISSING").unwrap_err().is(ErrorKind::NotSet));
    }
}
