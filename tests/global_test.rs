//! Process-wide registry against the real process environment.
//!
//! Every test touches shared state (the global registry and `std::env`),
//! so all of them run serially and reset the registry when done.

use std::time::Duration;

use getenv_rs::{ErrorKind, ExposeSecret};
use serial_test::serial;

fn set(name: &str, value: &str) {
    unsafe { std::env::set_var(name, value) }
}

fn unset(name: &str) {
    unsafe { std::env::remove_var(name) }
}

#[test]
#[serial]
fn bool_literals_resolve() {
    let cases = [
        ("TEST_BOOL_1", "T", true),
        ("TEST_BOOL_2", "true", true),
        ("TEST_BOOL_3", "t", true),
        ("TEST_BOOL_4", "1", true),
        ("TEST_BOOL_5", "TRUE", true),
        ("TEST_BOOL_6", "False", false),
        ("TEST_BOOL_7", "0", false),
    ];

    for (name, raw, expected) in cases {
        set(name, raw);
        let val = getenv_rs::bool(name, !expected);
        getenv_rs::parse().unwrap();
        assert_eq!(val.get(), expected, "{name}={raw}");
        getenv_rs::reset();
        unset(name);
    }
}

#[test]
#[serial]
fn invalid_bool_is_an_error() {
    set("TEST_BOOL_INVALID", "invalid");
    let val = getenv_rs::bool("TEST_BOOL_INVALID", false);

    let err = getenv_rs::parse().unwrap_err();
    assert!(err.is(ErrorKind::InvalidValue));
    assert_eq!(err.name(), "TEST_BOOL_INVALID");
    assert!(!val.get());

    getenv_rs::reset();
    unset("TEST_BOOL_INVALID");
}

#[test]
#[serial]
fn unset_variables_keep_defaults() {
    unset("TEST_BOOL_NON_EXISTING");
    unset("TEST_INT_NON_EXISTING");
    unset("TEST_STRING_NON_EXISTING");

    let color = getenv_rs::bool("TEST_BOOL_NON_EXISTING", true);
    let port = getenv_rs::int("TEST_INT_NON_EXISTING", 999);
    let header = getenv_rs::string("TEST_STRING_NON_EXISTING", "X-Foo");

    getenv_rs::parse().unwrap();
    assert!(color.get());
    assert_eq!(port.get(), 999);
    assert_eq!(header.get(), "X-Foo");

    getenv_rs::reset();
}

#[test]
#[serial]
fn numeric_variables_resolve() {
    set("TEST_INT_1", "8000");
    set("TEST_INT64_1", "-123456789012");
    set("TEST_FLOAT64_1", "-1");

    let port = getenv_rs::int("TEST_INT_1", 4000);
    let long = getenv_rs::int64("TEST_INT64_1", 1);
    let factor = getenv_rs::float64("TEST_FLOAT64_1", 0.0);

    getenv_rs::parse().unwrap();
    assert_eq!(port.get(), 8000);
    assert_eq!(long.get(), -123_456_789_012);
    assert_eq!(factor.get(), -1.0);

    getenv_rs::reset();
    for name in ["TEST_INT_1", "TEST_INT64_1", "TEST_FLOAT64_1"] {
        unset(name);
    }
}

#[test]
#[serial]
fn numeric_errors_carry_their_cause() {
    let cases = [
        ("TEST_INT64_2", "abc", false),
        ("TEST_INT64_3", "9223372036854775808123", true),
    ];
    for (name, raw, is_range) in cases {
        set(name, raw);
        let val = getenv_rs::int64(name, 0);

        let err = getenv_rs::parse().unwrap_err();
        assert!(err.is(ErrorKind::InvalidValue));
        assert_eq!(
            matches!(err.cause(), Some(getenv_rs::ValueError::Range { .. })),
            is_range,
            "{name}={raw}"
        );
        assert_eq!(val.get(), 0);

        getenv_rs::reset();
        unset(name);
    }

    set("TEST_FLOAT64_3", "1e500");
    getenv_rs::float64("TEST_FLOAT64_3", 0.0);
    let err = getenv_rs::parse().unwrap_err();
    assert!(matches!(err.cause(), Some(getenv_rs::ValueError::Range { .. })));
    getenv_rs::reset();
    unset("TEST_FLOAT64_3");
}

#[test]
#[serial]
fn remaining_types_resolve() {
    set("TEST_DURATION", "2h45m");
    set("TEST_LISTEN", "127.0.0.1:4000");
    set("TEST_HOSTS", "a, b ,");
    set("TEST_LEVEL", " warn ");
    set("TEST_TOKEN", "sk-test-key");

    let timeout = getenv_rs::duration("TEST_DURATION", Duration::from_secs(5));
    let listen = getenv_rs::tcp_addr("TEST_LISTEN", ":8000");
    let hosts = getenv_rs::string_slice("TEST_HOSTS", ["x"]);
    let level = getenv_rs::log_level("TEST_LEVEL", [("INFO", 1), ("WARN", 2)], 1);
    let token = getenv_rs::secret("TEST_TOKEN", "");

    getenv_rs::parse().unwrap();
    assert_eq!(timeout.get(), Duration::from_secs(2 * 3600 + 45 * 60));
    assert_eq!(listen.get(), "127.0.0.1:4000");
    assert_eq!(hosts.get(), vec!["a", "b"]);
    assert_eq!(level.get(), 2);
    assert_eq!(token.with(|t| t.expose_secret().to_string()), "sk-test-key");

    let snapshot = getenv_rs::snapshot();
    assert_eq!(snapshot["TEST_TOKEN"].to_string(), "[REDACTED]");

    getenv_rs::reset();
    for name in ["TEST_DURATION", "TEST_LISTEN", "TEST_HOSTS", "TEST_LEVEL", "TEST_TOKEN"] {
        unset(name);
    }
}

#[test]
#[serial]
fn reset_then_parse_ignores_environment() {
    set("TEST_RESET_PORT", "not-a-port");
    let port = getenv_rs::int("TEST_RESET_PORT", 8000);
    assert!(getenv_rs::parse().is_err());

    getenv_rs::reset();
    getenv_rs::parse().unwrap();
    assert_eq!(port.get(), 8000);
    assert!(getenv_rs::snapshot().is_empty());

    unset("TEST_RESET_PORT");
}
