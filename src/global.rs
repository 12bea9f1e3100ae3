//! Process-wide registry.
//!
//! Thin wrappers over one lazily created [`Registry`], for applications that
//! want `getenv_rs::int("PORT", 8000)` without threading a registry around.
//!
//! Each call takes the registry's lock for its own duration only. Nothing
//! coordinates a sequence of calls: another thread may `reset` between your
//! registrations and your `parse`, and the process environment itself can
//! change underneath. Register and parse from one thread at startup, or use
//! a dedicated [`Registry`] when isolation matters (tests in particular).

use std::collections::BTreeMap;
use std::sync::LazyLock;
use std::time::Duration;

use parking_lot::Mutex;
use secrecy::SecretString;

use crate::error::Result;
use crate::registry::Registry;
use crate::value::{Handle, Resolved, Value};

static REGISTRY: LazyLock<Mutex<Registry>> = LazyLock::new(|| Mutex::new(Registry::new()));

pub fn var(value: impl Value + 'static, name: impl Into<String>) {
    REGISTRY.lock().var(value, name)
}

pub fn bool(name: impl Into<String>, default: bool) -> Handle<bool> {
    REGISTRY.lock().bool(name, default)
}

pub fn int(name: impl Into<String>, default: isize) -> Handle<isize> {
    REGISTRY.lock().int(name, default)
}

pub fn int64(name: impl Into<String>, default: i64) -> Handle<i64> {
    REGISTRY.lock().int64(name, default)
}

pub fn float64(name: impl Into<String>, default: f64) -> Handle<f64> {
    REGISTRY.lock().float64(name, default)
}

pub fn string(name: impl Into<String>, default: impl Into<String>) -> Handle<String> {
    REGISTRY.lock().string(name, default)
}

pub fn duration(name: impl Into<String>, default: Duration) -> Handle<Duration> {
    REGISTRY.lock().duration(name, default)
}

pub fn tcp_addr(name: impl Into<String>, default: impl Into<String>) -> Handle<String> {
    REGISTRY.lock().tcp_addr(name, default)
}

pub fn string_slice<I, S>(name: impl Into<String>, default: I) -> Handle<Vec<String>>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    REGISTRY.lock().string_slice(name, default)
}

pub fn log_level<I, K>(name: impl Into<String>, levels: I, default: isize) -> Handle<isize>
where
    I: IntoIterator<Item = (K, isize)>,
    K: AsRef<str>,
{
    REGISTRY.lock().log_level(name, levels, default)
}

pub fn secret(name: impl Into<String>, default: impl Into<String>) -> Handle<SecretString> {
    REGISTRY.lock().secret(name, default)
}

/// Resolve the process-wide registry against the process environment.
pub fn parse() -> Result<()> {
    REGISTRY.lock().parse()
}

/// Clear the process-wide registry.
pub fn reset() {
    REGISTRY.lock().reset()
}

pub fn snapshot() -> BTreeMap<String, Resolved> {
    REGISTRY.lock().snapshot()
}
