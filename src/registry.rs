//! The deferred variable set.
//!
//! Variables are registered first, each returning a [`Handle`] that already
//! holds its default. One [`Registry::parse`] call later reads the
//! environment and updates every handle whose variable is set.

use std::collections::{BTreeMap, HashMap};
use std::env::VarError;
use std::time::Duration;

use secrecy::SecretString;
use tracing::{debug, trace, warn};

use crate::error::{Error, Result, ValueError};
use crate::source::{ReadEnv, SystemEnv};
use crate::value::*;

/// Named collection of variables awaiting resolution.
///
/// Resolution order follows the internal map and is unspecified. `parse`
/// stops at the first variable that fails, so when several are invalid any
/// one of them may be the one reported.
#[derive(Default)]
pub struct Registry {
    vars: HashMap<String, Box<dyn Value>>,
    strict: bool,
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("vars", &self.names())
            .field("strict", &self.strict)
            .finish()
    }
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty registry that also rejects a variable whose
    /// environment value and current value are both empty.
    pub fn strict() -> Self {
        Self {
            vars: HashMap::new(),
            strict: true,
        }
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    // -----------------------------------------------------------------------
    // Registration
    // -----------------------------------------------------------------------

    /// Register an adapter under `name`, replacing any previous one.
    pub fn var(&mut self, value: impl Value + 'static, name: impl Into<String>) {
        let name = name.into();
        if self.vars.insert(name.clone(), Box::new(value)).is_some() {
            trace!(name = %name, "replaced registered variable");
        }
    }

    pub fn bool(&mut self, name: impl Into<String>, default: bool) -> Handle<bool> {
        let (value, handle) = BoolValue::new(default);
        self.var(value, name);
        handle
    }

    pub fn int(&mut self, name: impl Into<String>, default: isize) -> Handle<isize> {
        let (value, handle) = IntValue::new(default);
        self.var(value, name);
        handle
    }

    pub fn int64(&mut self, name: impl Into<String>, default: i64) -> Handle<i64> {
        let (value, handle) = Int64Value::new(default);
        self.var(value, name);
        handle
    }

    pub fn float64(&mut self, name: impl Into<String>, default: f64) -> Handle<f64> {
        let (value, handle) = Float64Value::new(default);
        self.var(value, name);
        handle
    }

    pub fn string(&mut self, name: impl Into<String>, default: impl Into<String>) -> Handle<String> {
        let (value, handle) = StringValue::new(default);
        self.var(value, name);
        handle
    }

    pub fn duration(&mut self, name: impl Into<String>, default: Duration) -> Handle<Duration> {
        let (value, handle) = DurationValue::new(default);
        self.var(value, name);
        handle
    }

    /// Register a `host:port` address. The default is validated by `parse`
    /// like any value read from the environment.
    pub fn tcp_addr(
        &mut self,
        name: impl Into<String>,
        default: impl Into<String>,
    ) -> Handle<String> {
        let (value, handle) = TcpAddrValue::new(default);
        self.var(value, name);
        handle
    }

    pub fn string_slice<I, S>(&mut self, name: impl Into<String>, default: I) -> Handle<Vec<String>>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let (value, handle) = StringSliceValue::new(default);
        self.var(value, name);
        handle
    }

    /// Register a level name looked up in `levels`, case-insensitively.
    pub fn log_level<I, K>(
        &mut self,
        name: impl Into<String>,
        levels: I,
        default: isize,
    ) -> Handle<isize>
    where
        I: IntoIterator<Item = (K, isize)>,
        K: AsRef<str>,
    {
        let (value, handle) = LogLevelValue::new(levels, default);
        self.var(value, name);
        handle
    }

    pub fn secret(
        &mut self,
        name: impl Into<String>,
        default: impl Into<String>,
    ) -> Handle<SecretString> {
        let (value, handle) = SecretValue::new(default);
        self.var(value, name);
        handle
    }

    /// Drop every registration. Handles already returned keep their values.
    pub fn reset(&mut self) {
        self.vars.clear();
    }

    // -----------------------------------------------------------------------
    // Resolution
    // -----------------------------------------------------------------------

    /// Resolve every variable against the process environment.
    pub fn parse(&self) -> Result<()> {
        self.parse_from(&SystemEnv)
    }

    /// Resolve every variable against `env`.
    ///
    /// Stops at the first failing variable; its handle keeps its previous
    /// value while handles resolved earlier in the pass keep their new ones.
    /// Treat any error as "configuration unusable".
    pub fn parse_from<E: ReadEnv>(&self, env: &E) -> Result<()> {
        for (name, value) in &self.vars {
            self.resolve(env, name, value.as_ref()).inspect_err(|e| {
                warn!(name = %name, error = %e, "failed to resolve environment variable");
            })?;
        }

        for (name, value) in &self.vars {
            value.validate().map_err(|source| {
                warn!(name = %name, error = %source, "environment variable failed validation");
                Error::value(name, source)
            })?;
        }

        debug!(count = self.vars.len(), "resolved environment variables");
        Ok(())
    }

    fn resolve<E: ReadEnv>(&self, env: &E, name: &str, value: &dyn Value) -> Result<()> {
        let raw = match env.var(name) {
            Ok(raw) => raw,
            Err(VarError::NotPresent) => String::new(),
            Err(VarError::NotUnicode(_)) => return Err(Error::value(name, ValueError::NotUnicode)),
        };

        if raw.is_empty() {
            if self.strict && value.is_empty() {
                return Err(Error::value(name, ValueError::Empty));
            }
            trace!(name, "environment variable empty, keeping current value");
            return Ok(());
        }

        value.set(&raw).map_err(|source| Error::value(name, source))?;
        if let Some(resolved) = value.get() {
            debug!(name, value = %resolved, "resolved environment variable");
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Introspection
    // -----------------------------------------------------------------------

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.vars.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.vars.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Read back one variable's current value.
    pub fn get(&self, name: &str) -> Option<Resolved> {
        self.vars.get(name).and_then(|value| value.get())
    }

    /// Current value of every variable whose handle is still alive.
    pub fn snapshot(&self) -> BTreeMap<String, Resolved> {
        self.vars
            .iter()
            .filter_map(|(name, value)| value.get().map(|v| (name.clone(), v)))
            .collect()
    }
}
