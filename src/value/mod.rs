//! Typed value adapters.
//!
//! Each supported type has one adapter implementing [`Value`]. An adapter
//! owns a weak reference to the caller's [`Handle`] and knows how to turn a
//! raw environment string into the handle's type. Adding a type means adding
//! an adapter; the registry never changes.

mod boolean;
mod duration;
mod float;
mod int;
mod log_level;
mod secret;
mod string;
mod string_slice;
mod tcp_addr;

use std::sync::{Arc, Weak};
use std::time::Duration;

use parking_lot::RwLock;
use serde::{Serialize, Serializer};

use crate::error::ValueError;

pub use self::boolean::{BoolValue, parse_bool};
pub use self::duration::{DurationValue, parse_duration};
pub use self::float::{Float64Value, parse_float64};
pub use self::int::{Int64Value, IntValue, parse_int, parse_int64};
pub use self::log_level::LogLevelValue;
pub use self::secret::SecretValue;
pub use self::string::StringValue;
pub use self::string_slice::{StringSliceValue, split_list};
pub use self::tcp_addr::{TcpAddrValue, validate_tcp_address};

/// The capability every adapter provides to the resolution engine.
pub trait Value: Send + Sync {
    /// Parse `raw` and store it. On error the stored value is untouched.
    fn set(&self, raw: &str) -> Result<(), ValueError>;

    /// Read back the stored value. `None` once the caller dropped the handle.
    fn get(&self) -> Option<Resolved>;

    /// Check the stored value after every `set` in a pass succeeded.
    fn validate(&self) -> Result<(), ValueError> {
        Ok(())
    }

    /// Whether the stored value counts as empty. Only strict registries ask.
    fn is_empty(&self) -> bool {
        false
    }
}

// ---------------------------------------------------------------------------
// Handle
// ---------------------------------------------------------------------------

/// Caller-owned output cell.
///
/// Holds the default from the moment it is returned by a registration call.
/// The registry only keeps a weak reference, so dropping every clone of a
/// handle turns later updates for that variable into no-ops.
#[derive(Debug, Default)]
pub struct Handle<T> {
    cell: Arc<RwLock<T>>,
}

impl<T> Handle<T> {
    pub fn new(value: T) -> Self {
        Self {
            cell: Arc::new(RwLock::new(value)),
        }
    }

    /// Borrow the current value.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.cell.read())
    }

    /// Replace the whole value in one write.
    ///
    /// Adapters defined outside this crate keep a clone of the caller's
    /// handle and store through it from [`Value::set`].
    pub fn set(&self, value: T) {
        *self.cell.write() = value;
    }

    pub(crate) fn slot(&self) -> Slot<T> {
        Slot {
            cell: Arc::downgrade(&self.cell),
        }
    }
}

impl<T: Clone> Handle<T> {
    /// Copy out the current value.
    pub fn get(&self) -> T {
        self.cell.read().clone()
    }
}

impl<T> Clone for Handle<T> {
    fn clone(&self) -> Self {
        Self {
            cell: Arc::clone(&self.cell),
        }
    }
}

/// The adapter's side of a [`Handle`].
#[derive(Debug)]
pub(crate) struct Slot<T> {
    cell: Weak<RwLock<T>>,
}

impl<T> Slot<T> {
    /// Replace the whole value in one write.
    pub(crate) fn store(&self, value: T) {
        if let Some(cell) = self.cell.upgrade() {
            *cell.write() = value;
        }
    }

    pub(crate) fn map<R>(&self, f: impl FnOnce(&T) -> R) -> Option<R> {
        self.cell.upgrade().map(|cell| f(&cell.read()))
    }
}

// ---------------------------------------------------------------------------
// Resolved
// ---------------------------------------------------------------------------

/// Read-back of an adapter's current value.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolved {
    Bool(bool),
    Int(isize),
    Int64(i64),
    Float64(f64),
    String(String),
    Duration(Duration),
    StringList(Vec<String>),
    /// A secret; the value itself is never exposed.
    Redacted,
}

impl std::fmt::Display for Resolved {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Resolved::Bool(v) => write!(f, "{v}"),
            Resolved::Int(v) => write!(f, "{v}"),
            Resolved::Int64(v) => write!(f, "{v}"),
            Resolved::Float64(v) => write!(f, "{v}"),
            Resolved::String(v) => write!(f, "{v}"),
            Resolved::Duration(v) => write!(f, "{v:?}"),
            Resolved::StringList(v) => write!(f, "{}", v.join(",")),
            Resolved::Redacted => write!(f, "[REDACTED]"),
        }
    }
}

impl Serialize for Resolved {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Resolved::Bool(v) => serializer.serialize_bool(*v),
            Resolved::Int(v) => serializer.serialize_i64(*v as i64),
            Resolved::Int64(v) => serializer.serialize_i64(*v),
            Resolved::Float64(v) => serializer.serialize_f64(*v),
            Resolved::String(v) => serializer.serialize_str(v),
            Resolved::StringList(v) => v.serialize(serializer),
            Resolved::Duration(_) | Resolved::Redacted => serializer.collect_str(self),
        }
    }
}
