//! # getenv-rs
//!
//! Typed environment variables with defaults, resolved in one batch.
//!
//! Register variables up front; each registration returns a [`Handle`]
//! that already holds the default. A single [`parse`] then reads the
//! environment and updates every handle whose variable is set:
//!
//! ```no_run
//! let port = getenv_rs::int("PORT", 8000);
//! let timeout = getenv_rs::duration("TIMEOUT", std::time::Duration::from_secs(5));
//! getenv_rs::parse()?;
//!
//! println!("listening on {} (timeout {:?})", port.get(), timeout.get());
//! # Ok::<(), getenv_rs::Error>(())
//! ```
//!
//! The free functions wrap one process-wide [`Registry`]; construct your own
//! for isolation. The [`lookup`] module offers immediate, unregistered reads.

pub mod error;
pub mod global;
pub mod lookup;
pub mod registry;
pub mod source;
pub mod telemetry;
pub mod value;

pub use error::{Error, ErrorKind, Result, ValueError};
pub use global::{
    bool, duration, float64, int, int64, log_level, parse, reset, secret, snapshot, string,
    string_slice, tcp_addr, var,
};
pub use registry::Registry;
pub use source::{InMemoryEnv, ReadEnv, SystemEnv};
pub use value::{Handle, Resolved, Value};

pub use secrecy::{ExposeSecret, SecretString};
