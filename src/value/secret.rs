use secrecy::{ExposeSecret, SecretString};

use super::{Handle, Resolved, Slot, Value};
use crate::error::ValueError;

/// Like a string variable, but wrapped in [`SecretString`] so it cannot leak
/// through `Debug`, logs, or snapshots.
pub struct SecretValue {
    slot: Slot<SecretString>,
}

impl SecretValue {
    pub fn new(default: impl Into<String>) -> (Self, Handle<SecretString>) {
        let default: String = default.into();
        let handle = Handle::new(SecretString::from(default));
        (Self { slot: handle.slot() }, handle)
    }
}

impl Value for SecretValue {
    fn set(&self, raw: &str) -> Result<(), ValueError> {
        self.slot.store(SecretString::from(raw.to_string()));
        Ok(())
    }

    fn get(&self) -> Option<Resolved> {
        self.slot.map(|_| Resolved::Redacted)
    }

    fn is_empty(&self) -> bool {
        self.slot
            .map(|v| v.expose_secret().is_empty())
            .unwrap_or(false)
    }
}
