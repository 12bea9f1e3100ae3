use super::{Handle, Resolved, Slot, Value};
use crate::error::ValueError;

/// Accepts any raw string verbatim.
pub struct StringValue {
    slot: Slot<String>,
}

impl StringValue {
    pub fn new(default: impl Into<String>) -> (Self, Handle<String>) {
        let handle: Handle<String> = Handle::new(default.into());
        (Self { slot: handle.slot() }, handle)
    }
}

impl Value for StringValue {
    fn set(&self, raw: &str) -> Result<(), ValueError> {
        self.slot.store(raw.to_string());
        Ok(())
    }

    fn get(&self) -> Option<Resolved> {
        self.slot.map(|v| Resolved::String(v.clone()))
    }

    fn is_empty(&self) -> bool {
        self.slot.map(String::is_empty).unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stores_verbatim() {
        let (value, handle) = StringValue::new("text/plain");
        assert!(!value.is_empty());

        value.set("  application/json ").unwrap();
        assert_eq!(handle.get(), "  application/json ");
    }

    #[test]
    fn empty_default_is_empty() {
        let (value, _handle) = StringValue::new("");
        assert!(value.is_empty());
    }
}
