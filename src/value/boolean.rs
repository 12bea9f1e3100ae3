use super::{Handle, Resolved, Slot, Value};
use crate::error::ValueError;

/// Parse one of the canonical boolean literals.
///
/// True: `1 t T TRUE true True`. False: `0 f F FALSE false False`.
pub fn parse_bool(raw: &str) -> Result<bool, ValueError> {
    match raw {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
        _ => Err(ValueError::syntax(raw)),
    }
}

pub struct BoolValue {
    slot: Slot<bool>,
}

impl BoolValue {
    pub fn new(default: bool) -> (Self, Handle<bool>) {
        let handle = Handle::new(default);
        (Self { slot: handle.slot() }, handle)
    }
}

impl Value for BoolValue {
    fn set(&self, raw: &str) -> Result<(), ValueError> {
        self.slot.store(parse_bool(raw)?);
        Ok(())
    }

    fn get(&self) -> Option<Resolved> {
        self.slot.map(|v| Resolved::Bool(*v))
    }
}
