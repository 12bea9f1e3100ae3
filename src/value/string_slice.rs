use super::{Handle, Resolved, Slot, Value};
use crate::error::ValueError;

/// Split on `,`, trim each segment, drop the empty ones.
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

pub struct StringSliceValue {
    slot: Slot<Vec<String>>,
}

impl StringSliceValue {
    pub fn new<I, S>(default: I) -> (Self, Handle<Vec<String>>)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let handle: Handle<Vec<String>> = Handle::new(default.into_iter().map(Into::into).collect());
        (Self { slot: handle.slot() }, handle)
    }
}

impl Value for StringSliceValue {
    fn set(&self, raw: &str) -> Result<(), ValueError> {
        self.slot.store(split_list(raw));
        Ok(())
    }

    fn get(&self) -> Option<Resolved> {
        self.slot.map(|v| Resolved::StringList(v.clone()))
    }

    fn is_empty(&self) -> bool {
        self.slot.map(Vec::is_empty).unwrap_or(false)
    }
}
