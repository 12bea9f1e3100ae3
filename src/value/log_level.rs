use std::collections::HashMap;

use super::{Handle, Resolved, Slot, Value};
use crate::error::ValueError;

/// Maps a level name to its rank. Lookups ignore case and surrounding
/// whitespace in the raw value.
pub struct LogLevelValue {
    slot: Slot<isize>,
    levels: HashMap<String, isize>,
}

impl LogLevelValue {
    pub fn new<I, K>(levels: I, default: isize) -> (Self, Handle<isize>)
    where
        I: IntoIterator<Item = (K, isize)>,
        K: AsRef<str>,
    {
        let levels = levels
            .into_iter()
            .map(|(name, rank)| (name.as_ref().to_uppercase(), rank))
            .collect();
        let handle = Handle::new(default);
        (
            Self {
                slot: handle.slot(),
                levels,
            },
            handle,
        )
    }
}

impl Value for LogLevelValue {
    fn set(&self, raw: &str) -> Result<(), ValueError> {
        let key = raw.trim().to_uppercase();
        let rank = self
            .levels
            .get(&key)
            .ok_or_else(|| ValueError::UnknownLevel {
                raw: raw.to_string(),
            })?;
        self.slot.store(*rank);
        Ok(())
    }

    fn get(&self) -> Option<Resolved> {
        self.slot.map(|v| Resolved::Int(*v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn levels() -> [(&'static str, isize); 3] {
        [("DEBUG", 0), ("info", 1), ("Error", 3)]
    }

    #[test]
    fn lookup_ignores_case_on_both_sides() {
        let (value, handle) = LogLevelValue::new(levels(), 1);
        value.set("error").unwrap();
        assert_eq!(handle.get(), 3);

        value.set(" INFO ").unwrap();
        assert_eq!(handle.get(), 1);

        value.set("Debug").unwrap();
        assert_eq!(value.get(), Some(Resolved::Int(0)));
    }

    #[test]
    fn unknown_level_names_the_raw_value() {
        let (value, handle) = LogLevelValue::new(levels(), 1);
        let err = value.set("UNKNOWN").unwrap_err();
        assert_eq!(
            err,
            ValueError::UnknownLevel {
                raw: "UNKNOWN".to_string()
            }
        );
        assert!(err.to_string().contains("\"UNKNOWN\""));
        assert_eq!(handle.get(), 1);
    }
}
