//! Error types for getenv-rs.
//!
//! Adapters report a [`ValueError`] that knows nothing about variable names.
//! The resolution engine wraps it in [`Error::Value`] together with the name
//! of the variable that failed.

use thiserror::Error;

/// Coarse classification of every error the crate produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Variable absent and the accessor required it.
    NotSet,
    /// Variable present but empty where emptiness is not allowed.
    EmptyValue,
    /// Variable present but failed type-specific parsing or validation.
    InvalidValue,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ErrorKind::NotSet => "not set",
            ErrorKind::EmptyValue => "empty value",
            ErrorKind::InvalidValue => "invalid value",
        };
        write!(f, "{s}")
    }
}

/// Failure of a single adapter to accept a raw string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueError {
    #[error("value is empty")]
    Empty,

    #[error("invalid syntax {raw:?}")]
    Syntax { raw: String },

    #[error("value out of range {raw:?}")]
    Range { raw: String },

    #[error("invalid duration {raw:?}: {reason}")]
    Duration { raw: String, reason: String },

    #[error("invalid tcp address {raw:?}: {reason}")]
    Address { raw: String, reason: String },

    #[error("unknown log level {raw:?}")]
    UnknownLevel { raw: String },

    #[error("value is not valid unicode")]
    NotUnicode,
}

impl ValueError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ValueError::Empty => ErrorKind::EmptyValue,
            _ => ErrorKind::InvalidValue,
        }
    }

    pub(crate) fn syntax(raw: &str) -> Self {
        ValueError::Syntax {
            raw: raw.to_string(),
        }
    }

    pub(crate) fn range(raw: &str) -> Self {
        ValueError::Range {
            raw: raw.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("environment variable {name} is not set")]
    NotSet { name: String },

    #[error("environment variable {name}: {source}")]
    Value {
        name: String,
        #[source]
        source: ValueError,
    },
}

impl Error {
    pub(crate) fn value(name: &str, source: ValueError) -> Self {
        Error::Value {
            name: name.to_string(),
            source,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::NotSet { .. } => ErrorKind::NotSet,
            Error::Value { source, .. } => source.kind(),
        }
    }

    /// Is this error of the given kind?
    pub fn is(&self, kind: ErrorKind) -> bool {
        self.kind() == kind
    }

    /// Name of the environment variable that failed.
    pub fn name(&self) -> &str {
        match self {
            Error::NotSet { name } | Error::Value { name, .. } => name,
        }
    }

    /// The adapter-level cause, if any.
    pub fn cause(&self) -> Option<&ValueError> {
        match self {
            Error::NotSet { .. } => None,
            Error::Value { source, .. } => Some(source),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_error_kinds() {
        assert_eq!(ValueError::Empty.kind(), ErrorKind::EmptyValue);
        assert_eq!(ValueError::syntax("x").kind(), ErrorKind::InvalidValue);
        assert_eq!(ValueError::NotUnicode.kind(), ErrorKind::InvalidValue);
    }

    #[test]
    fn wrapped_error_names_the_variable() {
        let err = Error::value("X_FACTOR", ValueError::syntax("abc"));
        assert_eq!(err.name(), "X_FACTOR");
        assert!(err.is(ErrorKind::InvalidValue));
        assert_eq!(
            err.to_string(),
            "environment variable X_FACTOR: invalid syntax \"abc\""
        );
        assert_eq!(err.cause(), Some(&ValueError::syntax("abc")));
    }

    #[test]
    fn not_set_has_no_cause() {
        let err = Error::NotSet {
            name: "PORT".to_string(),
        };
        assert!(err.is(ErrorKind::NotSet));
        assert!(err.cause().is_none());
    }
}
