//! Validation of externally supplied key names.

use crate::ErrorCode;
use thiserror::Error;

/// A subject type or action name failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NameError {
    /// The name is empty.
    #[error("{kind} name must not be empty")]
    Empty {
        /// `"action"` or `"subject type"`.
        kind: &'static str,
    },

    /// The name contains whitespace.
    #[error("{kind} name '{name}' must not contain whitespace")]
    Whitespace {
        /// `"action"` or `"subject type"`.
        kind: &'static str,
        /// The rejected name.
        name: String,
    },

    /// The name is the wildcard token and cannot name a concrete type.
    #[error("'{0}' is reserved for the wildcard subject")]
    Reserved(String),
}

impl ErrorCode for NameError {
    fn code(&self) -> &'static str {
        match self {
            Self::Empty { .. } => "NAME_EMPTY",
            Self::Whitespace { .. } => "NAME_WHITESPACE",
            Self::Reserved(_) => "NAME_RESERVED",
        }
    }

    fn is_recoverable(&self) -> bool {
        false
    }
}

pub(crate) fn validate(kind: &'static str, name: &str) -> Result<(), NameError> {
    if name.is_empty() {
        return Err(NameError::Empty { kind });
    }
    if name.chars().any(char::is_whitespace) {
        return Err(NameError::Whitespace {
            kind,
            name: name.to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert_error_codes;

    #[test]
    fn accepts_plain_names() {
        assert!(validate("action", "read").is_ok());
        assert!(validate("subject type", "blog::Article").is_ok());
    }

    #[test]
    fn rejects_empty_and_whitespace() {
        assert_eq!(
            validate("action", ""),
            Err(NameError::Empty { kind: "action" })
        );

        let err = validate("action", "read all").unwrap_err();
        assert!(err.to_string().contains("read all"), "got: {err}");
    }

    #[test]
    fn error_codes() {
        assert_error_codes(
            &[
                NameError::Empty { kind: "action" },
                NameError::Whitespace {
                    kind: "action",
                    name: "a b".into(),
                },
                NameError::Reserved("all".into()),
            ],
            "NAME_",
        );
    }
}
