//! Action keys.

use crate::name::{self, NameError};
use crate::TryNew;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Reserved token for the wildcard action.
pub const MANAGE: &str = "manage";

/// The action a principal wants to perform.
///
/// Actions are application-defined names (`"read"`, `"update"`,
/// `"publish"`), plus the reserved wildcard [`Action::Manage`] which
/// matches every action on a subject type.
///
/// Converting the string `"manage"` always produces [`Action::Manage`], so
/// code, configuration and serialized forms agree on the wildcard.
///
/// `From<&str>` is the unchecked path for names written in code. Owned
/// strings go through [`Action::named`], or through [`TryNew`] (also used
/// by deserialization) when the name comes from outside.
///
/// # Example
///
/// ```
/// use warden_types::Action;
///
/// assert_eq!(Action::from("manage"), Action::Manage);
/// assert_eq!(Action::from("read").as_str(), "read");
/// assert!(!Action::from("read").is_manage());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Action {
    /// Any action.
    Manage,
    /// A specific, application-defined action.
    Named(String),
}

impl Action {
    /// Creates an action from a name, mapping `"manage"` to the wildcard.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        let name = name.into();
        if name == MANAGE {
            Self::Manage
        } else {
            Self::Named(name)
        }
    }

    /// Returns `true` for the wildcard action.
    #[must_use]
    pub fn is_manage(&self) -> bool {
        matches!(self, Self::Manage)
    }

    /// Returns the textual form of the action.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Manage => MANAGE,
            Self::Named(name) => name,
        }
    }
}

impl TryNew for Action {
    type Error = NameError;
    type Args = String;

    /// Validates an action name from an untrusted source.
    fn try_new(name: String) -> Result<Self, Self::Error> {
        name::validate("action", &name)?;
        Ok(Self::named(name))
    }
}

impl From<&str> for Action {
    fn from(name: &str) -> Self {
        Self::named(name)
    }
}

impl From<&Action> for Action {
    fn from(action: &Action) -> Self {
        action.clone()
    }
}

impl TryFrom<String> for Action {
    type Error = NameError;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        Self::try_new(name)
    }
}

impl From<Action> for String {
    fn from(action: Action) -> Self {
        match action {
            Action::Manage => MANAGE.to_string(),
            Action::Named(name) => name,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
