//! Decision failure signals.
//!
//! Decisions themselves are plain booleans. Errors appear only at the two
//! adapters built on top of them:
//!
//! ```text
//! Ability::is_allowed ── bool
//!       │
//!       ├── Ability::enforce ───────────► AccessDenied
//!       └── AuthorizationScope::finish ─► AuthorizationNotPerformed
//! ```
//!
//! # Error Codes
//!
//! | Type | Code | Recoverable |
//! |------|------|-------------|
//! | [`AccessDenied`] | `AUTH_ACCESS_DENIED` | Yes |
//! | [`AuthorizationNotPerformed`] | `AUTH_NOT_PERFORMED` | No |
//!
//! A denial is recoverable: the caller can redirect, ask for elevation or
//! show the message. A missing check is a programming error in the request
//! handler.

use thiserror::Error;
use warden_types::{Action, ErrorCode, SubjectKey};

/// Message shown when a denial carries no message of its own.
pub const DEFAULT_DENIED_MESSAGE: &str = "You are not authorized to access this page.";

/// An enforced check was denied.
///
/// # Example
///
/// ```
/// use warden_auth::{AccessDenied, DEFAULT_DENIED_MESSAGE};
/// use warden_types::{Action, ErrorCode, SubjectKey};
///
/// let err = AccessDenied::new(Action::from("destroy"), SubjectKey::All);
/// assert_eq!(err.to_string(), DEFAULT_DENIED_MESSAGE);
/// assert_eq!(err.code(), "AUTH_ACCESS_DENIED");
///
/// let err = err.with_message("Only admins can delete.");
/// assert_eq!(err.to_string(), "Only admins can delete.");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", display_message(.message))]
pub struct AccessDenied {
    message: Option<String>,
    action: Action,
    subject: SubjectKey,
}

impl AccessDenied {
    /// Creates a denial with the default message.
    #[must_use]
    pub fn new(action: Action, subject: SubjectKey) -> Self {
        Self {
            message: None,
            action,
            subject,
        }
    }

    /// Replaces the message.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// The message to show, falling back to [`DEFAULT_DENIED_MESSAGE`].
    #[must_use]
    pub fn message(&self) -> &str {
        display_message(&self.message)
    }

    /// The message set on this denial, if any.
    #[must_use]
    pub fn custom_message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// The action that was denied.
    #[must_use]
    pub fn action(&self) -> &Action {
        &self.action
    }

    /// The resolved subject key the action was denied on.
    #[must_use]
    pub fn subject(&self) -> &SubjectKey {
        &self.subject
    }
}

fn display_message(message: &Option<String>) -> &str {
    message.as_deref().unwrap_or(DEFAULT_DENIED_MESSAGE)
}

impl ErrorCode for AccessDenied {
    fn code(&self) -> &'static str {
        "AUTH_ACCESS_DENIED"
    }

    fn is_recoverable(&self) -> bool {
        true
    }
}

/// A request scope finished without any authorization check.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("authorization was not performed for '{scope}'")]
pub struct AuthorizationNotPerformed {
    /// Label of the scope that finished unchecked.
    pub scope: String,
}

impl AuthorizationNotPerformed {
    /// Creates the error for the scope labelled `scope`.
    #[must_use]
    pub fn new(scope: impl Into<String>) -> Self {
        Self {
            scope: scope.into(),
        }
    }
}

impl ErrorCode for AuthorizationNotPerformed {
    fn code(&self) -> &'static str {
        "AUTH_NOT_PERFORMED"
    }

    fn is_recoverable(&self) -> bool {
        false
    }
}

/// Any authorization failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// An enforced check was denied.
    #[error(transparent)]
    AccessDenied(#[from] AccessDenied),

    /// No check was made in a scope that required one.
    #[error(transparent)]
    NotPerformed(#[from] AuthorizationNotPerformed),
}

impl ErrorCode for AuthError {
    fn code(&self) -> &'static str {
        match self {
            Self::AccessDenied(err) => err.code(),
            Self::NotPerformed(err) => err.code(),
        }
    }

    fn is_recoverable(&self) -> bool {
        match self {
            Self::AccessDenied(err) => err.is_recoverable(),
            Self::NotPerformed(err) => err.is_recoverable(),
        }
    }
}
