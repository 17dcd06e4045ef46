//! Per-request enforcement tracking.
//!
//! A request handler that forgets to check permissions fails open. An
//! [`AuthorizationScope`] makes the omission visible: open one per request,
//! route every enforced check through it and call
//! [`finish`](AuthorizationScope::finish) at the end.
//!
//! ```text
//! open ──► authorize(..) ──► ... ──► finish ──► Ok(())
//!   │                                  ▲
//!   ├──► skip_authorization() ─────────┘
//!   └──────────────────────────────────► finish ──► Err(AuthorizationNotPerformed)
//! ```

use crate::ability::Ability;
use crate::error::{AccessDenied, AuthorizationNotPerformed};
use warden_types::{Action, Args, SubjectRef};

/// Tracks whether a request was authorized.
///
/// # Example
///
/// ```
/// use warden_auth::{Ability, AuthorizationScope};
/// use warden_types::SubjectKey;
///
/// let mut ability = Ability::new(());
/// ability.grant("read", SubjectKey::All);
///
/// let mut scope = AuthorizationScope::new(&ability, "GET /reports");
/// assert!(scope.authorize("read", SubjectKey::All).is_ok());
/// assert!(scope.finish().is_ok());
///
/// let scope = AuthorizationScope::new(&ability, "GET /health");
/// assert!(scope.finish().is_err());
/// ```
#[derive(Debug)]
pub struct AuthorizationScope<'a, P = ()> {
    ability: &'a Ability<P>,
    label: String,
    performed: bool,
    skipped: bool,
}

impl<'a, P> AuthorizationScope<'a, P> {
    /// Opens a scope over `ability`; `label` names it in errors and logs.
    #[must_use]
    pub fn new(ability: &'a Ability<P>, label: impl Into<String>) -> Self {
        Self {
            ability,
            label: label.into(),
            performed: false,
            skipped: false,
        }
    }

    /// Enforces a check and marks the scope as authorized.
    ///
    /// The scope counts as authorized even when the check is denied.
    ///
    /// # Errors
    ///
    /// [`AccessDenied`] when the ability denies the action.
    pub fn authorize<'s>(
        &mut self,
        action: impl Into<Action>,
        subject: impl Into<SubjectRef<'s>>,
    ) -> Result<(), AccessDenied> {
        self.authorize_with(action, subject, Args::empty())
    }

    /// [`authorize`](Self::authorize) with extra predicate arguments.
    ///
    /// # Errors
    ///
    /// [`AccessDenied`] when the ability denies the action.
    pub fn authorize_with<'s>(
        &mut self,
        action: impl Into<Action>,
        subject: impl Into<SubjectRef<'s>>,
        args: Args<'_>,
    ) -> Result<(), AccessDenied> {
        self.performed = true;
        self.ability.enforce_with(action, subject, args)
    }

    /// Marks the scope as intentionally unchecked.
    pub fn skip_authorization(&mut self) {
        tracing::debug!(scope = %self.label, "authorization skipped");
        self.skipped = true;
    }

    /// Returns `true` once [`authorize`](Self::authorize) was called.
    #[must_use]
    pub fn is_performed(&self) -> bool {
        self.performed
    }

    /// Returns the scope label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns the ability checks are made against.
    #[must_use]
    pub fn ability(&self) -> &'a Ability<P> {
        self.ability
    }

    /// Closes the scope.
    ///
    /// # Errors
    ///
    /// [`AuthorizationNotPerformed`] when neither a check nor a skip happened.
    pub fn finish(self) -> Result<(), AuthorizationNotPerformed> {
        if self.performed || self.skipped {
            return Ok(());
        }
        tracing::warn!(scope = %self.label, "authorization not performed");
        Err(AuthorizationNotPerformed::new(self.label))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use warden_types::{SubjectKey, SubjectKind};

    struct Invoice;

    impl SubjectKind for Invoice {
        const NAME: &'static str = "Invoice";
    }

    fn ability() -> Ability {
        let mut ability = Ability::new(());
        ability.grant("read", SubjectKey::of::<Invoice>());
        ability
    }

    #[test]
    fn unchecked_scope_fails() {
        let ability = ability();
        let scope = AuthorizationScope::new(&ability, "GET /invoices");

        let err = scope.finish().expect_err("no check made");
        assert_eq!(err.scope, "GET /invoices");
    }

    #[test]
    fn allowed_check_marks_performed() {
        let ability = ability();
        let mut scope = AuthorizationScope::new(&ability, "GET /invoices/1");

        assert!(!scope.is_performed());
        assert!(scope.authorize("read", &Invoice).is_ok());
        assert!(scope.is_performed());
        assert!(scope.finish().is_ok());
    }

    #[test]
    fn denied_check_still_marks_performed() {
        let ability = ability();
        let mut scope = AuthorizationScope::new(&ability, "DELETE /invoices/1");

        assert!(scope.authorize("destroy", &Invoice).is_err());
        assert!(scope.finish().is_ok());
    }

    #[test]
    fn skip_satisfies_finish() {
        let ability = ability();
        let mut scope = AuthorizationScope::new(&ability, "GET /health");
        scope.skip_authorization();

        assert!(!scope.is_performed());
        assert!(scope.finish().is_ok());
    }

    #[test]
    fn queries_do_not_mark_performed() {
        let ability = ability();
        let scope = AuthorizationScope::new(&ability, "GET /invoices");

        assert!(scope.ability().is_allowed("read", &Invoice));
        assert_eq!(scope.label(), "GET /invoices");
        assert!(scope.finish().is_err());
    }
}
