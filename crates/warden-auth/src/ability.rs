//! The permission set of one principal.
//!
//! An [`Ability`] is built once per principal (typically per request) and
//! then queried at every call site that needs a decision.
//!
//! # Decision Flow
//!
//! ```text
//! is_allowed(action, subject)
//!   │
//!   ├─ allow_everything set? ──────────────────────────────► true
//!   │
//!   ├─ actions = aliases.expand(action)
//!   ├─ rule    = registry.lookup_rule(subject)
//!   │     └─ clause_for(actions)  found? ──► clause.evaluate(instance, args)
//!   │
//!   ├─ subject key is `all`? ──────────────────────────────► false
//!   └─ registry[all].clause_for(actions) found? ───────────► clause.evaluate(instance, args)
//!                                          otherwise ──────► false
//! ```
//!
//! A specific subject type's rule shadows the wildcard subject whenever it
//! holds an applicable clause, even a predicate that then fails.
//!
//! # Threading
//!
//! Registration takes `&mut self`. Once configured, an `Ability<P>` with
//! `P: Sync` can be shared by reference across threads; predicates are
//! `Send + Sync` and run on the querying thread.

use crate::alias::ActionAliases;
use crate::error::AccessDenied;
use crate::registry::RuleRegistry;
use crate::Predicate;
use warden_types::{Action, Args, SubjectKey, SubjectKind, SubjectRef};

/// Declared permissions of a principal.
///
/// `P` is the principal the rules were written for. The ability never
/// inspects it; predicates that need it capture it when they are
/// registered.
///
/// # Example
///
/// ```
/// use warden_auth::Ability;
/// use warden_types::{SubjectKey, SubjectKind};
///
/// struct Project {
///     owner: u64,
/// }
///
/// impl SubjectKind for Project {
///     const NAME: &'static str = "Project";
/// }
///
/// let current_user = 42;
/// let mut ability = Ability::new(current_user);
/// ability
///     .grant("read", SubjectKey::of::<Project>())
///     .grant_if("update", move |project: &Project, _| project.owner == current_user);
///
/// let mine = Project { owner: 42 };
/// let theirs = Project { owner: 7 };
///
/// assert!(ability.is_allowed("read", &theirs));
/// assert!(ability.is_allowed("update", &mine));
/// assert!(ability.is_denied("update", &theirs));
/// assert!(ability.enforce("update", &theirs).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct Ability<P = ()> {
    principal: P,
    allow_anything: bool,
    configured: bool,
    rules: RuleRegistry,
    aliases: ActionAliases,
    denied_message: Option<String>,
}

impl<P> Ability<P> {
    /// Creates an unconfigured ability that denies everything.
    #[must_use]
    pub fn new(principal: P) -> Self {
        Self {
            principal,
            allow_anything: false,
            configured: false,
            rules: RuleRegistry::new(),
            aliases: ActionAliases::new(),
            denied_message: None,
        }
    }

    /// Returns the principal the ability was built for.
    #[must_use]
    pub fn principal(&self) -> &P {
        &self.principal
    }

    /// Adds [`ActionAliases::defaults`].
    #[must_use]
    pub fn with_default_aliases(mut self) -> Self {
        self.aliases.extend(&ActionAliases::defaults());
        tracing::debug!(aliases = self.aliases.len(), "default action aliases enabled");
        self
    }

    /// Sets the message carried by [`AccessDenied`] from [`enforce`](Self::enforce).
    #[must_use]
    pub fn with_denied_message(mut self, message: impl Into<String>) -> Self {
        self.denied_message = Some(message.into());
        self
    }

    /// Makes checks for any of `aliases` also satisfied by clauses for `target`.
    pub fn alias_action<I, A>(&mut self, aliases: I, target: impl Into<Action>) -> &mut Self
    where
        I: IntoIterator<Item = A>,
        A: Into<Action>,
    {
        let target = target.into();
        let aliases: Vec<Action> = aliases.into_iter().map(Into::into).collect();
        tracing::debug!(?aliases, target = %target, "action alias registered");
        self.aliases.alias(aliases, target);
        self
    }

    /// Returns the alias table.
    #[must_use]
    pub fn aliases(&self) -> &ActionAliases {
        &self.aliases
    }

    /// Returns the message used for denials, if one was set.
    #[must_use]
    pub fn denied_message(&self) -> Option<&str> {
        self.denied_message.as_deref()
    }

    /// Grants `action` on `subject` unconditionally.
    pub fn grant(
        &mut self,
        action: impl Into<Action>,
        subject: impl Into<SubjectKey>,
    ) -> &mut Self {
        self.grant_with(action, subject, None)
    }

    /// Grants `action` on instances of `T` for which `predicate` holds.
    ///
    /// The predicate receives the instance, then the caller's [`Args`].
    /// Instances of other types never satisfy it. Type-level checks
    /// (no instance) are granted without calling it.
    pub fn grant_if<T, F>(&mut self, action: impl Into<Action>, predicate: F) -> &mut Self
    where
        T: SubjectKind,
        F: Fn(&T, &Args<'_>) -> bool + Send + Sync + 'static,
    {
        self.grant_with(action, SubjectKey::of::<T>(), Some(Predicate::typed(predicate)))
    }

    /// Registers a clause; `None` grants unconditionally.
    ///
    /// Registering the same action on the same subject again replaces the
    /// previous clause.
    pub fn grant_with(
        &mut self,
        action: impl Into<Action>,
        subject: impl Into<SubjectKey>,
        predicate: Option<Predicate>,
    ) -> &mut Self {
        let action = action.into();
        let subject = subject.into();
        tracing::debug!(
            action = %action,
            subject = %subject,
            conditional = predicate.is_some(),
            "clause registered"
        );
        self.rules.rule_for(subject).add_clause(action, predicate);
        self.configured = true;
        self
    }

    /// Allows every action on every subject from now on.
    pub fn allow_everything(&mut self) -> &mut Self {
        tracing::debug!("allow_everything set");
        self.allow_anything = true;
        self.configured = true;
        self
    }

    /// Returns `true` once [`allow_everything`](Self::allow_everything) was called.
    #[must_use]
    pub fn allows_everything(&self) -> bool {
        self.allow_anything
    }

    /// Returns `true` once anything was granted.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.configured
    }

    /// Returns the registered rules.
    #[must_use]
    pub fn rules(&self) -> &RuleRegistry {
        &self.rules
    }

    /// Decides whether `action` is allowed on `subject`.
    ///
    /// `subject` is an instance (`&article`), a type
    /// (`SubjectRef::of::<Article>()`) or the wildcard (`SubjectRef::all()`).
    #[must_use]
    pub fn is_allowed<'s>(
        &self,
        action: impl Into<Action>,
        subject: impl Into<SubjectRef<'s>>,
    ) -> bool {
        self.decide(&action.into(), &subject.into(), &Args::empty())
    }

    /// [`is_allowed`](Self::is_allowed) with extra predicate arguments.
    #[must_use]
    pub fn is_allowed_with<'s>(
        &self,
        action: impl Into<Action>,
        subject: impl Into<SubjectRef<'s>>,
        args: Args<'_>,
    ) -> bool {
        self.decide(&action.into(), &subject.into(), &args)
    }

    /// Negation of [`is_allowed`](Self::is_allowed).
    #[must_use]
    pub fn is_denied<'s>(
        &self,
        action: impl Into<Action>,
        subject: impl Into<SubjectRef<'s>>,
    ) -> bool {
        !self.is_allowed(action, subject)
    }

    /// Negation of [`is_allowed_with`](Self::is_allowed_with).
    #[must_use]
    pub fn is_denied_with<'s>(
        &self,
        action: impl Into<Action>,
        subject: impl Into<SubjectRef<'s>>,
        args: Args<'_>,
    ) -> bool {
        !self.is_allowed_with(action, subject, args)
    }

    /// Returns `Err(AccessDenied)` when [`is_allowed`](Self::is_allowed) is false.
    ///
    /// # Errors
    ///
    /// [`AccessDenied`] carrying the action, the resolved subject key and
    /// the configured message.
    pub fn enforce<'s>(
        &self,
        action: impl Into<Action>,
        subject: impl Into<SubjectRef<'s>>,
    ) -> Result<(), AccessDenied> {
        self.enforce_with(action, subject, Args::empty())
    }

    /// [`enforce`](Self::enforce) with extra predicate arguments.
    ///
    /// # Errors
    ///
    /// [`AccessDenied`] when the decision is a denial.
    pub fn enforce_with<'s>(
        &self,
        action: impl Into<Action>,
        subject: impl Into<SubjectRef<'s>>,
        args: Args<'_>,
    ) -> Result<(), AccessDenied> {
        let action = action.into();
        let subject = subject.into();
        if self.decide(&action, &subject, &args) {
            return Ok(());
        }

        let key = subject.key();
        tracing::warn!(action = %action, subject = %key, "access denied");
        let denied = AccessDenied::new(action, key);
        Err(match &self.denied_message {
            Some(message) => denied.with_message(message.clone()),
            None => denied,
        })
    }

    fn decide(&self, action: &Action, subject: &SubjectRef<'_>, args: &Args<'_>) -> bool {
        if self.allow_anything {
            tracing::trace!(action = %action, ?subject, "allowed: allow_everything");
            return true;
        }

        let actions = self.aliases.expand(action);
        let key = subject.key();
        let clause = self
            .rules
            .lookup_rule(subject)
            .clause_for(&actions)
            .or_else(|| {
                if key.is_all() {
                    None
                } else {
                    self.rules.lookup_key(&SubjectKey::All).clause_for(&actions)
                }
            });

        let allowed = clause.is_some_and(|clause| clause.evaluate(subject.instance(), args));
        tracing::trace!(
            action = %action,
            subject = %key,
            matched = clause.is_some(),
            allowed,
            "authorization decision"
        );
        allowed
    }
}

impl<P: Default> Default for Ability<P> {
    fn default() -> Self {
        Self::new(P::default())
    }
}
