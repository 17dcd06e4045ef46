//! Per-subject-type rules.
//!
//! A [`Rule`] holds every clause registered for one subject key, indexed by
//! action. The [`NullRule`] stands in for keys with no rule so that lookup
//! never needs an "is there a rule?" branch at the call site:
//!
//! ```text
//! RuleRegistry::lookup_rule(subject) ──► &dyn Authorize
//!                                           ├── Rule      (clauses by action)
//!                                           └── NullRule  (always denies)
//! ```
//!
//! # Action Resolution
//!
//! | Order | Clause consulted | Note |
//! |-------|------------------|------|
//! | 1 | `manage` | Wins over everything else, whenever it was registered |
//! | 2 | requested action (then its aliases, in order) | First match wins |
//! | 3 | none | Deny |

use crate::{Clause, Predicate};
use std::collections::HashMap;
use std::fmt;
use warden_types::{Action, Args, Subject};

/// Uniform decision interface over [`Rule`] and [`NullRule`].
pub trait Authorize: fmt::Debug + Send + Sync {
    /// Resolves the clause governing `actions`.
    ///
    /// `actions` is the requested action followed by the actions it is an
    /// alias of. A clause for [`Action::Manage`] takes precedence over all
    /// of them.
    fn clause_for(&self, actions: &[Action]) -> Option<&Clause>;

    /// Decides a single action.
    ///
    /// `subject` is the instance being checked, `None` for type-level checks.
    fn is_authorized(
        &self,
        action: &Action,
        subject: Option<&dyn Subject>,
        args: &Args<'_>,
    ) -> bool {
        self.clause_for(std::slice::from_ref(action))
            .is_some_and(|clause| clause.evaluate(subject, args))
    }
}

/// Clauses for one subject key.
///
/// Invariant: at most one clause per action. Registering an action again
/// replaces its clause.
#[derive(Debug, Clone, Default)]
pub struct Rule {
    clauses: HashMap<Action, Clause>,
}

impl Rule {
    /// Creates an empty rule.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the clause for `action`; `None` grants unconditionally.
    pub fn add_clause(&mut self, action: Action, predicate: Option<Predicate>) {
        self.set_clause(action, Clause::from(predicate));
    }

    /// Registers `clause` for `action`, returning the clause it replaced.
    pub fn set_clause(&mut self, action: Action, clause: Clause) -> Option<Clause> {
        self.clauses.insert(action, clause)
    }

    /// Returns the clause registered for exactly `action`.
    #[must_use]
    pub fn clause(&self, action: &Action) -> Option<&Clause> {
        self.clauses.get(action)
    }

    /// Iterates over the actions that have a clause.
    pub fn actions(&self) -> impl Iterator<Item = &Action> {
        self.clauses.keys()
    }

    /// Number of registered clauses.
    #[must_use]
    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    /// Returns `true` if no clause is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }
}

impl Authorize for Rule {
    fn clause_for(&self, actions: &[Action]) -> Option<&Clause> {
        if let Some(wildcard) = self.clauses.get(&Action::Manage) {
            return Some(wildcard);
        }
        actions.iter().find_map(|action| self.clauses.get(action))
    }
}

/// The rule of every subject key nothing was registered for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NullRule;

/// Shared [`NullRule`] instance returned by lookups.
pub static NULL_RULE: NullRule = NullRule;

impl Authorize for NullRule {
    fn clause_for(&self, _actions: &[Action]) -> Option<&Clause> {
        None
    }

    fn is_authorized(
        &self,
        _action: &Action,
        _subject: Option<&dyn Subject>,
        _args: &Args<'_>,
    ) -> bool {
        false
    }
}
