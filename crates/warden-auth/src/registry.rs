//! Subject resolution: from subject key to rule.

use crate::rule::{Authorize, Rule, NULL_RULE};
use std::collections::HashMap;
use warden_types::{SubjectKey, SubjectRef};

/// Rules of one ability, keyed by subject type (or the wildcard).
///
/// Writes and reads are deliberately asymmetric:
///
/// | Path | Method | Missing key |
/// |------|--------|-------------|
/// | Registration | [`rule_for`](Self::rule_for) | Creates an empty rule |
/// | Decision | [`lookup_rule`](Self::lookup_rule) | Returns the [`NullRule`](crate::NullRule) |
///
/// so checking a subject type nobody registered leaves the registry as it
/// was.
#[derive(Debug, Clone, Default)]
pub struct RuleRegistry {
    rules: HashMap<SubjectKey, Rule>,
}

impl RuleRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the rule for `key`, creating an empty one first if needed.
    pub fn rule_for(&mut self, key: SubjectKey) -> &mut Rule {
        self.rules.entry(key).or_default()
    }

    /// Resolves `subject` to its key and returns the rule stored under it.
    ///
    /// Types and the wildcard are used as keys directly; instances are
    /// keyed by their runtime type.
    #[must_use]
    pub fn lookup_rule(&self, subject: &SubjectRef<'_>) -> &dyn Authorize {
        self.lookup_key(&subject.key())
    }

    /// Returns the rule stored under `key`, or the null rule.
    #[must_use]
    pub fn lookup_key(&self, key: &SubjectKey) -> &dyn Authorize {
        match self.rules.get(key) {
            Some(rule) => rule,
            None => &NULL_RULE,
        }
    }

    /// Returns `true` if a rule exists for `key`.
    #[must_use]
    pub fn contains(&self, key: &SubjectKey) -> bool {
        self.rules.contains_key(key)
    }

    /// Iterates over the keys that have a rule.
    pub fn subject_keys(&self) -> impl Iterator<Item = &SubjectKey> {
        self.rules.keys()
    }

    /// Number of subject keys with a rule.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns `true` if nothing has been registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use warden_types::{Action, Args, SubjectKind};

    struct Ticket;

    impl SubjectKind for Ticket {
        const NAME: &'static str = "Ticket";
    }

    struct Board;

    impl SubjectKind for Board {
        const NAME: &'static str = "Board";
    }

    #[test]
    fn rule_for_creates_once_and_reuses() {
        let mut registry = RuleRegistry::new();
        registry
            .rule_for(SubjectKey::of::<Ticket>())
            .add_clause(Action::from("read"), None);
        registry
            .rule_for(SubjectKey::of::<Ticket>())
            .add_clause(Action::from("close"), None);

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.rule_for(SubjectKey::of::<Ticket>()).len(), 2);
    }

    #[test]
    fn lookup_by_type_and_by_instance_agree() {
        let mut registry = RuleRegistry::new();
        registry
            .rule_for(SubjectKey::of::<Ticket>())
            .add_clause(Action::from("read"), None);

        let read = Action::from("read");
        let by_type = registry.lookup_rule(&SubjectRef::of::<Ticket>());
        let by_instance = registry.lookup_rule(&SubjectRef::from(&Ticket));

        assert!(by_type.is_authorized(&read, None, &Args::empty()));
        assert!(by_instance.is_authorized(&read, Some(&Ticket), &Args::empty()));
    }

    #[test]
    fn lookup_of_unknown_key_is_null_and_does_not_insert() {
        let registry = RuleRegistry::new();

        let rule = registry.lookup_rule(&SubjectRef::from(&Board));
        assert!(!rule.is_authorized(&Action::Manage, Some(&Board), &Args::empty()));
        assert!(registry.is_empty());
        assert!(!registry.contains(&SubjectKey::of::<Board>()));
    }

    #[test]
    fn wildcard_subject_is_an_ordinary_key() {
        let mut registry = RuleRegistry::new();
        registry
            .rule_for(SubjectKey::All)
            .add_clause(Action::from("read"), None);

        assert!(registry.contains(&SubjectKey::All));
        assert!(registry
            .lookup_rule(&SubjectRef::all())
            .is_authorized(&Action::from("read"), None, &Args::empty()));
        // Lookup itself does not fall back to the wildcard.
        assert!(!registry
            .lookup_rule(&SubjectRef::of::<Ticket>())
            .is_authorized(&Action::from("read"), None, &Args::empty()));
        assert_eq!(registry.subject_keys().count(), 1);
    }
}
