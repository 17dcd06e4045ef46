//! Action aliases.
//!
//! Web applications usually check fine-grained actions (`index`, `show`,
//! `edit`) while rules speak in broader ones (`read`, `update`). An alias
//! lets a clause registered for the broad action answer checks for the
//! fine-grained ones:
//!
//! ```text
//! alias(["index", "show"], "read")
//!
//! check "show"  ──expand──►  ["show", "read"]  ──► first clause found decides
//! ```

use std::collections::HashMap;
use warden_types::Action;

/// Mapping from an action to the actions it stands in for.
///
/// Expansion is transitive and cycle-safe. [`Action::Manage`] is never an
/// alias nor an alias target: it already covers every action.
///
/// # Example
///
/// ```
/// use warden_auth::ActionAliases;
/// use warden_types::Action;
///
/// let aliases = ActionAliases::defaults();
///
/// assert_eq!(
///     aliases.expand(&Action::from("show")),
///     vec![Action::from("show"), Action::from("read")]
/// );
/// assert_eq!(aliases.expand(&Action::from("read")), vec![Action::from("read")]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionAliases {
    targets: HashMap<Action, Vec<Action>>,
}

impl ActionAliases {
    /// Creates an empty alias table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The conventional aliases of a resource-oriented application.
    ///
    /// | Target | Aliases |
    /// |--------|---------|
    /// | `read` | `index`, `show` |
    /// | `create` | `new` |
    /// | `update` | `edit` |
    #[must_use]
    pub fn defaults() -> Self {
        let mut aliases = Self::new();
        aliases.alias(["index", "show"], "read");
        aliases.alias(["new"], "create");
        aliases.alias(["edit"], "update");
        aliases
    }

    /// Makes every action in `aliases` also satisfied by clauses for `target`.
    pub fn alias<I, A>(&mut self, aliases: I, target: impl Into<Action>)
    where
        I: IntoIterator<Item = A>,
        A: Into<Action>,
    {
        let target = target.into();
        if target.is_manage() {
            return;
        }

        for alias in aliases {
            let alias = alias.into();
            if alias.is_manage() || alias == target {
                continue;
            }
            let targets = self.targets.entry(alias).or_default();
            if !targets.contains(&target) {
                targets.push(target.clone());
            }
        }
    }

    /// Returns `action` followed by every action it transitively aliases,
    /// without duplicates.
    #[must_use]
    pub fn expand(&self, action: &Action) -> Vec<Action> {
        let mut expanded = vec![action.clone()];
        let mut next = 0;

        while next < expanded.len() {
            if let Some(targets) = self.targets.get(&expanded[next]) {
                for target in targets {
                    if !expanded.contains(target) {
                        expanded.push(target.clone());
                    }
                }
            }
            next += 1;
        }

        expanded
    }

    /// Merges another table into this one.
    pub fn extend(&mut self, other: &Self) {
        for (alias, targets) in &other.targets {
            for target in targets {
                self.alias([alias.clone()], target.clone());
            }
        }
    }

    /// Number of aliased actions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    /// Returns `true` if no alias is defined.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn actions(names: &[&str]) -> Vec<Action> {
        names.iter().copied().map(Action::from).collect()
    }

    #[test]
    fn empty_table_expands_to_the_action_itself() {
        let aliases = ActionAliases::new();
        assert!(aliases.is_empty());
        assert_eq!(aliases.expand(&Action::from("show")), actions(&["show"]));
    }

    #[test]
    fn defaults() {
        let aliases = ActionAliases::defaults();
        assert_eq!(aliases.len(), 4);
        assert_eq!(
            aliases.expand(&Action::from("index")),
            actions(&["index", "read"])
        );
        assert_eq!(
            aliases.expand(&Action::from("new")),
            actions(&["new", "create"])
        );
        assert_eq!(
            aliases.expand(&Action::from("edit")),
            actions(&["edit", "update"])
        );
    }

    #[test]
    fn expansion_is_transitive() {
        let mut aliases = ActionAliases::new();
        aliases.alias(["preview"], "show");
        aliases.alias(["show"], "read");

        assert_eq!(
            aliases.expand(&Action::from("preview")),
            actions(&["preview", "show", "read"])
        );
    }

    #[test]
    fn cycles_terminate() {
        let mut aliases = ActionAliases::new();
        aliases.alias(["a"], "b");
        aliases.alias(["b"], "a");

        assert_eq!(aliases.expand(&Action::from("a")), actions(&["a", "b"]));
        assert_eq!(aliases.expand(&Action::from("b")), actions(&["b", "a"]));
    }

    #[test]
    fn manage_is_never_aliased() {
        let mut aliases = ActionAliases::new();
        aliases.alias(["manage"], "read");
        aliases.alias(["destroy"], "manage");
        aliases.alias(["read"], "read");

        assert!(aliases.is_empty());
        assert_eq!(aliases.expand(&Action::Manage), vec![Action::Manage]);
    }

    #[test]
    fn duplicate_aliases_are_ignored() {
        let mut aliases = ActionAliases::new();
        aliases.alias(["show"], "read");
        aliases.alias(["show"], "read");
        aliases.extend(&ActionAliases::defaults());

        assert_eq!(
            aliases.expand(&Action::from("show")),
            actions(&["show", "read"])
        );
    }
}
