//! Configuration types.
//!
//! All types implement [`Default`] for compile-time fallback values. Names
//! are kept as plain strings here and validated when an ability is built,
//! so errors can point at the offending entry.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Main configuration structure.
///
/// This is the unified configuration after merging all layers.
///
/// # Example
///
/// ```
/// use warden_runtime::config::WardenConfig;
///
/// let config = WardenConfig::from_toml(
///     r#"
/// default_aliases = true
///
/// [[grants]]
/// action = "read"
/// subject = "all"
/// "#,
/// )
/// .expect("valid config");
///
/// assert!(config.default_aliases);
/// assert_eq!(config.grants.len(), 1);
/// assert_eq!(config.denied_message, None);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct WardenConfig {
    /// Message carried by access denials. `None` uses the built-in default.
    pub denied_message: Option<String>,

    /// Enable the conventional `read`/`create`/`update` aliases.
    pub default_aliases: bool,

    /// Extra aliases, keyed by target action.
    pub aliases: BTreeMap<String, Vec<String>>,

    /// Unconditional grants applied to every ability built from this config.
    pub grants: Vec<GrantConfig>,
}

impl WardenConfig {
    /// Creates a new config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Serializes to TOML string.
    ///
    /// # Errors
    ///
    /// Returns error if serialization fails.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Deserializes from TOML string.
    ///
    /// # Errors
    ///
    /// Returns error if deserialization fails.
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }

    /// Merges another config into this one.
    ///
    /// | Field | Rule |
    /// |-------|------|
    /// | `denied_message` | Overridden when `other` sets one |
    /// | `default_aliases` | Overridden when `other` differs from the default |
    /// | `aliases` | Merged per target, duplicates dropped |
    /// | `grants` | Appended |
    pub fn merge(&mut self, other: &Self) {
        let default = Self::default();

        if other.denied_message.is_some() {
            self.denied_message.clone_from(&other.denied_message);
        }
        if other.default_aliases != default.default_aliases {
            self.default_aliases = other.default_aliases;
        }

        for (target, aliases) in &other.aliases {
            let merged = self.aliases.entry(target.clone()).or_default();
            for alias in aliases {
                if !merged.contains(alias) {
                    merged.push(alias.clone());
                }
            }
        }

        self.grants.extend(other.grants.iter().cloned());
    }
}

/// One unconditional grant.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GrantConfig {
    /// Action name, or `"manage"` for every action.
    pub action: String,

    /// Subject type name, or `"all"` for every subject type.
    pub subject: String,
}

impl GrantConfig {
    /// Creates a grant entry.
    #[must_use]
    pub fn new(action: impl Into<String>, subject: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            subject: subject.into(),
        }
    }
}
