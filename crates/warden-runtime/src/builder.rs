//! Ability construction from configuration.

use crate::config::{ConfigError, ConfigLoader, WardenConfig};
use warden_auth::Ability;
use warden_types::{Action, SubjectKey, TryNew};

/// Builds an [`Ability`] from a [`WardenConfig`].
///
/// Every name in the config is validated; the first invalid entry aborts
/// the build. Conditional grants are added in code afterwards.
///
/// # Example
///
/// ```
/// use warden_runtime::config::{GrantConfig, WardenConfig};
/// use warden_runtime::AbilityBuilder;
/// use warden_types::{SubjectKind, SubjectRef};
///
/// struct Article;
///
/// impl SubjectKind for Article {
///     const NAME: &'static str = "Article";
/// }
///
/// let mut config = WardenConfig::default();
/// config.default_aliases = true;
/// config.grants.push(GrantConfig::new("read", "Article"));
///
/// let ability = AbilityBuilder::new("guest").config(&config).build()?;
/// assert!(ability.is_allowed("show", &Article));
/// assert!(ability.is_denied("update", SubjectRef::of::<Article>()));
/// # Ok::<(), warden_runtime::config::ConfigError>(())
/// ```
#[derive(Debug, Clone)]
pub struct AbilityBuilder<P> {
    principal: P,
    config: WardenConfig,
}

impl<P> AbilityBuilder<P> {
    /// Starts a builder for `principal` with the default config.
    #[must_use]
    pub fn new(principal: P) -> Self {
        Self {
            principal,
            config: WardenConfig::default(),
        }
    }

    /// Uses `config`, replacing any config set before.
    #[must_use]
    pub fn config(mut self, config: &WardenConfig) -> Self {
        self.config = config.clone();
        self
    }

    /// Loads the config through `loader`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when loading fails.
    pub fn load(mut self, loader: &ConfigLoader) -> Result<Self, ConfigError> {
        self.config = loader.load()?;
        Ok(self)
    }

    /// Builds the ability.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidName`] for an invalid action or
    /// subject name, and [`ConfigError::InvalidAlias`] for an alias
    /// involving `manage`.
    pub fn build(self) -> Result<Ability<P>, ConfigError> {
        let Self { principal, config } = self;

        let mut ability = Ability::new(principal);
        if config.default_aliases {
            ability = ability.with_default_aliases();
        }
        if let Some(message) = config.denied_message {
            ability = ability.with_denied_message(message);
        }

        for (target, aliases) in &config.aliases {
            let target_action = parse_action(target, || format!("aliases.{target}"))?;
            if target_action.is_manage() {
                return Err(ConfigError::invalid_alias(
                    target,
                    "the wildcard action cannot be an alias target",
                ));
            }

            let mut actions = Vec::with_capacity(aliases.len());
            for (index, alias) in aliases.iter().enumerate() {
                let action = parse_action(alias, || format!("aliases.{target}[{index}]"))?;
                if action.is_manage() {
                    return Err(ConfigError::invalid_alias(
                        target,
                        "the wildcard action cannot be aliased",
                    ));
                }
                actions.push(action);
            }
            ability.alias_action(actions, target_action);
        }

        for (index, grant) in config.grants.iter().enumerate() {
            let action = parse_action(&grant.action, || format!("grants[{index}].action"))?;
            let subject = SubjectKey::try_new(grant.subject.clone())
                .map_err(|e| ConfigError::invalid_name(format!("grants[{index}].subject"), e))?;
            ability.grant(action, subject);
        }

        tracing::debug!(
            grants = config.grants.len(),
            aliases = ability.aliases().len(),
            "ability built from config"
        );
        Ok(ability)
    }
}

fn parse_action(name: &str, field: impl FnOnce() -> String) -> Result<Action, ConfigError> {
    Action::try_new(name.to_string()).map_err(|e| ConfigError::invalid_name(field(), e))
}
