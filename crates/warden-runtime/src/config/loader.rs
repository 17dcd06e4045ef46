//! Configuration loader with hierarchical merging.
//!
//! # Load Order
//!
//! 1. Default values (compile-time)
//! 2. Global config (`~/.warden/config.toml`)
//! 3. Project config (`<project>/.warden/config.toml`)
//! 4. Environment variables (`WARDEN_*`)
//!
//! Each layer overrides the previous.

use super::{
    default_config_path, ConfigError, WardenConfig, PROJECT_CONFIG_DIR, PROJECT_CONFIG_FILE,
};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Helper macro for parsing boolean environment variables.
macro_rules! parse_env_bool {
    ($field:expr, $var:expr) => {
        if let Ok(val) = std::env::var($var) {
            $field = parse_bool(&val)
                .ok_or_else(|| ConfigError::invalid_env_var($var, "expected bool"))?;
        }
    };
}

/// Environment variable overriding [`WardenConfig::denied_message`].
pub const ENV_DENIED_MESSAGE: &str = "WARDEN_DENIED_MESSAGE";

/// Environment variable overriding [`WardenConfig::default_aliases`].
pub const ENV_DEFAULT_ALIASES: &str = "WARDEN_DEFAULT_ALIASES";

/// Configuration loader with builder pattern.
///
/// # Example
///
/// ```no_run
/// use warden_runtime::config::ConfigLoader;
///
/// let config = ConfigLoader::new()
///     .with_project_root("/path/to/project")
///     .skip_env_vars()
///     .load()?;
/// # Ok::<(), warden_runtime::config::ConfigError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    /// Global config file path (defaults to ~/.warden/config.toml).
    global_config_path: Option<PathBuf>,

    /// Project root directory.
    project_root: Option<PathBuf>,

    /// Skip environment variable loading.
    skip_env: bool,

    /// Skip global config loading.
    skip_global: bool,

    /// Skip project config loading.
    skip_project: bool,
}

impl ConfigLoader {
    /// Creates a new loader with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a custom global config path.
    #[must_use]
    pub fn with_global_config(mut self, path: impl Into<PathBuf>) -> Self {
        self.global_config_path = Some(path.into());
        self
    }

    /// Sets the project root directory.
    ///
    /// Project config will be loaded from `<project_root>/.warden/config.toml`.
    #[must_use]
    pub fn with_project_root(mut self, path: impl Into<PathBuf>) -> Self {
        self.project_root = Some(path.into());
        self
    }

    /// Skips environment variable loading.
    ///
    /// Useful for testing with deterministic config.
    #[must_use]
    pub fn skip_env_vars(mut self) -> Self {
        self.skip_env = true;
        self
    }

    /// Skips global config loading.
    #[must_use]
    pub fn skip_global_config(mut self) -> Self {
        self.skip_global = true;
        self
    }

    /// Skips project config loading.
    #[must_use]
    pub fn skip_project_config(mut self) -> Self {
        self.skip_project = true;
        self
    }

    /// Loads and merges configuration from all sources.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if any config file exists but cannot be parsed,
    /// or an environment variable holds an invalid value.
    /// Missing config files are silently ignored.
    pub fn load(&self) -> Result<WardenConfig, ConfigError> {
        let mut config = WardenConfig::default();

        // Layer 1: Global config
        if !self.skip_global {
            let global_path = self
                .global_config_path
                .clone()
                .unwrap_or_else(default_config_path);

            if let Some(global_config) = Self::load_file(&global_path)? {
                debug!(
                    path = %global_path.display(),
                    grants = global_config.grants.len(),
                    "Loaded global config"
                );
                config.merge(&global_config);
            }
        }

        // Layer 2: Project config
        if !self.skip_project {
            if let Some(ref project_root) = self.project_root {
                let project_config_path = project_root
                    .join(PROJECT_CONFIG_DIR)
                    .join(PROJECT_CONFIG_FILE);

                if let Some(project_config) = Self::load_file(&project_config_path)? {
                    debug!(
                        path = %project_config_path.display(),
                        project = %project_root.display(),
                        grants = project_config.grants.len(),
                        "Loaded project config"
                    );
                    config.merge(&project_config);
                }
            }
        }

        // Layer 3: Environment variables
        if !self.skip_env {
            Self::apply_env_vars(&mut config)?;
        }

        Ok(config)
    }

    /// Loads a config file, returning None if it doesn't exist.
    fn load_file(path: &Path) -> Result<Option<WardenConfig>, ConfigError> {
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;

        let config =
            WardenConfig::from_toml(&content).map_err(|e| ConfigError::parse_toml(path, e))?;

        Ok(Some(config))
    }

    /// Applies environment variable overrides.
    fn apply_env_vars(config: &mut WardenConfig) -> Result<(), ConfigError> {
        parse_env_bool!(config.default_aliases, ENV_DEFAULT_ALIASES);

        if let Ok(val) = std::env::var(ENV_DENIED_MESSAGE) {
            debug!(var = ENV_DENIED_MESSAGE, "denied message overridden from env");
            config.denied_message = Some(val);
        }

        Ok(())
    }
}

/// Parses a boolean from string.
///
/// Accepts: "true", "false", "1", "0", "yes", "no", "on", "off" (case-insensitive).
fn parse_bool(s: &str) -> Option<bool> {
    match s.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GrantConfig;
    use tempfile::TempDir;

    fn create_config_file(dir: &Path, content: &str) -> PathBuf {
        let path = dir.join(PROJECT_CONFIG_FILE);
        std::fs::write(&path, content).expect("should write config file");
        path
    }

    #[test]
    fn load_defaults_only() {
        let config = ConfigLoader::new()
            .skip_global_config()
            .skip_project_config()
            .skip_env_vars()
            .load()
            .expect("defaults should load");

        assert_eq!(config, WardenConfig::default());
    }

    #[test]
    fn load_global_config() {
        let temp = TempDir::new().expect("should create temp dir");
        let config_path = create_config_file(
            temp.path(),
            r#"
default_aliases = true

[[grants]]
action = "read"
subject = "all"
"#,
        );

        let config = ConfigLoader::new()
            .with_global_config(&config_path)
            .skip_project_config()
            .skip_env_vars()
            .load()
            .expect("global config should load");

        assert!(config.default_aliases);
        assert_eq!(config.grants, vec![GrantConfig::new("read", "all")]);
    }

    #[test]
    fn load_project_layers_over_global() {
        let global_temp = TempDir::new().expect("should create temp dir");
        let project_temp = TempDir::new().expect("should create temp dir");

        let warden_dir = project_temp.path().join(PROJECT_CONFIG_DIR);
        std::fs::create_dir_all(&warden_dir).expect("should create .warden dir");

        let global_path = create_config_file(
            global_temp.path(),
            r#"
denied_message = "global"
default_aliases = true

[[grants]]
action = "read"
subject = "all"
"#,
        );

        create_config_file(
            &warden_dir,
            r#"
denied_message = "project"

[[grants]]
action = "manage"
subject = "Draft"
"#,
        );

        let config = ConfigLoader::new()
            .with_global_config(&global_path)
            .with_project_root(project_temp.path())
            .skip_env_vars()
            .load()
            .expect("layered config should load");

        // default_aliases from global (not overridden in project)
        assert!(config.default_aliases);
        // message from project (overrides global)
        assert_eq!(config.denied_message.as_deref(), Some("project"));
        // grants from both, global first
        assert_eq!(
            config.grants,
            vec![
                GrantConfig::new("read", "all"),
                GrantConfig::new("manage", "Draft"),
            ]
        );
    }

    #[test]
    fn missing_config_files_ok() {
        let config = ConfigLoader::new()
            .with_global_config("/nonexistent/path/config.toml")
            .with_project_root("/nonexistent/project")
            .skip_env_vars()
            .load()
            .expect("missing files should be ignored");

        assert_eq!(config, WardenConfig::default());
    }

    #[test]
    fn malformed_file_reports_path() {
        let temp = TempDir::new().expect("should create temp dir");
        let config_path = create_config_file(temp.path(), "default_aliases = \"maybe\"");

        let err = ConfigLoader::new()
            .with_global_config(&config_path)
            .skip_project_config()
            .skip_env_vars()
            .load()
            .expect_err("type mismatch should fail");

        assert!(matches!(err, ConfigError::ParseToml { .. }));
        assert!(err.to_string().contains(PROJECT_CONFIG_FILE));
    }

    #[test]
    fn parse_bool_values() {
        assert_eq!(parse_bool("true"), Some(true));
        assert_eq!(parse_bool("TRUE"), Some(true));
        assert_eq!(parse_bool("1"), Some(true));
        assert_eq!(parse_bool("yes"), Some(true));
        assert_eq!(parse_bool("on"), Some(true));

        assert_eq!(parse_bool("false"), Some(false));
        assert_eq!(parse_bool("FALSE"), Some(false));
        assert_eq!(parse_bool("0"), Some(false));
        assert_eq!(parse_bool("no"), Some(false));
        assert_eq!(parse_bool("off"), Some(false));

        assert_eq!(parse_bool("invalid"), None);
    }

    #[test]
    fn env_var_override() {
        // The only test in this crate that reads the environment.
        std::env::set_var(ENV_DEFAULT_ALIASES, "yes");
        std::env::set_var(ENV_DENIED_MESSAGE, "env message");

        let config = ConfigLoader::new()
            .skip_global_config()
            .skip_project_config()
            .load();

        std::env::set_var(ENV_DEFAULT_ALIASES, "sometimes");
        let invalid = ConfigLoader::new()
            .skip_global_config()
            .skip_project_config()
            .load();

        std::env::remove_var(ENV_DEFAULT_ALIASES);
        std::env::remove_var(ENV_DENIED_MESSAGE);

        let config = config.expect("env overrides should load");
        assert!(config.default_aliases);
        assert_eq!(config.denied_message.as_deref(), Some("env message"));

        let err = invalid.expect_err("invalid bool should fail");
        assert!(matches!(err, ConfigError::InvalidEnvVar { .. }));
    }
}
