//! Configuration management with hierarchical layering.
//!
//! # Architecture
//!
//! Configuration is loaded from multiple sources with priority-based merging:
//!
//! ```text
//! Priority (highest to lowest):
//!
//! ┌─────────────────────────────────────────────┐
//! │  1. Environment Variables (WARDEN_*)        │  Runtime override
//! ├─────────────────────────────────────────────┤
//! │  2. Project Config (.warden/config.toml)    │  Project-specific
//! ├─────────────────────────────────────────────┤
//! │  3. Global Config (~/.warden/config.toml)   │  User defaults
//! ├─────────────────────────────────────────────┤
//! │  4. Default Values (compile-time)           │  Fallback
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Environment Variables
//!
//! | Variable | Config Field | Type |
//! |----------|--------------|------|
//! | `WARDEN_DENIED_MESSAGE` | `denied_message` | String |
//! | `WARDEN_DEFAULT_ALIASES` | `default_aliases` | bool |
//!
//! # Example Configuration
//!
//! ```toml
//! # <project>/.warden/config.toml
//!
//! denied_message = "You cannot do that here."
//! default_aliases = true
//!
//! [aliases]
//! moderate = ["approve", "reject"]
//!
//! [[grants]]
//! action = "read"
//! subject = "all"
//!
//! [[grants]]
//! action = "manage"
//! subject = "Draft"
//! ```
//!
//! Configuration declares unconditional grants only. Conditional grants
//! need a predicate and are registered in code on the built
//! [`Ability`](warden_auth::Ability).

mod error;
mod loader;
mod types;

pub use error::ConfigError;
pub use loader::{ConfigLoader, ENV_DEFAULT_ALIASES, ENV_DENIED_MESSAGE};
pub use types::{GrantConfig, WardenConfig};

/// Default global config directory.
pub fn default_config_dir() -> std::path::PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| std::path::PathBuf::from("."))
        .join(PROJECT_CONFIG_DIR)
}

/// Default global config file path.
pub fn default_config_path() -> std::path::PathBuf {
    default_config_dir().join(PROJECT_CONFIG_FILE)
}

/// Project config directory name.
pub const PROJECT_CONFIG_DIR: &str = ".warden";

/// Project config file name.
pub const PROJECT_CONFIG_FILE: &str = "config.toml";
