//! Warden Runtime: configuration and ability construction.
//!
//! The core crates decide; this crate supplies what is decided with:
//! layered TOML configuration, and an [`AbilityBuilder`] that turns it into
//! a ready [`Ability`](warden_auth::Ability).
//!
//! # Crate Architecture
//!
//! ```text
//! warden-types    (Action, SubjectKey, SubjectRef, Args, ErrorCode)
//!     ↑
//! warden-auth     (Rule, RuleRegistry, Ability, AccessDenied)
//!     ↑
//! warden-runtime  (layered config, AbilityBuilder)  ◄── THIS CRATE
//! ```
//!
//! # Modules
//!
//! ## [`config`] - Layered Configuration
//!
//! - [`WardenConfig`](config::WardenConfig): merged settings
//! - [`ConfigLoader`](config::ConfigLoader): defaults < global < project < env
//! - [`ConfigError`](config::ConfigError): load and validation failures
//!
//! # Usage
//!
//! ```no_run
//! use warden_runtime::config::ConfigLoader;
//! use warden_runtime::AbilityBuilder;
//!
//! let loader = ConfigLoader::new().with_project_root(".");
//! let mut ability = AbilityBuilder::new("current-user").load(&loader)?.build()?;
//!
//! // Code can add to what the config granted.
//! ability.grant("read", warden_types::SubjectKey::All);
//! # Ok::<(), warden_runtime::config::ConfigError>(())
//! ```

pub mod config;

mod builder;

pub use builder::AbilityBuilder;
pub use config::{ConfigError, ConfigLoader, WardenConfig};
