//! Rule registration and permission decisions for Warden.
//!
//! A principal's permissions are declared as rules on an [`Ability`], then
//! queried with an action and a subject:
//!
//! ```text
//! Ability ──► RuleRegistry ──► Rule / NullRule ──► Clause ──► bool
//!  (grant)    (by subject key)   (by action)        (Allow | Predicate)
//! ```
//!
//! | Wildcard | Token | Meaning |
//! |----------|-------|---------|
//! | [`Action::Manage`](warden_types::Action::Manage) | `manage` | Any action; always wins over specific actions of the same rule |
//! | [`SubjectKey::All`](warden_types::SubjectKey::All) | `all` | Any subject type without an applicable specific rule |
//!
//! # Crate Architecture
//!
//! ```text
//! warden-types    (Action, SubjectKey, SubjectRef, Args, ErrorCode)
//!     ↑
//! warden-auth     (Rule, RuleRegistry, Ability, AccessDenied)  ◄── THIS CRATE
//!     ↑
//! warden-runtime  (layered config, AbilityBuilder)
//! ```
//!
//! # Example
//!
//! ```
//! use warden_auth::Ability;
//! use warden_types::{SubjectKey, SubjectKind, SubjectRef};
//!
//! struct Project {
//!     owner: &'static str,
//! }
//!
//! impl SubjectKind for Project {
//!     const NAME: &'static str = "Project";
//! }
//!
//! let user = "ana";
//! let mut ability = Ability::new(user);
//! ability.grant_if("update", move |project: &Project, _| project.owner == user);
//!
//! assert!(ability.is_allowed("update", &Project { owner: "ana" }));
//! assert!(ability.is_denied("update", &Project { owner: "ben" }));
//!
//! // Without an instance the question is "may they update some projects?".
//! assert!(ability.is_allowed("update", SubjectRef::of::<Project>()));
//!
//! ability.grant("manage", SubjectKey::of::<Project>());
//! assert!(ability.is_allowed("archive", &Project { owner: "ben" }));
//! ```
//!
//! # Design Principles
//!
//! - **Decisions are booleans**: only [`Ability::enforce`] and
//!   [`AuthorizationScope::finish`] produce errors
//! - **Lookups never write**: checking an unknown subject type leaves the
//!   registry untouched
//! - **Last registration wins** for the same subject and action

pub mod ability;
pub mod alias;
pub mod clause;
pub mod error;
pub mod registry;
pub mod rule;
pub mod scope;

pub use ability::Ability;
pub use alias::ActionAliases;
pub use clause::{Clause, Predicate};
pub use error::{AccessDenied, AuthError, AuthorizationNotPerformed, DEFAULT_DENIED_MESSAGE};
pub use registry::RuleRegistry;
pub use rule::{Authorize, NullRule, Rule, NULL_RULE};
pub use scope::AuthorizationScope;
