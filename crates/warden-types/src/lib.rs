//! Core types for the Warden authorization engine.
//!
//! Warden answers one question: *may this principal perform this action on
//! this subject?* This crate holds the vocabulary of that question, with no
//! decision logic:
//!
//! | Type | Role |
//! |------|------|
//! | [`Action`] | What is being done (`"read"`, or the wildcard `manage`) |
//! | [`SubjectKey`] | Rule registry key: a [`SubjectType`] or the wildcard `all` |
//! | [`SubjectRef`] | What a check is made against: a type or an instance |
//! | [`Subject`] / [`SubjectKind`] | How Rust values become checkable subjects |
//! | [`Args`] | Extra context handed to predicates |
//! | [`ErrorCode`] | Stable, machine-readable codes for every error type |
//!
//! # Crate Architecture
//!
//! ```text
//! warden-types    (Action, SubjectKey, SubjectRef, Args, ErrorCode)  ◄── HERE
//!     ↑
//! warden-auth     (Rule, RuleRegistry, Ability, AccessDenied)
//!     ↑
//! warden-runtime  (layered config, AbilityBuilder)
//! ```

mod action;
mod args;
mod construct;
mod error;
mod name;
mod subject;

pub use action::{Action, MANAGE};
pub use args::Args;
pub use construct::TryNew;
pub use error::{assert_error_code, assert_error_codes, ErrorCode};
pub use name::NameError;
pub use subject::{Subject, SubjectKey, SubjectKind, SubjectRef, SubjectType, ALL};
