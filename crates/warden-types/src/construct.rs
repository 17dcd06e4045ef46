//! Fallible construction.
//!
//! Keys that come from code (`SubjectKind::NAME`, string literals passed to
//! `grant`) are trusted. Keys that come from outside the program, such as
//! configuration files, go through [`TryNew`] so that malformed names are
//! rejected before they reach a rule registry.

/// Construction with validation.
///
/// The `try_` prefix makes fallibility explicit at the call site; a type
/// implementing `TryNew` does not also offer a `new()` that performs the
/// same validation.
///
/// # Example
///
/// ```
/// use warden_types::{Action, SubjectType, TryNew};
///
/// assert!(SubjectType::try_new("Article".to_string()).is_ok());
/// assert!(SubjectType::try_new("all".to_string()).is_err());
///
/// assert_eq!(Action::try_new("manage".to_string()), Ok(Action::Manage));
/// assert!(Action::try_new(String::new()).is_err());
/// ```
pub trait TryNew: Sized {
    /// Error returned when validation fails.
    type Error;

    /// Arguments required for construction (a tuple for several).
    type Args;

    /// Validates `args` and constructs the value.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] when `args` violate the type's invariants.
    fn try_new(args: Self::Args) -> Result<Self, Self::Error>;
}
