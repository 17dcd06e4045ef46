//! Machine-readable error codes.
//!
//! Every Warden error type implements [`ErrorCode`] so that the layer that
//! turns failures into responses (HTTP handler, RPC interceptor, CLI) can
//! branch on a stable code instead of parsing display strings.
//!
//! # Example
//!
//! ```
//! use warden_types::ErrorCode;
//!
//! #[derive(Debug)]
//! enum LookupError {
//!     UnknownSubject(String),
//!     Expired,
//! }
//!
//! impl ErrorCode for LookupError {
//!     fn code(&self) -> &'static str {
//!         match self {
//!             Self::UnknownSubject(_) => "LOOKUP_UNKNOWN_SUBJECT",
//!             Self::Expired => "LOOKUP_EXPIRED",
//!         }
//!     }
//!
//!     fn is_recoverable(&self) -> bool {
//!         matches!(self, Self::Expired)
//!     }
//! }
//!
//! let err = LookupError::Expired;
//! assert_eq!(err.code(), "LOOKUP_EXPIRED");
//! assert!(err.is_recoverable());
//! ```

/// Stable error code interface.
///
/// # Code Format
///
/// - **UPPER_SNAKE_CASE**: e.g. `"AUTH_ACCESS_DENIED"`
/// - **Prefixed by the owning layer**: `"AUTH_"` for decisions and
///   enforcement, `"CONFIG_"` for configuration, `"NAME_"` for key validation
/// - **Stable**: callers match on these strings, so they never change once
///   published
///
/// # Recoverability
///
/// An error is recoverable when the caller can do something about it at
/// runtime: an access denial is recoverable
/// (redirect, ask for other credentials), a missing authorization check is
/// not (the request handler has to be fixed).
pub trait ErrorCode {
    /// Returns the machine-readable error code.
    fn code(&self) -> &'static str;

    /// Returns whether the caller can recover from the error at runtime.
    fn is_recoverable(&self) -> bool;
}

/// Asserts that an error code follows the naming conventions.
///
/// Intended for tests of crates that define error types.
///
/// # Panics
///
/// Panics if the code is empty, lacks `expected_prefix`, or is not
/// UPPER_SNAKE_CASE.
///
/// # Example
///
/// ```
/// use warden_types::{assert_error_code, ErrorCode};
///
/// struct Denied;
///
/// impl ErrorCode for Denied {
///     fn code(&self) -> &'static str { "AUTH_DENIED" }
///     fn is_recoverable(&self) -> bool { true }
/// }
///
/// assert_error_code(&Denied, "AUTH_");
/// ```
pub fn assert_error_code<E: ErrorCode + ?Sized>(err: &E, expected_prefix: &str) {
    let code = err.code();

    assert!(!code.is_empty(), "Error code must not be empty");
    assert!(
        code.starts_with(expected_prefix),
        "Error code '{}' must start with prefix '{}'",
        code,
        expected_prefix
    );
    assert!(
        is_upper_snake_case(code),
        "Error code '{}' must be UPPER_SNAKE_CASE",
        code
    );
}

/// Asserts [`assert_error_code`] for every error in `errors`.
pub fn assert_error_codes<E: ErrorCode>(errors: &[E], expected_prefix: &str) {
    for err in errors {
        assert_error_code(err, expected_prefix);
    }
}

fn is_upper_snake_case(s: &str) -> bool {
    if s.is_empty() || s.starts_with('_') || s.ends_with('_') || s.contains("__") {
        return false;
    }

    s.chars()
        .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
}
