//! Subject keys and subject references.
//!
//! A *subject* is what a permission is checked against: either a concrete
//! value (an `Article`) or a whole type (`Article` as a category).
//! Rules are always stored by type, so every check resolves its subject to
//! a [`SubjectKey`] first:
//!
//! ```text
//! SubjectRef::Instance(&article) ──► article.subject_type() ──► SubjectKey::Type("Article")
//! SubjectRef::Type(key)          ──────────────────────────────► key
//! ```
//!
//! # Opting a type in
//!
//! ```
//! use warden_types::{Subject, SubjectKey, SubjectKind, SubjectRef, SubjectType};
//!
//! struct Article {
//!     author: u64,
//! }
//!
//! impl SubjectKind for Article {
//!     const NAME: &'static str = "Article";
//! }
//!
//! let article = Article { author: 7 };
//! assert_eq!(article.subject_type(), SubjectType::of::<Article>());
//!
//! // Checking an instance and checking the type resolve to the same key.
//! assert_eq!(SubjectRef::from(&article).key(), SubjectKey::of::<Article>());
//! assert_eq!(SubjectRef::of::<Article>().key(), SubjectKey::of::<Article>());
//! ```

use crate::name::{self, NameError};
use crate::TryNew;
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::borrow::Cow;
use std::fmt;

/// Reserved token for the wildcard subject.
pub const ALL: &str = "all";

/// Identifier of a subject type.
///
/// Built from [`SubjectKind::NAME`] for Rust types, or validated through
/// [`TryNew`] for names coming from configuration.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SubjectType(Cow<'static, str>);

impl SubjectType {
    /// Returns the type identifier of `T`.
    ///
    /// Debug builds panic if `T::NAME` is the reserved wildcard name.
    #[must_use]
    pub fn of<T: SubjectKind>() -> Self {
        debug_assert_ne!(T::NAME, ALL, "`all` is reserved for the wildcard subject");
        Self(Cow::Borrowed(T::NAME))
    }

    /// Returns the type name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryNew for SubjectType {
    type Error = NameError;
    type Args = String;

    fn try_new(name: String) -> Result<Self, Self::Error> {
        name::validate("subject type", &name)?;
        if name == ALL {
            return Err(NameError::Reserved(name));
        }
        Ok(Self(Cow::Owned(name)))
    }
}

impl TryFrom<String> for SubjectType {
    type Error = NameError;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        Self::try_new(name)
    }
}

impl From<SubjectType> for String {
    fn from(ty: SubjectType) -> Self {
        ty.0.into_owned()
    }
}

impl fmt::Display for SubjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Key under which rules are registered.
///
/// | Variant | Matches |
/// |---------|---------|
/// | `Type(t)` | Subjects whose type is `t` |
/// | `All` | Any subject type without a more specific rule |
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SubjectKey {
    /// The wildcard subject.
    All,
    /// A specific subject type.
    Type(SubjectType),
}

impl SubjectKey {
    /// Returns the key of `T`.
    #[must_use]
    pub fn of<T: SubjectKind>() -> Self {
        Self::Type(SubjectType::of::<T>())
    }

    /// Returns `true` for the wildcard subject.
    #[must_use]
    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }

    /// Returns the textual form of the key.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::All => ALL,
            Self::Type(ty) => ty.as_str(),
        }
    }
}

impl TryNew for SubjectKey {
    type Error = NameError;
    type Args = String;

    /// Parses `"all"` as the wildcard, anything else as a validated type name.
    fn try_new(name: String) -> Result<Self, Self::Error> {
        if name == ALL {
            return Ok(Self::All);
        }
        SubjectType::try_new(name).map(Self::Type)
    }
}

impl TryFrom<String> for SubjectKey {
    type Error = NameError;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        Self::try_new(name)
    }
}

impl From<SubjectKey> for String {
    fn from(key: SubjectKey) -> Self {
        match key {
            SubjectKey::All => ALL.to_string(),
            SubjectKey::Type(ty) => ty.into(),
        }
    }
}

impl From<SubjectType> for SubjectKey {
    fn from(ty: SubjectType) -> Self {
        Self::Type(ty)
    }
}

impl fmt::Display for SubjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A Rust type that rules can be registered for.
///
/// `NAME` is the type's key in every rule registry; two types must not
/// share a name.
pub trait SubjectKind: Any {
    /// Registry name of the type.
    ///
    /// Must not be `"all"`, which names the wildcard subject and would not
    /// survive a round trip through its string form.
    const NAME: &'static str;
}

/// A value that permissions can be checked against.
///
/// Implemented for every [`SubjectKind`]. Predicates receive subjects as
/// `&dyn Subject` and recover the concrete type through [`as_any`](Self::as_any).
pub trait Subject: Any {
    /// Returns the runtime type key of the value.
    fn subject_type(&self) -> SubjectType;

    /// Returns the value as [`Any`] for downcasting.
    fn as_any(&self) -> &dyn Any;
}

impl<T: SubjectKind> Subject for T {
    fn subject_type(&self) -> SubjectType {
        SubjectType::of::<T>()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl<'s> dyn Subject + 's {
    /// Downcasts the subject to `T`.
    #[must_use]
    pub fn downcast_ref<T: SubjectKind>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }
}

/// The subject of a permission check.
///
/// Either a type (or the wildcard) given directly, or an instance whose
/// runtime type is used as the key. Only instances can feed predicates.
#[derive(Clone)]
pub enum SubjectRef<'a> {
    /// A subject type or the wildcard, without an instance.
    Type(SubjectKey),
    /// A concrete value.
    Instance(&'a dyn Subject),
}

impl<'a> SubjectRef<'a> {
    /// References the type `T` without an instance.
    #[must_use]
    pub fn of<T: SubjectKind>() -> Self {
        Self::Type(SubjectKey::of::<T>())
    }

    /// References the wildcard subject.
    #[must_use]
    pub fn all() -> Self {
        Self::Type(SubjectKey::All)
    }

    /// Resolves the key used for rule lookup.
    #[must_use]
    pub fn key(&self) -> SubjectKey {
        match self {
            Self::Type(key) => key.clone(),
            Self::Instance(subject) => SubjectKey::Type(subject.subject_type()),
        }
    }

    /// Returns the instance, if one was given.
    #[must_use]
    pub fn instance(&self) -> Option<&'a dyn Subject> {
        match self {
            Self::Type(_) => None,
            Self::Instance(subject) => Some(*subject),
        }
    }
}

impl fmt::Debug for SubjectRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Type(key) => f.debug_tuple("Type").field(key).finish(),
            Self::Instance(subject) => f
                .debug_tuple("Instance")
                .field(&subject.subject_type())
                .finish(),
        }
    }
}

impl<'a, T: SubjectKind> From<&'a T> for SubjectRef<'a> {
    fn from(subject: &'a T) -> Self {
        Self::Instance(subject)
    }
}

impl<'a> From<&'a dyn Subject> for SubjectRef<'a> {
    fn from(subject: &'a dyn Subject) -> Self {
        Self::Instance(subject)
    }
}

impl From<SubjectKey> for SubjectRef<'_> {
    fn from(key: SubjectKey) -> Self {
        Self::Type(key)
    }
}

impl From<&SubjectKey> for SubjectRef<'_> {
    fn from(key: &SubjectKey) -> Self {
        Self::Type(key.clone())
    }
}

impl From<SubjectType> for SubjectRef<'_> {
    fn from(ty: SubjectType) -> Self {
        Self::Type(SubjectKey::Type(ty))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Article {
        title: String,
    }

    impl SubjectKind for Article {
        const NAME: &'static str = "Article";
    }

    struct Comment;

    impl SubjectKind for Comment {
        const NAME: &'static str = "Comment";
    }

    #[test]
    fn instance_and_type_resolve_to_same_key() {
        let article = Article {
            title: "hello".into(),
        };

        assert_eq!(SubjectRef::from(&article).key(), SubjectKey::of::<Article>());
        assert_eq!(SubjectRef::of::<Article>().key(), SubjectKey::of::<Article>());
        assert_ne!(SubjectRef::of::<Comment>().key(), SubjectKey::of::<Article>());
    }

    #[test]
    fn only_instances_carry_a_value() {
        let article = Article {
            title: "hello".into(),
        };

        assert!(SubjectRef::of::<Article>().instance().is_none());
        assert!(SubjectRef::all().instance().is_none());

        let instance = SubjectRef::from(&article)
            .instance()
            .expect("instance reference");
        let back = instance.downcast_ref::<Article>().expect("downcast");
        assert_eq!(back.title, "hello");
        assert!(instance.downcast_ref::<Comment>().is_none());
    }

    #[test]
    fn wildcard_key() {
        assert_eq!(SubjectRef::all().key(), SubjectKey::All);
        assert!(SubjectKey::All.is_all());
        assert_eq!(SubjectKey::All.to_string(), "all");
    }

    #[test]
    fn try_new_parses_wildcard_and_validates() {
        assert_eq!(SubjectKey::try_new("all".into()), Ok(SubjectKey::All));
        assert_eq!(
            SubjectKey::try_new("Article".into()),
            Ok(SubjectKey::of::<Article>())
        );
        assert!(SubjectKey::try_new(String::new()).is_err());
        assert_eq!(
            SubjectType::try_new("all".into()),
            Err(NameError::Reserved("all".into()))
        );
    }

    #[test]
    fn debug_shows_resolved_type() {
        let comment = Comment;
        let debug = format!("{:?}", SubjectRef::from(&comment));
        assert!(debug.contains("Comment"), "got: {debug}");
    }

    #[test]
    fn serde_uses_plain_strings() {
        let json = serde_json::to_string(&SubjectKey::All).expect("serialize");
        assert_eq!(json, "\"all\"");

        let key: SubjectKey = serde_json::from_str("\"Article\"").expect("deserialize");
        assert_eq!(key, SubjectKey::of::<Article>());

        assert!(serde_json::from_str::<SubjectType>("\"all\"").is_err());
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "reserved for the wildcard subject")]
    fn kind_named_all_is_rejected() {
        struct Everything;

        impl SubjectKind for Everything {
            const NAME: &'static str = ALL;
        }

        let _ = SubjectType::of::<Everything>();
    }
}
