//! Clause bodies: unconditional grants and predicates.

use std::fmt;
use std::sync::Arc;
use warden_types::{Args, Subject, SubjectKind};

type PredicateFn = dyn Fn(&dyn Subject, &Args<'_>) -> bool + Send + Sync;

/// A stored condition evaluated against a subject instance.
///
/// The subject is always the first input, followed by the caller's
/// [`Args`]. Predicates run on the caller's thread with no isolation: a
/// panic inside a predicate propagates to whoever asked for the decision.
///
/// # Example
///
/// ```
/// use warden_auth::Predicate;
/// use warden_types::{Args, SubjectKind};
///
/// struct Invoice {
///     paid: bool,
/// }
///
/// impl SubjectKind for Invoice {
///     const NAME: &'static str = "Invoice";
/// }
///
/// let unpaid = Predicate::typed(|invoice: &Invoice, _args| !invoice.paid);
///
/// assert!(unpaid.evaluate(&Invoice { paid: false }, &Args::empty()));
/// assert!(!unpaid.evaluate(&Invoice { paid: true }, &Args::empty()));
/// ```
#[derive(Clone)]
pub struct Predicate(Arc<PredicateFn>);

impl Predicate {
    /// Wraps a predicate over any subject.
    #[must_use]
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&dyn Subject, &Args<'_>) -> bool + Send + Sync + 'static,
    {
        Self(Arc::new(predicate))
    }

    /// Wraps a predicate over subjects of type `T`.
    ///
    /// Subjects of any other type fail the predicate without calling it.
    #[must_use]
    pub fn typed<T, F>(predicate: F) -> Self
    where
        T: SubjectKind,
        F: Fn(&T, &Args<'_>) -> bool + Send + Sync + 'static,
    {
        Self::new(move |subject, args| {
            subject
                .downcast_ref::<T>()
                .is_some_and(|typed| predicate(typed, args))
        })
    }

    /// Invokes the predicate.
    #[must_use]
    pub fn evaluate(&self, subject: &dyn Subject, args: &Args<'_>) -> bool {
        (self.0)(subject, args)
    }
}

impl fmt::Debug for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Predicate(..)")
    }
}

/// The body of a rule entry for one action.
#[derive(Debug, Clone)]
pub enum Clause {
    /// Unconditional grant.
    Allow,
    /// Grant gated by a predicate on the subject instance.
    Predicate(Predicate),
}

impl Clause {
    /// Returns `true` if the clause depends on the subject instance.
    #[must_use]
    pub fn is_conditional(&self) -> bool {
        matches!(self, Self::Predicate(_))
    }

    /// Evaluates the clause.
    ///
    /// Without an instance (a type-level check) a predicate cannot run; the
    /// clause then grants, meaning "allowed for at least some instances".
    #[must_use]
    pub fn evaluate(&self, subject: Option<&dyn Subject>, args: &Args<'_>) -> bool {
        match (self, subject) {
            (Self::Allow, _) | (Self::Predicate(_), None) => true,
            (Self::Predicate(predicate), Some(subject)) => predicate.evaluate(subject, args),
        }
    }
}

impl From<Option<Predicate>> for Clause {
    fn from(predicate: Option<Predicate>) -> Self {
        predicate.map_or(Self::Allow, Self::Predicate)
    }
}

impl From<Predicate> for Clause {
    fn from(predicate: Predicate) -> Self {
        Self::Predicate(predicate)
    }
}
