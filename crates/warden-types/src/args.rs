//! Caller-supplied context arguments for predicates.

use std::any::Any;
use std::fmt;

/// Extra arguments passed to a predicate after the subject.
///
/// Arguments are positional and type-erased; predicates read them back with
/// [`get`](Self::get), which returns `None` when the position is missing or
/// holds a different type.
///
/// `Args` borrows the slice it wraps, so a slice held in a binding must
/// outlive it. Passed inline to a call (`Args::new(&[&flag])`) the slice
/// lives until the end of that statement.
///
/// # Example
///
/// ```
/// use std::any::Any;
/// use warden_types::Args;
///
/// let user_id: u64 = 7;
/// let region = String::from("eu");
/// let values: [&dyn Any; 2] = [&user_id, &region];
/// let args = Args::new(&values);
///
/// assert_eq!(args.len(), 2);
/// assert_eq!(args.first::<u64>(), Some(&7));
/// assert_eq!(args.get::<String>(1).map(String::as_str), Some("eu"));
/// assert_eq!(args.get::<u32>(0), None);
/// assert!(Args::empty().is_empty());
/// ```
#[derive(Clone, Copy)]
pub struct Args<'a> {
    values: &'a [&'a (dyn Any + 'static)],
}

impl<'a> Args<'a> {
    /// Wraps a list of arguments.
    #[must_use]
    pub const fn new(values: &'a [&'a (dyn Any + 'static)]) -> Self {
        Self { values }
    }

    /// No arguments.
    #[must_use]
    pub const fn empty() -> Args<'static> {
        Args { values: &[] }
    }

    /// Number of arguments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if there are no arguments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns the argument at `index` if it has type `T`.
    #[must_use]
    pub fn get<T: Any>(&self, index: usize) -> Option<&'a T> {
        self.values.get(index)?.downcast_ref::<T>()
    }

    /// Returns the first argument if it has type `T`.
    #[must_use]
    pub fn first<T: Any>(&self) -> Option<&'a T> {
        self.get(0)
    }

    /// Iterates over the raw arguments.
    pub fn iter(&self) -> impl Iterator<Item = &'a (dyn Any + 'static)> + 'a {
        self.values.iter().copied()
    }
}

impl Default for Args<'_> {
    fn default() -> Self {
        Args::empty()
    }
}

impl fmt::Debug for Args<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Args").field("len", &self.len()).finish()
    }
}
