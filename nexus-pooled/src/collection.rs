//! Generic collection capability.
//!
//! [`Collection`] is the surface generic consumers program against when they
//! only need "add, remove, test, count". [`PooledList`] implements it by
//! forwarding to its inherent operations.

use crate::index::NodeIndex;
use crate::list::PooledList;

/// A mutable, countable collection of `T`.
///
/// # Example
///
/// ```
/// use nexus_pooled::{Collection, PooledList};
///
/// fn fill<C: Collection<u64>>(c: &mut C) {
///     for i in 0..3 {
///         c.add(i);
///     }
/// }
///
/// let mut list: PooledList<u64> = PooledList::new();
/// fill(&mut list);
///
/// assert_eq!(Collection::len(&list), 3);
/// assert!(Collection::contains(&list, &1));
/// assert!(Collection::remove(&mut list, &1));
/// assert!(!Collection::is_read_only(&list));
/// ```
pub trait Collection<T> {
    /// Returns the number of elements.
    fn len(&self) -> usize;

    /// Returns `true` if there are no elements.
    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` if the collection rejects mutation.
    fn is_read_only(&self) -> bool;

    /// Adds an element.
    fn add(&mut self, item: T);

    /// Removes the first element equal to `item`, returning whether one was
    /// found.
    fn remove(&mut self, item: &T) -> bool;

    /// Returns `true` if an element equals `item`.
    fn contains(&self, item: &T) -> bool;

    /// Removes all elements.
    fn clear(&mut self);

    /// Clones all elements into `dest` starting at `offset`.
    ///
    /// # Panics
    ///
    /// Panics if `dest[offset..]` cannot hold every element.
    fn copy_to(&self, dest: &mut [T], offset: usize);
}

impl<T: PartialEq + Clone, I: NodeIndex> Collection<T> for PooledList<T, I> {
    #[inline]
    fn len(&self) -> usize {
        PooledList::len(self)
    }

    #[inline]
    fn is_read_only(&self) -> bool {
        false
    }

    /// Appends at the back.
    #[inline]
    fn add(&mut self, item: T) {
        self.push_back(item);
    }

    #[inline]
    fn remove(&mut self, item: &T) -> bool {
        self.remove_item(item)
    }

    #[inline]
    fn contains(&self, item: &T) -> bool {
        PooledList::contains(self, item)
    }

    #[inline]
    fn clear(&mut self) {
        PooledList::clear(self);
    }

    #[inline]
    fn copy_to(&self, dest: &mut [T], offset: usize) {
        PooledList::copy_to(self, dest, offset);
    }
}
