//! Singly-linked list over an owned node pool.
//!
//! Nodes live in a [`NodePool`] owned by the list and are linked by index.
//! Pushing reuses freed slots before the arena grows, so a list that
//! churns at a steady size stops allocating once it has warmed up.
//!
//! # Example
//!
//! ```
//! use nexus_pooled::PooledList;
//!
//! let mut list: PooledList<u64> = PooledList::new();
//!
//! // Queue: push_back + pop_front
//! list.push_back(1);
//! list.push_back(2);
//! list.push_back(3);
//! assert_eq!(list.pop_front(), Some(1));
//!
//! // Stack: push_front + pop_front
//! list.push_front(0);
//! assert_eq!(list.pop_front(), Some(0));
//!
//! assert_eq!(list.iter().copied().collect::<Vec<_>>(), vec![2, 3]);
//! ```
//!
//! # Removing by predicate
//!
//! Without `prev` links, removal from the middle is a scan that remembers
//! the predecessor. Matches are unlinked and their slots recycled.
//!
//! ```
//! use nexus_pooled::PooledList;
//!
//! let mut list: PooledList<u64> = (1..=10).collect();
//!
//! assert_eq!(list.remove_first(|&x| x % 4 == 0), Some(4));
//! assert_eq!(list.remove_up_to(2, |&x| x % 2 == 0), 2); // 2, 6
//! assert_eq!(list.remove_all(|&x| x > 8), 2); // 9, 10
//!
//! assert_eq!(list.iter().copied().collect::<Vec<_>>(), vec![1, 3, 5, 7, 8]);
//! ```
//!
//! # Slot Reuse
//!
//! ```
//! use nexus_pooled::PooledList;
//!
//! let mut list: PooledList<&str> = PooledList::new();
//! list.push_back("a");
//! list.push_back("b");
//! assert_eq!(list.pool().len(), 2);
//!
//! list.clear();
//! list.push_back("c");
//! list.push_back("d");
//!
//! // Same arena, recycled slots.
//! assert_eq!(list.pool().len(), 2);
//! ```
//!
//! # Thread Safety
//!
//! There is no internal locking. A list is owned by one thread at a time;
//! share it behind a `Mutex` if several threads need to mutate it.

use core::fmt;
use core::hash::{Hash, Hasher};

use crate::error::{CopyError, Full};
use crate::index::NodeIndex;
use crate::iter::{IntoIter, Iter, IterMut};
use crate::pool::NodePool;

/// A singly-linked list whose nodes live in a recycling arena.
///
/// The list tracks head, tail and length; every slot access goes through
/// its [`NodePool`].
///
/// # Type Parameters
///
/// - `T`: Element type
/// - `I`: Slot index type (default `u32`)
///
/// # Example
///
/// ```
/// use nexus_pooled::PooledList;
///
/// let mut list: PooledList<String> = PooledList::with_capacity(16);
///
/// list.push_back("world".into());
/// list.push_front("hello".into());
///
/// assert_eq!(list.len(), 2);
/// assert_eq!(list.front().map(String::as_str), Some("hello"));
/// assert_eq!(list.back().map(String::as_str), Some("world"));
/// ```
pub struct PooledList<T, I: NodeIndex = u32> {
    pool: NodePool<T, I>,
    head: I,
    tail: I,
    len: usize,
}

impl<T, I: NodeIndex> Default for PooledList<T, I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, I: NodeIndex> PooledList<T, I> {
    /// Creates an empty list. Does not allocate.
    #[inline]
    pub const fn new() -> Self {
        Self {
            pool: NodePool::new(),
            head: I::NONE,
            tail: I::NONE,
            len: 0,
        }
    }

    /// Creates an empty list whose pool has room for `capacity` nodes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            pool: NodePool::with_capacity(capacity),
            head: I::NONE,
            tail: I::NONE,
            len: 0,
        }
    }

    /// Returns the number of elements in the list.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the list is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the backing pool.
    ///
    /// Read-only: mutation goes through list operations so the chain and the
    /// free list stay consistent.
    #[inline]
    pub fn pool(&self) -> &NodePool<T, I> {
        &self.pool
    }

    /// Returns the head slot index, or `NONE` if empty.
    #[inline]
    pub fn head(&self) -> I {
        self.head
    }

    /// Returns the tail slot index, or `NONE` if empty.
    #[inline]
    pub fn tail(&self) -> I {
        self.tail
    }

    /// Reserves pool room for at least `additional` more nodes.
    pub fn reserve(&mut self, additional: usize) {
        self.pool.reserve(additional);
    }

    // ========================================================================
    // Insertion
    // ========================================================================

    /// Adds an element at the front. The stack "push".
    ///
    /// # Panics
    ///
    /// Panics if the pool has run out of slot indices for `I`.
    #[inline]
    pub fn push_front(&mut self, item: T) {
        let id = self.pool.store(item);
        self.link_front(id);
    }

    /// Adds an element at the back. The queue "enqueue".
    ///
    /// # Panics
    ///
    /// Panics if the pool has run out of slot indices for `I`.
    #[inline]
    pub fn push_back(&mut self, item: T) {
        let id = self.pool.store(item);
        self.link_back(id);
    }

    /// Adds an element at the front.
    ///
    /// # Errors
    ///
    /// Returns `Err(Full(item))` if the pool has run out of slot indices.
    #[inline]
    pub fn try_push_front(&mut self, item: T) -> Result<(), Full<T>> {
        let id = self.pool.try_store(item)?;
        self.link_front(id);
        Ok(())
    }

    /// Adds an element at the back.
    ///
    /// # Errors
    ///
    /// Returns `Err(Full(item))` if the pool has run out of slot indices.
    #[inline]
    pub fn try_push_back(&mut self, item: T) -> Result<(), Full<T>> {
        let id = self.pool.try_store(item)?;
        self.link_back(id);
        Ok(())
    }

    #[inline]
    fn link_front(&mut self, id: I) {
        let next = self.head;
        self.head = id;

        if next.is_none() {
            self.tail = id;
        } else {
            self.pool.set_next(id, next);
        }

        self.len += 1;
    }

    #[inline]
    fn link_back(&mut self, id: I) {
        let prev = self.tail;
        self.tail = id;

        if prev.is_none() {
            self.head = id;
        } else {
            self.pool.set_next(prev, id);
        }

        self.len += 1;
    }

    // ========================================================================
    // Removal
    // ========================================================================

    /// Removes and returns the front element. The stack "pop" and the
    /// queue "dequeue".
    ///
    /// Returns `None` if the list is empty.
    #[inline]
    pub fn pop_front(&mut self) -> Option<T> {
        let head = self.head;
        if head.is_none() {
            return None;
        }

        Some(self.unlink(I::NONE, head))
    }

    /// Removes and returns the first element matching `pred`.
    ///
    /// Elements are tested front to back. Returns `None` and leaves the list
    /// untouched if nothing matches.
    pub fn remove_first<F>(&mut self, mut pred: F) -> Option<T>
    where
        F: FnMut(&T) -> bool,
    {
        let (prev, id) = self.find(I::NONE, self.head, &mut pred)?;
        Some(self.unlink(prev, id))
    }

    /// Removes up to `max` elements matching `pred` in one front-to-back
    /// pass. A `max` of 0 means no limit.
    ///
    /// Returns the number of elements removed. Survivors keep their order.
    pub fn remove_up_to<F>(&mut self, max: usize, mut pred: F) -> usize
    where
        F: FnMut(&T) -> bool,
    {
        let mut removed = 0;
        let mut prev = I::NONE;
        let mut id = self.head;

        while max == 0 || removed < max {
            let Some((before, found)) = self.find(prev, id, &mut pred) else {
                break;
            };

            // Resume after the match; its predecessor is unchanged.
            id = self.pool.get_next(found);
            prev = before;

            drop(self.unlink(before, found));
            removed += 1;
        }

        removed
    }

    /// Removes every element matching `pred`, returning how many were removed.
    #[inline]
    pub fn remove_all<F>(&mut self, pred: F) -> usize
    where
        F: FnMut(&T) -> bool,
    {
        self.remove_up_to(0, pred)
    }

    /// Removes the first element equal to `item`.
    ///
    /// Returns `true` if an element was removed.
    #[inline]
    pub fn remove_item(&mut self, item: &T) -> bool
    where
        T: PartialEq,
    {
        self.remove_first(|x| x == item).is_some()
    }

    /// Removes the first element that `eq` considers equal to `item`.
    ///
    /// Returns `true` if an element was removed.
    #[inline]
    pub fn remove_item_by<F>(&mut self, item: &T, mut eq: F) -> bool
    where
        F: FnMut(&T, &T) -> bool,
    {
        self.remove_first(|x| eq(x, item)).is_some()
    }

    /// Removes all elements.
    ///
    /// The whole chain is handed back to the pool in one splice; the arena
    /// keeps its slots for reuse.
    pub fn clear(&mut self) {
        let head = self.head;
        if head.is_none() {
            return;
        }

        let tail = self.tail;
        let len = self.len;

        self.head = I::NONE;
        self.tail = I::NONE;
        self.len = 0;

        let freed = self.pool.free_chain(head, tail);
        debug_assert_eq!(freed, len);
    }

    /// Removes all elements and discards every pool slot.
    ///
    /// Unlike [`clear`](Self::clear), slot indices restart at 0 afterwards.
    pub fn reset(&mut self) {
        self.head = I::NONE;
        self.tail = I::NONE;
        self.len = 0;
        self.pool.reset();
    }

    /// Finds the first match at or after `id`, returning it with its
    /// predecessor (`prev` is the predecessor of `id`).
    #[inline]
    fn find<F>(&self, mut prev: I, mut id: I, pred: &mut F) -> Option<(I, I)>
    where
        F: FnMut(&T) -> bool,
    {
        while id.is_some() {
            let (item, next) = self.pool.get_node(id);
            if pred(item) {
                return Some((prev, id));
            }

            prev = id;
            id = next;
        }

        None
    }

    /// Unlinks `id` (whose predecessor is `prev`, or `NONE` at the head)
    /// and frees its slot.
    #[inline]
    fn unlink(&mut self, prev: I, id: I) -> T {
        let next = self.pool.get_next(id);

        if prev.is_none() {
            self.head = next;
        } else {
            self.pool.set_next(prev, next);
        }

        if next.is_none() {
            self.tail = prev;
        }

        self.len -= 1;
        self.pool.free(id)
    }

    // ========================================================================
    // Access
    // ========================================================================

    /// Returns a reference to the front element.
    #[inline]
    pub fn front(&self) -> Option<&T> {
        if self.head.is_none() {
            None
        } else {
            Some(self.pool.get_item(self.head))
        }
    }

    /// Returns a mutable reference to the front element.
    #[inline]
    pub fn front_mut(&mut self) -> Option<&mut T> {
        if self.head.is_none() {
            None
        } else {
            Some(self.pool.get_item_mut(self.head))
        }
    }

    /// Returns a reference to the back element.
    #[inline]
    pub fn back(&self) -> Option<&T> {
        if self.tail.is_none() {
            None
        } else {
            Some(self.pool.get_item(self.tail))
        }
    }

    /// Returns a mutable reference to the back element.
    #[inline]
    pub fn back_mut(&mut self) -> Option<&mut T> {
        if self.tail.is_none() {
            None
        } else {
            Some(self.pool.get_item_mut(self.tail))
        }
    }

    /// Returns `true` if any element equals `item`. O(n).
    pub fn contains(&self, item: &T) -> bool
    where
        T: PartialEq,
    {
        self.iter().any(|x| x == item)
    }

    /// Clones the elements, front to back, into `dest` starting at `offset`.
    ///
    /// # Panics
    ///
    /// Panics if `dest[offset..]` is shorter than the list.
    pub fn copy_to(&self, dest: &mut [T], offset: usize)
    where
        T: Clone,
    {
        if let Err(err) = self.try_copy_to(dest, offset) {
            panic!("{err}");
        }
    }

    /// Clones the elements, front to back, into `dest` starting at `offset`.
    ///
    /// # Errors
    ///
    /// Returns [`CopyError`] without writing anything if `dest[offset..]` is
    /// shorter than the list.
    pub fn try_copy_to(&self, dest: &mut [T], offset: usize) -> Result<(), CopyError>
    where
        T: Clone,
    {
        let fits = offset
            .checked_add(self.len)
            .is_some_and(|end| end <= dest.len());
        if !fits {
            return Err(CopyError {
                offset,
                required: self.len,
                dest_len: dest.len(),
            });
        }

        for (slot, item) in dest[offset..].iter_mut().zip(self.iter()) {
            slot.clone_from(item);
        }
        Ok(())
    }

    // ========================================================================
    // Iteration
    // ========================================================================

    /// Returns an iterator over references to elements, front to back.
    #[inline]
    pub fn iter(&self) -> Iter<'_, T, I> {
        Iter::new(&self.pool, self.head, self.len)
    }

    /// Returns an iterator over mutable references to elements, front to back.
    #[inline]
    pub fn iter_mut(&mut self) -> IterMut<'_, T, I> {
        IterMut::new(&mut self.pool, self.head, self.len)
    }
}

// =============================================================================
// Std trait shims
// =============================================================================

impl<T: fmt::Debug, I: NodeIndex> fmt::Debug for PooledList<T, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// Clones into a compact pool: the copy's slots are `0..len` in list order.
impl<T: Clone, I: NodeIndex> Clone for PooledList<T, I> {
    fn clone(&self) -> Self {
        let mut list = Self::with_capacity(self.len);
        list.extend(self.iter().cloned());
        list
    }
}

impl<T: PartialEq, I: NodeIndex> PartialEq for PooledList<T, I> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T: Eq, I: NodeIndex> Eq for PooledList<T, I> {}

impl<T: Hash, I: NodeIndex> Hash for PooledList<T, I> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_usize(self.len);
        for item in self {
            item.hash(state);
        }
    }
}

impl<T, I: NodeIndex> Extend<T> for PooledList<T, I> {
    fn extend<It: IntoIterator<Item = T>>(&mut self, iter: It) {
        let iter = iter.into_iter();
        self.pool.reserve(iter.size_hint().0);
        for item in iter {
            self.push_back(item);
        }
    }
}

impl<'a, T: Copy + 'a, I: NodeIndex> Extend<&'a T> for PooledList<T, I> {
    fn extend<It: IntoIterator<Item = &'a T>>(&mut self, iter: It) {
        self.extend(iter.into_iter().copied());
    }
}

impl<T, I: NodeIndex> FromIterator<T> for PooledList<T, I> {
    fn from_iter<It: IntoIterator<Item = T>>(iter: It) -> Self {
        let mut list = Self::new();
        list.extend(iter);
        list
    }
}

impl<T, I: NodeIndex> IntoIterator for PooledList<T, I> {
    type Item = T;
    type IntoIter = IntoIter<T, I>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self)
    }
}

impl<'a, T, I: NodeIndex> IntoIterator for &'a PooledList<T, I> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T, I>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T, I: NodeIndex> IntoIterator for &'a mut PooledList<T, I> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T, I>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::rc::Rc;

    fn values<T: Clone, I: NodeIndex>(list: &PooledList<T, I>) -> Vec<T> {
        list.iter().cloned().collect()
    }

    fn arena_items<T: Clone, I: NodeIndex>(list: &PooledList<T, I>) -> Vec<Option<T>> {
        list.pool().items().map(|item| item.cloned()).collect()
    }

    fn arena_nexts<T, I: NodeIndex>(list: &PooledList<T, I>) -> Vec<I> {
        list.pool().nexts().collect()
    }

    const NONE: u32 = u32::NONE;

    #[test]
    fn new_list_is_empty() {
        let list: PooledList<String> = PooledList::new();

        assert!(list.is_empty());
        assert_eq!(list.len(), 0);
        assert!(list.head().is_none());
        assert!(list.tail().is_none());
        assert_eq!(list.iter().next(), None);
        assert!(list.pool().is_empty());
    }

    #[test]
    fn push_front_once() {
        let mut list: PooledList<_> = PooledList::new();
        list.push_front("a");

        assert_eq!(list.len(), 1);
        assert_eq!(values(&list), vec!["a"]);
        assert_eq!(arena_items(&list), vec![Some("a")]);
        assert_eq!(arena_nexts(&list), vec![NONE]);
        assert_eq!(list.head(), list.tail());
    }

    #[test]
    fn push_front_several() {
        let mut list: PooledList<_> = PooledList::new();
        list.push_front("a");
        list.push_front("b");
        list.push_front("c");

        assert_eq!(list.len(), 3);
        assert_eq!(values(&list), vec!["c", "b", "a"]);

        // slot 2 -> slot 1 -> slot 0 -> end
        assert_eq!(arena_items(&list), vec![Some("a"), Some("b"), Some("c")]);
        assert_eq!(arena_nexts(&list), vec![NONE, 0, 1]);
        assert_eq!(list.head(), 2);
        assert_eq!(list.tail(), 0);
    }

    #[test]
    fn push_back_once() {
        let mut list: PooledList<_> = PooledList::new();
        list.push_back("a");

        assert_eq!(list.len(), 1);
        assert_eq!(values(&list), vec!["a"]);
        assert_eq!(arena_items(&list), vec![Some("a")]);
        assert_eq!(arena_nexts(&list), vec![NONE]);
    }

    #[test]
    fn push_back_several() {
        let mut list: PooledList<_> = PooledList::new();
        list.push_back("a");
        list.push_back("b");
        list.push_back("c");

        assert_eq!(list.len(), 3);
        assert_eq!(values(&list), vec!["a", "b", "c"]);
        assert_eq!(arena_items(&list), vec![Some("a"), Some("b"), Some("c")]);
        assert_eq!(arena_nexts(&list), vec![1, 2, NONE]);
    }

    #[test]
    fn pop_front_not_empty() {
        let mut list: PooledList<_> = PooledList::new();
        list.push_back("a");
        list.push_back("b");
        list.push_back("c");

        assert_eq!(list.pop_front(), Some("a"));

        assert_eq!(list.len(), 2);
        assert_eq!(values(&list), vec!["b", "c"]);
        assert_eq!(arena_items(&list), vec![None, Some("b"), Some("c")]);
        assert_eq!(arena_nexts(&list), vec![NONE, 2, NONE]);
        assert_eq!(list.pool().free_head(), 0);
    }

    #[test]
    fn pop_front_releases_reference() {
        let a = Rc::new("a");
        let mut list: PooledList<_> = PooledList::new();
        list.push_back(Rc::clone(&a));
        list.push_back(Rc::new("b"));

        let popped = list.pop_front();
        assert_eq!(Rc::strong_count(&a), 2);
        drop(popped);

        // Nothing left in the arena holds "a".
        assert_eq!(Rc::strong_count(&a), 1);
    }

    #[test]
    fn pop_front_empty() {
        let mut list: PooledList<u64> = PooledList::new();

        assert_eq!(list.pop_front(), None);
        assert_eq!(list.pop_front(), None);
        assert_eq!(list.len(), 0);
    }

    #[test]
    fn pop_front_last_resets_tail() {
        let mut list: PooledList<_> = PooledList::new();
        list.push_back(1);

        assert_eq!(list.pop_front(), Some(1));
        assert!(list.head().is_none());
        assert!(list.tail().is_none());

        list.push_back(2);
        assert_eq!(list.front(), Some(&2));
        assert_eq!(list.back(), Some(&2));
    }

    #[test]
    fn stack_is_lifo() {
        let mut list: PooledList<_> = PooledList::new();
        for i in 0..5 {
            list.push_front(i);
        }

        let popped: Vec<_> = std::iter::from_fn(|| list.pop_front()).collect();
        assert_eq!(popped, vec![4, 3, 2, 1, 0]);
    }

    #[test]
    fn queue_is_fifo() {
        let mut list: PooledList<_> = PooledList::new();
        for i in 0..5 {
            list.push_back(i);
        }

        let popped: Vec<_> = std::iter::from_fn(|| list.pop_front()).collect();
        assert_eq!(popped, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn mixed_push_ends() {
        let mut list: PooledList<_> = PooledList::new();
        list.push_back(2);
        list.push_front(1);
        list.push_back(3);
        list.push_front(0);

        assert_eq!(values(&list), vec![0, 1, 2, 3]);
        assert_eq!(list.front(), Some(&0));
        assert_eq!(list.back(), Some(&3));
    }

    #[test]
    fn slot_reuse_after_drain() {
        let mut list: PooledList<_> = PooledList::new();
        for i in 0..4 {
            list.push_back(i);
        }
        while list.pop_front().is_some() {}

        assert_eq!(list.pool().len(), 4);
        assert_eq!(list.pool().free_len(), 4);

        for i in 10..14 {
            list.push_back(i);
        }

        // Freed slots come back in the order they were freed.
        assert_eq!(list.pool().len(), 4);
        assert_eq!(arena_nexts(&list), vec![1, 2, 3, NONE]);
        assert_eq!(values(&list), vec![10, 11, 12, 13]);
    }

    #[test]
    fn remove_first_middle() {
        let mut list: PooledList<u64> = (1..=5).collect();

        assert_eq!(list.remove_first(|&x| x == 3), Some(3));
        assert_eq!(values(&list), vec![1, 2, 4, 5]);
        assert_eq!(list.len(), 4);
        assert!(list.pool().is_vacant(2));
        assert_eq!(list.pool().get_next(1), 3);
    }

    #[test]
    fn remove_first_head_and_tail() {
        let mut list: PooledList<u64> = (1..=3).collect();

        assert_eq!(list.remove_first(|&x| x == 1), Some(1));
        assert_eq!(list.front(), Some(&2));

        assert_eq!(list.remove_first(|&x| x == 3), Some(3));
        assert_eq!(list.back(), Some(&2));
        assert_eq!(list.head(), list.tail());

        assert_eq!(list.remove_first(|&x| x == 2), Some(2));
        assert!(list.is_empty());
        assert!(list.head().is_none());
        assert!(list.tail().is_none());
    }

    #[test]
    fn remove_first_takes_leftmost() {
        let mut list: PooledList<&str> = ["x", "a", "x"].into_iter().collect();

        assert_eq!(list.remove_first(|&s| s == "x"), Some("x"));
        assert_eq!(values(&list), vec!["a", "x"]);
    }

    #[test]
    fn remove_first_no_match() {
        let mut list: PooledList<u64> = (1..=3).collect();
        let before_free = list.pool().free_len();

        assert_eq!(list.remove_first(|&x| x > 10), None);
        assert_eq!(values(&list), vec![1, 2, 3]);
        assert_eq!(list.pool().free_len(), before_free);
    }

    #[test]
    fn remove_first_visits_in_order() {
        let list_values = [5, 6, 7, 8];
        let mut list: PooledList<u64> = list_values.into_iter().collect();
        let mut seen = Vec::new();

        list.remove_first(|&x| {
            seen.push(x);
            x == 7
        });

        assert_eq!(seen, vec![5, 6, 7]);
    }

    #[test]
    fn remove_all_unbounded() {
        let mut list: PooledList<u64> = (1..=10).collect();

        assert_eq!(list.remove_all(|&x| x % 2 == 0), 5);
        assert_eq!(values(&list), vec![1, 3, 5, 7, 9]);
        assert_eq!(list.len(), 5);
        assert_eq!(list.back(), Some(&9));
        assert_eq!(list.pool().free_len(), 5);
    }

    #[test]
    fn remove_all_adjacent_matches() {
        let mut list: PooledList<u64> = [1, 2, 2, 2, 3, 2].into_iter().collect();

        assert_eq!(list.remove_all(|&x| x == 2), 4);
        assert_eq!(values(&list), vec![1, 3]);
        assert_eq!(list.back(), Some(&3));
    }

    #[test]
    fn remove_all_everything() {
        let mut list: PooledList<u64> = (1..=4).collect();

        assert_eq!(list.remove_all(|_| true), 4);
        assert!(list.is_empty());
        assert!(list.head().is_none());
        assert!(list.tail().is_none());

        list.push_back(9);
        assert_eq!(values(&list), vec![9]);
    }

    #[test]
    fn remove_up_to_caps_leftmost() {
        let mut list: PooledList<u64> = (1..=10).collect();

        assert_eq!(list.remove_up_to(2, |&x| x % 3 == 0), 2);
        assert_eq!(values(&list), vec![1, 2, 4, 5, 7, 8, 10]);

        assert_eq!(list.remove_up_to(5, |&x| x > 7), 2);
        assert_eq!(values(&list), vec![1, 2, 4, 5, 7]);
    }

    #[test]
    fn remove_up_to_zero_is_unbounded() {
        let mut list: PooledList<u64> = (1..=6).collect();

        assert_eq!(list.remove_up_to(0, |&x| x > 2), 4);
        assert_eq!(values(&list), vec![1, 2]);
    }

    #[test]
    fn remove_all_no_match_is_ok() {
        let mut list: PooledList<u64> = (1..=3).collect();
        assert_eq!(list.remove_all(|&x| x > 100), 0);
        assert_eq!(list.len(), 3);

        let mut empty: PooledList<u64> = PooledList::new();
        assert_eq!(empty.remove_all(|_| true), 0);
    }

    #[test]
    fn remove_item_default_equality() {
        let mut list: PooledList<String> =
            ["a", "b", "a"].into_iter().map(String::from).collect();

        assert!(list.remove_item(&"a".to_string()));
        assert_eq!(values(&list), vec!["b", "a"]);
        assert!(!list.remove_item(&"z".to_string()));
    }

    #[test]
    fn remove_item_custom_equality() {
        let mut list: PooledList<String> =
            ["Alpha", "beta"].into_iter().map(String::from).collect();

        assert!(list.remove_item_by(&"BETA".to_string(), |a, b| a.eq_ignore_ascii_case(b)));
        assert_eq!(values(&list), vec!["Alpha"]);
    }

    #[test]
    fn contains_scans() {
        let list: PooledList<u64> = (1..=3).collect();

        assert!(list.contains(&2));
        assert!(!list.contains(&4));
    }

    #[test]
    fn clear_returns_slots() {
        let mut list: PooledList<_> = PooledList::new();
        list.push_back("a");
        list.push_back("b");
        list.push_back("c");

        list.clear();

        assert!(list.is_empty());
        assert_eq!(list.iter().count(), 0);
        assert_eq!(arena_items(&list), vec![None, None, None]);
        assert_eq!(list.pool().free_len(), 3);

        list.push_back("d");
        assert_eq!(list.head(), 0);
        assert_eq!(list.pool().len(), 3);
    }

    #[test]
    fn clear_appends_after_existing_free_slots() {
        let mut list: PooledList<u64> = (0..4).collect();
        list.pop_front(); // frees slot 0

        list.clear();

        let free: Vec<_> = list.pool().free_indices().collect();
        assert_eq!(free, vec![0, 1, 2, 3]);
    }

    #[test]
    fn clear_empty_is_noop() {
        let mut list: PooledList<u64> = PooledList::new();
        list.clear();
        assert!(list.is_empty());
        assert!(list.pool().is_empty());
    }

    #[test]
    fn clear_drops_items() {
        let shared = Rc::new(());
        let mut list: PooledList<_> = PooledList::new();
        for _ in 0..3 {
            list.push_front(Rc::clone(&shared));
        }
        assert_eq!(Rc::strong_count(&shared), 4);

        list.clear();
        assert_eq!(Rc::strong_count(&shared), 1);
    }

    #[test]
    fn clear_with_panicking_drop_leaves_list_usable() {
        use std::panic::{AssertUnwindSafe, catch_unwind};

        struct Fragile(u64);
        impl Drop for Fragile {
            fn drop(&mut self) {
                if self.0 == 2 {
                    panic!("fragile item dropped");
                }
            }
        }

        let mut list: PooledList<Fragile> = PooledList::new();
        for i in 1..=3 {
            list.push_back(Fragile(i));
        }

        assert!(catch_unwind(AssertUnwindSafe(|| list.clear())).is_err());

        assert!(list.is_empty());
        assert!(list.head().is_none() && list.tail().is_none());
        assert_eq!(list.pool().free_len(), 3);
        assert_eq!(list.pool().live_len(), 0);

        for i in 10..13 {
            list.push_back(Fragile(i));
        }
        assert_eq!(list.iter().map(|f| f.0).collect::<Vec<_>>(), vec![10, 11, 12]);
        assert_eq!(list.pool().len(), 3);
    }

    #[test]
    fn reset_restarts_indices() {
        let mut list: PooledList<u64> = (0..4).collect();

        list.reset();
        assert!(list.is_empty());
        assert!(list.pool().is_empty());

        list.push_back(7);
        assert_eq!(list.head(), 0);
    }

    #[test]
    fn front_back_mut() {
        let mut list: PooledList<u64> = (1..=3).collect();

        *list.front_mut().unwrap() = 10;
        *list.back_mut().unwrap() = 30;
        assert_eq!(values(&list), vec![10, 2, 30]);

        let mut empty: PooledList<u64> = PooledList::new();
        assert!(empty.front_mut().is_none());
        assert!(empty.back_mut().is_none());
    }

    #[test]
    fn copy_to_with_offset() {
        let list: PooledList<u64> = (1..=3).collect();
        let mut dest = [0u64; 5];

        list.copy_to(&mut dest, 1);
        assert_eq!(dest, [0, 1, 2, 3, 0]);
    }

    #[test]
    fn try_copy_to_too_short() {
        let list: PooledList<u64> = (1..=3).collect();
        let mut dest = [0u64; 4];

        let err = list.try_copy_to(&mut dest, 2).unwrap_err();
        assert_eq!(
            err,
            CopyError {
                offset: 2,
                required: 3,
                dest_len: 4
            }
        );
        assert_eq!(dest, [0; 4]);

        assert!(list.try_copy_to(&mut dest, usize::MAX).is_err());
    }

    #[test]
    #[should_panic(expected = "cannot copy 3 items at offset 0")]
    fn copy_to_too_short_panics() {
        let list: PooledList<u64> = (1..=3).collect();
        let mut dest = [0u64; 2];
        list.copy_to(&mut dest, 0);
    }

    #[test]
    fn try_push_full() {
        let mut list: PooledList<u64, u8> = PooledList::new();
        for i in 0..255 {
            list.try_push_back(i).unwrap();
        }

        assert_eq!(list.try_push_back(255).unwrap_err().into_inner(), 255);
        assert_eq!(list.try_push_front(256).unwrap_err().into_inner(), 256);
        assert_eq!(list.len(), 255);

        list.pop_front();
        assert!(list.try_push_front(0).is_ok());
        assert_eq!(list.front(), Some(&0));
    }

    #[test]
    fn small_index_type() {
        let mut list: PooledList<&str, u16> = PooledList::new();
        list.push_back("a");
        list.push_front("b");

        assert_eq!(values(&list), vec!["b", "a"]);
        assert_eq!(list.head(), 1u16);
    }

    #[test]
    fn debug_format() {
        let list: PooledList<u64> = (1..=3).collect();
        assert_eq!(format!("{list:?}"), "[1, 2, 3]");
    }

    #[test]
    fn clone_is_compact() {
        let mut list: PooledList<u64> = (0..6).collect();
        list.remove_all(|&x| x % 2 == 0);

        let copy = list.clone();

        assert_eq!(copy, list);
        assert_eq!(copy.pool().len(), 3);
        assert_eq!(copy.pool().free_len(), 0);
        assert_eq!(list.pool().len(), 6);
    }

    #[test]
    fn eq_ignores_layout() {
        let mut a: PooledList<u64> = PooledList::new();
        a.push_back(2);
        a.push_front(1);

        let b: PooledList<u64> = [1, 2].into_iter().collect();

        assert_eq!(a, b);
        assert_ne!(a, [1, 2, 3].into_iter().collect::<PooledList<u64>>());
    }

    #[test]
    fn extend_by_ref() {
        let mut list: PooledList<u64> = PooledList::new();
        list.extend(&[1, 2, 3]);
        list.extend(vec![4]);

        assert_eq!(values(&list), vec![1, 2, 3, 4]);
    }

    #[test]
    fn drop_cleans_up() {
        use std::sync::atomic::{AtomicUsize, Ordering};

        static DROP_COUNT: AtomicUsize = AtomicUsize::new(0);

        struct DropCounter;
        impl Drop for DropCounter {
            fn drop(&mut self) {
                DROP_COUNT.fetch_add(1, Ordering::SeqCst);
            }
        }

        DROP_COUNT.store(0, Ordering::SeqCst);

        {
            let mut list: PooledList<_> = PooledList::new();
            for _ in 0..5 {
                list.push_back(DropCounter);
            }
            assert_eq!(list.remove_up_to(2, |_| true), 2);
            assert_eq!(DROP_COUNT.load(Ordering::SeqCst), 2);
        }

        assert_eq!(DROP_COUNT.load(Ordering::SeqCst), 5);
    }
}
