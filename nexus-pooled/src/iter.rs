//! Forward-only iterators over a [`PooledList`].
//!
//! Each iterator walks `next` links from the head the list had when the
//! iterator was created. There is no rewind; to iterate again, ask the list
//! for a fresh iterator.
//!
//! Iterators borrow the list, so the list cannot be structurally modified
//! while one is alive:
//!
//! ```compile_fail
//! use nexus_pooled::PooledList;
//!
//! let mut list: PooledList<u64> = (1..=3).collect();
//! for item in list.iter() {
//!     list.push_back(*item); // ERROR: `list` is borrowed by the iterator
//! }
//! ```

use core::iter::FusedIterator;

use crate::index::NodeIndex;
use crate::list::PooledList;
use crate::pool::{NodePool, SlotsMut};

/// Iterator over references to list elements, front to back.
///
/// Created by [`PooledList::iter`].
pub struct Iter<'a, T, I: NodeIndex = u32> {
    pool: &'a NodePool<T, I>,
    next: I,
    remaining: usize,
}

impl<'a, T, I: NodeIndex> Iter<'a, T, I> {
    #[inline]
    pub(crate) fn new(pool: &'a NodePool<T, I>, head: I, len: usize) -> Self {
        Self {
            pool,
            next: head,
            remaining: len,
        }
    }
}

impl<T, I: NodeIndex> Clone for Iter<'_, T, I> {
    fn clone(&self) -> Self {
        Self {
            pool: self.pool,
            next: self.next,
            remaining: self.remaining,
        }
    }
}

impl<'a, T, I: NodeIndex> Iterator for Iter<'a, T, I> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.next.is_none() {
            return None;
        }

        let (item, next) = self.pool.get_node(self.next);
        self.next = next;
        self.remaining -= 1;
        Some(item)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T, I: NodeIndex> ExactSizeIterator for Iter<'_, T, I> {}

impl<T, I: NodeIndex> FusedIterator for Iter<'_, T, I> {}

/// Iterator over mutable references to list elements, front to back.
///
/// Created by [`PooledList::iter_mut`].
pub struct IterMut<'a, T, I: NodeIndex = u32> {
    slots: SlotsMut<'a, T, I>,
    next: I,
    remaining: usize,
}

impl<'a, T, I: NodeIndex> IterMut<'a, T, I> {
    #[inline]
    pub(crate) fn new(pool: &'a mut NodePool<T, I>, head: I, len: usize) -> Self {
        Self {
            slots: pool.slots_mut(),
            next: head,
            remaining: len,
        }
    }
}

impl<'a, T, I: NodeIndex> Iterator for IterMut<'a, T, I> {
    type Item = &'a mut T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.next.is_none() {
            return None;
        }

        // Safety: `next` comes from the list's chain, which only holds live
        // in-range slots and visits each slot once.
        let (item, next) = unsafe { self.slots.get_mut(self.next) };
        self.next = next;
        self.remaining -= 1;
        Some(item)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T, I: NodeIndex> ExactSizeIterator for IterMut<'_, T, I> {}

impl<T, I: NodeIndex> FusedIterator for IterMut<'_, T, I> {}

/// Owning iterator that pops elements off the front.
///
/// Created by [`PooledList::into_iter`](IntoIterator::into_iter).
pub struct IntoIter<T, I: NodeIndex = u32> {
    list: PooledList<T, I>,
}

impl<T, I: NodeIndex> IntoIter<T, I> {
    #[inline]
    pub(crate) fn new(list: PooledList<T, I>) -> Self {
        Self { list }
    }
}

impl<T, I: NodeIndex> Iterator for IntoIter<T, I> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.list.pop_front()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.list.len(), Some(self.list.len()))
    }
}

impl<T, I: NodeIndex> ExactSizeIterator for IntoIter<T, I> {}

impl<T, I: NodeIndex> FusedIterator for IntoIter<T, I> {}
