//! Node arena with a FIFO free list.
//!
//! The pool stores list nodes in one growable `Vec` and hands out integer
//! indices instead of pointers. Freed slots are never removed from the
//! arena; they are threaded onto a free list through the same `next` field
//! live nodes use, and the next [`store`](NodePool::store) picks them up.
//!
//! # Slot states
//!
//! ```text
//! live  - item: Some(T), reachable from the owning list's head
//! free  - item: None,    reachable from the pool's free head
//! ```
//!
//! The free list is FIFO: slots are appended at the free tail and reused
//! from the free head, so the oldest freed slot is recycled first.
//!
//! # Example
//!
//! ```
//! use nexus_pooled::NodePool;
//!
//! let mut pool: NodePool<&str> = NodePool::new();
//!
//! let a = pool.store("a");
//! let b = pool.store("b");
//! pool.set_next(a, b);
//!
//! assert_eq!(pool.get_node(a), (&"a", b));
//!
//! // Freed slots are recycled before the arena grows.
//! assert_eq!(pool.free(a), "a");
//! let c = pool.store("c");
//! assert_eq!(c, a);
//! assert_eq!(pool.len(), 2);
//! ```

use std::marker::PhantomData;

use crate::error::Full;
use crate::index::NodeIndex;
use crate::trace::{debug_event, trace_event};

/// A slot in the arena.
#[derive(Debug, Clone)]
struct Node<T, I> {
    item: Option<T>,
    next: I,
}

/// Growable arena of singly-linked node slots with slot recycling.
///
/// Accessors take a slot index and panic if it is out of range, the same
/// way slice indexing does. Item readers and writers additionally panic on
/// free slots; link accessors (`get_next`/`set_next`) work on any allocated
/// slot.
///
/// # Type Parameters
///
/// - `T`: Item type
/// - `I`: Index type (default `u32`); bounds the arena at `I::NONE` slots
#[derive(Debug)]
pub struct NodePool<T, I: NodeIndex = u32> {
    nodes: Vec<Node<T, I>>,
    free_head: I,
    free_tail: I,
    free_len: usize,
}

impl<T, I: NodeIndex> Default for NodePool<T, I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, I: NodeIndex> NodePool<T, I> {
    /// Creates an empty pool. Does not allocate.
    #[inline]
    pub const fn new() -> Self {
        Self {
            nodes: Vec::new(),
            free_head: I::NONE,
            free_tail: I::NONE,
            free_len: 0,
        }
    }

    /// Creates an empty pool with room for `capacity` slots before the
    /// arena reallocates.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity.min(I::MAX_SLOTS)),
            free_head: I::NONE,
            free_tail: I::NONE,
            free_len: 0,
        }
    }

    /// Reserves room for at least `additional` more arena slots.
    pub fn reserve(&mut self, additional: usize) {
        self.nodes.reserve(additional);
    }

    /// Returns the number of slots in the arena, live and free.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the arena has no slots at all.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the number of slots the arena can hold without reallocating.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    /// Returns the number of slots on the free list.
    #[inline]
    pub fn free_len(&self) -> usize {
        self.free_len
    }

    /// Returns the number of slots currently holding an item.
    #[inline]
    pub fn live_len(&self) -> usize {
        self.nodes.len() - self.free_len
    }

    /// Returns the first slot the next `store` will reuse, or `NONE`.
    #[inline]
    pub fn free_head(&self) -> I {
        self.free_head
    }

    /// Returns the most recently freed slot, or `NONE`.
    #[inline]
    pub fn free_tail(&self) -> I {
        self.free_tail
    }

    /// Returns `true` if slot `id` holds no item.
    ///
    /// # Panics
    ///
    /// Panics if `id` is out of range.
    #[inline]
    pub fn is_vacant(&self, id: I) -> bool {
        self.nodes[id.as_usize()].item.is_none()
    }

    // ========================================================================
    // Slot accessors
    // ========================================================================

    /// Returns a reference to the item in slot `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` is out of range or the slot is free.
    #[inline]
    pub fn get_item(&self, id: I) -> &T {
        match &self.nodes[id.as_usize()].item {
            Some(item) => item,
            None => vacant_slot(id),
        }
    }

    /// Returns a mutable reference to the item in slot `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` is out of range or the slot is free.
    #[inline]
    pub fn get_item_mut(&mut self, id: I) -> &mut T {
        match &mut self.nodes[id.as_usize()].item {
            Some(item) => item,
            None => vacant_slot(id),
        }
    }

    /// Replaces the item in live slot `id`, returning the previous one.
    ///
    /// Only [`store`](Self::store) brings a free slot back to life.
    ///
    /// # Panics
    ///
    /// Panics if `id` is out of range or the slot is free.
    #[inline]
    pub fn set_item(&mut self, id: I, item: T) -> T {
        match &mut self.nodes[id.as_usize()].item {
            Some(slot) => core::mem::replace(slot, item),
            None => vacant_slot(id),
        }
    }

    /// Returns the forward link of slot `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` is out of range.
    #[inline]
    pub fn get_next(&self, id: I) -> I {
        self.nodes[id.as_usize()].next
    }

    /// Sets the forward link of slot `id`.
    ///
    /// Works on free slots too; relinking a free slot reshapes the free
    /// list, so callers must keep it a single chain ending at `free_tail`.
    ///
    /// # Panics
    ///
    /// Panics if `id` is out of range.
    #[inline]
    pub fn set_next(&mut self, id: I, next: I) {
        self.nodes[id.as_usize()].next = next;
    }

    /// Returns the item and forward link of slot `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` is out of range or the slot is free.
    #[inline]
    pub fn get_node(&self, id: I) -> (&T, I) {
        let node = &self.nodes[id.as_usize()];
        match &node.item {
            Some(item) => (item, node.next),
            None => vacant_slot(id),
        }
    }

    /// Overwrites both the item and the forward link of live slot `id`,
    /// returning the previous item.
    ///
    /// # Panics
    ///
    /// Panics if `id` is out of range or the slot is free.
    #[inline]
    pub fn set_node(&mut self, id: I, item: T, next: I) -> T {
        let node = &mut self.nodes[id.as_usize()];
        match &mut node.item {
            Some(slot) => {
                node.next = next;
                core::mem::replace(slot, item)
            }
            None => vacant_slot(id),
        }
    }

    // ========================================================================
    // Allocation
    // ========================================================================

    /// Stores `item` in a slot with `next = NONE` and returns its index.
    ///
    /// Reuses the free head if there is one, otherwise appends to the arena.
    ///
    /// # Panics
    ///
    /// Panics if the arena already holds `I::NONE` slots and none is free.
    #[inline]
    pub fn store(&mut self, item: T) -> I {
        match self.try_store(item) {
            Ok(id) => id,
            Err(_) => index_space_exhausted::<I>(),
        }
    }

    /// Stores `item`, returning `Err(Full(item))` when no slot index is left.
    #[inline]
    pub fn try_store(&mut self, item: T) -> Result<I, Full<T>> {
        let head = self.free_head;
        if head.is_none() {
            self.store_new(item)
        } else {
            Ok(self.store_at(head, item))
        }
    }

    fn store_new(&mut self, item: T) -> Result<I, Full<T>> {
        let slot = self.nodes.len();
        let Some(id) = I::try_from_usize(slot) else {
            return Err(Full(item));
        };

        if slot == self.nodes.capacity() {
            trace_event!(slots = slot, "node pool arena growing");
        }

        self.nodes.push(Node {
            item: Some(item),
            next: I::NONE,
        });
        Ok(id)
    }

    /// Pops the free head. `id` must equal `self.free_head`.
    #[inline]
    fn store_at(&mut self, id: I, item: T) -> I {
        debug_assert!(id == self.free_head);

        let node = &mut self.nodes[id.as_usize()];
        debug_assert!(node.item.is_none(), "free slot holds an item");

        let next = node.next;
        node.item = Some(item);
        node.next = I::NONE;

        self.free_head = next;
        if next.is_none() {
            self.free_tail = I::NONE;
        }
        self.free_len -= 1;

        id
    }

    // ========================================================================
    // Release
    // ========================================================================

    /// Returns slot `id` to the tail of the free list and hands back its item.
    ///
    /// The caller must already have unlinked the slot from any chain.
    ///
    /// # Panics
    ///
    /// Panics if `id` is out of range or the slot is already free.
    #[inline]
    pub fn free(&mut self, id: I) -> T {
        debug_assert!(id.is_some(), "free called with NONE");

        let node = &mut self.nodes[id.as_usize()];
        let Some(item) = node.item.take() else {
            vacant_slot(id)
        };
        node.next = I::NONE;

        self.append_free(id, id);
        self.free_len += 1;
        item
    }

    /// Returns a whole chain of live slots to the free list.
    ///
    /// `head..=tail` must be a chain linked through `next`, with
    /// `tail`'s `next == NONE`. The chain is spliced onto the free tail in
    /// one step, then walked once to drop every item it held. Returns the
    /// number of slots freed.
    ///
    /// If an item's destructor panics, the rest of the chain is still
    /// emptied and counted before the panic propagates, so the pool stays
    /// consistent.
    ///
    /// # Panics
    ///
    /// Panics if the chain runs off the arena before reaching `tail`, or if
    /// an item's destructor panics.
    pub fn free_chain(&mut self, head: I, tail: I) -> usize {
        debug_assert!(head.is_some() && tail.is_some(), "free_chain on empty chain");
        debug_assert!(self.get_next(tail).is_none(), "chain tail has a successor");

        self.append_free(head, tail);

        let freed = {
            let mut drain = ChainDrain {
                pool: self,
                cursor: head,
                tail,
                freed: 0,
            };
            while drain.release_next() {}
            drain.freed
        };

        trace_event!(freed, free_len = self.free_len, "node chain returned to pool");
        freed
    }

    /// Links `first..=last` after the current free tail.
    #[inline]
    fn append_free(&mut self, first: I, last: I) {
        if self.free_tail.is_none() {
            self.free_head = first;
        } else {
            self.nodes[self.free_tail.as_usize()].next = first;
        }
        self.free_tail = last;
    }

    /// Drops every item and every slot. Indices restart at 0.
    ///
    /// The arena keeps its allocation for reuse.
    pub fn reset(&mut self) {
        debug_event!(slots = self.nodes.len(), "node pool reset");

        // Free list first: `clear` may unwind out of an item's destructor.
        self.free_head = I::NONE;
        self.free_tail = I::NONE;
        self.free_len = 0;
        self.nodes.clear();
    }

    // ========================================================================
    // Introspection
    // ========================================================================

    /// Returns the stored items in arena order, `None` for free slots.
    pub fn items(&self) -> impl ExactSizeIterator<Item = Option<&T>> + '_ {
        self.nodes.iter().map(|node| node.item.as_ref())
    }

    /// Returns the forward links in arena order.
    pub fn nexts(&self) -> impl ExactSizeIterator<Item = I> + '_ {
        self.nodes.iter().map(|node| node.next)
    }

    /// Returns the free slots in reuse order.
    pub fn free_indices(&self) -> impl Iterator<Item = I> + '_ {
        let first = Some(self.free_head).filter(|id| id.is_some());
        core::iter::successors(first, move |&id| {
            Some(self.nodes[id.as_usize()].next).filter(|next| next.is_some())
        })
    }

    #[inline]
    pub(crate) fn slots_mut(&mut self) -> SlotsMut<'_, T, I> {
        SlotsMut {
            ptr: self.nodes.as_mut_ptr(),
            len: self.nodes.len(),
            _marker: PhantomData,
        }
    }
}

/// Empties the slots of a chain that is already on the free list.
///
/// Each slot is counted as free before its item is dropped. If a drop
/// panics, `Drop` finishes the remaining slots during unwinding.
struct ChainDrain<'a, T, I: NodeIndex> {
    pool: &'a mut NodePool<T, I>,
    cursor: I,
    tail: I,
    freed: usize,
}

impl<T, I: NodeIndex> ChainDrain<'_, T, I> {
    /// Empties the slot under the cursor. Returns `false` once past `tail`.
    fn release_next(&mut self) -> bool {
        let id = self.cursor;
        if id.is_none() {
            return false;
        }

        let node = &mut self.pool.nodes[id.as_usize()];
        self.cursor = if id == self.tail { I::NONE } else { node.next };
        let item = node.item.take();
        debug_assert!(item.is_some(), "chain contains a free slot");

        self.pool.free_len += 1;
        self.freed += 1;
        drop(item);
        true
    }
}

impl<T, I: NodeIndex> Drop for ChainDrain<'_, T, I> {
    fn drop(&mut self) {
        while self.release_next() {}
    }
}

/// Raw mutable view of the arena for iterators that hand out `&mut T` to
/// several slots at once.
///
/// All slot references are derived from one base pointer taken while the
/// pool is mutably borrowed for `'a`, so references to distinct slots never
/// alias.
pub(crate) struct SlotsMut<'a, T, I> {
    ptr: *mut Node<T, I>,
    len: usize,
    _marker: PhantomData<&'a mut [Node<T, I>]>,
}

impl<'a, T, I: NodeIndex> SlotsMut<'a, T, I> {
    /// Returns the item and forward link of slot `id`.
    ///
    /// # Safety
    ///
    /// No reference to slot `id` obtained from this view may still be alive.
    ///
    /// # Panics
    ///
    /// Panics if `id` is out of range or the slot is free.
    #[inline]
    pub(crate) unsafe fn get_mut(&mut self, id: I) -> (&'a mut T, I) {
        let i = id.as_usize();
        assert!(i < self.len, "slot {id:?} out of range");

        // Safety: in range, and the caller guarantees exclusive access.
        let node = unsafe { &mut *self.ptr.add(i) };
        let next = node.next;
        match node.item.as_mut() {
            Some(item) => (item, next),
            None => vacant_slot(id),
        }
    }
}

// Safety: SlotsMut behaves like `&'a mut [Node<T, I>]`.
unsafe impl<T: Send, I: Send> Send for SlotsMut<'_, T, I> {}
unsafe impl<T: Sync, I: Sync> Sync for SlotsMut<'_, T, I> {}

#[cold]
#[inline(never)]
fn vacant_slot<I: NodeIndex>(id: I) -> ! {
    panic!("slot {id:?} is vacant")
}

#[cold]
#[inline(never)]
fn index_space_exhausted<I: NodeIndex>() -> ! {
    panic!(
        "node pool index space exhausted ({} slots)",
        I::MAX_SLOTS
    )
}
