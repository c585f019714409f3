//! Singly-linked list with pooled node storage.
//!
//! `std::collections::LinkedList` allocates every node separately. Nodes end
//! up scattered across the heap, and every push and pop goes through the
//! allocator. This crate keeps the linked-list shape but moves the nodes
//! into one contiguous arena:
//!
//! ```text
//! LinkedList<T>  - one heap allocation per node, pointer links
//! PooledList<T>  - nodes in a Vec arena, integer links, freed slots recycled
//! ```
//!
//! Benefits:
//! - **No per-node allocation**: a warmed-up list pushes and pops without
//!   touching the allocator
//! - **Locality**: nodes sit next to each other in one `Vec`
//! - **O(1) ends**: push at either end, pop at the front
//! - **Compact links**: `u32` indices by default, `u16`/`u8` for small lists
//!
//! # Quick Start
//!
//! ```
//! use nexus_pooled::PooledList;
//!
//! let mut queue: PooledList<u64> = PooledList::with_capacity(1000);
//!
//! queue.push_back(1);
//! queue.push_back(2);
//! queue.push_back(3);
//!
//! assert_eq!(queue.pop_front(), Some(1));
//! assert_eq!(queue.remove_first(|&x| x == 3), Some(3));
//! assert_eq!(queue.len(), 1);
//! ```
//!
//! # Layout
//!
//! ```text
//! PooledList { head, tail, len }
//!     │
//!     └── NodePool
//!           nodes:     [ (item, next) (item, next) (item, next) ... ]
//!           free list: free_head ─▶ ... ─▶ free_tail   (through `next`)
//! ```
//!
//! A slot is either on the list's chain or on the pool's free list. Freed
//! slots are appended at the free tail and reused from the free head, so
//! the oldest freed slot is recycled first.
//!
//! # Singly Linked
//!
//! There are no `prev` links. The list supports `push_front`, `push_back`
//! and `pop_front` in O(1); removing from the middle
//! ([`remove_first`](PooledList::remove_first),
//! [`remove_all`](PooledList::remove_all)) is a front-to-back scan.
//!
//! # Thread Safety
//!
//! Neither [`PooledList`] nor [`NodePool`] lock internally. They are `Send`
//! and `Sync` when `T` is; concurrent mutation needs external
//! synchronization.
//!
//! # Feature Flags
//!
//! - `tracing` - Emit `tracing` events on cold paths (arena growth, chain
//!   frees, resets)

#![warn(missing_docs)]

pub mod collection;
pub mod error;
pub mod index;
pub mod iter;
pub mod list;
pub mod pool;

mod trace;

#[cfg(test)]
mod latency;

pub use collection::Collection;
pub use error::{CopyError, Full};
pub use index::NodeIndex;
pub use iter::{IntoIter, Iter, IterMut};
pub use list::PooledList;
pub use pool::NodePool;
