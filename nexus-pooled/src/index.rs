//! Slot index types for the node pool.
//!
//! A [`NodePool`](crate::NodePool) addresses its slots with a plain unsigned
//! integer. The integer's `MAX` doubles as the end-of-chain marker for both
//! the list and the free list, so a link is one integer store and a node
//! costs `size_of::<T>()` plus one index. The index width also caps the
//! arena: a `u8` pool holds at most 255 slots.

/// An unsigned integer usable as a [`NodePool`](crate::NodePool) slot index.
///
/// `NONE` ends a chain and is never handed out as a slot. Every value below
/// `MAX_SLOTS` is a valid slot index.
///
/// # Example
///
/// ```
/// use nexus_pooled::NodeIndex;
///
/// assert_eq!(u8::MAX_SLOTS, 255);
/// assert_eq!(u8::try_from_usize(254), Some(254));
/// assert_eq!(u8::try_from_usize(255), None);
///
/// assert!(u16::NONE.is_none());
/// assert!(3u16.is_some());
/// ```
pub trait NodeIndex: Copy + Eq + core::fmt::Debug {
    /// Marks the end of a chain.
    const NONE: Self;

    /// Number of slots this index type can address. Slot `MAX_SLOTS` would
    /// collide with `NONE` (or overflow `usize` for wide index types).
    const MAX_SLOTS: usize;

    /// Returns `true` for the end-of-chain marker.
    #[inline]
    fn is_none(self) -> bool {
        self == Self::NONE
    }

    /// Returns `true` for a real slot index.
    #[inline]
    fn is_some(self) -> bool {
        self != Self::NONE
    }

    /// Arena position of this slot.
    fn as_usize(self) -> usize;

    /// Converts an arena position to a slot index, or `None` if `slot` is
    /// outside `0..MAX_SLOTS`.
    fn try_from_usize(slot: usize) -> Option<Self>;
}

/// `MAX` of an unsigned type, clamped to what fits in `usize`.
const fn clamp_to_usize(max: u128) -> usize {
    if max > usize::MAX as u128 {
        usize::MAX
    } else {
        max as usize
    }
}

macro_rules! node_index {
    ($($ty:ty),*) => {$(
        impl NodeIndex for $ty {
            const NONE: Self = <$ty>::MAX;
            const MAX_SLOTS: usize = clamp_to_usize(<$ty>::MAX as u128);

            #[inline]
            fn as_usize(self) -> usize {
                self as usize
            }

            #[inline]
            fn try_from_usize(slot: usize) -> Option<Self> {
                if slot < Self::MAX_SLOTS {
                    Some(slot as Self)
                } else {
                    None
                }
            }
        }
    )*};
}

node_index!(u8, u16, u32, u64, usize);
