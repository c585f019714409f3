//! Error types for pool and list operations.

use core::fmt;

/// Error returned when the pool's index type has no free slot index left.
///
/// The rejected value is handed back so nothing is lost.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Full<T>(pub T);

impl<T> Full<T> {
    /// Returns the value that could not be stored.
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> fmt::Display for Full<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node pool index space exhausted")
    }
}

impl<T: fmt::Debug> std::error::Error for Full<T> {}

/// Destination slice too short for a copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CopyError {
    /// Requested start offset in the destination.
    pub offset: usize,
    /// Number of items that needed to be written.
    pub required: usize,
    /// Length of the destination slice.
    pub dest_len: usize,
}

impl fmt::Display for CopyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "cannot copy {} items at offset {} into slice of length {}",
            self.required, self.offset, self.dest_len
        )
    }
}

impl std::error::Error for CopyError {}
