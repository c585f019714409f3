//! Structured events, compiled out unless the `tracing` feature is enabled.
//!
//! Only cold paths emit events: arena growth, chain frees and resets. The
//! free-list fast path never logs.

#[cfg(feature = "tracing")]
macro_rules! trace_event {
    ($($arg:tt)*) => {
        tracing::trace!(target: "nexus_pooled", $($arg)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_event {
    ($($arg:tt)*) => {};
}

#[cfg(feature = "tracing")]
macro_rules! debug_event {
    ($($arg:tt)*) => {
        tracing::debug!(target: "nexus_pooled", $($arg)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! debug_event {
    ($($arg:tt)*) => {};
}

pub(crate) use debug_event;
pub(crate) use trace_event;
