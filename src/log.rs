//! Logging macros.
//!
//! With the `tracing` feature enabled these forward to the `tracing` crate,
//! otherwise they expand to nothing and their arguments are never evaluated.
//!
//! ```bash
//! RUST_LOG=weightavl=trace cargo test --features tracing
//! ```

#![allow(unused_macros)]

/// Trace-level event.
#[cfg(feature = "tracing")]
macro_rules! trace_log {
    ($($arg:tt)*) => {
        tracing::trace!($($arg)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_log {
    ($($arg:tt)*) => {};
}

/// Debug-level event.
#[cfg(feature = "tracing")]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        tracing::debug!($($arg)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! debug_log {
    ($($arg:tt)*) => {};
}
