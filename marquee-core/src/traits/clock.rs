//! Monotonic clock trait
//!
//! The engine never blocks; it compares elapsed milliseconds against the
//! configured tick interval and silently declines to advance when a call
//! arrives early. The clock is injected so firmware can supply its timer
//! peripheral and host tests can step time manually.

/// Monotonic millisecond time source.
///
/// The absolute value is meaningless; only wrapping differences are used,
/// so a free-running 32-bit millisecond counter is sufficient.
pub trait Clock {
    /// Current time in milliseconds
    fn now_ms(&self) -> u32;
}

impl<C: Clock> Clock for &C {
    fn now_ms(&self) -> u32 {
        (*self).now_ms()
    }
}
