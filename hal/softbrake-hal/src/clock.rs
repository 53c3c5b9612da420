//! Monotonic time source

/// Monotonic millisecond clock
///
/// The counter is 32 bits wide and wraps after ~49 days. Consumers must
/// compare timestamps with wrapping arithmetic.
pub trait Clock {
    /// Milliseconds since an arbitrary fixed epoch (usually boot)
    fn now_ms(&self) -> u32;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now_ms(&self) -> u32 {
        (**self).now_ms()
    }
}
