//! Millisecond clock from the embassy time driver

use embassy_time::Instant;
use softbrake_hal::Clock;

/// [`Clock`] backed by `embassy_time::Instant`
///
/// Milliseconds since boot, truncated to `u32` (wraps after ~49 days).
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbassyClock;

impl Clock for EmbassyClock {
    fn now_ms(&self) -> u32 {
        Instant::now().as_millis() as u32
    }
}
