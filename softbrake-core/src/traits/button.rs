//! Button bank trait

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Classification of a completed press
///
/// Produced when a button is released, based on how long it was held.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PressEvent {
    /// No event pending (or the press was too brief to count)
    #[default]
    None,
    /// Held at least the short-press threshold but less than the long one
    Short,
    /// Held at least the long-press threshold
    Long,
}

impl PressEvent {
    /// Check if this is an actual press (Short or Long)
    pub fn is_press(self) -> bool {
        self != PressEvent::None
    }
}

/// A bank of debounced buttons sampled by a polling loop
///
/// `sample` must only ever be called from one context. `is_pressed` and
/// `consume_press_event` may be called from elsewhere only if the caller
/// serializes them against `sample`.
pub trait ButtonBank {
    /// Read every channel once and advance the debounce state machines
    ///
    /// `now_ms` is a monotonic millisecond timestamp (wrapping).
    fn sample(&mut self, now_ms: u32);

    /// Debounced pressed state of a channel
    ///
    /// Returns `false` for an out-of-range channel.
    fn is_pressed(&self, channel: usize) -> bool;

    /// Take the pending press event of a channel
    ///
    /// The slot is reset to [`PressEvent::None`]. Returns `None` for an
    /// out-of-range channel.
    fn consume_press_event(&mut self, channel: usize) -> PressEvent;

    /// Number of channels in the bank
    fn len(&self) -> usize;

    /// Check if the bank has no channels (never true for a valid bank)
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
