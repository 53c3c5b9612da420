//! Debounced button bank
//!
//! Samples a fixed set of buttons from a polling loop, rejects contact
//! chatter and classifies each completed press by how long it was held.
//!
//! # Usage
//!
//! ```ignore
//! let mut buttons = DebouncedButtons::new([accel_pin, mode_pin], ButtonTiming::default());
//!
//! // Every loop iteration (e.g. every 10 ms):
//! buttons.sample(clock.now_ms());
//! if buttons.consume_press_event(0) == PressEvent::Long {
//!     // ...
//! }
//! ```
//!
//! # Algorithm
//!
//! Per channel, a raw level that differs from the debounced state is
//! accepted only if at least `debounce_ms` have passed since the last
//! accepted change; otherwise the sample is ignored. A press records its
//! start time. A release computes the hold time and stores Long, Short or
//! None in the single pending-event slot, replacing whatever was there.

use softbrake_core::config::ButtonTiming;
use softbrake_core::traits::{ButtonBank, PressEvent};
use softbrake_hal::{Clock, InputPin};

use super::reader::{ActiveLow, RawReader};

/// Debounce state of one button
#[derive(Debug, Clone)]
struct Channel<P> {
    pin: P,
    /// Last accepted state (true = pressed)
    pressed: bool,
    /// Timestamp of the last accepted change (ms)
    last_change_ms: u32,
    /// Timestamp the current press began (ms), valid while pressed
    press_start_ms: u32,
    /// Event waiting to be consumed
    pending: PressEvent,
}

impl<P> Channel<P> {
    fn new(pin: P) -> Self {
        Self {
            pin,
            pressed: false,
            last_change_ms: 0,
            press_start_ms: 0,
            pending: PressEvent::None,
        }
    }

    /// Feed one raw sample
    fn update(&mut self, raw_pressed: bool, now_ms: u32, timing: &ButtonTiming) {
        if raw_pressed == self.pressed {
            // Held or idle: press_start_ms keeps accumulating
            return;
        }

        if now_ms.wrapping_sub(self.last_change_ms) < timing.debounce_ms {
            return;
        }

        self.last_change_ms = now_ms;
        self.pressed = raw_pressed;

        if raw_pressed {
            self.press_start_ms = now_ms;
        } else {
            let held_ms = now_ms.wrapping_sub(self.press_start_ms);
            self.pending = classify(held_ms, timing);
            self.press_start_ms = 0;
        }
    }
}

/// Classify a completed press by its hold time
fn classify(held_ms: u32, timing: &ButtonTiming) -> PressEvent {
    if held_ms >= timing.long_press_ms {
        PressEvent::Long
    } else if held_ms >= timing.short_press_ms {
        PressEvent::Short
    } else {
        PressEvent::None
    }
}

/// Bank of `N` debounced buttons
///
/// `N` is a wiring property and fixed at compile time; a bank with zero
/// buttons fails to compile. The raw level of each pin is read through
/// `R` (default: [`ActiveLow`]).
pub struct DebouncedButtons<P, const N: usize, R = ActiveLow> {
    channels: [Channel<P>; N],
    reader: R,
    timing: ButtonTiming,
}

impl<P: InputPin, const N: usize> DebouncedButtons<P, N, ActiveLow> {
    /// Create a bank of active-low buttons (pressed = pin reads low)
    pub fn new(pins: [P; N], timing: ButtonTiming) -> Self {
        Self::with_reader(pins, ActiveLow, timing)
    }
}

impl<P, const N: usize, R: RawReader<P>> DebouncedButtons<P, N, R> {
    const NON_EMPTY: () = assert!(N > 0, "DebouncedButtons needs at least one button");

    /// Create a bank with a custom raw reader
    pub fn with_reader(pins: [P; N], reader: R, timing: ButtonTiming) -> Self {
        #[allow(clippy::let_unit_value)]
        let () = Self::NON_EMPTY;

        Self {
            channels: pins.map(Channel::new),
            reader,
            timing,
        }
    }

    /// Sample every button using the time from `clock`
    pub fn poll<C: Clock>(&mut self, clock: &C) {
        self.sample(clock.now_ms());
    }

    /// Get the timing policy
    pub fn timing(&self) -> &ButtonTiming {
        &self.timing
    }

    /// Get the pin of a channel
    pub fn pin(&self, channel: usize) -> Option<&P> {
        self.channels.get(channel).map(|c| &c.pin)
    }

    /// Check if a channel has an event waiting, without consuming it
    pub fn has_pending_event(&self, channel: usize) -> bool {
        self.channels
            .get(channel)
            .map(|c| c.pending.is_press())
            .unwrap_or(false)
    }
}

impl<P, const N: usize, R: RawReader<P>> ButtonBank for DebouncedButtons<P, N, R> {
    fn sample(&mut self, now_ms: u32) {
        let timing = self.timing;
        for channel in self.channels.iter_mut() {
            let raw = self.reader.is_pressed(&channel.pin);
            channel.update(raw, now_ms, &timing);
        }
    }

    fn is_pressed(&self, channel: usize) -> bool {
        self.channels
            .get(channel)
            .map(|c| c.pressed)
            .unwrap_or(false)
    }

    fn consume_press_event(&mut self, channel: usize) -> PressEvent {
        match self.channels.get_mut(channel) {
            Some(c) => core::mem::take(&mut c.pending),
            None => PressEvent::None,
        }
    }

    fn len(&self) -> usize {
        N
    }
}
