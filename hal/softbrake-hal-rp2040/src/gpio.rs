//! GPIO wrappers
//!
//! Adapts embassy-rp `Input`/`Output` to the `softbrake-hal` pin traits.

use embassy_rp::gpio::{Input, Level, Output, Pin, Pull};
use embassy_rp::Peri;
use softbrake_core::config::PinConfig;
use softbrake_hal::{InputPin, OutputPin};

/// Digital input
pub struct RpInput<'d> {
    pin: Input<'d>,
}

impl<'d> RpInput<'d> {
    /// Wrap an already configured input
    pub fn new(pin: Input<'d>) -> Self {
        Self { pin }
    }

    /// Configure a button input from its wiring description
    ///
    /// Internal pull-up when `pull_up` is set. Otherwise active-low pins
    /// get no internal pull (external pull-up assumed) and active-high
    /// pins get the internal pull-down.
    ///
    /// Only the pull is configured here; read the bank through
    /// `softbrake_drivers::button::Polarity::from(config)` so the pressed
    /// level follows `inverted`.
    pub fn from_config(pin: Peri<'d, impl Pin>, config: &PinConfig) -> Self {
        let pull = if config.pull_up {
            Pull::Up
        } else if config.inverted {
            Pull::None
        } else {
            Pull::Down
        };
        Self::new(Input::new(pin, pull))
    }
}

impl InputPin for RpInput<'_> {
    fn is_high(&self) -> bool {
        self.pin.is_high()
    }
}

/// Digital output
pub struct RpOutput<'d> {
    pin: Output<'d>,
}

impl<'d> RpOutput<'d> {
    /// Wrap an already configured output
    pub fn new(pin: Output<'d>) -> Self {
        Self { pin }
    }

    /// Configure a driver enable line, starting low (driver off)
    pub fn enable_line(pin: Peri<'d, impl Pin>) -> Self {
        Self::new(Output::new(pin, Level::Low))
    }
}

impl OutputPin for RpOutput<'_> {
    fn set_high(&mut self) {
        self.pin.set_high();
    }

    fn set_low(&mut self) {
        self.pin.set_low();
    }

    fn is_set_high(&self) -> bool {
        self.pin.is_set_high()
    }
}
