//! Raw button level readers

use softbrake_core::config::{ButtonHwConfig, PinConfig};
use softbrake_hal::InputPin;

/// Reads the raw (undebounced) pressed state of one button
///
/// Closures `FnMut(&P) -> bool` are readers too, which covers buttons that
/// are not plain GPIOs (I/O expanders, shift registers, pins identified
/// by number).
pub trait RawReader<P> {
    /// Return `true` if the button on `pin` currently reads as pressed
    fn is_pressed(&mut self, pin: &P) -> bool;
}

/// Pressed = logic low (button to ground with pull-up)
#[derive(Debug, Clone, Copy, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ActiveLow;

impl<P: InputPin> RawReader<P> for ActiveLow {
    fn is_pressed(&mut self, pin: &P) -> bool {
        pin.is_low()
    }
}

/// Pressed = logic high (button to supply with pull-down)
#[derive(Debug, Clone, Copy, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ActiveHigh;

impl<P: InputPin> RawReader<P> for ActiveHigh {
    fn is_pressed(&mut self, pin: &P) -> bool {
        pin.is_high()
    }
}

/// Polarity chosen at runtime from the wiring description
///
/// `inverted` buttons (to ground, pulled up) read pressed when low; all
/// others read pressed when high.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Polarity {
    inverted: bool,
}

impl Polarity {
    /// Pressed = logic low
    pub const fn active_low() -> Self {
        Self { inverted: true }
    }

    /// Pressed = logic high
    pub const fn active_high() -> Self {
        Self { inverted: false }
    }

    /// Check if pressed reads as logic low
    pub fn is_inverted(&self) -> bool {
        self.inverted
    }
}

impl From<&PinConfig> for Polarity {
    fn from(config: &PinConfig) -> Self {
        Self {
            inverted: config.inverted,
        }
    }
}

impl From<&ButtonHwConfig> for Polarity {
    /// Polarity shared by the bank (see [`ButtonHwConfig::validate`])
    fn from(config: &ButtonHwConfig) -> Self {
        Self {
            inverted: config.is_inverted(),
        }
    }
}

impl<P: InputPin> RawReader<P> for Polarity {
    fn is_pressed(&mut self, pin: &P) -> bool {
        // Normal: high → pressed; inverted: low → pressed
        pin.is_high() != self.inverted
    }
}

impl<P, F> RawReader<P> for F
where
    F: FnMut(&P) -> bool,
{
    fn is_pressed(&mut self, pin: &P) -> bool {
        self(pin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;

    struct MockPin<'a> {
        level: &'a Cell<bool>,
    }

    impl InputPin for MockPin<'_> {
        fn is_high(&self) -> bool {
            self.level.get()
        }
    }

    #[test]
    fn test_fixed_readers() {
        let level = Cell::new(false);
        let pin = MockPin { level: &level };

        assert!(ActiveLow.is_pressed(&pin));
        assert!(!ActiveHigh.is_pressed(&pin));

        level.set(true);
        assert!(!ActiveLow.is_pressed(&pin));
        assert!(ActiveHigh.is_pressed(&pin));
    }

    #[test]
    fn test_polarity_from_pin_config() {
        let level = Cell::new(false);
        let pin = MockPin { level: &level };

        // Active-high button pulled down: idle low is released
        let mut normal = Polarity::from(&PinConfig::new(4));
        assert!(!normal.is_inverted());
        assert!(!normal.is_pressed(&pin));
        level.set(true);
        assert!(normal.is_pressed(&pin));

        // Active-low button pulled up: idle high is released
        let mut inverted = Polarity::from(&PinConfig::button(5));
        assert!(inverted.is_inverted());
        assert!(!inverted.is_pressed(&pin));
        level.set(false);
        assert!(inverted.is_pressed(&pin));
    }

    #[test]
    fn test_polarity_from_bank_config() {
        let mut config = ButtonHwConfig::default();
        assert_eq!(Polarity::from(&config), Polarity::active_low());

        config.pins.push(PinConfig::new(6)).unwrap();
        config.pins.push(PinConfig::new(7)).unwrap();
        assert_eq!(Polarity::from(&config), Polarity::active_high());
    }
}
