//! Hardware configuration types
//!
//! Board wiring for the motor driver and the button bank. These describe
//! which GPIOs are used; the platform binding turns them into peripherals.

use heapless::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::types::{ButtonTiming, ConfigError, MotorBehavior, PwmSettings};

/// Maximum buttons per bank config
pub const MAX_BUTTONS: usize = 8;

/// Pin configuration with optional inversion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PinConfig {
    /// GPIO pin number (0-29 for RP2040)
    pub pin: u8,
    /// Pin is active-low (inverted)
    pub inverted: bool,
    /// Enable internal pull-up
    pub pull_up: bool,
}

impl PinConfig {
    /// Create a new pin config
    pub const fn new(pin: u8) -> Self {
        Self {
            pin,
            inverted: false,
            pull_up: false,
        }
    }

    /// Create an active-low input with pull-up (button to ground)
    pub const fn button(pin: u8) -> Self {
        Self {
            pin,
            inverted: true,
            pull_up: true,
        }
    }
}

/// H-bridge wiring and carrier settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct HBridgeHwConfig {
    /// PWM output A (clockwise)
    pub pwm_a_pin: PinConfig,
    /// PWM output B (counter-clockwise)
    pub pwm_b_pin: PinConfig,
    /// Driver enable line, if wired
    pub enable_pin: Option<PinConfig>,
    /// Carrier frequency and resolution
    pub pwm: PwmSettings,
    /// Freewheel and soft-brake behavior
    pub behavior: MotorBehavior,
}

impl HBridgeHwConfig {
    /// Create a config with default carrier and behavior
    pub fn new(pwm_a_pin: u8, pwm_b_pin: u8, enable_pin: Option<u8>) -> Self {
        Self {
            pwm_a_pin: PinConfig::new(pwm_a_pin),
            pwm_b_pin: PinConfig::new(pwm_b_pin),
            enable_pin: enable_pin.map(PinConfig::new),
            pwm: PwmSettings::default(),
            behavior: MotorBehavior::default(),
        }
    }

    /// Check if an enable line is wired
    pub fn has_enable_pin(&self) -> bool {
        self.enable_pin.is_some()
    }

    /// Behavior adapted to this wiring (see [`MotorBehavior::resolved`])
    pub fn resolved_behavior(&self) -> MotorBehavior {
        self.behavior.resolved(self.has_enable_pin())
    }

    /// Validate pin assignment and carrier settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.pwm.validate()?;

        let a = self.pwm_a_pin.pin;
        let b = self.pwm_b_pin.pin;
        if a == b {
            return Err(ConfigError::DuplicatePin);
        }
        if let Some(en) = self.enable_pin {
            if en.pin == a || en.pin == b {
                return Err(ConfigError::DuplicatePin);
            }
        }
        Ok(())
    }
}

/// Button bank wiring
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ButtonHwConfig {
    /// Button inputs, in channel order
    pub pins: Vec<PinConfig, MAX_BUTTONS>,
    /// Debounce and press thresholds
    pub timing: ButtonTiming,
}

impl ButtonHwConfig {
    /// Validate pin assignment and timing
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.timing.validate()?;

        for (i, pin) in self.pins.iter().enumerate() {
            if self.pins[i + 1..].iter().any(|p| p.pin == pin.pin) {
                return Err(ConfigError::DuplicatePin);
            }
        }

        // One bank reads every button with the same polarity
        if let Some(first) = self.pins.first() {
            if self.pins.iter().any(|p| p.inverted != first.inverted) {
                return Err(ConfigError::MixedPolarity);
            }
        }
        Ok(())
    }

    /// Check if the buttons are active-low
    ///
    /// An empty bank counts as active-low, the usual pull-up wiring.
    pub fn is_inverted(&self) -> bool {
        self.pins.first().map(|p| p.inverted).unwrap_or(true)
    }
}
