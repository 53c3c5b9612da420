//! Configuration type definitions

use crate::math::clamp;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default debounce window (ms)
pub const DEFAULT_DEBOUNCE_MS: u32 = 30;

/// Default minimum hold time for a short press (ms)
pub const DEFAULT_SHORT_PRESS_MS: u32 = 200;

/// Default minimum hold time for a long press (ms)
pub const DEFAULT_LONG_PRESS_MS: u32 = 1000;

/// Default soft-brake dither frequency (Hz)
///
/// 200-500 Hz keeps the dither below the range where it is heard as a
/// whine while still being too fast to feel as pulsing.
pub const DEFAULT_SOFT_BRAKE_HZ: u16 = 300;

/// Default duty used by [`FreewheelMode::DitherBrake`] (counts)
pub const DEFAULT_DITHER_PWM: u16 = 30;

/// Soft-brake duty in effect before the first `set_soft_brake_pwm` (counts)
pub const DEFAULT_SOFT_BRAKE_PWM: u16 = 50;

/// Default PWM carrier frequency (Hz)
pub const DEFAULT_PWM_FREQ_HZ: u32 = 20_000;

/// Default PWM resolution (bits)
pub const DEFAULT_PWM_RESOLUTION_BITS: u8 = 10;

/// Shortest brake or coast phase the dither scheduler will arm (µs)
pub const MIN_PHASE_US: u32 = 1_500;

/// Widest supported PWM resolution (bits)
///
/// A full-on output needs a compare value of `top + 1`, which must still
/// fit the 16-bit compare register.
pub const MAX_PWM_RESOLUTION_BITS: u8 = 15;

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Short-press threshold is greater than the long-press threshold
    ShortExceedsLong,
    /// PWM carrier frequency is zero
    ZeroFrequency,
    /// PWM resolution outside 1..=15 bits
    ResolutionOutOfRange,
    /// Carrier frequency cannot be reached from the system clock
    FrequencyUnreachable,
    /// The same GPIO is assigned to more than one function
    DuplicatePin,
    /// Buttons of one bank disagree on active-low/active-high wiring
    MixedPolarity,
}

/// Debounce and press-duration thresholds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ButtonTiming {
    /// Minimum time between two accepted state changes
    pub debounce_ms: u32,
    /// Minimum hold time for a short press
    pub short_press_ms: u32,
    /// Minimum hold time for a long press
    pub long_press_ms: u32,
}

impl Default for ButtonTiming {
    fn default() -> Self {
        Self::new(
            DEFAULT_DEBOUNCE_MS,
            DEFAULT_SHORT_PRESS_MS,
            DEFAULT_LONG_PRESS_MS,
        )
    }
}

impl ButtonTiming {
    /// Create a timing policy
    ///
    /// No validation is done here; see [`ButtonTiming::validate`].
    pub const fn new(debounce_ms: u32, short_press_ms: u32, long_press_ms: u32) -> Self {
        Self {
            debounce_ms,
            short_press_ms,
            long_press_ms,
        }
    }

    /// Check that the thresholds can classify every press
    ///
    /// With `short_press_ms > long_press_ms` a press can never be
    /// classified as Short.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.short_press_ms > self.long_press_ms {
            return Err(ConfigError::ShortExceedsLong);
        }
        Ok(())
    }
}

/// How the driver behaves when asked to freewheel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FreewheelMode {
    /// Outputs off and driver stage disabled via the enable line
    #[default]
    HiZ,
    /// Outputs off, driver stage kept enabled for fast response
    HiZAwake,
    /// Light drag by dithering between brake and coast
    DitherBrake,
}

/// Per-instance motor behavior profile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MotorBehavior {
    /// What `set_freewheel` does
    pub freewheel_mode: FreewheelMode,
    /// Dither frequency of the soft brake (Hz)
    pub soft_brake_hz: u16,
    /// Soft-brake duty used by [`FreewheelMode::DitherBrake`] (counts)
    pub dither_pwm: u16,
}

impl Default for MotorBehavior {
    fn default() -> Self {
        Self::new(FreewheelMode::HiZ, DEFAULT_SOFT_BRAKE_HZ, DEFAULT_DITHER_PWM)
    }
}

impl MotorBehavior {
    /// Create a behavior profile
    pub const fn new(freewheel_mode: FreewheelMode, soft_brake_hz: u16, dither_pwm: u16) -> Self {
        Self {
            freewheel_mode,
            soft_brake_hz,
            dither_pwm,
        }
    }

    /// Adapt the profile to the wiring it will run on
    ///
    /// Without an enable line there is nothing to put the driver stage to
    /// sleep with, so `HiZ` becomes `HiZAwake`. A zero dither frequency
    /// becomes 1 Hz.
    pub fn resolved(self, has_enable_pin: bool) -> Self {
        let freewheel_mode = if !has_enable_pin && self.freewheel_mode == FreewheelMode::HiZ {
            FreewheelMode::HiZAwake
        } else {
            self.freewheel_mode
        };

        Self {
            freewheel_mode,
            soft_brake_hz: self.soft_brake_hz.max(1),
            dither_pwm: self.dither_pwm,
        }
    }
}

/// PWM carrier settings
///
/// Configured once at setup; the driver only varies duty at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PwmSettings {
    /// Carrier frequency (Hz)
    pub frequency_hz: u32,
    /// Counter resolution (bits)
    pub resolution_bits: u8,
}

impl Default for PwmSettings {
    fn default() -> Self {
        Self {
            frequency_hz: DEFAULT_PWM_FREQ_HZ,
            resolution_bits: DEFAULT_PWM_RESOLUTION_BITS,
        }
    }
}

impl PwmSettings {
    /// Check the settings describe a PWM the hardware can produce
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.frequency_hz == 0 {
            return Err(ConfigError::ZeroFrequency);
        }
        if self.resolution_bits == 0 || self.resolution_bits > MAX_PWM_RESOLUTION_BITS {
            return Err(ConfigError::ResolutionOutOfRange);
        }
        Ok(())
    }

    /// Check the settings, and that the carrier is reachable from a
    /// system clock of `sys_clk_hz` with an 8.4 divider of 1.0..=255.15
    pub fn validate_for(&self, sys_clk_hz: u32) -> Result<(), ConfigError> {
        self.validate()?;

        let divider_x16 = self.divider_x16(sys_clk_hz);
        if !(16..256 * 16).contains(&divider_x16) {
            return Err(ConfigError::FrequencyUnreachable);
        }
        Ok(())
    }

    /// Largest speed/duty input (e.g. 1023 for 10 bits)
    ///
    /// Resolution is clamped to 1..=15 bits.
    pub fn max_input(&self) -> u16 {
        let bits = clamp(self.resolution_bits, 1, MAX_PWM_RESOLUTION_BITS);
        ((1u32 << bits) - 1) as u16
    }

    /// Counter wrap value for the configured resolution
    pub fn top(&self) -> u16 {
        self.max_input()
    }

    /// Clock divider that yields the carrier frequency
    ///
    /// Returns the 8.4 fixed-point divider as (integer, fraction/16),
    /// clamped to the valid range 1.0..=255.15. Use
    /// [`PwmSettings::validate_for`] to detect clamping.
    pub fn clock_divider(&self, sys_clk_hz: u32) -> (u8, u8) {
        if self.frequency_hz == 0 {
            return (0xFF, 0x0F);
        }

        let divider_x16 = self.divider_x16(sys_clk_hz);
        if divider_x16 < 16 {
            return (1, 0);
        }
        if divider_x16 >= 256 * 16 {
            return (0xFF, 0x0F);
        }

        ((divider_x16 / 16) as u8, (divider_x16 % 16) as u8)
    }

    /// Unclamped divider in 1/16 units: SYS_CLK / (freq * (top + 1))
    fn divider_x16(&self, sys_clk_hz: u32) -> u64 {
        let counts_per_period = self.top() as u64 + 1;
        let per_second = self.frequency_hz as u64 * counts_per_period;
        if per_second == 0 {
            return u64::MAX;
        }
        (sys_clk_hz as u64 * 16) / per_second
    }
}
