//! Soft-brake dither timing
//!
//! A soft brake alternates between shorting the motor terminals (brake)
//! and letting them float (coast) at a low frequency. The share of each
//! period spent braking sets the drag felt at the shaft.
//!
//! ```text
//!          brake_us       coast_us
//!        |<-------->|<-------------->|
//!  A,B   ‾‾‾‾‾‾‾‾‾‾‾‾________________‾‾‾‾‾‾‾‾‾‾‾‾____
//!        |<---------- period_us ---------->|
//! ```

use softbrake_core::config::MIN_PHASE_US;
use softbrake_core::math::clamp;
use softbrake_core::traits::BrakePhase;

/// Levels at or below this are treated as "no braking"
pub const COAST_THRESHOLD: f32 = 0.001;

/// Levels at or above this are treated as "full braking"
pub const FULL_BRAKE_THRESHOLD: f32 = 0.999;

/// Phase split of one soft-brake period
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DitherTiming {
    /// Brake share of the period (0.0-1.0)
    pub level: f32,
    /// Brake phase duration (µs)
    pub brake_us: u32,
    /// Coast phase duration (µs)
    pub coast_us: u32,
}

impl Default for DitherTiming {
    fn default() -> Self {
        Self {
            level: 0.0,
            brake_us: 0,
            coast_us: 0,
        }
    }
}

impl DitherTiming {
    /// Compute the phase split for a duty of `duty` out of `max_input`
    /// counts at `hz` periods per second
    ///
    /// A zero `hz` is treated as 1 Hz. Nonzero phases shorter than
    /// [`MIN_PHASE_US`] are stretched to it, so the effective frequency
    /// drops at extreme levels.
    pub fn compute(duty: u16, max_input: u16, hz: u16) -> Self {
        let level = if max_input == 0 {
            0.0
        } else {
            clamp(duty as f32 / max_input as f32, 0.0, 1.0)
        };

        let period_us = 1_000_000.0 / hz.max(1) as f32;
        let brake_us = (period_us * level) as u32;
        let coast_us = (period_us as u32).saturating_sub(brake_us);

        Self {
            level,
            brake_us: floor_phase(brake_us),
            coast_us: floor_phase(coast_us),
        }
    }

    /// Check if the level is too low to brake at all
    pub fn is_coast(&self) -> bool {
        self.level <= COAST_THRESHOLD
    }

    /// Check if the level is high enough to brake continuously
    pub fn is_full_brake(&self) -> bool {
        self.level >= FULL_BRAKE_THRESHOLD
    }

    /// Duration of one phase (µs)
    pub fn duration_us(&self, phase: BrakePhase) -> u32 {
        match phase {
            BrakePhase::Brake => self.brake_us,
            BrakePhase::Coast => self.coast_us,
        }
    }

    /// Length of one full brake/coast cycle (µs)
    pub fn period_us(&self) -> u32 {
        self.brake_us.saturating_add(self.coast_us)
    }
}

/// Stretch a nonzero phase to the minimum the timer can reliably service
fn floor_phase(us: u32) -> u32 {
    if us == 0 {
        0
    } else {
        us.max(MIN_PHASE_US)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_half_level_at_300hz() {
        let timing = DitherTiming::compute(512, 1023, 300);

        assert!((timing.level - 0.5).abs() < 0.001);
        assert_eq!(timing.brake_us, 1668);
        assert_eq!(timing.coast_us, 1665);
        assert_eq!(timing.period_us(), 3333);
        assert!(!timing.is_coast());
        assert!(!timing.is_full_brake());
    }

    #[test]
    fn test_short_phase_floored() {
        // 10% at 300 Hz: brake 333 µs -> 1500 µs
        let timing = DitherTiming::compute(102, 1023, 300);
        assert_eq!(timing.brake_us, MIN_PHASE_US);
        assert!(timing.coast_us > 2900);

        // 90%: coast is the short one
        let timing = DitherTiming::compute(921, 1023, 300);
        assert_eq!(timing.coast_us, MIN_PHASE_US);
    }

    #[test]
    fn test_degenerate_levels() {
        assert!(DitherTiming::compute(0, 1023, 300).is_coast());
        assert!(DitherTiming::compute(1, 1023, 300).is_coast());
        assert!(DitherTiming::compute(1023, 1023, 300).is_full_brake());
        assert!(DitherTiming::compute(u16::MAX, 1023, 300).is_full_brake());
    }

    #[test]
    fn test_zero_phase_not_floored() {
        let timing = DitherTiming::compute(0, 1023, 300);
        assert_eq!(timing.brake_us, 0);
        assert_eq!(timing.duration_us(BrakePhase::Brake), 0);

        let timing = DitherTiming::compute(1023, 1023, 300);
        assert_eq!(timing.coast_us, 0);
    }

    #[test]
    fn test_zero_hz_is_one_hz() {
        let timing = DitherTiming::compute(512, 1023, 0);
        assert_eq!(timing.period_us(), 1_000_000);
    }

    #[test]
    fn test_duration_by_phase() {
        let timing = DitherTiming::compute(512, 1023, 300);
        assert_eq!(timing.duration_us(BrakePhase::Brake), timing.brake_us);
        assert_eq!(timing.duration_us(BrakePhase::Coast), timing.coast_us);
    }

    proptest! {
        #[test]
        fn phases_fill_the_period(duty in 2u16..1022, hz in 1u16..600) {
            let timing = DitherTiming::compute(duty, 1023, hz);
            let period = (1_000_000.0 / hz as f32) as u32;

            prop_assert!(timing.brake_us >= MIN_PHASE_US);
            prop_assert!(timing.coast_us >= MIN_PHASE_US);

            if timing.brake_us > MIN_PHASE_US && timing.coast_us > MIN_PHASE_US {
                prop_assert_eq!(timing.period_us(), period);
            } else {
                prop_assert!(timing.period_us() >= period);
            }
        }

        #[test]
        fn level_is_clamped(duty in any::<u16>(), max in 1u16..=u16::MAX) {
            let timing = DitherTiming::compute(duty, max, 300);
            prop_assert!((0.0..=1.0).contains(&timing.level));
        }
    }
}
