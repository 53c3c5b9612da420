//! Motor driver traits
//!
//! Defines the command surface of a dual-PWM H-bridge driver with
//! drive, hard brake, freewheel and dithered soft-brake modes.

use crate::math::clamp;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Motor rotation direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Direction {
    /// Clockwise / forward (PWM output A)
    #[default]
    Clockwise,
    /// Counter-clockwise / reverse (PWM output B)
    CounterClockwise,
}

/// Phase of the soft-brake dither cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BrakePhase {
    /// Both outputs at 0% duty, motor coasts
    #[default]
    Coast,
    /// Both outputs at 100% duty, motor windings shorted
    Brake,
}

impl BrakePhase {
    /// The phase that follows this one
    pub fn next(self) -> Self {
        match self {
            BrakePhase::Coast => BrakePhase::Brake,
            BrakePhase::Brake => BrakePhase::Coast,
        }
    }
}

/// Trait for H-bridge motor drivers
///
/// All commands are infallible: out-of-range inputs are clamped to the
/// nearest valid value. Speed and duty values are PWM counts in
/// `0..=max_pwm_input()`.
pub trait MotorDriver {
    /// Drive the motor at `speed` counts in direction `dir`
    ///
    /// A speed that clamps to zero engages the soft brake instead of
    /// driving the outputs at 0%.
    fn set_speed(&mut self, speed: i32, dir: Direction);

    /// Let the motor coast, according to the configured freewheel mode
    fn set_freewheel(&mut self);

    /// Short both motor terminals for maximum dynamic braking
    fn set_hard_brake(&mut self);

    /// Set the soft-brake strength in counts (0 = coast, max = hard brake)
    fn set_soft_brake_pwm(&mut self, pwm: i32);

    /// Maximum speed/duty input, derived from the PWM resolution
    fn max_pwm_input(&self) -> u16;

    /// Drive the motor at a percentage of full speed
    ///
    /// `percent` is clamped to 0-100 (NaN counts as 0) and mapped onto
    /// `0..=max_pwm_input()`.
    fn set_speed_percent(&mut self, percent: f32, dir: Direction) {
        let percent = if percent.is_nan() { 0.0 } else { clamp(percent, 0.0, 100.0) };
        let counts = (percent / 100.0 * self.max_pwm_input() as f32 + 0.5) as i32;
        self.set_speed(counts, dir);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Records the last speed command
    struct RecordingMotor {
        last: Option<(i32, Direction)>,
    }

    impl MotorDriver for RecordingMotor {
        fn set_speed(&mut self, speed: i32, dir: Direction) {
            self.last = Some((speed, dir));
        }

        fn set_freewheel(&mut self) {}

        fn set_hard_brake(&mut self) {}

        fn set_soft_brake_pwm(&mut self, _pwm: i32) {}

        fn max_pwm_input(&self) -> u16 {
            1023
        }
    }

    #[test]
    fn test_phase_alternates() {
        assert_eq!(BrakePhase::Coast.next(), BrakePhase::Brake);
        assert_eq!(BrakePhase::Brake.next(), BrakePhase::Coast);
        assert_eq!(BrakePhase::default(), BrakePhase::Coast);
    }

    #[test]
    fn test_speed_percent_mapping() {
        let mut motor = RecordingMotor { last: None };

        motor.set_speed_percent(100.0, Direction::Clockwise);
        assert_eq!(motor.last, Some((1023, Direction::Clockwise)));

        motor.set_speed_percent(50.0, Direction::CounterClockwise);
        assert_eq!(motor.last, Some((512, Direction::CounterClockwise)));

        motor.set_speed_percent(0.0, Direction::Clockwise);
        assert_eq!(motor.last, Some((0, Direction::Clockwise)));
    }

    #[test]
    fn test_speed_percent_clamps() {
        let mut motor = RecordingMotor { last: None };

        motor.set_speed_percent(250.0, Direction::Clockwise);
        assert_eq!(motor.last, Some((1023, Direction::Clockwise)));

        motor.set_speed_percent(-10.0, Direction::Clockwise);
        assert_eq!(motor.last, Some((0, Direction::Clockwise)));

        motor.set_speed_percent(f32::NAN, Direction::Clockwise);
        assert_eq!(motor.last, Some((0, Direction::Clockwise)));
    }
}
