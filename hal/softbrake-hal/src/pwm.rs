//! PWM output abstractions
//!
//! An H-bridge is driven by two PWM outputs that share one carrier. Carrier
//! frequency and resolution are fixed when the peripheral is set up; at
//! runtime only the duty cycle of each output changes.

use embedded_hal::pwm::SetDutyCycle;

/// Scale used when forwarding a percentage to an `embedded-hal` channel
///
/// 0.01 % steps, well below the resolution of any practical PWM counter.
const FRACTION_DENOM: u16 = 10_000;

/// One of the two outputs of a [`DualPwm`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PwmChannel {
    /// Output A (drives the motor clockwise)
    A,
    /// Output B (drives the motor counter-clockwise)
    B,
}

/// Two PWM outputs with independently settable duty cycles
pub trait DualPwm {
    /// Set the duty cycle of one output
    ///
    /// `percent` is in the range 0.0-100.0. Implementations clamp values
    /// outside that range.
    fn set_duty_percent(&mut self, channel: PwmChannel, percent: f32);

    /// Set both outputs
    fn set_duty_ab(&mut self, a_percent: f32, b_percent: f32) {
        self.set_duty_percent(PwmChannel::A, a_percent);
        self.set_duty_percent(PwmChannel::B, b_percent);
    }
}

/// Adapter from two `embedded-hal` PWM channels to [`DualPwm`]
///
/// Works with any HAL whose PWM outputs implement
/// [`embedded_hal::pwm::SetDutyCycle`], for example the halves of a split
/// RP2040 PWM slice.
pub struct EmbeddedHalPwm<A, B> {
    a: A,
    b: B,
}

impl<A: SetDutyCycle, B: SetDutyCycle> EmbeddedHalPwm<A, B> {
    /// Wrap a pair of channels
    pub fn new(a: A, b: B) -> Self {
        Self { a, b }
    }

    /// Release the wrapped channels
    pub fn release(self) -> (A, B) {
        (self.a, self.b)
    }
}

impl<A: SetDutyCycle, B: SetDutyCycle> DualPwm for EmbeddedHalPwm<A, B> {
    fn set_duty_percent(&mut self, channel: PwmChannel, percent: f32) {
        let num = percent_to_fraction(percent);
        let written = match channel {
            PwmChannel::A => self.a.set_duty_cycle_fraction(num, FRACTION_DENOM).is_ok(),
            PwmChannel::B => self.b.set_duty_cycle_fraction(num, FRACTION_DENOM).is_ok(),
        };

        // The command surface is infallible; the previous duty stays in effect
        if !written {
            #[cfg(feature = "defmt")]
            defmt::warn!("PWM channel {} rejected duty {}/{}", channel, num, FRACTION_DENOM);
        }
    }
}

/// Convert a percentage to a numerator over [`FRACTION_DENOM`]
fn percent_to_fraction(percent: f32) -> u16 {
    // NaN casts to 0
    let clamped = percent.clamp(0.0, 100.0);
    (clamped * (FRACTION_DENOM as f32 / 100.0) + 0.5) as u16
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;
    use embedded_hal::pwm::ErrorType;

    /// Mock PWM channel with a 0-1000 duty range
    struct MockChannel {
        duty: u16,
    }

    impl ErrorType for MockChannel {
        type Error = Infallible;
    }

    impl SetDutyCycle for MockChannel {
        fn max_duty_cycle(&self) -> u16 {
            1000
        }

        fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Self::Error> {
            self.duty = duty;
            Ok(())
        }
    }

    #[test]
    fn test_percent_to_fraction() {
        assert_eq!(percent_to_fraction(0.0), 0);
        assert_eq!(percent_to_fraction(50.0), 5_000);
        assert_eq!(percent_to_fraction(100.0), 10_000);
        assert_eq!(percent_to_fraction(150.0), 10_000);
        assert_eq!(percent_to_fraction(-3.0), 0);
        assert_eq!(percent_to_fraction(f32::NAN), 0);
    }

    /// Mock PWM channel whose writes always fail
    struct FailingChannel;

    impl ErrorType for FailingChannel {
        type Error = embedded_hal::pwm::ErrorKind;
    }

    impl SetDutyCycle for FailingChannel {
        fn max_duty_cycle(&self) -> u16 {
            1000
        }

        fn set_duty_cycle(&mut self, _duty: u16) -> Result<(), Self::Error> {
            Err(embedded_hal::pwm::ErrorKind::Other)
        }
    }

    #[test]
    fn test_failed_write_does_not_block_other_channel() {
        let mut pwm = EmbeddedHalPwm::new(FailingChannel, MockChannel { duty: 0 });

        pwm.set_duty_ab(100.0, 40.0);
        let (_, b) = pwm.release();
        assert_eq!(b.duty, 400);
    }

    #[test]
    fn test_embedded_hal_adapter() {
        let mut pwm = EmbeddedHalPwm::new(MockChannel { duty: 0 }, MockChannel { duty: 0 });

        pwm.set_duty_ab(100.0, 25.0);
        let (a, b) = pwm.release();
        assert_eq!(a.duty, 1000);
        assert_eq!(b.duty, 250);
    }
}
