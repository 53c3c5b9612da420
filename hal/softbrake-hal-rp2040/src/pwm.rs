//! PWM slice as an H-bridge output pair
//!
//! One RP2040 PWM slice has two outputs (A and B) sharing a counter, which
//! is exactly what an H-bridge needs: both halves run on the same carrier
//! and only their compare values differ.
//!
//! The carrier is set by the counter wrap (`top`) and the 8.4 fixed-point
//! clock divider:
//!
//! ```text
//! f_pwm = SYS_CLK / (divider * (top + 1))
//! ```

use defmt::*;
use embassy_rp::clocks::clk_sys_freq;
use embassy_rp::pwm::{Config as PwmConfig, Pwm};
use fixed::types::extra::U4;
use fixed::FixedU16;
use softbrake_core::config::PwmSettings;
use softbrake_core::math::clamp;
use softbrake_hal::{DualPwm, PwmChannel};

/// Both outputs of one PWM slice
pub struct RpDualPwm<'d> {
    pwm: Pwm<'d>,
    config: PwmConfig,
}

impl<'d> RpDualPwm<'d> {
    /// Configure the slice for `settings` with both outputs at 0 %
    ///
    /// `pwm` must have been created with both outputs, e.g. by
    /// `Pwm::new_output_ab`.
    ///
    /// # Panics
    ///
    /// If `settings` is invalid or the carrier cannot be reached from the
    /// current system clock.
    pub fn new(mut pwm: Pwm<'d>, settings: &PwmSettings) -> Self {
        let sys_clk_hz = clk_sys_freq();
        if let Err(e) = settings.validate_for(sys_clk_hz) {
            panic!("invalid PWM settings for {} Hz system clock: {}", sys_clk_hz, e);
        }

        let (int_div, frac_div) = settings.clock_divider(sys_clk_hz);

        let mut config = PwmConfig::default();
        config.top = settings.top();
        // 8.4 fixed point: integer in the upper 8 bits, sixteenths below
        config.divider = FixedU16::<U4>::from_bits(((int_div as u16) << 4) | frac_div as u16);
        config.compare_a = 0;
        config.compare_b = 0;
        pwm.set_config(&config);

        info!(
            "PWM {} Hz, top {}, divider {}+{}/16",
            settings.frequency_hz, config.top, int_div, frac_div
        );

        Self { pwm, config }
    }

    /// Compare value for a duty in percent
    ///
    /// 100 % needs a compare above `top` to keep the output high for the
    /// whole period.
    fn compare_for(&self, percent: f32) -> u16 {
        let percent = if percent.is_nan() { 0.0 } else { clamp(percent, 0.0, 100.0) };
        let counts = self.config.top as u32 + 1;
        let compare = (percent * counts as f32 / 100.0 + 0.5) as u32;
        compare.min(u16::MAX as u32) as u16
    }
}

impl DualPwm for RpDualPwm<'_> {
    fn set_duty_percent(&mut self, channel: PwmChannel, percent: f32) {
        let compare = self.compare_for(percent);
        match channel {
            PwmChannel::A => self.config.compare_a = compare,
            PwmChannel::B => self.config.compare_b = compare,
        }
        self.pwm.set_config(&self.config);
    }

    fn set_duty_ab(&mut self, a_percent: f32, b_percent: f32) {
        // One register write so both outputs change on the same period
        self.config.compare_a = self.compare_for(a_percent);
        self.config.compare_b = self.compare_for(b_percent);
        self.pwm.set_config(&self.config);
    }
}
