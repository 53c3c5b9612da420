//! Dual-PWM H-bridge driver with soft brake
//!
//! Drives a brushed DC motor through an H-bridge whose two half-bridges
//! are fed by PWM outputs A and B (BTS7960-style boards), with an optional
//! shared enable line.
//!
//! | Mode        | A        | B        | Enable   |
//! |-------------|----------|----------|----------|
//! | Drive CW    | duty     | 0 %      | on       |
//! | Drive CCW   | 0 %      | duty     | on       |
//! | Hard brake  | 100 %    | 100 %    | on       |
//! | HiZ         | 0 %      | 0 %      | off      |
//! | HiZ awake   | 0 %      | 0 %      | on       |
//! | Soft brake  | alternates hard brake and coast  | on |
//!
//! # Contexts
//!
//! Commands run in the foreground context. [`HBridgeMotor::on_phase_timer`]
//! runs wherever the platform dispatches one-shot timer firings. The two
//! must be serialized by the owner, e.g. by sharing the driver through a
//! critical-section mutex. Every mode change stops the timer before it
//! touches the outputs, and a firing delivered after that is ignored.
//!
//! ```ignore
//! let mut motor = HBridgeMotor::new(pwm, timer, Some(enable), PwmSettings::default());
//! motor.set_speed(800, Direction::Clockwise);
//! motor.set_soft_brake_pwm(300);
//! motor.set_speed(0, Direction::Clockwise); // engage soft brake
//!
//! // From the timer dispatch context:
//! motor.on_phase_timer();
//! ```

use softbrake_core::config::{
    FreewheelMode, MotorBehavior, PwmSettings, DEFAULT_SOFT_BRAKE_PWM, MIN_PHASE_US,
};
use softbrake_core::math::clamp;
use softbrake_core::traits::{BrakePhase, Direction, MotorDriver};
use softbrake_hal::{DualPwm, NoPin, OneShotTimer, OutputPin};

use super::soft_brake::DitherTiming;

/// H-bridge motor driver
///
/// Owns the PWM pair, the optional enable line and the one-shot timer
/// that paces the soft-brake cycle. The timer is stopped when the driver
/// is dropped.
pub struct HBridgeMotor<P: DualPwm, T: OneShotTimer, E: OutputPin = NoPin> {
    pwm: P,
    timer: T,
    enable: Option<E>,
    behavior: MotorBehavior,
    max_input: u16,
    /// Last level written to the enable line
    enabled: bool,
    /// Requested soft-brake duty (counts)
    soft_brake_pwm: u16,
    /// Soft-brake cycle running
    soft_active: bool,
    phase: BrakePhase,
    timing: DitherTiming,
}

impl<P: DualPwm, T: OneShotTimer, E: OutputPin> HBridgeMotor<P, T, E> {
    /// Set up a driver with the default behavior profile
    pub fn new(pwm: P, timer: T, enable: Option<E>, settings: PwmSettings) -> Self {
        Self::with_behavior(pwm, timer, enable, settings, MotorBehavior::default())
    }

    /// Set up a driver with an explicit behavior profile
    ///
    /// `HiZ` freewheel is downgraded to `HiZAwake` when no enable line is
    /// given. The driver starts enabled with both outputs at 0 %.
    pub fn with_behavior(
        pwm: P,
        timer: T,
        enable: Option<E>,
        settings: PwmSettings,
        behavior: MotorBehavior,
    ) -> Self {
        let behavior = behavior.resolved(enable.is_some());
        let max_input = settings.max_input();

        let mut motor = Self {
            pwm,
            timer,
            enable,
            behavior,
            max_input,
            enabled: false,
            soft_brake_pwm: DEFAULT_SOFT_BRAKE_PWM.min(max_input),
            soft_active: false,
            phase: BrakePhase::Coast,
            timing: DitherTiming::default(),
        };

        if let Some(pin) = motor.enable.as_mut() {
            pin.set_high();
            motor.enabled = true;
        }
        motor.write_ab(0.0, 0.0);
        motor
    }

    /// Engage the soft brake at the stored duty
    ///
    /// A level of about zero falls through to freewheel and a level of
    /// about one to a hard brake. Otherwise the brake/coast cycle starts
    /// in coast, or picks up the new timing if it is already running.
    pub fn start_soft_brake(&mut self) {
        self.recompute_timing();

        if self.timing.is_coast() {
            self.stop_soft_brake();
            self.freewheel();
            return;
        }

        if self.timing.is_full_brake() {
            self.stop_soft_brake();
            self.set_enable(true);
            self.write_ab(100.0, 100.0);
            return;
        }

        if !self.soft_active {
            self.soft_active = true;
            self.phase = BrakePhase::Coast;
            self.set_enable(true);
            self.apply_phase();
            self.schedule_next_phase();
        }
    }

    /// Stop the soft-brake cycle
    ///
    /// Cancels any pending timer arming. Outputs are left as they are for
    /// the caller to overwrite. Safe to call when not running.
    pub fn stop_soft_brake(&mut self) {
        self.timer.stop();
        self.soft_active = false;
    }

    /// Advance the soft-brake cycle by one phase
    ///
    /// Called from the timer dispatch context each time the one-shot
    /// fires. Does nothing once the cycle has been stopped.
    pub fn on_phase_timer(&mut self) {
        if !self.soft_active {
            return;
        }

        self.phase = self.phase.next();
        self.apply_phase();
        self.schedule_next_phase();
    }

    /// Get the effective behavior profile
    pub fn behavior(&self) -> &MotorBehavior {
        &self.behavior
    }

    /// Get the stored soft-brake duty (counts)
    pub fn soft_brake_pwm(&self) -> u16 {
        self.soft_brake_pwm
    }

    /// Check if the brake/coast cycle is running
    pub fn is_soft_braking(&self) -> bool {
        self.soft_active
    }

    /// Get the current phase of the soft-brake cycle
    pub fn brake_phase(&self) -> BrakePhase {
        self.phase
    }

    /// Get the brake share of the soft-brake period (0.0-1.0)
    pub fn brake_level(&self) -> f32 {
        self.timing.level
    }

    /// Get the (brake, coast) phase durations in µs
    pub fn phase_durations_us(&self) -> (u32, u32) {
        (self.timing.brake_us, self.timing.coast_us)
    }

    /// Check if the enable line is asserted
    ///
    /// Always `true` when no enable line is wired.
    pub fn is_enabled(&self) -> bool {
        self.enable.is_none() || self.enabled
    }

    /// Check if an enable line is wired
    pub fn has_enable_pin(&self) -> bool {
        self.enable.is_some()
    }

    fn freewheel(&mut self) {
        match self.behavior.freewheel_mode {
            FreewheelMode::HiZ => {
                self.set_enable(false);
                self.write_ab(0.0, 0.0);
            }
            FreewheelMode::HiZAwake => self.coast_awake(),
            FreewheelMode::DitherBrake => {
                let dither = self.behavior.dither_pwm.min(self.max_input);
                let timing =
                    DitherTiming::compute(dither, self.max_input, self.behavior.soft_brake_hz);
                if timing.is_coast() {
                    // Would fall straight back into freewheel
                    self.coast_awake();
                } else {
                    self.soft_brake_pwm = dither;
                    self.start_soft_brake();
                }
            }
        }
    }

    fn coast_awake(&mut self) {
        self.set_enable(true);
        self.write_ab(0.0, 0.0);
    }

    fn recompute_timing(&mut self) {
        self.timing = DitherTiming::compute(
            self.soft_brake_pwm,
            self.max_input,
            self.behavior.soft_brake_hz,
        );
    }

    fn apply_phase(&mut self) {
        match self.phase {
            BrakePhase::Brake => {
                self.set_enable(true);
                self.write_ab(100.0, 100.0);
            }
            BrakePhase::Coast => self.write_ab(0.0, 0.0),
        }
    }

    fn schedule_next_phase(&mut self) {
        if !self.soft_active {
            return;
        }
        let delay_us = self.timing.duration_us(self.phase).max(MIN_PHASE_US);
        self.timer.start_once(delay_us);
    }

    fn set_enable(&mut self, on: bool) {
        if let Some(pin) = self.enable.as_mut() {
            if self.enabled != on {
                pin.set_state(on);
                self.enabled = on;
            }
        }
    }

    fn write_ab(&mut self, a_percent: f32, b_percent: f32) {
        self.pwm.set_duty_ab(a_percent, b_percent);
    }
}

impl<P: DualPwm, T: OneShotTimer, E: OutputPin> MotorDriver for HBridgeMotor<P, T, E> {
    fn set_speed(&mut self, speed: i32, dir: Direction) {
        let counts = clamp(speed, 0, self.max_input as i32);
        if counts == 0 {
            self.start_soft_brake();
            return;
        }

        self.stop_soft_brake();
        self.set_enable(true);

        let duty = counts as f32 * 100.0 / self.max_input as f32;
        match dir {
            Direction::Clockwise => self.write_ab(duty, 0.0),
            Direction::CounterClockwise => self.write_ab(0.0, duty),
        }
    }

    fn set_freewheel(&mut self) {
        self.stop_soft_brake();
        self.freewheel();
    }

    fn set_hard_brake(&mut self) {
        self.stop_soft_brake();
        self.set_enable(true);
        self.write_ab(100.0, 100.0);
    }

    fn set_soft_brake_pwm(&mut self, pwm: i32) {
        self.soft_brake_pwm = clamp(pwm, 0, self.max_input as i32) as u16;

        if self.soft_active {
            self.recompute_timing();
            if self.timing.is_coast() || self.timing.is_full_brake() {
                self.start_soft_brake();
            }
        }
    }

    fn max_pwm_input(&self) -> u16 {
        self.max_input
    }
}

impl<P: DualPwm, T: OneShotTimer, E: OutputPin> Drop for HBridgeMotor<P, T, E> {
    fn drop(&mut self) {
        self.stop_soft_brake();
    }
}
