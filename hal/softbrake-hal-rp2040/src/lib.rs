//! RP2040 bindings for the softbrake drivers
//!
//! Implements the `softbrake-hal` capability traits on top of embassy-rp:
//!
//! - [`gpio`]: button inputs and the driver enable line
//! - [`pwm`]: one PWM slice as the A/B pair of an H-bridge
//! - [`timer`]: one-shot timer serviced by an async task
//! - [`shared`]: driver shared between the command loop and the timer task
//! - [`clock`]: millisecond clock for the button bank
//!
//! # Wiring it up
//!
//! ```ignore
//! static BRAKE_TIMER: TimerService = TimerService::new();
//! static MOTOR: SharedMotor<Motor> = SharedMotor::new();
//!
//! #[embassy_executor::task]
//! async fn brake_timer_task() {
//!     BRAKE_TIMER.run(|| MOTOR.on_phase_timer()).await
//! }
//!
//! let pwm = Pwm::new_output_ab(p.PWM_SLICE0, p.PIN_16, p.PIN_17, Default::default());
//! let pwm = RpDualPwm::new(pwm, &hw.pwm);
//! let enable = RpOutput::enable_line(p.PIN_18);
//! MOTOR.init(HBridgeMotor::with_behavior(
//!     pwm,
//!     BRAKE_TIMER.timer(),
//!     Some(enable),
//!     hw.pwm,
//!     hw.behavior,
//! ));
//! spawner.spawn(brake_timer_task()).unwrap();
//!
//! MOTOR.lock(|m| m.set_speed(512, Direction::Clockwise));
//! ```

#![no_std]

pub mod clock;
pub mod gpio;
pub mod pwm;
pub mod shared;
pub mod timer;

pub use clock::EmbassyClock;
pub use gpio::{RpInput, RpOutput};
pub use pwm::RpDualPwm;
pub use shared::SharedMotor;
pub use timer::{SoftBrakeTimer, TimerService};
