//! Softbrake Hardware Abstraction Layer
//!
//! This crate defines the capabilities the driver core needs from the
//! surrounding platform. Chip-specific crates (e.g. `softbrake-hal-rp2040`)
//! implement them; host tests implement them with recording mocks.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Control loop (application firmware)    │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  softbrake-drivers (buttons, H-bridge)  │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  softbrake-hal (this crate - traits)    │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!          ┌─────────────────────┐
//!          │ softbrake-hal-rp2040│
//!          └─────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`], [`gpio::InputPin`] - Digital I/O
//! - [`pwm::DualPwm`] - Two PWM outputs sharing one carrier
//! - [`timer::OneShotTimer`] - Single-fire microsecond timer
//! - [`clock::Clock`] - Monotonic millisecond clock

#![no_std]
#![deny(unsafe_code)]

pub mod clock;
pub mod gpio;
pub mod pwm;
pub mod timer;

// Re-export key traits at crate root for convenience
pub use clock::Clock;
pub use gpio::{InputPin, NoPin, OutputPin};
pub use pwm::{DualPwm, EmbeddedHalPwm, PwmChannel};
pub use timer::{ArmState, DeadlineSchedule, OneShotTimer, TimerCommand};
