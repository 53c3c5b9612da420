//! Hardware-facing driver traits
//!
//! These traits define the interface between the control loop and the
//! concrete drivers in `softbrake-drivers`. A control loop written
//! against them works with any backend, including test doubles.

pub mod button;
pub mod motor;

pub use button::{ButtonBank, PressEvent};
pub use motor::{BrakePhase, Direction, MotorDriver};
