//! Motor driver implementations
//!
//! - H-bridge driver: drive, hard brake, freewheel and soft brake
//! - Soft-brake timing: brake/coast split of one dither period

pub mod hbridge;
pub mod soft_brake;

pub use hbridge::HBridgeMotor;
pub use soft_brake::DitherTiming;
