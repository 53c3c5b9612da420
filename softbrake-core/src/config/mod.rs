//! Configuration types
//!
//! Timing policies, motor behavior profiles and board wiring, each with
//! defaults matching the reference hardware.

pub mod hardware;
pub mod types;

pub use hardware::*;
pub use types::*;
