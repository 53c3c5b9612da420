//! Board-agnostic core for debounced inputs and soft-brake motor control
//!
//! This crate contains everything that does not touch hardware:
//!
//! - Driver traits (button bank, H-bridge motor)
//! - Configuration types (timing policy, motor behavior, pin mapping)
//! - Numeric helpers shared by the drivers

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod math;
pub mod traits;
