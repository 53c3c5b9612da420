//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in softbrake-core, written against the capability traits of
//! softbrake-hal so they run unchanged on any board and in host tests:
//!
//! - Debounced button bank with short/long press classification
//! - Dual-PWM H-bridge motor driver with a timer-scheduled soft brake

#![no_std]
#![deny(unsafe_code)]

pub mod button;
pub mod motor;
