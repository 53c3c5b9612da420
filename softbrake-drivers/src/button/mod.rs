//! Button input drivers
//!
//! - [`DebouncedButtons`]: fixed-size bank with debounce and press
//!   duration classification
//! - [`RawReader`]: how a raw pressed/released level is read from a pin

pub mod debounced;
pub mod reader;

pub use debounced::DebouncedButtons;
pub use reader::{ActiveHigh, ActiveLow, Polarity, RawReader};
