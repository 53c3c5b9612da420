//! Driver shared between the command loop and the timer task
//!
//! Commands and soft-brake phase flips both mutate the H-bridge driver.
//! Wrapping it in a critical-section mutex serializes them, so a phase
//! flip never observes a half-applied mode change.

use core::cell::RefCell;

use defmt::*;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use softbrake_drivers::motor::HBridgeMotor;
use softbrake_hal::{DualPwm, OneShotTimer, OutputPin};

/// Motor driver behind a critical-section mutex
///
/// Starts empty so it can live in a `static`; call [`init`] once the
/// peripherals are set up.
///
/// [`init`]: SharedMotor::init
pub struct SharedMotor<M> {
    inner: Mutex<CriticalSectionRawMutex, RefCell<Option<M>>>,
}

impl<M> Default for SharedMotor<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M> SharedMotor<M> {
    /// Create an empty slot
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(None)),
        }
    }

    /// Install the driver
    ///
    /// # Panics
    ///
    /// If a driver is already installed.
    pub fn init(&self, motor: M) {
        self.inner.lock(|cell| {
            let mut slot = cell.borrow_mut();
            if slot.is_some() {
                panic!("motor already initialized");
            }
            *slot = Some(motor);
        });
        info!("Motor driver installed");
    }

    /// Run `f` on the driver with interrupts masked
    ///
    /// Returns `None` if no driver is installed yet.
    pub fn lock<R>(&self, f: impl FnOnce(&mut M) -> R) -> Option<R> {
        self.inner.lock(|cell| cell.borrow_mut().as_mut().map(f))
    }

    /// Check if a driver is installed
    pub fn is_initialized(&self) -> bool {
        self.inner.lock(|cell| cell.borrow().is_some())
    }
}

impl<P, T, E> SharedMotor<HBridgeMotor<P, T, E>>
where
    P: DualPwm,
    T: OneShotTimer,
    E: OutputPin,
{
    /// Timer firing entry point, for [`TimerService::run`]
    ///
    /// [`TimerService::run`]: crate::timer::TimerService::run
    pub fn on_phase_timer(&self) {
        self.lock(|motor| motor.on_phase_timer());
    }
}
