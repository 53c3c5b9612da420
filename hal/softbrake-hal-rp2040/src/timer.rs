//! One-shot timer serviced by an async task
//!
//! The soft-brake cycle needs a timer that fires once per arming and can be
//! re-armed from its own callback. Here the "callback" runs in an embassy
//! task: [`SoftBrakeTimer`] posts arm/cancel commands through a signal and
//! [`TimerService::run`] waits for the deadline or the next command,
//! whichever comes first.
//!
//! ```text
//!  foreground                    timer task
//!  ----------                    ----------
//!  start_once(1668) --Arm-->     wait until now+1668 µs
//!                                on_fire() -> start_once(1665) --Arm--> ...
//!  stop()          --Cancel-->   drop deadline, wait for next command
//! ```
//!
//! The signal keeps only the latest command, so a cancel followed by an
//! arm is seen as the arm. The bookkeeping on both sides lives in
//! `softbrake_hal::{ArmState, DeadlineSchedule}`.

use core::cell::Cell;

use defmt::*;
use embassy_futures::select::{select, Either};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::signal::Signal;
use embassy_time::{Instant, Timer};
use softbrake_hal::{ArmState, DeadlineSchedule, OneShotTimer, TimerCommand};

/// Async service behind one [`SoftBrakeTimer`]
///
/// Typically a `static`, driven by a dedicated task calling [`run`].
///
/// [`run`]: TimerService::run
pub struct TimerService {
    commands: Signal<CriticalSectionRawMutex, TimerCommand>,
    arm: Mutex<CriticalSectionRawMutex, Cell<ArmState>>,
}

impl Default for TimerService {
    fn default() -> Self {
        Self::new()
    }
}

impl TimerService {
    /// Create an idle service
    pub const fn new() -> Self {
        Self {
            commands: Signal::new(),
            arm: Mutex::new(Cell::new(ArmState::new())),
        }
    }

    /// Get a timer handle posting to this service
    pub fn timer(&self) -> SoftBrakeTimer<'_> {
        SoftBrakeTimer { service: self }
    }

    /// Service the timer forever
    ///
    /// Calls `on_fire` each time an armed delay elapses. `on_fire` may
    /// re-arm through the timer handle. A command that arrives together
    /// with an elapsed deadline wins, so a cancelled arming never fires.
    pub async fn run<F: FnMut()>(&self, mut on_fire: F) -> ! {
        info!("Soft-brake timer service started");

        let mut schedule = DeadlineSchedule::default();

        loop {
            let Some(deadline_us) = schedule.deadline_us() else {
                let cmd = self.commands.wait().await;
                Self::apply(&mut schedule, cmd);
                continue;
            };

            let deadline = Instant::from_micros(deadline_us);
            match select(Timer::at(deadline), self.commands.wait()).await {
                Either::First(()) => {
                    let pending = self.commands.try_take();
                    if schedule.on_elapsed(pending, now_us()) {
                        self.update_arm(|arm| arm.fired());
                        trace!("Soft-brake timer fired");
                        on_fire();
                    } else if let Some(cmd) = pending {
                        debug!("Soft-brake deadline superseded by {}", cmd);
                    }
                }
                Either::Second(cmd) => Self::apply(&mut schedule, cmd),
            }
        }
    }

    fn apply(schedule: &mut DeadlineSchedule, cmd: TimerCommand) {
        match cmd {
            TimerCommand::Arm(delay_us) => trace!("Soft-brake timer armed for {} us", delay_us),
            TimerCommand::Cancel => debug!("Soft-brake timer cancelled"),
        }
        schedule.apply(cmd, now_us());
    }

    fn update_arm<R>(&self, f: impl FnOnce(&mut ArmState) -> R) -> R {
        self.arm.lock(|cell| {
            let mut arm = cell.get();
            let result = f(&mut arm);
            cell.set(arm);
            result
        })
    }
}

fn now_us() -> u64 {
    Instant::now().as_micros()
}

/// [`OneShotTimer`] handle to a [`TimerService`]
#[derive(Clone, Copy)]
pub struct SoftBrakeTimer<'a> {
    service: &'a TimerService,
}

impl OneShotTimer for SoftBrakeTimer<'_> {
    fn start_once(&mut self, delay_us: u32) {
        let cmd = self.service.update_arm(|arm| arm.start_once(delay_us));
        self.service.commands.signal(cmd);
    }

    fn stop(&mut self) {
        if let Some(cmd) = self.service.update_arm(|arm| arm.stop()) {
            self.service.commands.signal(cmd);
        }
    }

    fn is_armed(&self) -> bool {
        self.service.arm.lock(|cell| cell.get().is_armed())
    }
}
