//! One-shot timer abstraction
//!
//! The timer fires its callback exactly once per arming. Re-arming from
//! inside the callback is how periodic behavior is built on top of it.
//!
//! The callback itself is not part of this trait: the platform decides
//! how firings are dispatched (interrupt, timer task, async service) and
//! calls back into the owning driver from that context.

/// Single-fire microsecond timer
pub trait OneShotTimer {
    /// Arm the timer to fire once after `delay_us` microseconds
    ///
    /// Arming while already armed replaces the pending deadline.
    fn start_once(&mut self, delay_us: u32);

    /// Cancel a pending arming
    ///
    /// No-op if the timer is not armed. Cancellation is best-effort: a
    /// firing that is already being dispatched may still be delivered.
    fn stop(&mut self);

    /// Check whether an arming is pending
    fn is_armed(&self) -> bool;
}

/// Command from a timer handle to the context servicing its deadline
///
/// Used by platforms whose timer callback runs in a separate task rather
/// than an interrupt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimerCommand {
    /// Fire once after this many microseconds
    Arm(u32),
    /// Drop the pending deadline
    Cancel,
}

/// Handle-side arming state of a command-driven timer
///
/// Tracks whether an arming is outstanding so that `stop` only posts a
/// cancel when there is something to cancel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ArmState {
    armed: bool,
}

impl ArmState {
    /// Create a disarmed state
    pub const fn new() -> Self {
        Self { armed: false }
    }

    /// Record an arming, returning the command to post
    pub fn start_once(&mut self, delay_us: u32) -> TimerCommand {
        self.armed = true;
        TimerCommand::Arm(delay_us)
    }

    /// Record a cancellation, returning the command to post, if any
    pub fn stop(&mut self) -> Option<TimerCommand> {
        let was_armed = core::mem::replace(&mut self.armed, false);
        was_armed.then_some(TimerCommand::Cancel)
    }

    /// Record that the pending arming fired
    pub fn fired(&mut self) {
        self.armed = false;
    }

    /// Check whether an arming is outstanding
    pub fn is_armed(&self) -> bool {
        self.armed
    }
}

/// Service-side deadline of a command-driven timer
///
/// Times are microseconds on the platform's monotonic clock.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DeadlineSchedule {
    deadline_us: Option<u64>,
}

impl DeadlineSchedule {
    /// Apply a command received at `now_us`
    pub fn apply(&mut self, cmd: TimerCommand, now_us: u64) {
        self.deadline_us = match cmd {
            TimerCommand::Arm(delay_us) => Some(now_us.saturating_add(delay_us as u64)),
            TimerCommand::Cancel => None,
        };
    }

    /// Handle an elapsed deadline
    ///
    /// `pending` is a command that arrived while the deadline was
    /// elapsing; it takes precedence, so a cancelled or replaced arming
    /// never fires. Returns `true` if the callback should run.
    pub fn on_elapsed(&mut self, pending: Option<TimerCommand>, now_us: u64) -> bool {
        match pending {
            Some(cmd) => {
                self.apply(cmd, now_us);
                false
            }
            None => {
                let due = self.deadline_us.is_some();
                self.deadline_us = None;
                due
            }
        }
    }

    /// Pending deadline, if armed
    pub fn deadline_us(&self) -> Option<u64> {
        self.deadline_us
    }
}
