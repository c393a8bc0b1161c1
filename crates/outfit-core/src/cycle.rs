//! Outfit cycle state machine.
//!
//! ```text
//! Idle --start--> Running(cursor = 1)
//! Running(c) --tick--> Idle                  if stale, stopped, or c >= roster size
//!                  --> emit roster[c],
//!                      schedule tick(c + 1)  otherwise
//! ```
//!
//! Every start issues a new generation. A scheduled [`CycleTick`] carries
//! the generation it was issued for; when it fires against a different
//! live generation it does nothing. Stopping retires the live generation,
//! so the tick already in flight fizzles instead of being torn down.
//!
//! The controller never sleeps. Callers get a [`ScheduledTick`] back and
//! are responsible for delivering it after `after` has elapsed.

use std::time::Duration;

/// Delay between two consecutive cycle steps.
pub const CYCLE_INTERVAL: Duration = Duration::from_millis(5000);

/// Cursor of the first step. Slot 0 is our own avatar.
pub const FIRST_CURSOR: usize = 1;

/// One pending step of a cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleTick {
    pub generation: u64,
    pub cursor: usize,
}

/// A tick plus how long to wait before delivering it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledTick {
    pub after: Duration,
    pub tick: CycleTick,
}

/// Result of feeding a tick to the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Nothing to do; the cycle (if this tick was live) is over.
    Halt,
    /// Apply roster entry `cursor`, then deliver `next`.
    Emit { cursor: usize, next: ScheduledTick },
}

#[derive(Debug)]
pub struct CycleController {
    generation: u64,
    running: bool,
    interval: Duration,
}

impl Default for CycleController {
    fn default() -> Self {
        CycleController::new(CYCLE_INTERVAL)
    }
}

impl CycleController {
    pub fn new(interval: Duration) -> Self {
        CycleController {
            generation: 0,
            running: false,
            interval,
        }
    }

    /// Begin a new cycle, superseding any running one.
    ///
    /// The returned tick should be fed to [`advance`](Self::advance)
    /// immediately; the first step is not delayed.
    pub fn start(&mut self) -> CycleTick {
        self.generation = self.generation.wrapping_add(1);
        self.running = true;
        CycleTick {
            generation: self.generation,
            cursor: FIRST_CURSOR,
        }
    }

    /// Retire the live cycle. Pending ticks become stale.
    pub fn stop(&mut self) {
        if self.running {
            self.generation = self.generation.wrapping_add(1);
            self.running = false;
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// True if `tick` belongs to the cycle that is running right now.
    pub fn is_live(&self, tick: CycleTick) -> bool {
        self.running && tick.generation == self.generation
    }

    /// Decide what `tick` does against a roster of `roster_len` users.
    pub fn advance(&mut self, tick: CycleTick, roster_len: usize) -> Step {
        if !self.is_live(tick) {
            return Step::Halt;
        }

        if tick.cursor >= roster_len {
            self.running = false;
            return Step::Halt;
        }

        Step::Emit {
            cursor: tick.cursor,
            next: ScheduledTick {
                after: self.interval,
                tick: CycleTick {
                    generation: tick.generation,
                    cursor: tick.cursor + 1,
                },
            },
        }
    }
}
