//! Periodic tick scheduling
//!
//! The engine does not own a clock. It hands a repeating callback to a
//! `TickScheduler` once, at construction; the host decides how the period is
//! realised (a glib timeout in the application, `ManualScheduler` in tests).

use std::cell::RefCell;
use std::ops::ControlFlow;
use std::time::Duration;

/// Repeating callback. Returning `ControlFlow::Break` asks the scheduler to
/// drop it; `Continue` keeps it registered.
pub type TickCallback = Box<dyn FnMut() -> ControlFlow<()>>;

/// Something that can invoke a callback at a fixed period
pub trait TickScheduler {
    /// Register `tick` to be called every `period` until it returns `Break`
    fn schedule_repeating(&self, period: Duration, tick: TickCallback);
}

/// Scheduler that only fires when told to.
///
/// Used by tests and anywhere the caller drives time by hand.
#[derive(Default)]
pub struct ManualScheduler {
    callbacks: RefCell<Vec<(Duration, TickCallback)>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Invoke every registered callback once, dropping the ones that break.
    /// Callbacks registered while firing are kept but not invoked this round.
    pub fn fire(&self) {
        let mut current = std::mem::take(&mut *self.callbacks.borrow_mut());
        current.retain_mut(|(_, tick)| tick().is_continue());

        let mut callbacks = self.callbacks.borrow_mut();
        current.append(&mut callbacks);
        *callbacks = current;
    }

    /// Fire `n` times in a row
    pub fn fire_n(&self, n: usize) {
        for _ in 0..n {
            self.fire();
        }
    }

    /// Number of live registrations
    pub fn registered(&self) -> usize {
        self.callbacks.borrow().len()
    }

    /// Periods of the live registrations, in registration order
    pub fn periods(&self) -> Vec<Duration> {
        self.callbacks.borrow().iter().map(|(period, _)| *period).collect()
    }
}

impl TickScheduler for ManualScheduler {
    fn schedule_repeating(&self, period: Duration, tick: TickCallback) {
        self.callbacks.borrow_mut().push((period, tick));
    }
}
