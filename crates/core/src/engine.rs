//! Countdown engine
//!
//! Owns the single authoritative countdown and its pause flag. Advances on a
//! 1-second tick and tells its observers about every change and about expiry.
//!
//! The engine is shared between the tick source and the view as
//! `Rc<TimerEngine>`; all state sits in `Cell`/`RefCell` so every operation
//! takes `&self` and observers may call straight back into the engine while
//! a notification is being delivered.

use crate::constants::TICK_PERIOD;
use crate::scheduler::TickScheduler;
use minimal_timer_types::Time;
use std::cell::{Cell, RefCell};
use std::ops::ControlFlow;
use std::rc::Rc;
use uuid::Uuid;

/// Notification raised by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    /// The countdown now holds this value
    TimeChanged(Time),
    /// A tick brought the countdown to zero
    TimedOut,
}

/// Handle returned by `on_event`, used to unsubscribe
pub type CallbackId = String;

type EventCallback = Rc<dyn Fn(&TimerEvent)>;

pub struct TimerEngine {
    remaining: Cell<Time>,
    paused: Cell<bool>,
    /// Observers in registration order
    callbacks: RefCell<Vec<(CallbackId, EventCallback)>>,
}

impl TimerEngine {
    /// Create an engine that is not driven by any scheduler.
    /// Negative initial values are clamped to zero.
    pub fn new(initial: Time) -> Self {
        let initial = if initial.is_negative() {
            log::warn!("Ignoring negative initial time {}, starting at zero", initial);
            Time::ZERO
        } else {
            initial
        };

        Self {
            remaining: Cell::new(initial),
            paused: Cell::new(false),
            callbacks: RefCell::new(Vec::new()),
        }
    }

    /// Create an engine and register its 1-second tick with `scheduler`.
    ///
    /// The registration is made exactly once and holds only a weak reference:
    /// it stays registered for the engine's whole life (pausing merely turns
    /// the tick into a no-op) and asks to be dropped once the engine is gone.
    pub fn with_scheduler<S>(initial: Time, scheduler: &S) -> Rc<Self>
    where
        S: TickScheduler + ?Sized,
    {
        let engine = Rc::new(Self::new(initial));
        let weak = Rc::downgrade(&engine);

        scheduler.schedule_repeating(
            TICK_PERIOD,
            Box::new(move || match weak.upgrade() {
                Some(engine) => {
                    engine.tick();
                    ControlFlow::Continue(())
                }
                None => {
                    log::debug!("Timer engine dropped, stopping its tick");
                    ControlFlow::Break(())
                }
            }),
        );

        engine
    }

    /// Advance the countdown by one second.
    ///
    /// Does nothing while paused or once the countdown has reached zero.
    /// Raises `TimeChanged`, then `TimedOut` if the new value is zero.
    pub fn tick(&self) {
        if self.paused.get() {
            return;
        }

        let current = self.remaining.get();
        if current.seconds() <= 0 {
            return;
        }

        let next = Time::from_secs(current.seconds() - 1);
        self.remaining.set(next);
        log::trace!("Tick: {} remaining", next);

        self.notify(TimerEvent::TimeChanged(next));
        if next.is_zero() {
            log::info!("Countdown finished");
            self.notify(TimerEvent::TimedOut);
        }
    }

    /// Replace the countdown value.
    ///
    /// Negative values and the value already held are ignored without
    /// notification. Setting zero never raises `TimedOut`; only a tick does.
    pub fn set_time(&self, time: Time) {
        if time.is_negative() {
            log::debug!("Rejected negative time {}", time);
            return;
        }
        if self.remaining.get() == time {
            return;
        }

        self.remaining.set(time);
        log::trace!("Time set to {}", time);
        self.notify(TimerEvent::TimeChanged(time));
    }

    /// Current countdown value
    pub fn time(&self) -> Time {
        self.remaining.get()
    }

    /// Stop ticks from advancing the countdown
    pub fn pause(&self) {
        self.paused.set(true);
    }

    /// Let ticks advance the countdown again
    pub fn resume(&self) {
        self.paused.set(false);
    }

    pub fn is_paused(&self) -> bool {
        self.paused.get()
    }

    /// Register an observer for every `TimerEvent`.
    /// Returns an id that can be passed to `remove_callback`.
    ///
    /// Observers are called synchronously, in registration order, at the
    /// point the event is raised.
    pub fn on_event<F>(&self, callback: F) -> CallbackId
    where
        F: Fn(&TimerEvent) + 'static,
    {
        let id = Uuid::new_v4().to_string();
        self.callbacks
            .borrow_mut()
            .push((id.clone(), Rc::new(callback)));
        id
    }

    /// Remove a previously registered observer by its id.
    /// Returns true if an observer was removed.
    pub fn remove_callback(&self, callback_id: &str) -> bool {
        let mut callbacks = self.callbacks.borrow_mut();
        let before = callbacks.len();
        callbacks.retain(|(id, _)| id != callback_id);
        callbacks.len() != before
    }

    pub fn clear_all_callbacks(&self) {
        self.callbacks.borrow_mut().clear();
    }

    pub fn callback_count(&self) -> usize {
        self.callbacks.borrow().len()
    }

    fn notify(&self, event: TimerEvent) {
        // Snapshot so observers can (un)subscribe or re-enter the engine
        let callbacks: Vec<EventCallback> = self
            .callbacks
            .borrow()
            .iter()
            .map(|(_, callback)| callback.clone())
            .collect();

        for callback in callbacks {
            callback(&event);
        }
    }
}

impl Default for TimerEngine {
    fn default() -> Self {
        Self::new(Time::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::ManualScheduler;

    fn record(engine: &TimerEngine) -> Rc<RefCell<Vec<TimerEvent>>> {
        let events = Rc::new(RefCell::new(Vec::new()));
        let events_clone = events.clone();
        engine.on_event(move |event| events_clone.borrow_mut().push(*event));
        events
    }

    #[test]
    fn test_set_time_then_get() {
        for seconds in [0, 1, 42, 59, 300, 3600, 86_400] {
            let engine = TimerEngine::new(Time::from_secs(42));
            let events = record(&engine);

            engine.set_time(Time::from_secs(seconds));

            assert_eq!(engine.time(), Time::from_secs(seconds));
            if seconds == 42 {
                assert!(events.borrow().is_empty());
            } else {
                assert_eq!(
                    *events.borrow(),
                    vec![TimerEvent::TimeChanged(Time::from_secs(seconds))]
                );
            }
        }
    }

    #[test]
    fn test_set_same_time_is_silent() {
        let engine = TimerEngine::new(Time::from_secs(10));
        let events = record(&engine);

        engine.set_time(Time::from_secs(10));

        assert_eq!(engine.time(), Time::from_secs(10));
        assert!(events.borrow().is_empty());
    }

    #[test]
    fn test_negative_set_time_is_rejected() {
        for seconds in [-1, -60, i64::MIN] {
            let engine = TimerEngine::new(Time::from_secs(5));
            let events = record(&engine);

            engine.set_time(Time::from_secs(seconds));

            assert_eq!(engine.time(), Time::from_secs(5));
            assert!(events.borrow().is_empty());
        }
    }

    #[test]
    fn test_set_zero_does_not_time_out() {
        let engine = TimerEngine::new(Time::from_secs(5));
        let events = record(&engine);

        engine.set_time(Time::ZERO);

        assert_eq!(*events.borrow(), vec![TimerEvent::TimeChanged(Time::ZERO)]);
    }

    #[test]
    fn test_tick_decrements_and_notifies() {
        let engine = TimerEngine::new(Time::from_secs(10));
        let events = record(&engine);

        engine.tick();

        assert_eq!(engine.time(), Time::from_secs(9));
        assert_eq!(
            *events.borrow(),
            vec![TimerEvent::TimeChanged(Time::from_secs(9))]
        );
    }

    #[test]
    fn test_tick_at_zero_is_noop() {
        let engine = TimerEngine::new(Time::ZERO);
        let events = record(&engine);

        engine.tick();
        engine.tick();

        assert_eq!(engine.time(), Time::ZERO);
        assert!(events.borrow().is_empty());
    }

    #[test]
    fn test_pause_blocks_ticks_until_resume() {
        let engine = TimerEngine::new(Time::from_secs(10));
        let events = record(&engine);

        engine.pause();
        assert!(engine.is_paused());
        for _ in 0..5 {
            engine.tick();
        }
        assert_eq!(engine.time(), Time::from_secs(10));
        assert!(events.borrow().is_empty());

        engine.resume();
        assert!(!engine.is_paused());
        engine.tick();
        assert_eq!(engine.time(), Time::from_secs(9));
        assert_eq!(events.borrow().len(), 1);
    }

    #[test]
    fn test_pause_and_resume_raise_nothing() {
        let engine = TimerEngine::new(Time::from_secs(10));
        let events = record(&engine);

        engine.pause();
        engine.resume();

        assert!(events.borrow().is_empty());
    }

    #[test]
    fn test_set_time_while_paused() {
        let engine = TimerEngine::new(Time::from_secs(10));
        engine.pause();
        engine.set_time(Time::from_secs(20));
        assert_eq!(engine.time(), Time::from_secs(20));
    }

    #[test]
    fn test_countdown_from_three() {
        let engine = TimerEngine::new(Time::from_secs(3));
        let events = record(&engine);

        engine.tick();
        engine.tick();
        engine.tick();

        assert_eq!(
            *events.borrow(),
            vec![
                TimerEvent::TimeChanged(Time::from_secs(2)),
                TimerEvent::TimeChanged(Time::from_secs(1)),
                TimerEvent::TimeChanged(Time::ZERO),
                TimerEvent::TimedOut,
            ]
        );

        // Expired countdown stays put
        engine.tick();
        assert_eq!(events.borrow().len(), 4);
        assert_eq!(engine.time(), Time::ZERO);
    }

    #[test]
    fn test_negative_initial_time_clamps_to_zero() {
        let engine = TimerEngine::new(Time::from_secs(-3));
        assert_eq!(engine.time(), Time::ZERO);
    }

    #[test]
    fn test_scheduler_registers_once_and_drives_ticks() {
        let scheduler = ManualScheduler::new();
        let engine = TimerEngine::with_scheduler(Time::from_secs(2), &scheduler);

        assert_eq!(scheduler.registered(), 1);
        assert_eq!(scheduler.periods(), vec![TICK_PERIOD]);

        scheduler.fire();
        assert_eq!(engine.time(), Time::from_secs(1));

        // Stays registered while paused and after expiry
        engine.pause();
        scheduler.fire();
        assert_eq!(engine.time(), Time::from_secs(1));
        engine.resume();
        scheduler.fire_n(3);
        assert_eq!(engine.time(), Time::ZERO);
        assert_eq!(scheduler.registered(), 1);

        drop(engine);
        scheduler.fire();
        assert_eq!(scheduler.registered(), 0);
    }

    #[test]
    fn test_remove_callback() {
        let engine = TimerEngine::new(Time::from_secs(10));
        let events = Rc::new(RefCell::new(Vec::new()));
        let events_clone = events.clone();
        let id = engine.on_event(move |event| events_clone.borrow_mut().push(*event));

        assert_eq!(engine.callback_count(), 1);
        assert!(engine.remove_callback(&id));
        assert!(!engine.remove_callback(&id));
        assert_eq!(engine.callback_count(), 0);

        engine.tick();
        assert!(events.borrow().is_empty());
    }

    #[test]
    fn test_clear_all_callbacks() {
        let engine = TimerEngine::new(Time::from_secs(1));
        let first = record(&engine);
        let second = record(&engine);
        assert_eq!(engine.callback_count(), 2);

        engine.clear_all_callbacks();
        assert_eq!(engine.callback_count(), 0);

        engine.tick();
        engine.set_time(Time::from_secs(30));
        assert_eq!(engine.time(), Time::from_secs(30));
        assert!(first.borrow().is_empty());
        assert!(second.borrow().is_empty());
    }

    #[test]
    fn test_observers_called_in_registration_order() {
        let engine = TimerEngine::new(Time::from_secs(10));
        let order = Rc::new(RefCell::new(Vec::new()));
        for n in 0..3 {
            let order_clone = order.clone();
            engine.on_event(move |_| order_clone.borrow_mut().push(n));
        }

        engine.tick();

        assert_eq!(*order.borrow(), vec![0, 1, 2]);
    }

    #[test]
    fn test_observer_can_reenter_engine() {
        let engine = Rc::new(TimerEngine::new(Time::from_secs(10)));
        let seen = Rc::new(Cell::new(Time::ZERO));

        let weak = Rc::downgrade(&engine);
        let seen_clone = seen.clone();
        engine.on_event(move |event| {
            if let (TimerEvent::TimeChanged(_), Some(engine)) = (event, weak.upgrade()) {
                seen_clone.set(engine.time());
                engine.on_event(|_| {});
            }
        });

        engine.tick();

        assert_eq!(seen.get(), Time::from_secs(9));
        assert_eq!(engine.callback_count(), 2);
    }
}
