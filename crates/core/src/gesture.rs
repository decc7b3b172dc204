//! Drag-to-set-time gesture state machine
//!
//! Idle --press inside with primary--> Dragging (engine paused, time applied)
//! Dragging --motion inside--> Dragging (time applied with wrap correction)
//! Dragging --motion outside--> Dragging (frame skipped)
//! Dragging --release primary--> Idle (engine resumed)
//! Dragging --cancel--> Idle (engine resumed)
//!
//! The view may exist before an engine is attached; every engine access
//! goes through `engine_time`/`set_engine_time`, which log and fall back
//! when there is none.

use crate::constants::PRIMARY_BUTTON;
use crate::engine::TimerEngine;
use crate::geometry::{self, ViewSize};
use minimal_timer_types::Time;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

#[derive(Default)]
pub struct ClockGesture {
    engine: RefCell<Option<Rc<TimerEngine>>>,
    dragging: Cell<bool>,
}

impl ClockGesture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_engine(engine: Rc<TimerEngine>) -> Self {
        let gesture = Self::new();
        gesture.set_engine(engine);
        gesture
    }

    pub fn set_engine(&self, engine: Rc<TimerEngine>) {
        *self.engine.borrow_mut() = Some(engine);
    }

    pub fn engine(&self) -> Option<Rc<TimerEngine>> {
        self.engine.borrow().clone()
    }

    /// Current engine time, or zero when no engine is attached
    pub fn engine_time(&self) -> Time {
        match self.engine() {
            Some(engine) => engine.time(),
            None => {
                log::error!("No timer engine attached to the clock view");
                Time::ZERO
            }
        }
    }

    /// Ask the engine to take `time`; does nothing when no engine is attached
    pub fn set_engine_time(&self, time: Time) {
        match self.engine() {
            Some(engine) => engine.set_time(time),
            None => log::error!("No timer engine attached to the clock view, dropping {}", time),
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging.get()
    }

    /// Pointer pressed at `(x, y)`.
    ///
    /// Starts a drag when the primary button goes down on the face: the engine
    /// is paused and the pointed-at time applied. Returns whether a drag
    /// started.
    pub fn press(&self, button: u32, x: f64, y: f64, size: ViewSize) -> bool {
        if button != PRIMARY_BUTTON || self.dragging.get() {
            return false;
        }
        if !geometry::is_in_clock(size, x, y) {
            return false;
        }

        self.dragging.set(true);
        log::debug!("Clock drag started at ({:.1}, {:.1})", x, y);

        match self.engine() {
            Some(engine) => engine.pause(),
            None => log::error!("No timer engine attached to the clock view, cannot pause"),
        }

        let seconds = geometry::seconds_at_point(size, x, y);
        self.set_engine_time(Time::from_secs(seconds));
        true
    }

    /// Pointer moved to `(x, y)` with the primary button held.
    ///
    /// Outside the face the frame is skipped but the drag continues.
    pub fn motion(&self, x: f64, y: f64, size: ViewSize) {
        if !self.dragging.get() {
            return;
        }
        if !geometry::is_in_clock(size, x, y) {
            return;
        }

        let previous = self.engine_time().seconds();
        let candidate = geometry::seconds_at_point(size, x, y);
        let seconds = geometry::correct_wrap(previous, candidate);
        self.set_engine_time(Time::from_secs(seconds));
    }

    /// Pointer released. Ends the drag and resumes the engine.
    pub fn release(&self, button: u32) {
        if button != PRIMARY_BUTTON || !self.dragging.get() {
            return;
        }

        self.dragging.set(false);
        log::debug!("Clock drag ended at {}", self.engine_time());

        match self.engine() {
            Some(engine) => engine.resume(),
            None => log::error!("No timer engine attached to the clock view, cannot resume"),
        }
    }

    /// The pointer sequence was taken away mid-drag (grab broken, touch
    /// cancelled). Ends the drag and resumes the engine like a release.
    pub fn cancel(&self) {
        if !self.dragging.replace(false) {
            return;
        }

        log::debug!("Clock drag cancelled at {}", self.engine_time());

        match self.engine() {
            Some(engine) => engine.resume(),
            None => log::error!("No timer engine attached to the clock view, cannot resume"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::TimerEvent;

    const SIZE: ViewSize = ViewSize {
        width: 200.0,
        height: 200.0,
    };

    fn setup(seconds: i64) -> (Rc<TimerEngine>, ClockGesture) {
        let engine = Rc::new(TimerEngine::new(Time::from_secs(seconds)));
        let gesture = ClockGesture::with_engine(engine.clone());
        (engine, gesture)
    }

    /// Point on the face showing `seconds`
    fn at(seconds: i64) -> (f64, f64) {
        geometry::point_for_seconds(SIZE, seconds, 60.0)
    }

    #[test]
    fn test_press_inside_pauses_and_sets_time() {
        let (engine, gesture) = setup(100);
        let (x, y) = at(900);

        assert!(gesture.press(PRIMARY_BUTTON, x, y, SIZE));

        assert!(gesture.is_dragging());
        assert!(engine.is_paused());
        assert_eq!(engine.time(), Time::from_secs(900));
    }

    #[test]
    fn test_press_outside_does_nothing() {
        let (engine, gesture) = setup(100);

        assert!(!gesture.press(PRIMARY_BUTTON, 199.0, 1.0, SIZE));

        assert!(!gesture.is_dragging());
        assert!(!engine.is_paused());
        assert_eq!(engine.time(), Time::from_secs(100));
    }

    #[test]
    fn test_secondary_button_is_ignored() {
        let (engine, gesture) = setup(100);
        let (x, y) = at(900);

        assert!(!gesture.press(3, x, y, SIZE));
        assert!(!gesture.is_dragging());
        assert_eq!(engine.time(), Time::from_secs(100));
    }

    #[test]
    fn test_motion_updates_time() {
        let (engine, gesture) = setup(100);
        let (x, y) = at(900);
        gesture.press(PRIMARY_BUTTON, x, y, SIZE);

        let (x, y) = at(1200);
        gesture.motion(x, y, SIZE);

        assert_eq!(engine.time(), Time::from_secs(1200));
    }

    #[test]
    fn test_motion_without_drag_is_ignored() {
        let (engine, gesture) = setup(100);
        let (x, y) = at(1200);

        gesture.motion(x, y, SIZE);

        assert_eq!(engine.time(), Time::from_secs(100));
    }

    #[test]
    fn test_motion_outside_is_skipped_but_drag_sticks() {
        let (engine, gesture) = setup(100);
        let (x, y) = at(900);
        gesture.press(PRIMARY_BUTTON, x, y, SIZE);

        gesture.motion(199.0, 199.0, SIZE);
        assert!(gesture.is_dragging());
        assert_eq!(engine.time(), Time::from_secs(900));

        // Coming back onto the face picks up again
        let (x, y) = at(1000);
        gesture.motion(x, y, SIZE);
        assert_eq!(engine.time(), Time::from_secs(1000));
    }

    #[test]
    fn test_drag_clockwise_past_top_clamps_to_full_turn() {
        let (engine, gesture) = setup(100);
        let (x, y) = at(3590);
        gesture.press(PRIMARY_BUTTON, x, y, SIZE);
        assert_eq!(engine.time(), Time::from_secs(3590));

        let (x, y) = at(5);
        gesture.motion(x, y, SIZE);

        assert_eq!(engine.time(), Time::from_secs(3600));
    }

    #[test]
    fn test_drag_counterclockwise_past_top_clamps_to_zero() {
        let (engine, gesture) = setup(100);
        let (x, y) = at(5);
        gesture.press(PRIMARY_BUTTON, x, y, SIZE);

        let (x, y) = at(3595);
        gesture.motion(x, y, SIZE);

        assert_eq!(engine.time(), Time::ZERO);
    }

    #[test]
    fn test_release_resumes_engine() {
        let (engine, gesture) = setup(100);
        let (x, y) = at(600);
        gesture.press(PRIMARY_BUTTON, x, y, SIZE);

        // Ticks during the drag do not move the countdown
        engine.tick();
        assert_eq!(engine.time(), Time::from_secs(600));

        gesture.release(PRIMARY_BUTTON);
        assert!(!gesture.is_dragging());
        assert!(!engine.is_paused());

        engine.tick();
        assert_eq!(engine.time(), Time::from_secs(599));
    }

    #[test]
    fn test_release_of_other_button_keeps_dragging() {
        let (engine, gesture) = setup(100);
        let (x, y) = at(600);
        gesture.press(PRIMARY_BUTTON, x, y, SIZE);

        gesture.release(3);

        assert!(gesture.is_dragging());
        assert!(engine.is_paused());
    }

    #[test]
    fn test_cancel_ends_drag_and_resumes_engine() {
        let (engine, gesture) = setup(100);
        let (x, y) = at(900);
        gesture.press(PRIMARY_BUTTON, x, y, SIZE);

        // A cancelled sequence reports no button on release
        gesture.release(0);
        gesture.cancel();

        assert!(!gesture.is_dragging());
        assert!(!engine.is_paused());

        let (x, y) = at(600);
        assert!(gesture.press(PRIMARY_BUTTON, x, y, SIZE));
        gesture.release(PRIMARY_BUTTON);
        engine.tick();
        assert_eq!(engine.time(), Time::from_secs(599));
    }

    #[test]
    fn test_cancel_when_idle_leaves_pause_alone() {
        let (engine, gesture) = setup(100);
        engine.pause();

        gesture.cancel();

        assert!(engine.is_paused());
        assert!(!gesture.is_dragging());
    }

    #[test]
    fn test_drag_to_zero_does_not_time_out() {
        let (engine, gesture) = setup(100);
        let events = Rc::new(RefCell::new(Vec::new()));
        let events_clone = events.clone();
        engine.on_event(move |event| events_clone.borrow_mut().push(*event));

        let (x, y) = at(5);
        gesture.press(PRIMARY_BUTTON, x, y, SIZE);
        let (x, y) = at(3595);
        gesture.motion(x, y, SIZE);
        gesture.release(PRIMARY_BUTTON);

        assert_eq!(engine.time(), Time::ZERO);
        assert!(!events.borrow().contains(&TimerEvent::TimedOut));
    }

    #[test]
    fn test_without_engine_falls_back() {
        let gesture = ClockGesture::new();

        assert_eq!(gesture.engine_time(), Time::ZERO);
        gesture.set_engine_time(Time::from_secs(10));

        let (x, y) = at(900);
        assert!(gesture.press(PRIMARY_BUTTON, x, y, SIZE));
        gesture.motion(x, y, SIZE);
        gesture.release(PRIMARY_BUTTON);
        assert!(!gesture.is_dragging());
    }

    #[test]
    fn test_engine_attached_later() {
        let gesture = ClockGesture::new();
        let engine = Rc::new(TimerEngine::new(Time::from_secs(30)));

        gesture.set_engine(engine.clone());

        assert_eq!(gesture.engine_time(), Time::from_secs(30));
        gesture.set_engine_time(Time::from_secs(45));
        assert_eq!(engine.time(), Time::from_secs(45));
    }
}
