//! minimal-timer-core: countdown engine and clock-face interaction.
//!
//! This crate contains the `TimerEngine` that owns the countdown, the
//! `TickScheduler` seam it is driven through, the clock-face geometry and
//! the drag-gesture state machine. Nothing here depends on GTK, so all of it
//! runs headless in tests.

pub mod constants;
mod engine;
pub mod geometry;
mod gesture;
mod scheduler;

pub use constants::{PRIMARY_BUTTON, SECONDS_PER_TURN, TICK_PERIOD, WRAP_MARGIN};
pub use engine::{CallbackId, TimerEngine, TimerEvent};
pub use geometry::ViewSize;
pub use gesture::ClockGesture;
pub use scheduler::{ManualScheduler, TickCallback, TickScheduler};

// Re-export the value type used in every signature
pub use minimal_timer_types::Time;
