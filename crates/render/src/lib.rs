//! minimal-timer-render: Cairo rendering of the countdown clock face.

pub mod clock_face;
pub mod pango_text;

pub use clock_face::{render_clock_face, wedge_angles, ClockFaceConfig, TickMark};
