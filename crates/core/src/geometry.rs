//! Clock-face geometry
//!
//! The face maps one hour (3600 s) to a full turn, 0 s at 12 o'clock, the hand
//! sweeping clockwise. All coordinates are in the view's local space with y
//! growing downwards; the face is the circle inscribed in the centered square
//! of the view.

use crate::constants::{SECONDS_PER_HALF_TURN, SECONDS_PER_TURN, WRAP_MARGIN};
use std::f64::consts::{FRAC_PI_2, PI};

/// Size of the view's bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewSize {
    pub width: f64,
    pub height: f64,
}

impl ViewSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Shorter side; the face is inscribed in a square of this size
    pub fn side(&self) -> f64 {
        self.width.min(self.height)
    }

    pub fn radius(&self) -> f64 {
        self.side() / 2.0
    }

    pub fn center(&self) -> (f64, f64) {
        (self.width / 2.0, self.height / 2.0)
    }
}

/// Whether a point lies on the clock face
pub fn is_in_clock(size: ViewSize, x: f64, y: f64) -> bool {
    let (cx, cy) = size.center();
    (x - cx).hypot(y - cy) <= size.radius()
}

/// Angle of the pointer offset `(dx, dy)` from the center, in [-π, π].
/// -π/π is 12 o'clock, -π/2 is 3 o'clock, 0 is 6 o'clock.
pub fn pointer_angle(dx: f64, dy: f64) -> f64 {
    (-dx).atan2(dy)
}

/// Convert a pointer angle to seconds in [0, 3600]
pub fn angle_to_seconds(angle: f64) -> i64 {
    ((angle + PI) / PI * SECONDS_PER_HALF_TURN as f64).round() as i64
}

/// Hand angle for `seconds`, measured clockwise from 12 o'clock
pub fn seconds_to_angle(seconds: i64) -> f64 {
    seconds as f64 * PI / SECONDS_PER_HALF_TURN as f64
}

/// Hand angle for `seconds` in screen convention (clockwise from 3 o'clock),
/// which is what Cairo's `arc` expects
pub fn seconds_to_screen_angle(seconds: i64) -> f64 {
    seconds_to_angle(seconds) - FRAC_PI_2
}

/// Seconds the face shows under the point `(x, y)`
pub fn seconds_at_point(size: ViewSize, x: f64, y: f64) -> i64 {
    let (cx, cy) = size.center();
    angle_to_seconds(pointer_angle(x - cx, y - cy))
}

/// Point at `distance` from the center in the direction of the hand for
/// `seconds`
pub fn point_for_seconds(size: ViewSize, seconds: i64, distance: f64) -> (f64, f64) {
    let (cx, cy) = size.center();
    let angle = seconds_to_angle(seconds);
    (cx + distance * angle.sin(), cy - distance * angle.cos())
}

/// Undo the jump a drag makes when it crosses 12 o'clock.
///
/// Coming from just below the top of the range onto a small value clamps to
/// a full turn; coming from a small value onto the top of the range clamps to
/// zero. Anything else is taken as is.
pub fn correct_wrap(previous: i64, candidate: i64) -> i64 {
    let top = SECONDS_PER_TURN - WRAP_MARGIN;
    if previous > top && candidate < WRAP_MARGIN {
        SECONDS_PER_TURN
    } else if previous < WRAP_MARGIN && candidate > top {
        0
    } else {
        candidate
    }
}

/// Sweep of the remaining-time wedge in degrees
pub fn wedge_degrees(seconds: i64) -> f64 {
    seconds as f64 * 180.0 / SECONDS_PER_HALF_TURN as f64
}
