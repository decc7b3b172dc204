//! Shared constants for the timer and the clock face

use std::time::Duration;

/// Period of the countdown tick
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Seconds represented by one full turn of the clock face (one hour)
pub const SECONDS_PER_TURN: i64 = 3600;

/// Half a turn in seconds; the unit of the angle/seconds conversion
pub const SECONDS_PER_HALF_TURN: i64 = SECONDS_PER_TURN / 2;

/// Distance from 12 o'clock, in seconds, within which a drag crossing the
/// top of the face is treated as a wrap instead of a jump.
/// Assumes the pointer never moves more than this between two motion events.
pub const WRAP_MARGIN: i64 = 300;

/// Number of minor (minute) ticks around the face
pub const MINOR_TICK_COUNT: u32 = 60;

/// Every n-th minor tick is a major tick with a label
pub const MAJOR_TICK_EVERY: u32 = 5;

/// Pointer button number of the primary (usually left) button.
/// Matches `gdk::BUTTON_PRIMARY`.
pub const PRIMARY_BUTTON: u32 = 1;
