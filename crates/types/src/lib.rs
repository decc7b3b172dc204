//! minimal-timer-types: Shared data types for the minimal-timer widget.
//!
//! This crate contains pure data types (the countdown value, colors, sound
//! settings) shared by the engine, the renderer and the application. They
//! carry no GTK dependency; Cairo helpers sit behind the `cairo` feature.

pub mod color;
pub mod sound;
pub mod time;

// Re-export commonly used types at the crate root for convenience
pub use color::Color;
pub use sound::AlertSoundConfig;
pub use time::{Time, TimeParseError};
