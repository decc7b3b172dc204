//! minimal-timer - a countdown timer you set by dragging a clock face
//!
//! The engine, geometry and gesture logic live in `minimal-timer-core` and
//! the face painting in `minimal-timer-render`; this crate wires them into a
//! GTK window together with configuration and the alert sound.

pub mod audio;
pub mod config;
pub mod ui;
