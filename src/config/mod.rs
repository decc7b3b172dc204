//! Configuration management

mod settings;

pub use settings::{AppConfig, TimerSettings, WindowConfig};
