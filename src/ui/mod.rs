//! GTK user interface

mod clock_view;
mod scheduler;

pub use clock_view::ClockView;
pub use scheduler::GlibScheduler;
