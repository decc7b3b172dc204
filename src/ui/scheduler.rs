//! Tick scheduling on the GTK main loop

use gtk4::glib;
use minimal_timer_core::{TickCallback, TickScheduler};
use std::ops::ControlFlow;
use std::time::Duration;

/// Fires ticks from a `glib::timeout_add_local` source on the main context,
/// so the engine is only ever touched from the UI thread
#[derive(Debug, Default, Clone, Copy)]
pub struct GlibScheduler;

impl TickScheduler for GlibScheduler {
    fn schedule_repeating(&self, period: Duration, mut tick: TickCallback) {
        glib::timeout_add_local(period, move || match tick() {
            ControlFlow::Continue(()) => glib::ControlFlow::Continue,
            ControlFlow::Break(()) => {
                log::debug!("Tick source removed");
                glib::ControlFlow::Break
            }
        });
    }
}
