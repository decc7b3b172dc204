//! Interactive clock face widget
//!
//! A `DrawingArea` painted by `render_clock_face` with a `GestureDrag` that
//! feeds `ClockGesture`. The widget redraws on every engine event and raises
//! a modal alert when the countdown runs out.

use crate::audio::AlertSound;
use gtk4::prelude::*;
use gtk4::{gio, AlertDialog, DrawingArea, GestureDrag};
use minimal_timer_core::{ClockGesture, TimerEngine, TimerEvent, ViewSize, PRIMARY_BUTTON};
use minimal_timer_render::{render_clock_face, ClockFaceConfig};
use minimal_timer_types::AlertSoundConfig;
use std::rc::Rc;

const MIN_SIZE: i32 = 120;

pub struct ClockView {
    drawing_area: DrawingArea,
}

impl ClockView {
    pub fn new(
        engine: Rc<TimerEngine>,
        face: ClockFaceConfig,
        sound: Rc<AlertSound>,
        sound_config: AlertSoundConfig,
    ) -> Self {
        let drawing_area = DrawingArea::new();
        drawing_area.set_content_width(MIN_SIZE);
        drawing_area.set_content_height(MIN_SIZE);
        drawing_area.set_hexpand(true);
        drawing_area.set_vexpand(true);

        let gesture = Rc::new(ClockGesture::with_engine(engine.clone()));

        let gesture_draw = gesture.clone();
        drawing_area.set_draw_func(move |_, cr, width, height| {
            let remaining = gesture_draw.engine_time();
            if let Err(e) = render_clock_face(cr, &face, remaining, width as f64, height as f64) {
                log::warn!("Failed to draw clock face: {}", e);
            }
        });

        Self::attach_drag(&drawing_area, &gesture);
        Self::subscribe(&drawing_area, &engine, sound, sound_config);

        Self { drawing_area }
    }

    pub fn widget(&self) -> &DrawingArea {
        &self.drawing_area
    }

    fn attach_drag(drawing_area: &DrawingArea, gesture: &Rc<ClockGesture>) {
        let drag = GestureDrag::new();
        drag.set_button(PRIMARY_BUTTON);

        let gesture_begin = gesture.clone();
        let area_begin = drawing_area.downgrade();
        drag.connect_drag_begin(move |drag, x, y| {
            let Some(area) = area_begin.upgrade() else {
                return;
            };
            gesture_begin.press(drag.current_button(), x, y, view_size(&area));
        });

        // Offsets are relative to where the drag began
        let gesture_update = gesture.clone();
        let area_update = drawing_area.downgrade();
        drag.connect_drag_update(move |drag, offset_x, offset_y| {
            let (Some(area), Some((start_x, start_y))) = (area_update.upgrade(), drag.start_point())
            else {
                return;
            };
            gesture_update.motion(start_x + offset_x, start_y + offset_y, view_size(&area));
        });

        // The controller only reacts to the primary button, and a cancelled
        // sequence has already cleared `current_button` by the time it ends
        let gesture_end = gesture.clone();
        drag.connect_drag_end(move |_, _, _| {
            gesture_end.release(PRIMARY_BUTTON);
        });

        let gesture_cancel = gesture.clone();
        drag.connect_cancel(move |_, _| {
            gesture_cancel.cancel();
        });

        drawing_area.add_controller(drag);
    }

    fn subscribe(
        drawing_area: &DrawingArea,
        engine: &Rc<TimerEngine>,
        sound: Rc<AlertSound>,
        sound_config: AlertSoundConfig,
    ) {
        let area_weak = drawing_area.downgrade();
        let callback_id = engine.on_event(move |event| {
            let Some(area) = area_weak.upgrade() else {
                return;
            };
            area.queue_draw();

            if *event == TimerEvent::TimedOut {
                sound.play(&sound_config);
                show_timeout_alert(&area, sound.clone());
            }
        });

        let engine_weak = Rc::downgrade(engine);
        drawing_area.connect_destroy(move |_| {
            if let Some(engine) = engine_weak.upgrade() {
                engine.remove_callback(&callback_id);
                log::debug!("Clock view unsubscribed from the timer engine");
            }
        });
    }
}

fn view_size(widget: &DrawingArea) -> ViewSize {
    ViewSize::new(widget.width() as f64, widget.height() as f64)
}

fn show_timeout_alert(area: &DrawingArea, sound: Rc<AlertSound>) {
    let window = area.root().and_downcast::<gtk4::Window>();

    let dialog = AlertDialog::builder()
        .modal(true)
        .message("Time is up")
        .detail("The countdown has finished.")
        .buttons(vec!["OK"])
        .default_button(0)
        .cancel_button(0)
        .build();

    dialog.choose(window.as_ref(), gio::Cancellable::NONE, move |_| {
        sound.stop();
    });
}
