//! Countdown clock face rendering
//!
//! Renders the remaining time as a wedge swept clockwise from 12 o'clock over
//! a face with 60 minute ticks, 12 heavier five-minute ticks and minute
//! labels. One full turn is one hour.

use cairo::Context;
use minimal_timer_core::constants::{MAJOR_TICK_EVERY, MINOR_TICK_COUNT};
use minimal_timer_core::geometry::{self, ViewSize};
use minimal_timer_types::{Color, Time};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use crate::pango_text::show_text_centered;

/// Clock face configuration. Radii and sizes are fractions of the face radius.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClockFaceConfig {
    // Face
    #[serde(default = "default_face_color")]
    pub face_color: Color,
    #[serde(default = "default_border_color")]
    pub border_color: Color,
    #[serde(default = "default_border_width")]
    pub border_width: f64,

    // Remaining-time wedge
    #[serde(default = "default_pie_color")]
    pub pie_color: Color,
    #[serde(default = "default_tick_outer")]
    pub pie_radius: f64,

    // Ticks
    #[serde(default = "default_true")]
    pub show_ticks: bool,
    #[serde(default = "default_tick_color")]
    pub tick_color: Color,
    #[serde(default = "default_tick_outer")]
    pub tick_outer: f64,
    #[serde(default = "default_minor_tick_inner")]
    pub minor_tick_inner: f64,
    #[serde(default = "default_major_tick_inner")]
    pub major_tick_inner: f64,
    #[serde(default = "default_minor_tick_width")]
    pub minor_tick_width: f64,
    #[serde(default = "default_major_tick_width")]
    pub major_tick_width: f64,

    // Minute labels
    #[serde(default = "default_true")]
    pub show_labels: bool,
    #[serde(default = "default_label_color")]
    pub label_color: Color,
    #[serde(default = "default_font")]
    pub label_font: String,
    #[serde(default = "default_label_size")]
    pub label_size: f64,
    #[serde(default = "default_label_radius")]
    pub label_radius: f64,

    // Center hub
    #[serde(default = "default_true")]
    pub show_hub: bool,
    #[serde(default = "default_hub_color")]
    pub hub_color: Color,
    #[serde(default = "default_hub_size")]
    pub hub_size: f64,

    // Remaining time as text
    #[serde(default)]
    pub show_remaining_text: bool,
    #[serde(default = "default_label_color")]
    pub text_color: Color,
    #[serde(default = "default_text_size")]
    pub text_size: f64,
}

fn default_true() -> bool {
    true
}

fn default_face_color() -> Color {
    Color::new(0.96, 0.96, 0.94, 1.0)
}

fn default_border_color() -> Color {
    Color::new(0.35, 0.35, 0.35, 1.0)
}

fn default_border_width() -> f64 {
    2.0
}

fn default_pie_color() -> Color {
    Color::new(0.86, 0.18, 0.16, 1.0)
}

fn default_tick_color() -> Color {
    Color::new(0.15, 0.15, 0.15, 1.0)
}

fn default_tick_outer() -> f64 {
    0.78
}

fn default_minor_tick_inner() -> f64 {
    0.73
}

fn default_major_tick_inner() -> f64 {
    0.66
}

fn default_minor_tick_width() -> f64 {
    1.0
}

fn default_major_tick_width() -> f64 {
    3.0
}

fn default_label_color() -> Color {
    Color::new(0.15, 0.15, 0.15, 1.0)
}

fn default_font() -> String {
    "Sans".to_string()
}

fn default_label_size() -> f64 {
    0.11
}

fn default_label_radius() -> f64 {
    0.9
}

fn default_hub_color() -> Color {
    Color::new(0.2, 0.2, 0.2, 1.0)
}

fn default_hub_size() -> f64 {
    0.04
}

fn default_text_size() -> f64 {
    0.14
}

impl Default for ClockFaceConfig {
    fn default() -> Self {
        Self {
            face_color: default_face_color(),
            border_color: default_border_color(),
            border_width: default_border_width(),
            pie_color: default_pie_color(),
            pie_radius: default_tick_outer(),
            show_ticks: true,
            tick_color: default_tick_color(),
            tick_outer: default_tick_outer(),
            minor_tick_inner: default_minor_tick_inner(),
            major_tick_inner: default_major_tick_inner(),
            minor_tick_width: default_minor_tick_width(),
            major_tick_width: default_major_tick_width(),
            show_labels: true,
            label_color: default_label_color(),
            label_font: default_font(),
            label_size: default_label_size(),
            label_radius: default_label_radius(),
            show_hub: true,
            hub_color: default_hub_color(),
            hub_size: default_hub_size(),
            show_remaining_text: false,
            text_color: default_label_color(),
            text_size: default_text_size(),
        }
    }
}

/// One tick mark on the face
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickMark {
    /// Minute position, 0..60
    pub minute: u32,
    /// Five-minute tick, drawn heavier and labelled
    pub major: bool,
}

impl TickMark {
    pub fn seconds(&self) -> i64 {
        self.minute as i64 * 60
    }

    pub fn label(&self) -> Option<String> {
        self.major.then(|| self.minute.to_string())
    }
}

/// The 60 minute ticks
pub fn minor_ticks() -> impl Iterator<Item = TickMark> {
    (0..MINOR_TICK_COUNT).map(|minute| TickMark {
        minute,
        major: false,
    })
}

/// The 12 five-minute ticks
pub fn major_ticks() -> impl Iterator<Item = TickMark> {
    (0..MINOR_TICK_COUNT)
        .step_by(MAJOR_TICK_EVERY as usize)
        .map(|minute| TickMark {
            minute,
            major: true,
        })
}

/// Start and end angle (Cairo convention) of the remaining-time wedge.
/// Anything past a full turn is drawn as a full disc.
pub fn wedge_angles(remaining: Time) -> (f64, f64) {
    let start = geometry::seconds_to_screen_angle(0);
    let sweep = geometry::wedge_degrees(remaining.seconds())
        .to_radians()
        .clamp(0.0, 2.0 * PI);
    (start, start + sweep)
}

/// Render the clock face for `remaining` into a `width` x `height` area
pub fn render_clock_face(
    cr: &Context,
    config: &ClockFaceConfig,
    remaining: Time,
    width: f64,
    height: f64,
) -> Result<(), cairo::Error> {
    let size = ViewSize::new(width, height);
    let radius = size.radius();
    if radius <= 0.0 {
        log::trace!("Clock face area {}x{} too small to draw", width, height);
        return Ok(());
    }
    let (cx, cy) = size.center();

    draw_face(cr, config, cx, cy, radius)?;
    draw_wedge(cr, config, remaining, cx, cy, radius)?;
    if config.show_ticks {
        draw_ticks(cr, config, size)?;
    }
    if config.show_labels {
        draw_labels(cr, config, size)?;
    }
    if config.show_hub {
        cr.save()?;
        config.hub_color.apply_to_cairo(cr);
        cr.arc(cx, cy, radius * config.hub_size, 0.0, 2.0 * PI);
        cr.fill()?;
        cr.restore()?;
    }
    if config.show_remaining_text {
        cr.save()?;
        config.text_color.apply_to_cairo(cr);
        show_text_centered(
            cr,
            &remaining.to_string(),
            &config.label_font,
            true,
            radius * config.text_size,
            cx,
            cy + radius * 0.35,
        );
        cr.restore()?;
    }

    Ok(())
}

fn draw_face(
    cr: &Context,
    config: &ClockFaceConfig,
    cx: f64,
    cy: f64,
    radius: f64,
) -> Result<(), cairo::Error> {
    cr.save()?;
    config.face_color.apply_to_cairo(cr);
    cr.arc(cx, cy, radius, 0.0, 2.0 * PI);
    cr.fill()?;

    if config.border_width > 0.0 {
        config.border_color.apply_to_cairo(cr);
        cr.set_line_width(config.border_width);
        cr.arc(cx, cy, radius - config.border_width / 2.0, 0.0, 2.0 * PI);
        cr.stroke()?;
    }
    cr.restore()
}

fn draw_wedge(
    cr: &Context,
    config: &ClockFaceConfig,
    remaining: Time,
    cx: f64,
    cy: f64,
    radius: f64,
) -> Result<(), cairo::Error> {
    if remaining.seconds() <= 0 {
        return Ok(());
    }

    let (start, end) = wedge_angles(remaining);
    cr.save()?;
    config.pie_color.apply_to_cairo(cr);
    cr.move_to(cx, cy);
    cr.arc(cx, cy, radius * config.pie_radius, start, end);
    cr.close_path();
    cr.fill()?;
    cr.restore()
}

fn draw_ticks(cr: &Context, config: &ClockFaceConfig, size: ViewSize) -> Result<(), cairo::Error> {
    let radius = size.radius();
    cr.save()?;
    config.tick_color.apply_to_cairo(cr);
    cr.set_line_cap(cairo::LineCap::Butt);

    // Major ticks go on top of the minor ones at the same positions
    for tick in minor_ticks().chain(major_ticks()) {
        let (inner, width) = if tick.major {
            (config.major_tick_inner, config.major_tick_width)
        } else {
            (config.minor_tick_inner, config.minor_tick_width)
        };
        let (x0, y0) = geometry::point_for_seconds(size, tick.seconds(), radius * inner);
        let (x1, y1) = geometry::point_for_seconds(size, tick.seconds(), radius * config.tick_outer);

        cr.set_line_width(width);
        cr.move_to(x0, y0);
        cr.line_to(x1, y1);
        cr.stroke()?;
    }
    cr.restore()
}

fn draw_labels(cr: &Context, config: &ClockFaceConfig, size: ViewSize) -> Result<(), cairo::Error> {
    let radius = size.radius();
    let font_size = radius * config.label_size;
    if font_size < 1.0 {
        return Ok(());
    }

    cr.save()?;
    config.label_color.apply_to_cairo(cr);
    for tick in major_ticks() {
        let Some(label) = tick.label() else {
            continue;
        };
        let (x, y) = geometry::point_for_seconds(size, tick.seconds(), radius * config.label_radius);
        show_text_centered(cr, &label, &config.label_font, false, font_size, x, y);
    }
    cr.restore()
}
