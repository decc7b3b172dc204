//! Pango-based text drawing
//!
//! Cairo's toy font API keeps growing internal font caches, so labels go
//! through Pango instead. Sizes are absolute, in user-space units, so text
//! scales with the face rather than with the screen's font DPI.

use cairo::Context;
use pango::{FontDescription, Weight};
use pangocairo::functions::{create_layout, show_layout};
use std::cell::RefCell;
use std::collections::HashMap;

#[derive(Hash, Eq, PartialEq, Clone, Debug)]
struct FontKey {
    family: String,
    bold: bool,
    size_pango: i32,
}

/// Upper bound on cached descriptions; resizing the window produces a new
/// size for every frame
const MAX_CACHED_FONTS: usize = 64;

thread_local! {
    static FONT_DESC_CACHE: RefCell<HashMap<FontKey, FontDescription>> = RefCell::new(HashMap::new());
}

fn font_description(family: &str, bold: bool, size: f64) -> FontDescription {
    let key = FontKey {
        family: family.to_string(),
        bold,
        size_pango: (size * pango::SCALE as f64).round() as i32,
    };

    FONT_DESC_CACHE.with(|cache| {
        let mut cache = cache.borrow_mut();
        if let Some(desc) = cache.get(&key) {
            return desc.clone();
        }
        if cache.len() >= MAX_CACHED_FONTS {
            cache.clear();
        }

        let mut desc = FontDescription::new();
        desc.set_family(family);
        desc.set_weight(if bold { Weight::Bold } else { Weight::Normal });
        desc.set_absolute_size(key.size_pango as f64);

        cache.insert(key, desc.clone());
        desc
    })
}

/// Draw `text` with its logical box centered on `(x, y)` in the current source
pub fn show_text_centered(
    cr: &Context,
    text: &str,
    family: &str,
    bold: bool,
    size: f64,
    x: f64,
    y: f64,
) {
    let layout = create_layout(cr);
    layout.set_font_description(Some(&font_description(family, bold, size)));
    layout.set_text(text);

    let (_ink, logical) = layout.pixel_extents();
    cr.move_to(
        x - logical.x() as f64 - logical.width() as f64 / 2.0,
        y - logical.y() as f64 - logical.height() as f64 / 2.0,
    );
    show_layout(cr, &layout);
}
