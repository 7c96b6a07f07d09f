//! Event-type colors.
//!
//! Each custom event type gets a stable hue from a string hash so the same
//! pipeline step always draws on the same background.

use crate::tui::settings;
use crossterm::style::Color;

/// 32-bit rolling hash over UTF-16 code units (`hash * 31 + unit`, with the
/// multiply done as a wrapping 32-bit shift).
///
/// The accumulator is only truncated to 32 bits at the shift, so the final
/// value can exceed the `i32` range; callers take its absolute value.
pub fn event_type_hash(event_type: &str) -> i64 {
    let mut hash: i64 = 0;
    for unit in event_type.encode_utf16() {
        let shifted = i64::from((hash as i32).wrapping_shl(5));
        hash = i64::from(unit) + (shifted - hash);
    }
    hash
}

/// Hue in degrees for an event type: `|hash| mod 360`.
pub fn event_hue(event_type: &str) -> u16 {
    (event_type_hash(event_type).unsigned_abs() % 360) as u16
}

/// Convert HSL (hue in degrees, saturation and lightness in `0..=1`) to RGB.
pub fn hsl_to_rgb(hue: f64, saturation: f64, lightness: f64) -> (u8, u8, u8) {
    let chroma = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
    let sector = (hue.rem_euclid(360.0)) / 60.0;
    let x = chroma * (1.0 - (sector % 2.0 - 1.0).abs());
    let (r, g, b) = match sector as u8 {
        0 => (chroma, x, 0.0),
        1 => (x, chroma, 0.0),
        2 => (0.0, chroma, x),
        3 => (0.0, x, chroma),
        4 => (x, 0.0, chroma),
        _ => (chroma, 0.0, x),
    };
    let m = lightness - chroma / 2.0;
    let channel = |v: f64| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
    (channel(r), channel(g), channel(b))
}

/// Alpha-composite `fg` over `bg`.
pub fn blend(fg: (u8, u8, u8), bg: (u8, u8, u8), alpha: f64) -> (u8, u8, u8) {
    let mix = |f: u8, b: u8| {
        (f64::from(f) * alpha + f64::from(b) * (1.0 - alpha))
            .round()
            .clamp(0.0, 255.0) as u8
    };
    (mix(fg.0, bg.0), mix(fg.1, bg.1), mix(fg.2, bg.2))
}

/// Bubble background for a custom event, faded when inactive.
pub fn event_background(event_type: &str, active: bool) -> Color {
    let full = hsl_to_rgb(
        f64::from(event_hue(event_type)),
        settings::EVENT_SATURATION,
        settings::EVENT_LIGHTNESS,
    );
    let (r, g, b) = if active {
        full
    } else {
        blend(
            full,
            settings::RGB_TERMINAL_BG,
            settings::EVENT_INACTIVE_ALPHA,
        )
    };
    Color::Rgb { r, g, b }
}
