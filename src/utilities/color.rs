// src/utilities/color.rs
//
// Hex colour parsing for palette entries.

use nannou::prelude::*;

/// Parses `#rrggbb` or `#rrggbbaa` (leading `#` optional).
pub fn parse_hex_color(value: &str) -> Option<Rgba> {
    let hex = value.trim().trim_start_matches('#');
    if !hex.is_ascii() || (hex.len() != 6 && hex.len() != 8) {
        return None;
    }

    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    let red = channel(0)?;
    let green = channel(2)?;
    let blue = channel(4)?;
    let alpha = if hex.len() == 8 { channel(6)? } else { 255 };

    Some(rgba(
        red as f32 / 255.0,
        green as f32 / 255.0,
        blue as f32 / 255.0,
        alpha as f32 / 255.0,
    ))
}

/// Same colour with its alpha multiplied by `factor`.
pub fn scale_alpha(color: Rgba, factor: f32) -> Rgba {
    rgba(
        color.red,
        color.green,
        color.blue,
        color.alpha * factor.clamp(0.0, 1.0),
    )
}
