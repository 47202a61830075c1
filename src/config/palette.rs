// src/config/palette.rs
//
// The parsed palette handed to the field and renderer.

use nannou::prelude::*;

use super::config_types::{OverlayConfig, PaletteConfig};
use crate::error::ConfigError;
use crate::utilities::color::parse_hex_color;

#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    pub background: Rgba,
    pub link: Rgba,
    pub idle_fill: Rgba,
    pub particle: Rgba,
    pub proximity_link: Rgba,
    pub accents: Vec<Rgba>,
    pub overlay: Option<Rgba>,
}

impl Palette {
    pub fn resolve(palette: &PaletteConfig, overlay: &OverlayConfig) -> Result<Self, ConfigError> {
        let accents = palette
            .accents
            .iter()
            .enumerate()
            .map(|(i, value)| parse_field(&format!("palette.accents[{}]", i), value))
            .collect::<Result<Vec<_>, _>>()?;

        if accents.is_empty() {
            return Err(ConfigError::Invalid(
                "palette.accents needs at least one colour".to_string(),
            ));
        }

        let overlay = if overlay.enabled {
            Some(parse_field("overlay.color", &overlay.color)?)
        } else {
            None
        };

        Ok(Self {
            background: parse_field("palette.background", &palette.background)?,
            link: parse_field("palette.link", &palette.link)?,
            idle_fill: parse_field("palette.idle_fill", &palette.idle_fill)?,
            particle: parse_field("palette.particle", &palette.particle)?,
            proximity_link: parse_field("palette.proximity_link", &palette.proximity_link)?,
            accents,
            overlay,
        })
    }
}

impl Default for Palette {
    fn default() -> Self {
        // the defaults are known-good hex strings
        Self::resolve(&PaletteConfig::default(), &OverlayConfig::default()).unwrap_or(Self {
            background: rgba(0.92, 0.92, 0.92, 1.0),
            link: rgba(0.125, 0.125, 0.125, 0.8),
            idle_fill: rgba(0.0, 0.0, 0.0, 0.2),
            particle: rgba(0.125, 0.125, 0.125, 0.3),
            proximity_link: rgba(0.125, 0.125, 0.125, 0.2),
            accents: vec![rgba(0.16, 0.21, 0.4, 1.0)],
            overlay: None,
        })
    }
}

fn parse_field(field: &str, value: &str) -> Result<Rgba, ConfigError> {
    parse_hex_color(value).ok_or_else(|| ConfigError::Color {
        field: field.to_string(),
        value: value.to_string(),
    })
}
