// src/effects/glow_overlay.rs
//
// A translucent wash drawn over the finished frame. Repeated every few
// frames it leaves a soft afterglow on moving elements.

use nannou::prelude::*;

use crate::config::{OverlayConfig, Palette};
use crate::render::DrawCommand;

#[derive(Debug, Clone, PartialEq)]
pub struct GlowOverlay {
    color: Option<Rgba>,
    every_n_frames: u32,
}

impl GlowOverlay {
    pub fn new(color: Option<Rgba>, every_n_frames: u32) -> Self {
        Self {
            color,
            every_n_frames: every_n_frames.max(1),
        }
    }

    pub fn from_config(palette: &Palette, cfg: &OverlayConfig) -> Self {
        Self::new(palette.overlay, cfg.every_n_frames)
    }

    pub fn disabled() -> Self {
        Self::new(None, 1)
    }

    pub fn is_enabled(&self) -> bool {
        self.color.is_some()
    }

    pub fn is_due(&self, frame: u64) -> bool {
        self.is_enabled() && frame % self.every_n_frames as u64 == 0
    }

    pub fn command(&self, frame: u64) -> Option<DrawCommand> {
        match self.color {
            Some(color) if self.is_due(frame) => Some(DrawCommand::Overlay { color }),
            _ => None,
        }
    }
}
