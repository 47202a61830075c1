pub mod glow_overlay;

pub use glow_overlay::GlowOverlay;
