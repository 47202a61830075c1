pub mod config_load;
pub mod config_types;
pub mod palette;

pub use config_load::Config;
pub use config_types::{
    FieldConfig, FieldMode, NetworkConfig, OverlayConfig, PaletteConfig, ParticleConfig,
    PointConfig, WindowConfig,
};
pub use palette::Palette;
