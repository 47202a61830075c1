// src/config/config_load.rs
//
// loading and validating config.toml

use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::debug;

use super::config_types::*;
use super::palette::Palette;
use crate::error::ConfigError;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub window: WindowConfig,
    pub field: FieldConfig,
    pub points: PointConfig,
    pub network: NetworkConfig,
    pub particles: ParticleConfig,
    pub palette: PaletteConfig,
    pub overlay: OverlayConfig,
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        // First try to load from the executable's directory
        if let Some(exe_config) = Self::load_from_exe_dir() {
            return exe_config;
        }

        // Fallback to loading from the current working directory
        Self::load_from("config.toml")
    }

    fn load_from_exe_dir() -> Option<Result<Self, ConfigError>> {
        let exe_path = std::env::current_exe().ok()?;
        let config_path = exe_path.parent()?.join("config.toml");

        if config_path.exists() {
            Some(Self::load_from(&config_path))
        } else {
            None
        }
    }

    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading config");
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn palette(&self) -> Result<Palette, ConfigError> {
        Palette::resolve(&self.palette, &self.overlay)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        check_range("points.idle_radius", self.points.idle_radius)?;
        check_range("points.active_radius", self.points.active_radius)?;
        check_range("points.active_duration", self.points.active_duration)?;
        check_positive("points.morph_duration", self.points.morph_duration)?;
        check_positive("points.ease_rate", self.points.ease_rate)?;
        check_positive("points.ease_cap", self.points.ease_cap)?;
        check_positive("field.max_frame_dt", self.field.max_frame_dt)?;

        check_positive("network.spacing", self.network.spacing)?;
        check_positive("network.growth_speed", self.network.growth_speed)?;
        check_positive("network.fade_speed", self.network.fade_speed)?;
        check_positive("network.connection_radius", self.network.connection_radius)?;
        if self.network.max_points == 0 {
            return Err(invalid("network.max_points must be at least 1"));
        }
        for (name, p) in [
            ("network.hover_chance", self.network.hover_chance),
            ("network.random_activation_chance", self.network.random_activation_chance),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return Err(invalid(&format!("{} must be within 0..=1, got {}", name, p)));
            }
        }

        check_positive("particles.speed", self.particles.speed)?;
        check_positive("particles.connection_distance", self.particles.connection_distance)?;
        check_positive("particles.repel_radius", self.particles.repel_radius)?;
        if self.particles.max_speed_factor < 1.0 {
            return Err(invalid("particles.max_speed_factor must be at least 1"));
        }

        if self.overlay.every_n_frames == 0 {
            return Err(invalid("overlay.every_n_frames must be at least 1"));
        }

        // colours are checked by resolving them once
        self.palette().map(|_| ())
    }
}

fn invalid(message: &str) -> ConfigError {
    ConfigError::Invalid(message.to_string())
}

fn check_range(name: &str, range: [f32; 2]) -> Result<(), ConfigError> {
    let [low, high] = range;
    if !low.is_finite() || !high.is_finite() || low < 0.0 || low > high {
        return Err(invalid(&format!(
            "{} must be an ascending non-negative pair, got [{}, {}]",
            name, low, high
        )));
    }
    Ok(())
}

fn check_positive(name: &str, value: f32) -> Result<(), ConfigError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(invalid(&format!("{} must be positive, got {}", name, value)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config.field.mode, FieldMode::Network);
        assert_eq!(config.network.max_connections, 2);
        assert_eq!(config.particles.count, 100);
    }

    #[test]
    fn test_partial_sections_merge_with_defaults() {
        let config = Config::from_toml_str(
            r#"
            [field]
            mode = "particles"

            [network]
            spacing = 40.0
            "#,
        )
        .unwrap();

        assert_eq!(config.field.mode, FieldMode::Particles);
        assert_eq!(config.network.spacing, 40.0);
        assert_eq!(config.network.max_points, 200);
        assert_eq!(config.field.wave_size, 5);
    }

    #[test]
    fn test_rejects_inverted_range() {
        let result = Config::from_toml_str(
            r#"
            [points]
            active_radius = [7.0, 5.0]
            "#,
        );
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_rejects_bad_values() {
        let cases = [
            "[network]\nspacing = 0.0",
            "[network]\nmax_points = 0",
            "[network]\nhover_chance = 1.5",
            "[particles]\nmax_speed_factor = 0.5",
            "[overlay]\nevery_n_frames = 0",
        ];
        for case in cases {
            assert!(
                matches!(Config::from_toml_str(case), Err(ConfigError::Invalid(_))),
                "accepted {:?}",
                case
            );
        }
    }

    #[test]
    fn test_rejects_bad_colour_and_bad_syntax() {
        assert!(matches!(
            Config::from_toml_str("[palette]\nbackground = \"#12\""),
            Err(ConfigError::Color { .. })
        ));
        assert!(matches!(
            Config::from_toml_str("[field\nmode = 1"),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            Config::from_toml_str("[field]\nmode = \"spiral\""),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[particles]\ncount = 12\nrepel_radius = 80.0").unwrap();

        let config = Config::load_from(file.path()).unwrap();
        assert_eq!(config.particles.count, 12);
        assert_eq!(config.particles.repel_radius, 80.0);
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = Config::load_from(dir.path().join("missing.toml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_shipped_config_is_valid() {
        let content = include_str!("../../config.toml");
        let config = Config::from_toml_str(content).unwrap();
        assert_eq!(config.palette().unwrap().accents.len(), 5);
    }
}
