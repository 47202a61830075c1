// src/config/config_types.rs
//
// Config sections for the field engine and its window.
// Every section has defaults so a partial config.toml still loads.

use serde::Deserialize;

/// Which engine variant a field runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FieldMode {
    /// Lattice of points with spreading-activation links.
    #[default]
    Network,
    /// Free particles with pointer repulsion and distance links.
    Particles,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
    pub title: String,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            title: "neurofield".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    pub mode: FieldMode,
    pub wave_size: usize,   // points activated per wave
    pub wave_stagger: f32,  // ms between wave activations
    pub max_frame_dt: f32,  // frame delta cap in ms
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            mode: FieldMode::Network,
            wave_size: 5,
            wave_stagger: 50.0,
            max_frame_dt: 100.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PointConfig {
    pub idle_radius: [f32; 2],
    pub active_radius: [f32; 2],
    pub active_duration: [f32; 2],
    pub morph_duration: f32,
    pub morph_decay: f32,
    pub ease_rate: f32,
    pub ease_cap: f32,
}

impl Default for PointConfig {
    fn default() -> Self {
        Self {
            idle_radius: [1.5, 2.0],
            active_radius: [5.0, 7.0],
            active_duration: [800.0, 2000.0],
            morph_duration: 500.0,
            morph_decay: 0.002,
            ease_rate: 0.01,
            ease_cap: 0.2,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    pub spacing: f32,
    pub max_points: usize,
    pub connection_radius: f32,
    pub max_connections: usize,
    pub max_chain_length: u32,
    pub growth_speed: f32,             // link progress per ms
    pub fade_speed: f32,               // link opacity loss per ms
    pub hover_radius: f32,
    pub hover_chance: f32,             // per frame
    pub random_activation_chance: f32, // per frame
    pub idle_activation_rate: f32,     // per point per ms
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            spacing: 60.0,
            max_points: 200,
            connection_radius: 70.0,
            max_connections: 2,
            max_chain_length: 2,
            growth_speed: 0.003,
            fade_speed: 0.001,
            hover_radius: 50.0,
            hover_chance: 0.03,
            random_activation_chance: 0.01,
            idle_activation_rate: 0.00005,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ParticleConfig {
    pub count: usize,
    pub size: f32,
    pub speed: f32, // px per 60 Hz frame
    pub max_speed_factor: f32,
    pub connection_distance: f32,
    pub connection_width: f32,
    pub repel_radius: f32,
    pub repel_strength: f32,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            count: 100,
            size: 2.0,
            speed: 0.5,
            max_speed_factor: 2.0,
            connection_distance: 150.0,
            connection_width: 1.0,
            repel_radius: 100.0,
            repel_strength: 0.1,
        }
    }
}

impl ParticleConfig {
    pub fn max_speed(&self) -> f32 {
        self.speed * self.max_speed_factor
    }
}

/// Colours as written in config.toml; see `Palette` for the parsed form.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PaletteConfig {
    pub background: String,
    pub link: String,
    pub idle_fill: String,
    pub particle: String,
    pub proximity_link: String,
    pub accents: Vec<String>,
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            background: "#ebebeb".to_string(),
            link: "#202020cc".to_string(),
            idle_fill: "#00000033".to_string(),
            particle: "#2020204d".to_string(),
            proximity_link: "#20202033".to_string(),
            accents: ["#2a3666", "#3592db", "#4176ab", "#dc4c43", "#e86b2d"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    pub enabled: bool,
    pub color: String,
    pub every_n_frames: u32,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            color: "#ebebeb66".to_string(),
            every_n_frames: 1,
        }
    }
}
