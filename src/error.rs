// src/error.rs
//
// Error types for config loading and field start-up.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid colour for {field}: {value:?}")]
    Color { field: String, value: String },
    #[error("Invalid config: {0}")]
    Invalid(String),
}

#[derive(Error, Debug)]
pub enum FieldError {
    /// The drawable surface is missing or has no usable area.
    #[error("Invalid surface size {width}x{height}")]
    InvalidSurface { width: f32, height: f32 },
    #[error(transparent)]
    Config(#[from] ConfigError),
}
