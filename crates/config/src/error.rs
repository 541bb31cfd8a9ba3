use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config in {path}: {message}")]
    Invalid { path: PathBuf, message: String },

    #[error("Unsupported config file format: {0}")]
    UnsupportedFormat(PathBuf),

    #[error("Profile '{name}' not found. Available profiles: {available}")]
    ProfileNotFound { name: String, available: String },

    #[error("Config defines several profiles and no default. Use --profile with one of: {available}")]
    NoDefaultProfile { available: String },
}
