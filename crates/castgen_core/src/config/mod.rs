//! Project configuration and run settings.

mod project;
mod settings;

pub use project::ProjectConfig;
pub use settings::Settings;

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read project file: {0}")]
    Read(#[from] io::Error),

    #[error("Failed to parse project file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Project file not found: {0}")]
    NotFound(PathBuf),

    #[error("Invalid project: {0}")]
    Validation(String),
}

impl ConfigError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}

/// Result type for config operations.
pub type ConfigResult<T> = Result<T, ConfigError>;
