// TOML config adapter - reads the `[trackcut]` section of a config file

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, info};

use crate::config_initialization::ConfigLayer;
use crate::error::{TrackcutError, TrackcutResult};

pub const DEFAULT_CONFIG_FILE: &str = "trackcut.toml";

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    trackcut: ConfigLayer,
}

/// TOML configuration adapter
pub struct TomlConfigAdapter {
    path: PathBuf,
}

impl TomlConfigAdapter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Adapter for `trackcut.toml` in the working directory
    pub fn default_location() -> Self {
        Self::new(DEFAULT_CONFIG_FILE)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Parse a config document; keys outside `[trackcut]` are ignored
    pub fn parse(content: &str) -> TrackcutResult<ConfigLayer> {
        let file: ConfigFile = toml::from_str(content)?;
        Ok(file.trackcut)
    }

    /// Read and parse the file
    pub fn load(&self) -> TrackcutResult<ConfigLayer> {
        if !self.exists() {
            return Err(TrackcutError::ConfigError {
                message: format!("Config file does not exist: {}", self.path.display()),
            });
        }

        let content = std::fs::read_to_string(&self.path)?;
        let layer = Self::parse(&content)?;
        info!("Loaded configuration from: {}", self.path.display());
        debug!(?layer, "file configuration layer");
        Ok(layer)
    }
}
