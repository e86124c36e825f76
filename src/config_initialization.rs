//! Configuration initialization and hierarchy management
//!
//! Precedence, lowest first: built-in defaults, the TOML file, `TRACKCUT_*`
//! environment variables, command-line flags.

use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::adapters::toml_config::TomlConfigAdapter;
use crate::cli::Cli;
use crate::domain::playback::DEFAULT_SYNC_TOLERANCE;
use crate::error::{TrackcutError, TrackcutResult};
use crate::utils::logging::{LogFormat, LogLevel};

/// Fully resolved application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub log_level: String,
    pub log_format: String,
    /// Directory backing the local object store
    pub storage_root: PathBuf,
    /// Object-key prefix for user uploads
    pub upload_prefix: String,
    /// Object-key prefix for merge inputs
    pub merge_prefix: String,
    pub ffprobe_path: String,
    /// Seconds of drift tolerated between primary and audio elements
    pub sync_tolerance: f64,
    /// Where exported files are written
    pub output_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: "pretty".to_string(),
            storage_root: PathBuf::from(".trackcut/storage"),
            upload_prefix: "uploads".to_string(),
            merge_prefix: "tmp".to_string(),
            ffprobe_path: "ffprobe".to_string(),
            sync_tolerance: DEFAULT_SYNC_TOLERANCE,
            output_dir: PathBuf::from("."),
        }
    }
}

/// One source of configuration; unset keys fall through to lower layers
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigLayer {
    pub log_level: Option<String>,
    pub log_format: Option<String>,
    pub storage_root: Option<PathBuf>,
    pub upload_prefix: Option<String>,
    pub merge_prefix: Option<String>,
    pub ffprobe_path: Option<String>,
    pub sync_tolerance: Option<f64>,
    pub output_dir: Option<PathBuf>,
}

impl ConfigLayer {
    pub fn is_empty(&self) -> bool {
        self == &ConfigLayer::default()
    }

    /// Build a layer from `TRACKCUT_*` variables supplied by `lookup`
    pub fn from_env_with<F>(lookup: F) -> TrackcutResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let sync_tolerance = match lookup("TRACKCUT_SYNC_TOLERANCE") {
            Some(raw) => Some(raw.trim().parse::<f64>().map_err(|_| {
                TrackcutError::ConfigError {
                    message: format!("Invalid TRACKCUT_SYNC_TOLERANCE: {}", raw),
                }
            })?),
            None => None,
        };

        Ok(Self {
            log_level: lookup("TRACKCUT_LOG_LEVEL"),
            log_format: lookup("TRACKCUT_LOG_FORMAT"),
            storage_root: lookup("TRACKCUT_STORAGE_ROOT").map(PathBuf::from),
            upload_prefix: lookup("TRACKCUT_UPLOAD_PREFIX"),
            merge_prefix: lookup("TRACKCUT_MERGE_PREFIX"),
            ffprobe_path: lookup("TRACKCUT_FFPROBE_PATH"),
            sync_tolerance,
            output_dir: lookup("TRACKCUT_OUTPUT_DIR").map(PathBuf::from),
        })
    }

    pub fn from_env() -> TrackcutResult<Self> {
        Self::from_env_with(|key| std::env::var(key).ok())
    }
}

impl AppConfig {
    /// Overlay every key `layer` sets
    pub fn apply(&mut self, layer: ConfigLayer) {
        if let Some(v) = layer.log_level {
            self.log_level = v;
        }
        if let Some(v) = layer.log_format {
            self.log_format = v;
        }
        if let Some(v) = layer.storage_root {
            self.storage_root = v;
        }
        if let Some(v) = layer.upload_prefix {
            self.upload_prefix = v;
        }
        if let Some(v) = layer.merge_prefix {
            self.merge_prefix = v;
        }
        if let Some(v) = layer.ffprobe_path {
            self.ffprobe_path = v;
        }
        if let Some(v) = layer.sync_tolerance {
            self.sync_tolerance = v;
        }
        if let Some(v) = layer.output_dir {
            self.output_dir = v;
        }
    }

    pub fn level(&self) -> TrackcutResult<LogLevel> {
        LogLevel::parse(&self.log_level)
    }

    pub fn format(&self) -> TrackcutResult<LogFormat> {
        LogFormat::parse(&self.log_format)
    }

    pub fn validate(&self) -> TrackcutResult<()> {
        self.level()?;
        self.format()?;

        if !self.sync_tolerance.is_finite() || self.sync_tolerance <= 0.0 {
            return Err(TrackcutError::ConfigError {
                message: format!(
                    "sync_tolerance must be a positive number of seconds, got {}",
                    self.sync_tolerance
                ),
            });
        }
        if self.ffprobe_path.trim().is_empty() {
            return Err(TrackcutError::ConfigError {
                message: "ffprobe_path cannot be empty".to_string(),
            });
        }
        Ok(())
    }
}

/// Merge layers over the defaults and validate the result
pub fn resolve_configuration(
    file: Option<ConfigLayer>,
    env: ConfigLayer,
    cli: ConfigLayer,
) -> TrackcutResult<AppConfig> {
    let mut config = AppConfig::default();

    if let Some(file) = file {
        config.apply(file);
    }
    if !env.is_empty() {
        debug!(?env, "applying environment overrides");
        config.apply(env);
    }
    if !cli.is_empty() {
        debug!(?cli, "applying CLI overrides");
        config.apply(cli);
    }

    config.validate()?;
    Ok(config)
}

/// Initialize configuration hierarchy following precedence: CLI > Env > File > Defaults
pub fn initialize_configuration_hierarchy(cli: &Cli) -> Result<AppConfig> {
    // An explicit --config must exist; the default location is optional
    let file = match &cli.config {
        Some(path) => Some(TomlConfigAdapter::new(path).load()?),
        None => {
            let adapter = TomlConfigAdapter::default_location();
            if adapter.exists() {
                Some(adapter.load()?)
            } else {
                info!("No config file loaded");
                None
            }
        }
    };

    let config = resolve_configuration(file, ConfigLayer::from_env()?, cli.config_overrides())?;
    Ok(config)
}
