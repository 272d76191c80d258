//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading application
//! metadata and calculator presets from YAML files.

use rust_decimal::Decimal;
use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::{AppMetadata, GranaConfig, PresetsConfig};

/// Loads and provides access to the application configuration.
///
/// # Directory Structure
///
/// ```text
/// config/grana/
/// ├── app.yaml       # name, version
/// └── presets.yaml   # overtime percentages and annual rates
/// ```
///
/// # Example
///
/// ```no_run
/// use grana_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/grana")?;
/// let percentage = loader.get_overtime_preset("weekday_50")?;
/// let annual = loader.get_rate_preset("cdi")?;
/// println!("{} / {}", percentage, annual);
/// # Ok::<(), grana_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: GranaConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Returns `ConfigNotFound` if either file is missing and
    /// `ConfigParseError` if either contains invalid YAML.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let app = Self::load_yaml::<AppMetadata>(&path.join("app.yaml"))?;
        let presets = Self::load_yaml::<PresetsConfig>(&path.join("presets.yaml"))?;

        Ok(Self {
            config: GranaConfig::new(app, presets),
        })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the underlying configuration.
    pub fn config(&self) -> &GranaConfig {
        &self.config
    }

    /// Returns the application metadata.
    pub fn app(&self) -> &AppMetadata {
        self.config.app()
    }

    /// Gets an overtime percentage (as a fraction) by preset code.
    pub fn get_overtime_preset(&self, name: &str) -> EngineResult<Decimal> {
        self.config
            .presets()
            .overtime
            .get(name)
            .map(|preset| preset.percentage)
            .ok_or_else(|| EngineError::PresetNotFound {
                kind: "overtime".to_string(),
                name: name.to_string(),
            })
    }

    /// Gets an annual rate in percent by preset code.
    pub fn get_rate_preset(&self, name: &str) -> EngineResult<Decimal> {
        self.config
            .presets()
            .rates
            .get(name)
            .map(|preset| preset.annual_percent)
            .ok_or_else(|| EngineError::PresetNotFound {
                kind: "rate".to_string(),
                name: name.to_string(),
            })
    }
}
