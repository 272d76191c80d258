//! Configuration types.
//!
//! These structures are deserialized from the YAML files in the
//! configuration directory.

use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashMap;

/// Metadata about the application, read from `app.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct AppMetadata {
    /// Display name of the application.
    pub name: String,
    /// Version reported as `engine_version` in results.
    pub version: String,
}

/// A named overtime percentage.
#[derive(Debug, Clone, Deserialize)]
pub struct OvertimePreset {
    /// Human-readable label.
    pub name: String,
    /// Percentage as a fraction (`0.5` for +50%).
    pub percentage: Decimal,
}

/// A named annual interest rate.
#[derive(Debug, Clone, Deserialize)]
pub struct RatePreset {
    /// Human-readable label.
    pub name: String,
    /// Annual rate in percent (`10.65` for 10.65% a year).
    pub annual_percent: Decimal,
}

/// Structure of `presets.yaml`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PresetsConfig {
    /// Overtime presets keyed by code.
    #[serde(default)]
    pub overtime: HashMap<String, OvertimePreset>,
    /// Rate presets keyed by code.
    #[serde(default)]
    pub rates: HashMap<String, RatePreset>,
}

/// Complete application configuration.
#[derive(Debug, Clone)]
pub struct GranaConfig {
    app: AppMetadata,
    presets: PresetsConfig,
}

impl GranaConfig {
    /// Creates a configuration from its loaded parts.
    pub fn new(app: AppMetadata, presets: PresetsConfig) -> Self {
        Self { app, presets }
    }

    /// Returns the application metadata.
    pub fn app(&self) -> &AppMetadata {
        &self.app
    }

    /// Returns the overtime and rate presets.
    pub fn presets(&self) -> &PresetsConfig {
        &self.presets
    }
}
