//! Configuration loading for the GranaApp engine.
//!
//! Application metadata and named calculator presets are read from YAML
//! files in a configuration directory.
//!
//! # Example
//!
//! ```no_run
//! use grana_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/grana").unwrap();
//! println!("Loaded {} {}", config.app().name, config.app().version);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{AppMetadata, GranaConfig, OvertimePreset, PresetsConfig, RatePreset};
