//! Error types for the GranaApp calculation engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while loading presets, parsing
//! request amounts or running the calculators.

use thiserror::Error;

/// The main error type for the calculation engine.
///
/// All fallible operations in the engine return this error type, making it
/// easy to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use grana_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/app.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/app.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A named preset was not found in the configuration.
    #[error("{kind} preset not found: {name}")]
    PresetNotFound {
        /// The kind of preset that was requested ("overtime" or "rate").
        kind: String,
        /// The preset name that was not found.
        name: String,
    },

    /// A request was missing a field or combined fields inconsistently.
    #[error("Invalid request field '{field}': {message}")]
    InvalidRequest {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// A user-entered amount could not be parsed as a decimal number.
    #[error("Invalid amount '{input}': {message}")]
    InvalidAmount {
        /// The raw input that failed to parse.
        input: String,
        /// A description of the parse failure.
        message: String,
    },

    /// A general calculation error occurred.
    #[error("Calculation error: {message}")]
    CalculationError {
        /// A description of the calculation error.
        message: String,
    },
}

impl EngineError {
    /// Builds a [`EngineError::CalculationError`] for an arithmetic overflow.
    pub(crate) fn overflow(operation: &str) -> Self {
        EngineError::CalculationError {
            message: format!("arithmetic overflow while computing {}", operation),
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_not_found_displays_path() {
        let error = EngineError::ConfigNotFound {
            path: "/missing/app.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/app.yaml"
        );
    }

    #[test]
    fn test_config_parse_error_displays_path_and_message() {
        let error = EngineError::ConfigParseError {
            path: "/config/presets.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration file '/config/presets.yaml': invalid YAML syntax"
        );
    }

    #[test]
    fn test_preset_not_found_displays_kind_and_name() {
        let error = EngineError::PresetNotFound {
            kind: "overtime".to_string(),
            name: "triple_time".to_string(),
        };
        assert_eq!(error.to_string(), "overtime preset not found: triple_time");
    }

    #[test]
    fn test_invalid_request_displays_field_and_message() {
        let error = EngineError::InvalidRequest {
            field: "period_months".to_string(),
            message: "either period_months or period_years is required".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid request field 'period_months': either period_months or period_years is required"
        );
    }

    #[test]
    fn test_invalid_amount_displays_input() {
        let error = EngineError::InvalidAmount {
            input: "abc".to_string(),
            message: "not a number".to_string(),
        };
        assert_eq!(error.to_string(), "Invalid amount 'abc': not a number");
    }

    #[test]
    fn test_overflow_helper_builds_calculation_error() {
        let error = EngineError::overflow("projection balance");
        assert_eq!(
            error.to_string(),
            "Calculation error: arithmetic overflow while computing projection balance"
        );
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_preset_not_found() -> EngineResult<()> {
            Err(EngineError::PresetNotFound {
                kind: "rate".to_string(),
                name: "unknown".to_string(),
            })
        }

        fn propagates_error() -> EngineResult<()> {
            returns_preset_not_found()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
