//! Calculation result envelope.
//!
//! Every calculator response is wrapped in a [`CalculationResult`] that
//! carries an identifier, a timestamp, the engine version and an
//! [`AuditTrace`] with any warnings raised while interpreting the input.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Severity attached to an [`AuditWarning`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningSeverity {
    /// Informational; the result is still what the caller asked for.
    Low,
    /// The input was adjusted or partly ignored.
    Medium,
    /// The result is likely not meaningful.
    High,
}

/// A warning generated during calculation.
///
/// Warnings flag conditions that do not prevent a result but that the
/// caller should know about, such as an end time that was moved to the
/// next day.
///
/// # Example
///
/// ```
/// use grana_engine::models::{AuditWarning, WarningSeverity};
///
/// let warning = AuditWarning::new(
///     "END_ADVANCED_ONE_DAY",
///     "end time was before start time and was moved to the next day",
///     WarningSeverity::Low,
/// );
/// assert_eq!(warning.code, "END_ADVANCED_ONE_DAY");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// How much the warning affects the result.
    pub severity: WarningSeverity,
}

impl AuditWarning {
    /// Creates a new warning.
    pub fn new(code: impl Into<String>, message: impl Into<String>, severity: WarningSeverity) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            severity,
        }
    }
}

/// Audit information attached to a calculation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// Warnings raised while interpreting the input.
    pub warnings: Vec<AuditWarning>,
    /// Time taken by the calculation in microseconds.
    pub duration_us: u64,
}

/// The envelope returned for every calculation.
///
/// # Example
///
/// ```
/// use grana_engine::models::{AuditTrace, CalculationResult};
///
/// let result = CalculationResult::new("0.1.0", 42_u32, AuditTrace::default());
/// assert_eq!(result.result, 42);
/// assert_eq!(result.engine_version, "0.1.0");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationResult<T> {
    /// Unique identifier for this calculation.
    pub calculation_id: Uuid,
    /// When the calculation was performed.
    pub timestamp: DateTime<Utc>,
    /// The version of the engine that performed the calculation.
    pub engine_version: String,
    /// The calculator output.
    pub result: T,
    /// Warnings and timing for the calculation.
    pub audit_trace: AuditTrace,
}

impl<T> CalculationResult<T> {
    /// Wraps `result` with a fresh identifier and the current time.
    pub fn new(engine_version: impl Into<String>, result: T, audit_trace: AuditTrace) -> Self {
        Self {
            calculation_id: Uuid::new_v4(),
            timestamp: Utc::now(),
            engine_version: engine_version.into(),
            result,
            audit_trace,
        }
    }

    /// Returns true if any warning was raised.
    pub fn has_warnings(&self) -> bool {
        !self.audit_trace.warnings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PayBreakdown;

    #[test]
    fn test_envelope_serializes_result_inline() {
        let result = CalculationResult::new("0.1.0", PayBreakdown::zero(), AuditTrace::default());
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["engine_version"], "0.1.0");
        assert_eq!(json["result"]["total_value"], "0");
        assert_eq!(json["audit_trace"]["duration_us"], 0);
        assert!(json["calculation_id"].is_string());
    }

    #[test]
    fn test_each_result_gets_its_own_id() {
        let first = CalculationResult::new("0.1.0", (), AuditTrace::default());
        let second = CalculationResult::new("0.1.0", (), AuditTrace::default());
        assert_ne!(first.calculation_id, second.calculation_id);
    }

    #[test]
    fn test_has_warnings() {
        let mut result = CalculationResult::new("0.1.0", (), AuditTrace::default());
        assert!(!result.has_warnings());

        result.audit_trace.warnings.push(AuditWarning::new(
            "MISSING_QUOTE",
            "position has no current price",
            WarningSeverity::Low,
        ));
        assert!(result.has_warnings());
    }

    #[test]
    fn test_severity_serializes_snake_case() {
        let json = serde_json::to_string(&WarningSeverity::Medium).unwrap();
        assert_eq!(json, "\"medium\"");
    }

    #[test]
    fn test_deserialize_envelope() {
        let json = r#"{
            "calculation_id": "550e8400-e29b-41d4-a716-446655440000",
            "timestamp": "2026-01-15T10:00:00Z",
            "engine_version": "0.1.0",
            "result": 7,
            "audit_trace": {
                "warnings": [],
                "duration_us": 12
            }
        }"#;

        let result: CalculationResult<u32> = serde_json::from_str(json).unwrap();
        assert_eq!(result.result, 7);
        assert_eq!(result.audit_trace.duration_us, 12);
    }
}
