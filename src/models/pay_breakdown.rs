//! Overtime pay breakdown models.
//!
//! This module contains the [`PayBreakdown`] produced by the overtime pay
//! calculator, the [`OvertimeEntry`] record shape stored by the backend, and
//! the [`OvertimeSummary`] aggregate over several entries.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::amount::deserialize_optional_amount;

/// Minutes in one hour, used for every minutes-to-hours conversion.
pub const MINUTES_PER_HOUR: Decimal = Decimal::from_parts(60, 0, 0, false, 0);

/// The result of an overtime pay calculation.
///
/// `night_minutes` is always a subset of `total_minutes`. Night hours are paid
/// twice: once inside `base_value` at the overtime rate and once more inside
/// `night_extra` at the night premium.
///
/// # Example
///
/// ```
/// use grana_engine::models::PayBreakdown;
/// use rust_decimal::Decimal;
///
/// let empty = PayBreakdown::zero();
/// assert_eq!(empty.total_value, Decimal::ZERO);
/// assert_eq!(empty.total_hours(), Decimal::ZERO);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayBreakdown {
    /// Total elapsed minutes of the shift (fractional minutes allowed).
    pub total_minutes: Decimal,
    /// Minutes of the shift falling inside the nightly premium window.
    pub night_minutes: Decimal,
    /// All hours × hourly rate × (1 + overtime percentage).
    pub base_value: Decimal,
    /// Night hours × hourly rate × night premium.
    pub night_extra: Decimal,
    /// `base_value + night_extra`.
    pub total_value: Decimal,
}

impl PayBreakdown {
    /// Returns the all-zero breakdown used while a form is incomplete.
    pub fn zero() -> Self {
        Self::default()
    }

    /// Total shift duration in hours.
    pub fn total_hours(&self) -> Decimal {
        self.total_minutes / MINUTES_PER_HOUR
    }

    /// Night-window duration in hours.
    pub fn night_hours(&self) -> Decimal {
        self.night_minutes / MINUTES_PER_HOUR
    }
}

/// An overtime record as stored by the hosted backend.
///
/// Every calculation input is optional because the backend keeps partially
/// filled records; incomplete records recalculate to [`PayBreakdown::zero`].
///
/// # Example
///
/// ```
/// use grana_engine::models::OvertimeEntry;
/// use rust_decimal::Decimal;
///
/// let json = r#"{
///     "id": "ot_001",
///     "start_time": "2026-03-02T22:00:00",
///     "end_time": "2026-03-03T06:00:00",
///     "hourly_rate": "20",
///     "overtime_percentage": "0.5"
/// }"#;
///
/// let entry: OvertimeEntry = serde_json::from_str(json).unwrap();
/// let breakdown = entry.breakdown().unwrap();
/// assert_eq!(breakdown.total_value, Decimal::from(288));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OvertimeEntry {
    /// Unique identifier for the record.
    pub id: String,
    /// The date the overtime was worked.
    #[serde(default)]
    pub date: Option<NaiveDate>,
    /// Free-text description entered by the user.
    #[serde(default)]
    pub description: Option<String>,
    /// Shift start.
    #[serde(default)]
    pub start_time: Option<NaiveDateTime>,
    /// Shift end, possibly not yet advanced past midnight.
    #[serde(default)]
    pub end_time: Option<NaiveDateTime>,
    /// Hourly rate.
    #[serde(default, deserialize_with = "deserialize_optional_amount")]
    pub hourly_rate: Option<Decimal>,
    /// Overtime percentage as a fraction (`0.5` for +50%).
    #[serde(default, deserialize_with = "deserialize_optional_amount")]
    pub overtime_percentage: Option<Decimal>,
    /// The total stored alongside the record when it was last saved.
    #[serde(default, deserialize_with = "deserialize_optional_amount")]
    pub total_value: Option<Decimal>,
}

impl OvertimeEntry {
    /// Recalculates the pay breakdown from the record's inputs.
    pub fn breakdown(&self) -> crate::error::EngineResult<PayBreakdown> {
        crate::calculation::calculate_overtime_pay(
            self.start_time,
            self.end_time,
            self.hourly_rate,
            self.overtime_percentage,
        )
    }
}

/// Aggregated totals over several overtime entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OvertimeSummary {
    /// Number of entries summarized (including incomplete ones).
    pub entry_count: usize,
    /// Sum of total minutes.
    pub total_minutes: Decimal,
    /// Sum of night minutes.
    pub night_minutes: Decimal,
    /// Sum of base values.
    pub base_value: Decimal,
    /// Sum of night extras.
    pub night_extra: Decimal,
    /// Sum of total values.
    pub total_value: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_zero_breakdown_has_all_fields_zero() {
        let zero = PayBreakdown::zero();
        assert_eq!(zero.total_minutes, Decimal::ZERO);
        assert_eq!(zero.night_minutes, Decimal::ZERO);
        assert_eq!(zero.base_value, Decimal::ZERO);
        assert_eq!(zero.night_extra, Decimal::ZERO);
        assert_eq!(zero.total_value, Decimal::ZERO);
    }

    #[test]
    fn test_hours_are_derived_from_minutes() {
        let breakdown = PayBreakdown {
            total_minutes: dec("540"),
            night_minutes: dec("90"),
            ..PayBreakdown::zero()
        };
        assert_eq!(breakdown.total_hours(), dec("9"));
        assert_eq!(breakdown.night_hours(), dec("1.5"));
    }

    #[test]
    fn test_breakdown_serializes_snake_case_fields() {
        let breakdown = PayBreakdown {
            total_minutes: dec("480"),
            night_minutes: dec("480"),
            base_value: dec("240.0"),
            night_extra: dec("48.00"),
            total_value: dec("288.00"),
        };

        let json = serde_json::to_string(&breakdown).unwrap();
        assert!(json.contains("\"total_minutes\":\"480\""));
        assert!(json.contains("\"night_extra\":\"48.00\""));
        assert!(json.contains("\"total_value\":\"288.00\""));
    }

    #[test]
    fn test_entry_deserializes_with_missing_optional_fields() {
        let json = r#"{ "id": "ot_002", "description": "inventário" }"#;

        let entry: OvertimeEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.id, "ot_002");
        assert!(entry.start_time.is_none());
        assert!(entry.hourly_rate.is_none());
        assert_eq!(entry.breakdown().unwrap(), PayBreakdown::zero());
    }

    #[test]
    fn test_entry_accepts_numeric_amounts() {
        let json = r#"{
            "id": "ot_003",
            "date": "2026-03-02",
            "start_time": "2026-03-02T08:00:00",
            "end_time": "2026-03-02T17:00:00",
            "hourly_rate": 10,
            "overtime_percentage": 0.5,
            "total_value": 135
        }"#;

        let entry: OvertimeEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.hourly_rate, Some(dec("10")));
        assert_eq!(entry.overtime_percentage, Some(dec("0.5")));
        assert_eq!(entry.breakdown().unwrap().total_value, dec("135"));
    }

    #[test]
    fn test_entry_accepts_formatted_amounts() {
        let json = r#"{
            "id": "ot_004",
            "start_time": "2026-03-02T22:00:00",
            "end_time": "2026-03-02T06:00:00",
            "hourly_rate": "R$ 20,00",
            "overtime_percentage": "0,5",
            "total_value": "288,00"
        }"#;

        let entry: OvertimeEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.hourly_rate, Some(dec("20")));
        assert_eq!(entry.overtime_percentage, Some(dec("0.5")));
        assert_eq!(entry.total_value, Some(dec("288")));
        assert_eq!(entry.breakdown().unwrap().total_value, dec("288"));
    }
}
