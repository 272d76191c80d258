//! Overtime pay calculation.
//!
//! This module turns a shift and its pay parameters into a [`PayBreakdown`].
//!
//! ## Pay Structure
//!
//! - **Base value:** every hour of the shift × hourly rate × (1 + overtime percentage)
//! - **Night extra:** hours inside the 22:00-06:00 window × hourly rate × 0.30
//!
//! Night hours appear in both terms: the night premium stacks on top of the
//! overtime rate instead of replacing it.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::{MINUTES_PER_HOUR, OvertimeEntry, OvertimeSummary, PayBreakdown};

use super::interval::ShiftInterval;
use super::night_window::{NIGHT_PREMIUM_RATE, night_minutes};

/// Calculates overtime pay for a raw (not yet normalized) shift.
///
/// Returns [`PayBreakdown::zero`] when `start`, `end` or `hourly_rate` is
/// missing, when `hourly_rate` is zero, or when `overtime_percentage` is
/// missing. Forms rely on this to render an empty summary while incomplete.
///
/// Otherwise the interval is normalized (an end at or before the start moves
/// to the next day) and the breakdown is computed by [`calculate_interval_pay`].
/// Negative rates and percentages are not rejected; they flow through the
/// arithmetic unchanged.
///
/// # Arguments
///
/// * `start` - Shift start
/// * `end` - Shift end, possibly earlier than `start` for overnight shifts
/// * `hourly_rate` - The hourly rate
/// * `overtime_percentage` - Extra fraction paid on every hour (`0.5` for +50%)
///
/// # Errors
///
/// Returns [`EngineError::CalculationError`] on decimal overflow or when the
/// end cannot be advanced within the calendar.
///
/// # Examples
///
/// ## Overnight shift entered with bare clock times
///
/// ```
/// use grana_engine::calculation::calculate_overtime_pay;
/// use chrono::NaiveDateTime;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let start = NaiveDateTime::parse_from_str("2026-03-02 22:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
/// let end = NaiveDateTime::parse_from_str("2026-03-02 06:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
///
/// let breakdown = calculate_overtime_pay(
///     Some(start),
///     Some(end),
///     Some(Decimal::from(20)),
///     Some(Decimal::from_str("0.5").unwrap()),
/// )
/// .unwrap();
///
/// assert_eq!(breakdown.total_minutes, Decimal::from(480));
/// assert_eq!(breakdown.night_minutes, Decimal::from(480));
/// assert_eq!(breakdown.base_value, Decimal::from(240));
/// assert_eq!(breakdown.night_extra, Decimal::from(48));
/// assert_eq!(breakdown.total_value, Decimal::from(288));
/// ```
///
/// ## Incomplete form
///
/// ```
/// use grana_engine::calculation::calculate_overtime_pay;
/// use grana_engine::models::PayBreakdown;
/// use rust_decimal::Decimal;
///
/// let breakdown = calculate_overtime_pay(None, None, Some(Decimal::from(20)), None).unwrap();
/// assert_eq!(breakdown, PayBreakdown::zero());
/// ```
pub fn calculate_overtime_pay(
    start: Option<NaiveDateTime>,
    end: Option<NaiveDateTime>,
    hourly_rate: Option<Decimal>,
    overtime_percentage: Option<Decimal>,
) -> EngineResult<PayBreakdown> {
    let (Some(start), Some(end), Some(hourly_rate), Some(overtime_percentage)) =
        (start, end, hourly_rate, overtime_percentage)
    else {
        return Ok(PayBreakdown::zero());
    };

    if hourly_rate.is_zero() {
        return Ok(PayBreakdown::zero());
    }

    let interval = ShiftInterval::normalize(start, end)?;
    calculate_interval_pay(&interval, hourly_rate, overtime_percentage)
}

/// Calculates the pay breakdown for an already-normalized interval.
///
/// Values are computed from minutes and divided by 60 last, so whole-minute
/// shifts at cent-precision rates produce exact results.
pub fn calculate_interval_pay(
    interval: &ShiftInterval,
    hourly_rate: Decimal,
    overtime_percentage: Decimal,
) -> EngineResult<PayBreakdown> {
    let total_minutes = interval.duration_minutes();
    let night_minutes = night_minutes(interval);

    let overtime_multiplier = Decimal::ONE
        .checked_add(overtime_percentage)
        .ok_or_else(|| EngineError::overflow("overtime multiplier"))?;

    let base_value = total_minutes
        .checked_mul(hourly_rate)
        .and_then(|value| value.checked_mul(overtime_multiplier))
        .and_then(|value| value.checked_div(MINUTES_PER_HOUR))
        .ok_or_else(|| EngineError::overflow("base value"))?;

    let night_extra = night_minutes
        .checked_mul(hourly_rate)
        .and_then(|value| value.checked_mul(NIGHT_PREMIUM_RATE))
        .and_then(|value| value.checked_div(MINUTES_PER_HOUR))
        .ok_or_else(|| EngineError::overflow("night extra"))?;

    let total_value = base_value
        .checked_add(night_extra)
        .ok_or_else(|| EngineError::overflow("total value"))?;

    Ok(PayBreakdown {
        total_minutes,
        night_minutes,
        base_value,
        night_extra,
        total_value,
    })
}

/// Recalculates and sums a list of stored overtime entries.
///
/// Incomplete entries contribute the zero breakdown but are still counted.
///
/// # Example
///
/// ```
/// use grana_engine::calculation::summarize_overtime;
/// use grana_engine::models::OvertimeEntry;
/// use rust_decimal::Decimal;
///
/// let entries: Vec<OvertimeEntry> = serde_json::from_str(r#"[
///     { "id": "a", "start_time": "2026-03-02T08:00:00", "end_time": "2026-03-02T10:00:00",
///       "hourly_rate": "10", "overtime_percentage": "0.5" },
///     { "id": "b" }
/// ]"#).unwrap();
///
/// let summary = summarize_overtime(&entries).unwrap();
/// assert_eq!(summary.entry_count, 2);
/// assert_eq!(summary.total_value, Decimal::from(30));
/// ```
pub fn summarize_overtime(entries: &[OvertimeEntry]) -> EngineResult<OvertimeSummary> {
    let breakdowns = entries
        .iter()
        .map(OvertimeEntry::breakdown)
        .collect::<EngineResult<Vec<_>>>()?;
    summarize_breakdowns(&breakdowns)
}

/// Sums breakdowns that were already calculated, one per entry.
pub fn summarize_breakdowns<'a, I>(breakdowns: I) -> EngineResult<OvertimeSummary>
where
    I: IntoIterator<Item = &'a PayBreakdown>,
{
    let mut summary = OvertimeSummary::default();

    for breakdown in breakdowns {
        summary.entry_count += 1;
        summary.total_minutes = checked_sum(summary.total_minutes, breakdown.total_minutes)?;
        summary.night_minutes = checked_sum(summary.night_minutes, breakdown.night_minutes)?;
        summary.base_value = checked_sum(summary.base_value, breakdown.base_value)?;
        summary.night_extra = checked_sum(summary.night_extra, breakdown.night_extra)?;
        summary.total_value = checked_sum(summary.total_value, breakdown.total_value)?;
    }

    Ok(summary)
}

fn checked_sum(acc: Decimal, value: Decimal) -> EngineResult<Decimal> {
    acc.checked_add(value)
        .ok_or_else(|| EngineError::overflow("overtime summary"))
}
