//! Minute-count display formatting.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Renders a minute count as `"{h}h {mm}m"`.
///
/// Negative input is treated as zero and the count is rounded to the nearest
/// whole minute (halves round up) before splitting into hours and minutes.
///
/// # Example
///
/// ```
/// use grana_engine::calculation::format_minutes_as_hours_and_minutes;
/// use rust_decimal::Decimal;
///
/// assert_eq!(format_minutes_as_hours_and_minutes(Decimal::from(125)), "2h 05m");
/// assert_eq!(format_minutes_as_hours_and_minutes(Decimal::from(-5)), "0h 00m");
/// ```
pub fn format_minutes_as_hours_and_minutes(minutes: Decimal) -> String {
    let whole_minutes = minutes
        .max(Decimal::ZERO)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u128()
        .unwrap_or_default();

    format!("{}h {:02}m", whole_minutes / 60, whole_minutes % 60)
}
