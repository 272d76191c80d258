//! Compound-interest projection.
//!
//! This module simulates fixed monthly contributions compounding at a fixed
//! monthly rate. Each month the contribution is added first and the rate is
//! applied to the new balance:
//!
//! ```text
//! balance[m] = (balance[m-1] + contribution) × (1 + rate)
//! ```

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::{EngineError, EngineResult};
use crate::models::{Projection, ProjectionRow};

/// Months in one year.
const MONTHS_PER_YEAR: Decimal = Decimal::from_parts(12, 0, 0, false, 0);

/// Longest projection accepted, in months (100 years).
pub const MAX_PROJECTION_MONTHS: u32 = 1200;

/// Builds the month-by-month trajectory of a recurring investment.
///
/// Negative `initial_amount` and `monthly_contribution` are clamped to zero.
/// `monthly_rate` may be negative (a loss scenario) and is not clamped. The
/// trajectory holds `period_months + 1` rows, month 0 being the initial amount
/// with no contributions. Periods longer than [`MAX_PROJECTION_MONTHS`] are
/// rejected before any row is built.
///
/// # Arguments
///
/// * `initial_amount` - Amount invested at month 0
/// * `monthly_contribution` - Amount added at the start of every month
/// * `period_months` - Number of months to simulate
/// * `monthly_rate` - Growth per month as a fraction (`0.01` for 1%)
///
/// # Errors
///
/// Returns [`EngineError::InvalidRequest`] if `period_months` exceeds
/// [`MAX_PROJECTION_MONTHS`], and [`EngineError::CalculationError`] if the
/// balance overflows the decimal range.
///
/// # Example
///
/// ```
/// use grana_engine::calculation::build_compound_projection;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let projection = build_compound_projection(
///     Decimal::from(1000),
///     Decimal::from(200),
///     1,
///     Decimal::from_str("0.01").unwrap(),
/// )
/// .unwrap();
///
/// assert_eq!(projection.rows.len(), 2);
/// assert_eq!(projection.rows[1].balance, Decimal::from(1212));
/// assert_eq!(projection.invested_total, Decimal::from(1200));
/// assert_eq!(projection.interest, Decimal::from(12));
/// ```
pub fn build_compound_projection(
    initial_amount: Decimal,
    monthly_contribution: Decimal,
    period_months: u32,
    monthly_rate: Decimal,
) -> EngineResult<Projection> {
    check_period("period_months", period_months)?;

    let initial_amount = initial_amount.max(Decimal::ZERO);
    let monthly_contribution = monthly_contribution.max(Decimal::ZERO);
    let growth = Decimal::ONE
        .checked_add(monthly_rate)
        .ok_or_else(|| EngineError::overflow("monthly growth factor"))?;

    let mut balance = initial_amount;
    let mut invested = initial_amount;
    let mut rows = Vec::with_capacity(period_months as usize + 1);
    rows.push(ProjectionRow {
        month: 0,
        balance,
        invested,
    });

    for month in 1..=period_months {
        balance = balance
            .checked_add(monthly_contribution)
            .and_then(|value| value.checked_mul(growth))
            .ok_or_else(|| EngineError::overflow("projection balance"))?;
        invested = invested
            .checked_add(monthly_contribution)
            .ok_or_else(|| EngineError::overflow("invested principal"))?;

        rows.push(ProjectionRow {
            month,
            balance,
            invested,
        });
    }

    let interest = balance
        .checked_sub(invested)
        .ok_or_else(|| EngineError::overflow("projection interest"))?;

    Ok(Projection {
        rows,
        invested_total: invested,
        total: balance,
        interest,
    })
}

/// Converts an annual rate in percent to the equivalent monthly fraction.
///
/// Computes `(1 + annual_rate_percent / 100)^(1/12) - 1`, the monthly rate
/// that compounds to the annual rate over twelve months.
///
/// # Errors
///
/// Returns [`EngineError::CalculationError`] for annual rates below -100%,
/// which have no real monthly equivalent.
///
/// # Example
///
/// ```
/// use grana_engine::calculation::convert_annual_rate_to_monthly;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let monthly = convert_annual_rate_to_monthly(Decimal::from(12)).unwrap();
/// let expected = Decimal::from_str("0.0094887929345829741").unwrap();
/// assert!((monthly - expected).abs() < Decimal::from_str("0.000000000001").unwrap());
/// ```
pub fn convert_annual_rate_to_monthly(annual_rate_percent: Decimal) -> EngineResult<Decimal> {
    let base = annual_rate_percent
        .checked_div(Decimal::ONE_HUNDRED)
        .and_then(|fraction| Decimal::ONE.checked_add(fraction))
        .ok_or_else(|| EngineError::overflow("annual growth factor"))?;

    if base.is_zero() {
        return Ok(Decimal::NEGATIVE_ONE);
    }
    if base.is_sign_negative() {
        return Err(EngineError::CalculationError {
            message: format!(
                "annual rate of {}% has no monthly equivalent",
                annual_rate_percent.normalize()
            ),
        });
    }

    // Twelfth root is taken in f64.
    base.to_f64()
        .map(|factor| factor.powf(1.0 / 12.0))
        .and_then(Decimal::from_f64)
        .map(|factor| factor - Decimal::ONE)
        .ok_or_else(|| EngineError::overflow("monthly rate"))
}

/// Converts a period in years to whole months, rounding to the nearest month.
///
/// Negative periods become zero months.
///
/// # Errors
///
/// Returns [`EngineError::InvalidRequest`] if the rounded period exceeds
/// [`MAX_PROJECTION_MONTHS`].
///
/// # Example
///
/// ```
/// use grana_engine::calculation::months_from_years;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(months_from_years(Decimal::from(10)).unwrap(), 120);
/// assert_eq!(months_from_years(Decimal::from_str("1.5").unwrap()).unwrap(), 18);
/// ```
pub fn months_from_years(years: Decimal) -> EngineResult<u32> {
    let months = years
        .max(Decimal::ZERO)
        .checked_mul(MONTHS_PER_YEAR)
        .ok_or_else(|| EngineError::overflow("projection period"))?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);

    let months = months
        .to_u32()
        .filter(|months| *months <= MAX_PROJECTION_MONTHS)
        .ok_or_else(|| EngineError::InvalidRequest {
            field: "period_years".to_string(),
            message: format!(
                "period of {} years exceeds {} months",
                years.normalize(),
                MAX_PROJECTION_MONTHS
            ),
        })?;
    Ok(months)
}

/// Rejects projection lengths above [`MAX_PROJECTION_MONTHS`].
fn check_period(field: &str, months: u32) -> EngineResult<u32> {
    if months > MAX_PROJECTION_MONTHS {
        return Err(EngineError::InvalidRequest {
            field: field.to_string(),
            message: format!("must be at most {} months", MAX_PROJECTION_MONTHS),
        });
    }
    Ok(months)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn projection_has_one_row_per_month_plus_month_zero(
            initial in 0i64..1_000_000,
            contribution in 0i64..10_000,
            months in 0u32..360,
            rate_bps in -200i64..200,
        ) {
            let projection = build_compound_projection(
                Decimal::from(initial),
                Decimal::from(contribution),
                months,
                Decimal::new(rate_bps, 4),
            )
            .unwrap();

            prop_assert_eq!(projection.rows.len(), months as usize + 1);
            prop_assert_eq!(
                projection.invested_total,
                Decimal::from(initial) + Decimal::from(contribution) * Decimal::from(months)
            );
            prop_assert_eq!(projection.interest, projection.total - projection.invested_total);
        }
    }
}
