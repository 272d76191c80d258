//! Request types for the GranaApp engine API.
//!
//! Amount fields accept either a JSON number or a locale-formatted string
//! such as `"R$ 1.234,56"`.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::{
    MAX_PROJECTION_MONTHS, convert_annual_rate_to_monthly, months_from_years,
};
use crate::config::ConfigLoader;
use crate::error::{EngineError, EngineResult};
use crate::models::{OvertimeEntry, Position, deserialize_amount, deserialize_optional_amount};

/// Request body for `POST /overtime/calculate`.
///
/// The shift is given either as full `start_time`/`end_time` datetimes or as
/// a `date` with bare `start_clock`/`end_clock` times. The overtime
/// percentage is given directly or by naming a configured preset.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OvertimeRequest {
    /// Shift start.
    #[serde(default)]
    pub start_time: Option<NaiveDateTime>,
    /// Shift end.
    #[serde(default)]
    pub end_time: Option<NaiveDateTime>,
    /// The date the shift starts on, used with the clock fields.
    #[serde(default)]
    pub date: Option<NaiveDate>,
    /// Clock time the shift starts.
    #[serde(default)]
    pub start_clock: Option<NaiveTime>,
    /// Clock time the shift ends; earlier than `start_clock` for overnight shifts.
    #[serde(default)]
    pub end_clock: Option<NaiveTime>,
    /// The hourly rate.
    #[serde(default, deserialize_with = "deserialize_optional_amount")]
    pub hourly_rate: Option<Decimal>,
    /// Overtime percentage as a fraction (`0.5` for +50%).
    #[serde(default, deserialize_with = "deserialize_optional_amount")]
    pub overtime_percentage: Option<Decimal>,
    /// Name of a configured overtime preset.
    #[serde(default)]
    pub overtime_preset: Option<String>,
}

impl OvertimeRequest {
    /// Returns the shift start and end as entered.
    ///
    /// The clock form is combined with `date` on both ends, so an overnight
    /// end comes back before the start and is advanced when the pay is
    /// calculated. Either end is `None` when the shift is incomplete.
    pub fn shift_endpoints(
        &self,
    ) -> EngineResult<(Option<NaiveDateTime>, Option<NaiveDateTime>)> {
        let has_datetimes = self.start_time.is_some() || self.end_time.is_some();
        let has_clocks =
            self.date.is_some() || self.start_clock.is_some() || self.end_clock.is_some();

        if has_datetimes && has_clocks {
            return Err(EngineError::InvalidRequest {
                field: "start_time".to_string(),
                message: "give either start_time/end_time or date with start_clock/end_clock"
                    .to_string(),
            });
        }

        if has_datetimes {
            return Ok((self.start_time, self.end_time));
        }

        let Some(date) = self.date else {
            return Ok((None, None));
        };
        Ok((
            self.start_clock.map(|clock| date.and_time(clock)),
            self.end_clock.map(|clock| date.and_time(clock)),
        ))
    }

    /// Resolves the overtime percentage from the request or a preset.
    pub fn percentage(&self, config: &ConfigLoader) -> EngineResult<Option<Decimal>> {
        match (self.overtime_percentage, self.overtime_preset.as_deref()) {
            (Some(_), Some(_)) => Err(EngineError::InvalidRequest {
                field: "overtime_preset".to_string(),
                message: "give either overtime_percentage or overtime_preset".to_string(),
            }),
            (Some(percentage), None) => Ok(Some(percentage)),
            (None, Some(preset)) => config.get_overtime_preset(preset).map(Some),
            (None, None) => Ok(None),
        }
    }
}

/// Request body for `POST /overtime/summary`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OvertimeSummaryRequest {
    /// Stored overtime records to recalculate and sum.
    pub entries: Vec<OvertimeEntry>,
}

/// Request body for `POST /projection`.
///
/// Exactly one of `period_months`/`period_years` and exactly one of
/// `monthly_rate`/`annual_rate_percent`/`rate_preset` must be given.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionRequest {
    /// Amount invested at month 0.
    #[serde(deserialize_with = "deserialize_amount")]
    pub initial_amount: Decimal,
    /// Amount added at the start of every month.
    #[serde(deserialize_with = "deserialize_amount")]
    pub monthly_contribution: Decimal,
    /// Projection length in months, at most [`MAX_PROJECTION_MONTHS`].
    #[serde(default)]
    pub period_months: Option<i64>,
    /// Projection length in years, rounded to whole months.
    #[serde(default, deserialize_with = "deserialize_optional_amount")]
    pub period_years: Option<Decimal>,
    /// Monthly rate as a fraction (`0.01` for 1% a month).
    #[serde(default, deserialize_with = "deserialize_optional_amount")]
    pub monthly_rate: Option<Decimal>,
    /// Annual rate in percent, converted to the equivalent monthly rate.
    #[serde(default, deserialize_with = "deserialize_optional_amount")]
    pub annual_rate_percent: Option<Decimal>,
    /// Name of a configured annual rate preset.
    #[serde(default)]
    pub rate_preset: Option<String>,
}

impl ProjectionRequest {
    /// Resolves the projection length in months.
    ///
    /// Negative lengths and lengths above [`MAX_PROJECTION_MONTHS`] are
    /// rejected as [`EngineError::InvalidRequest`].
    pub fn months(&self) -> EngineResult<u32> {
        match (self.period_months, self.period_years) {
            (Some(months), None) => u32::try_from(months)
                .ok()
                .filter(|months| *months <= MAX_PROJECTION_MONTHS)
                .ok_or_else(|| EngineError::InvalidRequest {
                    field: "period_months".to_string(),
                    message: format!(
                        "must be between 0 and {} months, got {}",
                        MAX_PROJECTION_MONTHS, months
                    ),
                }),
            (None, Some(years)) => months_from_years(years),
            (Some(_), Some(_)) => Err(EngineError::InvalidRequest {
                field: "period_months".to_string(),
                message: "give either period_months or period_years".to_string(),
            }),
            (None, None) => Err(EngineError::InvalidRequest {
                field: "period_months".to_string(),
                message: "period_months or period_years is required".to_string(),
            }),
        }
    }

    /// Resolves the monthly rate from a direct rate, an annual rate or a preset.
    pub fn monthly_rate(&self, config: &ConfigLoader) -> EngineResult<Decimal> {
        match (
            self.monthly_rate,
            self.annual_rate_percent,
            self.rate_preset.as_deref(),
        ) {
            (Some(rate), None, None) => Ok(rate),
            (None, Some(annual), None) => convert_annual_rate_to_monthly(annual),
            (None, None, Some(preset)) => {
                convert_annual_rate_to_monthly(config.get_rate_preset(preset)?)
            }
            (None, None, None) => Err(EngineError::InvalidRequest {
                field: "monthly_rate".to_string(),
                message: "one of monthly_rate, annual_rate_percent or rate_preset is required"
                    .to_string(),
            }),
            _ => Err(EngineError::InvalidRequest {
                field: "monthly_rate".to_string(),
                message: "give only one of monthly_rate, annual_rate_percent or rate_preset"
                    .to_string(),
            }),
        }
    }
}

/// Request body for `POST /portfolio/summary`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortfolioRequest {
    /// Positions to aggregate.
    pub positions: Vec<PositionRequest>,
}

/// A position in a portfolio request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PositionRequest {
    /// Ticker or asset name.
    pub ticker: String,
    /// Units held.
    #[serde(deserialize_with = "deserialize_amount")]
    pub quantity: Decimal,
    /// Weighted-average purchase price.
    #[serde(deserialize_with = "deserialize_amount")]
    pub average_price: Decimal,
    /// Latest quoted price.
    #[serde(default, deserialize_with = "deserialize_optional_amount")]
    pub current_price: Option<Decimal>,
    /// Latest daily change in percent.
    #[serde(default, deserialize_with = "deserialize_optional_amount")]
    pub daily_change_percent: Option<Decimal>,
}

impl From<PositionRequest> for Position {
    fn from(req: PositionRequest) -> Self {
        Position {
            ticker: req.ticker,
            quantity: req.quantity,
            average_price: req.average_price,
            current_price: req.current_price,
            daily_change_percent: req.daily_change_percent,
        }
    }
}
