//! Shift interval normalization.
//!
//! A shift end entered as a bare clock time earlier than the start (22:00 to
//! 06:00) means the shift crossed midnight. [`ShiftInterval::normalize`]
//! recovers the intended interval by advancing such an end by exactly one
//! calendar day, never mutating the caller's timestamps.

use chrono::{Days, NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::{EngineError, EngineResult};

/// Milliseconds in one minute.
const MILLISECONDS_PER_MINUTE: i64 = 60_000;

/// A work shift after midnight normalization.
///
/// For any end within one day before the start, the normalized end is
/// strictly after the start.
///
/// # Example
///
/// ```
/// use grana_engine::calculation::ShiftInterval;
/// use chrono::NaiveDateTime;
/// use rust_decimal::Decimal;
///
/// let start = NaiveDateTime::parse_from_str("2026-03-02 22:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
/// let end = NaiveDateTime::parse_from_str("2026-03-02 06:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
///
/// let interval = ShiftInterval::normalize(start, end).unwrap();
/// assert!(interval.end_was_advanced());
/// assert_eq!(interval.end_time().to_string(), "2026-03-03 06:00:00");
/// assert_eq!(interval.duration_minutes(), Decimal::from(480));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ShiftInterval {
    start_time: NaiveDateTime,
    end_time: NaiveDateTime,
    end_advanced: bool,
}

impl ShiftInterval {
    /// Builds an interval, advancing `end` by one calendar day when it is not
    /// strictly after `start`.
    ///
    /// Only a single day is ever added: an end two days before the start moves
    /// forward one day and stays before the start. Already-ordered intervals
    /// pass through unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::CalculationError`] only when the advanced end
    /// would fall outside the representable calendar.
    pub fn normalize(start: NaiveDateTime, end: NaiveDateTime) -> EngineResult<Self> {
        if end > start {
            return Ok(Self {
                start_time: start,
                end_time: end,
                end_advanced: false,
            });
        }

        let advanced = end
            .checked_add_days(Days::new(1))
            .ok_or_else(|| EngineError::CalculationError {
                message: format!("cannot advance shift end {} by one day", end),
            })?;

        Ok(Self {
            start_time: start,
            end_time: advanced,
            end_advanced: true,
        })
    }

    /// Builds an interval from a date and two bare clock times.
    ///
    /// An end clock at or before the start clock is read as the next morning.
    pub fn from_clock_times(
        date: NaiveDate,
        start_clock: NaiveTime,
        end_clock: NaiveTime,
    ) -> EngineResult<Self> {
        Self::normalize(date.and_time(start_clock), date.and_time(end_clock))
    }

    /// The start of the shift.
    pub fn start_time(&self) -> NaiveDateTime {
        self.start_time
    }

    /// The end of the shift after normalization.
    pub fn end_time(&self) -> NaiveDateTime {
        self.end_time
    }

    /// Whether normalization moved the end to the following day.
    pub fn end_was_advanced(&self) -> bool {
        self.end_advanced
    }

    /// The elapsed time of the shift in (possibly fractional) minutes.
    pub fn duration_minutes(&self) -> Decimal {
        minutes_between(self.start_time, self.end_time)
    }
}

/// Minutes from `start` to `end` at millisecond resolution.
pub(crate) fn minutes_between(start: NaiveDateTime, end: NaiveDateTime) -> Decimal {
    let milliseconds = (end - start).num_milliseconds();
    Decimal::from(milliseconds) / Decimal::from(MILLISECONDS_PER_MINUTE)
}
