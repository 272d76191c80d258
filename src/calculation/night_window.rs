//! Night premium window intersection.
//!
//! The night premium applies from 22:00 to 06:00 of the following day, every
//! calendar day. A shift may touch several of these windows (multi-day
//! shifts), so the intersection is computed per day: [`night_overlaps`]
//! yields one [`DayOverlap`] per window anchor day and [`night_minutes`]
//! sums them.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use rust_decimal::Decimal;
use serde::Serialize;

use super::interval::{ShiftInterval, minutes_between};

/// The hour at which the nightly window opens.
pub const NIGHT_WINDOW_START_HOUR: i64 = 22;

/// The hour of the following day at which the nightly window closes.
pub const NIGHT_WINDOW_END_HOUR: i64 = 6;

/// Extra fraction of the hourly rate paid for each night hour (30%).
pub const NIGHT_PREMIUM_RATE: Decimal = Decimal::from_parts(30, 0, 0, false, 2);

/// The part of a shift falling inside one day's night window.
///
/// `window_start` is `day` at 22:00 and `window_end` is the next day at 06:00.
/// `minutes` is zero when the shift does not reach that window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DayOverlap {
    /// The calendar day the window opens on.
    pub day: NaiveDate,
    /// When this day's window opens.
    pub window_start: NaiveDateTime,
    /// When this day's window closes.
    pub window_end: NaiveDateTime,
    /// Minutes of the shift inside the window.
    pub minutes: Decimal,
}

/// Returns the night window opening on `day`, or `None` past the calendar limit.
pub fn night_window(day: NaiveDate) -> Option<(NaiveDateTime, NaiveDateTime)> {
    let midnight = day.and_time(NaiveTime::MIN);
    let start = midnight.checked_add_signed(TimeDelta::hours(NIGHT_WINDOW_START_HOUR))?;
    let end = midnight.checked_add_signed(TimeDelta::hours(24 + NIGHT_WINDOW_END_HOUR))?;
    Some((start, end))
}

/// Lazy per-day night overlaps of a shift.
///
/// Created by [`night_overlaps`]. The iterator is finite and `Clone`, so a
/// caller can restart it or inspect individual days independently.
#[derive(Debug, Clone)]
pub struct NightOverlaps {
    interval: ShiftInterval,
    next_day: Option<NaiveDate>,
}

impl Iterator for NightOverlaps {
    type Item = DayOverlap;

    fn next(&mut self) -> Option<DayOverlap> {
        let day = self.next_day?;

        if day.and_time(NaiveTime::MIN) >= self.interval.end_time() {
            self.next_day = None;
            return None;
        }

        let Some((window_start, window_end)) = night_window(day) else {
            self.next_day = None;
            return None;
        };
        self.next_day = day.succ_opt();

        let overlap_start = window_start.max(self.interval.start_time());
        let overlap_end = window_end.min(self.interval.end_time());
        let minutes = if overlap_end > overlap_start {
            minutes_between(overlap_start, overlap_end)
        } else {
            Decimal::ZERO
        };

        Some(DayOverlap {
            day,
            window_start,
            window_end,
            minutes,
        })
    }
}

impl std::iter::FusedIterator for NightOverlaps {}

/// Splits a shift by calendar day and intersects each day with its night window.
///
/// The walk starts at the day before the shift starts, so the early-morning
/// part of a shift (00:00 to 06:00) is attributed to the window opened the
/// previous evening. A 02:00 to 05:00 shift therefore counts 180 night
/// minutes. Starting at the shift's own date would lose that part and make
/// night minutes depend on where a shift is split: splitting a shift at any
/// instant must give halves whose night minutes add up to the whole. The walk
/// stops at the first day whose midnight is at or after the shift end.
///
/// # Example
///
/// ```
/// use grana_engine::calculation::{night_overlaps, ShiftInterval};
/// use chrono::NaiveDateTime;
/// use rust_decimal::Decimal;
///
/// let start = NaiveDateTime::parse_from_str("2026-03-02 20:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
/// let end = NaiveDateTime::parse_from_str("2026-03-04 07:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
/// let interval = ShiftInterval::normalize(start, end).unwrap();
///
/// let per_day: Vec<Decimal> = night_overlaps(&interval).map(|o| o.minutes).collect();
/// assert_eq!(per_day, vec![Decimal::ZERO, Decimal::from(480), Decimal::from(480), Decimal::ZERO]);
/// ```
pub fn night_overlaps(interval: &ShiftInterval) -> NightOverlaps {
    let start_day = interval.start_time().date();
    NightOverlaps {
        interval: *interval,
        next_day: Some(start_day.pred_opt().unwrap_or(start_day)),
    }
}

/// Total minutes of a shift that fall inside any night window.
///
/// Fractional minutes are kept. A shift with no night overlap returns
/// exactly zero.
///
/// # Example
///
/// ```
/// use grana_engine::calculation::{night_minutes, ShiftInterval};
/// use chrono::NaiveDateTime;
/// use rust_decimal::Decimal;
///
/// let start = NaiveDateTime::parse_from_str("2026-03-02 22:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
/// let end = NaiveDateTime::parse_from_str("2026-03-03 06:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
/// let interval = ShiftInterval::normalize(start, end).unwrap();
///
/// assert_eq!(night_minutes(&interval), Decimal::from(480));
/// ```
pub fn night_minutes(interval: &ShiftInterval) -> Decimal {
    night_overlaps(interval).map(|overlap| overlap.minutes).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn make_datetime(date_str: &str, time_str: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(&format!("{} {}", date_str, time_str), "%Y-%m-%d %H:%M:%S")
            .unwrap()
    }

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn interval(start: (&str, &str), end: (&str, &str)) -> ShiftInterval {
        ShiftInterval::normalize(make_datetime(start.0, start.1), make_datetime(end.0, end.1))
            .unwrap()
    }

    #[test]
    fn test_night_premium_rate_is_thirty_percent() {
        assert_eq!(NIGHT_PREMIUM_RATE, dec("0.30"));
    }

    #[test]
    fn test_night_window_bounds() {
        let (start, end) = night_window(make_date("2026-02-28")).unwrap();
        assert_eq!(start, make_datetime("2026-02-28", "22:00:00"));
        assert_eq!(end, make_datetime("2026-03-01", "06:00:00"));
    }

    #[test]
    fn test_pure_daytime_shift_has_zero_night_minutes() {
        let shift = interval(("2026-03-02", "08:00:00"), ("2026-03-02", "17:00:00"));
        assert_eq!(night_minutes(&shift), Decimal::ZERO);
    }

    #[test]
    fn test_full_night_window() {
        let shift = interval(("2026-03-02", "22:00:00"), ("2026-03-03", "06:00:00"));
        assert_eq!(night_minutes(&shift), dec("480"));
        assert_eq!(shift.duration_minutes(), dec("480"));
    }

    #[test]
    fn test_shift_entirely_inside_one_window() {
        let shift = interval(("2026-03-02", "23:00:00"), ("2026-03-03", "02:30:00"));
        assert_eq!(night_minutes(&shift), dec("210"));
    }

    #[test]
    fn test_early_morning_shift_counts_previous_evening_window() {
        let shift = interval(("2026-03-02", "02:00:00"), ("2026-03-02", "05:00:00"));
        assert_eq!(night_minutes(&shift), dec("180"));
    }

    #[test]
    fn test_partial_overlap_at_both_ends() {
        // 18:00-23:00 gives 60 night minutes; 04:00-10:00 gives 120.
        let evening = interval(("2026-03-02", "18:00:00"), ("2026-03-02", "23:00:00"));
        let morning = interval(("2026-03-03", "04:00:00"), ("2026-03-03", "10:00:00"));

        assert_eq!(night_minutes(&evening), dec("60"));
        assert_eq!(night_minutes(&morning), dec("120"));
    }

    #[test]
    fn test_multi_day_shift_spans_several_windows() {
        // Monday 20:00 to Wednesday 07:00 covers two full windows.
        let shift = interval(("2026-03-02", "20:00:00"), ("2026-03-04", "07:00:00"));
        assert_eq!(night_minutes(&shift), dec("960"));
    }

    #[test]
    fn test_overlaps_yield_one_item_per_anchor_day() {
        let shift = interval(("2026-03-02", "22:00:00"), ("2026-03-03", "06:00:00"));
        let overlaps: Vec<DayOverlap> = night_overlaps(&shift).collect();

        assert_eq!(overlaps.len(), 3);
        assert_eq!(overlaps[0].day, make_date("2026-03-01"));
        assert_eq!(overlaps[0].minutes, Decimal::ZERO);
        assert_eq!(overlaps[1].day, make_date("2026-03-02"));
        assert_eq!(overlaps[1].minutes, dec("480"));
        assert_eq!(overlaps[2].day, make_date("2026-03-03"));
        assert_eq!(overlaps[2].minutes, Decimal::ZERO);
    }

    #[test]
    fn test_overlaps_are_restartable() {
        let shift = interval(("2026-03-02", "21:00:00"), ("2026-03-03", "03:00:00"));
        let iter = night_overlaps(&shift);

        let first: Decimal = iter.clone().map(|o| o.minutes).sum();
        let second: Decimal = iter.map(|o| o.minutes).sum();
        assert_eq!(first, second);
        assert_eq!(first, dec("300"));
    }

    #[test]
    fn test_iterator_is_fused() {
        let shift = interval(("2026-03-02", "10:00:00"), ("2026-03-02", "11:00:00"));
        let mut iter = night_overlaps(&shift);

        while iter.next().is_some() {}
        assert!(iter.next().is_none());
    }

    #[test]
    fn test_fractional_night_minutes_are_not_rounded() {
        let shift = interval(("2026-03-02", "21:59:30"), ("2026-03-02", "22:00:45"));
        assert_eq!(night_minutes(&shift), dec("0.75"));
    }

    #[test]
    fn test_split_at_midnight_is_additive() {
        let whole = interval(("2026-03-02", "22:00:00"), ("2026-03-03", "06:00:00"));
        let before = interval(("2026-03-02", "22:00:00"), ("2026-03-03", "00:00:00"));
        let after = interval(("2026-03-03", "00:00:00"), ("2026-03-03", "06:00:00"));

        assert_eq!(
            night_minutes(&before) + night_minutes(&after),
            night_minutes(&whole)
        );
    }
}
