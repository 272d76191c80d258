//! Calculators for GranaApp.
//!
//! Overtime pay is computed from a [`ShiftInterval`]: total minutes are paid
//! at the overtime percentage and minutes falling inside the nightly
//! 22:00–06:00 window earn an extra [`NIGHT_PREMIUM_RATE`] on top. The
//! compound projector grows a balance month by month, and the portfolio
//! aggregator summarizes a set of positions.

mod duration_format;
mod interval;
mod night_window;
mod overtime_pay;
mod portfolio;
mod projection;

pub use duration_format::format_minutes_as_hours_and_minutes;
pub use interval::ShiftInterval;
pub use night_window::{
    DayOverlap, NIGHT_PREMIUM_RATE, NIGHT_WINDOW_END_HOUR, NIGHT_WINDOW_START_HOUR, NightOverlaps,
    night_minutes, night_overlaps, night_window,
};
pub use overtime_pay::{
    calculate_interval_pay, calculate_overtime_pay, summarize_breakdowns, summarize_overtime,
};
pub use portfolio::{apply_purchase, summarize_portfolio};
pub use projection::{
    MAX_PROJECTION_MONTHS, build_compound_projection, convert_annual_rate_to_monthly,
    months_from_years,
};
