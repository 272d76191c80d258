//! Compound projection models.
//!
//! This module contains the [`Projection`] trajectory returned by the
//! compounding projector and its per-month [`ProjectionRow`] snapshots.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single month of a projection trajectory.
///
/// # Example
///
/// ```
/// use grana_engine::models::ProjectionRow;
/// use rust_decimal::Decimal;
///
/// let row = ProjectionRow {
///     month: 0,
///     balance: Decimal::from(1000),
///     invested: Decimal::from(1000),
/// };
/// assert_eq!(row.interest(), Decimal::ZERO);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectionRow {
    /// Month index, starting at 0 for the initial amount.
    pub month: u32,
    /// Account balance at the end of the month.
    pub balance: Decimal,
    /// Cumulative contributed principal, including the initial amount.
    pub invested: Decimal,
}

impl ProjectionRow {
    /// Growth accrued up to this month (negative for a loss).
    pub fn interest(&self) -> Decimal {
        self.balance - self.invested
    }
}

/// A month-by-month compounding trajectory with its summary totals.
///
/// `rows` always holds `months + 1` snapshots, month 0 included. The summary
/// fields are copied from the final row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Projection {
    /// Ordered snapshots from month 0.
    pub rows: Vec<ProjectionRow>,
    /// Total contributed principal.
    pub invested_total: Decimal,
    /// Final balance.
    pub total: Decimal,
    /// `total - invested_total`; negative when the rate is negative.
    pub interest: Decimal,
}

impl Projection {
    /// Number of months simulated (excluding month 0).
    pub fn months(&self) -> u32 {
        self.rows.last().map(|row| row.month).unwrap_or(0)
    }

    /// Returns true when the projection ends below its contributed principal.
    pub fn is_loss(&self) -> bool {
        self.interest < Decimal::ZERO
    }
}
