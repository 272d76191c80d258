//! Investment portfolio models.
//!
//! This module contains the [`Position`] held in an investment account and the
//! [`PortfolioSummary`] produced by the rentability aggregation.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A holding of a single asset.
///
/// `current_price` and `daily_change_percent` come from the quote-refresh
/// service and may be missing when no quote has been fetched yet.
///
/// # Example
///
/// ```
/// use grana_engine::models::Position;
/// use rust_decimal::Decimal;
///
/// let position = Position::new("ITSA4", Decimal::from(100), Decimal::from(10));
/// assert_eq!(position.invested_value(), Decimal::from(1000));
/// assert_eq!(position.current_value(), Decimal::from(1000));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    /// Ticker or asset name.
    pub ticker: String,
    /// Units held.
    pub quantity: Decimal,
    /// Weighted-average purchase price per unit.
    pub average_price: Decimal,
    /// Latest quoted price per unit.
    #[serde(default)]
    pub current_price: Option<Decimal>,
    /// Latest daily change in percent (`1.5` for +1.5%).
    #[serde(default)]
    pub daily_change_percent: Option<Decimal>,
}

impl Position {
    /// Creates a position without quote data.
    pub fn new(ticker: impl Into<String>, quantity: Decimal, average_price: Decimal) -> Self {
        Self {
            ticker: ticker.into(),
            quantity,
            average_price,
            current_price: None,
            daily_change_percent: None,
        }
    }

    /// Price used for valuation, falling back to the average cost.
    pub fn valuation_price(&self) -> Decimal {
        self.current_price.unwrap_or(self.average_price)
    }

    /// Quantity × average price.
    pub fn invested_value(&self) -> Decimal {
        self.quantity * self.average_price
    }

    /// Quantity × valuation price.
    pub fn current_value(&self) -> Decimal {
        self.quantity * self.valuation_price()
    }
}

/// Aggregated rentability of a set of positions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortfolioSummary {
    /// Number of positions aggregated.
    pub position_count: usize,
    /// Sum of invested values.
    pub invested: Decimal,
    /// Sum of current values.
    pub current_value: Decimal,
    /// `current_value - invested`.
    pub profit: Decimal,
    /// Profit relative to the invested amount, in percent.
    pub rentability_percent: Decimal,
    /// Daily change weighted by current value, in percent.
    pub daily_change_percent: Decimal,
    /// Positions valued at average cost because no quote was available.
    pub positions_without_quote: usize,
}
