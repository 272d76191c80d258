//! Portfolio rentability aggregation.
//!
//! This module provides the weighted-average cost update applied when more
//! units of an asset are bought, and the aggregation of a set of positions
//! into invested amount, current value, profit and a value-weighted daily
//! change.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::{PortfolioSummary, Position};

/// Applies a purchase (or, with a negative quantity, a sale) to a position.
///
/// The new average price is the weighted average of the held units at their
/// average cost and the new units at `price`:
///
/// ```text
/// (quantity × average_price + bought × price) / (quantity + bought)
/// ```
///
/// When the resulting quantity is zero the average price resets to zero.
///
/// # Example
///
/// ```
/// use grana_engine::calculation::apply_purchase;
/// use grana_engine::models::Position;
/// use rust_decimal::Decimal;
///
/// let position = Position::new("BBAS3", Decimal::from(10), Decimal::from(20));
/// let updated = apply_purchase(&position, Decimal::from(10), Decimal::from(30)).unwrap();
///
/// assert_eq!(updated.quantity, Decimal::from(20));
/// assert_eq!(updated.average_price, Decimal::from(25));
/// ```
pub fn apply_purchase(position: &Position, quantity: Decimal, price: Decimal) -> EngineResult<Position> {
    let new_quantity = position
        .quantity
        .checked_add(quantity)
        .ok_or_else(|| EngineError::overflow("position quantity"))?;

    let average_price = if new_quantity.is_zero() {
        Decimal::ZERO
    } else {
        let held_cost = position
            .quantity
            .checked_mul(position.average_price)
            .ok_or_else(|| EngineError::overflow("held cost"))?;
        let bought_cost = quantity
            .checked_mul(price)
            .ok_or_else(|| EngineError::overflow("purchase cost"))?;
        held_cost
            .checked_add(bought_cost)
            .and_then(|cost| cost.checked_div(new_quantity))
            .ok_or_else(|| EngineError::overflow("average price"))?
    };

    Ok(Position {
        quantity: new_quantity,
        average_price,
        ..position.clone()
    })
}

/// Aggregates positions into a [`PortfolioSummary`].
///
/// Positions without a quote are valued at their average price and counted
/// in `positions_without_quote`. The daily change is weighted by current
/// value over the positions that report one.
///
/// # Example
///
/// ```
/// use grana_engine::calculation::summarize_portfolio;
/// use grana_engine::models::Position;
/// use rust_decimal::Decimal;
///
/// let mut quoted = Position::new("WEGE3", Decimal::from(10), Decimal::from(40));
/// quoted.current_price = Some(Decimal::from(50));
/// quoted.daily_change_percent = Some(Decimal::from(2));
/// let unquoted = Position::new("TESOURO", Decimal::ONE, Decimal::from(500));
///
/// let summary = summarize_portfolio(&[quoted, unquoted]).unwrap();
/// assert_eq!(summary.invested, Decimal::from(900));
/// assert_eq!(summary.current_value, Decimal::from(1000));
/// assert_eq!(summary.profit, Decimal::from(100));
/// assert_eq!(summary.positions_without_quote, 1);
/// ```
pub fn summarize_portfolio(positions: &[Position]) -> EngineResult<PortfolioSummary> {
    let mut invested = Decimal::ZERO;
    let mut current_value = Decimal::ZERO;
    let mut weighted_change = Decimal::ZERO;
    let mut changed_value = Decimal::ZERO;
    let mut positions_without_quote = 0;

    for position in positions {
        let position_invested = position
            .quantity
            .checked_mul(position.average_price)
            .ok_or_else(|| EngineError::overflow("invested value"))?;
        let position_value = position
            .quantity
            .checked_mul(position.valuation_price())
            .ok_or_else(|| EngineError::overflow("current value"))?;

        invested = invested
            .checked_add(position_invested)
            .ok_or_else(|| EngineError::overflow("portfolio invested"))?;
        current_value = current_value
            .checked_add(position_value)
            .ok_or_else(|| EngineError::overflow("portfolio value"))?;

        if position.current_price.is_none() {
            positions_without_quote += 1;
        }

        if let Some(change) = position.daily_change_percent {
            weighted_change = position_value
                .checked_mul(change)
                .and_then(|weighted| weighted_change.checked_add(weighted))
                .ok_or_else(|| EngineError::overflow("weighted daily change"))?;
            changed_value = changed_value
                .checked_add(position_value)
                .ok_or_else(|| EngineError::overflow("weighted daily change"))?;
        }
    }

    let profit = current_value
        .checked_sub(invested)
        .ok_or_else(|| EngineError::overflow("portfolio profit"))?;
    let rentability_percent = if invested.is_zero() {
        Decimal::ZERO
    } else {
        profit
            .checked_div(invested)
            .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
            .ok_or_else(|| EngineError::overflow("rentability"))?
    };
    let daily_change_percent = if changed_value.is_zero() {
        Decimal::ZERO
    } else {
        weighted_change
            .checked_div(changed_value)
            .ok_or_else(|| EngineError::overflow("weighted daily change"))?
    };

    Ok(PortfolioSummary {
        position_count: positions.len(),
        invested,
        current_value,
        profit,
        rentability_percent,
        daily_change_percent,
        positions_without_quote,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn quoted(ticker: &str, quantity: &str, average: &str, current: &str, change: &str) -> Position {
        Position {
            ticker: ticker.to_string(),
            quantity: dec(quantity),
            average_price: dec(average),
            current_price: Some(dec(current)),
            daily_change_percent: Some(dec(change)),
        }
    }

    // ==========================================================================
    // Weighted-average cost
    // ==========================================================================
    #[test]
    fn test_purchase_into_empty_position_takes_purchase_price() {
        let position = Position::new("KNRI11", Decimal::ZERO, Decimal::ZERO);
        let updated = apply_purchase(&position, dec("5"), dec("150.40")).unwrap();

        assert_eq!(updated.quantity, dec("5"));
        assert_eq!(updated.average_price, dec("150.40"));
        assert_eq!(updated.ticker, "KNRI11");
    }

    #[test]
    fn test_purchase_weights_by_quantity() {
        let position = Position::new("VALE3", dec("30"), dec("60"));
        let updated = apply_purchase(&position, dec("10"), dec("80")).unwrap();

        // (30 × 60 + 10 × 80) / 40 = 65
        assert_eq!(updated.average_price, dec("65"));
    }

    #[test]
    fn test_purchase_keeps_quote_fields() {
        let position = quoted("ITUB4", "10", "30", "32", "1.2");
        let updated = apply_purchase(&position, dec("10"), dec("32")).unwrap();

        assert_eq!(updated.current_price, Some(dec("32")));
        assert_eq!(updated.daily_change_percent, Some(dec("1.2")));
    }

    #[test]
    fn test_selling_everything_resets_average() {
        let position = Position::new("MGLU3", dec("100"), dec("2.50"));
        let updated = apply_purchase(&position, dec("-100"), dec("3.00")).unwrap();

        assert_eq!(updated.quantity, Decimal::ZERO);
        assert_eq!(updated.average_price, Decimal::ZERO);
    }

    // ==========================================================================
    // Aggregation
    // ==========================================================================
    #[test]
    fn test_empty_portfolio_is_all_zero() {
        let summary = summarize_portfolio(&[]).unwrap();
        assert_eq!(summary, PortfolioSummary::default());
    }

    #[test]
    fn test_rentability_percent() {
        let positions = vec![quoted("A", "10", "10", "12", "0")];
        let summary = summarize_portfolio(&positions).unwrap();

        assert_eq!(summary.invested, dec("100"));
        assert_eq!(summary.current_value, dec("120"));
        assert_eq!(summary.profit, dec("20"));
        assert_eq!(summary.rentability_percent, dec("20"));
    }

    #[test]
    fn test_daily_change_is_weighted_by_current_value() {
        // Values 300 (+1%) and 100 (-3%): (300 × 1 + 100 × -3) / 400 = 0
        let positions = vec![
            quoted("A", "3", "100", "100", "1"),
            quoted("B", "1", "100", "100", "-3"),
        ];
        let summary = summarize_portfolio(&positions).unwrap();

        assert_eq!(summary.daily_change_percent, Decimal::ZERO);
    }

    #[test]
    fn test_daily_change_ignores_positions_without_change() {
        let mut unquoted = Position::new("CDB", dec("1"), dec("1000"));
        unquoted.daily_change_percent = None;
        let positions = vec![quoted("A", "2", "50", "50", "2.5"), unquoted];

        let summary = summarize_portfolio(&positions).unwrap();
        assert_eq!(summary.daily_change_percent, dec("2.5"));
        assert_eq!(summary.positions_without_quote, 1);
        assert_eq!(summary.position_count, 2);
    }

    #[test]
    fn test_loss_gives_negative_rentability() {
        let positions = vec![quoted("A", "4", "25", "20", "-1")];
        let summary = summarize_portfolio(&positions).unwrap();

        assert_eq!(summary.profit, dec("-20"));
        assert_eq!(summary.rentability_percent, dec("-20"));
    }
}
