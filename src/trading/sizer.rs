//! Position sizing: percentage of equity to a lot-quantized order size.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use thiserror::Error;

use crate::models::{PortfolioSnapshot, PositionPlan};

use super::ExecutionConfig;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SizingError {
    /// Account equity is zero: the min-percentage hint below would divide
    /// by zero, so this is surfaced as its own error first.
    #[error("portfolio is unfunded; deposit funds before trading")]
    UnfundedPortfolio,

    /// Order too small for the venue. Carries the smallest percentage
    /// that would clear the floor so the caller knows exactly how to
    /// retry.
    #[error(
        "order notional ${notional} is below the ${min_notional} minimum; \
         raise portfolio percentage to at least {min_percentage}%"
    )]
    BelowMinNotional {
        notional: Decimal,
        min_notional: Decimal,
        min_percentage: Decimal,
    },
}

/// Converts a requested portfolio percentage plus a fresh account snapshot
/// into a lot-quantized order size.
pub struct PositionSizer {
    config: ExecutionConfig,
}

impl PositionSizer {
    pub fn new(config: ExecutionConfig) -> Self {
        Self { config }
    }

    /// Size the position for one trade.
    ///
    /// Investment is `account_value * percentage / 100`, clamped to a
    /// fraction of the available balance when the account is partly
    /// committed elsewhere, then converted to a quantity at the entry
    /// price and rounded to the symbol's lot size.
    pub fn size(
        &self,
        snapshot: &PortfolioSnapshot,
        symbol: &str,
        entry_price: Decimal,
        percentage: Decimal,
    ) -> Result<PositionPlan, SizingError> {
        if !snapshot.is_funded() {
            return Err(SizingError::UnfundedPortfolio);
        }

        let mut investment = snapshot.account_value * percentage / dec!(100);

        // Leave headroom for fees and slippage when the request would use
        // more than the free balance.
        if snapshot.available_balance > Decimal::ZERO
            && investment > snapshot.available_balance
        {
            investment = snapshot.available_balance * self.config.safety_margin;
        }

        let raw_quantity = investment / entry_price;
        let quantized_size = self.config.quantize(symbol, raw_quantity);
        let notional_value = quantized_size * entry_price;

        if notional_value < self.config.min_order_notional {
            return Err(SizingError::BelowMinNotional {
                notional: notional_value.round_dp(2),
                min_notional: self.config.min_order_notional,
                min_percentage: self.minimum_percentage(snapshot.account_value),
            });
        }

        Ok(PositionPlan {
            quantized_size,
            notional_value,
        })
    }

    /// Smallest percentage of this account that clears the notional floor,
    /// rounded up to two decimals.
    fn minimum_percentage(&self, account_value: Decimal) -> Decimal {
        let exact = self.config.min_order_notional * dec!(100) / account_value;
        ((exact * dec!(100)).ceil() / dec!(100)).normalize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(account_value: Decimal, available: Decimal) -> PortfolioSnapshot {
        PortfolioSnapshot {
            account_value,
            available_balance: available,
            existing_position_size: Decimal::ZERO,
            max_leverage: 20,
        }
    }

    fn sizer() -> PositionSizer {
        PositionSizer::new(ExecutionConfig::default())
    }

    #[test]
    fn test_sizing_btc_ten_percent() {
        // $1000 account, 10% at $50k -> 0.002 BTC, $100 notional.
        let plan = sizer()
            .size(&snapshot(dec!(1000), dec!(1000)), "BTC", dec!(50000), dec!(10))
            .unwrap();
        assert_eq!(plan.quantized_size, dec!(0.002));
        assert_eq!(plan.notional_value, dec!(100));
    }

    #[test]
    fn test_size_is_lot_multiple() {
        let plan = sizer()
            .size(&snapshot(dec!(837), dec!(837)), "SOL", dec!(141.37), dec!(13.3))
            .unwrap();
        let lots = plan.quantized_size / dec!(0.01);
        assert_eq!(lots, lots.trunc());
        assert!(plan.notional_value >= dec!(10));
    }

    #[test]
    fn test_below_minimum_reports_retry_percentage() {
        // $1000 account, 0.1% -> $1 investment -> needs 1% to reach $10.
        let err = sizer()
            .size(&snapshot(dec!(1000), dec!(1000)), "BTC", dec!(50000), dec!(0.1))
            .unwrap_err();
        match err {
            SizingError::BelowMinNotional { min_percentage, .. } => {
                assert_eq!(min_percentage, dec!(1));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_unfunded_account_is_distinct_error() {
        let err = sizer()
            .size(&snapshot(dec!(0), dec!(0)), "BTC", dec!(50000), dec!(10))
            .unwrap_err();
        assert_eq!(err, SizingError::UnfundedPortfolio);
    }

    #[test]
    fn test_investment_clamped_to_available_balance() {
        // 10% of $1000 is $100 but only $50 is free: clamp to $47.50.
        let plan = sizer()
            .size(&snapshot(dec!(1000), dec!(50)), "BTC", dec!(10000), dec!(10))
            .unwrap();
        assert_eq!(plan.quantized_size, dec!(0.00475));
        assert_eq!(plan.notional_value, dec!(47.5));
    }

    #[test]
    fn test_zero_available_balance_skips_clamp() {
        // Venue reporting zero available balance must not zero the order.
        let plan = sizer()
            .size(&snapshot(dec!(1000), dec!(0)), "BTC", dec!(50000), dec!(10))
            .unwrap();
        assert_eq!(plan.quantized_size, dec!(0.002));
    }

    #[test]
    fn test_unknown_symbol_rounds_to_whole_units() {
        let plan = sizer()
            .size(&snapshot(dec!(1000), dec!(1000)), "DOGE", dec!(0.2), dec!(10))
            .unwrap();
        assert_eq!(plan.quantized_size, dec!(500));
        assert_eq!(plan.notional_value, dec!(100));
    }
}
