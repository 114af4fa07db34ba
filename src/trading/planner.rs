//! Adaptive take-profit planning: full-size single exit or 40/35/25 split.

use rust_decimal::Decimal;
use tracing::debug;

use crate::models::{TakeProfitLeg, TradeRequest};

use super::ExecutionConfig;

/// Decides how the position exits: one leg at the furthest target for
/// small positions, otherwise a three-way split with sub-minimum legs
/// dropped. Deterministic and side-effect free; never talks to the venue.
pub struct TakeProfitPlanner {
    config: ExecutionConfig,
}

impl TakeProfitPlanner {
    pub fn new(config: ExecutionConfig) -> Self {
        Self { config }
    }

    /// Plan the take-profit legs for an accepted position size.
    ///
    /// Splitting a small position three ways would leave every leg under
    /// the venue minimum, so positions below the small-position threshold
    /// exit in full at the most favorable target. In a split, a leg whose
    /// own notional falls under the minimum is dropped (`size = None`),
    /// never folded into a neighbor.
    pub fn plan(&self, request: &TradeRequest, position_size: Decimal) -> Vec<TakeProfitLeg> {
        let entry_notional = position_size * request.entry_price;

        if entry_notional < self.config.small_position_threshold {
            debug!(
                symbol = %request.symbol,
                notional = %entry_notional,
                "Small position, single exit at the furthest target"
            );
            return vec![TakeProfitLeg {
                price: request.take_profit_3,
                size: Some(position_size),
            }];
        }

        request
            .take_profits()
            .iter()
            .zip(self.config.tp_split.iter())
            .map(|(&price, &fraction)| {
                let size = self.config.quantize(&request.symbol, position_size * fraction);
                let notional = size * price;
                if notional < self.config.min_order_notional {
                    debug!(
                        symbol = %request.symbol,
                        price = %price,
                        notional = %notional,
                        "Dropping sub-minimum take-profit leg"
                    );
                    TakeProfitLeg { price, size: None }
                } else {
                    TakeProfitLeg {
                        price,
                        size: Some(size),
                    }
                }
            })
            .collect()
    }
}
