//! Execution configuration: caps, thresholds, and the lot-size table.

use std::collections::HashMap;

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Configuration for the execution pipeline.
///
/// The defaults are part of the observable contract: changing them changes
/// which requests are accepted and how take-profits are split. The struct
/// is injected into every pipeline stage so tests can run with alternate
/// parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionConfig {
    /// Smallest order notional the venue accepts, in USD.
    pub min_order_notional: Decimal,

    /// Lowest portfolio percentage a request may ask for.
    pub min_position_percentage: Decimal,

    /// Hard ceiling on the portfolio percentage a request may ask for.
    pub max_position_percentage: Decimal,

    /// Below this entry notional the position takes a single exit at the
    /// furthest target instead of a three-way split.
    pub small_position_threshold: Decimal,

    /// Fractions of the position closed at TP1/TP2/TP3.
    pub tp_split: [Decimal; 3],

    /// Fraction of available balance usable when clamping an oversized
    /// investment, leaving headroom for fees and slippage.
    pub safety_margin: Decimal,

    /// Smallest quantity increment per symbol.
    pub lot_sizes: HashMap<String, Decimal>,

    /// Lot size for symbols missing from the table. Coarse on purpose:
    /// over-quantizing an unknown symbol fails loudly at the notional
    /// check instead of getting rejected by the venue.
    pub default_lot_size: Decimal,

    /// Upper bound on any single order-placement call. A timed-out entry
    /// halts the execution; a timed-out protective leg only fails that leg.
    pub order_timeout_secs: u64,
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        let lot_sizes = HashMap::from([
            ("BTC".to_string(), dec!(0.00001)),
            ("ETH".to_string(), dec!(0.0001)),
            ("SOL".to_string(), dec!(0.01)),
            ("AVAX".to_string(), dec!(0.1)),
            ("MATIC".to_string(), dec!(1)),
        ]);

        Self {
            min_order_notional: dec!(10.0),
            min_position_percentage: dec!(0.1),
            max_position_percentage: dec!(50.0),
            small_position_threshold: dec!(30.0),
            tp_split: [dec!(0.40), dec!(0.35), dec!(0.25)],
            safety_margin: dec!(0.95),
            lot_sizes,
            default_lot_size: dec!(1),
            order_timeout_secs: 30,
        }
    }
}

impl ExecutionConfig {
    /// Lot size for a symbol, falling back to the conservative default.
    pub fn lot_size(&self, symbol: &str) -> Decimal {
        self.lot_sizes
            .get(symbol)
            .copied()
            .unwrap_or(self.default_lot_size)
    }

    /// Round a raw quantity to the nearest multiple of the symbol's lot
    /// size, midpoints away from zero.
    pub fn quantize(&self, symbol: &str, quantity: Decimal) -> Decimal {
        let lot = self.lot_size(symbol);
        if lot.is_zero() {
            return quantity;
        }
        let lots = (quantity / lot)
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
        (lots * lot).normalize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lot_size_lookup() {
        let config = ExecutionConfig::default();
        assert_eq!(config.lot_size("BTC"), dec!(0.00001));
        assert_eq!(config.lot_size("SOL"), dec!(0.01));
        assert_eq!(config.lot_size("DOGE"), dec!(1));
    }

    #[test]
    fn test_quantize_rounds_to_lot_multiple() {
        let config = ExecutionConfig::default();
        assert_eq!(config.quantize("BTC", dec!(0.002)), dec!(0.002));
        assert_eq!(config.quantize("BTC", dec!(0.002004)), dec!(0.002));
        assert_eq!(config.quantize("BTC", dec!(0.0000288)), dec!(0.00003));
        assert_eq!(config.quantize("SOL", dec!(1.456)), dec!(1.46));
    }

    #[test]
    fn test_quantize_unknown_symbol_uses_whole_units() {
        let config = ExecutionConfig::default();
        assert_eq!(config.quantize("DOGE", dec!(12.7)), dec!(13));
        assert_eq!(config.quantize("DOGE", dec!(0.3)), dec!(0));
    }

    #[test]
    fn test_tp_split_sums_to_one() {
        let config = ExecutionConfig::default();
        let total: Decimal = config.tp_split.iter().sum();
        assert_eq!(total, dec!(1));
    }
}
