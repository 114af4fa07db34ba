//! Trade request model: the directional intent submitted by the caller.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Direction of a trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Long,
    Short,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Long => "long",
            Direction::Short => "short",
        }
    }

    /// Side of the entry order.
    pub fn is_buy(&self) -> bool {
        matches!(self, Direction::Long)
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A directional trade intent: entry, stop-loss, three take-profit targets,
/// and the percentage of the portfolio to commit.
///
/// Price ordering depends on direction: a long requires
/// `stop_loss < entry_price < take_profit_1 < take_profit_2 < take_profit_3`,
/// a short the reverse chain. The validator enforces this before any
/// network call is made.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeRequest {
    /// Traded symbol, e.g. "BTC". Normalized to uppercase.
    pub symbol: String,

    pub direction: Direction,

    /// Limit price for the entry order.
    pub entry_price: Decimal,

    /// Stop-loss trigger price.
    pub stop_loss: Decimal,

    /// First (nearest) take-profit target.
    pub take_profit_1: Decimal,

    /// Second take-profit target.
    pub take_profit_2: Decimal,

    /// Third (most favorable) take-profit target.
    pub take_profit_3: Decimal,

    /// Percentage of account value to commit (0.1 to 50.0).
    pub portfolio_percentage: Decimal,

    /// Route orders to the venue's testnet.
    #[serde(default)]
    pub use_testnet: bool,

    /// Trade on behalf of a delegated account instead of the signing wallet.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delegated_account_address: Option<String>,
}

impl TradeRequest {
    /// Uppercase and trim the symbol. Called once at the start of the
    /// pipeline so every downstream lookup sees the canonical form.
    pub fn normalized(mut self) -> Self {
        self.symbol = self.symbol.trim().to_uppercase();
        self
    }

    /// Take-profit targets in submission order (nearest first).
    pub fn take_profits(&self) -> [Decimal; 3] {
        [self.take_profit_1, self.take_profit_2, self.take_profit_3]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn request() -> TradeRequest {
        TradeRequest {
            symbol: " btc ".to_string(),
            direction: Direction::Long,
            entry_price: dec!(50000),
            stop_loss: dec!(48000),
            take_profit_1: dec!(52000),
            take_profit_2: dec!(54000),
            take_profit_3: dec!(56000),
            portfolio_percentage: dec!(10),
            use_testnet: false,
            delegated_account_address: None,
        }
    }

    #[test]
    fn test_symbol_normalization() {
        let req = request().normalized();
        assert_eq!(req.symbol, "BTC");
    }

    #[test]
    fn test_direction_serde() {
        let json = serde_json::to_string(&Direction::Short).unwrap();
        assert_eq!(json, "\"short\"");
        let back: Direction = serde_json::from_str("\"long\"").unwrap();
        assert_eq!(back, Direction::Long);
    }

    #[test]
    fn test_request_roundtrip_uses_camel_case() {
        let json = serde_json::to_value(request()).unwrap();
        assert!(json.get("entryPrice").is_some());
        assert!(json.get("portfolioPercentage").is_some());
        assert!(json.get("delegatedAccountAddress").is_none());
    }
}
