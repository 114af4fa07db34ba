//! Point-in-time view of the account used for position sizing.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Account state fetched from the venue once per trade execution.
///
/// Never cached across requests: sizing must see the balance as it is at
/// submission time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSnapshot {
    /// Total account equity in USD.
    pub account_value: Decimal,

    /// Balance available for new orders (equity minus margin in use).
    pub available_balance: Decimal,

    /// Signed size of any existing position in the traded symbol
    /// (positive long, negative short, zero when flat).
    pub existing_position_size: Decimal,

    /// Maximum leverage the venue allows for the traded symbol.
    pub max_leverage: u32,
}

impl PortfolioSnapshot {
    pub fn is_funded(&self) -> bool {
        self.account_value > Decimal::ZERO
    }
}
