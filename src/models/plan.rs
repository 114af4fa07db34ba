//! Derived order plans: sized entry and take-profit legs.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Lot-quantized entry size produced by the position sizer.
///
/// Exists only for the duration of one execution; never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionPlan {
    /// Order quantity, always a multiple of the symbol's lot size.
    pub quantized_size: Decimal,

    /// `quantized_size * entry_price`, the USD exposure of the entry.
    pub notional_value: Decimal,
}

/// One take-profit leg produced by the planner.
///
/// `size` is `None` when the leg was dropped because its notional fell
/// below the minimum the venue accepts. Dropped legs are never merged
/// into a neighbor; they are simply skipped at submission time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TakeProfitLeg {
    pub price: Decimal,
    pub size: Option<Decimal>,
}

impl TakeProfitLeg {
    pub fn is_dropped(&self) -> bool {
        self.size.is_none()
    }
}
