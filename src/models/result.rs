//! Execution result: the only artifact the caller sees.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Aggregate outcome of one trade execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionStatus {
    /// Entry and every attempted protective order were accepted.
    Success,
    /// Entry was accepted but at least one protective order failed.
    Partial,
    /// Nothing was placed, or the position is entirely unprotected.
    Error,
}

/// Structured report of a trade execution.
///
/// The executor always returns one of these: validation failures, sizing
/// failures, and venue errors all land here rather than propagating as
/// transport errors. `errors` holds leg-scoped failure messages in the
/// order the legs were attempted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionResult {
    pub status: ExecutionStatus,

    /// Human-readable summary of the outcome.
    pub message: String,

    /// Venue order ID of the entry order, if it was accepted.
    pub main_order_id: Option<String>,

    /// Size the venue accepted for the entry.
    pub executed_size: Option<Decimal>,

    /// Fill price when the entry filled immediately, else the limit price.
    pub executed_price: Option<Decimal>,

    /// Venue order ID of the stop-loss, if it was accepted.
    pub stop_loss_order_id: Option<String>,

    /// Accepted take-profit order IDs, nearest target first. May be
    /// shorter than three when legs were dropped or rejected.
    pub take_profit_order_ids: Vec<String>,

    /// Leg-scoped error messages in attempt order.
    pub errors: Vec<String>,

    pub execution_timestamp: DateTime<Utc>,
}

impl ExecutionResult {
    /// Result for a request that was rejected before any order was placed
    /// (validation failure, sizing failure, snapshot fetch failure).
    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            status: ExecutionStatus::Error,
            message: message.into(),
            main_order_id: None,
            executed_size: None,
            executed_price: None,
            stop_loss_order_id: None,
            take_profit_order_ids: Vec::new(),
            errors: Vec::new(),
            execution_timestamp: Utc::now(),
        }
    }

    /// True when at least one order was placed on the venue.
    pub fn placed_anything(&self) -> bool {
        self.main_order_id.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&ExecutionStatus::Partial).unwrap(),
            "\"partial\""
        );
    }

    #[test]
    fn test_rejected_places_nothing() {
        let result = ExecutionResult::rejected("bad ordering");
        assert_eq!(result.status, ExecutionStatus::Error);
        assert!(!result.placed_anything());
        assert!(result.take_profit_order_ids.is_empty());
        assert!(result.errors.is_empty());
    }
}
