//! Exchange gateway boundary: normalized order submission and account state.

use anyhow::Result;
use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::models::PortfolioSnapshot;

/// Kind of order being submitted to the venue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderKind {
    /// Good-til-cancelled limit order (the entry).
    Limit,
    /// Trigger order that closes the position at a loss threshold.
    StopTrigger,
    /// Trigger order that closes part of the position at a profit target.
    TakeProfitTrigger,
}

/// One order to submit. Protective orders set `reduce_only` so they can
/// never open or grow a position.
#[derive(Debug, Clone)]
pub struct OrderTicket {
    pub symbol: String,
    pub is_buy: bool,
    pub size: Decimal,
    pub price: Decimal,
    pub kind: OrderKind,
    pub reduce_only: bool,
}

/// Normalized venue response to an order submission.
///
/// `Resting` and `Filled` both mean the venue *accepted* the order.
/// Acceptance is not execution: a resting order may never fill, and
/// nothing downstream tracks fills after submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderOutcome {
    /// Accepted and resting on the book.
    Resting { order_id: String },
    /// Accepted and matched immediately.
    Filled {
        order_id: String,
        avg_price: Decimal,
        total_size: Decimal,
    },
    /// The venue refused the order.
    Rejected { reason: String },
}

impl OrderOutcome {
    pub fn order_id(&self) -> Option<&str> {
        match self {
            OrderOutcome::Resting { order_id } | OrderOutcome::Filled { order_id, .. } => {
                Some(order_id)
            }
            OrderOutcome::Rejected { .. } => None,
        }
    }

    pub fn is_accepted(&self) -> bool {
        !matches!(self, OrderOutcome::Rejected { .. })
    }
}

/// Boundary to the trading venue.
///
/// Implementations must bound every call with an explicit timeout; the
/// executor treats a transport error and a venue rejection the same way,
/// as that leg's failure.
#[async_trait]
pub trait ExchangeGateway: Send + Sync {
    /// Submit one order and normalize the venue's answer.
    async fn place_order(&self, order: &OrderTicket) -> Result<OrderOutcome>;

    /// Cancel a resting order. Returns false when the venue reports the
    /// order as already gone.
    async fn cancel_order(&self, symbol: &str, order_id: &str) -> Result<bool>;

    /// Fetch a fresh account snapshot for the given symbol. `address`
    /// overrides the signing wallet when trading a delegated account.
    async fn portfolio_snapshot(
        &self,
        symbol: &str,
        address: Option<&str>,
    ) -> Result<PortfolioSnapshot>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_order_id_by_outcome() {
        let resting = OrderOutcome::Resting {
            order_id: "17".to_string(),
        };
        let rejected = OrderOutcome::Rejected {
            reason: "px out of band".to_string(),
        };
        assert_eq!(resting.order_id(), Some("17"));
        assert!(resting.is_accepted());
        assert_eq!(rejected.order_id(), None);
        assert!(!rejected.is_accepted());
    }

    #[test]
    fn test_filled_is_accepted() {
        let filled = OrderOutcome::Filled {
            order_id: "42".to_string(),
            avg_price: dec!(50000),
            total_size: dec!(0.002),
        };
        assert!(filled.is_accepted());
    }
}
