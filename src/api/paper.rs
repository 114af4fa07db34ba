//! Paper gateway for dry runs: accepts everything, touches nothing.

use anyhow::Result;
use async_trait::async_trait;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::info;

use crate::models::PortfolioSnapshot;

use super::gateway::{ExchangeGateway, OrderOutcome, OrderTicket};

/// In-memory gateway that accepts every order with a synthetic order ID.
/// Used by `--dry-run` so the full pipeline can be exercised without
/// credentials or network access.
pub struct PaperGateway {
    account_value: Decimal,
}

impl PaperGateway {
    pub fn new(account_value: Decimal) -> Self {
        Self { account_value }
    }
}

impl Default for PaperGateway {
    fn default() -> Self {
        Self::new(dec!(10000))
    }
}

#[async_trait]
impl ExchangeGateway for PaperGateway {
    async fn place_order(&self, order: &OrderTicket) -> Result<OrderOutcome> {
        info!(
            symbol = %order.symbol,
            is_buy = order.is_buy,
            size = %order.size,
            price = %order.price,
            kind = ?order.kind,
            "Paper order accepted"
        );
        Ok(OrderOutcome::Resting {
            order_id: uuid::Uuid::new_v4().to_string(),
        })
    }

    async fn cancel_order(&self, _symbol: &str, _order_id: &str) -> Result<bool> {
        Ok(true)
    }

    async fn portfolio_snapshot(
        &self,
        _symbol: &str,
        _address: Option<&str>,
    ) -> Result<PortfolioSnapshot> {
        Ok(PortfolioSnapshot {
            account_value: self.account_value,
            available_balance: self.account_value,
            existing_position_size: Decimal::ZERO,
            max_leverage: 20,
        })
    }
}
