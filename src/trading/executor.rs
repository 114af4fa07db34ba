//! Order orchestration: entry first, protective legs after.
//!
//! Forward-only pipeline: Validating -> SizingPosition -> PlacingEntry ->
//! PlacingRiskLegs -> Completed. There is no retry, no rollback, and no
//! mid-pipeline cancellation; every run terminates in an
//! [`ExecutionResult`]. Nothing here serializes overlapping executions for
//! the same account and symbol; callers that need that must provide it.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use futures::future;
use tokio::time::timeout;
use tracing::{error, info, warn};

use crate::api::{ExchangeGateway, OrderKind, OrderOutcome, OrderTicket};
use crate::models::{ExecutionResult, ExecutionStatus, TradeRequest};

use super::{validate, ExecutionConfig, PositionSizer, TakeProfitPlanner};

/// Sequences a trade request into an entry order plus protective legs.
pub struct TradeExecutor {
    gateway: Arc<dyn ExchangeGateway>,
    config: ExecutionConfig,
    sizer: PositionSizer,
    planner: TakeProfitPlanner,
}

impl TradeExecutor {
    pub fn new(gateway: Arc<dyn ExchangeGateway>, config: ExecutionConfig) -> Self {
        let sizer = PositionSizer::new(config.clone());
        let planner = TakeProfitPlanner::new(config.clone());
        Self {
            gateway,
            config,
            sizer,
            planner,
        }
    }

    /// Run one trade request to completion.
    ///
    /// Always returns a structured result; validation failures, sizing
    /// failures, and venue errors are reported through it rather than
    /// bubbling up as transport errors. The entry order must be accepted
    /// before any protective leg is attempted: this pipeline never
    /// places a stop or take-profit without a working entry.
    pub async fn execute(&self, request: TradeRequest) -> ExecutionResult {
        let request = request.normalized();
        info!(
            symbol = %request.symbol,
            direction = %request.direction,
            entry = %request.entry_price,
            percentage = %request.portfolio_percentage,
            "Executing trade request"
        );

        // Validating: pure checks, rejects before any I/O.
        if let Err(e) = validate(&request, &self.config) {
            warn!(symbol = %request.symbol, error = %e, "Request rejected by validation");
            return ExecutionResult::rejected(e.to_string());
        }

        // SizingPosition: fresh snapshot, then quantized size.
        let address = request.delegated_account_address.as_deref();
        let snapshot = match self
            .gateway
            .portfolio_snapshot(&request.symbol, address)
            .await
        {
            Ok(s) => s,
            Err(e) => {
                error!(symbol = %request.symbol, error = %e, "Snapshot fetch failed");
                return ExecutionResult::rejected(format!(
                    "trade cannot proceed: failed to fetch portfolio snapshot: {e}"
                ));
            }
        };

        let plan = match self.sizer.size(
            &snapshot,
            &request.symbol,
            request.entry_price,
            request.portfolio_percentage,
        ) {
            Ok(p) => p,
            Err(e) => {
                warn!(symbol = %request.symbol, error = %e, "Request rejected by sizing");
                return ExecutionResult::rejected(e.to_string());
            }
        };
        info!(
            symbol = %request.symbol,
            size = %plan.quantized_size,
            notional = %plan.notional_value,
            "Position sized"
        );

        // PlacingEntry: limit GTC. Failure halts with nothing protected
        // because nothing was opened.
        let entry_ticket = OrderTicket {
            symbol: request.symbol.clone(),
            is_buy: request.direction.is_buy(),
            size: plan.quantized_size,
            price: request.entry_price,
            kind: OrderKind::Limit,
            reduce_only: false,
        };

        let (main_order_id, executed_size, executed_price) =
            match self.place_with_timeout(&entry_ticket).await {
                Ok(OrderOutcome::Filled {
                    order_id,
                    avg_price,
                    total_size,
                }) => (order_id, total_size, avg_price),
                Ok(OrderOutcome::Resting { order_id }) => {
                    (order_id, plan.quantized_size, request.entry_price)
                }
                Ok(OrderOutcome::Rejected { reason }) => {
                    error!(symbol = %request.symbol, %reason, "Entry order rejected");
                    return Self::entry_failed(format!("entry order rejected: {reason}"));
                }
                Err(e) => {
                    error!(symbol = %request.symbol, error = %e, "Entry order failed");
                    return Self::entry_failed(format!("entry order failed: {e}"));
                }
            };
        info!(
            symbol = %request.symbol,
            order_id = %main_order_id,
            size = %executed_size,
            "Entry order accepted"
        );

        // PlacingRiskLegs: stop first in the ticket list, then take-profits
        // nearest target first. Legs are independent reduce-only orders
        // against the accepted entry, so they are submitted concurrently;
        // aggregation below does not depend on completion order.
        let exit_side = !request.direction.is_buy();
        let mut tickets = vec![(
            "stop loss".to_string(),
            OrderTicket {
                symbol: request.symbol.clone(),
                is_buy: exit_side,
                size: executed_size,
                price: request.stop_loss,
                kind: OrderKind::StopTrigger,
                reduce_only: true,
            },
        )];

        for (i, leg) in self.planner.plan(&request, executed_size).iter().enumerate() {
            match leg.size {
                Some(size) => tickets.push((
                    format!("take profit {}", i + 1),
                    OrderTicket {
                        symbol: request.symbol.clone(),
                        is_buy: exit_side,
                        size,
                        price: leg.price,
                        kind: OrderKind::TakeProfitTrigger,
                        reduce_only: true,
                    },
                )),
                None => info!(
                    symbol = %request.symbol,
                    price = %leg.price,
                    "Skipping dropped take-profit leg"
                ),
            }
        }

        let outcomes =
            future::join_all(tickets.iter().map(|(_, t)| self.place_with_timeout(t))).await;

        let mut stop_loss_order_id = None;
        let mut take_profit_order_ids = Vec::new();
        let mut errors = Vec::new();

        for ((label, ticket), outcome) in tickets.iter().zip(outcomes) {
            match outcome {
                Ok(OrderOutcome::Resting { order_id })
                | Ok(OrderOutcome::Filled { order_id, .. }) => {
                    if ticket.kind == OrderKind::StopTrigger {
                        stop_loss_order_id = Some(order_id);
                    } else {
                        take_profit_order_ids.push(order_id);
                    }
                }
                Ok(OrderOutcome::Rejected { reason }) => {
                    error!(symbol = %request.symbol, leg = %label, %reason, "Protective order rejected");
                    errors.push(format!("{label} rejected: {reason}"));
                }
                Err(e) => {
                    error!(symbol = %request.symbol, leg = %label, error = %e, "Protective order failed");
                    errors.push(format!("{label} failed: {e}"));
                }
            }
        }

        // Completed: success only when every attempted leg was accepted;
        // an entry with zero accepted protective orders is an unprotected
        // position and reported as an error.
        let accepted_risk_orders =
            usize::from(stop_loss_order_id.is_some()) + take_profit_order_ids.len();
        let (status, message) = if errors.is_empty() {
            (
                ExecutionStatus::Success,
                format!(
                    "trade executed: entry and {accepted_risk_orders} protective orders accepted"
                ),
            )
        } else if accepted_risk_orders == 0 {
            (
                ExecutionStatus::Error,
                "entry accepted but no protective orders could be placed; position is unprotected"
                    .to_string(),
            )
        } else {
            (
                ExecutionStatus::Partial,
                "entry accepted but some protective orders failed; position is incompletely protected"
                    .to_string(),
            )
        };

        ExecutionResult {
            status,
            message,
            main_order_id: Some(main_order_id),
            executed_size: Some(executed_size),
            executed_price: Some(executed_price),
            stop_loss_order_id,
            take_profit_order_ids,
            errors,
            execution_timestamp: Utc::now(),
        }
    }

    /// Place one order under the configured per-call bound.
    async fn place_with_timeout(&self, ticket: &OrderTicket) -> anyhow::Result<OrderOutcome> {
        let bound = Duration::from_secs(self.config.order_timeout_secs);
        match timeout(bound, self.gateway.place_order(ticket)).await {
            Ok(result) => result,
            Err(_) => Err(anyhow::anyhow!(
                "order placement timed out after {}s",
                self.config.order_timeout_secs
            )),
        }
    }

    fn entry_failed(error: String) -> ExecutionResult {
        ExecutionResult {
            status: ExecutionStatus::Error,
            message: "entry order failed; no protective orders were placed".to_string(),
            main_order_id: None,
            executed_size: None,
            executed_price: None,
            stop_loss_order_id: None,
            take_profit_order_ids: Vec::new(),
            errors: vec![error],
            execution_timestamp: Utc::now(),
        }
    }
}
