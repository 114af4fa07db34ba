//! HTTP client for the perpetuals venue.
//!
//! Handles wallet derivation from a private key, signing of order actions,
//! and normalization of venue responses into [`OrderOutcome`]. Every call
//! carries the client-level request timeout so a stalled venue can never
//! hang an execution.

use std::str::FromStr;
use std::time::Duration;

use alloy_primitives::Address;
use alloy_signer::Signer;
use alloy_signer_local::PrivateKeySigner;
use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use rust_decimal::Decimal;
use tracing::debug;

use crate::models::PortfolioSnapshot;

use super::gateway::{ExchangeGateway, OrderKind, OrderOutcome, OrderTicket};
use super::types::*;

/// Venue API base URLs.
pub const MAINNET_URL: &str = "https://api.hyperliquid.xyz";
pub const TESTNET_URL: &str = "https://api.hyperliquid-testnet.xyz";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Signed HTTP client for order submission and account queries.
pub struct VenueClient {
    http: Client,
    signer: PrivateKeySigner,
    base_url: String,
    /// Delegated account orders are routed through, when set.
    vault_address: Option<String>,
}

impl VenueClient {
    /// Create a client from a hex private key (with or without 0x prefix).
    pub fn new(private_key: &str, use_testnet: bool) -> Result<Self> {
        let pk = private_key.strip_prefix("0x").unwrap_or(private_key);
        let signer = PrivateKeySigner::from_str(pk).context("Invalid private key")?;

        let http = Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .context("Failed to create HTTP client")?;

        let base_url = if use_testnet { TESTNET_URL } else { MAINNET_URL };

        Ok(Self {
            http,
            signer,
            base_url: base_url.to_string(),
            vault_address: None,
        })
    }

    /// Create from environment variables:
    /// - `VENUE_PRIVATE_KEY`
    pub fn from_env(use_testnet: bool) -> Result<Self> {
        let private_key =
            std::env::var("VENUE_PRIVATE_KEY").context("VENUE_PRIVATE_KEY not set")?;
        Self::new(&private_key, use_testnet)
    }

    /// Route orders through a delegated account.
    pub fn with_vault_address(mut self, address: String) -> Self {
        self.vault_address = Some(address);
        self
    }

    /// The signing wallet's address.
    pub fn address(&self) -> Address {
        self.signer.address()
    }

    /// Sign an action payload: keccak256 over the serialized action plus
    /// the nonce, signed by the wallet key.
    async fn sign_action(&self, action: &ExchangeAction, nonce: u64) -> Result<String> {
        let mut message = serde_json::to_vec(action).context("Failed to serialize action")?;
        message.extend_from_slice(&nonce.to_be_bytes());

        let hash = alloy_primitives::keccak256(&message);
        let signature = self
            .signer
            .sign_hash(&hash)
            .await
            .context("Failed to sign action")?;

        Ok(format!("0x{}", hex::encode(signature.as_bytes())))
    }

    /// Submit a signed action to `/exchange`.
    async fn post_action(&self, action: ExchangeAction) -> Result<ExchangeResponse> {
        let nonce = Utc::now().timestamp_millis() as u64;
        let signature = self.sign_action(&action, nonce).await?;

        let envelope = ActionEnvelope {
            action,
            nonce,
            signature,
            vault_address: self.vault_address.clone(),
        };

        let url = format!("{}/exchange", self.base_url);
        let resp = self.http.post(&url).json(&envelope).send().await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            return Err(anyhow!("Exchange request failed: {} - {}", status, text));
        }

        resp.json().await.context("Failed to parse exchange response")
    }

    fn build_order_wire(order: &OrderTicket) -> OrderWire {
        let order_type = match order.kind {
            OrderKind::Limit => OrderTypeWire::Limit { tif: "Gtc" },
            OrderKind::StopTrigger => OrderTypeWire::Trigger {
                trigger_px: order.price.to_string(),
                is_market: true,
                tpsl: "sl",
            },
            OrderKind::TakeProfitTrigger => OrderTypeWire::Trigger {
                trigger_px: order.price.to_string(),
                is_market: true,
                tpsl: "tp",
            },
        };

        OrderWire {
            coin: order.symbol.clone(),
            is_buy: order.is_buy,
            limit_px: order.price.to_string(),
            sz: order.size.to_string(),
            reduce_only: order.reduce_only,
            order_type,
        }
    }

    /// Normalize a single-order exchange response.
    fn normalize_outcome(resp: ExchangeResponse) -> Result<OrderOutcome> {
        if resp.status != "ok" {
            return Ok(OrderOutcome::Rejected {
                reason: format!("venue returned status {}", resp.status),
            });
        }

        let status = resp
            .response
            .and_then(|b| b.data)
            .and_then(|d| d.statuses.into_iter().next())
            .ok_or_else(|| anyhow!("Exchange response carried no order status"))?;

        if let Some(error) = status.error {
            return Ok(OrderOutcome::Rejected { reason: error });
        }
        if let Some(filled) = status.filled {
            return Ok(OrderOutcome::Filled {
                order_id: filled.oid.to_string(),
                avg_price: Decimal::from_str(&filled.avg_px)
                    .context("Invalid fill price in response")?,
                total_size: Decimal::from_str(&filled.total_sz)
                    .context("Invalid fill size in response")?,
            });
        }
        if let Some(resting) = status.resting {
            return Ok(OrderOutcome::Resting {
                order_id: resting.oid.to_string(),
            });
        }

        Err(anyhow!("Exchange response carried an empty order status"))
    }
}

#[async_trait]
impl ExchangeGateway for VenueClient {
    async fn place_order(&self, order: &OrderTicket) -> Result<OrderOutcome> {
        debug!(
            symbol = %order.symbol,
            is_buy = order.is_buy,
            size = %order.size,
            price = %order.price,
            kind = ?order.kind,
            reduce_only = order.reduce_only,
            "Submitting order"
        );

        let action = ExchangeAction::Order {
            orders: vec![Self::build_order_wire(order)],
            grouping: "na",
        };

        let resp = self.post_action(action).await?;
        Self::normalize_outcome(resp)
    }

    async fn cancel_order(&self, symbol: &str, order_id: &str) -> Result<bool> {
        let oid: u64 = order_id.parse().context("Invalid order ID")?;
        let action = ExchangeAction::Cancel {
            cancels: vec![CancelWire {
                coin: symbol.to_string(),
                oid,
            }],
        };

        let resp = self.post_action(action).await?;
        Ok(resp.status == "ok")
    }

    async fn portfolio_snapshot(
        &self,
        symbol: &str,
        address: Option<&str>,
    ) -> Result<PortfolioSnapshot> {
        let user = match address {
            Some(addr) => addr.to_string(),
            None => format!("{:?}", self.address()),
        };

        let url = format!("{}/info", self.base_url);
        let req = InfoRequest {
            kind: "clearinghouseState",
            user,
        };

        let resp = self.http.post(&url).json(&req).send().await?;
        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            return Err(anyhow!("Failed to fetch account state: {} - {}", status, text));
        }

        let state: ClearinghouseState = resp
            .json()
            .await
            .context("Failed to parse clearinghouse state")?;

        let account_value = Decimal::from_str(&state.margin_summary.account_value)
            .context("Invalid account value")?;
        let available_balance =
            Decimal::from_str(&state.withdrawable).unwrap_or(Decimal::ZERO);

        let position = state
            .asset_positions
            .iter()
            .find(|p| p.position.coin.eq_ignore_ascii_case(symbol));

        let existing_position_size = position
            .and_then(|p| Decimal::from_str(&p.position.szi).ok())
            .unwrap_or(Decimal::ZERO);
        let max_leverage = position
            .and_then(|p| p.position.leverage.as_ref())
            .map(|l| l.value)
            .unwrap_or(1);

        Ok(PortfolioSnapshot {
            account_value,
            available_balance,
            existing_position_size,
            max_leverage,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn ticket(kind: OrderKind, reduce_only: bool) -> OrderTicket {
        OrderTicket {
            symbol: "ETH".to_string(),
            is_buy: false,
            size: dec!(0.25),
            price: dec!(3000),
            kind,
            reduce_only,
        }
    }

    #[test]
    fn test_limit_wire_is_gtc() {
        let wire = VenueClient::build_order_wire(&ticket(OrderKind::Limit, false));
        let value = serde_json::to_value(&wire).unwrap();
        assert_eq!(value["orderType"]["limit"]["tif"], "Gtc");
        assert_eq!(value["reduceOnly"], false);
    }

    #[test]
    fn test_stop_wire_is_sl_trigger() {
        let wire = VenueClient::build_order_wire(&ticket(OrderKind::StopTrigger, true));
        let value = serde_json::to_value(&wire).unwrap();
        assert_eq!(value["orderType"]["trigger"]["tpsl"], "sl");
        assert_eq!(value["orderType"]["trigger"]["isMarket"], true);
        assert_eq!(value["reduceOnly"], true);
    }

    #[test]
    fn test_normalize_filled() {
        let resp: ExchangeResponse = serde_json::from_str(
            r#"{"status":"ok","response":{"data":{"statuses":[{"filled":{"oid":99,"avgPx":"2999.5","totalSz":"0.25"}}]}}}"#,
        )
        .unwrap();
        let outcome = VenueClient::normalize_outcome(resp).unwrap();
        assert_eq!(
            outcome,
            OrderOutcome::Filled {
                order_id: "99".to_string(),
                avg_price: dec!(2999.5),
                total_size: dec!(0.25),
            }
        );
    }

    #[test]
    fn test_normalize_rejection() {
        let resp: ExchangeResponse = serde_json::from_str(
            r#"{"status":"ok","response":{"data":{"statuses":[{"error":"Order px out of band"}]}}}"#,
        )
        .unwrap();
        let outcome = VenueClient::normalize_outcome(resp).unwrap();
        assert_eq!(
            outcome,
            OrderOutcome::Rejected {
                reason: "Order px out of band".to_string()
            }
        );
    }
}
