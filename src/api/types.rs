//! Wire types for the venue's HTTP API.
//!
//! The venue speaks JSON over two endpoints: `/info` for read-only account
//! queries and `/exchange` for signed order actions. Quantities and prices
//! travel as strings to avoid float truncation on either side.

use serde::{Deserialize, Serialize};

/// Read-only account state query.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InfoRequest {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub user: String,
}

/// Clearinghouse view of one account.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClearinghouseState {
    pub margin_summary: MarginSummary,
    #[serde(default)]
    pub withdrawable: String,
    #[serde(default)]
    pub asset_positions: Vec<AssetPosition>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarginSummary {
    pub account_value: String,
    #[serde(default)]
    pub total_margin_used: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetPosition {
    pub position: PositionData,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionData {
    pub coin: String,
    /// Signed position size; negative when short.
    pub szi: String,
    #[serde(default)]
    pub leverage: Option<LeverageInfo>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeverageInfo {
    #[serde(default)]
    pub value: u32,
}

/// Signed action envelope posted to `/exchange`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionEnvelope {
    pub action: ExchangeAction,
    pub nonce: u64,
    pub signature: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vault_address: Option<String>,
}

/// Order placement or cancellation action.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub enum ExchangeAction {
    #[serde(rename = "order")]
    Order {
        orders: Vec<OrderWire>,
        grouping: &'static str,
    },
    #[serde(rename = "cancel")]
    Cancel { cancels: Vec<CancelWire> },
}

#[derive(Debug, Clone, Serialize)]
pub struct OrderWire {
    /// Symbol.
    pub coin: String,
    #[serde(rename = "isBuy")]
    pub is_buy: bool,
    #[serde(rename = "limitPx")]
    pub limit_px: String,
    pub sz: String,
    #[serde(rename = "reduceOnly")]
    pub reduce_only: bool,
    #[serde(rename = "orderType")]
    pub order_type: OrderTypeWire,
}

/// Limit orders carry a time-in-force; trigger orders carry the trigger
/// price and whether they are a stop ("sl") or take-profit ("tp").
#[derive(Debug, Clone, Serialize)]
pub enum OrderTypeWire {
    #[serde(rename = "limit")]
    Limit { tif: &'static str },
    #[serde(rename = "trigger")]
    Trigger {
        #[serde(rename = "triggerPx")]
        trigger_px: String,
        #[serde(rename = "isMarket")]
        is_market: bool,
        tpsl: &'static str,
    },
}

#[derive(Debug, Clone, Serialize)]
pub struct CancelWire {
    pub coin: String,
    pub oid: u64,
}

/// Top-level `/exchange` response.
#[derive(Debug, Clone, Deserialize)]
pub struct ExchangeResponse {
    pub status: String,
    #[serde(default)]
    pub response: Option<ExchangeResponseBody>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExchangeResponseBody {
    #[serde(default)]
    pub data: Option<OrderResponseData>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OrderResponseData {
    #[serde(default)]
    pub statuses: Vec<OrderStatusWire>,
}

/// Per-order status. Exactly one of the fields is populated.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrderStatusWire {
    #[serde(default)]
    pub resting: Option<RestingWire>,
    #[serde(default)]
    pub filled: Option<FilledWire>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RestingWire {
    pub oid: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilledWire {
    pub oid: u64,
    pub avg_px: String,
    pub total_sz: String,
}
