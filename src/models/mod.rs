//! Data models for trade requests, account snapshots, and execution results.

mod plan;
mod request;
mod result;
mod snapshot;

pub use plan::{PositionPlan, TakeProfitLeg};
pub use request::{Direction, TradeRequest};
pub use result::{ExecutionResult, ExecutionStatus};
pub use snapshot::PortfolioSnapshot;
