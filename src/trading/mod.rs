//! Trade execution pipeline: validation, sizing, take-profit planning,
//! and order orchestration.

mod config;
mod executor;
mod planner;
mod sizer;
mod validator;

pub use config::ExecutionConfig;
pub use executor::TradeExecutor;
pub use planner::TakeProfitPlanner;
pub use sizer::{PositionSizer, SizingError};
pub use validator::{validate, ValidationError};
