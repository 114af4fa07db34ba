//! Pre-flight validation of trade requests.
//!
//! Pure checks, no I/O: a request that fails here never reaches the venue.
//! Checks run in a fixed order and the first violation wins; errors are
//! not aggregated.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::{Direction, TradeRequest};

use super::ExecutionConfig;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("portfolio percentage {got}% exceeds the maximum of {max}%")]
    PercentageTooHigh { got: Decimal, max: Decimal },

    #[error("portfolio percentage {got}% is below the minimum of {min}%")]
    PercentageTooLow { got: Decimal, min: Decimal },

    #[error("all prices must be greater than zero")]
    NonPositivePrice,

    #[error("long trade requires stop loss < entry < take profit 1 < take profit 2 < take profit 3")]
    InvalidLongOrdering,

    #[error("short trade requires stop loss > entry > take profit 1 > take profit 2 > take profit 3")]
    InvalidShortOrdering,

    #[error("symbol must be at least 2 characters")]
    InvalidSymbol,
}

/// Validate a trade request before any network call.
pub fn validate(req: &TradeRequest, config: &ExecutionConfig) -> Result<(), ValidationError> {
    if req.portfolio_percentage > config.max_position_percentage {
        return Err(ValidationError::PercentageTooHigh {
            got: req.portfolio_percentage,
            max: config.max_position_percentage,
        });
    }
    if req.portfolio_percentage < config.min_position_percentage {
        return Err(ValidationError::PercentageTooLow {
            got: req.portfolio_percentage,
            min: config.min_position_percentage,
        });
    }

    let prices = [
        req.stop_loss,
        req.entry_price,
        req.take_profit_1,
        req.take_profit_2,
        req.take_profit_3,
    ];
    if prices.iter().any(|p| *p <= Decimal::ZERO) {
        return Err(ValidationError::NonPositivePrice);
    }

    // Strictly monotonic chain in the direction of profit.
    let ordered = match req.direction {
        Direction::Long => prices.windows(2).all(|w| w[0] < w[1]),
        Direction::Short => prices.windows(2).all(|w| w[0] > w[1]),
    };
    if !ordered {
        return Err(match req.direction {
            Direction::Long => ValidationError::InvalidLongOrdering,
            Direction::Short => ValidationError::InvalidShortOrdering,
        });
    }

    if req.symbol.trim().len() < 2 {
        return Err(ValidationError::InvalidSymbol);
    }

    Ok(())
}
