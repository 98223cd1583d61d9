//! Shared types for market data

use chrono::{DateTime, Utc};
use common::Symbol;
use serde::{Deserialize, Serialize};

/// Inputs for perpetual option pricing
#[derive(Debug, Clone, Copy)]
pub struct QuoteInputs {
    /// Spot price of the underlying
    pub spot: f64,
    /// Strike price
    pub strike: f64,
    /// Volatility (as decimal, e.g., 0.3 = 30%)
    pub volatility: f64,
    /// Risk-free rate (as decimal)
    pub rate: f64,
}

/// Pricing parameters applied when a caller does not supply their own
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PricingParams {
    /// Volatility used for quoting
    pub volatility: f64,
    /// Risk-free rate used for quoting
    pub rate: f64,
}

impl Default for PricingParams {
    fn default() -> Self {
        Self {
            volatility: 0.3,
            rate: 0.05,
        }
    }
}

/// Call and put premium for one (spot, strike) pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OptionQuote {
    /// Call premium
    pub call: f64,
    /// Put premium
    pub put: f64,
}

/// Derived option contract quote
///
/// Produced fresh on each pricing request; never mutated or persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionContract {
    /// Underlying asset
    pub asset: Symbol,
    /// Strike price
    pub strike: f64,
    /// Call premium
    pub call: f64,
    /// Put premium
    pub put: f64,
    /// When the quote was computed
    pub timestamp: DateTime<Utc>,
}

/// An instantaneous spot price observation
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PricePoint {
    /// Observed price
    pub value: f64,
    /// When the price was observed
    pub timestamp: DateTime<Utc>,
}

/// Full feed state for one asset
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PriceFeedEntry {
    /// Latest price
    pub price: f64,
    /// When the price was last updated
    pub timestamp: DateTime<Utc>,
    /// Percent change against the previous observation
    pub change_24h: f64,
    /// Traded volume over the trailing day
    pub volume_24h: f64,
}
