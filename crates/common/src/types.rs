//! Common types used across PerpX
//!
//! This module provides the fundamental domain types used throughout
//! the venue.

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

/// Unique identifier for orders
///
/// Order ids are monotonic `u64` values handed out by the book registry so
/// that fills and test assertions are deterministic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OrderId(pub u64);

impl OrderId {
    /// Get the underlying value
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for positions held by a trading session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PositionId(pub u64);

impl std::fmt::Display for PositionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Order side (buy or sell)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Buy order
    Buy,
    /// Sell order
    Sell,
}

impl Side {
    /// Returns the opposite side
    pub fn opposite(&self) -> Self {
        match self {
            Side::Buy => Side::Sell,
            Side::Sell => Side::Buy,
        }
    }

    /// Returns true if this is a buy order
    pub fn is_buy(&self) -> bool {
        matches!(self, Side::Buy)
    }

    /// Returns true if this is a sell order
    pub fn is_sell(&self) -> bool {
        matches!(self, Side::Sell)
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Buy => write!(f, "buy"),
            Side::Sell => write!(f, "sell"),
        }
    }
}

/// Type of option: Call or Put
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionType {
    /// Call option - right to buy at strike price
    Call,
    /// Put option - right to sell at strike price
    Put,
}

impl OptionType {
    /// Single-letter code used in instrument identifiers ("C" / "P")
    pub fn code(&self) -> &'static str {
        match self {
            OptionType::Call => "C",
            OptionType::Put => "P",
        }
    }
}

impl std::fmt::Display for OptionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OptionType::Call => write!(f, "call"),
            OptionType::Put => write!(f, "put"),
        }
    }
}

/// Asset symbol (e.g., "STETH", "RETH")
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Symbol(pub String);

impl Symbol {
    /// Create a new Symbol
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into().to_uppercase())
    }

    /// Get the symbol as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Symbol {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Symbol {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

/// Identity of one tradeable instrument: (asset, strike, option type)
///
/// Identifies exactly one order book. Immutable once constructed. The strike
/// is stored as an [`OrderedFloat`] so the key is hashable and totally
/// ordered.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InstrumentKey {
    /// Underlying asset symbol
    pub asset: Symbol,
    /// Strike price
    pub strike: OrderedFloat<f64>,
    /// Call or put
    pub option_type: OptionType,
}

impl InstrumentKey {
    /// Create a new instrument key
    pub fn new(asset: impl Into<Symbol>, strike: f64, option_type: OptionType) -> Self {
        Self {
            asset: asset.into(),
            strike: OrderedFloat(strike),
            option_type,
        }
    }

    /// Strike price as a plain float
    pub fn strike_price(&self) -> f64 {
        self.strike.0
    }
}

impl std::fmt::Display for InstrumentKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}-{}-{}",
            self.asset,
            self.strike.0,
            self.option_type.code()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side() {
        assert_eq!(Side::Buy.opposite(), Side::Sell);
        assert_eq!(Side::Sell.opposite(), Side::Buy);
        assert!(Side::Buy.is_buy());
        assert!(Side::Sell.is_sell());
    }

    #[test]
    fn test_symbol_uppercased() {
        let sym = Symbol::new("steth");
        assert_eq!(sym.as_str(), "STETH");
    }

    #[test]
    fn test_instrument_key_display() {
        let key = InstrumentKey::new("stETH", 2500.0, OptionType::Call);
        assert_eq!(key.to_string(), "STETH-2500-C");

        let key = InstrumentKey::new("rETH", 2550.0, OptionType::Put);
        assert_eq!(key.to_string(), "RETH-2550-P");
    }

    #[test]
    fn test_instrument_key_identity() {
        let a = InstrumentKey::new("STETH", 2500.0, OptionType::Call);
        let b = InstrumentKey::new("steth", 2500.0, OptionType::Call);
        let c = InstrumentKey::new("STETH", 2500.0, OptionType::Put);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
