use serde::{Deserialize, Serialize};

pub mod defaults;
pub mod parser;
pub mod validator;

pub use defaults::*;
pub use parser::*;
pub use validator::*;

/// Top-level venue configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VenueConfig {
    pub venue: VenueInfo,
    pub pricing: PricingConfig,
    pub book: BookConfig,
    #[serde(rename = "supported_assets")]
    pub supported_assets: Vec<Asset>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VenueInfo {
    pub name: String,
    pub description: String,
    pub version: String,
}

/// Defaults applied when a trade request does not carry its own parameters
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct PricingConfig {
    #[serde(default = "default_volatility")]
    pub default_volatility: f64,
    #[serde(default = "default_risk_free_rate")]
    pub default_risk_free_rate: f64,
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct BookConfig {
    #[serde(default = "default_snapshot_depth")]
    pub snapshot_depth: usize,
}

/// A tradeable liquid-staking asset
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Asset {
    pub symbol: String,
    pub name: String,
    /// Spot price the in-memory feed is seeded with
    #[serde(rename = "base_price")]
    pub base_price: f64,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}
