//! Spot price feed
//!
//! The matching core never owns a timer. Prices enter through
//! [`InMemoryPriceFeed::update_price`] (pushed by whatever simulates or
//! relays the market) and leave through the pull interface [`PriceSource`].

use crate::types::{PriceFeedEntry, PricePoint};
use async_trait::async_trait;
use chrono::Utc;
use common::{Error, Result, Symbol};
use parking_lot::RwLock;
use std::collections::HashMap;
use tracing::debug;

/// Pull interface for spot prices
///
/// Implementations must resolve without blocking the matching path; the
/// session awaits the price before touching any book.
#[async_trait]
pub trait PriceSource: Send + Sync {
    /// Latest spot observation for an asset
    async fn current_price(&self, asset: &Symbol) -> Result<PricePoint>;
}

/// In-memory price feed keyed by asset symbol
///
/// Thread-safe: readers and writers go through a [`RwLock`]. There is no
/// background task mutating the table; callers push updates explicitly.
#[derive(Debug, Default)]
pub struct InMemoryPriceFeed {
    feeds: RwLock<HashMap<Symbol, PriceFeedEntry>>,
}

impl InMemoryPriceFeed {
    /// Create an empty feed
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the feed with a base price for an asset
    pub fn seed(&self, asset: impl Into<Symbol>, price: f64) {
        let entry = PriceFeedEntry {
            price,
            timestamp: Utc::now(),
            change_24h: 0.0,
            volume_24h: 0.0,
        };
        self.feeds.write().insert(asset.into(), entry);
    }

    /// Push a new price for an asset, recomputing the percent change
    ///
    /// Unknown assets are rejected; seed them first.
    pub fn update_price(&self, asset: &Symbol, new_price: f64) -> Result<()> {
        if !new_price.is_finite() || new_price <= 0.0 {
            return Err(Error::invalid_input(format!(
                "price for {asset} must be positive, got {new_price}"
            )));
        }

        let mut feeds = self.feeds.write();
        let entry = feeds
            .get_mut(asset)
            .ok_or_else(|| Error::not_found(format!("no price feed for {asset}")))?;

        let old_price = entry.price;
        entry.change_24h = (new_price - old_price) / old_price * 100.0;
        entry.price = new_price;
        entry.timestamp = Utc::now();

        debug!(%asset, old_price, new_price, "Price updated");
        Ok(())
    }

    /// Full feed entry for an asset
    pub fn entry(&self, asset: &Symbol) -> Option<PriceFeedEntry> {
        self.feeds.read().get(asset).copied()
    }

    /// Assets currently carried by the feed
    pub fn assets(&self) -> Vec<Symbol> {
        self.feeds.read().keys().cloned().collect()
    }
}

#[async_trait]
impl PriceSource for InMemoryPriceFeed {
    async fn current_price(&self, asset: &Symbol) -> Result<PricePoint> {
        let feeds = self.feeds.read();
        let entry = feeds
            .get(asset)
            .ok_or_else(|| Error::not_found(format!("no price feed for {asset}")))?;
        Ok(PricePoint {
            value: entry.price,
            timestamp: entry.timestamp,
        })
    }
}
