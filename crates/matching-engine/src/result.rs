//! Result types for matching operations

use chrono::{DateTime, Utc};
use common::{InstrumentKey, OrderId};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A matched execution between a bid and an ask
///
/// This is the atomic unit of execution: either fully recorded or not
/// recorded at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fill {
    /// Unique trade identifier
    pub trade_id: Uuid,
    /// Instrument traded
    pub instrument: InstrumentKey,
    /// Bid-side order
    pub bid_order_id: OrderId,
    /// Ask-side order
    pub ask_order_id: OrderId,
    /// Execution price (always the maker's price)
    pub price: f64,
    /// Size traded
    pub size: u32,
    /// When the fill occurred
    pub timestamp: DateTime<Utc>,
}

impl Fill {
    /// Create a new fill
    pub fn new(
        instrument: InstrumentKey,
        bid_order_id: OrderId,
        ask_order_id: OrderId,
        price: f64,
        size: u32,
    ) -> Self {
        Self {
            trade_id: Uuid::new_v4(),
            instrument,
            bid_order_id,
            ask_order_id,
            price,
            size,
            timestamp: Utc::now(),
        }
    }

    /// Whether the given order participated in this fill
    pub fn involves(&self, order_id: OrderId) -> bool {
        self.bid_order_id == order_id || self.ask_order_id == order_id
    }
}

/// Outcome of submitting one order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitReport {
    /// Id assigned to the submitted order
    pub order_id: OrderId,
    /// Size filled during the matching pass triggered by this submission
    pub filled_size: u32,
    /// Size-weighted average fill price, if anything filled
    pub avg_fill_price: Option<f64>,
    /// Size left resting in the book under `order_id`
    pub resting_size: u32,
    /// Fills produced by the pass
    pub fills: Vec<Fill>,
}

impl SubmitReport {
    /// Build a report for an order from the fills of its matching pass
    pub fn from_fills(order_id: OrderId, submitted_size: u32, fills: Vec<Fill>) -> Self {
        let own: Vec<&Fill> = fills.iter().filter(|f| f.involves(order_id)).collect();
        let filled_size: u32 = own.iter().map(|f| f.size).sum();
        let avg_fill_price = if filled_size > 0 {
            let notional: f64 = own.iter().map(|f| f.price * f64::from(f.size)).sum();
            Some(notional / f64::from(filled_size))
        } else {
            None
        };

        Self {
            order_id,
            filled_size,
            avg_fill_price,
            resting_size: submitted_size.saturating_sub(filled_size),
            fills,
        }
    }

    /// Check if any size filled
    pub fn has_fills(&self) -> bool {
        self.filled_size > 0
    }

    /// Check if the order filled completely
    pub fn fully_filled(&self) -> bool {
        self.resting_size == 0
    }
}
