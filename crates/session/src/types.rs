//! Domain types for trading sessions

use common::{InstrumentKey, OrderId, PositionId, Side};
use matching_engine::Fill;
use serde::{Deserialize, Serialize};

/// A position created from an order fill
///
/// Destroyed when settled or exercised.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Position {
    /// Contract id the caller settles or exercises by
    pub id: PositionId,
    /// Instrument the position is in
    pub instrument: InstrumentKey,
    /// Buy or sell
    pub side: Side,
    /// Average price the position was entered at
    pub entry_price: f64,
    /// Position size (the size that actually filled)
    pub size: u32,
    /// Order the fills came from
    pub order_id: OrderId,
}

/// Outcome status of a settlement or exercise call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SettlementStatus {
    /// Payoff evaluated and position removed
    Success,
    /// Evaluation failed; the position is untouched and may be retried
    Failed,
}

/// Result of one settlement or exercise call
///
/// Produced once per call; immutable, not persisted beyond it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettlementResult {
    /// Realized PnL (settle) or intrinsic value (exercise)
    pub pnl: f64,
    /// Spot the evaluation used
    pub settlement_price: f64,
    /// Success or failed
    pub status: SettlementStatus,
    /// Human-readable outcome
    pub message: String,
}

/// Outcome of a trade request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradeReport {
    /// Id of the submitted order
    pub order_id: OrderId,
    /// Size that filled immediately
    pub filled_size: u32,
    /// Size left resting in the book
    pub resting_size: u32,
    /// Position created from the fill, if any size filled
    pub position: Option<Position>,
    /// Fills from the matching pass
    pub fills: Vec<Fill>,
}
