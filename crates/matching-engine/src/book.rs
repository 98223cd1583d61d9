//! Per-instrument order book
//!
//! One [`InstrumentBook`] holds the resting orders for a single
//! (asset, strike, option-type) instrument.
//!
//! Invariants:
//! - I1: bids are ordered by descending price, asks by ascending price;
//!   orders at the same price queue FIFO in submission order
//! - I2: after any matching pass, either one side is empty or the best bid
//!   is strictly below the best ask

use crate::result::Fill;
use chrono::{DateTime, Utc};
use common::{Error, InstrumentKey, OrderId, Result, Side};
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::collections::{BTreeMap, VecDeque};
use tracing::debug;

/// A resting limit order
///
/// `remaining` is mutated only by the matching algorithm and only downward;
/// an order is removed from its book the moment it reaches zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    /// Order ID (monotonic; doubles as the time-priority tie-break)
    pub id: OrderId,
    /// Instrument this order trades
    pub instrument: InstrumentKey,
    /// Buy or sell
    pub side: Side,
    /// Limit price
    pub price: f64,
    /// Remaining size to fill
    pub remaining: u32,
    /// Submission timestamp
    pub timestamp: DateTime<Utc>,
}

impl Order {
    /// Reduce remaining size after a fill
    ///
    /// Underflow means the matching loop computed a fill larger than the
    /// order, which is a matching-logic defect.
    pub fn fill(&mut self, size: u32) -> Result<()> {
        self.remaining = self.remaining.checked_sub(size).ok_or_else(|| {
            Error::inconsistency(format!(
                "fill of {size} exceeds remaining {} on order {}",
                self.remaining, self.id
            ))
        })?;
        Ok(())
    }

    /// Check if the order is completely filled
    pub fn is_filled(&self) -> bool {
        self.remaining == 0
    }
}

/// One price level in a snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceLevel {
    /// Price
    pub price: f64,
    /// Total size resting at this price
    pub size: u32,
    /// Number of orders at this price
    pub order_count: usize,
}

/// Read-only view of a book for the presentation layer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookSnapshot {
    /// Instrument the snapshot is for
    pub instrument: InstrumentKey,
    /// Bid levels, best first
    pub bids: Vec<PriceLevel>,
    /// Ask levels, best first
    pub asks: Vec<PriceLevel>,
    /// Snapshot timestamp
    pub timestamp: DateTime<Utc>,
}

/// Order book for a single instrument
///
/// Both sides are price-keyed BTreeMaps of FIFO queues: the map gives
/// deterministic price ordering, the queue gives time priority within a
/// level.
#[derive(Debug)]
pub struct InstrumentBook {
    instrument: InstrumentKey,
    bids: BTreeMap<Reverse<OrderedFloat<f64>>, VecDeque<Order>>,
    asks: BTreeMap<OrderedFloat<f64>, VecDeque<Order>>,
}

impl InstrumentBook {
    /// Create an empty book
    pub fn new(instrument: InstrumentKey) -> Self {
        Self {
            instrument,
            bids: BTreeMap::new(),
            asks: BTreeMap::new(),
        }
    }

    /// Instrument this book trades
    pub fn instrument(&self) -> &InstrumentKey {
        &self.instrument
    }

    /// Insert an order at its price level, honoring I1
    ///
    /// Price and size must be positive; rejected before the book is touched.
    pub fn insert(&mut self, order: Order) -> Result<()> {
        if !order.price.is_finite() || order.price <= 0.0 {
            return Err(Error::invalid_input(format!(
                "order price must be positive, got {}",
                order.price
            )));
        }
        if order.remaining == 0 {
            return Err(Error::invalid_input("order size must be positive"));
        }

        debug!(
            order_id = %order.id,
            instrument = %self.instrument,
            side = %order.side,
            price = order.price,
            size = order.remaining,
            "Order resting"
        );

        match order.side {
            Side::Buy => {
                self.bids
                    .entry(Reverse(OrderedFloat(order.price)))
                    .or_default()
                    .push_back(order);
            }
            Side::Sell => {
                self.asks
                    .entry(OrderedFloat(order.price))
                    .or_default()
                    .push_back(order);
            }
        }
        Ok(())
    }

    /// Best bid price (highest buy)
    pub fn best_bid(&self) -> Option<f64> {
        self.bids.keys().next().map(|k| k.0 .0)
    }

    /// Best ask price (lowest sell)
    pub fn best_ask(&self) -> Option<f64> {
        self.asks.keys().next().map(|k| k.0)
    }

    /// Check if both sides are empty
    pub fn is_empty(&self) -> bool {
        self.bids.is_empty() && self.asks.is_empty()
    }

    /// Total number of resting orders
    pub fn order_count(&self) -> usize {
        self.bids.values().map(|q| q.len()).sum::<usize>()
            + self.asks.values().map(|q| q.len()).sum::<usize>()
    }

    /// Run the continuous matching loop
    ///
    /// While both sides are non-empty and the best bid meets the best ask,
    /// the front orders of the two best levels trade `min(remaining)` at the
    /// maker's price (the earlier-submitted order sets the price). Fully
    /// filled orders are removed; a partially filled order keeps its place
    /// at the front of its queue. Calling this again with no new orders is a
    /// no-op.
    pub fn run_matching(&mut self) -> Result<Vec<Fill>> {
        let mut fills = Vec::new();

        loop {
            let bid_price = match self.best_bid() {
                Some(p) => p,
                None => break,
            };
            let ask_price = match self.best_ask() {
                Some(p) => p,
                None => break,
            };
            if bid_price < ask_price {
                break;
            }

            let fill = self.fill_best(bid_price, ask_price)?;
            fills.push(fill);
        }

        self.check_not_crossed()?;
        Ok(fills)
    }

    /// Trade the front orders of the two best levels once
    fn fill_best(&mut self, bid_price: f64, ask_price: f64) -> Result<Fill> {
        let bid_queue = self
            .bids
            .get_mut(&Reverse(OrderedFloat(bid_price)))
            .ok_or_else(|| Error::inconsistency("best bid level vanished"))?;
        let mut bid = bid_queue
            .pop_front()
            .ok_or_else(|| Error::inconsistency("empty bid level left in book"))?;

        let ask_queue = self
            .asks
            .get_mut(&OrderedFloat(ask_price))
            .ok_or_else(|| Error::inconsistency("best ask level vanished"))?;
        let mut ask = ask_queue
            .pop_front()
            .ok_or_else(|| Error::inconsistency("empty ask level left in book"))?;

        let size = bid.remaining.min(ask.remaining);
        // The earlier order was resting; it makes the price.
        let price = if bid.id < ask.id { bid.price } else { ask.price };

        bid.fill(size)?;
        ask.fill(size)?;

        let fill = Fill::new(self.instrument.clone(), bid.id, ask.id, price, size);
        debug!(
            trade_id = %fill.trade_id,
            instrument = %self.instrument,
            price,
            size,
            "Trade executed"
        );

        // Partially filled orders keep time priority at the front.
        if !bid.is_filled() {
            self.bids
                .get_mut(&Reverse(OrderedFloat(bid_price)))
                .ok_or_else(|| Error::inconsistency("best bid level vanished"))?
                .push_front(bid);
        }
        if !ask.is_filled() {
            self.asks
                .get_mut(&OrderedFloat(ask_price))
                .ok_or_else(|| Error::inconsistency("best ask level vanished"))?
                .push_front(ask);
        }

        self.bids.retain(|_, queue| !queue.is_empty());
        self.asks.retain(|_, queue| !queue.is_empty());

        Ok(fill)
    }

    /// I2 guard: a crossed book after matching is a defect, not a state to
    /// silently repair
    fn check_not_crossed(&self) -> Result<()> {
        if let (Some(bid), Some(ask)) = (self.best_bid(), self.best_ask()) {
            if bid >= ask {
                return Err(Error::inconsistency(format!(
                    "book {} left crossed: bid {bid} >= ask {ask}",
                    self.instrument
                )));
            }
        }
        Ok(())
    }

    /// Snapshot the top `depth` levels of each side
    pub fn snapshot(&self, depth: usize) -> BookSnapshot {
        let bids = self
            .bids
            .iter()
            .take(depth)
            .map(|(price, orders)| PriceLevel {
                price: price.0 .0,
                size: orders.iter().map(|o| o.remaining).sum(),
                order_count: orders.len(),
            })
            .collect();

        let asks = self
            .asks
            .iter()
            .take(depth)
            .map(|(price, orders)| PriceLevel {
                price: price.0,
                size: orders.iter().map(|o| o.remaining).sum(),
                order_count: orders.len(),
            })
            .collect();

        BookSnapshot {
            instrument: self.instrument.clone(),
            bids,
            asks,
            timestamp: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use common::OptionType;

    fn key() -> InstrumentKey {
        InstrumentKey::new("STETH", 2500.0, OptionType::Call)
    }

    fn order(id: u64, side: Side, price: f64, size: u32) -> Order {
        Order {
            id: OrderId(id),
            instrument: key(),
            side,
            price,
            remaining: size,
            timestamp: Utc::now(),
        }
    }

    fn assert_not_crossed(book: &InstrumentBook) {
        if let (Some(bid), Some(ask)) = (book.best_bid(), book.best_ask()) {
            assert!(bid < ask, "book crossed: bid {bid} >= ask {ask}");
        }
    }

    #[test]
    fn test_insert_rejects_bad_orders() {
        let mut book = InstrumentBook::new(key());
        assert_matches!(
            book.insert(order(1, Side::Buy, 0.0, 5)),
            Err(Error::InvalidInput(_))
        );
        assert_matches!(
            book.insert(order(1, Side::Buy, -10.0, 5)),
            Err(Error::InvalidInput(_))
        );
        assert_matches!(
            book.insert(order(1, Side::Buy, f64::NAN, 5)),
            Err(Error::InvalidInput(_))
        );
        assert_matches!(
            book.insert(order(1, Side::Buy, 10.0, 0)),
            Err(Error::InvalidInput(_))
        );
        assert!(book.is_empty());
    }

    #[test]
    fn test_best_prices() {
        let mut book = InstrumentBook::new(key());
        assert_eq!(book.best_bid(), None);
        assert_eq!(book.best_ask(), None);

        book.insert(order(1, Side::Buy, 9.0, 5)).unwrap();
        book.insert(order(2, Side::Buy, 10.0, 5)).unwrap();
        book.insert(order(3, Side::Sell, 12.0, 5)).unwrap();
        book.insert(order(4, Side::Sell, 11.0, 5)).unwrap();

        assert_eq!(book.best_bid(), Some(10.0));
        assert_eq!(book.best_ask(), Some(11.0));
    }

    #[test]
    fn test_crossing_bid_and_ask_match() {
        // bid(price=10, size=5) then ask(price=8, size=3): the ask is fully
        // removed, the bid rests with 2 remaining.
        let mut book = InstrumentBook::new(key());
        book.insert(order(1, Side::Buy, 10.0, 5)).unwrap();
        book.insert(order(2, Side::Sell, 8.0, 3)).unwrap();

        let fills = book.run_matching().unwrap();
        assert_eq!(fills.len(), 1);
        assert_eq!(fills[0].size, 3);
        assert_eq!(fills[0].price, 10.0); // maker (earlier bid) price
        assert_eq!(fills[0].bid_order_id, OrderId(1));
        assert_eq!(fills[0].ask_order_id, OrderId(2));

        assert_eq!(book.best_ask(), None);
        assert_eq!(book.best_bid(), Some(10.0));
        assert_eq!(book.snapshot(10).bids[0].size, 2);
    }

    #[test]
    fn test_no_match_when_not_crossed() {
        let mut book = InstrumentBook::new(key());
        book.insert(order(1, Side::Buy, 9.0, 5)).unwrap();
        book.insert(order(2, Side::Sell, 11.0, 5)).unwrap();

        let fills = book.run_matching().unwrap();
        assert!(fills.is_empty());
        assert_eq!(book.order_count(), 2);
    }

    #[test]
    fn test_price_time_priority() {
        // Two asks at the same price; the earlier one fills first and the
        // later one rests untouched.
        let mut book = InstrumentBook::new(key());
        book.insert(order(1, Side::Sell, 10.0, 1)).unwrap();
        book.insert(order(2, Side::Sell, 10.0, 4)).unwrap();
        book.insert(order(3, Side::Buy, 10.0, 1)).unwrap();

        let fills = book.run_matching().unwrap();
        assert_eq!(fills.len(), 1);
        assert_eq!(fills[0].ask_order_id, OrderId(1));
        assert_eq!(fills[0].size, 1);

        let snapshot = book.snapshot(10);
        assert_eq!(snapshot.asks[0].size, 4);
        assert_eq!(snapshot.asks[0].order_count, 1);
    }

    #[test]
    fn test_partial_fill_keeps_front_of_queue() {
        let mut book = InstrumentBook::new(key());
        book.insert(order(1, Side::Sell, 10.0, 6)).unwrap();
        book.insert(order(2, Side::Sell, 10.0, 6)).unwrap();
        book.insert(order(3, Side::Buy, 10.0, 4)).unwrap();
        book.run_matching().unwrap();

        // Order 1 partially filled, still ahead of order 2.
        book.insert(order(4, Side::Buy, 10.0, 3)).unwrap();
        let fills = book.run_matching().unwrap();
        assert_eq!(fills.len(), 2);
        assert_eq!(fills[0].ask_order_id, OrderId(1));
        assert_eq!(fills[0].size, 2);
        assert_eq!(fills[1].ask_order_id, OrderId(2));
        assert_eq!(fills[1].size, 1);
    }

    #[test]
    fn test_matching_sweeps_levels() {
        let mut book = InstrumentBook::new(key());
        book.insert(order(1, Side::Sell, 8.0, 2)).unwrap();
        book.insert(order(2, Side::Sell, 9.0, 2)).unwrap();
        book.insert(order(3, Side::Sell, 11.0, 2)).unwrap();
        book.insert(order(4, Side::Buy, 10.0, 10)).unwrap();

        let fills = book.run_matching().unwrap();
        assert_eq!(fills.len(), 2);
        assert_eq!(fills[0].price, 8.0);
        assert_eq!(fills[1].price, 9.0);

        // Bid rests with 6 at 10, ask at 11 untouched.
        assert_eq!(book.best_bid(), Some(10.0));
        assert_eq!(book.best_ask(), Some(11.0));
        assert_not_crossed(&book);
    }

    #[test]
    fn test_conservation_per_pass() {
        let mut book = InstrumentBook::new(key());
        book.insert(order(1, Side::Buy, 10.0, 7)).unwrap();
        book.insert(order(2, Side::Buy, 9.5, 3)).unwrap();
        book.insert(order(3, Side::Sell, 9.0, 8)).unwrap();

        let fills = book.run_matching().unwrap();
        let bid_filled: u32 = fills.iter().map(|f| f.size).sum();
        // Every fill decrements both sides by the same size, so the totals
        // are equal by construction; assert the pass total matches the
        // liquidity that could cross.
        assert_eq!(bid_filled, 8);
        assert_not_crossed(&book);
    }

    #[test]
    fn test_match_idempotent() {
        let mut book = InstrumentBook::new(key());
        book.insert(order(1, Side::Buy, 10.0, 5)).unwrap();
        book.insert(order(2, Side::Sell, 8.0, 3)).unwrap();

        let first = book.run_matching().unwrap();
        assert_eq!(first.len(), 1);

        let before = book.snapshot(10);
        let second = book.run_matching().unwrap();
        assert!(second.is_empty());
        let after = book.snapshot(10);
        assert_eq!(before.bids.len(), after.bids.len());
        assert_eq!(before.asks.len(), after.asks.len());
        assert_eq!(before.bids[0].size, after.bids[0].size);
    }

    #[test]
    fn test_equal_prices_match() {
        // bid == ask must trade (a crossed book includes equality).
        let mut book = InstrumentBook::new(key());
        book.insert(order(1, Side::Buy, 10.0, 5)).unwrap();
        book.insert(order(2, Side::Sell, 10.0, 5)).unwrap();

        let fills = book.run_matching().unwrap();
        assert_eq!(fills.len(), 1);
        assert_eq!(fills[0].size, 5);
        assert!(book.is_empty());
    }

    #[test]
    fn test_snapshot_depth() {
        let mut book = InstrumentBook::new(key());
        for (i, price) in [10.0, 9.5, 9.0, 8.5].iter().enumerate() {
            book.insert(order(i as u64 + 1, Side::Buy, *price, 1)).unwrap();
        }
        let snapshot = book.snapshot(2);
        assert_eq!(snapshot.bids.len(), 2);
        assert_eq!(snapshot.bids[0].price, 10.0);
        assert_eq!(snapshot.bids[1].price, 9.5);
    }
}
