//! Book registry
//!
//! The registry exclusively owns every [`InstrumentBook`] and every order
//! inside them. All mutation goes through [`BookRegistry::submit`], which
//! runs insert-plus-match as one atomic step under the target book's lock.
//! Books for different instruments sit behind different locks and never
//! contend; the outer map lock is held only long enough to clone the book
//! handle.

use crate::book::{BookSnapshot, InstrumentBook, Order};
use crate::metrics::{EngineMetrics, MetricsSnapshot};
use crate::result::SubmitReport;
use chrono::Utc;
use common::{Error, InstrumentKey, OrderId, Result, Side};
use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::info;

/// Owns the instrument-keyed collection of order books
///
/// Books are created lazily on first reference; creation happens under the
/// map's write lock, so two first-time submissions for the same key cannot
/// race a duplicate book into existence. Order ids are monotonic per
/// registry, which makes fill attribution deterministic.
pub struct BookRegistry {
    books: RwLock<HashMap<InstrumentKey, Arc<Mutex<InstrumentBook>>>>,
    next_order_id: AtomicU64,
    metrics: EngineMetrics,
}

impl BookRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            books: RwLock::new(HashMap::new()),
            next_order_id: AtomicU64::new(1),
            metrics: EngineMetrics::new(),
        }
    }

    fn next_order_id(&self) -> OrderId {
        OrderId(self.next_order_id.fetch_add(1, Ordering::Relaxed))
    }

    fn book(&self, key: &InstrumentKey) -> Arc<Mutex<InstrumentBook>> {
        if let Some(book) = self.books.read().get(key) {
            return Arc::clone(book);
        }
        let mut books = self.books.write();
        Arc::clone(
            books
                .entry(key.clone())
                .or_insert_with(|| Arc::new(Mutex::new(InstrumentBook::new(key.clone())))),
        )
    }

    /// Submit a limit order and run matching on its book
    ///
    /// Validation happens before any state mutation: a rejected order leaves
    /// no trace. The insert and the matching pass execute atomically with
    /// respect to other submissions to the same instrument.
    pub fn submit(
        &self,
        key: &InstrumentKey,
        side: Side,
        price: f64,
        size: u32,
    ) -> Result<SubmitReport> {
        if !price.is_finite() || price <= 0.0 {
            return Err(Error::invalid_input(format!(
                "order price must be positive, got {price}"
            )));
        }
        if size == 0 {
            return Err(Error::invalid_input("order size must be positive"));
        }

        let book = self.book(key);
        let mut book = book.lock();

        let order = Order {
            id: self.next_order_id(),
            instrument: key.clone(),
            side,
            price,
            remaining: size,
            timestamp: Utc::now(),
        };
        let order_id = order.id;

        info!(
            %order_id,
            instrument = %key,
            %side,
            price,
            size,
            "Order submitted"
        );

        book.insert(order)?;
        let fills = book.run_matching()?;
        drop(book);

        let report = SubmitReport::from_fills(order_id, size, fills);

        self.metrics.orders_received.increment();
        if report.has_fills() {
            self.metrics.orders_matched.increment();
        }
        self.metrics.trades_executed.add(report.fills.len() as u64);
        self.metrics
            .contracts_traded
            .add(report.fills.iter().map(|f| u64::from(f.size)).sum());

        Ok(report)
    }

    /// Read-only snapshot of a book's top levels
    ///
    /// An unseen key yields an empty snapshot rather than creating a book.
    pub fn snapshot(&self, key: &InstrumentKey, depth: usize) -> BookSnapshot {
        let book = {
            let books = self.books.read();
            books.get(key).cloned()
        };
        match book {
            Some(book) => book.lock().snapshot(depth),
            None => BookSnapshot {
                instrument: key.clone(),
                bids: Vec::new(),
                asks: Vec::new(),
                timestamp: Utc::now(),
            },
        }
    }

    /// Instruments with a live book
    pub fn instruments(&self) -> Vec<InstrumentKey> {
        self.books.read().keys().cloned().collect()
    }

    /// Check whether a book exists for the key
    pub fn has_book(&self, key: &InstrumentKey) -> bool {
        self.books.read().contains_key(key)
    }

    /// Point-in-time engine counters
    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }
}

impl Default for BookRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use common::OptionType;

    fn call_key() -> InstrumentKey {
        InstrumentKey::new("STETH", 2500.0, OptionType::Call)
    }

    fn put_key() -> InstrumentKey {
        InstrumentKey::new("STETH", 2500.0, OptionType::Put)
    }

    #[test]
    fn test_lazy_book_creation() {
        let registry = BookRegistry::new();
        assert!(!registry.has_book(&call_key()));

        registry.submit(&call_key(), Side::Buy, 10.0, 5).unwrap();
        assert!(registry.has_book(&call_key()));
        assert!(!registry.has_book(&put_key()));
    }

    #[test]
    fn test_snapshot_does_not_create_books() {
        let registry = BookRegistry::new();
        let snapshot = registry.snapshot(&call_key(), 10);
        assert!(snapshot.bids.is_empty());
        assert!(snapshot.asks.is_empty());
        assert!(!registry.has_book(&call_key()));
    }

    #[test]
    fn test_submit_validates_before_mutation() {
        let registry = BookRegistry::new();
        assert_matches!(
            registry.submit(&call_key(), Side::Buy, 0.0, 5),
            Err(Error::InvalidInput(_))
        );
        assert_matches!(
            registry.submit(&call_key(), Side::Buy, 10.0, 0),
            Err(Error::InvalidInput(_))
        );
        // Note: the book map is untouched by rejected submissions.
        assert!(!registry.has_book(&call_key()));
        assert_eq!(registry.metrics().orders_received, 0);
    }

    #[test]
    fn test_order_ids_monotonic() {
        let registry = BookRegistry::new();
        let a = registry.submit(&call_key(), Side::Buy, 9.0, 1).unwrap();
        let b = registry.submit(&call_key(), Side::Buy, 9.5, 1).unwrap();
        let c = registry.submit(&put_key(), Side::Sell, 20.0, 1).unwrap();
        assert!(a.order_id < b.order_id);
        assert!(b.order_id < c.order_id);
    }

    #[test]
    fn test_submit_triggers_matching() {
        let registry = BookRegistry::new();
        let resting = registry.submit(&call_key(), Side::Buy, 10.0, 5).unwrap();
        assert!(!resting.has_fills());
        assert_eq!(resting.resting_size, 5);

        let crossing = registry.submit(&call_key(), Side::Sell, 8.0, 3).unwrap();
        assert!(crossing.fully_filled());
        assert_eq!(crossing.filled_size, 3);
        assert_eq!(crossing.avg_fill_price, Some(10.0));

        let snapshot = registry.snapshot(&call_key(), 10);
        assert!(snapshot.asks.is_empty());
        assert_eq!(snapshot.bids[0].size, 2);
    }

    #[test]
    fn test_books_are_isolated() {
        let registry = BookRegistry::new();
        registry.submit(&call_key(), Side::Buy, 10.0, 5).unwrap();
        registry.submit(&put_key(), Side::Sell, 8.0, 3).unwrap();

        // Opposite sides on different instruments never cross.
        assert_eq!(registry.snapshot(&call_key(), 10).bids[0].size, 5);
        assert_eq!(registry.snapshot(&put_key(), 10).asks[0].size, 3);
        assert_eq!(registry.metrics().trades_executed, 0);
    }

    #[test]
    fn test_metrics_counting() {
        let registry = BookRegistry::new();
        registry.submit(&call_key(), Side::Buy, 10.0, 5).unwrap();
        registry.submit(&call_key(), Side::Sell, 10.0, 5).unwrap();

        let metrics = registry.metrics();
        assert_eq!(metrics.orders_received, 2);
        assert_eq!(metrics.orders_matched, 1);
        assert_eq!(metrics.trades_executed, 1);
        assert_eq!(metrics.contracts_traded, 5);
    }

    #[test]
    fn test_concurrent_submissions_serialize() {
        let registry = Arc::new(BookRegistry::new());
        let mut handles = Vec::new();

        for i in 0..8u32 {
            let registry = Arc::clone(&registry);
            handles.push(std::thread::spawn(move || {
                let side = if i % 2 == 0 { Side::Buy } else { Side::Sell };
                registry.submit(&call_key(), side, 10.0, 2).unwrap();
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }

        // Four buys and four sells of equal size at one price: everything
        // crosses, nothing rests, and the book is not crossed.
        let metrics = registry.metrics();
        assert_eq!(metrics.orders_received, 8);
        assert_eq!(metrics.contracts_traded, 8);
        let snapshot = registry.snapshot(&call_key(), 10);
        assert!(snapshot.bids.is_empty());
        assert!(snapshot.asks.is_empty());
    }
}
