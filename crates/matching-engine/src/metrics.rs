//! Metrics for the matching engine
//!
//! Plain atomic counters; cheap enough to sit on the submission path.

use std::sync::atomic::{AtomicU64, Ordering};

/// Simple atomic counter
#[derive(Debug, Default)]
pub struct Counter {
    value: AtomicU64,
}

impl Counter {
    pub fn increment(&self) {
        self.value.fetch_add(1, Ordering::Relaxed);
    }

    pub fn add(&self, n: u64) {
        self.value.fetch_add(n, Ordering::Relaxed);
    }

    pub fn get(&self) -> u64 {
        self.value.load(Ordering::Relaxed)
    }
}

/// Counters kept by the book registry
#[derive(Debug, Default)]
pub struct EngineMetrics {
    /// Orders accepted by submit
    pub orders_received: Counter,
    /// Orders that produced at least one fill on submission
    pub orders_matched: Counter,
    /// Fills executed
    pub trades_executed: Counter,
    /// Total contracts traded across all fills
    pub contracts_traded: Counter,
}

impl EngineMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Point-in-time copy of all counters
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            orders_received: self.orders_received.get(),
            orders_matched: self.orders_matched.get(),
            trades_executed: self.trades_executed.get(),
            contracts_traded: self.contracts_traded.get(),
        }
    }
}

/// Point-in-time metrics view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub orders_received: u64,
    pub orders_matched: u64,
    pub trades_executed: u64,
    pub contracts_traded: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counter() {
        let counter = Counter::default();
        counter.increment();
        counter.add(4);
        assert_eq!(counter.get(), 5);
    }

    #[test]
    fn test_snapshot() {
        let metrics = EngineMetrics::new();
        metrics.orders_received.increment();
        metrics.orders_received.increment();
        metrics.trades_executed.increment();
        metrics.contracts_traded.add(10);

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.orders_received, 2);
        assert_eq!(snapshot.orders_matched, 0);
        assert_eq!(snapshot.trades_executed, 1);
        assert_eq!(snapshot.contracts_traded, 10);
    }
}
