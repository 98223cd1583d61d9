//! Order matching for PerpX
//!
//! This crate implements the per-instrument limit order books and the
//! registry that owns them.
//!
//! # Critical properties
//!
//! 1. Deterministic: same submissions in the same order produce the same
//!    fills, always
//! 2. Price-time priority, strictly enforced (FIFO within a price level)
//! 3. Per-instrument isolation: books never interact, and submissions to
//!    different instruments never contend
//! 4. A book is never left crossed after a matching pass

pub mod book;
pub mod metrics;
pub mod registry;
pub mod result;

pub use book::{BookSnapshot, InstrumentBook, Order, PriceLevel};
pub use metrics::{EngineMetrics, MetricsSnapshot};
pub use registry::BookRegistry;
pub use result::{Fill, SubmitReport};
