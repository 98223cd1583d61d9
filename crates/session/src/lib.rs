//! Trading session orchestration for PerpX
//!
//! A [`TradingSession`] ties the venue together for one asset: it quotes
//! contracts through the pricing model, routes orders through the book
//! registry, and settles or exercises the resulting positions through the
//! payoff evaluator.
//!
//! Positions are owned by the session that created them and never shared;
//! order books are only ever touched through the registry's public
//! operations.

pub mod session;
pub mod types;

pub use session::TradingSession;
pub use types::{Position, SettlementResult, SettlementStatus, TradeReport};
